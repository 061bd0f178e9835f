// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State-entry side effects: indicator changes, inset animations, and timers.

use core::f64::consts::PI;
use core::time::Duration;

use kurbo::Insets;

use crate::timer::{Epoch, TimerAction, TimerQueue};
use crate::{AnimationToken, Edge, RefreshConfig, RefreshState, ScrollHost};

/// Glyph rotation while armed.
///
/// A hair under a half turn so the glyph always rotates the same way, both
/// into and out of the armed orientation.
pub const ARMED_ROTATION: f64 = PI - 1e-7;

/// What a renderer should show for the control.
///
/// The control only records targets. Renderers animate `rotation` towards
/// its new value over `rotation_duration` and draw the spinner while
/// `spinning`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorState {
    /// Target glyph rotation in radians: `0.0` at rest, [`ARMED_ROTATION`] when armed.
    pub rotation: f64,
    /// How long the renderer should take to reach `rotation`.
    pub rotation_duration: Duration,
    /// Whether the static arrow glyph is drawn.
    pub glyph_visible: bool,
    /// Whether the activity spinner runs.
    pub spinning: bool,
    /// Glyph opacity.
    pub alpha: f64,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            rotation_duration: Duration::ZERO,
            glyph_visible: true,
            spinning: false,
            alpha: 1.0,
        }
    }
}

/// The two inset animations the control runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum InsetAnimation {
    /// Grow the inset by the activation height when a refresh starts.
    Expand,
    /// Return to the baseline inset when a refresh stops.
    Restore,
}

/// A resolved inset animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Completion {
    pub(crate) animation: InsetAnimation,
    /// Replaced by a newer inset animation before the host finished it.
    pub(crate) interrupted: bool,
}

/// Everything a transition's side effects may touch.
pub(crate) struct TransitionContext<'a, H: ?Sized> {
    pub(crate) host: &'a mut H,
    pub(crate) config: &'a RefreshConfig,
    pub(crate) edge: Edge,
    pub(crate) epoch: Epoch,
}

/// Runs side effects for state changes and resolves their completions.
#[derive(Clone, Debug, Default)]
pub(crate) struct AnimationDriver {
    indicator: IndicatorState,
    baseline: Insets,
    /// The host inset differs from `baseline` until a restore completes.
    inset_modified: bool,
    in_flight: Option<(AnimationToken, InsetAnimation)>,
    serial: u32,
    timers: TimerQueue,
}

impl AnimationDriver {
    pub(crate) fn indicator(&self) -> &IndicatorState {
        &self.indicator
    }

    pub(crate) fn baseline(&self) -> Insets {
        self.baseline
    }

    pub(crate) fn capture_baseline(&mut self, inset: Insets) {
        self.baseline = inset;
    }

    pub(crate) fn set_glyph_alpha(&mut self, alpha: f64) {
        self.indicator.alpha = alpha;
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Applies the entry effects of `target`.
    ///
    /// Returns the inset animation this transition interrupted, if any. The
    /// caller resolves it immediately so every animation completes once.
    pub(crate) fn run_transition<H: ScrollHost + ?Sized>(
        &mut self,
        target: RefreshState,
        cx: &mut TransitionContext<'_, H>,
    ) -> Option<Completion> {
        match target {
            RefreshState::Pulling => {
                self.rotate(0.0, cx.config.rotation_duration);
                None
            }
            RefreshState::Triggered => {
                self.rotate(ARMED_ROTATION, cx.config.rotation_duration);
                None
            }
            RefreshState::Refreshing => self.start_refreshing(cx),
            RefreshState::Stop => self.wind_down(cx),
            RefreshState::Finish => {
                let now = cx.host.now();
                let step = cx.config.animation_duration;
                self.timers.schedule(now + step, cx.epoch, TimerAction::FinishStop);
                self.timers.schedule(now + step * 2, cx.epoch, TimerAction::Remove);
                None
            }
        }
    }

    fn start_refreshing<H: ScrollHost + ?Sized>(
        &mut self,
        cx: &mut TransitionContext<'_, H>,
    ) -> Option<Completion> {
        self.indicator.spinning = true;
        self.indicator.glyph_visible = false;

        // While a restore is still running the host reports an inset between
        // the expanded one and the baseline.
        if !self.inset_modified {
            self.baseline = cx.host.content_inset();
        }
        let expanded = cx.edge.grow(self.baseline, cx.config.activation_height);
        cx.host.set_bounces(cx.edge, false);
        self.inset_modified = true;
        self.animate_inset(cx, expanded, InsetAnimation::Expand)
    }

    /// Stop effects: spinner off, glyph back at rest, bounce on, baseline inset restored.
    pub(crate) fn wind_down<H: ScrollHost + ?Sized>(
        &mut self,
        cx: &mut TransitionContext<'_, H>,
    ) -> Option<Completion> {
        self.indicator.spinning = false;
        self.indicator.glyph_visible = true;
        self.rotate(0.0, cx.config.animation_duration);
        self.timers.cancel_auto_stop();

        cx.host.set_bounces(cx.edge, true);
        let baseline = self.baseline;
        self.animate_inset(cx, baseline, InsetAnimation::Restore)
    }

    fn animate_inset<H: ScrollHost + ?Sized>(
        &mut self,
        cx: &mut TransitionContext<'_, H>,
        target: Insets,
        animation: InsetAnimation,
    ) -> Option<Completion> {
        self.serial = self.serial.wrapping_add(1);
        let token = AnimationToken {
            epoch: cx.epoch.0,
            serial: self.serial,
        };
        let replaced = self.in_flight.replace((token, animation));
        cx.host.animate_content_inset(target, cx.config.animation_duration, token);
        replaced.map(|(_, animation)| Completion {
            animation,
            interrupted: true,
        })
    }

    /// Resolves a host-reported completion.
    ///
    /// Returns `None` for tokens that are not the animation in flight: ones
    /// already resolved, replaced, or issued before a detach.
    pub(crate) fn animation_finished(&mut self, token: AnimationToken) -> Option<Completion> {
        match self.in_flight {
            Some((live, animation)) if live == token => {
                self.in_flight = None;
                if animation == InsetAnimation::Restore {
                    self.inset_modified = false;
                }
                Some(Completion {
                    animation,
                    interrupted: false,
                })
            }
            _ => {
                log::trace!("ignoring completion for {token:?}");
                None
            }
        }
    }

    pub(crate) fn schedule_auto_stop(
        &mut self,
        now: Duration,
        delay: Duration,
        cycle: u32,
        epoch: Epoch,
    ) {
        self.timers.schedule(now + delay, epoch, TimerAction::AutoStop { cycle });
    }

    pub(crate) fn pop_due(&mut self, now: Duration, epoch: Epoch) -> Option<TimerAction> {
        self.timers.pop_due(now, epoch)
    }

    /// Puts the host inset and bounce back immediately if a refresh changed them.
    pub(crate) fn restore_now<H: ScrollHost + ?Sized>(&mut self, host: &mut H, edge: Edge) {
        if self.inset_modified {
            host.set_content_inset(self.baseline);
            host.set_bounces(edge, true);
            self.inset_modified = false;
        }
    }

    /// Forgets pending timers, animations, and indicator changes.
    pub(crate) fn reset(&mut self) {
        self.timers.clear();
        self.in_flight = None;
        self.indicator = IndicatorState::default();
    }

    fn rotate(&mut self, rotation: f64, duration: Duration) {
        self.indicator.rotation = rotation;
        self.indicator.rotation_duration = duration;
    }
}
