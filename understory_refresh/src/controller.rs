// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The refresh control: lifecycle, geometry, and transition dispatch.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Insets, Point, Rect};

use crate::driver::{AnimationDriver, Completion, InsetAnimation, TransitionContext};
use crate::observer::{ScrollObserver, snapshot};
use crate::timer::{Epoch, TimerAction};
use crate::{
    AnimationToken, AttachError, Capabilities, Direction, IndicatorLayout, IndicatorState,
    ObservationId, ObservedKey, RefreshConfig, RefreshState, ScrollHost, edge_distance,
    next_state,
};

/// Called once each time a refresh starts.
pub type RefreshCallback = Box<dyn FnMut()>;

/// A pull-to-refresh (or push-to-load-more) control for one scroll surface.
///
/// The control holds no reference to its host. While attached it holds the
/// host's observation handles; every entry point takes the host explicitly:
///
/// - [`attach`](Self::attach) / [`detach`](Self::detach) / [`destroy`](Self::destroy)
///   manage the subscription.
/// - [`handle_notification`](Self::handle_notification) feeds observed changes.
/// - [`animation_finished`](Self::animation_finished) reports inset animation completion.
/// - [`tick`](Self::tick) fires due timers against [`ScrollHost::now`].
/// - [`request_stop`](Self::request_stop) and [`finish`](Self::finish) end a refresh
///   or the control's life.
///
/// Each distinct state change runs its side effects exactly once, before the
/// call that caused it returns.
pub struct PullRefresh {
    config: RefreshConfig,
    direction: Direction,
    frame: Rect,
    layout: IndicatorLayout,
    state: RefreshState,
    driver: AnimationDriver,
    observer: ScrollObserver,
    attached: bool,
    destroyed: bool,
    epoch: Epoch,
    /// Incremented on every entry into `Refreshing`.
    cycle: u32,
    on_refresh: RefreshCallback,
}

impl fmt::Debug for PullRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullRefresh")
            .field("config", &self.config)
            .field("direction", &self.direction)
            .field("frame", &self.frame)
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("observer", &self.observer)
            .field("attached", &self.attached)
            .field("destroyed", &self.destroyed)
            .field("epoch", &self.epoch)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl PullRefresh {
    /// Creates a detached control in [`RefreshState::Pulling`].
    ///
    /// `frame` is the control's frame in the host's content coordinates.
    /// `on_refresh` runs once per refresh, when the inset has finished growing.
    pub fn new(
        config: RefreshConfig,
        frame: Rect,
        direction: Direction,
        on_refresh: impl FnMut() + 'static,
    ) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid refresh config: {:?}",
            config.validate()
        );
        let layout = IndicatorLayout::compute(
            frame.size(),
            config.glyph_size,
            config.activation_height,
        );
        Self {
            config,
            direction,
            frame,
            layout,
            state: RefreshState::Pulling,
            driver: AnimationDriver::default(),
            observer: ScrollObserver::default(),
            attached: false,
            destroyed: false,
            epoch: Epoch::default(),
            cycle: 0,
            on_refresh: Box::new(on_refresh),
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> RefreshState {
        self.state
    }

    /// The monitored edge.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The configuration the control was built with.
    #[must_use]
    pub const fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// The control's frame in host content coordinates.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Glyph placement within the control.
    #[must_use]
    pub const fn layout(&self) -> &IndicatorLayout {
        &self.layout
    }

    /// What the renderer should currently show.
    #[must_use]
    pub fn indicator(&self) -> &IndicatorState {
        self.driver.indicator()
    }

    /// The inset restored when the current or next refresh stops.
    #[must_use]
    pub fn baseline_inset(&self) -> Insets {
        self.driver.baseline()
    }

    /// Returns `true` while the control observes a host.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns `true` once the control was destroyed or removed itself.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of timers waiting to fire. Hosts can stop ticking at zero.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.driver.pending_timers()
    }

    /// Capabilities a host must report for this control's direction.
    #[must_use]
    pub fn required_capabilities(&self) -> Capabilities {
        match self.direction {
            Direction::TopPull => Capabilities::REQUIRED,
            Direction::BottomPush => Capabilities::REQUIRED | Capabilities::OBSERVE_CONTENT_SIZE,
        }
    }

    /// Starts observing `host`.
    ///
    /// Fails without touching `host` if it lacks a required capability. If
    /// the control is already attached it is detached from `host` first; a
    /// control moving to a different surface must be detached from the old
    /// one explicitly. The host's current inset becomes the baseline, and the
    /// current geometry is evaluated immediately.
    pub fn attach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> Result<(), AttachError> {
        if self.destroyed {
            log::warn!("attach on a destroyed refresh control ignored");
            return Ok(());
        }
        let missing = self.required_capabilities().difference(host.capabilities());
        if !missing.is_empty() {
            return Err(AttachError::MissingCapabilities { missing });
        }
        if self.attached {
            self.detach(host);
        }

        debug_assert!(
            !self.observer.is_subscribed(),
            "observations outlived the previous attachment"
        );
        self.driver.capture_baseline(host.content_inset());
        let (observer, initial) = ScrollObserver::subscribe(host, self.direction);
        self.observer = observer;
        self.attached = true;
        log::debug!(
            "refresh control attached ({:?}, epoch {})",
            self.direction,
            self.epoch.0
        );

        for key in initial {
            self.observe(host, key);
        }
        Ok(())
    }

    /// Stops observing `host` and invalidates everything still pending.
    ///
    /// If a refresh changed the host's inset or bounce, they are restored
    /// before returning. Timers and animation completions issued before the
    /// detach are ignored from now on, including a pending
    /// [`finish`](Self::finish) removal. The state returns to
    /// [`Pulling`](RefreshState::Pulling). Calling it while detached does nothing.
    pub fn detach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if !self.attached {
            return;
        }
        self.observer.unsubscribe(host);
        self.driver.restore_now(host, self.direction.edge());
        self.driver.reset();
        self.epoch.advance();
        self.attached = false;
        self.state = RefreshState::Pulling;
        log::debug!("refresh control detached (now epoch {})", self.epoch.0);
    }

    /// Detaches and turns every later call into a no-op.
    pub fn destroy<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.detach(host);
        self.destroyed = true;
    }

    /// Handles a change notification the host raised for observation `id`.
    ///
    /// Notifications for handles this control does not currently hold are dropped.
    pub fn handle_notification<H: ScrollHost + ?Sized>(&mut self, host: &mut H, id: ObservationId) {
        if !self.attached {
            log::trace!("notification {id:?} for a detached refresh control dropped");
            return;
        }
        match self.observer.accept(id) {
            Some(key) => self.observe(host, key),
            None => log::trace!("notification for unknown observation {id:?} dropped"),
        }
    }

    /// Handles the host finishing the inset animation identified by `token`.
    pub fn animation_finished<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        token: AnimationToken,
    ) {
        if !self.attached || token.epoch != self.epoch.0 {
            log::trace!("stale animation completion {token:?} dropped");
            return;
        }
        if let Some(completion) = self.driver.animation_finished(token) {
            self.complete(host, completion);
        }
    }

    /// Fires every timer due at [`ScrollHost::now`].
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if !self.attached {
            return;
        }
        let now = host.now();
        while let Some(action) = self.driver.pop_due(now, self.epoch) {
            match action {
                TimerAction::AutoStop { cycle } => {
                    if self.state == RefreshState::Refreshing && cycle == self.cycle {
                        log::debug!("auto-stopping refresh {cycle}");
                        self.transition(host, RefreshState::Stop);
                    }
                }
                TimerAction::FinishStop => {
                    let interrupted = self.driver.wind_down(&mut TransitionContext {
                        host: &mut *host,
                        config: &self.config,
                        edge: self.direction.edge(),
                        epoch: self.epoch,
                    });
                    if let Some(completion) = interrupted {
                        self.complete(host, completion);
                    }
                }
                TimerAction::Remove => {
                    self.destroy(host);
                    host.remove_control();
                    log::debug!("refresh control removed");
                    return;
                }
            }
        }
    }

    /// Ends the refresh in flight now instead of waiting for the auto-stop delay.
    ///
    /// Does nothing unless the state is [`Refreshing`](RefreshState::Refreshing).
    pub fn request_stop<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.destroyed {
            log::warn!("request_stop on a destroyed refresh control ignored");
            return;
        }
        if self.state == RefreshState::Refreshing {
            self.transition(host, RefreshState::Stop);
        }
    }

    /// Winds the control down and removes it from `host`.
    ///
    /// After one animation duration the stop effects run; after two the
    /// control detaches and calls [`ScrollHost::remove_control`]. Both happen
    /// from [`tick`](Self::tick).
    pub fn finish<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.destroyed || !self.attached {
            log::warn!("finish on a detached refresh control ignored");
            return;
        }
        self.transition(host, RefreshState::Finish);
    }

    /// Moves or resizes the control. The glyph layout follows size changes.
    pub fn set_frame(&mut self, frame: Rect) {
        if frame.size() != self.frame.size() {
            self.layout = IndicatorLayout::compute(
                frame.size(),
                self.config.glyph_size,
                self.config.activation_height,
            );
        }
        self.frame = frame;
    }

    fn observe<H: ScrollHost + ?Sized>(&mut self, host: &mut H, key: ObservedKey) {
        let telemetry = snapshot(&*host);
        match key {
            ObservedKey::Offset => {
                let distance = edge_distance(self.direction, &telemetry).max(0.0);
                self.driver.set_glyph_alpha(self.config.glyph_alpha(distance));
                let next = next_state(
                    self.state,
                    &telemetry,
                    self.direction,
                    self.config.activation_height,
                );
                self.transition(host, next);
            }
            ObservedKey::ContentSize => {
                if self.direction == Direction::BottomPush {
                    self.pin_to(host, telemetry.content_extent);
                }
            }
        }
    }

    /// Keeps a push-up control's top edge on the end of the content.
    fn pin_to<H: ScrollHost + ?Sized>(&mut self, host: &mut H, y: f64) {
        if self.frame.y0 == y {
            return;
        }
        self.frame = self.frame.with_origin(Point::new(self.frame.x0, y));
        host.control_moved(self.frame);
    }

    /// Commits `to` and runs its side effects, unless it is the current state.
    fn transition<H: ScrollHost + ?Sized>(&mut self, host: &mut H, to: RefreshState) {
        if to == self.state || self.destroyed {
            return;
        }
        log::debug!("refresh state {:?} -> {:?}", self.state, to);
        self.state = to;
        if to == RefreshState::Refreshing {
            self.cycle = self.cycle.wrapping_add(1);
        }
        let interrupted = self.driver.run_transition(
            to,
            &mut TransitionContext {
                host: &mut *host,
                config: &self.config,
                edge: self.direction.edge(),
                epoch: self.epoch,
            },
        );
        if let Some(completion) = interrupted {
            self.complete(host, completion);
        }
    }

    fn complete<H: ScrollHost + ?Sized>(&mut self, host: &mut H, completion: Completion) {
        match completion.animation {
            InsetAnimation::Expand => {
                if self.state == RefreshState::Refreshing && self.config.auto_stops() {
                    self.driver.schedule_auto_stop(
                        host.now(),
                        self.config.auto_stop_delay,
                        self.cycle,
                        self.epoch,
                    );
                }
                (self.on_refresh)();
            }
            InsetAnimation::Restore => {
                if self.state == RefreshState::Stop && !completion.interrupted {
                    self.transition(host, RefreshState::Pulling);
                }
            }
        }
    }
}
