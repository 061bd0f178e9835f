// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A pull-to-refresh and a push-to-load-more control on one simulated scroll view.
//!
//! The simulated surface plays the part of a host toolkit: it owns a clock,
//! runs inset animations to completion after their duration, queues change
//! notifications, and routes them to whichever control holds the handle.
//! Animation tokens are only unique per control, so each completion goes back
//! to the control that started the animation.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example simulated_refresh`

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Insets, Rect, Size, Vec2};
use understory_refresh::{
    AnimationToken, Capabilities, Direction, Edge, ObservationId, ObservedKey, PullRefresh,
    RefreshConfig, ScrollHost,
};

const TOP: usize = 0;
const BOTTOM: usize = 1;

/// Events the surface delivers to controls from its event loop.
#[derive(Copy, Clone, Debug)]
enum Delivery {
    Changed(ObservationId),
    /// Index of the control that started the animation, and its token.
    AnimationDone(usize, AnimationToken),
}

#[derive(Debug)]
struct SimulatedScrollView {
    now: Duration,
    offset: f64,
    dragging: bool,
    viewport: Size,
    content: Size,
    inset: Insets,
    observations: Vec<(ObservationId, ObservedKey)>,
    next_observation: u64,
    /// Index of the control currently calling into the surface.
    active: usize,
    /// Inset animations in flight: owner, target, deadline, token.
    animations: Vec<(usize, Insets, Duration, AnimationToken)>,
    queue: VecDeque<Delivery>,
    removed: bool,
}

impl SimulatedScrollView {
    fn new() -> Self {
        Self {
            now: Duration::ZERO,
            offset: 0.0,
            dragging: false,
            viewport: Size::new(375.0, 667.0),
            content: Size::new(375.0, 1400.0),
            inset: Insets::ZERO,
            observations: Vec::new(),
            next_observation: 1,
            active: TOP,
            animations: Vec::new(),
            queue: VecDeque::new(),
            removed: false,
        }
    }

    fn notify(&mut self, key: ObservedKey) {
        for &(id, observed) in &self.observations {
            if observed == key {
                self.queue.push_back(Delivery::Changed(id));
            }
        }
    }

    fn drag_to(&mut self, offset: f64) {
        self.dragging = true;
        self.offset = offset;
        self.notify(ObservedKey::Offset);
    }

    fn release(&mut self) {
        self.dragging = false;
        self.notify(ObservedKey::Offset);
    }

    fn settle(&mut self, offset: f64) {
        self.offset = offset;
        self.notify(ObservedKey::Offset);
    }

    /// Marks `owner` as the control making the next calls.
    fn act_as(&mut self, owner: usize) -> &mut Self {
        self.active = owner;
        self
    }

    fn grow_content(&mut self, by: f64) {
        self.content.height += by;
        self.notify(ObservedKey::ContentSize);
    }

    /// Moves the clock forward, finishing animations whose deadline passed.
    fn advance(&mut self, by: Duration) {
        self.now += by;
        let now = self.now;
        let (done, pending): (Vec<_>, Vec<_>) = self
            .animations
            .drain(..)
            .partition(|&(_, _, deadline, _)| deadline <= now);
        self.animations = pending;
        for (owner, target, _, token) in done {
            self.inset = target;
            self.queue.push_back(Delivery::AnimationDone(owner, token));
        }
    }

    /// Delivers queued events to the controls, then fires their timers.
    ///
    /// `controls` is indexed by owner.
    fn pump(&mut self, controls: &mut [&mut PullRefresh]) {
        while let Some(delivery) = self.queue.pop_front() {
            match delivery {
                Delivery::Changed(id) => {
                    for (index, control) in controls.iter_mut().enumerate() {
                        control.handle_notification(self.act_as(index), id);
                    }
                }
                Delivery::AnimationDone(owner, token) => {
                    if let Some(control) = controls.get_mut(owner) {
                        control.animation_finished(self.act_as(owner), token);
                    }
                }
            }
        }
        for (index, control) in controls.iter_mut().enumerate() {
            control.tick(self.act_as(index));
        }
    }
}

impl ScrollHost for SimulatedScrollView {
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn content_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.offset)
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn content_inset(&self) -> Insets {
        self.inset
    }

    fn set_content_inset(&mut self, inset: Insets) {
        let active = self.active;
        self.animations.retain(|&(owner, ..)| owner != active);
        self.inset = inset;
    }

    fn animate_content_inset(
        &mut self,
        target: Insets,
        duration: Duration,
        token: AnimationToken,
    ) {
        // One inset animation per control; the replaced one never reports back.
        let active = self.active;
        self.animations.retain(|&(owner, ..)| owner != active);
        self.animations.push((active, target, self.now + duration, token));
    }

    fn set_bounces(&mut self, edge: Edge, bounces: bool) {
        log::info!("bounce on {edge:?} edge: {bounces}");
    }

    fn observe(&mut self, key: ObservedKey) -> ObservationId {
        let id = ObservationId(self.next_observation);
        self.next_observation += 1;
        self.observations.push((id, key));
        id
    }

    fn unobserve(&mut self, id: ObservationId) {
        self.observations.retain(|&(live, _)| live != id);
    }

    fn remove_control(&mut self) {
        log::info!("control removed from scroll view");
        self.removed = true;
    }

    fn control_moved(&mut self, frame: Rect) {
        log::info!("load-more control moved to y = {}", frame.y0);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut view = SimulatedScrollView::new();
    let reloads = Rc::new(Cell::new(0_u32));
    let loads = Rc::new(Cell::new(0_u32));

    let config = RefreshConfig::default().with_auto_stop_delay(Duration::from_secs(1));
    let mut top = PullRefresh::new(
        config.clone(),
        Rect::new(0.0, -80.0, 375.0, 0.0),
        Direction::TopPull,
        {
            let reloads = Rc::clone(&reloads);
            move || reloads.set(reloads.get() + 1)
        },
    );
    let mut bottom = PullRefresh::new(
        config,
        Rect::new(0.0, 0.0, 375.0, 80.0),
        Direction::BottomPush,
        {
            let loads = Rc::clone(&loads);
            move || loads.set(loads.get() + 1)
        },
    );

    if let Err(err) = top.attach(view.act_as(TOP)) {
        log::error!("{err}");
        return;
    }
    if let Err(err) = bottom.attach(view.act_as(BOTTOM)) {
        log::error!("{err}");
        return;
    }
    let frame = Duration::from_millis(16);

    // Pull down past the threshold and let go; the refresh auto-stops after a second.
    view.drag_to(-40.0);
    view.pump(&mut [&mut top, &mut bottom]);
    view.drag_to(-95.0);
    view.pump(&mut [&mut top, &mut bottom]);
    view.release();
    view.pump(&mut [&mut top, &mut bottom]);
    view.settle(-80.0);
    for _ in 0..120 {
        view.advance(frame);
        view.pump(&mut [&mut top, &mut bottom]);
    }
    log::info!("after pull: {:?}, {} reload(s)", top.state(), reloads.get());

    // Push up at the end of the content; stop the load by hand as new rows arrive.
    let end = view.content.height - view.viewport.height;
    view.drag_to(end + 90.0);
    view.pump(&mut [&mut top, &mut bottom]);
    view.release();
    view.pump(&mut [&mut top, &mut bottom]);
    for _ in 0..40 {
        view.advance(frame);
        view.pump(&mut [&mut top, &mut bottom]);
    }
    view.grow_content(600.0);
    bottom.request_stop(view.act_as(BOTTOM));
    for _ in 0..40 {
        view.advance(frame);
        view.pump(&mut [&mut top, &mut bottom]);
    }
    log::info!("after push: {:?}, {} load(s)", bottom.state(), loads.get());

    // No more pages: wind the load-more control down and remove it.
    bottom.finish(view.act_as(BOTTOM));
    while bottom.pending_timers() > 0 {
        view.advance(frame);
        view.pump(&mut [&mut top, &mut bottom]);
    }
    top.destroy(view.act_as(TOP));
    log::info!(
        "done: removed = {}, inset = {:?}, observations left = {}",
        view.removed,
        view.inset,
        view.observations.len()
    );
}
