// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording [`ScrollHost`] for unit tests.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Insets, Rect, Size, Vec2};

use crate::{AnimationToken, Capabilities, Edge, ObservationId, ObservedKey, ScrollHost};

/// Mutations the control performed on the host, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum HostCall {
    SetInset(Insets),
    AnimateInset(Insets, AnimationToken),
    Bounces(Edge, bool),
    Observe(ObservedKey, ObservationId),
    Unobserve(ObservationId),
    Moved(Rect),
    Remove,
}

#[derive(Debug)]
pub(crate) struct TestHost {
    pub(crate) capabilities: Capabilities,
    pub(crate) now: Duration,
    pub(crate) offset: f64,
    pub(crate) dragging: bool,
    pub(crate) viewport: Size,
    pub(crate) content: Size,
    /// Animated insets jump straight to their target.
    pub(crate) inset: Insets,
    pub(crate) calls: Vec<HostCall>,
    observations: Vec<(ObservationId, ObservedKey)>,
    next_id: u64,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self {
            capabilities: Capabilities::all(),
            now: Duration::ZERO,
            offset: 0.0,
            dragging: false,
            viewport: Size::new(320.0, 480.0),
            content: Size::new(320.0, 2000.0),
            inset: Insets::ZERO,
            calls: Vec::new(),
            observations: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn scroll_to(&mut self, offset: f64, dragging: bool) {
        self.offset = offset;
        self.dragging = dragging;
    }

    pub(crate) fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub(crate) fn observation_for(&self, key: ObservedKey) -> Option<ObservationId> {
        self.observations
            .iter()
            .find(|(_, k)| *k == key)
            .map(|&(id, _)| id)
    }

    pub(crate) fn live_observations(&self) -> usize {
        self.observations.len()
    }

    /// Token of the most recent inset animation.
    pub(crate) fn last_token(&self) -> Option<AnimationToken> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::AnimateInset(_, token) => Some(*token),
            _ => None,
        })
    }

    pub(crate) fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|&c| pred(c)).count()
    }
}

impl ScrollHost for TestHost {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
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
        self.inset = inset;
        self.calls.push(HostCall::SetInset(inset));
    }

    fn animate_content_inset(
        &mut self,
        target: Insets,
        _duration: Duration,
        token: AnimationToken,
    ) {
        self.inset = target;
        self.calls.push(HostCall::AnimateInset(target, token));
    }

    fn set_bounces(&mut self, edge: Edge, bounces: bool) {
        self.calls.push(HostCall::Bounces(edge, bounces));
    }

    fn observe(&mut self, key: ObservedKey) -> ObservationId {
        let id = ObservationId(self.next_id);
        self.next_id += 1;
        self.observations.push((id, key));
        self.calls.push(HostCall::Observe(key, id));
        id
    }

    fn unobserve(&mut self, id: ObservationId) {
        self.observations.retain(|(live, _)| *live != id);
        self.calls.push(HostCall::Unobserve(id));
    }

    fn remove_control(&mut self) {
        self.calls.push(HostCall::Remove);
    }

    fn control_moved(&mut self, frame: Rect) {
        self.calls.push(HostCall::Moved(frame));
    }
}
