// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between a refresh control and the scroll surface hosting it.

use core::time::Duration;

use kurbo::{Insets, Rect, Size, Vec2};

use crate::Edge;

bitflags::bitflags! {
    /// Telemetry and mutations a [`ScrollHost`] supports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Reports the content offset.
        const OFFSET               = 1 << 0;
        /// Reports viewport and content sizes.
        const EXTENTS              = 1 << 1;
        /// Reports whether a pointer is actively dragging.
        const DRAG_STATE           = 1 << 2;
        /// Reports and accepts content insets, immediate and animated.
        const CONTENT_INSET        = 1 << 3;
        /// Can toggle overscroll bounce per edge.
        const BOUNCE               = 1 << 4;
        /// Notifies observers of offset changes.
        const OBSERVE_OFFSET       = 1 << 5;
        /// Notifies observers of content size changes.
        const OBSERVE_CONTENT_SIZE = 1 << 6;
    }
}

impl Capabilities {
    /// What every refresh control needs, whatever its direction.
    pub const REQUIRED: Self = Self::OFFSET
        .union(Self::EXTENTS)
        .union(Self::DRAG_STATE)
        .union(Self::CONTENT_INSET)
        .union(Self::BOUNCE)
        .union(Self::OBSERVE_OFFSET);
}

/// A host property a refresh control can observe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObservedKey {
    /// The content offset.
    Offset,
    /// The content size.
    ContentSize,
}

/// Opaque handle for one host observation, minted by the host.
///
/// Hosts pass the handle back with every change notification. Handles are
/// compared for identity only; a host must not reuse a handle after
/// [`ScrollHost::unobserve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// Identifies one animated inset change, minted by the control.
///
/// The host reports completion by passing the token to
/// [`PullRefresh::animation_finished`](crate::PullRefresh::animation_finished).
/// Tokens are only unique within the control that minted them; a host
/// running several controls reports each completion to the control whose
/// request started the animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken {
    pub(crate) epoch: u32,
    pub(crate) serial: u32,
}

/// A scroll surface that can host a refresh control.
///
/// The host owns the view hierarchy, animation primitives, and clock. It
/// drives the control by calling back into
/// [`PullRefresh`](crate::PullRefresh) from its own event loop; none of these
/// methods may call into the control re-entrantly.
pub trait ScrollHost {
    /// The telemetry and mutations this host supports.
    fn capabilities(&self) -> Capabilities;

    /// Monotonic time used to schedule and fire timers.
    fn now(&self) -> Duration;

    /// Current content offset.
    fn content_offset(&self) -> Vec2;

    /// Size of the visible viewport.
    fn viewport_size(&self) -> Size;

    /// Size of the scrollable content.
    fn content_size(&self) -> Size;

    /// `true` while a pointer actively drives the scroll.
    fn is_dragging(&self) -> bool;

    /// Current content inset.
    fn content_inset(&self) -> Insets;

    /// Sets the content inset immediately, cancelling any inset animation in flight.
    fn set_content_inset(&mut self, inset: Insets);

    /// Animates the content inset to `target` over `duration`.
    ///
    /// A new request replaces any inset animation already in flight. The host
    /// reports completion later, from its event loop, with `token`.
    fn animate_content_inset(&mut self, target: Insets, duration: Duration, token: AnimationToken);

    /// Enables or disables overscroll bounce on `edge`.
    fn set_bounces(&mut self, edge: Edge, bounces: bool);

    /// Starts delivering change notifications for `key`.
    fn observe(&mut self, key: ObservedKey) -> ObservationId;

    /// Stops delivering notifications for `id`.
    fn unobserve(&mut self, id: ObservationId);

    /// Removes the control from the host's view hierarchy.
    fn remove_control(&mut self);

    /// The control's frame moved; the host should re-place its view.
    fn control_moved(&mut self, frame: Rect) {
        let _ = frame;
    }
}
