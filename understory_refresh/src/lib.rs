// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_refresh --heading-base-level=0

//! Understory Refresh: pull-to-refresh and push-to-load-more state for scroll surfaces.
//!
//! This crate turns continuous scroll telemetry (offset, extents, whether a
//! pointer is dragging) into the small set of discrete states a refresh
//! control needs, and runs the side effects of each state change against a
//! host scroll surface. It does not draw, animate, or handle input itself.
//!
//! The core concepts are:
//!
//! - [`RefreshState`]: `Pulling` → `Triggered` → `Refreshing` → `Stop` → `Pulling`,
//!   plus the terminal `Finish`.
//! - [`next_state`]: the pure transition function, shared by both
//!   [`Direction`]s through [`edge_distance`]. `Refreshing` is sticky: scroll
//!   jitter never cancels a refresh in flight.
//! - [`ScrollHost`]: what a host surface provides: geometry, a clock, inset and
//!   bounce mutation, change observation, and removal of the control.
//! - [`PullRefresh`]: the control. It subscribes to the host, commits state
//!   changes, grows and restores the content inset, runs the auto-stop and
//!   removal timers, and calls the refresh callback.
//!
//! Host frameworks are responsible for:
//!
//! - Forwarding change notifications with [`PullRefresh::handle_notification`].
//! - Reporting finished inset animations with [`PullRefresh::animation_finished`].
//! - Calling [`PullRefresh::tick`] while [`PullRefresh::pending_timers`] is non-zero.
//! - Drawing the glyph and spinner from [`PullRefresh::layout`] and
//!   [`PullRefresh::indicator`].
//!
//! ## Lifetimes
//!
//! The control never stores a reference to its host. Detaching releases the
//! host's observation handles and bumps a liveness epoch carried by every
//! timer and [`AnimationToken`], so notifications, completions, and timers
//! that arrive late are dropped rather than applied to a detached control.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Insets, Rect, Size, Vec2};
//! use understory_refresh::{
//!     AnimationToken, Capabilities, Direction, Edge, ObservationId, ObservedKey, PullRefresh,
//!     RefreshConfig, RefreshState, ScrollHost,
//! };
//!
//! #[derive(Default)]
//! struct Surface {
//!     offset: f64,
//!     dragging: bool,
//!     inset: Insets,
//!     animation: Option<AnimationToken>,
//! }
//!
//! impl ScrollHost for Surface {
//!     fn capabilities(&self) -> Capabilities { Capabilities::all() }
//!     fn now(&self) -> Duration { Duration::ZERO }
//!     fn content_offset(&self) -> Vec2 { Vec2::new(0.0, self.offset) }
//!     fn viewport_size(&self) -> Size { Size::new(320.0, 480.0) }
//!     fn content_size(&self) -> Size { Size::new(320.0, 2000.0) }
//!     fn is_dragging(&self) -> bool { self.dragging }
//!     fn content_inset(&self) -> Insets { self.inset }
//!     fn set_content_inset(&mut self, inset: Insets) { self.inset = inset; }
//!     fn animate_content_inset(&mut self, target: Insets, _: Duration, token: AnimationToken) {
//!         self.inset = target;
//!         self.animation = Some(token);
//!     }
//!     fn set_bounces(&mut self, _: Edge, _: bool) {}
//!     fn observe(&mut self, _: ObservedKey) -> ObservationId { ObservationId(1) }
//!     fn unobserve(&mut self, _: ObservationId) {}
//!     fn remove_control(&mut self) {}
//! }
//!
//! let mut surface = Surface::default();
//! let mut control = PullRefresh::new(
//!     RefreshConfig::default(),
//!     Rect::new(0.0, -80.0, 320.0, 0.0),
//!     Direction::TopPull,
//!     || println!("reload!"),
//! );
//! control.attach(&mut surface).unwrap();
//!
//! // Drag past the 80px activation height, then let go.
//! surface.offset = -100.0;
//! surface.dragging = true;
//! control.handle_notification(&mut surface, ObservationId(1));
//! assert_eq!(control.state(), RefreshState::Triggered);
//!
//! surface.dragging = false;
//! control.handle_notification(&mut surface, ObservationId(1));
//! assert_eq!(control.state(), RefreshState::Refreshing);
//! assert_eq!(surface.inset.y0, 80.0);
//!
//! // The host finishes the inset animation; the callback runs now.
//! let token = surface.animation.take().unwrap();
//! control.animation_finished(&mut surface, token);
//!
//! // The reload is done: wind down.
//! control.request_stop(&mut surface);
//! assert_eq!(control.state(), RefreshState::Stop);
//! let token = surface.animation.take().unwrap();
//! control.animation_finished(&mut surface, token);
//! assert_eq!(control.state(), RefreshState::Pulling);
//! assert_eq!(surface.inset, Insets::ZERO);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod driver;
mod error;
mod host;
mod layout;
mod observer;
mod state;
mod timer;
mod types;

#[cfg(test)]
mod test_host;

pub use config::{
    Color, DEFAULT_ACTIVATION_HEIGHT, DEFAULT_ANIMATION_DURATION, DEFAULT_ROTATION_DURATION,
    RefreshConfig,
};
pub use controller::{PullRefresh, RefreshCallback};
pub use driver::{ARMED_ROTATION, IndicatorState};
pub use error::{AttachError, ConfigError};
pub use host::{AnimationToken, Capabilities, ObservationId, ObservedKey, ScrollHost};
pub use layout::IndicatorLayout;
pub use observer::{observed_keys, snapshot};
pub use state::{edge_distance, next_state};
pub use types::{Direction, Edge, RefreshState, ScrollTelemetry};
