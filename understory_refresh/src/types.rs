// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: direction, edges, refresh states, and telemetry snapshots.

use kurbo::Insets;

/// Which scroll edge a refresh control monitors.
///
/// Fixed at construction. A [`TopPull`](Direction::TopPull) control reacts to
/// the content being dragged down past its leading edge, a
/// [`BottomPush`](Direction::BottomPush) control to the content being pushed up
/// past its trailing edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pull down at the top of the content ("pull to refresh").
    #[default]
    TopPull,
    /// Push up at the bottom of the content ("load more").
    BottomPush,
}

impl Direction {
    /// The inset/bounce edge this direction adjusts while refreshing.
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::TopPull => Edge::Leading,
            Self::BottomPush => Edge::Trailing,
        }
    }
}

/// An edge along the scroll axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The start of the content (top for vertical scrolling).
    Leading,
    /// The end of the content (bottom for vertical scrolling).
    Trailing,
}

impl Edge {
    /// Returns `insets` with `amount` added on this edge.
    #[must_use]
    pub fn grow(self, insets: Insets, amount: f64) -> Insets {
        let mut grown = insets;
        match self {
            Self::Leading => grown.y0 += amount,
            Self::Trailing => grown.y1 += amount,
        }
        grown
    }
}

/// Discrete state of a refresh control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RefreshState {
    /// At rest, or being pulled without having reached the activation height.
    #[default]
    Pulling,
    /// Pulled past the activation height; releasing now starts a refresh.
    Triggered,
    /// A refresh is in flight. Scroll telemetry cannot leave this state.
    Refreshing,
    /// The refresh is winding down; the baseline inset is being restored.
    Stop,
    /// Terminal: the control is being removed from its host.
    Finish,
}

impl RefreshState {
    /// Returns `true` for the states scroll telemetry can never leave.
    ///
    /// A [`Stop`](Self::Stop) control can be pulled into a new refresh while
    /// its inset is still being restored.
    #[must_use]
    pub const fn ignores_telemetry(self) -> bool {
        matches!(self, Self::Refreshing | Self::Finish)
    }
}

/// A snapshot of scroll geometry along the scroll axis.
///
/// Produced once per observation and not retained past the decision it feeds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollTelemetry {
    /// Scroll offset along the axis. Negative when pulled past the leading edge.
    pub offset: f64,
    /// Visible extent of the scroll surface along the axis.
    pub viewport_extent: f64,
    /// Total extent of the content along the axis.
    pub content_extent: f64,
    /// `true` while a pointer actively drives the scroll.
    pub dragging: bool,
    /// Current content inset of the surface.
    pub content_inset: Insets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_map_to_edges() {
        assert_eq!(Direction::TopPull.edge(), Edge::Leading);
        assert_eq!(Direction::BottomPush.edge(), Edge::Trailing);
    }

    #[test]
    fn edge_grow_only_touches_its_side() {
        let base = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Edge::Leading.grow(base, 80.0), Insets::new(1.0, 82.0, 3.0, 4.0));
        assert_eq!(Edge::Trailing.grow(base, 80.0), Insets::new(1.0, 2.0, 3.0, 84.0));
    }
}
