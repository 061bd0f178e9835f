// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure transition logic from scroll telemetry to [`RefreshState`].

use crate::{Direction, RefreshState, ScrollTelemetry};

/// Distance the content has been dragged past the monitored edge.
///
/// For [`Direction::TopPull`] this is `-offset`. For [`Direction::BottomPush`]
/// it is how far the viewport's trailing edge sits past the end of the
/// content, `offset + viewport_extent - content_extent`, measured only while
/// the content is scrolled forward (`offset > 0`). A push-up control never
/// reacts to a pull-down at the top, even when the content is shorter than
/// the viewport.
///
/// The result may be negative; callers clamp it.
#[must_use]
pub fn edge_distance(direction: Direction, telemetry: &ScrollTelemetry) -> f64 {
    match direction {
        Direction::TopPull => -telemetry.offset,
        Direction::BottomPush => {
            if telemetry.offset > 0.0 {
                telemetry.offset + telemetry.viewport_extent - telemetry.content_extent
            } else {
                0.0
            }
        }
    }
}

/// Computes the state that follows `current` after observing `telemetry`.
///
/// The rules are identical for both directions; only [`edge_distance`] differs:
///
/// - At rest (distance `0`), an armed control falls back to
///   [`Pulling`](RefreshState::Pulling).
/// - Past `activation_height`, a released pointer starts a refresh and a
///   dragging pointer arms the control.
/// - Between the two, an armed control falls back to
///   [`Pulling`](RefreshState::Pulling).
///
/// [`Refreshing`](RefreshState::Refreshing) is sticky: no telemetry leaves it.
/// [`Finish`](RefreshState::Finish) is terminal and is returned unchanged too.
#[must_use]
pub fn next_state(
    current: RefreshState,
    telemetry: &ScrollTelemetry,
    direction: Direction,
    activation_height: f64,
) -> RefreshState {
    if current.ignores_telemetry() {
        return current;
    }
    let distance = edge_distance(direction, telemetry).max(0.0);
    if distance > activation_height {
        if telemetry.dragging {
            RefreshState::Triggered
        } else {
            RefreshState::Refreshing
        }
    } else if current == RefreshState::Triggered {
        // Covers both the snap back to rest and dragging back under the threshold.
        RefreshState::Pulling
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f64 = 80.0;

    fn top(offset: f64, dragging: bool) -> ScrollTelemetry {
        ScrollTelemetry {
            offset,
            viewport_extent: 400.0,
            content_extent: 1000.0,
            dragging,
            ..ScrollTelemetry::default()
        }
    }

    fn run(direction: Direction, samples: &[ScrollTelemetry]) -> RefreshState {
        samples.iter().fold(RefreshState::Pulling, |state, t| {
            next_state(state, t, direction, HEIGHT)
        })
    }

    #[test]
    fn resting_while_dragging_stays_pulling() {
        let state = next_state(RefreshState::Pulling, &top(0.0, true), Direction::TopPull, HEIGHT);
        assert_eq!(state, RefreshState::Pulling);
    }

    #[test]
    fn dragging_past_threshold_arms() {
        let t = top(-(HEIGHT + 1.0), true);
        let state = next_state(RefreshState::Pulling, &t, Direction::TopPull, HEIGHT);
        assert_eq!(state, RefreshState::Triggered);
    }

    #[test]
    fn releasing_past_threshold_refreshes() {
        let t = top(-(HEIGHT + 1.0), false);
        let state = next_state(RefreshState::Pulling, &t, Direction::TopPull, HEIGHT);
        assert_eq!(state, RefreshState::Refreshing);
        let state = next_state(RefreshState::Triggered, &t, Direction::TopPull, HEIGHT);
        assert_eq!(state, RefreshState::Refreshing);
    }

    #[test]
    fn exactly_at_threshold_does_not_arm() {
        let state = run(Direction::TopPull, &[top(-HEIGHT, true), top(-HEIGHT, false)]);
        assert_eq!(state, RefreshState::Pulling);
    }

    #[test]
    fn dragging_back_under_threshold_disarms() {
        let state = run(Direction::TopPull, &[top(-100.0, true), top(-40.0, true)]);
        assert_eq!(state, RefreshState::Pulling);
    }

    #[test]
    fn returning_to_rest_disarms() {
        let state = run(Direction::TopPull, &[top(-100.0, true), top(0.0, true)]);
        assert_eq!(state, RefreshState::Pulling);
    }

    #[test]
    fn bounded_pulls_never_refresh() {
        let mut state = RefreshState::Pulling;
        for step in 0..=160 {
            let offset = -f64::from(step % 81);
            let t = top(offset, step % 3 == 0);
            state = next_state(state, &t, Direction::TopPull, HEIGHT);
            assert!(
                matches!(state, RefreshState::Pulling | RefreshState::Triggered),
                "bounded pull reached {state:?}"
            );
        }
    }

    #[test]
    fn refreshing_is_sticky() {
        for t in [top(0.0, true), top(-200.0, true), top(-200.0, false), top(300.0, false)] {
            let state = next_state(RefreshState::Refreshing, &t, Direction::TopPull, HEIGHT);
            assert_eq!(state, RefreshState::Refreshing);
        }
    }

    #[test]
    fn stop_can_be_pulled_into_a_new_refresh() {
        let stop =
            |t: ScrollTelemetry| next_state(RefreshState::Stop, &t, Direction::TopPull, HEIGHT);
        assert_eq!(stop(top(-81.0, false)), RefreshState::Refreshing);
        assert_eq!(stop(top(-81.0, true)), RefreshState::Triggered);
        // Under the threshold and at rest the restore keeps running.
        assert_eq!(stop(top(-40.0, true)), RefreshState::Stop);
        assert_eq!(stop(top(0.0, false)), RefreshState::Stop);
    }

    #[test]
    fn finish_ignores_telemetry() {
        for t in [top(-200.0, false), top(-200.0, true), top(0.0, false)] {
            assert_eq!(
                next_state(RefreshState::Finish, &t, Direction::TopPull, HEIGHT),
                RefreshState::Finish
            );
        }
    }

    #[test]
    fn bottom_push_mirrors_top_pull() {
        // Content 1000, viewport 400: the trailing edge is reached at offset 600.
        let push = |offset: f64, dragging: bool| top(offset, dragging);
        assert_eq!(edge_distance(Direction::BottomPush, &push(600.0, true)), 0.0);
        assert_eq!(edge_distance(Direction::BottomPush, &push(681.0, true)), 81.0);

        let state = run(Direction::BottomPush, &[push(681.0, true)]);
        assert_eq!(state, RefreshState::Triggered);
        let state = run(Direction::BottomPush, &[push(681.0, true), push(650.0, true)]);
        assert_eq!(state, RefreshState::Pulling);
        let state = run(Direction::BottomPush, &[push(681.0, true), push(681.0, false)]);
        assert_eq!(state, RefreshState::Refreshing);
    }

    #[test]
    fn each_direction_ignores_the_other_edge() {
        assert_eq!(run(Direction::TopPull, &[top(800.0, false)]), RefreshState::Pulling);
        assert_eq!(run(Direction::BottomPush, &[top(-200.0, false)]), RefreshState::Pulling);
    }

    #[test]
    fn short_content_at_rest_does_not_push() {
        // Content shorter than the viewport leaves a gap at rest; that is not a push.
        let t = ScrollTelemetry {
            offset: 0.0,
            viewport_extent: 400.0,
            content_extent: 100.0,
            dragging: false,
            ..ScrollTelemetry::default()
        };
        assert_eq!(
            next_state(RefreshState::Pulling, &t, Direction::BottomPush, HEIGHT),
            RefreshState::Pulling
        );
    }
}
