// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host observation: subscribing, filtering notifications, and sampling telemetry.

use smallvec::SmallVec;

use crate::{Direction, ObservationId, ObservedKey, ScrollHost, ScrollTelemetry};

/// The keys a control of the given direction observes.
///
/// Every control watches the offset. A push-up control also follows content
/// size so it can stay pinned to the (possibly growing) bottom edge.
#[must_use]
pub fn observed_keys(direction: Direction) -> &'static [ObservedKey] {
    match direction {
        Direction::TopPull => &[ObservedKey::Offset],
        Direction::BottomPush => &[ObservedKey::Offset, ObservedKey::ContentSize],
    }
}

/// Samples `host` into a [`ScrollTelemetry`] along the vertical axis.
#[must_use]
pub fn snapshot<H: ScrollHost + ?Sized>(host: &H) -> ScrollTelemetry {
    ScrollTelemetry {
        offset: host.content_offset().y,
        viewport_extent: host.viewport_size().height,
        content_extent: host.content_size().height,
        dragging: host.is_dragging(),
        content_inset: host.content_inset(),
    }
}

/// The set of live host observations held by one attached control.
///
/// Only notifications carrying one of these handles are accepted; anything
/// else is foreign or left over from an earlier attachment.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScrollObserver {
    subscriptions: SmallVec<[(ObservationId, ObservedKey); 2]>,
}

impl ScrollObserver {
    /// Registers the observations `direction` needs.
    ///
    /// Returns the observer together with the keys to seed synchronously, one
    /// per observation, so the state machine starts from the current geometry
    /// even if the surface never scrolls.
    pub(crate) fn subscribe<H: ScrollHost + ?Sized>(
        host: &mut H,
        direction: Direction,
    ) -> (Self, SmallVec<[ObservedKey; 2]>) {
        let mut subscriptions = SmallVec::new();
        let mut initial = SmallVec::new();
        for &key in observed_keys(direction) {
            subscriptions.push((host.observe(key), key));
            initial.push(key);
        }
        (Self { subscriptions }, initial)
    }

    /// Maps a host notification to the key it reports, if it is ours.
    pub(crate) fn accept(&self, id: ObservationId) -> Option<ObservedKey> {
        self.subscriptions
            .iter()
            .find(|(live, _)| *live == id)
            .map(|&(_, key)| key)
    }

    /// Releases every observation. Calling it again is harmless.
    pub(crate) fn unsubscribe<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        for (id, _) in self.subscriptions.drain(..) {
            host.unobserve(id);
        }
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    #[test]
    fn top_pull_observes_offset_only() {
        let mut host = TestHost::new();
        let (observer, initial) = ScrollObserver::subscribe(&mut host, Direction::TopPull);
        assert_eq!(initial.as_slice(), &[ObservedKey::Offset]);
        assert_eq!(host.live_observations(), 1);
        assert!(observer.is_subscribed());
    }

    #[test]
    fn bottom_push_also_observes_content_size() {
        let mut host = TestHost::new();
        let (observer, initial) = ScrollObserver::subscribe(&mut host, Direction::BottomPush);
        assert_eq!(
            initial.as_slice(),
            &[ObservedKey::Offset, ObservedKey::ContentSize]
        );
        let size_id = host.observation_for(ObservedKey::ContentSize).unwrap();
        assert_eq!(observer.accept(size_id), Some(ObservedKey::ContentSize));
    }

    #[test]
    fn unsubscribe_rejects_old_handles() {
        let mut host = TestHost::new();
        let (mut observer, _) = ScrollObserver::subscribe(&mut host, Direction::TopPull);
        let id = host.observation_for(ObservedKey::Offset).unwrap();

        observer.unsubscribe(&mut host);
        observer.unsubscribe(&mut host);

        assert_eq!(observer.accept(id), None);
        assert_eq!(host.live_observations(), 0);
        assert!(!observer.is_subscribed());
    }

    #[test]
    fn snapshot_reads_vertical_axis() {
        let mut host = TestHost::new();
        host.scroll_to(-42.0, true);
        let t = snapshot(&host);
        assert_eq!(t.offset, -42.0);
        assert!(t.dragging);
        assert_eq!(t.viewport_extent, host.viewport.height);
        assert_eq!(t.content_extent, host.content.height);
    }
}
