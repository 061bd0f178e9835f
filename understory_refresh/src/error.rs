// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::Capabilities;

/// Reasons [`PullRefresh::attach`](crate::PullRefresh::attach) can refuse a host.
///
/// A refused attach leaves the control fully detached.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The host does not expose telemetry or mutations the control relies on.
    #[error("scroll host is missing required capabilities: {missing:?}")]
    MissingCapabilities {
        /// The required capabilities the host did not report.
        missing: Capabilities,
    },
}

/// Reasons a [`RefreshConfig`](crate::RefreshConfig) is rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The activation height must be finite and strictly positive.
    #[error("activation height must be finite and positive, got {0}")]
    ActivationHeight(f64),
    /// Glyph dimensions must be finite and non-negative.
    #[error("glyph size must be finite and non-negative, got {width}x{height}")]
    GlyphSize {
        /// Requested glyph width.
        width: f64,
        /// Requested glyph height.
        height: f64,
    },
}
