// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual and behavioral options for a refresh control.

use core::time::Duration;

use kurbo::Size;

use crate::ConfigError;

/// Distance past the rest position that arms a refresh, in logical pixels.
pub const DEFAULT_ACTIVATION_HEIGHT: f64 = 80.0;

/// Duration of the inset expand/restore animations.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Duration of the glyph's armed/rest rotation.
pub const DEFAULT_ROTATION_DURATION: Duration = Duration::from_millis(200);

/// Straight RGBA color with components in `0.0..=1.0`.
///
/// The control never paints; colors are carried through for the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Mid gray, the default spinner color.
    pub const GRAY: Self = Self::rgba(0.5, 0.5, 0.5, 1.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

/// Options supplied when constructing a [`PullRefresh`](crate::PullRefresh).
///
/// Fields are public; the `with_*` helpers are there for chaining from
/// [`RefreshConfig::default`]:
///
/// ```rust
/// use core::time::Duration;
/// use understory_refresh::{Color, RefreshConfig};
///
/// let config = RefreshConfig::default()
///     .with_indicator_color(Color::rgb(0.2, 0.4, 1.0))
///     .with_auto_stop_delay(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshConfig {
    /// Background behind the glyph.
    pub background_color: Color,
    /// Spinner color.
    pub indicator_color: Color,
    /// Pull distance that must be exceeded to arm a refresh. Also the amount
    /// the content inset grows by while refreshing.
    pub activation_height: f64,
    /// Time after the refresh starts at which the control stops on its own.
    /// [`Duration::ZERO`] means never.
    pub auto_stop_delay: Duration,
    /// Duration of inset animations, and the step of the finish/removal delays.
    pub animation_duration: Duration,
    /// Duration of the glyph rotation between rest and armed.
    pub rotation_duration: Duration,
    /// Size of the arrow glyph and spinner.
    pub glyph_size: Size,
    /// Fade the glyph in as the pull distance grows.
    pub fade_glyph: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            indicator_color: Color::GRAY,
            activation_height: DEFAULT_ACTIVATION_HEIGHT,
            auto_stop_delay: Duration::ZERO,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            rotation_duration: DEFAULT_ROTATION_DURATION,
            glyph_size: Size::new(30.0, 30.0),
            fade_glyph: true,
        }
    }
}

impl RefreshConfig {
    /// Sets [`background_color`](Self::background_color).
    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Sets [`indicator_color`](Self::indicator_color).
    #[must_use]
    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.indicator_color = color;
        self
    }

    /// Sets [`activation_height`](Self::activation_height).
    #[must_use]
    pub fn with_activation_height(mut self, height: f64) -> Self {
        self.activation_height = height;
        self
    }

    /// Sets [`auto_stop_delay`](Self::auto_stop_delay).
    #[must_use]
    pub fn with_auto_stop_delay(mut self, delay: Duration) -> Self {
        self.auto_stop_delay = delay;
        self
    }

    /// Sets [`animation_duration`](Self::animation_duration).
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets [`fade_glyph`](Self::fade_glyph).
    #[must_use]
    pub fn with_fade_glyph(mut self, fade: bool) -> Self {
        self.fade_glyph = fade;
        self
    }

    /// Returns `true` if the control stops refreshing on its own.
    #[must_use]
    pub fn auto_stops(&self) -> bool {
        !self.auto_stop_delay.is_zero()
    }

    /// Glyph opacity for a given pull distance.
    ///
    /// Ramps linearly over `activation_height + 40` and caps at `0.8`. Always
    /// `1.0` when fading is off.
    #[must_use]
    pub fn glyph_alpha(&self, distance: f64) -> f64 {
        if !self.fade_glyph {
            return 1.0;
        }
        (distance.max(0.0) / (self.activation_height + 40.0)).min(0.8)
    }

    /// Checks the geometric options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let height = self.activation_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(ConfigError::ActivationHeight(height));
        }
        let Size { width, height } = self.glyph_size;
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ConfigError::GlyphSize { width, height });
        }
        Ok(())
    }
}
