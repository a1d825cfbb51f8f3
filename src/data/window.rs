//! WindowController: the visible time range over the series.
//!
//! In the `Following` state the lower bound trails the newest sample of the most
//! recently touched series; in `Manual` it only moves when the user pans.

use crate::config::WindowConfig;

pub const MIN_WIDTH_SECONDS: f64 = 6.0;
pub const MAX_WIDTH_SECONDS: f64 = 100.0;
pub const DEFAULT_WIDTH_SECONDS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    Following,
    Manual,
}

/// Visible X range in seconds since session start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub lower: f64,
    pub width: f64,
}

impl VisibleRange {
    pub fn upper(&self) -> f64 {
        self.lower + self.width
    }
}

#[derive(Debug, Clone)]
pub struct WindowController {
    width: f64,
    min_width: f64,
    max_width: f64,
    state: FollowState,
    anchor: Option<f64>,
    lower: f64,
}

impl Default for WindowController {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_SECONDS,
            min_width: MIN_WIDTH_SECONDS,
            max_width: MAX_WIDTH_SECONDS,
            state: FollowState::Following,
            anchor: None,
            lower: 0.0,
        }
    }
}

impl WindowController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &WindowConfig) -> Self {
        let min_width = cfg.min_width.max(0.0);
        let max_width = cfg.max_width.max(min_width);
        let mut ctrl = Self {
            min_width,
            max_width,
            ..Self::default()
        };
        ctrl.set_width(cfg.width_seconds);
        ctrl.set_auto_follow(cfg.auto_follow);
        ctrl
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn width_limits(&self) -> (f64, f64) {
        (self.min_width, self.max_width)
    }

    /// Set the visible width, clamped to the configured limits. Returns the applied width.
    pub fn set_width(&mut self, seconds: f64) -> f64 {
        self.width = if seconds.is_nan() {
            self.min_width
        } else {
            seconds.clamp(self.min_width, self.max_width)
        };
        self.width
    }

    /// Set the width from a slider position in `[0, 1]`, rounded to whole seconds.
    pub fn set_width_fraction(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let seconds = ((self.max_width - self.min_width) * fraction + self.min_width).round();
        self.set_width(seconds)
    }

    /// Slider position in `[0, 1]` for the current width.
    pub fn width_fraction(&self) -> f64 {
        let span = self.max_width - self.min_width;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.width - self.min_width).max(0.0) / span).min(1.0)
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_following(&self) -> bool {
        self.state == FollowState::Following
    }

    /// Switch between following the data and manual positioning.
    ///
    /// Leaving `Following` freezes the range where it currently is.
    pub fn set_auto_follow(&mut self, follow: bool) {
        if !follow && self.is_following() {
            self.lower = self.visible_range().lower;
        }
        self.state = if follow {
            FollowState::Following
        } else {
            FollowState::Manual
        };
    }

    /// Record the newest sample time of the last touched series.
    pub fn on_data_appended(&mut self, timestamp: f64) {
        if self.is_following() {
            self.anchor = Some(timestamp);
        }
    }

    /// Move the lower bound after a user pan. Ignored while following.
    pub fn pan_to(&mut self, lower: f64) {
        if !self.is_following() && lower.is_finite() {
            self.lower = lower;
        }
    }

    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }

    pub fn visible_range(&self) -> VisibleRange {
        let lower = match (self.state, self.anchor) {
            (FollowState::Following, Some(anchor)) => anchor - (self.width - 1.0),
            _ => self.lower,
        };
        VisibleRange {
            lower,
            width: self.width,
        }
    }

    /// Forget the anchor and return to the origin, keeping width and state.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.lower = 0.0;
    }
}
