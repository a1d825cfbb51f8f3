//! Configuration types for the plotter.

use serde::{Deserialize, Serialize};

use crate::data::sources::DEFAULT_STYLE_SLOTS;
use crate::data::window::{DEFAULT_WIDTH_SECONDS, MAX_WIDTH_SECONDS, MIN_WIDTH_SECONDS};

/// How X-axis tick labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisFormat {
    /// Seconds since the session started.
    #[default]
    Seconds,
    /// Local wall-clock time (`%H:%M:%S`).
    WallClock,
}

/// Visible window defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width_seconds: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub auto_follow: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width_seconds: DEFAULT_WIDTH_SECONDS,
            min_width: MIN_WIDTH_SECONDS,
            max_width: MAX_WIDTH_SECONDS,
            auto_follow: true,
        }
    }
}

/// Top-level plotter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Window title.
    pub title: String,
    pub window: WindowConfig,
    /// Number of dash patterns cycled through in multi-source mode, at most 4.
    pub style_slots: usize,
    pub line_width: f32,
    pub x_axis: XAxisFormat,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            title: "UART Plotter".to_string(),
            window: WindowConfig::default(),
            style_slots: DEFAULT_STYLE_SLOTS,
            line_width: 2.0,
            x_axis: XAxisFormat::default(),
        }
    }
}
