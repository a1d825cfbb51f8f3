//! SeriesLook: style hints for drawing a series.
//!
//! Colour follows the value index within a line, dash pattern follows the source's
//! style slot, so the same column of two peripherals shares a colour but not a dash.

use eframe::egui;
use egui_plot::LineStyle;

/// Dash patterns handed out to sources in round-robin order.
pub const DASH_PATTERNS: [LineStyle; 4] = [
    LineStyle::Solid,
    LineStyle::Dashed { length: 10.0 },
    LineStyle::Dotted { spacing: 4.0 },
    LineStyle::Dashed { length: 4.0 },
];

/// The visual presentation of a series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesLook {
    pub color: egui::Color32,
    pub style: LineStyle,
    pub width: f32,
}

impl Default for SeriesLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            style: LineStyle::Solid,
            width: 2.0,
        }
    }
}

impl SeriesLook {
    /// Look for value `index` of a source that was given style `slot`.
    pub fn new(index: usize, slot: usize, width: f32) -> Self {
        Self {
            color: Self::alloc_color(index),
            style: Self::dash_for_slot(slot),
            width,
        }
    }

    /// Allocate a distinct color for the given series index.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(140, 86, 75),
            egui::Color32::from_rgb(227, 119, 194),
            egui::Color32::from_rgb(127, 127, 127),
            egui::Color32::from_rgb(188, 189, 34),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }

    pub fn dash_for_slot(slot: usize) -> LineStyle {
        DASH_PATTERNS[slot % DASH_PATTERNS.len()]
    }
}
