//! Standalone plotter window.
//!
//! [`PlotterApp`] owns a [`PlotSession`], drains transport commands into it every frame
//! and draws the series with egui_plot. It is the only place that knows about the
//! UI thread: the session just calls [`RepaintListener::on_data_changed`], which asks
//! egui to schedule a redraw.

use std::sync::mpsc::Receiver;

use eframe::egui;
use egui_phosphor::regular::{BROOM, PAUSE, PLAY};
use egui_plot::{Legend, Line, Plot};
use tracing::warn;

use crate::config::XAxisFormat;
use crate::data::look::SeriesLook;
use crate::data::series::{Sample, SeriesKey};
use crate::data::x_formatter::format_x;
use crate::session::{PlotSession, SessionListener};
use crate::sink::RxCommand;
use crate::transport::CancelToken;

/// Forwards session change notifications to egui's repaint scheduler.
pub struct RepaintListener {
    ctx: egui::Context,
}

impl RepaintListener {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl SessionListener for RepaintListener {
    fn on_data_changed(&mut self) {
        self.ctx.request_repaint();
    }
}

pub struct PlotterApp {
    session: PlotSession,
    rx: Receiver<RxCommand>,
    cancel: CancelToken,
    x_axis: XAxisFormat,
}

impl PlotterApp {
    pub fn new(
        ctx: &egui::Context,
        mut session: PlotSession,
        rx: Receiver<RxCommand>,
        cancel: CancelToken,
        x_axis: XAxisFormat,
    ) -> Self {
        session.set_listener(RepaintListener::new(ctx.clone()));
        Self {
            session,
            rx,
            cancel,
            x_axis,
        }
    }

    pub fn session(&self) -> &PlotSession {
        &self.session
    }

    fn drain_rx(&mut self) {
        while let Ok(cmd) = self.rx.try_recv() {
            let source = cmd.source().clone();
            if let Err(e) = self.session.apply(cmd) {
                warn!(source = %source, error = %e, "dropping transport command");
            }
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let following = self.session.window().is_following();
            let label = if following {
                format!("{PAUSE} Auto-scroll")
            } else {
                format!("{PLAY} Auto-scroll")
            };
            if ui
                .selectable_label(following, label)
                .on_hover_text("Keep the newest samples in view")
                .clicked()
            {
                self.session.set_auto_follow(!following);
            }

            ui.separator();

            ui.label("Width:");
            let (min_width, max_width) = self.session.window().width_limits();
            let mut width = self.session.window().width();
            let resp = ui.add(
                egui::Slider::new(&mut width, min_width..=max_width)
                    .step_by(1.0)
                    .suffix(" s"),
            );
            if resp.changed() {
                self.session.window_mut().set_width(width);
            }

            ui.separator();

            self.render_streams_menu(ui);

            ui.separator();

            if ui.button(format!("{BROOM} Clear")).clicked() {
                self.session.restart();
            }

            ui.separator();
            ui.label(format!(
                "{} series, {} sources",
                self.session.store().len(),
                self.session.registry().active().count()
            ));
        });
    }

    /// Per-series visibility toggles.
    fn render_streams_menu(&mut self, ui: &mut egui::Ui) {
        let multi = self.session.registry().is_multi();
        let entries: Vec<(SeriesKey, String, bool)> = self
            .session
            .store()
            .iter()
            .map(|(key, series)| {
                let name = if multi {
                    format!("{}: {}", self.session.registry().display_name(&key.source), series.name)
                } else {
                    series.name.clone()
                };
                (key.clone(), name, series.visible)
            })
            .collect();

        let mut toggled: Vec<(SeriesKey, bool)> = Vec::new();
        ui.menu_button("Streams", |ui| {
            if entries.is_empty() {
                ui.label("No data yet");
            }
            for (key, name, visible) in &entries {
                let mut v = *visible;
                if ui.checkbox(&mut v, name.as_str()).changed() {
                    toggled.push((key.clone(), v));
                }
            }
        });
        for (key, visible) in toggled {
            self.session.set_series_visible(&key, visible);
        }
    }

    fn render_plot(&mut self, ui: &mut egui::Ui) {
        let range = self.session.window().visible_range();
        let following = self.session.window().is_following();
        let (lower, upper) = (range.lower, range.upper());
        let x_axis = self.x_axis;
        let origin = self.session.origin_wall();

        let plot = Plot::new("uartplot_plot")
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_drag(!following)
            .legend(Legend::default())
            .x_axis_formatter(move |x, _range| format_x(x.value, x_axis, origin));

        let store = self.session.store();
        let registry = self.session.registry();
        let multi = registry.is_multi();
        let line_width = self.session.line_width();
        let y_bounds = store.value_bounds(lower, upper);

        let plot_resp = plot.show(ui, |plot_ui| {
            let panning = plot_ui.response().dragged_by(egui::PointerButton::Primary);

            if !panning {
                plot_ui.set_plot_bounds_x(lower..=upper);
                if let Some((y_min, y_max)) = y_bounds {
                    let y_space = ((y_max - y_min) * 0.05).max(0.5);
                    plot_ui.set_plot_bounds_y(y_min - y_space..=y_max + y_space);
                }
            }

            for (key, series) in store.iter() {
                if !series.visible || series.is_empty() {
                    continue;
                }
                let slot = registry.slot_of(&key.source).unwrap_or(0);
                let look = SeriesLook::new(key.index, slot, line_width);
                let name = if multi {
                    format!("{}: {}", registry.display_name(&key.source), series.name)
                } else {
                    series.name.clone()
                };
                // One window of margin on each side keeps panning smooth.
                let pts: Vec<[f64; 2]> = series
                    .samples_in(lower - range.width, upper + range.width)
                    .iter()
                    .map(Sample::as_point)
                    .collect();
                plot_ui.line(
                    Line::new(name, pts)
                        .color(look.color)
                        .width(look.width)
                        .style(look.style),
                );
            }

            panning
        });

        if plot_resp.inner {
            let xr = plot_resp.transform.bounds().range_x();
            self.session.window_mut().pan_to(*xr.start());
        }
    }
}

impl eframe::App for PlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_rx();

        egui::TopBottomPanel::top("uartplot_controls").show(ctx, |ui| {
            self.render_controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.store().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("No data received yet");
                });
            } else {
                self.render_plot(ui);
            }
        });

        // Keep polling the channel even when no listener notification arrives.
        ctx.request_repaint_after(std::time::Duration::from_millis(50));
    }
}

impl Drop for PlotterApp {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.session.teardown();
    }
}
