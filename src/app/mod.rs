//! eframe front end: the renderer that presents a [`PlotSession`](crate::session::PlotSession).
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`plotter_app`]   | [`PlotterApp`] (eframe) and the repaint listener |
//! | [`run`]           | Top-level [`run_plotter()`] entry point |

mod plotter_app;
mod run;

pub use plotter_app::{PlotterApp, RepaintListener};
pub use run::run_plotter;
