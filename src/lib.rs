//! uartplot crate root: re-exports and module wiring.
//!
//! Turns raw byte streams from serial-like peripherals into live numeric series:
//! - `data`: line reassembly, line grammar, series store, visible window, source registry
//! - `session`: the ingestion pipeline and its change notifications
//! - `sink` / `transport`: channel and reader threads delivering bytes to a session
//! - `config` / `persistence`: configuration and config files
//! - `app`: eframe/egui window drawing a session

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod persistence;
pub mod session;
pub mod sink;
pub mod transport;

// Public re-exports for a compact external API
pub use app::{run_plotter, PlotterApp};
pub use config::{PlotterConfig, WindowConfig, XAxisFormat};
pub use data::line::{classify, ParsedLine};
pub use data::reassembly::LineReassembler;
pub use data::series::{Sample, Series, SeriesKey, SeriesStore};
pub use data::sources::{SourceMode, SourceRegistry};
pub use data::window::{FollowState, VisibleRange, WindowController};
pub use data::SourceId;
pub use error::{Error, Result};
pub use session::{FeedReport, NullListener, PlotSession, SessionListener};
pub use sink::{channel_rx, RxCommand, RxSink};
pub use transport::{spawn_reader, CancelToken, SourceSpec};
