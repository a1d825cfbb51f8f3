//! PlotSession: the ingestion pipeline from raw bytes to series.
//!
//! ```text
//! bytes ─▶ LineReassembler ─▶ classify ─┬─▶ Labels ─▶ SeriesStore::apply_labels
//!                                       └─▶ Data   ─▶ SeriesStore::append
//!                                                     └─▶ WindowController::on_data_appended
//! ```
//!
//! All mutation for one delivery event happens synchronously inside [`PlotSession::feed`],
//! after which the listener is told once that data changed. The session has no UI-thread
//! affinity; a renderer listening for changes schedules its own redraw.

use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{info, trace, warn};

use crate::config::PlotterConfig;
use crate::data::line::{classify, ParsedLine};
use crate::data::look::SeriesLook;
use crate::data::reassembly::LineReassembler;
use crate::data::series::{Appended, SeriesKey, SeriesStore};
use crate::data::sources::{SourceMode, SourceRegistry};
use crate::data::window::WindowController;
use crate::data::SourceId;
use crate::error::{Error, Result};
use crate::sink::RxCommand;

/// Notifications from a session to whoever presents its data.
///
/// All methods default to doing nothing.
pub trait SessionListener {
    /// Called once per delivery event that changed series data or names.
    fn on_data_changed(&mut self) {}

    fn on_series_created(&mut self, _key: &SeriesKey, _display_name: &str, _look: &SeriesLook) {}

    fn on_series_renamed(&mut self, _key: &SeriesKey, _new_name: &str) {}

    /// Bytes of `source` up to the absolute stream offset `upto` have been retired.
    fn on_consumed(&mut self, _source: &SourceId, _upto: u64) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl SessionListener for NullListener {}

/// What one `feed` call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedReport {
    /// Complete lines extracted.
    pub lines: usize,
    /// Label declarations among them.
    pub label_lines: usize,
    pub samples: usize,
    pub series_created: usize,
    /// Absolute offset up to which the source's bytes are retired.
    pub consumed_upto: u64,
}

impl FeedReport {
    pub fn changed(&self) -> bool {
        self.samples > 0 || self.label_lines > 0
    }
}

pub struct PlotSession {
    reassembler: LineReassembler,
    store: SeriesStore,
    window: WindowController,
    registry: SourceRegistry,
    line_width: f32,
    origin: Instant,
    origin_wall: DateTime<Local>,
    closed: bool,
    listener: Box<dyn SessionListener>,
}

impl std::fmt::Debug for PlotSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotSession")
            .field("series", &self.store.len())
            .field("sources", &self.registry.len())
            .field("window", &self.window)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl PlotSession {
    pub fn new(cfg: &PlotterConfig, mode: SourceMode) -> Self {
        Self {
            reassembler: LineReassembler::new(),
            store: SeriesStore::new(),
            window: WindowController::from_config(&cfg.window),
            registry: SourceRegistry::new(mode, cfg.style_slots),
            line_width: cfg.line_width,
            origin: Instant::now(),
            origin_wall: Local::now(),
            closed: false,
            listener: Box::new(NullListener),
        }
    }

    pub fn with_listener<L: SessionListener + 'static>(mut self, listener: L) -> Self {
        self.listener = Box::new(listener);
        self
    }

    pub fn set_listener<L: SessionListener + 'static>(&mut self, listener: L) {
        self.listener = Box::new(listener);
    }

    /// Seconds elapsed since the session origin.
    pub fn elapsed(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Wall-clock time of the session origin.
    pub fn origin_wall(&self) -> DateTime<Local> {
        self.origin_wall
    }

    /// Ingest one received chunk, timestamped now.
    pub fn feed(&mut self, source: &SourceId, bytes: &[u8]) -> Result<FeedReport> {
        let timestamp = self.elapsed();
        self.feed_at(source, bytes, timestamp)
    }

    /// Ingest one received chunk with an explicit timestamp (seconds since origin).
    ///
    /// Every line completed by this chunk shares `timestamp`. A non-finite timestamp is
    /// replaced by the elapsed time.
    pub fn feed_at(&mut self, source: &SourceId, bytes: &[u8], timestamp: f64) -> Result<FeedReport> {
        if self.closed {
            warn!(source = %source, len = bytes.len(), "feed after teardown ignored");
            return Err(Error::SessionClosed);
        }
        let timestamp = if timestamp.is_finite() {
            timestamp
        } else {
            warn!(source = %source, timestamp, "non-finite timestamp replaced by elapsed time");
            self.elapsed()
        };
        let Self {
            reassembler,
            store,
            window,
            registry,
            line_width,
            listener,
            ..
        } = self;

        let slot = registry.register(source);
        let consumed_before = reassembler.consumed_offset(source);
        let mut report = FeedReport::default();

        for line in reassembler.feed(source, bytes) {
            trace!(source = %source, line = %line, "line");
            report.lines += 1;
            match classify(&line) {
                ParsedLine::Labels(names) => {
                    report.label_lines += 1;
                    for key in store.apply_labels(source, names) {
                        if let Some(series) = store.get(&key) {
                            listener.on_series_renamed(&key, &series.name);
                        }
                    }
                }
                ParsedLine::Data(values) => {
                    for (index, value) in values.into_iter().enumerate() {
                        report.samples += 1;
                        if store.append(source, index, value, timestamp) == Appended::Created {
                            report.series_created += 1;
                            let key = SeriesKey::new(source.clone(), index);
                            let look = SeriesLook::new(index, slot, *line_width);
                            if let Some(series) = store.get(&key) {
                                listener.on_series_created(&key, &series.name, &look);
                            }
                        }
                    }
                }
            }
        }

        report.consumed_upto = reassembler.consumed_offset(source);
        if report.consumed_upto > consumed_before {
            listener.on_consumed(source, report.consumed_upto);
        }
        if report.samples > 0 {
            if let Some(t) = store.last_touched_timestamp() {
                window.on_data_appended(t);
            }
        }
        if report.changed() {
            listener.on_data_changed();
        }
        Ok(report)
    }

    /// Apply one transport command. Returns the feed report for `Rx` commands.
    pub fn apply(&mut self, cmd: RxCommand) -> Result<Option<FeedReport>> {
        match cmd {
            RxCommand::Rx { source, bytes } => self.feed(&source, &bytes).map(Some),
            RxCommand::Connected { source, name } => {
                if self.closed {
                    return Err(Error::SessionClosed);
                }
                info!(source = %source, name = name.as_deref().unwrap_or(""), "source connected");
                self.registry.set_active(&source, true);
                if let Some(name) = name {
                    self.registry.set_display_name(&source, name);
                }
                Ok(None)
            }
            RxCommand::Closed { source } => {
                if self.closed {
                    return Err(Error::SessionClosed);
                }
                info!(source = %source, "source closed");
                self.registry.set_active(&source, false);
                // A pending partial line can never be completed now.
                self.reassembler.remove_source(&source);
                Ok(None)
            }
        }
    }

    /// Switch between following the newest data and manual positioning.
    pub fn set_auto_follow(&mut self, follow: bool) {
        self.window.set_auto_follow(follow);
        if follow {
            if let Some(t) = self.store.last_touched_timestamp() {
                self.window.on_data_appended(t);
            }
        }
        self.listener.on_data_changed();
    }

    pub fn set_series_visible(&mut self, key: &SeriesKey, visible: bool) -> bool {
        let found = self.store.set_visible(key, visible);
        if found {
            self.listener.on_data_changed();
        }
        found
    }

    /// Stop accepting data and release all buffers, series and source state.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        info!(series = self.store.len(), sources = self.registry.len(), "session teardown");
        self.closed = true;
        self.reassembler.clear();
        self.store.clear();
        self.registry.clear();
        self.window.reset();
    }

    /// Start over with empty state and a fresh origin. Window settings are kept.
    pub fn restart(&mut self) {
        self.teardown();
        self.closed = false;
        self.origin = Instant::now();
        self.origin_wall = Local::now();
        info!("session restarted");
        self.listener.on_data_changed();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn window(&self) -> &WindowController {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut WindowController {
        &mut self.window
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn reassembler(&self) -> &LineReassembler {
        &self.reassembler
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }
}
