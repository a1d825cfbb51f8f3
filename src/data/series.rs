//! SeriesStore: per-source, per-index append-only numeric series.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::SourceId;

/// Lookup key of a series: the source it came from and its value index within a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub source: SourceId,
    pub index: usize,
}

impl SeriesKey {
    pub fn new(source: impl Into<SourceId>, index: usize) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

/// One point of a series: seconds since session start and the parsed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl Sample {
    pub fn as_point(&self) -> [f64; 2] {
        [self.timestamp, self.value]
    }
}

/// A named, time-ordered sequence of samples.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub visible: bool,
    samples: Vec<Sample>,
}

impl Series {
    fn new(name: String) -> Self {
        Self {
            name,
            visible: true,
            samples: Vec::new(),
        }
    }

    /// Append a sample, holding the timestamp at the previous one if it would go backwards
    /// or is not finite.
    fn push(&mut self, timestamp: f64, value: f64) {
        let timestamp = match self.samples.last() {
            Some(last) if !timestamp.is_finite() || timestamp < last.timestamp => last.timestamp,
            None if !timestamp.is_finite() => 0.0,
            _ => timestamp,
        };
        self.samples.push(Sample { timestamp, value });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples with `lower <= timestamp <= upper`.
    pub fn samples_in(&self, lower: f64, upper: f64) -> &[Sample] {
        let start = self.samples.partition_point(|s| s.timestamp < lower);
        let end = self.samples.partition_point(|s| s.timestamp <= upper);
        &self.samples[start..end.max(start)]
    }
}

/// Default display name of the series at `index`.
pub fn default_series_name(index: usize) -> String {
    format!("Stream {}", index + 1)
}

#[derive(Debug, Default)]
struct SourceSeries {
    series: BTreeMap<usize, Series>,
    labels: Vec<String>,
}

/// Result of [`SeriesStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The sample went into an existing series.
    Existing,
    /// A new series was created for the sample.
    Created,
}

/// Owner of all series and samples of a plotting session.
#[derive(Debug, Default)]
pub struct SeriesStore {
    sources: HashMap<SourceId, SourceSeries>,
    order: Vec<SeriesKey>,
    last_touched: Option<SeriesKey>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample to the series at (`source`, `index`), creating it on first use.
    ///
    /// A new series takes its name from the latest label set of its source, or the
    /// default name when no label covers its index.
    pub fn append(&mut self, source: &SourceId, index: usize, value: f64, timestamp: f64) -> Appended {
        let SourceSeries { series, labels } = self.sources.entry(source.clone()).or_default();
        let mut outcome = Appended::Existing;
        let target = series.entry(index).or_insert_with(|| {
            outcome = Appended::Created;
            let name = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| default_series_name(index));
            Series::new(name)
        });
        target.push(timestamp, value);

        let key = SeriesKey::new(source.clone(), index);
        if outcome == Appended::Created {
            debug!(source = %source, index, name = %target.name, "series created");
            self.order.push(key.clone());
        }
        self.last_touched = Some(key);
        outcome
    }

    /// Record `names` as the label set of `source` and rename the series it covers.
    ///
    /// Returns the keys whose name actually changed. Series beyond the end of `names`
    /// keep their current name.
    pub fn apply_labels(&mut self, source: &SourceId, names: Vec<String>) -> Vec<SeriesKey> {
        let entry = self.sources.entry(source.clone()).or_default();
        let mut renamed = Vec::new();
        for (index, name) in names.iter().enumerate() {
            if let Some(series) = entry.series.get_mut(&index) {
                if &series.name != name {
                    series.name = name.clone();
                    renamed.push(SeriesKey::new(source.clone(), index));
                }
            }
        }
        debug!(source = %source, labels = names.len(), renamed = renamed.len(), "labels applied");
        entry.labels = names;
        renamed
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&Series> {
        self.sources.get(&key.source)?.series.get(&key.index)
    }

    /// Latest label set declared by `source`.
    pub fn labels(&self, source: &SourceId) -> &[String] {
        self.sources
            .get(source)
            .map(|e| e.labels.as_slice())
            .unwrap_or_default()
    }

    /// Series of one source ordered by index.
    pub fn series_of<'a>(&'a self, source: &SourceId) -> impl Iterator<Item = (usize, &'a Series)> + 'a {
        self.sources
            .get(source)
            .into_iter()
            .flat_map(|e| e.series.iter().map(|(i, s)| (*i, s)))
    }

    /// All series in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &Series)> + '_ {
        self.order.iter().filter_map(|key| self.get(key).map(|s| (key, s)))
    }

    /// Show or hide a series. Returns `false` if it does not exist.
    pub fn set_visible(&mut self, key: &SeriesKey, visible: bool) -> bool {
        match self
            .sources
            .get_mut(&key.source)
            .and_then(|e| e.series.get_mut(&key.index))
        {
            Some(series) => {
                series.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Value range of visible samples with timestamps in `[lower, upper]`.
    pub fn value_bounds(&self, lower: f64, upper: f64) -> Option<(f64, f64)> {
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for (_key, series) in self.iter().filter(|(_, s)| s.visible) {
            for s in series.samples_in(lower, upper) {
                min_y = min_y.min(s.value);
                max_y = max_y.max(s.value);
            }
        }
        (min_y <= max_y).then_some((min_y, max_y))
    }

    /// The series that received the most recent sample.
    pub fn last_touched(&self) -> Option<&SeriesKey> {
        self.last_touched.as_ref()
    }

    /// Timestamp of the newest sample of the last touched series.
    pub fn last_touched_timestamp(&self) -> Option<f64> {
        let key = self.last_touched.as_ref()?;
        self.get(key)?.last().map(|s| s.timestamp)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.order.clear();
        self.last_touched = None;
    }
}
