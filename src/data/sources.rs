//! SourceRegistry: which peripherals are feeding the plot and how each is told apart.

use std::collections::HashMap;

use tracing::info;

use super::look::DASH_PATTERNS;
use super::SourceId;

/// Number of style slots handed out in multi-source mode by default.
pub const DEFAULT_STYLE_SLOTS: usize = DASH_PATTERNS.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// One peripheral; its identity is fixed to the first style slot.
    Single(SourceId),
    /// Any number of peripherals, styled round-robin in order of appearance.
    Multi,
}

#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub id: SourceId,
    /// Human readable name reported by the transport, if any.
    pub name: Option<String>,
    pub slot: usize,
    pub active: bool,
}

impl SourceEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    mode: SourceMode,
    slots: usize,
    entries: Vec<SourceEntry>,
    by_id: HashMap<SourceId, usize>,
}

impl SourceRegistry {
    /// `slots` is limited to the number of distinct dash patterns.
    pub fn new(mode: SourceMode, slots: usize) -> Self {
        let mut registry = Self {
            mode,
            slots: slots.clamp(1, DASH_PATTERNS.len()),
            entries: Vec::new(),
            by_id: HashMap::new(),
        };
        if let SourceMode::Single(id) = registry.mode.clone() {
            registry.register(&id);
        }
        registry
    }

    pub fn single(id: impl Into<SourceId>) -> Self {
        Self::new(SourceMode::Single(id.into()), DEFAULT_STYLE_SLOTS)
    }

    pub fn multi(slots: usize) -> Self {
        Self::new(SourceMode::Multi, slots)
    }

    /// Number of distinct style slots handed out round-robin.
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn mode(&self) -> &SourceMode {
        &self.mode
    }

    pub fn is_multi(&self) -> bool {
        self.mode == SourceMode::Multi
    }

    /// Register `id` on first use and return its style slot. Idempotent.
    ///
    /// A known source that was marked inactive becomes active again.
    pub fn register(&mut self, id: &SourceId) -> usize {
        if let Some(&pos) = self.by_id.get(id) {
            let entry = &mut self.entries[pos];
            entry.active = true;
            return entry.slot;
        }
        let slot = match self.mode {
            SourceMode::Single(_) => 0,
            SourceMode::Multi => self.entries.len() % self.slots,
        };
        info!(source = %id, slot, "source registered");
        self.by_id.insert(id.clone(), self.entries.len());
        self.entries.push(SourceEntry {
            id: id.clone(),
            name: None,
            slot,
            active: true,
        });
        slot
    }

    pub fn set_display_name(&mut self, id: &SourceId, name: impl Into<String>) {
        self.register(id);
        if let Some(entry) = self.entry_mut(id) {
            entry.name = Some(name.into());
        }
    }

    pub fn set_active(&mut self, id: &SourceId, active: bool) {
        self.register(id);
        if let Some(entry) = self.entry_mut(id) {
            entry.active = active;
        }
    }

    pub fn entry(&self, id: &SourceId) -> Option<&SourceEntry> {
        self.by_id.get(id).map(|&pos| &self.entries[pos])
    }

    fn entry_mut(&mut self, id: &SourceId) -> Option<&mut SourceEntry> {
        let pos = *self.by_id.get(id)?;
        self.entries.get_mut(pos)
    }

    pub fn slot_of(&self, id: &SourceId) -> Option<usize> {
        self.entry(id).map(|e| e.slot)
    }

    pub fn display_name<'a>(&'a self, id: &'a SourceId) -> &'a str {
        self.entry(id).map_or(id.as_str(), SourceEntry::display_name)
    }

    /// Sources in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter().filter(|e| e.active)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all sources. In single-source mode the fixed source is registered again.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_id.clear();
        if let SourceMode::Single(id) = self.mode.clone() {
            self.register(&id);
        }
    }
}
