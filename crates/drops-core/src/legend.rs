// File: crates/drops-core/src/legend.rs
// Summary: Floating legend overlay: one row per category in reverse display order, each with a live value slot.
// Notes:
// - Value slots are an out-of-band write channel. The drawing routine (or a hover
//   tracker it hands out) writes per-bucket readouts straight into them on pointer
//   movement, bypassing the data model and the orchestrator's evaluate cycle.
//   Writes are single-threaded and last-writer-wins.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::error;

use crate::category::CategoryRegistry;
use crate::error::ConfigError;
use crate::model::CategoryId;

/// Shared, addressable placeholder for one category's live numeric value.
#[derive(Clone, Debug, Default)]
pub struct ValueSlot(Rc<Cell<Option<f64>>>);

impl ValueSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: f64) {
        self.0.set(Some(value));
    }

    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<f64> {
        self.0.get()
    }

    /// Readout text: empty when unset, whole numbers without decimals.
    pub fn text(&self) -> String {
        match self.get() {
            None => String::new(),
            Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
            Some(v) => format!("{v:.1}"),
        }
    }

    /// True when both handles point at the same slot.
    pub fn same_slot(&self, other: &ValueSlot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Cloneable id → slot map; the handle a drawing routine keeps for hover writes.
#[derive(Clone, Debug, Default)]
pub struct LegendSlots {
    by_id: Rc<BTreeMap<CategoryId, ValueSlot>>,
}

impl LegendSlots {
    pub fn get(&self, id: &str) -> Option<&ValueSlot> {
        self.by_id.get(id)
    }

    /// Write `value` into the slot for `id`. Returns false for ids not in the legend.
    pub fn write(&self, id: &str, value: f64) -> bool {
        match self.by_id.get(id) {
            Some(slot) => {
                slot.set(value);
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&self) {
        for slot in self.by_id.values() {
            slot.clear();
        }
    }

    pub fn len(&self) -> usize { self.by_id.len() }
    pub fn is_empty(&self) -> bool { self.by_id.is_empty() }
}

/// Legend opacity, driven by the external animation collaborator. Starts hidden.
#[derive(Clone, Debug, Default)]
pub struct LegendOpacity(Rc<Cell<f32>>);

impl LegendOpacity {
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    /// Clamped to `[0, 1]`; NaN is treated as hidden.
    pub fn set(&self, opacity: f32) {
        let v = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
        self.0.set(v);
    }

    pub fn is_visible(&self) -> bool {
        self.get() > 0.0
    }
}

#[derive(Clone, Debug)]
pub struct LegendRow {
    pub id: CategoryId,
    pub label: String,
    /// Swatch fill.
    pub color: String,
    /// Swatch border.
    pub border: String,
    slot: ValueSlot,
}

impl LegendRow {
    pub fn slot(&self) -> &ValueSlot {
        &self.slot
    }
}

#[derive(Clone, Debug, Default)]
pub struct LegendOverlay {
    rows: Vec<LegendRow>,
    slots: LegendSlots,
    opacity: LegendOpacity,
}

impl LegendOverlay {
    /// Build rows for `categories` in reverse order, so the last series (top of
    /// the stack) is listed first.
    ///
    /// Every id must resolve in `registry`; an unknown or repeated id fails the
    /// whole legend rather than rendering a blank row.
    pub fn build(categories: &[CategoryId], registry: &dyn CategoryRegistry) -> Result<Self, ConfigError> {
        let mut rows = Vec::with_capacity(categories.len());
        let mut by_id = BTreeMap::new();
        for id in categories.iter().rev() {
            let Some(meta) = registry.lookup(id) else {
                error!(category = %id, "legend category missing from registry");
                return Err(ConfigError::UnknownCategory(id.clone()));
            };
            let slot = ValueSlot::new();
            if by_id.insert(id.clone(), slot.clone()).is_some() {
                return Err(ConfigError::DuplicateCategory(id.clone()));
            }
            rows.push(LegendRow {
                id: id.clone(),
                label: meta.label.clone(),
                color: meta.color.clone(),
                border: meta.border.clone(),
                slot,
            });
        }
        Ok(Self {
            rows,
            slots: LegendSlots { by_id: Rc::new(by_id) },
            opacity: LegendOpacity::default(),
        })
    }

    /// Rows in legend (top-to-bottom) order.
    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&LegendRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when this legend lists exactly `categories` (in display order).
    pub fn matches(&self, categories: &[CategoryId]) -> bool {
        self.rows.len() == categories.len()
            && self.rows.iter().rev().zip(categories).all(|(r, c)| &r.id == c)
    }

    pub fn slots(&self) -> LegendSlots {
        self.slots.clone()
    }

    pub fn opacity(&self) -> &LegendOpacity {
        &self.opacity
    }

    /// Legend never intercepts pointer input.
    pub const fn pointer_events(&self) -> bool {
        false
    }
}
