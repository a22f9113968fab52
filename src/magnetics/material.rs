//! Core materials and the named material table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{DesignError, Result};

/// Magnetic properties of a gapped core, as seen by the sizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoreMaterial {
    /// Inductance factor AL (nH per turn²)
    pub al: f64,
    /// Saturation flux density Bsat (T)
    pub b_sat: f64,
    /// Effective cross-sectional area Ae (mm²)
    pub effective_area: f64,
}

impl CoreMaterial {
    /// Create a material from AL (nH/turn²), Bsat (T) and Ae (mm²).
    pub fn new(al: f64, b_sat: f64, effective_area: f64) -> Self {
        Self {
            al,
            b_sat,
            effective_area,
        }
    }

    /// Effective area in m².
    pub fn effective_area_m2(&self) -> f64 {
        self.effective_area * 1e-6
    }

    /// Return a copy with fields replaced by any of `al`, `bsat`, `ae`
    /// present in `params`.
    pub fn with_overrides<'a, I>(mut self, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (key, &value) in params {
            match key.as_str() {
                "al" => self.al = value,
                "bsat" => self.b_sat = value,
                "ae" => self.effective_area = value,
                other => {
                    return Err(DesignError::invalid_parameter(
                        other,
                        "unknown core field (expected al, bsat or ae)",
                    ))
                }
            }
        }
        Ok(self)
    }
}

/// A named table entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreEntry {
    /// Display label
    pub label: String,
    pub material: CoreMaterial,
}

/// Read-only lookup of core materials by name.
///
/// Keys are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct CoreTable {
    entries: BTreeMap<String, CoreEntry>,
}

impl CoreTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in datasheet presets.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert("pc40", "TDK PC40 (Datasheet)", CoreMaterial::new(1950.0, 0.39, 120.0));
        table.insert("ferrite", "Generic Ferrite", CoreMaterial::new(1000.0, 0.35, 80.0));
        table.insert("koolmu60", "Kool Mu 60u", CoreMaterial::new(61.0, 1.05, 100.0));
        table.insert("custom", "Custom", CoreMaterial::new(2000.0, 0.3, 50.0));
        table
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: &str, label: impl Into<String>, material: CoreMaterial) {
        self.entries.insert(
            key.to_lowercase(),
            CoreEntry {
                label: label.into(),
                material,
            },
        );
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&CoreEntry> {
        self.entries.get(&name.to_lowercase())
    }

    /// Look up a material by name, failing with [`DesignError::UnknownCore`].
    pub fn material(&self, name: &str) -> Result<CoreMaterial> {
        self.get(name)
            .map(|entry| entry.material)
            .ok_or_else(|| DesignError::UnknownCore {
                name: name.to_string(),
            })
    }

    /// All table keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CoreTable {
    fn default() -> Self {
        Self::builtin()
    }
}
