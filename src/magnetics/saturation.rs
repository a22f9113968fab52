//! Advisory saturation check of a sized core.

use std::fmt;

use serde::Serialize;

use super::{CoreMaterial, MagneticResult};

/// Three-level saturation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationStatus {
    /// B ≤ margin·Bsat
    Safe,
    /// margin·Bsat < B ≤ Bsat
    Marginal,
    /// B > Bsat
    Saturated,
}

impl fmt::Display for SaturationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Marginal => write!(f, "marginal"),
            Self::Saturated => write!(f, "saturated"),
        }
    }
}

/// Saturation status together with the numbers it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaturationReport {
    pub status: SaturationStatus,
    /// Operating flux density (T)
    pub flux_density: f64,
    /// Material saturation limit (T)
    pub b_sat: f64,
    /// margin·Bsat (T)
    pub safe_limit: f64,
    /// B/Bsat
    pub utilization: f64,
}

/// Classify a flux density against `b_sat` with a safety `margin`
/// (fraction of Bsat considered safe).
pub fn classify(flux_density: f64, b_sat: f64, margin: f64) -> SaturationStatus {
    if flux_density > b_sat {
        SaturationStatus::Saturated
    } else if flux_density > margin * b_sat {
        SaturationStatus::Marginal
    } else {
        SaturationStatus::Safe
    }
}

/// Evaluate the magnetic design against the core material.
pub fn evaluate_saturation(
    magnetic: &MagneticResult,
    material: &CoreMaterial,
    margin: f64,
) -> SaturationReport {
    let flux_density = magnetic.flux_density;
    let b_sat = material.b_sat;

    SaturationReport {
        status: classify(flux_density, b_sat, margin),
        flux_density,
        b_sat,
        safe_limit: margin * b_sat,
        utilization: flux_density / b_sat,
    }
}
