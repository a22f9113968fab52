//! Gapped-core sizing: turns, stored energy, air gap and flux density.

use serde::Serialize;

use super::CoreMaterial;
use crate::converter::ElectricalResult;
use crate::MU_0;

/// Magnetic design realizing the required inductance on a given core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagneticResult {
    /// Turns count N
    pub turns: u32,
    /// Energy stored at peak current, ½·L·Ipk² (J)
    pub stored_energy: f64,
    /// Air gap length lg (m)
    pub air_gap: f64,
    /// Flux density at peak current (T)
    pub flux_density: f64,
    /// B > Bsat
    pub is_saturated: bool,
}

/// Smallest positive N with `al_nh · N² ≥ inductance_nh`.
///
/// Saturates at `u32::MAX` when no representable N is large enough,
/// including an infinite inductance.
fn minimum_turns(inductance_nh: f64, al_nh: f64) -> u32 {
    let estimate = (inductance_nh / al_nh).sqrt().ceil().max(1.0);
    if estimate >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    let mut turns = estimate as u32;
    // sqrt/ceil can land one off when the ratio is a near-perfect square
    while turns > 1 && al_nh * f64::from(turns - 1).powi(2) >= inductance_nh {
        turns -= 1;
    }
    while turns < u32::MAX && al_nh * f64::from(turns).powi(2) < inductance_nh {
        turns += 1;
    }
    turns
}

/// Size the inductor core for `electrical` on `material`.
///
/// Never fails: an implausible design (a single turn, B far above Bsat)
/// is reported as-is for the saturation evaluator to judge.
pub fn size_core(electrical: &ElectricalResult, material: &CoreMaterial) -> MagneticResult {
    let inductance = electrical.inductance;
    let peak_current = electrical.peak_current;
    let area = material.effective_area_m2();

    let turns = minimum_turns(inductance * 1e9, material.al);
    let n = f64::from(turns);

    let stored_energy = 0.5 * inductance * peak_current.powi(2);
    // Reluctance of the gap dominates: L = μ0·N²·Ae / lg
    let air_gap = (MU_0 * n * n * area) / inductance;
    // Faraday at peak current: N·B·Ae = L·Ipk
    let flux_density = (inductance * peak_current) / (n * area);

    MagneticResult {
        turns,
        stored_energy,
        air_gap,
        flux_density,
        is_saturated: flux_density > material.b_sat,
    }
}

impl MagneticResult {
    /// Flux density from the gap reluctance, B = μ0·N·I/lg.
    ///
    /// Agrees with [`MagneticResult::flux_density`] when evaluated at the
    /// peak current.
    pub fn gap_flux_density(&self, current: f64) -> f64 {
        MU_0 * f64::from(self.turns) * current / self.air_gap
    }
}
