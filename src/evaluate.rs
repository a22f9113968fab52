//! Full design evaluation: sizing, core design, saturation and waveforms.

use serde::Serialize;

use crate::converter::{self, ElectricalResult};
use crate::design::{DesignSpec, HardwareLimits};
use crate::error::Result;
use crate::magnetics::{self, CoreMaterial, MagneticResult, SaturationReport, SaturationStatus};
use crate::waveform::{Synthesizer, WaveformSample};
use crate::{DEFAULT_CYCLES, DEFAULT_SAFETY_MARGIN, DEFAULT_SAMPLES};

/// Configuration for a design evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    /// Number of switching periods in the waveform.
    pub cycles: usize,
    /// Number of evenly spaced waveform samples.
    pub samples: usize,
    /// Fraction of Bsat considered safe.
    pub safety_margin: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            samples: DEFAULT_SAMPLES,
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl EvaluationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of simulated switching periods.
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    /// Set the number of waveform samples.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the saturation safety margin (fraction of Bsat).
    ///
    /// - 0.8 (default): flag anything above 80% of Bsat as marginal
    /// - 1.0: only report safe or saturated
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin;
        self
    }
}

/// Every result derived from one design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignEvaluation {
    pub electrical: ElectricalResult,
    pub magnetic: MagneticResult,
    pub saturation: SaturationReport,
    pub waveform: Vec<WaveformSample>,
}

impl DesignEvaluation {
    pub fn saturation_status(&self) -> SaturationStatus {
        self.saturation.status
    }
}

/// Evaluate a design with the default safety margin.
pub fn evaluate_design(
    spec: &DesignSpec,
    material: &CoreMaterial,
    limits: &HardwareLimits,
    cycles: usize,
    samples: usize,
) -> Result<DesignEvaluation> {
    let config = EvaluationConfig::new()
        .with_cycles(cycles)
        .with_samples(samples);
    evaluate_with_config(spec, material, limits, &config)
}

/// Evaluate a design.
///
/// Fails only when the topology's voltage ordering is violated, in which
/// case no downstream stage runs.
pub fn evaluate_with_config(
    spec: &DesignSpec,
    material: &CoreMaterial,
    limits: &HardwareLimits,
    config: &EvaluationConfig,
) -> Result<DesignEvaluation> {
    let _span = tracing::info_span!("evaluate_design", topology = %spec.topology).entered();

    let electrical = converter::resolve(spec)?;
    tracing::debug!(
        duty_cycle = electrical.duty_cycle,
        inductance = electrical.inductance,
        capacitance = electrical.capacitance,
        peak_current = electrical.peak_current,
        "topology resolved"
    );

    let magnetic = magnetics::size_core(&electrical, material);
    tracing::debug!(
        turns = magnetic.turns,
        air_gap = magnetic.air_gap,
        flux_density = magnetic.flux_density,
        "core sized"
    );

    let saturation = magnetics::evaluate_saturation(&magnetic, material, config.safety_margin);
    if saturation.status == SaturationStatus::Saturated {
        tracing::warn!(
            flux_density = saturation.flux_density,
            b_sat = saturation.b_sat,
            "core saturates at peak current"
        );
    }

    let synthesizer = Synthesizer::new(spec, &electrical, limits, config.cycles, config.samples);
    #[cfg(feature = "parallel")]
    let waveform = synthesizer.synthesize_par();
    #[cfg(not(feature = "parallel"))]
    let waveform = synthesizer.synthesize();

    Ok(DesignEvaluation {
        electrical,
        magnetic,
        saturation,
        waveform,
    })
}
