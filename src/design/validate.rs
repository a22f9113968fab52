//! Design validation.

use crate::error::{DesignError, Result};
use crate::{MAX_CYCLES, MAX_SAMPLES};

use super::Design;

/// Validate the ranges of every design input.
///
/// Checks:
/// - Voltages, power and frequency are positive
/// - Ripple and efficiency percentages are in (0, 100]
/// - Core material fields and hardware limits are positive
/// - The waveform grid is non-empty and bounded by [`MAX_CYCLES`] and
///   [`MAX_SAMPLES`]
/// - The margin is in (0, 1]
///
/// The topology's voltage ordering is left to the resolver, which reports
/// it as [`DesignError::InvalidSpec`].
pub fn validate_design(design: &Design) -> Result<()> {
    let spec = &design.spec;

    positive("vin", spec.input_voltage)?;
    positive("vout", spec.output_voltage)?;
    positive("pout", spec.output_power)?;
    positive("fsw", spec.switching_frequency)?;
    percentage("ripple", spec.inductor_ripple_percent)?;
    positive("vripple", spec.output_ripple_percent)?;
    percentage("eff", spec.efficiency_percent)?;

    positive("al", design.material.al)?;
    positive("bsat", design.material.b_sat)?;
    positive("ae", design.material.effective_area)?;

    positive("isat", design.limits.saturation_current)?;
    if !design.limits.gate_drive_voltage.is_finite() {
        return Err(DesignError::invalid_parameter("vgs", "must be finite"));
    }

    bounded_count("cycles", design.config.cycles, MAX_CYCLES)?;
    bounded_count("samples", design.config.samples, MAX_SAMPLES)?;
    let margin = design.config.safety_margin;
    if !(margin > 0.0 && margin <= 1.0) {
        return Err(DesignError::invalid_parameter(
            "margin",
            format!("must be in (0, 1], got {}", margin),
        ));
    }

    Ok(())
}

fn positive(param: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DesignError::invalid_parameter(
            param,
            format!("must be positive, got {}", value),
        ))
    }
}

fn bounded_count(param: &str, value: usize, max: usize) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(DesignError::invalid_parameter(
            param,
            format!("must be in 1..={}, got {}", max, value),
        ))
    }
}

fn percentage(param: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 100.0 {
        Ok(())
    } else {
        Err(DesignError::invalid_parameter(
            param,
            format!("must be in (0, 100], got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignSpec, HardwareLimits, Topology};
    use crate::evaluate::EvaluationConfig;
    use crate::magnetics::CoreMaterial;

    fn design() -> Design {
        Design {
            spec: DesignSpec::new(Topology::Boost, 12.0, 24.0, 5.0, 100e3),
            core_name: "pc40".to_string(),
            material: CoreMaterial::new(1950.0, 0.39, 120.0),
            limits: HardwareLimits::default(),
            config: EvaluationConfig::default(),
        }
    }

    fn rejected_param(design: &Design) -> String {
        match validate_design(design) {
            Err(DesignError::InvalidParameter { param, .. }) => param,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_design() {
        assert!(validate_design(&design()).is_ok());
    }

    #[test]
    fn test_ordering_is_not_checked_here() {
        let mut d = design();
        d.spec.output_voltage = 6.0;
        assert!(validate_design(&d).is_ok());
    }

    #[test]
    fn test_range_violations() {
        let mut d = design();
        d.spec.switching_frequency = 0.0;
        assert_eq!(rejected_param(&d), "fsw");

        let mut d = design();
        d.spec.efficiency_percent = 120.0;
        assert_eq!(rejected_param(&d), "eff");

        let mut d = design();
        d.spec.inductor_ripple_percent = 0.0;
        assert_eq!(rejected_param(&d), "ripple");

        let mut d = design();
        d.material.effective_area = -1.0;
        assert_eq!(rejected_param(&d), "ae");

        let mut d = design();
        d.config.samples = 0;
        assert_eq!(rejected_param(&d), "samples");

        let mut d = design();
        d.config.samples = MAX_SAMPLES + 1;
        assert_eq!(rejected_param(&d), "samples");

        let mut d = design();
        d.config.cycles = usize::MAX;
        assert_eq!(rejected_param(&d), "cycles");

        let mut d = design();
        d.config.safety_margin = 1.5;
        assert_eq!(rejected_param(&d), "margin");
    }
}
