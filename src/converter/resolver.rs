//! Steady-state electrical sizing for each topology.

use serde::Serialize;

use crate::design::{DesignSpec, Topology};
use crate::error::{DesignError, Result};

/// Component values and current levels derived from a [`DesignSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectricalResult {
    /// Duty cycle D, strictly inside (0, 1)
    pub duty_cycle: f64,
    /// Inductance L (H)
    pub inductance: f64,
    /// Output capacitance C (F)
    pub capacitance: f64,
    /// Average inductor current IL_avg (A)
    pub average_inductor_current: f64,
    /// Peak-to-peak inductor ripple ΔIL (A)
    pub ripple_current: f64,
    /// Load current Iload = Po/Vo (A)
    pub load_current: f64,
    /// Input current Pin/Vin (A)
    pub input_current: f64,
    /// Ipk = IL_avg + ΔIL/2 (A)
    pub peak_current: f64,
    /// Imin = IL_avg - ΔIL/2 (A)
    pub min_current: f64,
    /// Peak-to-peak output voltage ripple ΔVo (V)
    pub output_ripple_voltage: f64,
    /// Pout (W)
    pub output_power: f64,
    /// Pin = Pout/η (W)
    pub input_power: f64,
    /// Pin - Pout (W), informational
    pub power_loss: f64,
}

/// Size the converter described by `spec`.
///
/// Fails with [`DesignError::InvalidSpec`] when the voltage ordering
/// required by the topology does not hold (Buck needs Vo < Vin, Boost
/// needs Vo > Vin). Range validation of the remaining fields is the
/// caller's job; see [`crate::design::validate_design`].
pub fn resolve(spec: &DesignSpec) -> Result<ElectricalResult> {
    let vin = spec.input_voltage;
    let vo = spec.output_voltage;
    let fsw = spec.switching_frequency;

    let load_current = spec.output_power / vo;
    let output_power = spec.output_power;
    let input_power = output_power / spec.efficiency();
    let power_loss = input_power - output_power;
    let input_current = input_power / vin;
    let output_ripple_voltage = vo * (spec.output_ripple_percent / 100.0);

    let (duty_cycle, average_inductor_current) = match spec.topology {
        Topology::Buck => {
            if vo >= vin {
                return Err(DesignError::invalid_spec(
                    spec.topology,
                    format!("output voltage ({} V) must be below input voltage ({} V)", vo, vin),
                ));
            }
            (vo / vin, load_current)
        }
        Topology::Boost => {
            if vo <= vin {
                return Err(DesignError::invalid_spec(
                    spec.topology,
                    format!("output voltage ({} V) must be above input voltage ({} V)", vo, vin),
                ));
            }
            ((vo - vin) / vo, input_current)
        }
    };

    let ripple_current = average_inductor_current * (spec.inductor_ripple_percent / 100.0);

    let (inductance, capacitance) = match spec.topology {
        Topology::Buck => (
            ((vin - vo) * duty_cycle) / (ripple_current * fsw),
            ripple_current / (8.0 * fsw * output_ripple_voltage),
        ),
        Topology::Boost => (
            (vin * duty_cycle) / (ripple_current * fsw),
            (load_current * duty_cycle) / (fsw * output_ripple_voltage),
        ),
    };

    Ok(ElectricalResult {
        duty_cycle,
        inductance,
        capacitance,
        average_inductor_current,
        ripple_current,
        load_current,
        input_current,
        peak_current: average_inductor_current + ripple_current / 2.0,
        min_current: average_inductor_current - ripple_current / 2.0,
        output_ripple_voltage,
        output_power,
        input_power,
        power_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn buck() -> DesignSpec {
        DesignSpec::new(Topology::Buck, 12.0, 5.0, 20.0, 10e3)
            .with_inductor_ripple(20.0)
            .with_output_ripple(0.5)
            .with_efficiency(100.0)
    }

    #[test]
    fn test_buck_reference_design() {
        let result = resolve(&buck()).unwrap();

        assert_relative_eq!(result.duty_cycle, 5.0 / 12.0, max_relative = 1e-12);
        assert_relative_eq!(result.load_current, 4.0);
        assert_relative_eq!(result.average_inductor_current, 4.0);
        assert_relative_eq!(result.ripple_current, 0.8, max_relative = 1e-12);
        assert_relative_eq!(result.inductance, 364.583e-6, max_relative = 1e-5);
        assert_relative_eq!(result.capacitance, 400e-6, max_relative = 1e-9);
        assert_relative_eq!(result.peak_current, 4.4, max_relative = 1e-12);
        assert_relative_eq!(result.min_current, 3.6, max_relative = 1e-12);
        assert_relative_eq!(result.output_ripple_voltage, 0.025, max_relative = 1e-12);
        assert_relative_eq!(result.power_loss, 0.0);
    }

    #[test]
    fn test_buck_efficiency_only_affects_power_budget() {
        let ideal = resolve(&buck()).unwrap();
        let lossy = resolve(&buck().with_efficiency(80.0)).unwrap();

        assert_relative_eq!(lossy.input_power, 25.0, max_relative = 1e-12);
        assert_relative_eq!(lossy.power_loss, 5.0, max_relative = 1e-12);
        // Buck inductor current follows the load, not the input
        assert_relative_eq!(lossy.inductance, ideal.inductance);
    }

    #[test]
    fn test_boost_reference_design() {
        let spec = DesignSpec::new(Topology::Boost, 12.0, 24.0, 5.0, 10e3);
        let result = resolve(&spec).unwrap();

        assert_relative_eq!(result.duty_cycle, 0.5);
        assert_relative_eq!(result.load_current, 5.0 / 24.0, max_relative = 1e-12);
        // IL_avg = Pin/Vin
        assert_relative_eq!(result.average_inductor_current, 5.0 / 12.0, max_relative = 1e-12);
        assert_relative_eq!(result.ripple_current, 5.0 / 12.0 * 0.2, max_relative = 1e-12);
        let expected_l = (12.0 * 0.5) / (result.ripple_current * 10e3);
        assert_relative_eq!(result.inductance, expected_l, max_relative = 1e-12);
        let expected_c = (result.load_current * 0.5) / (10e3 * 24.0 * 0.005);
        assert_relative_eq!(result.capacitance, expected_c, max_relative = 1e-12);
    }

    #[test]
    fn test_boost_inductor_current_includes_losses() {
        let spec = DesignSpec::new(Topology::Boost, 12.0, 24.0, 12.0, 10e3).with_efficiency(75.0);
        let result = resolve(&spec).unwrap();
        assert_relative_eq!(result.input_power, 16.0, max_relative = 1e-12);
        assert_relative_eq!(result.average_inductor_current, 16.0 / 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_orderings() {
        let equal = DesignSpec::new(Topology::Buck, 12.0, 12.0, 20.0, 10e3);
        assert!(resolve(&equal).unwrap_err().is_invalid_spec());

        let step_up_buck = DesignSpec::new(Topology::Buck, 5.0, 12.0, 20.0, 10e3);
        assert!(resolve(&step_up_buck).unwrap_err().is_invalid_spec());

        let step_down_boost = DesignSpec::new(Topology::Boost, 24.0, 12.0, 5.0, 10e3);
        let err = resolve(&step_down_boost).unwrap_err();
        assert!(matches!(err, DesignError::InvalidSpec { topology: Topology::Boost, .. }));

        let equal_boost = DesignSpec::new(Topology::Boost, 12.0, 12.0, 5.0, 10e3);
        assert!(resolve(&equal_boost).unwrap_err().is_invalid_spec());
    }
}
