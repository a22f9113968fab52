//! Property-based tests for the converter designer using proptest.
//!
//! Covers: duty-cycle formulas, invalid voltage orderings, minimal turns,
//! the gap/Faraday flux identity, the saturation-current clamp, and
//! waveform periodicity.

use dcdc_core::converter::resolve;
use dcdc_core::magnetics::size_core;
use dcdc_core::{
    evaluate_design, CoreMaterial, DesignSpec, HardwareLimits, Synthesizer, Topology,
};
use proptest::prelude::*;

fn spec_strategy(topology: Topology) -> impl Strategy<Value = DesignSpec> {
    (
        1.0f64..100.0,   // vin
        0.02f64..0.98,   // conversion ratio, always inside the valid region
        0.1f64..500.0,   // pout
        1e3f64..1e6,     // fsw
        5.0f64..60.0,    // inductor ripple %
        0.1f64..5.0,     // output ripple %
        50.0f64..=100.0, // efficiency %
    )
        .prop_map(move |(vin, ratio, pout, fsw, ripple, vripple, eff)| {
            let vout = match topology {
                Topology::Buck => vin * ratio,
                Topology::Boost => vin / ratio,
            };
            DesignSpec::new(topology, vin, vout, pout, fsw)
                .with_inductor_ripple(ripple)
                .with_output_ripple(vripple)
                .with_efficiency(eff)
        })
}

fn any_spec() -> impl Strategy<Value = DesignSpec> {
    prop_oneof![spec_strategy(Topology::Buck), spec_strategy(Topology::Boost)]
}

fn material_strategy() -> impl Strategy<Value = CoreMaterial> {
    (10.0f64..5000.0, 0.2f64..1.5, 10.0f64..500.0)
        .prop_map(|(al, b_sat, ae)| CoreMaterial::new(al, b_sat, ae))
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()) + 1e-12
}

// ── Topology Resolver ────────────────────────────────────────────────

proptest! {
    /// Buck duty cycle is Vo/Vin and strictly inside (0, 1).
    #[test]
    fn buck_duty_cycle(spec in spec_strategy(Topology::Buck)) {
        let result = resolve(&spec).unwrap();
        prop_assert_eq!(result.duty_cycle, spec.output_voltage / spec.input_voltage);
        prop_assert!(result.duty_cycle > 0.0 && result.duty_cycle < 1.0);
    }

    /// Boost duty cycle is (Vo-Vin)/Vo and strictly inside (0, 1).
    #[test]
    fn boost_duty_cycle(spec in spec_strategy(Topology::Boost)) {
        let result = resolve(&spec).unwrap();
        let expected = (spec.output_voltage - spec.input_voltage) / spec.output_voltage;
        prop_assert_eq!(result.duty_cycle, expected);
        prop_assert!(result.duty_cycle > 0.0 && result.duty_cycle < 1.0);
    }

    /// Component values and current levels are consistent for valid specs.
    #[test]
    fn positive_components(spec in any_spec()) {
        let result = resolve(&spec).unwrap();
        prop_assert!(result.inductance > 0.0);
        prop_assert!(result.capacitance > 0.0);
        prop_assert!(result.ripple_current > 0.0);
        prop_assert!(close(result.peak_current - result.min_current, result.ripple_current, 1e-9));
    }

    /// Wrong voltage ordering is rejected for both topologies.
    #[test]
    fn invalid_ordering_rejected(vin in 1.0f64..100.0, factor in 1.0f64..10.0) {
        let buck = DesignSpec::new(Topology::Buck, vin, vin * factor, 10.0, 10e3);
        prop_assert!(resolve(&buck).unwrap_err().is_invalid_spec());

        let boost = DesignSpec::new(Topology::Boost, vin, vin / factor, 10.0, 10e3);
        prop_assert!(resolve(&boost).unwrap_err().is_invalid_spec());
    }
}

// ── Magnetic Core Sizer ──────────────────────────────────────────────

proptest! {
    /// N is the smallest positive integer with AL·N² ≥ L (in nH).
    #[test]
    fn minimal_turns(spec in any_spec(), material in material_strategy()) {
        let electrical = resolve(&spec).unwrap();
        let magnetic = size_core(&electrical, &material);
        let l_nh = electrical.inductance * 1e9;
        let n = f64::from(magnetic.turns);

        prop_assert!(magnetic.turns >= 1);
        prop_assert!(material.al * n * n >= l_nh);
        if magnetic.turns > 1 {
            prop_assert!(material.al * (n - 1.0) * (n - 1.0) < l_nh);
        }
    }

    /// μ0·N·Ipk/lg reproduces the Faraday flux density.
    #[test]
    fn gap_flux_round_trip(spec in any_spec(), material in material_strategy()) {
        let electrical = resolve(&spec).unwrap();
        let magnetic = size_core(&electrical, &material);
        let from_gap = magnetic.gap_flux_density(electrical.peak_current);

        prop_assert!(close(from_gap, magnetic.flux_density, 1e-9));
        prop_assert!(magnetic.air_gap > 0.0);
        prop_assert!(magnetic.stored_energy > 0.0);
        prop_assert_eq!(magnetic.is_saturated, magnetic.flux_density > material.b_sat);
    }
}

// ── Waveform Synthesizer ─────────────────────────────────────────────

proptest! {
    /// No inductor current sample exceeds Isat.
    #[test]
    fn clamp_enforced(
        spec in any_spec(),
        material in material_strategy(),
        isat in 0.01f64..20.0,
    ) {
        let limits = HardwareLimits::new(isat, 10.0);
        let eval = evaluate_design(&spec, &material, &limits, 3, 300).unwrap();
        prop_assert_eq!(eval.waveform.len(), 300);
        for sample in &eval.waveform {
            prop_assert!(sample.inductor_current <= isat);
        }
    }

    /// Samples one or two periods apart are equal.
    #[test]
    fn waveform_periodic(spec in any_spec(), fraction in 0.0f64..1.0, k in 1usize..3) {
        let electrical = resolve(&spec).unwrap();
        let synth = Synthesizer::new(&spec, &electrical, &HardwareLimits::default(), 3, 1000);
        let period = synth.period();
        let t = fraction * period;

        // Stay clear of the switching edges, where rounding may pick either side
        let t_on = electrical.duty_cycle * period;
        prop_assume!((t - t_on).abs() > 1e-6 * period);
        prop_assume!(t > 1e-6 * period && period - t > 1e-6 * period);

        let a = synth.sample_at(t);
        let b = synth.sample_at(t + k as f64 * period);

        prop_assert_eq!(a.switch_state, b.switch_state);
        prop_assert!(close(a.inductor_current, b.inductor_current, 1e-9));
        prop_assert_eq!(a.gate_voltage, b.gate_voltage);
        prop_assert_eq!(a.switch_voltage, b.switch_voltage);
        prop_assert!(close(a.output_voltage, b.output_voltage, 1e-9));
        prop_assert!(close(a.output_current, b.output_current, 1e-9));
    }

    /// Sample times are increasing and inside [0, cycles·T).
    #[test]
    fn sample_grid(spec in any_spec(), cycles in 1usize..6, samples in 1usize..2000) {
        let electrical = resolve(&spec).unwrap();
        let synth = Synthesizer::new(&spec, &electrical, &HardwareLimits::default(), cycles, samples);
        let times: Vec<f64> = synth.times().collect();

        prop_assert_eq!(times.len(), samples);
        prop_assert_eq!(times[0], 0.0);
        prop_assert!(times.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(*times.last().unwrap() < synth.span());
    }
}
