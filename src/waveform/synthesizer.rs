//! Piecewise-linear switching waveforms over a few periods.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::converter::ElectricalResult;
use crate::design::{DesignSpec, HardwareLimits, Topology};

/// Output current ripple as a fraction of ΔIL.
const OUTPUT_CURRENT_RIPPLE_FRACTION: f64 = 0.1;

/// Main switch state within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

/// One point of every waveform channel at time `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSample {
    /// Time (s)
    pub time: f64,
    pub switch_state: SwitchState,
    /// Inductor current, clamped at Isat (A)
    pub inductor_current: f64,
    /// Input voltage (V)
    pub input_voltage: f64,
    /// Switch node / drain-source voltage (V)
    pub switch_voltage: f64,
    /// Gate drive voltage (V)
    pub gate_voltage: f64,
    /// Output voltage with sinusoidal ripple (V)
    pub output_voltage: f64,
    /// Output current with quadrature ripple (A)
    pub output_current: f64,
}

/// Selectable waveform channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    InductorCurrent,
    InputVoltage,
    SwitchVoltage,
    GateVoltage,
    OutputVoltage,
    OutputCurrent,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::InductorCurrent,
        Channel::InputVoltage,
        Channel::SwitchVoltage,
        Channel::GateVoltage,
        Channel::OutputVoltage,
        Channel::OutputCurrent,
    ];

    /// Short channel name used in CSV headers and the WASM API.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::InductorCurrent => "il",
            Channel::InputVoltage => "vin",
            Channel::SwitchVoltage => "vds",
            Channel::GateVoltage => "vgs",
            Channel::OutputVoltage => "vout",
            Channel::OutputCurrent => "iout",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown waveform channel '{}'", s))
    }
}

impl WaveformSample {
    /// Value of a single channel.
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::InductorCurrent => self.inductor_current,
            Channel::InputVoltage => self.input_voltage,
            Channel::SwitchVoltage => self.switch_voltage,
            Channel::GateVoltage => self.gate_voltage,
            Channel::OutputVoltage => self.output_voltage,
            Channel::OutputCurrent => self.output_current,
        }
    }
}

/// Evaluates waveform samples for one resolved design.
///
/// Every sample is computed from its own time value only, so samples can
/// be produced in any order or in parallel.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    frequency: f64,
    period: f64,
    on_time: f64,
    slope_on: f64,
    slope_off: f64,
    switch_voltage_high: f64,
    min_current: f64,
    peak_current: f64,
    saturation_current: f64,
    gate_drive_voltage: f64,
    input_voltage: f64,
    output_voltage: f64,
    output_ripple_amplitude: f64,
    load_current: f64,
    output_current_ripple: f64,
    cycles: usize,
    samples: usize,
}

impl Synthesizer {
    /// Create a synthesizer covering `cycles` periods with `samples`
    /// evenly spaced points.
    pub fn new(
        spec: &DesignSpec,
        electrical: &ElectricalResult,
        limits: &HardwareLimits,
        cycles: usize,
        samples: usize,
    ) -> Self {
        let vin = spec.input_voltage;
        let vo = spec.output_voltage;
        let l = electrical.inductance;

        let (slope_on, slope_off, switch_voltage_high) = match spec.topology {
            Topology::Buck => ((vin - vo) / l, -vo / l, vin),
            Topology::Boost => (vin / l, (vin - vo) / l, vo),
        };

        let period = spec.period();

        Self {
            frequency: spec.switching_frequency,
            period,
            on_time: electrical.duty_cycle * period,
            slope_on,
            slope_off,
            switch_voltage_high,
            min_current: electrical.min_current,
            peak_current: electrical.peak_current,
            saturation_current: limits.saturation_current,
            gate_drive_voltage: limits.gate_drive_voltage,
            input_voltage: vin,
            output_voltage: vo,
            output_ripple_amplitude: vo * (spec.output_ripple_percent / 100.0),
            load_current: electrical.load_current,
            output_current_ripple: electrical.ripple_current * OUTPUT_CURRENT_RIPPLE_FRACTION,
            cycles,
            samples,
        }
    }

    /// Switching period T (s).
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Simulated time span cycles·T (s).
    pub fn span(&self) -> f64 {
        self.cycles as f64 * self.period
    }

    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Time of sample `index` on the grid `i·span/samples`.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.span() / self.samples as f64
    }

    /// Sample times in order, covering [0, span).
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(move |i| self.time_at(i))
    }

    /// Evaluate every channel at time `t`.
    pub fn sample_at(&self, t: f64) -> WaveformSample {
        let phase = t.rem_euclid(self.period);

        let (switch_state, raw_current, gate_voltage, switch_voltage) = if phase < self.on_time {
            (
                SwitchState::On,
                self.min_current + self.slope_on * phase,
                self.gate_drive_voltage,
                0.0,
            )
        } else {
            (
                SwitchState::Off,
                self.peak_current + self.slope_off * (phase - self.on_time),
                0.0,
                self.switch_voltage_high,
            )
        };

        let omega_t = 2.0 * PI * self.frequency * t;

        WaveformSample {
            time: t,
            switch_state,
            // Hard saturation: abrupt ceiling, no soft knee
            inductor_current: raw_current.min(self.saturation_current),
            input_voltage: self.input_voltage,
            switch_voltage,
            gate_voltage,
            output_voltage: self.output_voltage + self.output_ripple_amplitude * omega_t.sin(),
            output_current: self.load_current
                + self.output_current_ripple * 0.5 * (omega_t - PI / 2.0).sin(),
        }
    }

    /// Lazily evaluate the full grid in time order.
    pub fn iter(&self) -> impl Iterator<Item = WaveformSample> + '_ {
        self.times().map(move |t| self.sample_at(t))
    }

    /// Evaluate the full grid.
    pub fn synthesize(&self) -> Vec<WaveformSample> {
        self.iter().collect()
    }

    /// Evaluate the full grid on the rayon thread pool.
    ///
    /// Produces exactly the same sequence as [`Synthesizer::synthesize`].
    #[cfg(feature = "parallel")]
    pub fn synthesize_par(&self) -> Vec<WaveformSample> {
        use rayon::prelude::*;

        (0..self.samples)
            .into_par_iter()
            .map(|i| self.sample_at(self.time_at(i)))
            .collect()
    }
}
