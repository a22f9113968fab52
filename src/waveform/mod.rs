//! Transient waveform synthesis.
//!
//! Waveforms are not integrated in time. Each sample is evaluated directly
//! from its phase within the switching period:
//!
//! ```text
//! phase = t mod T,  t_on = D·T
//! ON  (phase < t_on): IL = Imin + slope_on·phase        Vgs = Vdrive  Vds = 0
//! OFF (otherwise):    IL = Ipk  + slope_off·(phase-t_on) Vgs = 0       Vds = Vhigh
//! IL  = min(IL, Isat)
//! ```
//!
//! | | slope_on | slope_off | Vhigh |
//! |---|---|---|---|
//! | Buck | (Vin-Vo)/L | -Vo/L | Vin |
//! | Boost | Vin/L | (Vin-Vo)/L | Vo |
//!
//! The output voltage and current carry sinusoidal ripple at fsw; the
//! current ripple is 10% of ΔIL in quadrature with the voltage ripple.

mod synthesizer;

pub use synthesizer::{Channel, SwitchState, Synthesizer, WaveformSample};
