//! Report output for the CLI frontend.
//!
//! Renders a [`DesignEvaluation`] as a text summary, JSON, or a CSV table
//! of waveform samples. Display-unit conversions (µH, µF, mJ, mm, µs)
//! happen only here.

use std::io::{self, Write};

use crate::design::Design;
use crate::error::{DesignError, Result};
use crate::evaluate::DesignEvaluation;
use crate::magnetics::SaturationStatus;
use crate::waveform::{Channel, SwitchState};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Human-readable summary
    #[default]
    Text,
    /// Full evaluation as JSON
    Json,
    /// Waveform samples as CSV
    Csv,
}

fn output_error(e: io::Error) -> DesignError {
    DesignError::OutputError {
        message: e.to_string(),
    }
}

/// Write the evaluation in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    format: Format,
    design: &Design,
    eval: &DesignEvaluation,
) -> Result<()> {
    match format {
        Format::Text => write_text(out, design, eval),
        Format::Json => write_json(out, eval),
        Format::Csv => write_csv(out, eval),
    }?;
    out.flush().map_err(output_error)
}

/// Three-section summary: electrical, magnetic, saturation.
pub fn write_text<W: Write>(out: &mut W, design: &Design, eval: &DesignEvaluation) -> Result<()> {
    let e = &eval.electrical;
    let m = &eval.magnetic;
    let s = &eval.saturation;
    let spec = &design.spec;

    let text = format!(
        "\
{topology} converter: {vin} V -> {vout} V, {pout} W @ {fsw:.1} kHz

1. Electrical Design
   Inductance (L)      {l:.1} µH
   Output Cap (Co)     {c:.1} µF
   Duty Cycle          {d:.2}
   Peak Current (Ipk)  {ipk:.2} A
   Power loss          {ploss:.2} W

2. Magnetic Design ({core})
   Required Turns (N)  {n}
   Stored Energy       {energy:.3} mJ
   Air Gap (lg)        {gap:.3} mm
   Flux Density (B)    {b:.3} T (limit {bsat} T, safe {safe:.3} T)

3. Saturation: {status} ({util:.0}% of Bsat)
",
        topology = spec.topology,
        vin = spec.input_voltage,
        vout = spec.output_voltage,
        pout = spec.output_power,
        fsw = spec.switching_frequency / 1e3,
        l = e.inductance * 1e6,
        c = e.capacitance * 1e6,
        d = e.duty_cycle,
        ipk = e.peak_current,
        ploss = e.power_loss,
        core = design.core_name,
        n = m.turns,
        energy = m.stored_energy * 1e3,
        gap = m.air_gap * 1e3,
        b = m.flux_density,
        bsat = s.b_sat,
        safe = s.safe_limit,
        status = s.status,
        util = s.utilization * 100.0,
    );
    out.write_all(text.as_bytes()).map_err(output_error)?;

    if s.status == SaturationStatus::Saturated {
        writeln!(
            out,
            "CORE SATURATION WARNING! Flux {:.2}T > Limit {}T",
            s.flux_density, s.b_sat
        )
        .map_err(output_error)?;
    }

    Ok(())
}

/// Pretty-printed JSON of the whole evaluation.
pub fn write_json<W: Write>(out: &mut W, eval: &DesignEvaluation) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, eval).map_err(|e| DesignError::OutputError {
        message: e.to_string(),
    })?;
    writeln!(out).map_err(output_error)
}

/// One row per waveform sample, time in µs.
pub fn write_csv<W: Write>(out: &mut W, eval: &DesignEvaluation) -> Result<()> {
    let mut header = String::from("time_us,state");
    for channel in Channel::ALL {
        header.push(',');
        header.push_str(channel.name());
    }
    writeln!(out, "{}", header).map_err(output_error)?;

    for sample in &eval.waveform {
        let mut row = format!(
            "{:.6},{}",
            sample.time * 1e6,
            match sample.switch_state {
                SwitchState::On => "on",
                SwitchState::Off => "off",
            }
        );
        for channel in Channel::ALL {
            row.push_str(&format!(",{:.6}", sample.channel(channel)));
        }
        writeln!(out, "{}", row).map_err(output_error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;

    fn evaluated() -> (Design, DesignEvaluation) {
        let design =
            Design::from_ast(dsl::parse(".topology buck\nvin 12\nvout 5\npout 20\n.sim samples=8").unwrap())
                .unwrap();
        let eval = design.evaluate().unwrap();
        (design, eval)
    }

    #[test]
    fn test_text_report() {
        let (design, eval) = evaluated();
        let mut out = Vec::new();
        write_report(&mut out, Format::Text, &design, &eval).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Inductance (L)      364.6 µH"));
        assert!(text.contains("Output Cap (Co)     400.0 µF"));
        assert!(text.contains("Required Turns (N)  14"));
        assert!(text.contains("Air Gap (lg)        0.081 mm"));
        assert!(text.contains("Saturation: saturated"));
        assert!(text.contains("CORE SATURATION WARNING!"));
    }

    #[test]
    fn test_csv_report() {
        let (design, eval) = evaluated();
        let mut out = Vec::new();
        write_report(&mut out, Format::Csv, &design, &eval).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "time_us,state,il,vin,vds,vgs,vout,iout");
        assert_eq!(lines.len(), 1 + 8);
        assert!(lines[1].starts_with("0.000000,on,3.600000,12.000000,0.000000,10.000000"));
    }

    #[test]
    fn test_json_report() {
        let (design, eval) = evaluated();
        let mut out = Vec::new();
        write_report(&mut out, Format::Json, &design, &eval).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["electrical"]["load_current"], 4.0);
    }
}
