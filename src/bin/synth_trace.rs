use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flate2::write::GzEncoder;
use flate2::Compression;
use road_iri_rs::synthetic::{GpsTrack, RoughPatch, SyntheticTrace, TraceSpec};

#[derive(Parser, Debug)]
#[command(name = "synth_trace")]
#[command(about = "Write a deterministic synthetic accelerometer trace as CSV", long_about = None)]
struct Args {
    /// Trace length in seconds
    #[arg(long, default_value = "60.0")]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "100.0")]
    rate: f64,

    /// Ground speed implied by the GPS fixes (m/s)
    #[arg(long, default_value = "10.0")]
    speed: f64,

    /// Peak broadband vertical noise (m/s²)
    #[arg(long, default_value = "0.5")]
    noise: f64,

    /// Emit lat/lon columns
    #[arg(long, default_value_t = false)]
    gps: bool,

    /// Log a GPS fix every N rows
    #[arg(long, default_value = "1")]
    fix_every: usize,

    /// Rough patch as START:END:AMPLITUDE (seconds, seconds, m/s²); repeatable
    #[arg(long = "rough", value_parser = parse_patch)]
    rough_patches: Vec<RoughPatch>,

    /// Output path (.csv or .csv.gz); stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_patch(s: &str) -> Result<RoughPatch, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("expected START:END:AMPLITUDE, got '{s}'"));
    }
    let num = |p: &str| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}"));
    Ok(RoughPatch {
        start_s: num(parts[0])?,
        end_s: num(parts[1])?,
        amplitude: num(parts[2])?,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(args.duration > 0.0 && args.rate > 0.0) {
        anyhow::bail!("duration and rate must be positive");
    }

    let spec = TraceSpec {
        duration_s: args.duration,
        rate_hz: args.rate,
        noise_amplitude: args.noise,
        gps: args.gps.then(|| GpsTrack {
            speed_mps: args.speed,
            fix_every: args.fix_every.max(1),
            ..Default::default()
        }),
        rough_patches: args.rough_patches.clone(),
    };
    let trace = SyntheticTrace::new(spec);

    match args.output.as_ref() {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            if path.extension().map(|e| e == "gz").unwrap_or(false) {
                let mut gz = GzEncoder::new(BufWriter::new(file), Compression::default());
                trace.write_csv(&mut gz)?;
                gz.finish()?.flush()?;
            } else {
                trace.write_csv(BufWriter::new(file))?;
            }
            log::info!("wrote {} rows to {}", trace.row_count(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            trace.write_csv(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
