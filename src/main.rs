use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use road_iri_rs::config::{TimeBase, TimeUnit};
use road_iri_rs::types::AccelUnit;
use road_iri_rs::{
    CacheKey, DistanceMode, EstimatorConfig, IriCache, IriEstimator, IriResult, SensorTable,
    VerticalAxis,
};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "road_iri")]
#[command(about = "Estimate road roughness (IRI) from accelerometer CSV traces", long_about = None)]
struct Args {
    /// Trip CSV (optionally .csv.gz)
    #[arg(long, conflicts_with = "input_dir")]
    input: Option<PathBuf>,

    /// Directory of trip CSVs to process in batch (*.csv, *.csv.gz)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// JSON estimator configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Segment length in meters (25 for local detail, 150 for network level)
    #[arg(long)]
    segment_length: Option<f64>,

    /// Nominal vehicle speed in m/s when GPS is absent or ignored
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long, value_enum)]
    distance_mode: Option<DistanceMode>,

    #[arg(long, value_enum)]
    vertical_axis: Option<VerticalAxis>,

    #[arg(long, value_enum)]
    time_unit: Option<TimeUnit>,

    #[arg(long, value_enum)]
    accel_unit: Option<AccelUnit>,

    #[arg(long, value_enum)]
    time_base: Option<TimeBase>,

    /// Write JSON here instead of stdout ("-" for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print a per-segment table
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn build_config(args: &Args) -> Result<EstimatorConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => EstimatorConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EstimatorConfig::default(),
    };
    if let Some(length) = args.segment_length {
        config.segment_length_m = length;
    }
    if let Some(speed) = args.speed {
        config.roughness.nominal_speed_mps = speed;
    }
    if let Some(mode) = args.distance_mode {
        config.roughness.distance_mode = mode;
    }
    if let Some(axis) = args.vertical_axis {
        config.preprocess.vertical_axis = axis;
    }
    if let Some(unit) = args.time_unit {
        config.preprocess.time_unit = unit;
    }
    if let Some(unit) = args.accel_unit {
        config.preprocess.accel_unit = unit;
    }
    if let Some(base) = args.time_base {
        config.preprocess.time_base = base;
    }
    Ok(config)
}

fn is_trip_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    path.is_file() && (name.ends_with(".csv") || name.ends_with(".csv.gz"))
}

fn print_summary(name: &str, result: &IriResult) {
    println!(
        "{}: mean IRI {:.2} ± {:.2} m/km ({}), {} segments, {:.1} m @ {:.1} m/s ({:?})",
        name,
        result.mean_iri,
        result.std_iri,
        result.quality,
        result.segment_count(),
        result.total_distance,
        result.estimated_speed,
        result.distance_source
    );
    if result.report.dropped_count() > 0 {
        println!("  {}", result.report.summary());
    }
    println!(
        "  {:>4} {:>9} {:>8} {:>8} {:>12} {:>12}",
        "seg", "start_m", "len_m", "iri", "lat", "lon"
    );
    for s in &result.segments {
        let iri = s.iri.map_or("-".to_string(), |v| format!("{v:.2}"));
        let (lat, lon) = s.segment.coordinate.map_or(("-".to_string(), "-".to_string()), |c| {
            (format!("{:.6}", c.latitude), format!("{:.6}", c.longitude))
        });
        println!(
            "  {:>4} {:>9.1} {:>8.1} {:>8} {:>12} {:>12}",
            s.segment.index, s.segment.start_distance, s.segment.length, iri, lat, lon
        );
    }
}

fn run_batch(dir: &Path, estimator: &IriEstimator, args: &Args) -> Result<serde_json::Value> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_trip_file(p))
        .collect();
    paths.sort();
    log::info!("{} trip files in {}", paths.len(), dir.display());

    let mut cache = IriCache::new(paths.len().max(1));
    let mut results = Vec::with_capacity(paths.len());
    for path in &paths {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let key = CacheKey::from_content(&bytes);
        let outcome = cache.get_or_try_insert_with(key, estimator.config(), || {
            estimator.estimate(&SensorTable::from_bytes(&bytes)?)
        });
        let name = path.display().to_string();
        match outcome {
            Ok(result) => {
                if args.summary {
                    print_summary(&name, &result);
                }
                results.push(json!({ "file": name, "result": result.as_ref() }));
            }
            Err(e) => {
                log::error!("Failed {}: {}", name, e);
                results.push(json!({
                    "file": name,
                    "error": { "kind": e.kind(), "message": e.to_string() },
                }));
            }
        }
    }
    let (hits, misses) = cache.stats();
    log::info!("batch done: {} computed, {} duplicates reused", misses, hits);
    Ok(serde_json::Value::Array(results))
}

fn write_json(value: &serde_json::Value, output: Option<&PathBuf>) -> Result<()> {
    match output.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, value)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let estimator = IriEstimator::new(build_config(&args)?)?;
    log::debug!("config: {:?}", estimator.config());

    let value = if let Some(dir) = args.input_dir.as_ref() {
        run_batch(dir, &estimator, &args)?
    } else if let Some(path) = args.input.as_ref() {
        let table = SensorTable::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let result = estimator
            .estimate(&table)
            .with_context(|| format!("estimating IRI for {}", path.display()))?;
        if args.summary {
            print_summary(&path.display().to_string(), &result);
        }
        serde_json::to_value(&result)?
    } else {
        anyhow::bail!("Provide --input or --input-dir");
    };

    write_json(&value, args.output.as_ref())
}
