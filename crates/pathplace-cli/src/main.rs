//! pathplace CLI - lay repeated meshes along sketched polylines
//!
//! Reads Esri polyline JSON as produced by a web map's sketch tool and writes
//! one mesh instance per placement.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pathplace::{populate, DegeneratePolicy, SegmentPlacer};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod files;

use config::ProjectConfig;
use files::{read_polylines, JsonSink, SketchFile};

#[derive(Parser)]
#[command(name = "pathplace")]
#[command(about = "Place repeated meshes along sketched polylines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place meshes along a polyline and write the instances as JSON
    Place {
        /// Esri polyline JSON file
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Asset to instantiate at every placement
        #[arg(long)]
        asset: Option<String>,
        #[command(flatten)]
        opts: PlacementArgs,
    },
    /// Print a per-segment placement report
    Info {
        /// Esri polyline JSON file
        input: PathBuf,
        #[command(flatten)]
        opts: PlacementArgs,
    },
    /// Print the default configuration as TOML
    Config,
}

#[derive(Args)]
struct PlacementArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Footprint width of one item
    #[arg(long)]
    item_width: Option<f64>,
    /// Gap after each item
    #[arg(long)]
    gap: Option<f64>,
    /// Distance from the segment end at which placement stops
    #[arg(long)]
    stop_margin: Option<f64>,
    /// Fail on zero-length segments instead of skipping them
    #[arg(long)]
    strict: bool,
    /// Use every path of the geometry, not only the first
    #[arg(long)]
    all_paths: bool,
}

impl PlacementArgs {
    /// Config file plus command-line overrides.
    fn resolve(&self) -> Result<ProjectConfig> {
        let mut config = ProjectConfig::load(self.config.as_deref())?;
        if let Some(width) = self.item_width {
            config.placement.item_width = width;
        }
        if let Some(gap) = self.gap {
            config.placement.gap_after_each_item = gap;
        }
        if let Some(margin) = self.stop_margin {
            config.placement.stop_margin = margin;
        }
        if self.strict {
            config.placement.degenerate = DegeneratePolicy::Fail;
        }
        if self.all_paths {
            config.all_paths = true;
        }
        config.placement.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Place {
            input,
            output,
            asset,
            opts,
        } => {
            let mut config = opts.resolve()?;
            if let Some(asset) = asset {
                config.asset = asset;
            }
            place_file(&input, output.as_deref(), &config)?;
        }
        Commands::Info { input, opts } => {
            show_info(&input, &opts.resolve()?)?;
        }
        Commands::Config => {
            print!("{}", ProjectConfig::default().to_toml()?);
        }
    }

    Ok(())
}

fn place_file(input: &Path, output: Option<&Path>, config: &ProjectConfig) -> Result<()> {
    let mut source = SketchFile::open(input, config.all_paths)?;
    let placer = SegmentPlacer::new(config.placement.clone());

    let created = match output {
        Some(path) => {
            let mut sink = JsonSink::new(BufWriter::new(File::create(path)?));
            let created = populate(&mut source, &mut sink, &placer, &config.asset)?;
            sink.finish()?;
            eprintln!("Wrote {} instance(s) to {}", created, path.display());
            created
        }
        None => {
            let mut sink = JsonSink::new(io::stdout().lock());
            let created = populate(&mut source, &mut sink, &placer, &config.asset)?;
            sink.finish()?;
            created
        }
    };

    info!(created, asset = %config.asset, "placement finished");
    Ok(())
}

fn show_info(input: &Path, config: &ProjectConfig) -> Result<()> {
    let json = std::fs::read_to_string(input)?;
    let polylines = read_polylines(&json, config.all_paths)?;
    let placer = SegmentPlacer::new(config.placement.clone());
    let p = &config.placement;

    println!("pathplace report: {}", input.display());
    println!(
        "  Item width: {}  Gap: {}  Stop margin: {}",
        p.item_width, p.gap_after_each_item, p.stop_margin
    );

    for (i, polyline) in polylines.iter().enumerate() {
        let report = placer.report(polyline)?;
        println!("\nPath {} ({} metric):", i, report.metric);
        for seg in &report.segments {
            if seg.skipped {
                println!("  segment {}: zero length, skipped", seg.index);
                continue;
            }
            println!(
                "  segment {}: length {:.3}, heading {:.2}°, {} of {} item(s)",
                seg.index,
                seg.distance,
                seg.heading_degrees.unwrap_or_default(),
                seg.emitted,
                seg.item_count
            );
        }
        println!("  Total length: {:.3}", report.total_distance);
        println!("  Placements: {}", report.placement_count());
    }

    Ok(())
}
