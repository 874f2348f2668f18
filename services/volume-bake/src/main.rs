//! Volume bake tool.
//!
//! Builds a procedural sparse grid, samples it onto a dense RGBA float
//! lattice and prints the resulting texture summary. The raw buffer can
//! optionally be written to disk for upload by a renderer.

mod fields;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fields::{build_grid, FieldKind};
use volume_sampler::{LatticeExtents, Volume, VolumeConfig};

#[derive(Parser, Debug)]
#[command(name = "volume-bake")]
#[command(about = "Bake a procedural sparse grid into a normalized 3D texture")]
struct Args {
    /// Lattice width in cells
    #[arg(long, env = "VOLUME_BAKE_WIDTH", default_value_t = 32,
          value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Lattice height in cells
    #[arg(long, env = "VOLUME_BAKE_HEIGHT", default_value_t = 32,
          value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Lattice depth in cells
    #[arg(long, env = "VOLUME_BAKE_DEPTH", default_value_t = 32,
          value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Procedural field to bake
    #[arg(long, value_enum, default_value_t = FieldKind::Sphere)]
    field: FieldKind,

    /// Grid covers index coordinates 0..=extent on every axis
    #[arg(long, default_value_t = 31)]
    extent: i32,

    /// World-space size of one voxel
    #[arg(long, default_value_t = 1.0)]
    voxel_size: f64,

    /// Factor applied to world extents when reporting scale
    #[arg(long, default_value_t = 1.0)]
    scale_factor: f32,

    /// Write the raw little-endian f32 RGBA buffer here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, env = "VOLUME_BAKE_JSON_LOGS")]
    json_logs: bool,

    /// Log level
    #[arg(long, env = "VOLUME_BAKE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let config = VolumeConfig::from_env();
    info!(
        partition_cells = config.partition_cells,
        degenerate_policy = %config.degenerate_policy,
        "Loaded configuration"
    );

    let grid = build_grid(args.field, args.extent, args.voxel_size)?;
    let extents = LatticeExtents::new(args.width, args.height, args.depth)?;

    let mut volume = Volume::with_config(Arc::new(grid), extents, config)?;
    volume.set_scale_factor(args.scale_factor);

    let mut buffer = vec![0.0f32; volume.required_samples()];
    volume
        .fill_buffer(Some(&mut buffer))
        .context("failed to fill volume buffer")?;

    println!("{}", volume.summary().to_json_pretty()?);

    if let Some(path) = &args.output {
        write_raw(path, &buffer)?;
        info!(path = %path.display(), bytes = buffer.len() * 4, "Wrote raw volume");
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

/// Sample bytes in little-endian order.
fn encode_le(samples: &[f32]) -> Cow<'_, [u8]> {
    if cfg!(target_endian = "little") {
        Cow::Borrowed(bytemuck::cast_slice(samples))
    } else {
        Cow::Owned(samples.iter().flat_map(|v| v.to_le_bytes()).collect())
    }
}

fn write_raw(path: &Path, samples: &[f32]) -> Result<()> {
    fs::write(path, encode_le(samples))
        .with_context(|| format!("failed to write {}", path.display()))
}
