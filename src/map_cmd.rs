//! Map command: duration histograms for every grid cell of one model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use sre_io::{read_field, write_json, write_map};
use sre_map::GridMapBuilder;

use crate::cli::MapArgs;
use crate::convert;

/// Run the grid mapping pipeline.
pub fn run(args: MapArgs) -> Result<()> {
    let _cmd = info_span!("map", model = %args.model).entered();
    let config = crate::load_config(&args.config)?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let sre_cfg = convert::build_sre_config(&config.events, args.percentiles.as_deref())?;
    let model = config
        .model(&args.model)
        .ok_or_else(|| anyhow::anyhow!("model {:?} is not configured", args.model))?;

    info!(n_files = model.files.len(), variable = %config.io.variable, "reading field");
    let field = read_field(&model.files, &reader_cfg)
        .with_context(|| format!("failed to read NetCDF field for model {:?}", model.name))?;
    info!(
        n_time = field.n_time(),
        n_lat = field.n_lat(),
        n_lon = field.n_lon(),
        "field loaded"
    );

    let builder = GridMapBuilder::new(sre_cfg)
        .context("invalid event configuration")?
        .with_parallel(config.map.parallel && !args.sequential)
        .with_progress_interval(config.map.progress_interval);
    let hist = builder.build(&field).context("grid sweep failed")?;

    let output = args
        .output
        .unwrap_or_else(|| config.io.output_dir.join(format!("map_{}.parquet", model.name)));
    crate::ensure_parent(&output)?;
    write_map(&output, &hist, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), "map written");

    let failed_path = failed_points_path(&output);
    write_json(&failed_path, hist.failed())
        .with_context(|| format!("failed to write JSON: {}", failed_path.display()))?;
    if !hist.is_complete() {
        warn!(
            n_failed = hist.failed().len(),
            path = %failed_path.display(),
            "some grid points could not be analysed"
        );
    }

    Ok(())
}

/// `<dir>/<stem>.failed.json` next to the map file.
fn failed_points_path(map: &Path) -> PathBuf {
    let stem = map
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    map.with_file_name(format!("{stem}.failed.json"))
}
