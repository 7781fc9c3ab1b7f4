//! Extract command: point series nearest to a named location, per model.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use sre_io::{OutputMode, extract_location, write_series};

use crate::cli::ExtractArgs;
use crate::convert;

/// Run the extraction pipeline.
pub fn run(args: ExtractArgs) -> Result<()> {
    let _cmd = info_span!("extract").entered();
    let config = crate::load_config(&args.config)?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let gazetteer = convert::build_gazetteer(&config);
    let models = convert::build_models(&config, &args.model)?;

    // A single combined file needs the series back in memory.
    let mode = match &args.output {
        Some(_) => OutputMode::Return,
        None => OutputMode::Persist {
            dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.io.output_dir.clone()),
        },
    };

    info!(
        location = %args.location,
        n_models = models.len(),
        variable = %config.io.variable,
        "extracting"
    );
    let report = extract_location(
        &models,
        &args.location,
        &gazetteer,
        &reader_cfg,
        &mode,
        &writer_cfg,
    )
    .with_context(|| format!("failed to extract location {:?}", args.location))?;

    if !report.failed().is_empty() {
        let skipped: Vec<&str> = report.failed().iter().map(|f| f.model.as_str()).collect();
        warn!(?skipped, "some models were skipped");
    }
    if report.n_succeeded() == 0 {
        bail!("no model could be extracted for {:?}", args.location);
    }

    if let Some(output) = &args.output {
        crate::ensure_parent(output)?;
        write_series(output, report.series(), &writer_cfg)
            .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
        info!(path = %output.display(), n_models = report.n_succeeded(), "series written");
    }

    Ok(())
}
