//! PV command: convert extracted irradiance series to daily PV energy.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use sre_io::{LocationResolver, read_series, write_series};
use sre_pv::{PvModel, Site, pv_power_series};

use crate::cli::PvArgs;
use crate::convert;

/// Run the PV conversion pipeline.
pub fn run(args: PvArgs) -> Result<()> {
    let _cmd = info_span!("pv").entered();
    let config = crate::load_config(&args.config)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    let at = convert::build_gazetteer(&config)
        .resolve(&args.location)
        .with_context(|| format!("failed to resolve location {:?}", args.location))?;
    let site = Site::new(at.lat, at.lon);

    // CLI overrides
    let mut pv = config.pv;
    if let Some(tilt) = args.tilt {
        pv.tilt = tilt;
    }
    if let Some(azimuth) = args.azimuth {
        pv.azimuth = azimuth;
    }
    if let Some(tracking) = args.tracking {
        pv.tracking = tracking;
    }
    let panel = convert::build_panel_config(&pv)?;
    let model = convert::build_pv_model(&pv)?;

    info!(path = %args.input.display(), "reading series");
    let series = read_series(&args.input)
        .with_context(|| format!("failed to read Parquet: {}", args.input.display()))?;

    info!(
        pv_model = model.name(),
        n_series = series.len(),
        capacity_w = panel.capacity_w(),
        "converting"
    );
    let mut energy = BTreeMap::new();
    for (name, irradiance) in &series {
        let converted = pv_power_series(irradiance, &model, &site, &panel)
            .with_context(|| format!("PV conversion failed for model {name:?}"))?;
        energy.insert(name.clone(), converted);
    }

    crate::ensure_parent(&args.output)?;
    write_series(&args.output, &energy, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", args.output.display()))?;
    info!(path = %args.output.display(), n_models = energy.len(), "pv energy written");

    Ok(())
}
