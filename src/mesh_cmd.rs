//! Mesh command: a model's lat/lon coordinates as JSON.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use sre_io::{read_mesh, write_json};

use crate::cli::MeshArgs;
use crate::convert;

/// Write the mesh of one configured model.
pub fn run(args: MeshArgs) -> Result<()> {
    let _cmd = info_span!("mesh", model = %args.model).entered();
    let config = crate::load_config(&args.config)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let model = config
        .model(&args.model)
        .ok_or_else(|| anyhow::anyhow!("model {:?} is not configured", args.model))?;

    let mesh = read_mesh(&model.files, &reader_cfg)
        .with_context(|| format!("failed to read mesh for model {:?}", model.name))?;

    let output = args
        .output
        .unwrap_or_else(|| config.io.output_dir.join(format!("mesh_{}.json", model.name)));
    crate::ensure_parent(&output)?;
    write_json(&output, &mesh)
        .with_context(|| format!("failed to write JSON: {}", output.display()))?;
    info!(
        path = %output.display(),
        n_lat = mesh.lat.len(),
        n_lon = mesh.lon.len(),
        "mesh written"
    );
    Ok(())
}
