//! Point-series extraction over several models.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::error::{FailureKind, IoError};
use crate::location::LocationResolver;
use crate::reader::{ReaderConfig, read_point_series};
use crate::writer::{WriterConfig, write_series};

/// A named model and its NetCDF files, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSource {
    /// Model name, used in output file names and series keys.
    pub name: String,
    /// NetCDF files, concatenated along time in this order.
    pub files: Vec<PathBuf>,
}

impl ModelSource {
    /// Creates a source from a name and its files.
    pub fn new(name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

/// What to do with each extracted series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Keep the series in the returned report.
    Return,
    /// Write one Parquet file per model into `dir` as
    /// `<location>_<model>.parquet`.
    Persist { dir: PathBuf },
}

/// A model that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFailure {
    /// Name of the skipped model.
    pub model: String,
    /// Whether the data or the reading failed.
    pub kind: FailureKind,
    /// Error message.
    pub reason: String,
}

/// Outcome of [`extract_location`].
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    series: BTreeMap<String, Vec<f64>>,
    written: Vec<PathBuf>,
    failed: Vec<ModelFailure>,
}

impl ExtractReport {
    /// Series by model, filled in [`OutputMode::Return`].
    pub fn series(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.series
    }

    /// Consumes the report, returning the series by model.
    pub fn into_series(self) -> BTreeMap<String, Vec<f64>> {
        self.series
    }

    /// Files written in [`OutputMode::Persist`].
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Models that were skipped, in input order.
    pub fn failed(&self) -> &[ModelFailure] {
        &self.failed
    }

    /// Number of models that succeeded.
    pub fn n_succeeded(&self) -> usize {
        self.series.len() + self.written.len()
    }
}

/// Extract the series of the grid box nearest to `location` from every
/// model.
///
/// A model that fails to load, or whose series cannot be written, is logged
/// with its [`FailureKind`] and skipped.
///
/// # Errors
///
/// Returns [`IoError::UnknownLocation`] if the resolver does not know
/// `location`, or [`IoError::Write`] if the output directory cannot be
/// created. Per-model failures are reported in [`ExtractReport::failed`].
pub fn extract_location(
    models: &[ModelSource],
    location: &str,
    resolver: &dyn LocationResolver,
    reader: &ReaderConfig,
    mode: &OutputMode,
    writer: &WriterConfig,
) -> Result<ExtractReport, IoError> {
    let at = resolver.resolve(location)?;
    if let OutputMode::Persist { dir } = mode {
        std::fs::create_dir_all(dir).map_err(|e| IoError::Write {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
    }

    let mut report = ExtractReport::default();
    for model in models {
        let _span = info_span!("model", name = %model.name).entered();
        info!(
            variable = reader.variable(),
            location,
            n_files = model.files.len(),
            "loading point series"
        );

        let outcome = read_point_series(&model.files, reader, at).and_then(|point| {
            let values = point.into_values();
            match mode {
                OutputMode::Return => {
                    report.series.insert(model.name.clone(), values);
                }
                OutputMode::Persist { dir } => {
                    let path = output_path(dir, location, &model.name);
                    let one = BTreeMap::from([(model.name.clone(), values)]);
                    write_series(&path, &one, writer)?;
                    info!(path = %path.display(), "series written");
                    report.written.push(path);
                }
            }
            Ok(())
        });

        if let Err(e) = outcome {
            warn!(kind = ?e.kind(), error = %e, "skipping model");
            report.failed.push(ModelFailure {
                model: model.name.clone(),
                kind: e.kind(),
                reason: e.to_string(),
            });
        }
    }

    info!(
        n_succeeded = report.n_succeeded(),
        n_failed = report.failed.len(),
        "extraction finished"
    );
    Ok(report)
}

/// `<dir>/<location>_<model>.parquet`, with spaces in the location replaced.
pub fn output_path(dir: &Path, location: &str, model: &str) -> PathBuf {
    let location = location.trim().replace(char::is_whitespace, "_");
    dir.join(format!("{location}_{model}.parquet"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Coordinates, Gazetteer};

    #[test]
    fn output_path_sanitises_location() {
        let p = output_path(Path::new("/out"), "New York", "CESM2");
        assert_eq!(p, PathBuf::from("/out/New_York_CESM2.parquet"));
    }

    #[test]
    fn unknown_location_is_fatal() {
        let g = Gazetteer::new().with_location("Zurich", Coordinates::new(47.4, 8.5));
        let err = extract_location(
            &[],
            "Bern",
            &g,
            &ReaderConfig::default(),
            &OutputMode::Return,
            &WriterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::UnknownLocation { .. }));
    }

    #[test]
    fn missing_files_are_skipped() {
        let g = Gazetteer::new().with_location("Zurich", Coordinates::new(47.4, 8.5));
        let models = [
            ModelSource::new("A", vec![PathBuf::from("/nonexistent/a.nc")]),
            ModelSource::new("B", Vec::new()),
        ];
        let report = extract_location(
            &models,
            "zurich",
            &g,
            &ReaderConfig::default(),
            &OutputMode::Return,
            &WriterConfig::default(),
        )
        .unwrap();
        assert_eq!(report.n_succeeded(), 0);
        assert_eq!(report.failed().len(), 2);
        assert_eq!(report.failed()[0].kind, FailureKind::Upstream);
        assert_eq!(report.failed()[1].kind, FailureKind::Structural);
    }
}
