//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sre_calendar::DAYS_PER_YEAR;
use sre_map::Field;
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::location::{Coordinates, grid_indices};
use crate::netcdf_read::{self, TimeAxis};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a daily variable from NetCDF files.
///
/// The [`Default`] implementation supplies CMIP-style names: variable
/// `rsds`, coordinate aliases `lat`/`latitude`/`y` and `lon`/`longitude`/`x`,
/// time variable `time`, and longitude normalisation into `[0, 360)`.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable holding the `time × lat × lon` data.
    variable: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Whether target longitudes are mapped into `[0, 360)` before lookup.
    normalize_lon: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "rsds".into(),
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            time_var: "time".into(),
            normalize_lon: true,
        }
    }
}

impl ReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the latitude aliases, tried in order.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Set the longitude aliases, tried in order.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Enable or disable longitude normalisation for point lookups.
    pub fn with_normalize_lon(mut self, normalize: bool) -> Self {
        self.normalize_lon = normalize;
        self
    }

    /// The data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Whether point lookups normalise longitude.
    pub fn normalize_lon(&self) -> bool {
        self.normalize_lon
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every empty name or alias list.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.variable.is_empty() {
            problems.push("variable name is empty");
        }
        if self.lat_aliases.is_empty() {
            problems.push("no latitude aliases");
        }
        if self.lon_aliases.is_empty() {
            problems.push("no longitude aliases");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }

    fn lat_refs(&self) -> Vec<&str> {
        self.lat_aliases.iter().map(String::as_str).collect()
    }

    fn lon_refs(&self) -> Vec<&str> {
        self.lon_aliases.iter().map(String::as_str).collect()
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// The latitude/longitude axes of a model grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Latitude axis, in file order.
    pub lat: Vec<f64>,
    /// Longitude axis, in file order.
    pub lon: Vec<f64>,
}

/// The daily series of the grid box nearest to a requested location.
#[derive(Debug, Clone)]
pub struct PointSeries {
    values: Vec<f64>,
    lat_index: usize,
    lon_index: usize,
    lat: f64,
    lon: f64,
}

impl PointSeries {
    /// Daily values, concatenated over all input files.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Grid indices `(lat_index, lon_index)` of the selected box.
    pub fn indices(&self) -> (usize, usize) {
        (self.lat_index, self.lon_index)
    }

    /// Grid coordinates of the selected box.
    pub fn grid_coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read the variable's full field from `paths`, concatenated along time in
/// the given order. Fill values become `NaN`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for an empty path list or invalid
/// configuration, [`IoError::Map`] if the files are on different grids, and
/// [`IoError::InvalidLength`] if the total time length is not a whole number
/// of years.
pub fn read_field<P: AsRef<Path>>(paths: &[P], config: &ReaderConfig) -> Result<Field, IoError> {
    config.validate()?;
    require_files(paths)?;

    let mut parts = Vec::with_capacity(paths.len());
    let mut previous: Option<TimeAxis> = None;
    for path in paths {
        let path = path.as_ref();
        let file = netcdf_read::open_file(path)?;
        let lats = netcdf_read::read_1d_f64(&file, &config.lat_refs(), path)?;
        let lons = netcdf_read::read_1d_f64(&file, &config.lon_refs(), path)?;
        let values = netcdf_read::read_3d_f64(&file, &config.variable, path)?;
        check_time(&file, config, path, &mut previous)?;
        debug!(path = %path.display(), shape = ?values.dim(), "read field part");
        parts.push(Field::new(values, lats, lons)?);
    }

    let field = Field::concat_time(parts)?;
    check_length(field.n_time())?;
    info!(
        n_files = paths.len(),
        n_time = field.n_time(),
        n_lat = field.n_lat(),
        n_lon = field.n_lon(),
        variable = %config.variable,
        "field loaded"
    );
    Ok(field)
}

/// Read the series of the grid box nearest to `at` from `paths`,
/// concatenated along time. The box is chosen on the first file's grid.
///
/// # Errors
///
/// Same as [`read_field`].
pub fn read_point_series<P: AsRef<Path>>(
    paths: &[P],
    config: &ReaderConfig,
    at: Coordinates,
) -> Result<PointSeries, IoError> {
    config.validate()?;
    require_files(paths)?;

    let mut values = Vec::new();
    let mut selected: Option<(usize, usize, f64, f64)> = None;
    let mut previous: Option<TimeAxis> = None;
    for path in paths {
        let path = path.as_ref();
        let file = netcdf_read::open_file(path)?;
        let (i, j, lat, lon) = match selected {
            Some(s) => s,
            None => {
                let lats = netcdf_read::read_1d_f64(&file, &config.lat_refs(), path)?;
                let lons = netcdf_read::read_1d_f64(&file, &config.lon_refs(), path)?;
                let (i, j) = grid_indices(&lats, &lons, at, config.normalize_lon)?;
                debug!(
                    lat_index = i,
                    lon_index = j,
                    lat = lats[i],
                    lon = lons[j],
                    "nearest grid box"
                );
                let s = (i, j, lats[i], lons[j]);
                selected = Some(s);
                s
            }
        };
        values.extend(netcdf_read::read_point_f64(&file, &config.variable, path, i, j)?);
        check_time(&file, config, path, &mut previous)?;
    }

    check_length(values.len())?;
    let (lat_index, lon_index, lat, lon) = selected.ok_or_else(|| IoError::Validation {
        count: 1,
        details: "no input files".to_string(),
    })?;
    Ok(PointSeries {
        values,
        lat_index,
        lon_index,
        lat,
        lon,
    })
}

/// Read the grid axes from the first of `paths`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for an empty path list, or the error of
/// opening the file or reading its coordinates.
pub fn read_mesh<P: AsRef<Path>>(paths: &[P], config: &ReaderConfig) -> Result<Mesh, IoError> {
    config.validate()?;
    require_files(paths)?;
    let path = paths[0].as_ref();
    let file = netcdf_read::open_file(path)?;
    Ok(Mesh {
        lat: netcdf_read::read_1d_f64(&file, &config.lat_refs(), path)?,
        lon: netcdf_read::read_1d_f64(&file, &config.lon_refs(), path)?,
    })
}

fn require_files<P>(paths: &[P]) -> Result<(), IoError> {
    if paths.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "no input files".to_string(),
        });
    }
    Ok(())
}

fn check_length(n_time: usize) -> Result<(), IoError> {
    if n_time == 0 || n_time % DAYS_PER_YEAR != 0 {
        return Err(IoError::InvalidLength { len: n_time });
    }
    Ok(())
}

/// Logs the file's time span and warns about calendars with leap days or
/// files that do not follow the previous one in time.
fn check_time(
    file: &netcdf::File,
    config: &ReaderConfig,
    path: &Path,
    previous: &mut Option<TimeAxis>,
) -> Result<(), IoError> {
    let Some(axis) = netcdf_read::read_time_axis(file, &config.time_var)? else {
        debug!(path = %path.display(), "no time variable");
        return Ok(());
    };

    debug!(
        path = %path.display(),
        calendar = %axis.calendar,
        first = ?axis.first_date(),
        last = ?axis.last_date(),
        "time axis"
    );
    if !axis.is_365_day() {
        warn!(
            path = %path.display(),
            calendar = %axis.calendar,
            "calendar has leap days; series is treated as 365-day years"
        );
    }
    if let Some(prev) = previous.as_ref()
        && let (Some(end), Some(start)) = (prev.last_date(), axis.first_date())
        && start <= end
    {
        warn!(
            path = %path.display(),
            %start,
            previous_end = %end,
            "file does not follow the previous one in time"
        );
    }
    *previous = Some(axis);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.variable, "rsds");
        assert_eq!(cfg.lat_aliases, vec!["lat", "latitude", "y"]);
        assert_eq!(cfg.lon_aliases, vec!["lon", "longitude", "x"]);
        assert_eq!(cfg.time_var, "time");
        assert!(cfg.normalize_lon);
    }

    #[test]
    fn builder_methods() {
        let cfg = ReaderConfig::default()
            .with_variable("tas")
            .with_lat_aliases(vec!["nav_lat".into()])
            .with_lon_aliases(vec!["nav_lon".into()])
            .with_time_var("t")
            .with_normalize_lon(false);
        assert_eq!(cfg.variable(), "tas");
        assert_eq!(cfg.lat_refs(), vec!["nav_lat"]);
        assert_eq!(cfg.lon_refs(), vec!["nav_lon"]);
        assert_eq!(cfg.time_var, "t");
        assert!(!cfg.normalize_lon());
    }

    #[test]
    fn validate_collects_problems() {
        let cfg = ReaderConfig::default()
            .with_variable("")
            .with_lat_aliases(Vec::new());
        match cfg.validate().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("variable"));
                assert!(details.contains("latitude"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn empty_path_list_rejected() {
        let paths: [&Path; 0] = [];
        let err = read_field(&paths, &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }

    #[test]
    fn check_length_rules() {
        assert!(check_length(730).is_ok());
        assert!(matches!(check_length(0), Err(IoError::InvalidLength { len: 0 })));
        assert!(matches!(check_length(1000), Err(IoError::InvalidLength { len: 1000 })));
    }
}
