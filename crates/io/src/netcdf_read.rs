//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array3;
use netcdf::AttributeValue;

use crate::error::IoError;

/// Attributes whose values mark missing data.
const FILL_ATTRIBUTES: [&str; 2] = ["_FillValue", "missing_value"];

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

fn variable<'f>(
    file: &'f netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Dimension sizes `[nt, ny, nx]` of a 3-D variable.
fn dims_3d(var: &netcdf::Variable<'_>, var_name: &str) -> Result<[usize; 3], IoError> {
    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }
    Ok([dims[0].len(), dims[1].len(), dims[2].len()])
}

/// Values of the `_FillValue` and `missing_value` attributes, if any.
fn fill_values(var: &netcdf::Variable<'_>) -> Vec<f64> {
    FILL_ATTRIBUTES
        .iter()
        .filter_map(|name| var.attribute_value(name).and_then(Result::ok))
        .flat_map(|av| match av {
            AttributeValue::Double(v) => vec![v],
            AttributeValue::Float(v) => vec![f64::from(v)],
            AttributeValue::Doubles(v) => v,
            AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
            AttributeValue::Short(v) => vec![f64::from(v)],
            AttributeValue::Int(v) => vec![f64::from(v)],
            _ => Vec::new(),
        })
        .collect()
}

/// Replace every fill value with `NaN`.
pub(crate) fn mask_fill(values: &mut [f64], fills: &[f64]) {
    if fills.is_empty() {
        return;
    }
    for v in values.iter_mut() {
        if fills.contains(v) {
            *v = f64::NAN;
        }
    }
}

/// Read a whole 3-D `f64` variable as `time × lat × lon`, with fill values
/// replaced by `NaN`.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<Array3<f64>, IoError> {
    let var = variable(file, var_name, path)?;
    let [nt, ny, nx] = dims_3d(&var, var_name)?;

    let mut data = var.get_values::<f64, _>(..)?;
    mask_fill(&mut data, &fill_values(&var));

    Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Netcdf {
        reason: format!("{var_name}: {e}"),
    })
}

/// Read the time series of one grid box of a 3-D variable, with fill values
/// replaced by `NaN`.
pub(crate) fn read_point_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
    lat_index: usize,
    lon_index: usize,
) -> Result<Vec<f64>, IoError> {
    let var = variable(file, var_name, path)?;
    let [_, ny, nx] = dims_3d(&var, var_name)?;
    if lat_index >= ny {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} lat"),
            expected: lat_index + 1,
            got: ny,
        });
    }
    if lon_index >= nx {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} lon"),
            expected: lon_index + 1,
            got: nx,
        });
    }

    let mut data = var.get_values::<f64, _>((.., lat_index, lon_index))?;
    mask_fill(&mut data, &fill_values(&var));
    Ok(data)
}

/// A CF time axis: calendar name, reference date and day offsets.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TimeAxis {
    pub calendar: String,
    pub base_date: NaiveDate,
    pub offsets: Vec<f64>,
}

impl TimeAxis {
    /// Whether the calendar has no leap days.
    pub fn is_365_day(&self) -> bool {
        matches!(self.calendar.as_str(), "noleap" | "365_day")
    }

    /// Proleptic Gregorian date of the `i`-th offset, truncated to whole days.
    pub fn date(&self, i: usize) -> Option<NaiveDate> {
        let days = *self.offsets.get(i)? as i64;
        self.base_date
            .checked_add_signed(chrono::TimeDelta::days(days))
    }

    /// First date of the axis.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.date(0)
    }

    /// Last date of the axis.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.date(self.offsets.len().checked_sub(1)?)
    }
}

/// Read a time variable with its `units` and optional `calendar` attributes.
///
/// Returns `Ok(None)` if the file has no variable named `time_var`. Parses
/// CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"`; the calendar defaults to
/// `"standard"`.
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
) -> Result<Option<TimeAxis>, IoError> {
    let Some(var) = file.variable(time_var) else {
        return Ok(None);
    };

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let base_date = parse_units(&units_str)?;

    let calendar = var
        .attribute_value("calendar")
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| "standard".to_string());

    let offsets = var.get_values::<f64, _>(..)?;
    Ok(Some(TimeAxis {
        calendar,
        base_date,
        offsets,
    }))
}

/// Reference date of a `"days since ..."` units string.
fn parse_units(units: &str) -> Result<NaiveDate, IoError> {
    let parts: Vec<&str> = units.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }

    // Date portion only: "YYYY-MM-DD" may be followed by a time of day.
    let date_str = parts[2].split(['T', ' ']).next().unwrap_or(parts[2]);

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units_variants() {
        let d = parse_units("days since 1850-01-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1850, 1, 1).unwrap());
        let d = parse_units("days since 2000-06-15 00:00:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2000, 6, 15).unwrap());
        let d = parse_units("days since 0001-01-01T12:00:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
    }

    #[test]
    fn parse_units_rejects_other_formats() {
        assert!(matches!(
            parse_units("hours since 2000-01-01"),
            Err(IoError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse_units("days after 2000-01-01"),
            Err(IoError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse_units("days since yesterday"),
            Err(IoError::InvalidTime { .. })
        ));
    }

    #[test]
    fn mask_fill_replaces_matches() {
        let mut v = vec![1.0, 1e20, 2.0, -999.0];
        mask_fill(&mut v, &[1e20, -999.0]);
        assert_eq!(v[0], 1.0);
        assert!(v[1].is_nan());
        assert_eq!(v[2], 2.0);
        assert!(v[3].is_nan());
    }

    #[test]
    fn time_axis_dates() {
        let axis = TimeAxis {
            calendar: "noleap".to_string(),
            base_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            offsets: vec![0.5, 1.0, 10.0],
        };
        assert!(axis.is_365_day());
        assert_eq!(axis.first_date(), NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(axis.last_date(), NaiveDate::from_ymd_opt(2000, 1, 11));

        let empty = TimeAxis {
            offsets: Vec::new(),
            ..axis
        };
        assert_eq!(empty.last_date(), None);
    }
}
