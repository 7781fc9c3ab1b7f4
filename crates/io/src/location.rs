//! Location lookup and nearest-gridpoint selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, in degrees north.
    pub lat: f64,
    /// Longitude, in degrees east.
    pub lon: f64,
}

impl Coordinates {
    /// Creates a position from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Resolves a place name to coordinates.
pub trait LocationResolver {
    /// # Errors
    ///
    /// Returns [`IoError::UnknownLocation`] if the name cannot be resolved.
    fn resolve(&self, name: &str) -> Result<Coordinates, IoError>;
}

/// A fixed table of named locations. Lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: BTreeMap<String, Coordinates>,
}

impl Gazetteer {
    /// Creates an empty gazetteer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: &str, at: Coordinates) {
        self.entries.insert(name.to_lowercase(), at);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_location(mut self, name: &str, at: Coordinates) -> Self {
        self.insert(name, at);
        self
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no location is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known names, lowercased and sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<(S, Coordinates)> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (S, Coordinates)>>(iter: I) -> Self {
        let mut g = Gazetteer::new();
        for (name, at) in iter {
            g.insert(name.as_ref(), at);
        }
        g
    }
}

impl LocationResolver for Gazetteer {
    fn resolve(&self, name: &str) -> Result<Coordinates, IoError> {
        self.entries
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| IoError::UnknownLocation {
                name: name.to_string(),
            })
    }
}

/// Maps a longitude into `[0, 360)`.
pub fn normalize_lon(lon: f64) -> f64 {
    lon.rem_euclid(360.0)
}

/// Index of the coordinate closest to `target`; the first one on ties.
///
/// `NaN` coordinates are never selected. Returns `None` if no coordinate is
/// finite.
pub fn nearest_index(coords: &[f64], target: f64) -> Option<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &c)| {
            let d = (c - target).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            }
        })
        .map(|(i, _)| i)
}

/// `(lat_index, lon_index)` of the grid box nearest to `at`.
///
/// With `normalize` the target longitude is mapped into `[0, 360)` first,
/// for grids whose longitudes run from 0 to 360.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if either coordinate vector has no finite
/// value.
pub fn grid_indices(
    lats: &[f64],
    lons: &[f64],
    at: Coordinates,
    normalize: bool,
) -> Result<(usize, usize), IoError> {
    let lon = if normalize { normalize_lon(at.lon) } else { at.lon };
    let lat_index = nearest_index(lats, at.lat).ok_or_else(|| IoError::Validation {
        count: 1,
        details: "latitude axis has no finite values".to_string(),
    })?;
    let lon_index = nearest_index(lons, lon).ok_or_else(|| IoError::Validation {
        count: 1,
        details: "longitude axis has no finite values".to_string(),
    })?;
    Ok((lat_index, lon_index))
}
