//! Panel and site description.

use serde::{Deserialize, Serialize};

use crate::error::PvError;

/// How the panel follows the sun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
    /// Fixed tilt and azimuth.
    #[default]
    Fixed,
    /// Rotation about one axis.
    SingleAxis,
    /// Full two-axis tracking.
    DualAxis,
}

impl TryFrom<u8> for Tracking {
    type Error = PvError;

    /// `0` fixed, `1` single axis, `2` dual axis.
    fn try_from(code: u8) -> Result<Self, PvError> {
        match code {
            0 => Ok(Tracking::Fixed),
            1 => Ok(Tracking::SingleAxis),
            2 => Ok(Tracking::DualAxis),
            _ => Err(PvError::InvalidTracking { code }),
        }
    }
}

/// Panel orientation and rating.
///
/// Defaults: tilt 35°, azimuth 180° (south-facing), fixed, 1000 W peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    tilt: f64,
    azimuth: f64,
    tracking: Tracking,
    capacity_w: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            tilt: 35.0,
            azimuth: 180.0,
            tracking: Tracking::Fixed,
            capacity_w: 1000.0,
        }
    }
}

impl PanelConfig {
    /// Sets the tilt from horizontal, in degrees.
    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    /// Sets the azimuth, in degrees clockwise from north.
    pub fn with_azimuth(mut self, azimuth: f64) -> Self {
        self.azimuth = azimuth;
        self
    }

    /// Sets the tracking mode.
    pub fn with_tracking(mut self, tracking: Tracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Sets the peak capacity, in watts.
    pub fn with_capacity_w(mut self, capacity_w: f64) -> Self {
        self.capacity_w = capacity_w;
        self
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn tracking(&self) -> Tracking {
        self.tracking
    }

    pub fn capacity_w(&self) -> f64 {
        self.capacity_w
    }

    /// Validates the panel parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PvError::InvalidParameter`] for a tilt outside `0..=90`, an
    /// azimuth outside `0..360`, or a capacity that is not positive.
    pub fn validate(&self) -> Result<(), PvError> {
        if !(0.0..=90.0).contains(&self.tilt) {
            return Err(invalid("tilt", self.tilt, "must be within 0..=90"));
        }
        if !(0.0..360.0).contains(&self.azimuth) {
            return Err(invalid("azimuth", self.azimuth, "must be within 0..360"));
        }
        if !(self.capacity_w > 0.0) {
            return Err(invalid("capacity_w", self.capacity_w, "must be positive"));
        }
        Ok(())
    }
}

/// Where the panel stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Latitude, in degrees north.
    pub lat: f64,
    /// Longitude, in degrees east.
    pub lon: f64,
}

impl Site {
    /// Creates a site from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Checks that the site is on the globe.
    ///
    /// # Errors
    ///
    /// Returns [`PvError::InvalidParameter`] for a latitude outside
    /// `-90..=90` or a non-finite longitude.
    pub fn validate(&self) -> Result<(), PvError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid("lat", self.lat, "must be within -90..=90"));
        }
        if !self.lon.is_finite() {
            return Err(invalid("lon", self.lon, "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> PvError {
    PvError::InvalidParameter {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    }
}
