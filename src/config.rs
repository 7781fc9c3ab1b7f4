use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level SRE configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SreToml {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Event detection settings.
    #[serde(default)]
    pub events: EventsToml,

    /// Grid map settings.
    #[serde(default)]
    pub map: MapToml,

    /// PV conversion settings.
    #[serde(default)]
    pub pv: PvToml,

    /// Named locations, looked up case-insensitively.
    #[serde(default)]
    pub locations: BTreeMap<String, LocationToml>,

    /// Climate models and their NetCDF files, in time order.
    #[serde(default)]
    pub models: Vec<ModelToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_lat_aliases")]
    pub lat_aliases: Vec<String>,
    #[serde(default = "default_lon_aliases")]
    pub lon_aliases: Vec<String>,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_true")]
    pub normalize_lon: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            variable: default_variable(),
            lat_aliases: default_lat_aliases(),
            lon_aliases: default_lon_aliases(),
            time_var: default_time_var(),
            normalize_lon: true,
            output_dir: default_output_dir(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_variable() -> String {
    "rsds".to_string()
}
fn default_lat_aliases() -> Vec<String> {
    vec!["lat".to_string(), "latitude".to_string(), "y".to_string()]
}
fn default_lon_aliases() -> Vec<String> {
    vec!["lon".to_string(), "longitude".to_string(), "x".to_string()]
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

/// Either the keyword `"all"` or an explicit list of percentiles.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PercentilesToml {
    Keyword(String),
    List(Vec<u8>),
}

impl Default for PercentilesToml {
    fn default() -> Self {
        PercentilesToml::Keyword("all".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsToml {
    #[serde(default)]
    pub percentiles: PercentilesToml,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Include the per-event listing in analysis output.
    #[serde(default)]
    pub list_events: bool,
}

impl Default for EventsToml {
    fn default() -> Self {
        Self {
            percentiles: PercentilesToml::default(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            list_events: false,
        }
    }
}

fn default_min_length() -> usize {
    3
}
fn default_max_length() -> usize {
    16
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapToml {
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for MapToml {
    fn default() -> Self {
        Self {
            parallel: true,
            progress_interval: default_progress_interval(),
        }
    }
}

fn default_progress_interval() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PvToml {
    #[serde(default = "default_tilt")]
    pub tilt: f64,
    #[serde(default = "default_azimuth")]
    pub azimuth: f64,
    #[serde(default = "default_tracking")]
    pub tracking: String,
    #[serde(default = "default_capacity_w")]
    pub capacity_w: f64,
    #[serde(default = "default_performance_ratio")]
    pub performance_ratio: f64,
}

impl Default for PvToml {
    fn default() -> Self {
        Self {
            tilt: default_tilt(),
            azimuth: default_azimuth(),
            tracking: default_tracking(),
            capacity_w: default_capacity_w(),
            performance_ratio: default_performance_ratio(),
        }
    }
}

fn default_tilt() -> f64 {
    35.0
}
fn default_azimuth() -> f64 {
    180.0
}
fn default_tracking() -> String {
    "fixed".to_string()
}
fn default_capacity_w() -> f64 {
    1000.0
}
fn default_performance_ratio() -> f64 {
    0.8
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationToml {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl SreToml {
    /// Looks up a configured model by name.
    pub fn model(&self, name: &str) -> Option<&ModelToml> {
        self.models.iter().find(|m| m.name == name)
    }
}
