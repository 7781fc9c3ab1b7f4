//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use sre_events::{PercentileSet, SreConfig};
use sre_io::{Compression, Coordinates, Gazetteer, ModelSource, ReaderConfig, WriterConfig};
use sre_pv::{PanelConfig, PerformanceRatioModel, Tracking};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses a tracking mode, accepting either its name or the numeric code
/// (`0` fixed, `1` single axis, `2` dual axis).
pub fn parse_tracking(s: &str) -> Result<Tracking> {
    let s = s.trim().to_lowercase();
    if let Ok(code) = s.parse::<u8>() {
        return Ok(Tracking::try_from(code)?);
    }
    match s.as_str() {
        "fixed" => Ok(Tracking::Fixed),
        "single_axis" | "single-axis" => Ok(Tracking::SingleAxis),
        "dual_axis" | "dual-axis" => Ok(Tracking::DualAxis),
        other => bail!("unknown tracking mode: {other:?}"),
    }
}

/// Converts the TOML percentile selection into a `PercentileSet`.
pub fn parse_percentiles(p: &PercentilesToml) -> Result<PercentileSet> {
    match p {
        PercentilesToml::Keyword(k) if k.eq_ignore_ascii_case("all") => Ok(PercentileSet::All),
        PercentilesToml::Keyword(k) => bail!("percentiles must be a list or \"all\", got {k:?}"),
        PercentilesToml::List(list) => Ok(PercentileSet::List(list.clone())),
    }
}

/// Parses a comma-separated CLI percentile override such as `"5,95"`.
pub fn parse_percentile_list(s: &str) -> Result<PercentileSet> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(PercentileSet::All);
    }
    let list = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<u8>()
                .map_err(|e| anyhow::anyhow!("invalid percentile {p:?}: {e}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PercentileSet::List(list))
}

/// Builds a `ReaderConfig` from the `[io]` section.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_variable(&io.variable)
        .with_lat_aliases(io.lat_aliases.clone())
        .with_lon_aliases(io.lon_aliases.clone())
        .with_time_var(&io.time_var)
        .with_normalize_lon(io.normalize_lon);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a `WriterConfig` from the `[io]` section.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_compression(parse_compression(&io.compression)?)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an `SreConfig` from the `[events]` section, with an optional
/// percentile override from the command line.
pub fn build_sre_config(events: &EventsToml, percentiles: Option<&str>) -> Result<SreConfig> {
    let percentiles = match percentiles {
        Some(s) => parse_percentile_list(s)?,
        None => parse_percentiles(&events.percentiles)?,
    };
    let cfg = SreConfig::new()
        .with_percentiles(percentiles)
        .with_lengths(events.min_length, events.max_length);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the gazetteer from the `[locations]` table.
pub fn build_gazetteer(config: &SreToml) -> Gazetteer {
    config
        .locations
        .iter()
        .map(|(name, loc)| (name.as_str(), Coordinates::new(loc.lat, loc.lon)))
        .collect()
}

/// Converts the `[[models]]` entries, optionally restricted to `only`.
pub fn build_models(config: &SreToml, only: &[String]) -> Result<Vec<ModelSource>> {
    if config.models.is_empty() {
        bail!("no models configured: add at least one [[models]] entry");
    }
    if let Some(missing) = only.iter().find(|name| config.model(name).is_none()) {
        bail!("model {missing:?} is not configured");
    }
    Ok(config
        .models
        .iter()
        .filter(|m| only.is_empty() || only.contains(&m.name))
        .map(|m| ModelSource::new(&m.name, m.files.clone()))
        .collect())
}

/// Builds a `PanelConfig` from the `[pv]` section.
pub fn build_panel_config(pv: &PvToml) -> Result<PanelConfig> {
    let panel = PanelConfig::default()
        .with_tilt(pv.tilt)
        .with_azimuth(pv.azimuth)
        .with_tracking(parse_tracking(&pv.tracking)?)
        .with_capacity_w(pv.capacity_w);
    panel.validate()?;
    Ok(panel)
}

/// Builds the baseline PV model from the `[pv]` section.
pub fn build_pv_model(pv: &PvToml) -> Result<PerformanceRatioModel> {
    Ok(PerformanceRatioModel::new(pv.performance_ratio)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SreToml {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");
        let sre = build_sre_config(&config.events, None).unwrap();
        assert_eq!(sre, SreConfig::new());
        assert_eq!(config.io.variable, "rsds");
        assert!(config.map.parallel);
        assert!(build_writer_config(&config.io).is_ok());
    }

    #[test]
    fn percentiles_accept_list_or_all() {
        let config = parse("[events]\npercentiles = [95, 5]\nmax_length = 10\n");
        let sre = build_sre_config(&config.events, None).unwrap();
        assert_eq!(sre.percentiles(), &PercentileSet::List(vec![95, 5]));
        assert_eq!(sre.max_length(), 10);

        let config = parse("[events]\npercentiles = \"ALL\"\n");
        let sre = build_sre_config(&config.events, None).unwrap();
        assert_eq!(sre.percentiles(), &PercentileSet::All);

        let config = parse("[events]\npercentiles = \"some\"\n");
        assert!(build_sre_config(&config.events, None).is_err());
    }

    #[test]
    fn cli_percentiles_override_config() {
        let config = parse("[events]\npercentiles = [50]\n");
        let sre = build_sre_config(&config.events, Some("5, 95")).unwrap();
        assert_eq!(sre.percentiles(), &PercentileSet::List(vec![5, 95]));
        assert!(build_sre_config(&config.events, Some("5,x")).is_err());
        assert!(build_sre_config(&config.events, Some("0")).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<SreToml>("[events]\npercentile = [5]\n").is_err());
        assert!(toml::from_str::<SreToml>("[bogus]\n").is_err());
    }

    #[test]
    fn compression_and_tracking_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert!(parse_compression("gzip").is_err());
        assert_eq!(parse_tracking("dual_axis").unwrap(), Tracking::DualAxis);
        assert_eq!(parse_tracking("1").unwrap(), Tracking::SingleAxis);
        assert!(parse_tracking("7").is_err());
        assert!(parse_tracking("wobble").is_err());
    }

    #[test]
    fn gazetteer_and_models_from_tables() {
        let config = parse(
            r#"
[locations]
Zurich = { lat = 47.37, lon = 8.54 }

[[models]]
name = "CESM2"
files = ["a.nc", "b.nc"]

[[models]]
name = "MIROC6"
files = ["c.nc"]
"#,
        );
        let g = build_gazetteer(&config);
        assert_eq!(g.len(), 1);

        let all = build_models(&config, &[]).unwrap();
        assert_eq!(all.len(), 2);
        let one = build_models(&config, &["MIROC6".to_string()]).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].files.len(), 1);
        assert!(build_models(&config, &["NOPE".to_string()]).is_err());
    }

    #[test]
    fn pv_section_builds_panel_and_model() {
        let config = parse("[pv]\ntracking = \"single_axis\"\nperformance_ratio = 0.75\n");
        let panel = build_panel_config(&config.pv).unwrap();
        assert_eq!(panel.tracking(), Tracking::SingleAxis);
        let model = build_pv_model(&config.pv).unwrap();
        assert_eq!(model.performance_ratio(), 0.75);

        let bad = parse("[pv]\nperformance_ratio = 1.5\n");
        assert!(build_pv_model(&bad.pv).is_err());
    }
}
