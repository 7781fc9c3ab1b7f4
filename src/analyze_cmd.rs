//! Analyze command: event detection on extracted series, summarised as JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, info_span};

use sre_events::{Direction, Event, PercentileRecord, SreEngine, SreOutput};
use sre_io::{read_series, write_json};
use sre_stats::nan_mean;

use crate::cli::AnalyzeArgs;
use crate::convert;

#[derive(Debug, Serialize)]
struct ModelSummary {
    n_years: usize,
    min_length: usize,
    max_length: usize,
    percentiles: Vec<PercentileSummary>,
}

#[derive(Debug, Serialize)]
struct PercentileSummary {
    percentile: u8,
    direction: Direction,
    /// Mean of the 365 calendar-day thresholds.
    threshold_mean: f64,
    exceedance_days: usize,
    n_events: i64,
    /// Counts indexed by duration in days.
    durations: Vec<i64>,
    seasons: BTreeMap<&'static str, Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<EventSummary>>,
}

#[derive(Debug, Serialize)]
struct EventSummary {
    #[serde(flatten)]
    event: Event,
    mean: f64,
    /// Mean departure from the daily threshold.
    anomaly: f64,
}

/// Run the analysis pipeline.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();
    let config = crate::load_config(&args.config)?;
    let sre_cfg = convert::build_sre_config(&config.events, args.percentiles.as_deref())?;
    let engine = SreEngine::new(sre_cfg).context("invalid event configuration")?;
    let list_events = args.events || config.events.list_events;

    info!(path = %args.input.display(), "reading series");
    let mut series = read_series(&args.input)
        .with_context(|| format!("failed to read Parquet: {}", args.input.display()))?;
    if !args.model.is_empty() {
        if let Some(missing) = args.model.iter().find(|m| !series.contains_key(*m)) {
            bail!(
                "model {missing:?} not found in {} (available: {:?})",
                args.input.display(),
                series.keys().collect::<Vec<_>>()
            );
        }
        series.retain(|name, _| args.model.contains(name));
    }
    if series.is_empty() {
        bail!("no series found in {}", args.input.display());
    }

    let mut report = BTreeMap::new();
    for (model, values) in &series {
        let _span = info_span!("model", name = %model).entered();
        let output = engine
            .run(values)
            .with_context(|| format!("event detection failed for model {model:?}"))?;
        let summary = summarise(&output, values, list_events)?;
        info!(
            n_years = summary.n_years,
            n_percentiles = summary.percentiles.len(),
            "model analysed"
        );
        report.insert(model.clone(), summary);
    }

    let output = args.output.unwrap_or_else(|| default_output(&config.io.output_dir, &args.input));
    crate::ensure_parent(&output)?;
    write_json(&output, &report)
        .with_context(|| format!("failed to write JSON: {}", output.display()))?;
    info!(path = %output.display(), n_models = report.len(), "analysis written");

    Ok(())
}

fn summarise(output: &SreOutput, series: &[f64], list_events: bool) -> Result<ModelSummary> {
    let percentiles = output
        .iter()
        .map(|(_, record)| summarise_percentile(record, series, list_events))
        .collect::<Result<Vec<_>>>()?;
    Ok(ModelSummary {
        n_years: output.n_years(),
        min_length: output.min_length(),
        max_length: output.max_length(),
        percentiles,
    })
}

fn summarise_percentile(
    record: &PercentileRecord,
    series: &[f64],
    list_events: bool,
) -> Result<PercentileSummary> {
    let totals = record.duration_totals();
    let seasons = record
        .seasonal_counts()
        .into_iter()
        .map(|(season, counts)| (season.name(), counts.into_vec()))
        .collect();

    let events = if list_events {
        let means = record.event_means(series)?;
        let anomalies = record.event_anomalies(series)?;
        let listed: Vec<EventSummary> = record
            .events()
            .into_iter()
            .zip(means.into_iter().zip(anomalies))
            .map(|(event, (mean, anomaly))| EventSummary {
                event,
                mean,
                anomaly,
            })
            .collect();
        Some(listed)
    } else {
        None
    };

    debug!(
        percentile = record.percentile(),
        n_events = totals.n_events(),
        "percentile summarised"
    );
    Ok(PercentileSummary {
        percentile: record.percentile(),
        direction: record.direction(),
        threshold_mean: nan_mean(record.thresholds_one_year()),
        exceedance_days: record.n_exceedance_days(),
        n_events: totals.n_events(),
        durations: totals.into_vec(),
        seasons,
        events,
    })
}

fn default_output(dir: &std::path::Path, input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());
    dir.join(format!("{stem}.analysis.json"))
}
