//! Flat export of suite results: per-trial CSVs, combined CSV/JSON tables, a
//! README and a ZIP bundle of the lot.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use indexmap::IndexSet;
use tracing::info;
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::trials::{MetricValue, SuiteResults, TrialId, TrialMetrics};

pub const MASTER_CSV: &str = "HL_v4_1_full_metrics.csv";
pub const MASTER_JSON: &str = "HL_v4_1_full_metrics.json";
pub const README: &str = "README.txt";

/// Where an export landed.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub results_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub archive: Option<PathBuf>,
}

/// Write every artefact for `results` into `results_dir`, optionally bundling
/// the folder into a sibling `<results_dir>.zip`.
pub fn export(
    results: &SuiteResults,
    results_dir: &Path,
    seed: u64,
    archive: bool,
) -> Result<ExportSummary> {
    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("creating results dir {}", results_dir.display()))?;

    let mut files = Vec::new();
    for (id, metrics) in results {
        files.push(write_trial_csv(results_dir, *id, metrics)?);
    }
    files.push(write_master_csv(results_dir, results)?);
    files.push(write_master_json(results_dir, results)?);
    files.push(write_readme(results_dir, results, seed)?);

    let archive = if archive {
        Some(bundle_archive(results_dir)?)
    } else {
        None
    };

    Ok(ExportSummary {
        results_dir: results_dir.to_path_buf(),
        files,
        archive,
    })
}

/// `metric,value` rows; nested tables flattened as `name.key`.
pub fn flatten_metrics(metrics: &TrialMetrics) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (name, value) in metrics.iter() {
        match value {
            MetricValue::Table(table) => {
                for (key, count) in table {
                    rows.push((format!("{name}.{key}"), count.to_string()));
                }
            }
            scalar => rows.push((name.clone(), scalar.to_string())),
        }
    }
    rows
}

pub fn write_trial_csv(dir: &Path, id: TrialId, metrics: &TrialMetrics) -> Result<PathBuf> {
    let path = dir.join(format!("{}_results.csv", id.file_stem()));
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["metric", "value"])?;
    for (metric, value) in flatten_metrics(metrics) {
        writer.write_record([metric, value])?;
    }
    writer.flush()?;
    info!(path = %path.display(), trial = %id, "wrote trial metrics");
    Ok(path)
}

/// One row per trial; columns are the union of metric names in first-seen
/// order, nested tables JSON-encoded, missing cells empty.
pub fn write_master_csv(dir: &Path, results: &SuiteResults) -> Result<PathBuf> {
    let path = dir.join(MASTER_CSV);
    let columns: IndexSet<&String> = results.values().flat_map(|m| m.keys()).collect();

    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    let mut header = vec!["Trial ID".to_string()];
    header.extend(columns.iter().map(|c| c.to_string()));
    writer.write_record(&header)?;

    for (id, metrics) in results {
        let mut row = vec![id.code().to_string()];
        for column in &columns {
            row.push(
                metrics
                    .get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), trials = results.len(), "wrote combined metrics csv");
    Ok(path)
}

pub fn write_master_json(dir: &Path, results: &SuiteResults) -> Result<PathBuf> {
    let path = dir.join(MASTER_JSON);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, results)
        .with_context(|| format!("serialise {}", path.display()))?;
    info!(path = %path.display(), "wrote combined metrics json");
    Ok(path)
}

pub fn write_readme(dir: &Path, results: &SuiteResults, seed: u64) -> Result<PathBuf> {
    let path = dir.join(README);
    let mut text = String::new();
    text.push_str("HeartLink 4.1 (ASE 1.3 Clinical-Lock) - Full Trial Results\n");
    text.push_str("==========================================================\n");
    text.push_str(&format!("Generated: {}\n", Utc::now().to_rfc2822()));
    text.push_str(&format!("Seed: {seed}\n\nTrials:\n"));
    for id in results.keys() {
        text.push_str(&format!("- {} {}\n", id.code(), id.title()));
    }
    text.push_str("\nFiles:\n");
    for id in results.keys() {
        text.push_str(&format!(
            "- {}_results.csv  (per-trial metric summary)\n",
            id.file_stem()
        ));
    }
    text.push_str(&format!("- {MASTER_CSV} / {MASTER_JSON}  (combined summary tables)\n"));
    text.push_str(&format!("- {README}\n"));
    text.push_str("\nNotes:\n");
    text.push_str("- Metrics include 95% Wilson confidence intervals where applicable.\n");
    text.push_str("- All data are synthetic and intended for validation/comparison only.\n");

    std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Deflate every regular file directly inside `dir` into `<dir>.zip`, in
/// file-name order.
pub fn bundle_archive(dir: &Path) -> Result<PathBuf> {
    let stem = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    let archive_path = dir.with_file_name(format!("{stem}.zip"));

    let file = File::create(&archive_path)
        .with_context(|| format!("create archive {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = std::fs::read(entry.path())
            .with_context(|| format!("read {}", entry.path().display()))?;
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
        entries += 1;
    }
    zip.finish()?;

    info!(path = %archive_path.display(), entries, "wrote results archive");
    Ok(archive_path)
}
