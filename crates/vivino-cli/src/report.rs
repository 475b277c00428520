//! Run report persistence.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use vivino_scraper::RunReport;

/// `vivino-output-<timestamp>.json`, where the timestamp is the UTC ISO-8601
/// instant with millisecond precision and `:`/`.` replaced by `-` so the name
/// is valid on every filesystem.
pub(crate) fn report_filename(at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("vivino-output-{stamp}.json")
}

/// Writes `report` as pretty-printed JSON into `dir` and returns the path.
///
/// The directory must already exist.
pub(crate) fn write_report(
    dir: &Path,
    report: &RunReport,
    at: DateTime<Utc>,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(report_filename(at));
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(path)
}
