use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::models::{CompanyVisit, DailyActivityCount, JobRecord, Stage};

#[derive(Deserialize)]
struct JobRow {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(alias = "company_name")]
    company: String,
    #[serde(alias = "title")]
    position: String,
    #[serde(default)]
    status: Stage,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON in {}", path.display()))
        }
        Some("csv") => {
            let mut reader = csv::Reader::from_path(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let mut rows = Vec::new();
            for (index, result) in reader.deserialize::<T>().enumerate() {
                let row = result
                    .with_context(|| format!("invalid row {} in {}", index + 1, path.display()))?;
                rows.push(row);
            }
            Ok(rows)
        }
        _ => bail!(
            "unsupported input format for {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Loads job records. Rows without an id get a fresh one.
pub fn load_jobs(path: &Path) -> anyhow::Result<Vec<JobRecord>> {
    let rows: Vec<JobRow> = read_rows(path)?;
    let jobs: Vec<JobRecord> = rows
        .into_iter()
        .map(|row| JobRecord {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            company: row.company,
            position: row.position,
            status: row.status,
            created_at: row.created_at.filter(|value| !value.trim().is_empty()),
            url: row.url,
            location: row.location,
        })
        .collect();

    info!(count = jobs.len(), path = %path.display(), "loaded job records");
    Ok(jobs)
}

pub fn load_activity(path: &Path) -> anyhow::Result<Vec<DailyActivityCount>> {
    let days: Vec<DailyActivityCount> = read_rows(path)?;
    info!(count = days.len(), path = %path.display(), "loaded daily activity");
    Ok(days)
}

pub fn load_visits(path: &Path) -> anyhow::Result<Vec<CompanyVisit>> {
    let visits: Vec<CompanyVisit> = read_rows(path)?;
    info!(count = visits.len(), path = %path.display(), "loaded company visits");
    Ok(visits)
}
