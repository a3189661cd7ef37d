use crate::models::{Alert, ContentItem, DailySnapshot, RollingSeries, WeeklyReport};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Source of the dashboard's JSON documents. Every load is absent-tolerant:
/// a missing or unreadable document is logged and comes back as None/empty,
/// never as an error.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn daily_snapshot(&self, date: &str) -> Option<DailySnapshot>;
    async fn rolling_series(&self) -> Option<RollingSeries>;
    async fn weekly_report(&self, week_id: &str) -> Option<WeeklyReport>;
    async fn content_log(&self) -> Option<Vec<ContentItem>>;
    async fn alerts(&self) -> Option<Vec<Alert>>;
    async fn thresholds(&self) -> Option<serde_json::Value>;
    async fn available_weeks(&self) -> Vec<String>;

    /// Cheap reachability check used by the startup orchestration to tell an
    /// empty dataset apart from an unreachable one.
    async fn probe(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Reads snapshots from a data directory laid out by the ingestion jobs:
/// `daily/<date>.json`, `daily/rolling-90.json`, `weekly/<id>.json`,
/// `content/posts.json`, `alerts/active.json`, `config/thresholds.json`.
pub struct FsDataSource {
    base: PathBuf,
}

impl FsDataSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, rel: &str) -> Option<T> {
        let path = self.base.join(rel);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "document not present");
                return None;
            }
            Err(err) => {
                warn!(path = %path.display(), "failed to read document: {err}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), "failed to parse document: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl DataSource for FsDataSource {
    async fn daily_snapshot(&self, date: &str) -> Option<DailySnapshot> {
        self.read_json(&format!("daily/{date}.json")).await
    }

    async fn rolling_series(&self) -> Option<RollingSeries> {
        self.read_json("daily/rolling-90.json").await
    }

    async fn weekly_report(&self, week_id: &str) -> Option<WeeklyReport> {
        self.read_json(&format!("weekly/{week_id}.json")).await
    }

    async fn content_log(&self) -> Option<Vec<ContentItem>> {
        self.read_json("content/posts.json").await
    }

    async fn alerts(&self) -> Option<Vec<Alert>> {
        self.read_json("alerts/active.json").await
    }

    async fn thresholds(&self) -> Option<serde_json::Value> {
        self.read_json("config/thresholds.json").await
    }

    async fn available_weeks(&self) -> Vec<String> {
        let dir = self.base.join("weekly");
        let mut weeks = Vec::new();
        match fs::read_dir(&dir).await {
            Ok(mut entries) => {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if let Some(stem) = name.strip_suffix(".json") {
                        weeks.push(stem.to_string());
                    }
                }
            }
            Err(err) => {
                debug!(path = %dir.display(), "no weekly reports: {err}");
            }
        }
        // Newest week first.
        weeks.sort_by(|a, b| b.cmp(a));
        weeks
    }

    async fn probe(&self) -> Result<(), String> {
        if self.base.is_dir() {
            Ok(())
        } else {
            Err(format!("data directory {} not found", self.base.display()))
        }
    }
}

/// Fetch a batch of days concurrently. Days that fail to load are dropped;
/// the rest come back in the same (ascending) order they were requested in.
pub async fn load_days(source: &dyn DataSource, dates: &[String]) -> Vec<DailySnapshot> {
    let fetches = dates.iter().map(|d| source.daily_snapshot(d));
    join_all(fetches).await.into_iter().flatten().collect()
}

/// The trailing `count` calendar dates, ascending, inclusive of `end`.
pub fn date_range(count: usize, end: NaiveDate) -> Vec<String> {
    (0..count)
        .rev()
        .map(|offset| (end - Duration::days(offset as i64)).format("%Y-%m-%d").to_string())
        .collect()
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("data")
}
