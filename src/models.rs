use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed set of tracked platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Linkedin,
    Instagram,
    Beehiiv,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Youtube,
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Beehiiv,
        Platform::Tiktok,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Beehiiv => "beehiiv",
            Platform::Tiktok => "tiktok",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Linkedin => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Beehiiv => "Beehiiv",
            Platform::Tiktok => "TikTok",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Platform::Youtube => "▶",
            Platform::Linkedin => "◼",
            Platform::Instagram => "◉",
            Platform::Beehiiv => "✉",
            Platform::Tiktok => "♪",
        }
    }

    pub fn parse(key: &str) -> Option<Platform> {
        Platform::ALL.iter().copied().find(|p| p.key() == key)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Youtube
    }
}

/// Display name for a platform key that may not be one of the fixed five.
pub fn platform_label(key: &str) -> String {
    match Platform::parse(key) {
        Some(p) => p.display_name().to_string(),
        None => key.to_string(),
    }
}

/// One calendar day's captured metrics across all platforms.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DailySnapshot {
    pub date: String,
    #[serde(default)]
    pub platforms: PlatformDays,
}

/// Per-platform sections of a daily snapshot. A platform whose ingestion
/// job has not run yet is simply absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformDays {
    pub youtube: Option<YoutubeDay>,
    pub linkedin: Option<LinkedinDay>,
    pub instagram: Option<InstagramDay>,
    pub beehiiv: Option<BeehiivDay>,
    pub tiktok: Option<TiktokDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct YoutubeDay {
    pub views: Option<f64>,
    pub watch_hours: Option<f64>,
    pub subscribers_total: Option<f64>,
    pub subscribers_gained: Option<f64>,
    pub ctr: Option<f64>,
    pub avg_view_duration: Option<f64>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
    pub top_video: Option<TopVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopVideo {
    pub title: String,
    pub views: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkedinDay {
    pub impressions: Option<f64>,
    pub engagements: Option<f64>,
    pub followers_total: Option<f64>,
    pub engagement_rate: Option<f64>,
    pub profile_views: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstagramDay {
    pub reach: Option<f64>,
    pub engagements: Option<f64>,
    pub followers_total: Option<f64>,
    pub engagement_rate: Option<f64>,
    pub stories_views: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BeehiivDay {
    pub subscribers_total: Option<f64>,
    pub subscribers_gained: Option<f64>,
    pub unsubscribes: Option<f64>,
    pub emails_sent: Option<f64>,
    pub open_rate: Option<f64>,
    pub click_rate: Option<f64>,
    pub web_views: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TiktokDay {
    pub views: Option<f64>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
    pub followers_total: Option<f64>,
    pub avg_watch_time: Option<f64>,
}

/// 90-day consolidated trend data, date-aligned per platform.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RollingSeries {
    #[serde(default)]
    pub platforms: BTreeMap<Platform, PlatformSeries>,
}

/// Parallel arrays: every metric vector has the same length as `dates`.
/// Points may be null where a day's ingestion missed that metric.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Vec<Option<f64>>>,
}

impl PlatformSeries {
    pub fn metric(&self, key: &str) -> Option<&[Option<f64>]> {
        self.metrics.get(key).map(|v| v.as_slice())
    }
}

/// Synthesized narrative report for one calendar week.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeeklyReport {
    #[serde(default)]
    pub range: WeekRange,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub concerns: Vec<Concern>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub platform_scores: BTreeMap<String, PlatformScore>,
    #[serde(default)]
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeekRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Highlight {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub context: String,
}

impl Highlight {
    /// Value as display text; strings render without surrounding quotes.
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Concern {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub issue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformScore {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub note: String,
}

/// A single published piece of content with its latest counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub latest: ContentCounts,
    #[serde(default)]
    pub snapshots: BTreeMap<String, ContentCounts>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentCounts {
    pub views: Option<f64>,
    pub impressions: Option<f64>,
    pub opens: Option<f64>,
    pub likes: Option<f64>,
    pub reactions: Option<f64>,
    pub comments: Option<f64>,
    pub shares: Option<f64>,
    pub saves: Option<f64>,
}

impl ContentCounts {
    /// First present of views/impressions/opens. Which field exists depends
    /// on the platform the piece was published to.
    pub fn primary_metric(&self) -> Option<f64> {
        self.views.or(self.impressions).or(self.opens)
    }

    /// Likes (or reactions where the platform has no likes) plus comments,
    /// shares and saves, each defaulting to zero.
    pub fn engagement(&self) -> f64 {
        self.likes.or(self.reactions).unwrap_or(0.0)
            + self.comments.unwrap_or(0.0)
            + self.shares.unwrap_or(0.0)
            + self.saves.unwrap_or(0.0)
    }
}

impl ContentItem {
    pub fn snapshot_24h(&self) -> Option<f64> {
        self.snapshots.get("24h").and_then(|s| s.primary_metric())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Unknown => "unknown",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "🔵",
            Severity::Unknown => "⚪",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub triggered_at: String,
}
