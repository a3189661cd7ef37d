use crate::alerts::AlertService;
use crate::loader::{self, DataSource};
use crate::models::{Alert, ContentItem, DailySnapshot, Platform, RollingSeries, WeeklyReport};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

/// The shared state record. Views receive cloned snapshots of this; the live
/// record lives behind the store's lock and is only written through the
/// store's own entry points.
#[derive(Debug, Clone)]
pub struct AppState {
    pub today: Option<DailySnapshot>,
    pub yesterday: Option<DailySnapshot>,
    pub week_days: Vec<DailySnapshot>,
    pub rolling: Option<RollingSeries>,
    pub weekly_reports: BTreeMap<String, WeeklyReport>,
    pub content_log: Vec<ContentItem>,
    pub alerts: Vec<Alert>,
    pub available_weeks: Vec<String>,

    pub loading: bool,
    pub error: Option<String>,
    pub selected_week: Option<String>,
    pub selected_platform: Platform,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            today: None,
            yesterday: None,
            week_days: Vec::new(),
            rolling: None,
            weekly_reports: BTreeMap::new(),
            content_log: Vec::new(),
            alerts: Vec::new(),
            available_weeks: Vec::new(),
            loading: true,
            error: None,
            selected_week: None,
            selected_platform: Platform::default(),
        }
    }
}

/// Shallow-merge update for the UI-facing state fields. Data fields are only
/// written by the store's own load orchestration.
#[derive(Debug, Default)]
pub struct StatePatch {
    pub loading: Option<bool>,
    pub error: Option<Option<String>>,
    pub selected_week: Option<String>,
    pub selected_platform: Option<Platform>,
}

impl StatePatch {
    pub fn select_week(week_id: impl Into<String>) -> Self {
        Self {
            selected_week: Some(week_id.into()),
            ..Default::default()
        }
    }

    pub fn select_platform(platform: Platform) -> Self {
        Self {
            selected_platform: Some(platform),
            ..Default::default()
        }
    }

    fn apply(self, state: &mut AppState) {
        if let Some(loading) = self.loading {
            state.loading = loading;
        }
        if let Some(error) = self.error {
            state.error = error;
        }
        if let Some(week) = self.selected_week {
            state.selected_week = Some(week);
        }
        if let Some(platform) = self.selected_platform {
            state.selected_platform = platform;
        }
    }
}

/// Handle returned by `subscribe`, used to remove the callback again.
#[derive(Debug)]
pub struct Subscription(u64);

type Callback = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Owns the state record, the subscriber list, the alert cache, and the load
/// orchestration.
///
/// Notification is deferred-coalescing: a `set_state` issued from inside a
/// subscriber callback applies its update immediately but the resulting
/// notification is folded into one follow-up pass after the current pass
/// finishes, so the notify loop never re-enters itself.
pub struct Store {
    source: Arc<dyn DataSource>,
    alerts: AlertService,
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_id: AtomicU64,
    notifying: AtomicBool,
    pending: AtomicBool,
}

impl Store {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            alerts: AlertService::new(source.clone()),
            source,
            state: Mutex::new(AppState::default()),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            notifying: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state_lock().clone()
    }

    /// Merge UI fields into the record and notify subscribers.
    pub fn set_state(&self, patch: StatePatch) {
        patch.apply(&mut self.state_lock());
        self.notify();
    }

    pub fn subscribe(&self, callback: impl Fn(&AppState) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers_lock().push((id, Arc::new(callback)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers_lock().retain(|(id, _)| *id != subscription.0);
    }

    /// Startup load: the trailing 7 days, the rolling series, alerts and the
    /// content log are fetched concurrently; then the week list, with the
    /// newest week's report loaded eagerly. Individual fetch failures degrade
    /// to missing data; only an unreachable data root is recorded as an
    /// orchestration error. The loading flag completes its lifecycle and
    /// subscribers are notified on every exit path.
    pub async fn init_data(&self) {
        self.set_state(StatePatch {
            loading: Some(true),
            error: Some(None),
            ..Default::default()
        });

        let orchestration = self.source.probe().await;
        if let Err(msg) = &orchestration {
            error!("initial load failed: {msg}");
        }

        let dates = loader::date_range(7, Utc::now().date_naive());
        let (mut days, rolling, alerts, content_log) = tokio::join!(
            loader::load_days(self.source.as_ref(), &dates),
            self.source.rolling_series(),
            self.alerts.active(),
            self.source.content_log(),
        );
        days.sort_by(|a, b| a.date.cmp(&b.date));

        let available_weeks = self.source.available_weeks().await;
        let selected_week = available_weeks.first().cloned();
        let report = match &selected_week {
            Some(id) => self.source.weekly_report(id).await.map(|r| (id.clone(), r)),
            None => None,
        };

        info!(
            days = days.len(),
            weeks = available_weeks.len(),
            alerts = alerts.len(),
            "initial load complete"
        );

        self.update(move |state| {
            state.yesterday = days.len().checked_sub(2).and_then(|i| days.get(i).cloned());
            state.today = days.last().cloned();
            state.week_days = days;
            state.rolling = rolling;
            state.alerts = alerts;
            state.content_log = content_log.unwrap_or_default();
            state.available_weeks = available_weeks;
            state.selected_week = selected_week;
            if let Some((id, report)) = report {
                state.weekly_reports.insert(id, report);
            }
            state.loading = false;
            state.error = orchestration.err();
        });
    }

    /// Lazily load one week's report. A cached report only moves the
    /// selection; the report cache is never invalidated once populated. A
    /// failed fetch still moves the selection, which the weekly view shows
    /// as its empty state rather than an error.
    pub async fn load_week(&self, week_id: &str) {
        if self.state_lock().weekly_reports.contains_key(week_id) {
            self.set_state(StatePatch::select_week(week_id));
            return;
        }

        let report = self.source.weekly_report(week_id).await;
        let id = week_id.to_string();
        self.update(move |state| {
            if let Some(report) = report {
                state.weekly_reports.insert(id.clone(), report);
            }
            state.selected_week = Some(id);
        });
    }

    /// Re-run the initial load with a fresh alert fetch.
    pub async fn refresh(&self) {
        self.alerts.invalidate();
        self.init_data().await;
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        f(&mut self.state_lock());
        self.notify();
    }

    fn notify(&self) {
        if self.notifying.swap(true, Ordering::AcqRel) {
            // A pass is running; fold this notification into one more pass.
            self.pending.store(true, Ordering::Release);
            return;
        }
        loop {
            let snapshot = self.state_lock().clone();
            let callbacks: Vec<Callback> = self
                .subscribers_lock()
                .iter()
                .map(|(_, f)| f.clone())
                .collect();
            for callback in &callbacks {
                callback(&snapshot);
            }
            if !self.pending.swap(false, Ordering::AcqRel) {
                break;
            }
        }
        self.notifying.store(false, Ordering::Release);
    }

    fn state_lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn subscribers_lock(&self) -> MutexGuard<'_, Vec<(u64, Callback)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Fixed-payload source that counts weekly-report fetches.
    struct FixtureSource {
        report_fetches: AtomicUsize,
        weeks: Vec<String>,
        report: Option<WeeklyReport>,
        probe_error: Option<String>,
    }

    impl Default for FixtureSource {
        fn default() -> Self {
            Self {
                report_fetches: AtomicUsize::new(0),
                weeks: vec!["2026-W35".to_string(), "2026-W34".to_string()],
                report: Some(WeeklyReport {
                    summary: "steady week".to_string(),
                    ..Default::default()
                }),
                probe_error: None,
            }
        }
    }

    #[async_trait]
    impl DataSource for FixtureSource {
        async fn daily_snapshot(&self, date: &str) -> Option<DailySnapshot> {
            Some(DailySnapshot {
                date: date.to_string(),
                ..Default::default()
            })
        }
        async fn rolling_series(&self) -> Option<RollingSeries> {
            Some(RollingSeries::default())
        }
        async fn weekly_report(&self, _week_id: &str) -> Option<WeeklyReport> {
            self.report_fetches.fetch_add(1, Ordering::SeqCst);
            self.report.clone()
        }
        async fn content_log(&self) -> Option<Vec<ContentItem>> {
            Some(Vec::new())
        }
        async fn alerts(&self) -> Option<Vec<Alert>> {
            Some(Vec::new())
        }
        async fn thresholds(&self) -> Option<serde_json::Value> {
            None
        }
        async fn available_weeks(&self) -> Vec<String> {
            self.weeks.clone()
        }
        async fn probe(&self) -> Result<(), String> {
            match &self.probe_error {
                Some(msg) => Err(msg.clone()),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn init_derives_today_and_yesterday_from_ascending_days() {
        let store = Store::new(Arc::new(FixtureSource::default()));
        store.init_data().await;

        let state = store.state();
        assert_eq!(state.week_days.len(), 7);
        let today = state.today.unwrap().date;
        let yesterday = state.yesterday.unwrap().date;
        assert_eq!(state.week_days.last().unwrap().date, today);
        assert!(yesterday < today);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.selected_week.as_deref(), Some("2026-W35"));
        // Newest week's report was loaded eagerly.
        assert!(state.weekly_reports.contains_key("2026-W35"));
    }

    #[tokio::test]
    async fn init_records_orchestration_error_but_completes() {
        let source = FixtureSource {
            probe_error: Some("data directory gone".to_string()),
            ..Default::default()
        };
        let store = Store::new(Arc::new(source));
        store.init_data().await;

        let state = store.state();
        assert_eq!(state.error.as_deref(), Some("data directory gone"));
        assert!(!state.loading);
        // Partial data that did load stays applied.
        assert_eq!(state.week_days.len(), 7);
    }

    #[tokio::test]
    async fn load_week_fetches_once_per_id() {
        let source = Arc::new(FixtureSource::default());
        let store = Store::new(source.clone());

        store.load_week("2026-W30").await;
        assert_eq!(source.report_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().selected_week.as_deref(), Some("2026-W30"));

        // Cache hit: selection moves, no second fetch.
        store.load_week("2026-W30").await;
        assert_eq!(source.report_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn load_week_failure_still_moves_selection() {
        let source = Arc::new(FixtureSource {
            report: None,
            ..Default::default()
        });
        let store = Store::new(source.clone());

        store.load_week("2026-W29").await;
        let state = store.state();
        assert_eq!(state.selected_week.as_deref(), Some("2026-W29"));
        assert!(!state.weekly_reports.contains_key("2026-W29"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn subscribers_are_notified_until_unsubscribed() {
        let store = Store::new(Arc::new(FixtureSource::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let subscription = store.subscribe(move |_state| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set_state(StatePatch::select_platform(Platform::Tiktok));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().selected_platform, Platform::Tiktok);

        store.unsubscribe(subscription);
        store.set_state(StatePatch::select_platform(Platform::Beehiiv));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reentrant_set_state_is_deferred_not_recursive() {
        let store = Arc::new(Store::new(Arc::new(FixtureSource::default())));
        let calls = Arc::new(AtomicUsize::new(0));
        let reentered = Arc::new(AtomicBool::new(false));

        let inner_store = store.clone();
        let inner_calls = calls.clone();
        store.subscribe(move |state| {
            inner_calls.fetch_add(1, Ordering::SeqCst);
            if !reentered.swap(true, Ordering::SeqCst) {
                // Mutating from inside a notification must not deadlock or
                // recurse; it queues one follow-up pass.
                inner_store.set_state(StatePatch::select_platform(Platform::Instagram));
                assert_eq!(state.selected_platform, Platform::Linkedin);
            }
        });

        store.set_state(StatePatch::select_platform(Platform::Linkedin));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.state().selected_platform, Platform::Instagram);
    }
}
