use crate::components::chart::line_chart;
use crate::components::metric_card::MetricCard;
use crate::fmt::{ValueFormat, format_date_short};
use crate::models::{Platform, PlatformSeries};
use crate::router::{Router, View};
use crate::store::AppState;
use std::fmt::Write;

pub fn register(router: &mut Router) {
    router.register(View::Platform, Box::new(render));
}

/// Which rolling-series metrics get charted for a platform, in order.
pub struct MetricSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub format: Option<ValueFormat>,
}

const fn spec(key: &'static str, label: &'static str) -> MetricSpec {
    MetricSpec { key, label, format: None }
}

const fn spec_fmt(key: &'static str, label: &'static str, format: ValueFormat) -> MetricSpec {
    MetricSpec { key, label, format: Some(format) }
}

const YOUTUBE_METRICS: [MetricSpec; 4] = [
    spec("views", "Views"),
    spec("subscribers", "Subscribers"),
    spec("watch_hours", "Watch Hours"),
    spec("engagement", "Engagement"),
];

const LINKEDIN_METRICS: [MetricSpec; 4] = [
    spec("impressions", "Impressions"),
    spec("followers", "Followers"),
    spec("engagements", "Engagements"),
    spec_fmt("engagement_rate", "Engagement Rate", ValueFormat::Percent),
];

const INSTAGRAM_METRICS: [MetricSpec; 4] = [
    spec("impressions", "Impressions"),
    spec("followers", "Followers"),
    spec("engagements", "Engagements"),
    spec_fmt("engagement_rate", "Engagement Rate", ValueFormat::Percent),
];

const BEEHIIV_METRICS: [MetricSpec; 4] = [
    spec("subscribers", "Subscribers"),
    spec_fmt("open_rate", "Open Rate", ValueFormat::Percent),
    spec_fmt("click_rate", "Click Rate", ValueFormat::Percent),
    spec("web_views", "Web Views"),
];

const TIKTOK_METRICS: [MetricSpec; 4] = [
    spec("views", "Views"),
    spec("followers", "Followers"),
    spec("likes", "Likes"),
    spec("avg_watch_time", "Avg Watch Time"),
];

pub fn chart_metrics(platform: Platform) -> &'static [MetricSpec] {
    match platform {
        Platform::Youtube => &YOUTUBE_METRICS,
        Platform::Linkedin => &LINKEDIN_METRICS,
        Platform::Instagram => &INSTAGRAM_METRICS,
        Platform::Beehiiv => &BEEHIIV_METRICS,
        Platform::Tiktok => &TIKTOK_METRICS,
    }
}

/// Explicit format wins; otherwise rates living in (0, 1) render as
/// percentages and everything else compacts.
pub fn auto_format(spec: &MetricSpec, latest: Option<f64>) -> ValueFormat {
    if let Some(format) = spec.format {
        return format;
    }
    match latest {
        Some(v) if v > 0.0 && v < 1.0 => ValueFormat::Percent,
        _ => ValueFormat::Compact,
    }
}

fn last_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().flatten().next().copied()
}

fn previous_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().flatten().nth(1).copied()
}

fn tabs(selected: Platform) -> String {
    let mut out = String::new();
    for p in Platform::ALL {
        let active = if p == selected { " platform-tabs__btn--active" } else { "" };
        let _ = write!(
            out,
            r#"<button class="platform-tabs__btn{active}" data-platform="{}">{} {}</button>"#,
            p.key(),
            p.icon(),
            p.display_name(),
        );
    }
    format!(r#"<div class="platform-tabs">{out}</div>"#)
}

fn summary_cards(series: &PlatformSeries, specs: &[MetricSpec]) -> String {
    let mut cards = String::new();
    for spec in specs {
        let Some(values) = series.metric(spec.key) else { continue };
        if values.iter().all(Option::is_none) {
            continue;
        }
        let latest = last_present(values);
        let previous = previous_present(values);
        let spark: Vec<f64> = values
            .iter()
            .rev()
            .take(7)
            .rev()
            .flatten()
            .copied()
            .collect();
        let card = MetricCard::new(spec.label, latest, previous)
            .format(auto_format(spec, latest))
            .spark(&spark)
            .render();
        cards.push_str(&card);
    }
    format!(r#"<div class="metric-grid">{cards}</div>"#)
}

fn charts(series: &PlatformSeries, specs: &[MetricSpec]) -> String {
    let labels: Vec<String> = series.dates.iter().map(|d| format_date_short(d)).collect();
    let mut out = String::new();
    for spec in specs {
        let Some(values) = series.metric(spec.key) else { continue };
        if values.iter().all(Option::is_none) {
            continue;
        }
        out.push_str(&line_chart(spec.label, &labels, values));
    }
    out
}

pub fn render(state: &AppState) -> String {
    let Some(rolling) = state.rolling.as_ref() else {
        return String::new();
    };
    let selected = state.selected_platform;
    let header = format!(
        r#"<div class="page-header"><h1 class="page-header__title">Platform Trends</h1><p class="page-header__subtitle">90-day history</p></div>
{}"#,
        tabs(selected)
    );

    let Some(series) = rolling.platforms.get(&selected) else {
        return format!(
            r#"{header}
<div class="empty-state"><div class="empty-state__icon">🔍</div><div class="empty-state__message">No trend data for {}</div></div>"#,
            selected.display_name()
        );
    };

    let specs = chart_metrics(selected);
    format!(
        "{header}\n{}\n<div class=\"chart-list\">{}</div>",
        summary_cards(series, specs),
        charts(series, specs)
    )
}
