use crate::components::html_escape;
use crate::fmt::format_date_short;
use crate::models::{WeeklyReport, platform_label};
use crate::router::{Router, View};
use crate::store::AppState;
use std::fmt::Write;

pub fn register(router: &mut Router) {
    router.register(View::Weekly, Box::new(render));
}

/// Icon for a highlight type; unknown types get the default spark.
pub fn highlight_icon(kind: &str) -> &'static str {
    match kind {
        "growth" => "📈",
        "engagement" => "🔥",
        "milestone" => "🏆",
        "performance" => "⚡",
        _ => "✦",
    }
}

/// Visual bucket for a platform score.
pub fn score_class(score: f64) -> &'static str {
    if score >= 8.0 {
        "high"
    } else if score >= 5.0 {
        "medium"
    } else {
        "low"
    }
}

/// Trend arrow; anything unrecognized renders flat.
pub fn trend_arrow(trend: &str) -> &'static str {
    match trend {
        "up" => "↑",
        "down" => "↓",
        _ => "→",
    }
}

pub fn render(state: &AppState) -> String {
    let report = state
        .selected_week
        .as_ref()
        .and_then(|week| state.weekly_reports.get(week));

    let header = r#"<div class="page-header"><h1 class="page-header__title">Weekly Synthesis</h1><p class="page-header__subtitle">Generated performance analysis</p></div>"#;
    let selector = week_selector(state);

    let Some(report) = report else {
        // The selector stays interactive so another week can be picked.
        return format!(
            r#"{header}
{selector}
<div class="empty-state"><div class="empty-state__icon">📊</div><div class="empty-state__message">No report available for this week</div></div>"#
        );
    };

    format!(
        "{header}\n{selector}\n{}{}{}{}{}",
        report_body(report),
        highlights(report),
        concerns(report),
        recommendations(report),
        scores(report)
    )
}

fn week_selector(state: &AppState) -> String {
    let mut tabs = String::new();
    for week in &state.available_weeks {
        let active = state.selected_week.as_deref() == Some(week.as_str());
        let partial = state
            .weekly_reports
            .get(week)
            .map(|r| r.partial)
            .unwrap_or(false);
        let _ = write!(
            tabs,
            r#"<button class="week-selector__btn{}" data-week="{}">{}{}</button>"#,
            if active { " week-selector__btn--active" } else { "" },
            html_escape(week),
            html_escape(week),
            if partial { " (partial)" } else { "" },
        );
    }
    format!(r#"<div class="week-selector">{tabs}</div>"#)
}

fn report_body(report: &WeeklyReport) -> String {
    let generated = if report.generated_at.len() >= 10 {
        format_date_short(&report.generated_at[..10])
    } else {
        report.generated_at.clone()
    };
    let partial_badge = if report.partial {
        r#"<span class="weekly__partial-badge">Partial Week</span>"#
    } else {
        ""
    };

    // Blank lines delimit paragraphs in the synthesized prose.
    let mut prose = String::new();
    for paragraph in report.summary.split("\n\n") {
        if paragraph.trim().is_empty() {
            continue;
        }
        let _ = write!(prose, "<p>{}</p>", html_escape(paragraph));
    }

    format!(
        r#"<div class="weekly__report">
<div class="weekly__report-header">
  <h2 class="weekly__report-title">Week of {} — {}</h2>
  <div><span class="weekly__report-date">Generated {generated}</span>{partial_badge}</div>
</div>
<div class="prose">{prose}</div>
</div>"#,
        html_escape(&report.range.start),
        html_escape(&report.range.end),
    )
}

fn highlights(report: &WeeklyReport) -> String {
    let mut items = String::new();
    for h in &report.highlights {
        let _ = write!(
            items,
            r#"<div class="weekly__highlight">
<span class="weekly__highlight-icon">{}</span>
<div class="weekly__highlight-content">
  <div class="weekly__highlight-value"><span class="badge badge--{}">{}</span> {}</div>
  <div class="weekly__highlight-context">{}</div>
</div>
</div>"#,
            highlight_icon(&h.kind),
            html_escape(&h.platform),
            html_escape(&platform_label(&h.platform)),
            html_escape(&h.value_text()),
            html_escape(&h.context),
        );
    }
    format!(
        r#"<div class="section"><h3 class="section__title">Highlights</h3><div class="weekly__highlights">{items}</div></div>"#
    )
}

fn concerns(report: &WeeklyReport) -> String {
    if report.concerns.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for c in &report.concerns {
        let _ = write!(
            items,
            r#"<div class="weekly__highlight">
<span class="weekly__highlight-icon">⚠️</span>
<div class="weekly__highlight-content">
  <div class="weekly__highlight-value"><span class="badge badge--{}">{}</span></div>
  <div class="weekly__highlight-context">{}</div>
</div>
</div>"#,
            html_escape(&c.platform),
            html_escape(&platform_label(&c.platform)),
            html_escape(&c.issue),
        );
    }
    format!(r#"<div class="section"><h3 class="section__title">Concerns</h3>{items}</div>"#)
}

fn recommendations(report: &WeeklyReport) -> String {
    if report.recommendations.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for r in &report.recommendations {
        let _ = write!(items, "<li>{}</li>", html_escape(r));
    }
    format!(
        r#"<div class="section"><h3 class="section__title">Recommendations</h3><ul class="weekly__recommendations">{items}</ul></div>"#
    )
}

fn scores(report: &WeeklyReport) -> String {
    if report.platform_scores.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for (platform, data) in &report.platform_scores {
        let _ = write!(
            items,
            r#"<div class="weekly__score-item">
<span class="weekly__score-platform">{}</span>
<span class="score-badge score-badge--{}">{}</span>
<span class="weekly__score-note">{} {}</span>
</div>"#,
            html_escape(&platform_label(platform)),
            score_class(data.score),
            data.score,
            trend_arrow(&data.trend),
            html_escape(&data.note),
        );
    }
    format!(
        r#"<div class="section"><h3 class="section__title">Platform Scores</h3><div class="weekly__scores">{items}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Concern, PlatformScore, WeekRange};

    fn report() -> WeeklyReport {
        WeeklyReport {
            range: WeekRange {
                start: "2026-08-17".to_string(),
                end: "2026-08-23".to_string(),
            },
            generated_at: "2026-08-24T06:00:00Z".to_string(),
            summary: "A strong week.\n\nGrowth held steady.".to_string(),
            ..Default::default()
        }
    }

    fn state_with(report: Option<WeeklyReport>) -> AppState {
        let mut state = AppState::default();
        state.available_weeks = vec!["2026-W34".to_string(), "2026-W33".to_string()];
        state.selected_week = Some("2026-W34".to_string());
        if let Some(r) = report {
            state.weekly_reports.insert("2026-W34".to_string(), r);
        }
        state
    }

    #[test]
    fn score_buckets() {
        assert_eq!(score_class(9.0), "high");
        assert_eq!(score_class(8.0), "high");
        assert_eq!(score_class(5.0), "medium");
        assert_eq!(score_class(4.0), "low");
    }

    #[test]
    fn trend_arrows_default_to_flat() {
        assert_eq!(trend_arrow("up"), "↑");
        assert_eq!(trend_arrow("down"), "↓");
        assert_eq!(trend_arrow("sideways"), "→");
        assert_eq!(trend_arrow(""), "→");
    }

    #[test]
    fn unknown_highlight_type_gets_default_icon() {
        assert_eq!(highlight_icon("growth"), "📈");
        assert_eq!(highlight_icon("weirdness"), "✦");
    }

    #[test]
    fn missing_report_keeps_selector_interactive() {
        let html = render(&state_with(None));
        assert!(html.contains("No report available"));
        assert!(html.contains(r#"data-week="2026-W34""#));
        assert!(html.contains(r#"data-week="2026-W33""#));
    }

    #[test]
    fn scores_bucket_and_arrow_in_markup() {
        let mut r = report();
        r.platform_scores.insert(
            "youtube".to_string(),
            PlatformScore {
                score: 9.0,
                trend: "up".to_string(),
                note: "strong".to_string(),
            },
        );
        r.platform_scores.insert(
            "tiktok".to_string(),
            PlatformScore {
                score: 4.0,
                trend: "down".to_string(),
                note: "slipping".to_string(),
            },
        );
        let html = render(&state_with(Some(r)));
        assert!(html.contains("score-badge--high"));
        assert!(html.contains("score-badge--low"));
        assert!(html.contains("↑ strong"));
        assert!(html.contains("↓ slipping"));
    }

    #[test]
    fn summary_splits_into_paragraphs() {
        let html = render(&state_with(Some(report())));
        assert!(html.contains("<p>A strong week.</p>"));
        assert!(html.contains("<p>Growth held steady.</p>"));
        // No concerns or recommendations sections when both are empty.
        assert!(!html.contains("Concerns"));
        assert!(!html.contains("Recommendations"));
    }

    #[test]
    fn concerns_render_when_present() {
        let mut r = report();
        r.concerns.push(Concern {
            platform: "instagram".to_string(),
            issue: "Reach fell off".to_string(),
        });
        let html = render(&state_with(Some(r)));
        assert!(html.contains("Concerns"));
        assert!(html.contains("Reach fell off"));
    }

    #[test]
    fn partial_flag_badges_header_and_selector() {
        let mut r = report();
        r.partial = true;
        let html = render(&state_with(Some(r)));
        assert!(html.contains("Partial Week"));
        assert!(html.contains("2026-W34 (partial)"));
    }
}
