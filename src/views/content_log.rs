use crate::components::data_table::{Align, Cell, Column, DataTable, SortDir, TableRow};
use crate::components::html_escape;
use crate::fmt::{format_compact, format_relative};
use crate::models::{ContentItem, platform_label};
use crate::router::{Router, View};
use crate::store::AppState;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub fn register(router: &mut Router) {
    router.register(View::ContentLog, Box::new(render));
}

pub const COLUMNS: &[Column] = &[
    Column { key: "title", label: "Title", align: Align::Left },
    Column { key: "platform", label: "Platform", align: Align::Left },
    Column { key: "type", label: "Type", align: Align::Left },
    Column { key: "published_at", label: "Published", align: Align::Left },
    Column { key: "primary_metric", label: "Views", align: Align::Right },
    Column { key: "engagement", label: "Engagement", align: Align::Right },
    Column { key: "snapshot_24h", label: "First 24h", align: Align::Right },
];

fn number_cell(value: Option<f64>) -> Cell {
    Cell::number(value, format_compact(value))
}

fn item_row(item: &ContentItem, now: DateTime<Utc>) -> TableRow {
    let engagement = item.latest.engagement();
    TableRow {
        cells: vec![
            Cell::text(item.title.as_str(), html_escape(&item.title)),
            Cell::text(
                item.platform.as_str(),
                format!(
                    r#"<span class="badge badge--{}">{}</span>"#,
                    html_escape(&item.platform),
                    html_escape(&platform_label(&item.platform)),
                ),
            ),
            Cell::text(item.kind.as_str(), html_escape(&item.kind)),
            // ISO-8601 sorts chronologically as text; display stays relative.
            Cell::text(
                item.published_at.as_str(),
                format_relative(&item.published_at, now),
            ),
            number_cell(item.latest.primary_metric()),
            number_cell(Some(engagement)),
            number_cell(item.snapshot_24h()),
        ],
    }
}

/// Rows for the current platform filter, in source order.
pub fn rows(items: &[ContentItem], filter: &str, now: DateTime<Utc>) -> Vec<TableRow> {
    items
        .iter()
        .filter(|item| filter == "all" || item.platform == filter)
        .map(|item| item_row(item, now))
        .collect()
}

/// "all" plus each platform in first-seen order.
pub fn platform_filters(items: &[ContentItem]) -> Vec<String> {
    let mut filters = vec!["all".to_string()];
    for item in items {
        if !filters.iter().any(|f| f == &item.platform) {
            filters.push(item.platform.clone());
        }
    }
    filters
}

fn filter_bar(items: &[ContentItem], active: &str) -> String {
    let mut out = String::new();
    for filter in platform_filters(items) {
        let label = if filter == "all" {
            "All".to_string()
        } else {
            platform_label(&filter)
        };
        let active_class = if filter == active { " filter-bar__btn--active" } else { "" };
        let _ = write!(
            out,
            r#"<button class="filter-bar__btn{active_class}" data-filter="{}">{}</button>"#,
            html_escape(&filter),
            html_escape(&label),
        );
    }
    format!(r#"<div class="filter-bar">{out}</div>"#)
}

pub fn render(state: &AppState) -> String {
    render_with(state, "all", "published_at", SortDir::Desc, Utc::now())
}

pub fn render_with(
    state: &AppState,
    filter: &str,
    sort_key: &str,
    dir: SortDir,
    now: DateTime<Utc>,
) -> String {
    let header = r#"<div class="page-header"><h1 class="page-header__title">Content Log</h1><p class="page-header__subtitle">Everything published, with how it did</p></div>"#;

    if state.content_log.is_empty() {
        return format!(
            r#"{header}
<div class="empty-state"><div class="empty-state__icon">📝</div><div class="empty-state__message">No content tracked yet</div></div>"#
        );
    }

    let mut table = DataTable::new("content-table", COLUMNS, sort_key);
    table.dir = dir;
    let table_rows = rows(&state.content_log, filter, now);

    format!(
        "{header}\n{}\n{}",
        filter_bar(&state.content_log, filter),
        table.render(&table_rows)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::PLACEHOLDER;
    use crate::models::ContentCounts;
    use chrono::TimeZone;

    fn item(title: &str, platform: &str) -> ContentItem {
        ContentItem {
            title: title.to_string(),
            platform: platform.to_string(),
            kind: "post".to_string(),
            published_at: "2026-08-25T09:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn row_derives_metrics_from_counters() {
        let mut post = item("Launch notes", "linkedin");
        post.latest = ContentCounts {
            impressions: Some(200.0),
            reactions: Some(4.0),
            comments: Some(2.0),
            shares: Some(1.0),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 9, 0, 0).unwrap();
        let row = item_row(&post, now);
        assert_eq!(row.cells[4].display, "200");
        assert_eq!(row.cells[5].display, "7");
        // No 24h snapshot captured yet.
        assert_eq!(row.cells[6].display, PLACEHOLDER);
    }

    #[test]
    fn filter_keeps_matching_platform_only() {
        let items = vec![item("a", "youtube"), item("b", "tiktok"), item("c", "youtube")];
        let now = Utc::now();
        assert_eq!(rows(&items, "youtube", now).len(), 2);
        assert_eq!(rows(&items, "all", now).len(), 3);
        assert_eq!(rows(&items, "beehiiv", now).len(), 0);
    }

    #[test]
    fn filters_list_platforms_in_first_seen_order() {
        let items = vec![
            item("a", "tiktok"),
            item("b", "youtube"),
            item("c", "tiktok"),
            item("d", "beehiiv"),
        ];
        assert_eq!(platform_filters(&items), vec!["all", "tiktok", "youtube", "beehiiv"]);
    }

    #[test]
    fn empty_log_shows_empty_state() {
        let html = render(&AppState::default());
        assert!(html.contains("No content tracked yet"));
        assert!(!html.contains("data-table"));
    }

    #[test]
    fn render_marks_active_filter_and_sort() {
        let mut state = AppState::default();
        state.content_log = vec![item("a", "youtube"), item("b", "tiktok")];
        let html = render_with(
            &state,
            "tiktok",
            "engagement",
            SortDir::Asc,
            Utc::now(),
        );
        assert!(html.contains(r#"data-filter="tiktok""#));
        assert!(html.contains("filter-bar__btn--active"));
        assert!(html.contains(r#"data-sort="engagement""#));
        assert!(html.contains("↑"));
    }
}
