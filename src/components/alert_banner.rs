use crate::components::html_escape;
use crate::fmt::format_relative;
use crate::models::Alert;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Banner listing active alerts, already severity-sorted by the alert
/// service. Empty string when there is nothing to show.
pub fn render(alerts: &[Alert], now: DateTime<Utc>) -> String {
    if alerts.is_empty() {
        return String::new();
    }

    let mut items = String::new();
    for alert in alerts {
        let _ = write!(
            items,
            r#"<div class="alert-item alert-item--{}">
  <span class="alert-item__icon">{}</span>
  <span class="alert-item__message">{}</span>
  <span class="alert-item__time">{}</span>
</div>"#,
            alert.severity.key(),
            alert.severity.icon(),
            html_escape(&alert.message),
            format_relative(&alert.triggered_at, now),
        );
    }

    format!(r#"<div class="alert-banner">{items}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use chrono::TimeZone;

    #[test]
    fn empty_alerts_render_nothing() {
        assert_eq!(render(&[], Utc::now()), "");
    }

    #[test]
    fn items_carry_severity_class_and_relative_time() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        let alerts = vec![Alert {
            severity: Severity::Critical,
            message: "YouTube views down >30%".to_string(),
            triggered_at: "2026-08-27T09:00:00Z".to_string(),
        }];
        let html = render(&alerts, now);
        assert!(html.contains("alert-item--critical"));
        assert!(html.contains("3h ago"));
        assert!(html.contains("&gt;30%"));
    }
}
