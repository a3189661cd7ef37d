use crate::router::{View, resolve_hash};
use std::fmt::Write;

pub struct NavItem {
    pub hash: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { hash: "today", label: "Today", icon: "⚡" },
    NavItem { hash: "weekly", label: "Weekly", icon: "📊" },
    NavItem { hash: "platform", label: "Platforms", icon: "🔍" },
    NavItem { hash: "content", label: "Content", icon: "📝" },
];

fn links(active: View, class_prefix: &str) -> String {
    let mut out = String::new();
    for item in &NAV_ITEMS {
        let active_class = if resolve_hash(item.hash) == active {
            format!(" {class_prefix}__link--active")
        } else {
            String::new()
        };
        let _ = write!(
            out,
            r##"<li><a href="#{}" class="{class_prefix}__link{active_class}" data-nav="{}"><span>{}</span><span>{}</span></a></li>"##,
            item.hash, item.hash, item.icon, item.label
        );
    }
    out
}

/// Desktop navigation bar.
pub fn top_nav(active: View) -> String {
    format!(
        r##"<nav class="nav-top"><div class="nav-top__inner"><a href="#today" class="nav-top__brand">Content Analytics</a><ul class="nav-top__links">{}</ul></div></nav>"##,
        links(active, "nav-top")
    )
}

/// Mobile navigation bar.
pub fn bottom_nav(active: View) -> String {
    format!(
        r#"<nav class="nav-bottom"><ul class="nav-bottom__links">{}</ul></nav>"#,
        links(active, "nav-bottom")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_link_matches_resolved_view() {
        let html = top_nav(View::Weekly);
        assert!(html.contains(r##"href="#today" class="nav-top__brand""##));
        assert!(html.contains(r#"data-nav="weekly""#));
        assert_eq!(html.matches("nav-top__link--active").count(), 1);
        assert!(html.contains(r##"href="#weekly" class="nav-top__link nav-top__link--active"##));
    }

    #[test]
    fn snapshot_marks_today_link() {
        let html = bottom_nav(View::Snapshot);
        let active_pos = html.find("nav-bottom__link--active").unwrap();
        let today_pos = html.find(r#"data-nav="today""#).unwrap();
        // The active class sits on the Today link.
        assert!(active_pos < today_pos);
    }
}
