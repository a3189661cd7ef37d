use crate::components::nav::{bottom_nav, top_nav};
use crate::router::View;
use crate::store::AppState;

/// Render the full page shell around an already-rendered view fragment.
/// Subsequent navigation swaps the fragment over `/fragment` without a full
/// page load.
pub fn render_shell(view: View, content: &str, state: &AppState) -> String {
    let status = match (&state.error, state.loading) {
        (Some(error), _) => format!(
            r#"<div class="status-bar status-bar--error">Some data failed to load: {error}</div>"#
        ),
        (None, true) => r#"<div class="status-bar">Loading…</div>"#.to_string(),
        (None, false) => String::new(),
    };

    SHELL_HTML
        .replace("{{TOP_NAV}}", &top_nav(view))
        .replace("{{BOTTOM_NAV}}", &bottom_nav(view))
        .replace("{{STATUS}}", &status)
        .replace("{{VIEW}}", view.as_str())
        .replace("{{CONTENT}}", content)
}

const SHELL_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Content Analytics</title>
  <style>
    :root {
      --bg: #f6f7f9;
      --ink: #1f2430;
      --muted: #6b7280;
      --card: #ffffff;
      --line: #e3e6eb;
      --accent: #2563eb;
      --positive: #15803d;
      --negative: #b91c1c;
      --critical: #b91c1c;
      --warning: #b45309;
      --info: #1d4ed8;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
    }

    main { width: min(980px, 100%); margin: 0 auto; padding: 24px 16px 88px; }

    .nav-top { background: var(--card); border-bottom: 1px solid var(--line); }
    .nav-top__inner {
      width: min(980px, 100%);
      margin: 0 auto;
      padding: 0 16px;
      display: flex;
      align-items: center;
      justify-content: space-between;
    }
    .nav-top__brand { font-weight: 700; color: var(--ink); text-decoration: none; padding: 14px 0; }
    .nav-top__links { display: flex; gap: 4px; list-style: none; margin: 0; padding: 0; }
    .nav-top__link {
      display: inline-flex;
      gap: 6px;
      padding: 14px 12px;
      color: var(--muted);
      text-decoration: none;
      border-bottom: 2px solid transparent;
    }
    .nav-top__link--active { color: var(--ink); border-bottom-color: var(--accent); }

    .nav-bottom { display: none; position: fixed; inset: auto 0 0 0; background: var(--card); border-top: 1px solid var(--line); }
    .nav-bottom__links { display: flex; list-style: none; margin: 0; padding: 0; }
    .nav-bottom__links li { flex: 1; }
    .nav-bottom__link {
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 2px;
      padding: 8px 0;
      font-size: 0.75rem;
      color: var(--muted);
      text-decoration: none;
    }
    .nav-bottom__link--active { color: var(--accent); }

    .status-bar { padding: 8px 12px; border-radius: 8px; background: #eef2ff; color: var(--info); margin-bottom: 16px; }
    .status-bar--error { background: #fef2f2; color: var(--negative); }

    .page-header { margin-bottom: 20px; }
    .page-header__title { margin: 0; font-size: 1.5rem; }
    .page-header__subtitle { margin: 4px 0 0; color: var(--muted); }

    .metric-grid, .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }
    .metric-card { background: var(--card); border: 1px solid var(--line); border-radius: 12px; padding: 14px; }
    .metric-card--large .metric-card__value { font-size: 1.8rem; }
    .metric-card__label { font-size: 0.78rem; text-transform: uppercase; letter-spacing: 0.06em; color: var(--muted); }
    .metric-card__value { font-size: 1.4rem; font-weight: 600; margin: 4px 0; }
    .metric-card__footer { display: flex; align-items: center; justify-content: space-between; gap: 8px; }
    .metric-card__delta { font-size: 0.85rem; }
    .metric-card__delta--positive { color: var(--positive); }
    .metric-card__delta--negative { color: var(--negative); }
    .metric-card__delta--neutral { color: var(--muted); }

    .section { margin-top: 28px; }
    .section__title { display: flex; align-items: center; gap: 8px; margin: 0 0 12px; font-size: 1.05rem; }
    .platform-dot { width: 10px; height: 10px; border-radius: 50%; display: inline-block; background: var(--muted); }
    .platform-dot--youtube { background: #ef4444; }
    .platform-dot--linkedin { background: #0a66c2; }
    .platform-dot--instagram { background: #d946ef; }
    .platform-dot--beehiiv { background: #f59e0b; }
    .platform-dot--tiktok { background: #111827; }

    .alert-banner { display: grid; gap: 8px; margin-bottom: 20px; }
    .alert-item { display: flex; gap: 10px; align-items: baseline; background: var(--card); border: 1px solid var(--line); border-left-width: 4px; border-radius: 8px; padding: 10px 12px; }
    .alert-item--critical { border-left-color: var(--critical); }
    .alert-item--warning { border-left-color: var(--warning); }
    .alert-item--info { border-left-color: var(--info); }
    .alert-item__message { flex: 1; }
    .alert-item__time { color: var(--muted); font-size: 0.85rem; }

    .callout { background: var(--card); border: 1px solid var(--line); border-radius: 12px; padding: 14px; margin-top: 16px; }

    .week-selector, .platform-tabs, .filter-bar { display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 16px; }
    .week-selector__btn, .platform-tabs__btn, .filter-bar__btn {
      border: 1px solid var(--line);
      background: var(--card);
      border-radius: 999px;
      padding: 6px 14px;
      cursor: pointer;
      font: inherit;
      color: var(--muted);
    }
    .week-selector__btn--active, .platform-tabs__btn--active, .filter-bar__btn--active {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    .weekly__report { background: var(--card); border: 1px solid var(--line); border-radius: 12px; padding: 18px; }
    .weekly__report-header { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 8px; margin-bottom: 10px; }
    .weekly__report-title { margin: 0; font-size: 1.15rem; }
    .weekly__report-date { color: var(--muted); font-size: 0.85rem; }
    .weekly__partial-badge { margin-left: 8px; font-size: 0.75rem; background: #fef3c7; color: var(--warning); border-radius: 999px; padding: 2px 8px; }
    .prose p { margin: 0 0 10px; line-height: 1.55; }
    .weekly__highlight { display: flex; gap: 10px; background: var(--card); border: 1px solid var(--line); border-radius: 10px; padding: 12px; margin-bottom: 8px; }
    .weekly__highlight-context { color: var(--muted); font-size: 0.9rem; }
    .weekly__recommendations { background: var(--card); border: 1px solid var(--line); border-radius: 10px; margin: 0; padding: 12px 12px 12px 32px; }
    .weekly__scores { display: grid; gap: 8px; }
    .weekly__score-item { display: flex; align-items: center; gap: 12px; background: var(--card); border: 1px solid var(--line); border-radius: 10px; padding: 10px 12px; }
    .weekly__score-platform { min-width: 90px; font-weight: 600; }
    .weekly__score-note { color: var(--muted); }
    .score-badge { border-radius: 999px; padding: 2px 10px; font-weight: 600; }
    .score-badge--high { background: #dcfce7; color: var(--positive); }
    .score-badge--medium { background: #fef3c7; color: var(--warning); }
    .score-badge--low { background: #fee2e2; color: var(--negative); }

    .badge { border-radius: 999px; padding: 2px 8px; font-size: 0.75rem; background: #eef2ff; color: var(--info); }

    .chart-list { display: grid; gap: 16px; margin-top: 20px; }
    .chart-card { background: var(--card); border: 1px solid var(--line); border-radius: 12px; padding: 14px; }
    .chart-card__title { margin: 0 0 8px; font-size: 0.95rem; font-weight: 600; }
    .chart-card__empty { color: var(--muted); padding: 24px 0; text-align: center; }
    .chart-line { fill: none; stroke: var(--accent); stroke-width: 2; }
    .chart-point { fill: white; stroke: var(--accent); stroke-width: 2; }
    .chart-grid { stroke: var(--line); }
    .chart-axis { stroke: #c6ccd6; stroke-dasharray: 4 6; }
    .chart-label { fill: var(--muted); font-size: 10px; }
    .sparkline polyline { fill: none; stroke: var(--accent); stroke-width: 1.5; }

    .data-table-wrapper { overflow-x: auto; background: var(--card); border: 1px solid var(--line); border-radius: 12px; }
    .data-table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
    .data-table th { padding: 10px 12px; border-bottom: 1px solid var(--line); cursor: pointer; white-space: nowrap; user-select: none; }
    .data-table td { padding: 10px 12px; border-bottom: 1px solid var(--line); }
    .data-table tr:last-child td { border-bottom: none; }
    .sort-icon { color: var(--muted); font-size: 0.75rem; }
    .sort-icon--active { color: var(--accent); }

    .empty-state { text-align: center; padding: 48px 0; color: var(--muted); }
    .empty-state__icon { font-size: 2rem; margin-bottom: 8px; }

    @media (max-width: 640px) {
      .nav-top__links { display: none; }
      .nav-bottom { display: block; }
    }
  </style>
</head>
<body>
  {{TOP_NAV}}
  <main>
    {{STATUS}}
    <div id="view-root" data-view="{{VIEW}}">{{CONTENT}}</div>
  </main>
  {{BOTTOM_NAV}}

  <script>
    const root = document.getElementById('view-root');
    const controls = { week: '', platform: '', filter: '', sort: '', dir: '' };

    const setActiveNav = () => {
      const hash = (location.hash || '#today').replace('#', '');
      document.querySelectorAll('[data-nav]').forEach((link) => {
        const active = link.dataset.nav === hash;
        link.classList.toggle('nav-top__link--active', active && link.classList.contains('nav-top__link'));
        link.classList.toggle('nav-bottom__link--active', active && link.classList.contains('nav-bottom__link'));
      });
    };

    const load = async (params) => {
      const query = new URLSearchParams({ hash: (location.hash || '').replace('#', '') });
      for (const [key, value] of Object.entries(params || {})) {
        if (value) query.set(key, value);
      }
      const res = await fetch('/fragment?' + query.toString());
      if (res.status === 204) return;
      if (!res.ok) return;
      root.dataset.view = res.headers.get('x-view') || '';
      root.innerHTML = await res.text();
    };

    window.addEventListener('hashchange', () => {
      Object.keys(controls).forEach((key) => { controls[key] = ''; });
      setActiveNav();
      load();
    });

    root.addEventListener('click', (event) => {
      const el = event.target.closest('[data-week],[data-platform],[data-filter],[data-sort]');
      if (!el) return;
      if (el.dataset.week) controls.week = el.dataset.week;
      if (el.dataset.platform) controls.platform = el.dataset.platform;
      if (el.dataset.filter) controls.filter = el.dataset.filter;
      if (el.dataset.sort) {
        if (controls.sort === el.dataset.sort) {
          controls.dir = controls.dir === 'desc' ? 'asc' : 'desc';
        } else {
          controls.sort = el.dataset.sort;
          controls.dir = 'desc';
        }
      }
      load(controls);
    });

    setActiveNav();
    if (location.hash && location.hash !== '#today') load();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_embeds_content_and_marks_view() {
        let state = AppState::default();
        let html = render_shell(View::Snapshot, "<p>hello</p>", &state);
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains(r#"data-view="snapshot""#));
        // Fresh default state is still loading.
        assert!(html.contains("Loading…"));
    }

    #[test]
    fn error_state_surfaces_in_status_bar() {
        let mut state = AppState::default();
        state.loading = false;
        state.error = Some("data directory unreachable".to_string());
        let html = render_shell(View::Snapshot, "", &state);
        assert!(html.contains(r#"<div class="status-bar status-bar--error""#));
        assert!(html.contains("data directory unreachable"));
    }

    #[test]
    fn settled_state_has_no_status_bar() {
        let mut state = AppState::default();
        state.loading = false;
        let html = render_shell(View::Weekly, "", &state);
        assert!(!html.contains(r#"<div class="status-bar"#));
    }
}
