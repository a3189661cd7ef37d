use crate::store::AppState;
use std::collections::BTreeMap;

/// The closed set of dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum View {
    Snapshot,
    Weekly,
    Platform,
    ContentLog,
}

impl View {
    pub const ALL: [View; 4] = [View::Snapshot, View::Weekly, View::Platform, View::ContentLog];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Snapshot => "snapshot",
            View::Weekly => "weekly",
            View::Platform => "platform",
            View::ContentLog => "content-log",
        }
    }
}

/// Map a URL fragment to a view. Unrecognized or empty fragments land on the
/// snapshot view; matching is case-insensitive and tolerates a leading `#`.
pub fn resolve_hash(hash: &str) -> View {
    let hash = hash.trim_start_matches('#').to_ascii_lowercase();
    match hash.as_str() {
        "" | "today" => View::Snapshot,
        "weekly" => View::Weekly,
        "platform" => View::Platform,
        "content" => View::ContentLog,
        _ => View::Snapshot,
    }
}

pub type RenderFn = Box<dyn Fn(&AppState) -> String + Send + Sync>;

/// Outcome of resolving a navigation request.
pub struct Navigation {
    pub view: View,
    /// False when the resolved view was already active; the render function
    /// is not re-invoked in that case.
    pub changed: bool,
    /// None when no renderer is registered for the view, which is a silent
    /// success (an empty container), not an error.
    pub html: Option<String>,
}

/// Dispatches fragment navigation to registered view render functions.
/// The active view starts unset so the first resolution always renders.
pub struct Router {
    views: BTreeMap<View, RenderFn>,
    active: Option<View>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            views: BTreeMap::new(),
            active: None,
        }
    }

    /// Register a render function. Registering the same view again silently
    /// replaces the previous function.
    pub fn register(&mut self, view: View, render: RenderFn) {
        self.views.insert(view, render);
    }

    pub fn active(&self) -> Option<View> {
        self.active
    }

    /// Resolve a fragment and render the target view if it differs from the
    /// active one.
    pub fn navigate(&mut self, hash: &str, state: &AppState) -> Navigation {
        let view = resolve_hash(hash);
        if self.active == Some(view) {
            return Navigation {
                view,
                changed: false,
                html: None,
            };
        }
        self.active = Some(view);
        Navigation {
            view,
            changed: true,
            html: self.views.get(&view).map(|render| render(state)),
        }
    }

    /// Re-render the given view regardless of the active-view no-op rule.
    /// Used when an in-view control (tab, filter, sort) changed state and the
    /// view must rebuild with the same fragment.
    pub fn rerender(&mut self, view: View, state: &AppState) -> Option<String> {
        self.active = Some(view);
        self.views.get(&view).map(|render| render(state))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_render(calls: Arc<AtomicUsize>, body: &'static str) -> RenderFn {
        Box::new(move |_state| {
            calls.fetch_add(1, Ordering::SeqCst);
            body.to_string()
        })
    }

    #[test]
    fn fragment_table_matches_contract() {
        assert_eq!(resolve_hash(""), View::Snapshot);
        assert_eq!(resolve_hash("today"), View::Snapshot);
        assert_eq!(resolve_hash("#today"), View::Snapshot);
        assert_eq!(resolve_hash("WEEKLY"), View::Weekly);
        assert_eq!(resolve_hash("platform"), View::Platform);
        assert_eq!(resolve_hash("content"), View::ContentLog);
        assert_eq!(resolve_hash("bogus"), View::Snapshot);
    }

    #[test]
    fn repeated_navigation_does_not_rerender() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut router = Router::new();
        router.register(View::Snapshot, counting_render(calls.clone(), "snap"));

        let state = AppState::default();
        let first = router.navigate("today", &state);
        assert!(first.changed);
        assert_eq!(first.html.as_deref(), Some("snap"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = router.navigate("today", &state);
        assert!(!second.changed);
        assert!(second.html.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // A different fragment resolving to the same view is also a no-op.
        let third = router.navigate("bogus", &state);
        assert!(!third.changed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregistered_view_is_silent_success() {
        let mut router = Router::new();
        let nav = router.navigate("weekly", &AppState::default());
        assert!(nav.changed);
        assert_eq!(nav.view, View::Weekly);
        assert!(nav.html.is_none());
    }

    #[test]
    fn duplicate_registration_replaces() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut router = Router::new();
        router.register(View::Weekly, counting_render(first.clone(), "old"));
        router.register(View::Weekly, counting_render(second.clone(), "new"));

        let nav = router.navigate("weekly", &AppState::default());
        assert_eq!(nav.html.as_deref(), Some("new"));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rerender_bypasses_active_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut router = Router::new();
        router.register(View::Platform, counting_render(calls.clone(), "p"));

        let state = AppState::default();
        router.navigate("platform", &state);
        let html = router.rerender(View::Platform, &state);
        assert_eq!(html.as_deref(), Some("p"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
