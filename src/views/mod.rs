pub mod content_log;
pub mod platform;
pub mod snapshot;
pub mod weekly;

use crate::router::Router;

/// Register every view's render function with the router.
pub fn register_all(router: &mut Router) {
    snapshot::register(router);
    weekly::register(router);
    platform::register(router);
    content_log::register(router);
}
