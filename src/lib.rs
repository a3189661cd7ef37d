pub mod alerts;
pub mod app;
pub mod components;
pub mod errors;
pub mod fmt;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod router;
pub mod store;
pub mod ui;
pub mod views;

pub use app::router;
pub use handlers::ServerState;
pub use loader::{DataSource, FsDataSource, resolve_data_dir};
pub use store::Store;
