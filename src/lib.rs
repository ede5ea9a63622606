pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{IngestionService, MenuService};
pub use domain::model::{Menu, MenuItem, NewMenuItem, UserId};
pub use infra::config::Settings;
pub use storage::{MemoryMenuStore, MenuStore, PgMenuStore};
