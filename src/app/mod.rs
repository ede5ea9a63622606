pub mod ingestion_service;
pub mod menu_service;
pub mod seed;

pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use menu_service::{MenuDetail, MenuError, MenuService, MenuWithStats};
pub use seed::{seed_demo, SeedReport};
