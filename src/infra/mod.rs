pub mod auth;
pub mod config;
pub mod telemetry;

pub use auth::{hash_password, AuthError, Claims, JwtManager};
pub use config::{Settings, StorageBackend};
pub use telemetry::init_telemetry;
