pub mod auth;
pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod menus;
    pub mod upload;
}

pub use auth::AuthUser;
pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use types::{ApiResponse, AppState, UploadLimits};
