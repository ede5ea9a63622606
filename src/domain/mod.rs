pub mod insights;
pub mod model;
pub mod stats;
pub mod upload;
pub mod validation;
