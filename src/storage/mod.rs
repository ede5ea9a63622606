pub mod memory;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::MemoryMenuStore;
pub use postgres::PgMenuStore;
pub use store::{ConstraintKind, ItemOrder, MenuStore, StoreError};
