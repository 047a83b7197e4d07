pub mod persisted;
pub mod store;

pub use persisted::Persisted;
pub use store::{StateStore, StoreError, StoreKey};
