pub mod email;
pub mod store;

pub use email::MockEmailAdapter;
pub use store::BlobStoreAdapter;
