pub mod codec;
pub mod commands;
pub mod hash;
pub mod reply;
pub mod shell;
pub mod store;
pub mod table;

pub use hash::{HasherKind, KeyHasher};
pub use store::Store;
pub use table::{Entry, KeyValueTable, TableError, TableStats, DEFAULT_BUCKETS};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
