pub mod file_store;
pub mod lock;
pub mod memory;
pub mod tokio_fs;
pub mod traits;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use tokio_fs::TokioFileSystem;
pub use traits::{FileSystem, KeyValueStore, SwapOutcome};
