//! `BlobStore` implementations

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

pub(crate) use file::validate_key;
