//! # marksort-core
//!
//! Bookmark data model, Netscape Bookmark HTML codec, the in-memory
//! bookmark store, and blob persistence.

pub mod codec;
pub mod error;
pub mod model;
pub mod persist;
pub mod store;

pub use error::{ImportError, PersistError};
pub use model::{Bookmark, ALL_BOOKMARKS, UNCATEGORIZED};
pub use persist::{BlobStore, FileBlobStore, MemoryBlobStore, StoreSnapshot, BOOKMARKS_KEY};
pub use store::BookmarkStore;
