//! Media storage for Panelwright.
//!
//! Two kinds of storage live here:
//!
//! - [`LocalOutputDir`]: where the generation tools drop every PNG and WAV
//!   they produce, as `images/panel_{id}_{millis}.png` and
//!   `audio/panel_{id}_{millis}.wav`.
//! - [`ObjectStore`]: bucketed storage for finished comics, addressed by
//!   `{userId}/{comicId}/panel_{panelId}.{ext}`, with upsert uploads, public
//!   URLs, batch delete and folder listing. [`FileSystemObjectStore`] is the
//!   bundled backend.
//!
//! [`MediaPersister`] copies a finished comic's media into the object store
//! on a best-effort basis for signed-in users.
//!
//! # Example
//!
//! ```rust
//! use panelwright_storage::{FileSystemObjectStore, MediaKind, ObjectStore, UploadOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemObjectStore::new("/tmp/panelwright-storage", None)?;
//! let path = MediaKind::Image.object_path("user_1", "comic_1", 1);
//!
//! let object = store
//!     .upload("comic-images", &path, b"png bytes", &UploadOptions::upsert(MediaKind::Image))
//!     .await?;
//! assert_eq!(object.path, "user_1/comic_1/panel_1.png");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod media;
mod object_store;
mod output;
mod persist;

pub use filesystem::FileSystemObjectStore;
pub use media::{MediaKind, decode_audio_base64};
pub use object_store::{ObjectStore, StoredObject, UploadOptions};
pub use output::{LocalOutputDir, SavedFile};
pub use persist::{MediaBuckets, MediaPersister};
pub use panelwright_error::{StorageError, StorageErrorKind};
