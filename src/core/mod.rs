//! Core business logic - framework-agnostic operations on members, categories and the
//! gallery, plus the upload store that keeps image files on disk.

/// Category listing and creation
pub mod category;
/// Gallery image listing, creation and deletion
pub mod gallery;
/// Member listing, filtering, create/replace and bulk delete
pub mod member;
/// On-disk storage for uploaded images
pub mod uploads;

pub use uploads::UploadStore;
