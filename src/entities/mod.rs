//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity maps one collection of records (members, categories, gallery images).
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod gallery_image;
pub mod member;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of strings stored as a single JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use gallery_image::{
    Column as GalleryImageColumn, Entity as GalleryImage, Model as GalleryImageModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
