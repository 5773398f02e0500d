//! Gallery image entity - One uploaded picture shown in the public gallery.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery image database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery")]
pub struct Model {
    /// Unique identifier for the image
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque image reference, usually the public path of a stored upload
    pub image: String,
    /// When the image was added
    pub created_at: DateTimeUtc,
}

/// `GalleryImage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
