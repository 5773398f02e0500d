//! Category entity - Named groupings with a description.
//!
//! The creation timestamp is nullable so documents written by other tools without one
//! still load; readers substitute the epoch.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Longer description
    pub description: String,
    /// When the category was created
    pub created_at: Option<DateTimeUtc>,
    /// When the category was last modified; always empty on insert
    pub modified_at: Option<DateTimeUtc>,
}

/// `Category` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
