//! Member entity - Represents one registered member of the ward.
//!
//! Besides personal and address details, a member carries three independent ordered lists
//! of image references (general, ration card, other). The lists are stored as JSON columns.

use super::StringList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact phone number
    pub mobile_number: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    /// Blood group label such as `"AB+"`
    pub blood_group: Option<String>,
    /// Ration card colour label such as `"Yellow card"`
    pub ration_card_type: Option<String>,
    /// Occupation
    pub occupation: Option<String>,
    /// Free text describing known diseases
    pub disease: Option<String>,
    /// Highest education
    pub education_qualification: Option<String>,
    /// Names of welfare schemes the member is enrolled in
    #[sea_orm(column_type = "Json")]
    pub schemes: StringList,
    /// Free-form notes
    pub others: Option<String>,
    /// Ward or area
    pub ward_area: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Date of birth exactly as entered
    pub date_of_birth: Option<String>,
    /// Kudumbasree unit the member belongs to
    pub kudumbasree_name: Option<String>,
    /// Voter ID card number
    pub voter_id: Option<String>,
    /// General member photos
    #[sea_orm(column_type = "Json")]
    pub images: StringList,
    /// Scans of the ration card
    #[sea_orm(column_type = "Json")]
    pub ration_card_images: StringList,
    /// Any other attached images
    #[sea_orm(column_type = "Json")]
    pub other_images: StringList,
    /// When the member was created
    pub created_at: DateTimeUtc,
    /// When the member was last replaced, if ever
    pub updated_at: Option<DateTimeUtc>,
}

/// Members have no enforced relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
