//! Wire types shared by the HTTP API and the dashboard client.
//!
//! Identifiers are strings and keys are camelCase on the wire, whatever the storage uses.

use crate::entities::{CategoryModel, GalleryImageModel, MemberModel};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood group offered by the member filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    /// O positive
    #[serde(rename = "O+")]
    OPositive,
    /// O negative
    #[serde(rename = "O-")]
    ONegative,
    /// A positive
    #[serde(rename = "A+")]
    APositive,
    /// A negative
    #[serde(rename = "A-")]
    ANegative,
    /// B positive
    #[serde(rename = "B+")]
    BPositive,
    /// B negative
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodGroup {
    /// All groups in display order.
    pub const ALL: [Self; 8] = [
        Self::OPositive,
        Self::ONegative,
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
    ];

    /// Label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OPositive => "O+",
            Self::ONegative => "O-",
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
        }
    }
}

impl FromStr for BloodGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| Error::validation(format!("Unknown blood group '{s}'")))
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour of the household ration card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RationCardType {
    /// Yellow card
    #[serde(rename = "Yellow card")]
    Yellow,
    /// Pink card
    #[serde(rename = "Pink card")]
    Pink,
    /// Blue card
    #[serde(rename = "Blue card")]
    Blue,
    /// White card
    #[serde(rename = "White card")]
    White,
}

impl RationCardType {
    /// All card types in display order.
    pub const ALL: [Self; 4] = [Self::Yellow, Self::Pink, Self::Blue, Self::White];

    /// Label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow card",
            Self::Pink => "Pink card",
            Self::Blue => "Blue card",
            Self::White => "White card",
        }
    }
}

impl FromStr for RationCardType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|card| card.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("Unknown ration card type '{s}'")))
    }
}

impl fmt::Display for RationCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent image lists a member carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageCategory {
    /// General member photos
    General,
    /// Ration card scans
    RationCard,
    /// Anything else
    Other,
}

impl ImageCategory {
    /// All categories in form order.
    pub const ALL: [Self; 3] = [Self::General, Self::RationCard, Self::Other];

    /// Multipart field name carrying the current list and new files of this category.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::General => "images",
            Self::RationCard => "rationCardImages",
            Self::Other => "otherImages",
        }
    }

    /// Multipart field name carrying the references removed from this category.
    #[must_use]
    pub const fn removed_field_name(self) -> &'static str {
        match self {
            Self::General => "removedImages",
            Self::RationCard => "removedRationCardImages",
            Self::Other => "removedOtherImages",
        }
    }

    /// Looks a category up by its [`field_name`](Self::field_name).
    #[must_use]
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.field_name() == name)
    }
}

/// One ordered list of image references per [`ImageCategory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    /// General member photos
    pub general: Vec<String>,
    /// Ration card scans
    pub ration_card: Vec<String>,
    /// Everything else
    pub other: Vec<String>,
}

impl ImageSet {
    /// References of one category.
    #[must_use]
    pub fn get(&self, category: ImageCategory) -> &[String] {
        match category {
            ImageCategory::General => &self.general,
            ImageCategory::RationCard => &self.ration_card,
            ImageCategory::Other => &self.other,
        }
    }

    /// Mutable references of one category.
    pub fn get_mut(&mut self, category: ImageCategory) -> &mut Vec<String> {
        match category {
            ImageCategory::General => &mut self.general,
            ImageCategory::RationCard => &mut self.ration_card,
            ImageCategory::Other => &mut self.other,
        }
    }

    /// Every reference of every category.
    pub fn iter_all(&self) -> impl Iterator<Item = &String> {
        self.general
            .iter()
            .chain(&self.ration_card)
            .chain(&self.other)
    }

    /// Whether no category holds a reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter_all().next().is_none()
    }
}

/// A member record as returned by `/api/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Record identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact number
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<i32>,
    /// Blood group, if known
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    /// Household ration card colour
    #[serde(default)]
    pub ration_card_type: Option<RationCardType>,
    /// Occupation
    #[serde(default)]
    pub occupation: Option<String>,
    /// Known illnesses, free text
    #[serde(default)]
    pub disease: Option<String>,
    /// Highest education
    #[serde(default)]
    pub education_qualification: Option<String>,
    /// Welfare schemes the member is enrolled in
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Free-form notes
    #[serde(default)]
    pub others: Option<String>,
    /// Ward or area
    #[serde(default)]
    pub ward_area: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Date of birth as entered
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Kudumbasree unit name
    #[serde(default)]
    pub kudumbasree_name: Option<String>,
    /// Voter ID card number
    #[serde(default)]
    pub voter_id: Option<String>,
    /// General photo references
    #[serde(default)]
    pub images: Vec<String>,
    /// Ration card scan references
    #[serde(default)]
    pub ration_card_images: Vec<String>,
    /// Other image references
    #[serde(default)]
    pub other_images: Vec<String>,
    /// When the member was registered
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the member was last replaced
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            mobile_number: model.mobile_number,
            age: model.age,
            blood_group: model.blood_group.and_then(|g| g.parse().ok()),
            ration_card_type: model.ration_card_type.and_then(|c| c.parse().ok()),
            occupation: model.occupation,
            disease: model.disease,
            education_qualification: model.education_qualification,
            schemes: model.schemes.0,
            others: model.others,
            ward_area: model.ward_area,
            address: model.address,
            date_of_birth: model.date_of_birth,
            kudumbasree_name: model.kudumbasree_name,
            voter_id: model.voter_id,
            images: model.images.0,
            ration_card_images: model.ration_card_images.0,
            other_images: model.other_images.0,
            created_at: Some(model.created_at),
            updated_at: model.updated_at,
        }
    }
}

/// One member filter, named by its query-string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// `ageMin`
    AgeMin,
    /// `ageMax`
    AgeMax,
    /// `bloodGroup`
    BloodGroup,
    /// `rationCardType`
    RationCardType,
    /// `educationQualification`
    EducationQualification,
    /// `disease`
    Disease,
    /// `occupation`
    Occupation,
}

impl FilterKey {
    /// Query-string key for this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgeMin => "ageMin",
            Self::AgeMax => "ageMax",
            Self::BloodGroup => "bloodGroup",
            Self::RationCardType => "rationCardType",
            Self::EducationQualification => "educationQualification",
            Self::Disease => "disease",
            Self::Occupation => "occupation",
        }
    }
}

/// Filter set accepted by `GET /api/members`. Unset filters are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFilters {
    /// Lowest age, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_min: Option<i32>,
    /// Highest age, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_max: Option<i32>,
    /// Exact blood group
    #[serde(
        default,
        deserialize_with = "deserialize_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub blood_group: Option<BloodGroup>,
    /// Exact ration card type
    #[serde(
        default,
        deserialize_with = "deserialize_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub ration_card_type: Option<RationCardType>,
    /// Substring of the education field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_qualification: Option<String>,
    /// Substring of the disease field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    /// Substring of the occupation field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

/// Reads a query value through the type's case-insensitive [`FromStr`]. Blank means unset.
fn deserialize_choice<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = Error>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn parse_age(key: FilterKey, raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| Error::InvalidFilter {
        key: key.as_str().to_string(),
        value: raw.to_string(),
    })
}

fn parse_choice<T: FromStr<Err = Error>>(key: FilterKey, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| Error::InvalidFilter {
        key: key.as_str().to_string(),
        value: raw.to_string(),
    })
}

impl MemberFilters {
    /// Stages one filter from raw input. An empty (or blank) value unsets the filter.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFilter`] when the value does not parse for that key; the
    /// filter set is left unchanged in that case.
    pub fn set(&mut self, key: FilterKey, raw: &str) -> Result<()> {
        let raw = raw.trim();
        let text = (!raw.is_empty()).then(|| raw.to_string());
        match key {
            FilterKey::AgeMin => {
                self.age_min = text.map(|v| parse_age(key, &v)).transpose()?;
            }
            FilterKey::AgeMax => {
                self.age_max = text.map(|v| parse_age(key, &v)).transpose()?;
            }
            FilterKey::BloodGroup => {
                self.blood_group = text.map(|v| parse_choice(key, &v)).transpose()?;
            }
            FilterKey::RationCardType => {
                self.ration_card_type = text.map(|v| parse_choice(key, &v)).transpose()?;
            }
            FilterKey::EducationQualification => self.education_qualification = text,
            FilterKey::Disease => self.disease = text,
            FilterKey::Occupation => self.occupation = text,
        }
        Ok(())
    }

    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query accepted by `DELETE /api/members`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkDeleteQuery {
    /// Comma-joined identifiers
    #[serde(default)]
    pub ids: Option<String>,
}

/// Answer to a successful bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    /// Number of records removed
    pub deleted: u64,
}

/// A category as returned by `/api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Record identifier
    pub id: String,
    /// Category name
    pub name: String,
    /// What the category is for
    pub description: String,
    /// Creation time; the epoch when none was stored
    pub created_at: DateTime<Utc>,
    /// Last modification time, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            description: model.description,
            created_at: model.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            modified_at: model.modified_at,
        }
    }
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Category name
    pub name: String,
    /// What the category is for
    #[serde(default)]
    pub description: String,
    /// Creation time; defaults to now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A gallery image as returned by `/api/gallery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    /// Record identifier
    pub id: String,
    /// Public reference of the stored file
    pub image: String,
    /// Upload time
    pub created_at: DateTime<Utc>,
}

impl From<GalleryImageModel> for GalleryImage {
    fn from(model: GalleryImageModel) -> Self {
        Self {
            id: model.id.to_string(),
            image: model.image,
            created_at: model.created_at,
        }
    }
}

/// Body of `DELETE /api/gallery`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDeleteRequest {
    /// Identifier of the image to delete
    #[serde(default)]
    pub image_id: Option<String>,
}

/// Structured failure body used by the gallery endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong
    pub error: String,
}

/// Structured confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// What happened
    pub message: String,
}
