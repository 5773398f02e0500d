//! Member business logic - Listing, creating, replacing and bulk-deleting members.
//!
//! All functions are async, take the shared `DatabaseConnection`, and return crate
//! `Result`s. Image references are plain strings here; storing and deleting the files
//! behind them is the upload store's job, so replace and delete report which references
//! stopped being used.

use crate::{
    entities::{Member, StringList, member},
    errors::{Error, Result},
    models::{BloodGroup, ImageCategory, ImageSet, MemberFilters, RationCardType},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*, sea_query::LikeExpr};
use std::collections::HashSet;
use tracing::{debug, info};

/// Everything a create or replace writes to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberInput {
    /// Full name; must not be blank
    pub name: String,
    /// Contact number
    pub mobile_number: Option<String>,
    /// Age in years, 0..=150
    pub age: Option<i32>,
    /// Blood group
    pub blood_group: Option<BloodGroup>,
    /// Ration card colour
    pub ration_card_type: Option<RationCardType>,
    /// Occupation
    pub occupation: Option<String>,
    /// Known illnesses
    pub disease: Option<String>,
    /// Highest education
    pub education_qualification: Option<String>,
    /// Enrolled welfare schemes
    pub schemes: Vec<String>,
    /// Free-form notes
    pub others: Option<String>,
    /// Ward or area
    pub ward_area: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Date of birth as entered
    pub date_of_birth: Option<String>,
    /// Kudumbasree unit name
    pub kudumbasree_name: Option<String>,
    /// Voter ID number
    pub voter_id: Option<String>,
    /// Image references the member should keep, per category
    pub images: ImageSet,
    /// References the client removed; never persisted
    pub removed: ImageSet,
}

impl MemberInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Member name cannot be empty"));
        }
        if let Some(age) = self.age {
            if !(0..=150).contains(&age) {
                return Err(Error::validation(format!("Age {age} is out of range")));
            }
        }
        Ok(())
    }

    /// Final list of one category: kept references minus the removed ones.
    fn final_images(&self, category: ImageCategory) -> StringList {
        let removed: HashSet<&String> = self.removed.get(category).iter().collect();
        StringList(
            self.images
                .get(category)
                .iter()
                .filter(|reference| !removed.contains(reference))
                .cloned()
                .collect(),
        )
    }

    fn apply_to(&self, active: &mut member::ActiveModel) {
        active.name = Set(self.name.trim().to_string());
        active.mobile_number = Set(self.mobile_number.clone());
        active.age = Set(self.age);
        active.blood_group = Set(self.blood_group.map(|g| g.as_str().to_string()));
        active.ration_card_type = Set(self.ration_card_type.map(|c| c.as_str().to_string()));
        active.occupation = Set(self.occupation.clone());
        active.disease = Set(self.disease.clone());
        active.education_qualification = Set(self.education_qualification.clone());
        active.schemes = Set(StringList(self.schemes.clone()));
        active.others = Set(self.others.clone());
        active.ward_area = Set(self.ward_area.clone());
        active.address = Set(self.address.clone());
        active.date_of_birth = Set(self.date_of_birth.clone());
        active.kudumbasree_name = Set(self.kudumbasree_name.clone());
        active.voter_id = Set(self.voter_id.clone());
        active.images = Set(self.final_images(ImageCategory::General));
        active.ration_card_images = Set(self.final_images(ImageCategory::RationCard));
        active.other_images = Set(self.final_images(ImageCategory::Other));
    }
}

/// Result of a replace: the stored member plus references no longer used by it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacedMember {
    /// The member as stored after the replace
    pub member: member::Model,
    /// References the member no longer uses
    pub orphaned_images: Vec<String>,
}

/// Result of a bulk delete: how many members went away and the images they referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMembers {
    /// Rows removed
    pub count: u64,
    /// References the deleted members used
    pub orphaned_images: Vec<String>,
}

fn all_images(model: &member::Model) -> impl Iterator<Item = &String> {
    model
        .images
        .0
        .iter()
        .chain(&model.ration_card_images.0)
        .chain(&model.other_images.0)
}

/// Parses one member identifier as used in URLs.
pub fn parse_member_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parses a comma-joined identifier list, skipping empty segments.
///
/// # Errors
/// Returns `Error::Validation` when the list is empty or a segment is not an identifier.
pub fn parse_member_ids(raw: &str) -> Result<Vec<i64>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            parse_member_id(segment)
                .ok_or_else(|| Error::validation(format!("Invalid member id '{segment}'")))
        })
        .collect::<Result<Vec<_>>>()?;
    if ids.is_empty() {
        return Err(Error::validation("At least one member id is required"));
    }
    Ok(ids)
}

fn filter_condition(filters: &MemberFilters) -> Condition {
    let mut condition = Condition::all();
    if let Some(min) = filters.age_min {
        condition = condition.add(member::Column::Age.gte(min));
    }
    if let Some(max) = filters.age_max {
        condition = condition.add(member::Column::Age.lte(max));
    }
    if let Some(group) = filters.blood_group {
        condition = condition.add(member::Column::BloodGroup.eq(group.as_str()));
    }
    if let Some(card) = filters.ration_card_type {
        condition = condition.add(member::Column::RationCardType.eq(card.as_str()));
    }
    // SQLite LIKE is case-insensitive for ASCII.
    if let Some(education) = &filters.education_qualification {
        condition = condition.add(member::Column::EducationQualification.like(substring(education)));
    }
    if let Some(disease) = &filters.disease {
        condition = condition.add(member::Column::Disease.like(substring(disease)));
    }
    if let Some(occupation) = &filters.occupation {
        condition = condition.add(member::Column::Occupation.like(substring(occupation)));
    }
    condition
}

/// `LIKE` pattern matching `needle` literally anywhere in the value.
fn substring(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

/// Lists members matching every set filter, newest first.
pub async fn list_members(
    db: &DatabaseConnection,
    filters: &MemberFilters,
) -> Result<Vec<member::Model>> {
    let members = Member::find()
        .filter(filter_condition(filters))
        .order_by_desc(member::Column::CreatedAt)
        .order_by_desc(member::Column::Id)
        .all(db)
        .await?;
    debug!("Listed {} members with filters {:?}", members.len(), filters);
    Ok(members)
}

/// Finds a member by identifier.
pub async fn get_member_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<member::Model>> {
    Member::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a member, stamping the creation time.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The age is outside 0..=150
/// - The database insert fails
pub async fn create_member(db: &DatabaseConnection, input: &MemberInput) -> Result<member::Model> {
    input.validate()?;

    let mut active = member::ActiveModel {
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };
    input.apply_to(&mut active);

    let model = active.insert(db).await?;
    info!("Created member '{}' (ID: {})", model.name, model.id);
    Ok(model)
}

/// Replaces every field of an existing member. Last writer wins.
///
/// # Errors
/// Returns an error if:
/// - The input fails validation
/// - No member has this identifier
/// - The database update fails
pub async fn replace_member(
    db: &DatabaseConnection,
    id: i64,
    input: &MemberInput,
) -> Result<ReplacedMember> {
    input.validate()?;

    let existing = get_member_by_id(db, id)
        .await?
        .ok_or_else(|| Error::MemberNotFound { id: id.to_string() })?;
    let previous_images: Vec<String> = all_images(&existing).cloned().collect();

    let mut active: member::ActiveModel = existing.into();
    input.apply_to(&mut active);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let model = active.update(db).await?;

    let still_used: HashSet<&String> = all_images(&model).collect();
    let orphaned_images = previous_images
        .into_iter()
        .filter(|reference| !still_used.contains(reference))
        .collect();

    info!("Replaced member '{}' (ID: {})", model.name, model.id);
    Ok(ReplacedMember {
        member: model,
        orphaned_images,
    })
}

/// Deletes every member whose identifier is listed. Unknown identifiers are ignored.
pub async fn delete_members(db: &DatabaseConnection, ids: &[i64]) -> Result<DeletedMembers> {
    let doomed = Member::find()
        .filter(member::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    let orphaned_images = doomed.iter().flat_map(all_images).cloned().collect();

    let result = Member::delete_many()
        .filter(member::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    info!(
        "Deleted {} of {} requested members",
        result.rows_affected,
        ids.len()
    );
    Ok(DeletedMembers {
        count: result.rows_affected,
        orphaned_images,
    })
}
