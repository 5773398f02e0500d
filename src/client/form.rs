//! Member form state.
//!
//! A form is opened either empty (create) or from an existing member (edit). Each file the
//! user picks is tagged with its image category when it is picked, so the submission knows
//! which multipart field it belongs to without any later guessing.

use crate::models::{BloodGroup, ImageCategory, ImageSet, Member, RationCardType};
use serde::Serialize;

/// A file selected in the form but not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// List the file is uploaded into
    pub category: ImageCategory,
    /// Name the file was picked with
    pub file_name: String,
    /// MIME type of the file
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl PendingFile {
    /// Tags a picked file with the list it should land in.
    pub fn new(
        category: ImageCategory,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            category,
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// The values a member form submits. Serialized camelCase, one multipart field per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFormValues {
    /// Full name
    pub name: String,
    /// Contact number
    pub mobile_number: Option<String>,
    /// Age in years
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
    /// General photos to keep
    pub images: Vec<String>,
    /// Ration card scans to keep
    pub ration_card_images: Vec<String>,
    /// Other images to keep
    pub other_images: Vec<String>,
    /// General photos removed in this edit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_images: Vec<String>,
    /// Ration card scans removed in this edit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_ration_card_images: Vec<String>,
    /// Other images removed in this edit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_other_images: Vec<String>,
}

impl MemberFormValues {
    /// Current references of one category.
    #[must_use]
    pub fn images(&self, category: ImageCategory) -> &[String] {
        match category {
            ImageCategory::General => &self.images,
            ImageCategory::RationCard => &self.ration_card_images,
            ImageCategory::Other => &self.other_images,
        }
    }

    fn images_mut(&mut self, category: ImageCategory) -> &mut Vec<String> {
        match category {
            ImageCategory::General => &mut self.images,
            ImageCategory::RationCard => &mut self.ration_card_images,
            ImageCategory::Other => &mut self.other_images,
        }
    }

    fn removed_mut(&mut self, category: ImageCategory) -> &mut Vec<String> {
        match category {
            ImageCategory::General => &mut self.removed_images,
            ImageCategory::RationCard => &mut self.removed_ration_card_images,
            ImageCategory::Other => &mut self.removed_other_images,
        }
    }

    /// References removed during this edit, per category.
    #[must_use]
    pub fn removed(&self) -> ImageSet {
        ImageSet {
            general: self.removed_images.clone(),
            ration_card: self.removed_ration_card_images.clone(),
            other: self.removed_other_images.clone(),
        }
    }
}

impl From<&Member> for MemberFormValues {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            mobile_number: member.mobile_number.clone(),
            age: member.age,
            blood_group: member.blood_group,
            ration_card_type: member.ration_card_type,
            occupation: member.occupation.clone(),
            disease: member.disease.clone(),
            education_qualification: member.education_qualification.clone(),
            schemes: member.schemes.clone(),
            others: member.others.clone(),
            ward_area: member.ward_area.clone(),
            address: member.address.clone(),
            date_of_birth: member.date_of_birth.clone(),
            kudumbasree_name: member.kudumbasree_name.clone(),
            voter_id: member.voter_id.clone(),
            images: member.images.clone(),
            ration_card_images: member.ration_card_images.clone(),
            other_images: member.other_images.clone(),
            ..Self::default()
        }
    }
}

/// Splits the comma-separated schemes input into trimmed, non-empty entries.
#[must_use]
pub fn parse_schemes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create/edit form for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberForm {
    id: Option<String>,
    values: MemberFormValues,
    pending: Vec<PendingFile>,
}

impl MemberForm {
    /// Empty form for a new member.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing member.
    #[must_use]
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: Some(member.id.clone()),
            values: MemberFormValues::from(member),
            pending: Vec::new(),
        }
    }

    /// Identifier of the member being edited, `None` when creating.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Current field values.
    #[must_use]
    pub const fn values(&self) -> &MemberFormValues {
        &self.values
    }

    /// Field values for editing.
    pub fn values_mut(&mut self) -> &mut MemberFormValues {
        &mut self.values
    }

    /// Replaces the schemes from the comma-separated input box.
    pub fn set_schemes(&mut self, raw: &str) {
        self.values.schemes = parse_schemes(raw);
    }

    /// Files picked but not yet uploaded, in pick order.
    #[must_use]
    pub fn pending(&self) -> &[PendingFile] {
        &self.pending
    }

    /// Queues a picked file for upload.
    pub fn add_pending(&mut self, file: PendingFile) {
        self.pending.push(file);
    }

    /// Drops a picked file before submission.
    pub fn remove_pending(&mut self, index: usize) -> Option<PendingFile> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    /// Removes a stored image from its list and records it as removed.
    ///
    /// Returns `false` when the reference is not in that list.
    pub fn remove_image(&mut self, category: ImageCategory, reference: &str) -> bool {
        let list = self.values.images_mut(category);
        let Some(position) = list.iter().position(|r| r == reference) else {
            return false;
        };
        let removed = list.remove(position);
        self.values.removed_mut(category).push(removed);
        true
    }
}
