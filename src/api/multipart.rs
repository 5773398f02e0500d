//! Decoding of member form submissions.
//!
//! Text parts carry scalars as strings and lists as JSON arrays. Parts that carry a file
//! name are uploads: they are written to the upload store and their references appended to
//! the list named by the part. A part named `images` can therefore appear both as the JSON
//! list of kept references and as any number of new files.

use crate::{
    core::{UploadStore, member::MemberInput},
    errors::{Error, Result},
    models::{ImageCategory, ImageSet},
};
use axum::extract::Multipart;
use tracing::debug;

/// A decoded submission together with the references stored while reading it.
#[derive(Debug)]
pub struct MemberSubmission {
    /// Decoded field values
    pub input: MemberInput,
    /// New uploads; remove these if the submission is abandoned
    pub stored: Vec<String>,
}

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_list(field: &str, value: &str) -> Result<Vec<String>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(value)
        .map_err(|e| Error::validation(format!("Field '{field}' must be a JSON string array: {e}")))
}

fn apply_text(
    input: &mut MemberInput,
    kept: &mut ImageSet,
    name: &str,
    value: String,
) -> Result<()> {
    if let Some(category) = ImageCategory::from_field_name(name) {
        kept.get_mut(category).extend(parse_list(name, &value)?);
        return Ok(());
    }
    if let Some(category) = ImageCategory::ALL
        .into_iter()
        .find(|c| c.removed_field_name() == name)
    {
        input
            .removed
            .get_mut(category)
            .extend(parse_list(name, &value)?);
        return Ok(());
    }

    match name {
        "name" => input.name = value,
        "mobileNumber" => input.mobile_number = optional_text(value),
        "age" => {
            input.age = optional_text(value)
                .map(|v| {
                    v.parse()
                        .map_err(|_| Error::validation(format!("Age must be a whole number, got '{v}'")))
                })
                .transpose()?;
        }
        "bloodGroup" => input.blood_group = optional_text(value).map(|v| v.parse()).transpose()?,
        "rationCardType" => {
            input.ration_card_type = optional_text(value).map(|v| v.parse()).transpose()?;
        }
        "occupation" => input.occupation = optional_text(value),
        "disease" => input.disease = optional_text(value),
        "educationQualification" => input.education_qualification = optional_text(value),
        "schemes" => input.schemes = parse_list(name, &value)?,
        "others" => input.others = optional_text(value),
        "wardArea" => input.ward_area = optional_text(value),
        "address" => input.address = optional_text(value),
        "dateOfBirth" => input.date_of_birth = optional_text(value),
        "kudumbasreeName" => input.kudumbasree_name = optional_text(value),
        "voterId" => input.voter_id = optional_text(value),
        other => debug!("Ignoring unknown member field '{}'", other),
    }
    Ok(())
}

async fn collect(
    multipart: &mut Multipart,
    uploads: &UploadStore,
    stored: &mut Vec<String>,
) -> Result<MemberInput> {
    let mut input = MemberInput::default();
    let mut kept = ImageSet::default();
    let mut added = ImageSet::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let Some(category) = ImageCategory::from_field_name(&name) else {
                debug!("Ignoring file part under unknown field '{}'", name);
                continue;
            };
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                continue;
            }
            let reference = uploads.save(&file_name, &content_type, &bytes).await?;
            stored.push(reference.clone());
            added.get_mut(category).push(reference);
        } else {
            let value = field.text().await?;
            apply_text(&mut input, &mut kept, &name, value)?;
        }
    }

    for category in ImageCategory::ALL {
        let list = kept.get_mut(category);
        list.append(added.get_mut(category));
    }
    input.images = kept;
    Ok(input)
}

/// Reads a member form. On failure every file stored so far is removed again.
pub async fn read_member_submission(
    mut multipart: Multipart,
    uploads: &UploadStore,
) -> Result<MemberSubmission> {
    let mut stored = Vec::new();
    match collect(&mut multipart, uploads, &mut stored).await {
        Ok(input) => Ok(MemberSubmission { input, stored }),
        Err(e) => {
            uploads.remove_all(&stored).await;
            Err(e)
        }
    }
}

/// Reads the single `image` file part of a gallery upload and stores it.
pub async fn read_gallery_upload(mut multipart: Multipart, uploads: &UploadStore) -> Result<String> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            break;
        }
        return uploads.save(&file_name, &content_type, &bytes).await;
    }
    Err(Error::validation("An 'image' file is required"))
}
