//! Multipart payloads for member create and update requests.
//!
//! Scalars travel as their plain string form, lists and nested values as one JSON-encoded
//! field, and absent values are left out entirely. Each pending file becomes a file part
//! under the field of its category.

use super::form::PendingFile;
use crate::errors::{Error, Result};
use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde::Serialize;
use serde_json::Value;

/// One file part of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name
    pub field: &'static str,
    /// Name sent with the part
    pub file_name: String,
    /// MIME type of the part
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// A member submission ready to be sent as `multipart/form-data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    /// Text parts in key order
    pub fields: Vec<(String, String)>,
    /// File parts in pick order
    pub files: Vec<FilePart>,
}

fn field_text(value: Value) -> Result<Option<String>> {
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(serde_json::to_string(&nested)?),
    })
}

impl MultipartPayload {
    /// Flattens `values` (which must serialize to a JSON object) and appends `pending`.
    ///
    /// # Errors
    /// Returns an error if `values` does not serialize to an object.
    pub fn build(values: &impl Serialize, pending: &[PendingFile]) -> Result<Self> {
        let Value::Object(map) = serde_json::to_value(values)? else {
            return Err(Error::validation("Form values must serialize to an object"));
        };

        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            if let Some(text) = field_text(value)? {
                fields.push((key, text));
            }
        }

        let files = pending
            .iter()
            .map(|file| FilePart {
                field: file.category.field_name(),
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
                bytes: file.bytes.clone(),
            })
            .collect();

        Ok(Self { fields, files })
    }

    /// Value of a text part, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Converts into a reqwest form.
    ///
    /// # Errors
    /// Returns an error if a file's content type is not a valid MIME type.
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        for file in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// Where a member save goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// `POST /api/members`
    Create,
    /// `PUT /api/members/{id}`
    Update(String),
}

impl SaveTarget {
    /// Update when an identifier is known, create otherwise.
    #[must_use]
    pub fn for_id(id: Option<&str>) -> Self {
        id.map_or(Self::Create, |id| Self::Update(id.to_string()))
    }

    /// HTTP method of the request.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Create => Method::POST,
            Self::Update(_) => Method::PUT,
        }
    }

    /// Request path, relative to the server root.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Create => "/api/members".to_string(),
            Self::Update(id) => format!("/api/members/{id}"),
        }
    }
}
