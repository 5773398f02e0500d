//! reqwest client for the dashboard API.

use super::{MemberApi, payload::{MultipartPayload, SaveTarget}};
use crate::{
    errors::{Error, Result},
    models::{
        BulkDeleteResponse, Category, GalleryDeleteRequest, GalleryImage, Member, MemberFilters,
        NewCategory,
    },
};
use reqwest::{
    Response,
    multipart::{Form, Part},
};
use tracing::debug;

/// Talks to a running dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
    http: reqwest::Client,
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        debug!("{} answered {}", response.url(), status);
        Err(Error::UnexpectedStatus {
            status: status.as_u16(),
        })
    }
}

impl DashboardClient {
    /// Client for the server at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Same as [`new`](Self::new) with a preconfigured reqwest client.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Server root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/categories`
    ///
    /// # Errors
    /// Transport failure or a non-success status.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let response = self.http.get(self.url("/api/categories")).send().await?;
        Ok(check(response)?.json().await?)
    }

    /// `POST /api/categories`
    ///
    /// # Errors
    /// Transport failure or a non-success status.
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let response = self
            .http
            .post(self.url("/api/categories"))
            .json(category)
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    /// `GET /api/gallery`
    ///
    /// # Errors
    /// Transport failure or a non-success status.
    pub async fn list_gallery(&self) -> Result<Vec<GalleryImage>> {
        let response = self.http.get(self.url("/api/gallery")).send().await?;
        Ok(check(response)?.json().await?)
    }

    /// `POST /api/gallery` with one `image` file part.
    ///
    /// # Errors
    /// Transport failure, an invalid content type, or a non-success status.
    pub async fn upload_gallery_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<GalleryImage> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let response = self
            .http
            .post(self.url("/api/gallery"))
            .multipart(Form::new().part("image", part))
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    /// `DELETE /api/gallery` with `{"imageId": id}`.
    ///
    /// # Errors
    /// Transport failure or a non-success status (404 when no image matched).
    pub async fn delete_gallery_image(&self, id: &str) -> Result<()> {
        let body = GalleryDeleteRequest {
            image_id: Some(id.to_string()),
        };
        let response = self
            .http
            .delete(self.url("/api/gallery"))
            .json(&body)
            .send()
            .await?;
        check(response)?;
        Ok(())
    }
}

impl MemberApi for DashboardClient {
    async fn list_members(&self, filters: &MemberFilters) -> Result<Vec<Member>> {
        let response = self
            .http
            .get(self.url("/api/members"))
            .query(filters)
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn save_member(&self, id: Option<&str>, payload: MultipartPayload) -> Result<Member> {
        let target = SaveTarget::for_id(id);
        let response = self
            .http
            .request(target.method(), self.url(&target.path()))
            .multipart(payload.into_form()?)
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn delete_members(&self, ids: &[String]) -> Result<()> {
        let response = self
            .http
            .delete(self.url("/api/members"))
            .query(&[("ids", ids.join(","))])
            .send()
            .await?;
        let deleted: BulkDeleteResponse = check(response)?.json().await?;
        debug!("Server deleted {} of {} members", deleted.deleted, ids.len());
        Ok(())
    }
}
