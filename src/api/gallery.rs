//! `/api/gallery` handlers.
//!
//! Unlike the other endpoints, every failure here carries a JSON `{"error": ...}` body.

use super::{AppState, multipart::read_gallery_upload};
use crate::{
    core::gallery,
    errors::Error,
    models::{ErrorBody, GalleryDeleteRequest, GalleryImage, MessageBody},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// `GET /api/gallery` - every image, newest first.
pub async fn list_gallery(State(state): State<AppState>) -> Response {
    match gallery::list_gallery_images(&state.db).await {
        Ok(images) => {
            let images: Vec<GalleryImage> = images.into_iter().map(GalleryImage::from).collect();
            (StatusCode::OK, Json(images)).into_response()
        }
        Err(e) => {
            error!("Fetch error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch images")
        }
    }
}

/// `POST /api/gallery` - stores the `image` file part and records it.
pub async fn upload_gallery_image(State(state): State<AppState>, multipart: Multipart) -> Response {
    let reference = match read_gallery_upload(multipart, &state.uploads).await {
        Ok(reference) => reference,
        Err(e) if e.is_client_error() => {
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
        Err(e) => {
            error!("Upload error: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload image");
        }
    };

    match gallery::add_gallery_image(&state.db, reference.clone()).await {
        Ok(model) => (StatusCode::CREATED, Json(GalleryImage::from(model))).into_response(),
        Err(e) => {
            error!("Upload error: {}", e);
            state.uploads.remove_all([&reference]).await;
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload image")
        }
    }
}

/// `DELETE /api/gallery` - body `{"imageId": "..."}`.
pub async fn delete_gallery_image(State(state): State<AppState>, body: Bytes) -> Response {
    let request: GalleryDeleteRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(image_id) = request.image_id.filter(|id| !id.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Image ID is required");
    };

    // An identifier that cannot exist cannot match anything either.
    let Ok(id) = image_id.trim().parse::<i64>() else {
        return error_response(StatusCode::NOT_FOUND, "Image not found");
    };

    match gallery::delete_gallery_image(&state.db, id).await {
        Ok(deleted) => {
            state.uploads.remove_all([&deleted.image]).await;
            (
                StatusCode::OK,
                Json(MessageBody {
                    message: "Image deleted successfully!".to_string(),
                }),
            )
                .into_response()
        }
        Err(Error::GalleryImageNotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, "Image not found")
        }
        Err(e) => {
            error!("Delete error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete image")
        }
    }
}
