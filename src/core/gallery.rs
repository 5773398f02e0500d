//! Gallery business logic.

use crate::{
    entities::{GalleryImage, gallery_image},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves every gallery image, newest first.
pub async fn list_gallery_images(db: &DatabaseConnection) -> Result<Vec<gallery_image::Model>> {
    GalleryImage::find()
        .order_by_desc(gallery_image::Column::CreatedAt)
        .order_by_desc(gallery_image::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a new gallery image for an already stored reference.
pub async fn add_gallery_image(
    db: &DatabaseConnection,
    image: String,
) -> Result<gallery_image::Model> {
    let active = gallery_image::ActiveModel {
        image: Set(image),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = active.insert(db).await?;
    info!("Added gallery image {} (ID: {})", model.image, model.id);
    Ok(model)
}

/// Deletes one gallery image and returns what was removed.
///
/// # Errors
/// Returns `Error::GalleryImageNotFound` when nothing matched.
pub async fn delete_gallery_image(
    db: &DatabaseConnection,
    id: i64,
) -> Result<gallery_image::Model> {
    let image = GalleryImage::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::GalleryImageNotFound { id: id.to_string() })?;

    let result = GalleryImage::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::GalleryImageNotFound { id: id.to_string() });
    }
    info!("Deleted gallery image {} (ID: {})", image.image, image.id);
    Ok(image)
}
