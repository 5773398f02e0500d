//! Category business logic.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
    models::NewCategory,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves every category, newest first. Categories without a creation time sort last.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_desc(category::Column::CreatedAt)
        .order_by_desc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a category. The creation time defaults to now; the modification time starts empty.
///
/// The returned model carries the creation time that was actually stored.
///
/// # Errors
/// Returns an error if the name is empty or the database insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    new_category: NewCategory,
) -> Result<category::Model> {
    if new_category.name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }

    let category = category::ActiveModel {
        name: Set(new_category.name.trim().to_string()),
        description: Set(new_category.description),
        created_at: Set(Some(new_category.created_at.unwrap_or_else(chrono::Utc::now))),
        modified_at: Set(None),
        ..Default::default()
    };
    let model = category.insert(db).await?;
    info!("Created category '{}' (ID: {})", model.name, model.id);
    Ok(model)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{DateTime, SubsecRound, TimeZone, Utc};

    fn new_category(name: &str, created_at: Option<DateTime<Utc>>) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: format!("{name} description"),
            created_at,
        }
    }

    #[tokio::test]
    async fn test_create_category_defaults_timestamp() -> Result<()> {
        let db = setup_test_db().await?;
        let before = Utc::now().trunc_subsecs(3);

        let created = create_category(&db, new_category("Volunteers", None)).await?;
        assert_eq!(created.name, "Volunteers");
        assert!(created.created_at.unwrap() >= before);
        assert!(created.modified_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_keeps_supplied_timestamp() -> Result<()> {
        let db = setup_test_db().await?;
        let supplied = Utc.with_ymd_and_hms(2023, 5, 1, 9, 30, 0).unwrap();

        let created = create_category(&db, new_category("Elders", Some(supplied))).await?;
        assert_eq!(created.created_at, Some(supplied));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_requires_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(&db, new_category(" ", None)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(list_categories(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let old = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        create_category(&db, new_category("Old", Some(old))).await?;
        create_category(&db, new_category("New", Some(new))).await?;
        let legacy = category::ActiveModel {
            name: Set("Legacy".to_string()),
            description: Set(String::new()),
            created_at: Set(None),
            modified_at: Set(None),
            ..Default::default()
        };
        legacy.insert(&db).await?;

        let names: Vec<String> = list_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["New", "Old", "Legacy"]);
        Ok(())
    }
}
