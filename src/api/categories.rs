//! `/api/categories` handlers.

use super::AppState;
use crate::{
    core::category,
    errors::{Error, Result},
    models::{Category, NewCategory},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// `GET /api/categories` - every category, newest first.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category::list_categories(&state.db).await?;
    Ok(Json(categories.into_iter().map(Category::from).collect()))
}

/// `POST /api/categories` - creates a category and echoes it with status 201.
pub async fn create_category(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>)> {
    let Json(new_category) = payload.map_err(|rejection| Error::validation(rejection.body_text()))?;
    let model = category::create_category(&state.db, new_category).await?;
    let mut created = Category::from(model);
    created.modified_at = None;
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::{errors::Result, models::Category, test_utils::*};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::{SubsecRound, Utc};
    use tower::ServiceExt;

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/api/categories")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_category_assigns_timestamp() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;
        let before = Utc::now().trunc_subsecs(3);

        let response = app
            .oneshot(post_json(r#"{"name":"Youth","description":"Under 30"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json: serde_json::Value = read_json(response).await;
        assert!(json.get("modifiedAt").is_none());
        let created: Category = serde_json::from_value(json)?;
        assert_eq!(created.name, "Youth");
        assert_eq!(created.description, "Under 30");
        assert!(created.created_at >= before);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_echoes_supplied_timestamp() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        let response = app
            .oneshot(post_json(
                r#"{"name":"Elders","description":"","createdAt":"2022-03-04T05:06:07Z"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Category = read_json(response).await;
        assert_eq!(created.created_at.to_rfc3339(), "2022-03-04T05:06:07+00:00");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_sorted() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        for body in [
            r#"{"name":"Old","description":"","createdAt":"2020-01-01T00:00:00Z"}"#,
            r#"{"name":"New","description":"","createdAt":"2024-01-01T00:00:00Z"}"#,
        ] {
            let response = app.clone().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(Request::get("/api/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let categories: Vec<Category> = read_json(response).await;
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Old"]);
        assert!(categories.iter().all(|c| c.id.parse::<i64>().is_ok()));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_rejects_empty_name() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        let response = app
            .oneshot(post_json(r#"{"name":"  ","description":"x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_malformed_body_is_bad_request() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        for body in [
            r#"{"description":"no name"}"#,
            r#"{"name":"Elders","createdAt":"yesterday"}"#,
            "not json",
        ] {
            let response = app.clone().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        }

        let response = app
            .oneshot(Request::get("/api/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let categories: Vec<Category> = read_json(response).await;
        assert!(categories.is_empty());
        Ok(())
    }
}
