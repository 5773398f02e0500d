//! `/api/members` handlers.

use super::{AppState, multipart::read_member_submission};
use crate::{
    core::member::{self, parse_member_id, parse_member_ids},
    errors::{Error, Result},
    models::{BulkDeleteQuery, BulkDeleteResponse, Member, MemberFilters},
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};

/// `GET /api/members` - members matching the query filters, newest first.
pub async fn list_members(
    State(state): State<AppState>,
    Query(filters): Query<MemberFilters>,
) -> Result<Json<Vec<Member>>> {
    let members = member::list_members(&state.db, &filters).await?;
    Ok(Json(members.into_iter().map(Member::from).collect()))
}

/// `POST /api/members` - creates a member from a multipart form.
pub async fn create_member(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Member>)> {
    let submission = read_member_submission(multipart, &state.uploads).await?;

    match member::create_member(&state.db, &submission.input).await {
        Ok(model) => Ok((StatusCode::CREATED, Json(Member::from(model)))),
        Err(e) => {
            state.uploads.remove_all(&submission.stored).await;
            Err(e)
        }
    }
}

/// `PUT /api/members/{id}` - replaces a member from a multipart form.
pub async fn replace_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Member>> {
    let member_id = parse_member_id(&id).ok_or(Error::MemberNotFound { id })?;
    let submission = read_member_submission(multipart, &state.uploads).await?;

    match member::replace_member(&state.db, member_id, &submission.input).await {
        Ok(replaced) => {
            state.uploads.remove_all(&replaced.orphaned_images).await;
            Ok(Json(Member::from(replaced.member)))
        }
        Err(e) => {
            state.uploads.remove_all(&submission.stored).await;
            Err(e)
        }
    }
}

/// `DELETE /api/members?ids=1,2,3` - bulk delete.
pub async fn delete_members(
    State(state): State<AppState>,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<Json<BulkDeleteResponse>> {
    let ids = parse_member_ids(query.ids.as_deref().unwrap_or_default())?;
    let deleted = member::delete_members(&state.db, &ids).await?;
    state.uploads.remove_all(&deleted.orphaned_images).await;
    Ok(Json(BulkDeleteResponse {
        deleted: deleted.count,
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::{
        errors::Result,
        models::{BloodGroup, BulkDeleteResponse, Member, MemberFilters, RationCardType},
        test_utils::*,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    fn multipart_request(method: &str, uri: &str, body: MultipartBody) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, MultipartBody::content_type())
            .body(Body::from(body.finish()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_member_with_files() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;

        let body = MultipartBody::new()
            .text("name", "Asha")
            .text("age", "41")
            .text("schemes", r#"["Pension"]"#)
            .text("images", "[]")
            .file("images", "face.png", "image/png", b"face")
            .file("rationCardImages", "card.jpg", "image/jpeg", b"card")
            .file("otherImages", "misc.png", "image/png", b"misc");
        let response = app
            .oneshot(multipart_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let member: Member = read_json(response).await;
        assert_eq!(member.name, "Asha");
        assert_eq!(member.age, Some(41));
        assert_eq!(member.schemes, vec!["Pension"]);
        assert_eq!(member.images.len(), 1);
        assert_eq!(member.ration_card_images.len(), 1);
        assert_eq!(member.other_images.len(), 1);
        assert!(member.created_at.is_some());

        let stored = state.uploads.local_path(&member.ration_card_images[0]).unwrap();
        assert_eq!(tokio::fs::read(stored).await?, b"card");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_without_name_cleans_up_uploads() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;

        let body = MultipartBody::new()
            .text("name", "")
            .file("images", "face.png", "image/png", b"face");
        let response = app
            .oneshot(multipart_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut entries = tokio::fs::read_dir(state.uploads.root()).await?;
        assert!(entries.next_entry().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_rejects_non_image_upload() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        let body = MultipartBody::new()
            .text("name", "Asha")
            .file("images", "notes.txt", "text/plain", b"text");
        let response = app
            .oneshot(multipart_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_member_removes_dropped_files() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;

        let body = MultipartBody::new()
            .text("name", "Ravi")
            .file("images", "a.png", "image/png", b"a")
            .file("images", "b.png", "image/png", b"b");
        let response = app
            .clone()
            .oneshot(multipart_request("POST", "/api/members", body))
            .await
            .unwrap();
        let created: Member = read_json(response).await;
        let (keep, drop) = (created.images[0].clone(), created.images[1].clone());

        let body = MultipartBody::new()
            .text("name", "Ravi K")
            .text("images", &serde_json::to_string(&[&keep])?)
            .text("removedImages", &serde_json::to_string(&[&drop])?)
            .file("otherImages", "c.png", "image/png", b"c");
        let response = app
            .oneshot(multipart_request(
                "PUT",
                &format!("/api/members/{}", created.id),
                body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated: Member = read_json(response).await;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ravi K");
        assert_eq!(updated.images, vec![keep.clone()]);
        assert_eq!(updated.other_images.len(), 1);
        assert!(state.uploads.local_path(&keep).unwrap().exists());
        assert!(!state.uploads.local_path(&drop).unwrap().exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_missing_member_is_not_found() -> Result<()> {
        let (app, _state, _dir) = setup_test_app().await?;

        for uri in ["/api/members/999", "/api/members/not-a-number"] {
            let body = MultipartBody::new().text("name", "Ghost");
            let response = app
                .clone()
                .oneshot(multipart_request("PUT", uri, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_list_members_with_filters() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;
        let mut farmer = member_input("Farmer");
        farmer.age = Some(60);
        farmer.occupation = Some("Farmer".to_string());
        crate::core::member::create_member(&state.db, &farmer).await?;
        let mut student = member_input("Student");
        student.age = Some(20);
        crate::core::member::create_member(&state.db, &student).await?;

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/members?ageMin=30&occupation=farm")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let members: Vec<Member> = read_json(response).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Farmer");

        let response = app
            .clone()
            .oneshot(Request::get("/api/members").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let members: Vec<Member> = read_json(response).await;
        assert_eq!(members.len(), 2);

        let response = app
            .oneshot(
                Request::get("/api/members?ageMin=old")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_choice_filters_ignore_case() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;
        let mut donor = member_input("Donor");
        donor.blood_group = Some(BloodGroup::AbPositive);
        donor.ration_card_type = Some(RationCardType::Yellow);
        crate::core::member::create_member(&state.db, &donor).await?;
        create_test_member(&state.db, "Other").await?;

        for uri in [
            "/api/members?bloodGroup=ab%2B",
            "/api/members?bloodGroup=AB%2B&rationCardType=yellow%20card",
        ] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let members: Vec<Member> = read_json(response).await;
            assert_eq!(members.len(), 1, "{uri}");
            assert_eq!(members[0].name, "Donor");
        }

        let response = app
            .clone()
            .oneshot(Request::get("/api/members?bloodGroup=").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let members: Vec<Member> = read_json(response).await;
        assert_eq!(members.len(), 2);

        let response = app
            .oneshot(Request::get("/api/members?bloodGroup=Q%2B").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_delete_members() -> Result<()> {
        let (app, state, _dir) = setup_test_app().await?;
        let a = create_test_member(&state.db, "A").await?;
        let b = create_test_member(&state.db, "B").await?;
        let c = create_test_member(&state.db, "C").await?;

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/members?ids={},{}", a.id, b.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: BulkDeleteResponse = read_json(response).await;
        assert_eq!(deleted.deleted, 2);

        let remaining =
            crate::core::member::list_members(&state.db, &MemberFilters::default()).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, c.id);

        let response = app
            .oneshot(Request::delete("/api/members").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
