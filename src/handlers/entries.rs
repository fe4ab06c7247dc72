use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Datelike, Utc};

use crate::auth::Session;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::entry::{CreateEntryRequest, DateRange, EntryQuery, MoodEntry};
use crate::models::heatmap::{HeatmapQuery, HeatmapResponse};
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(body): AppJson<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    let entry = state.entries.create(&session, body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = match query.start_date {
        Some(start) => start,
        None => end
            .checked_sub_signed(chrono::Duration::days(30))
            .ok_or_else(|| AppError::invalid_fields(vec!["end_date"], "end_date is out of range"))?,
    };

    let range = DateRange::new(start, end).ok_or_else(|| {
        AppError::invalid_fields(
            vec!["start_date", "end_date"],
            "start_date must not be after end_date",
        )
    })?;

    let entries = state.entries.list(&session.user_id, range).await?;
    Ok(Json(entries))
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HeatmapQuery>,
) -> AppResult<Json<HeatmapResponse>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let heatmap = state.entries.heatmap(&session.user_id, year).await?;
    Ok(Json(heatmap))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::jwt::create_test_token;
    use crate::config::Config;
    use crate::store::MemoryEntryStore;

    fn app() -> (Router, MemoryEntryStore, Config) {
        let config = Config::for_tests();
        let store = MemoryEntryStore::new();
        let state = crate::AppState::new(Arc::new(store.clone()), config.clone());
        (crate::router(state), store, config)
    }

    fn post_entry(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/entries")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(token: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_entry_returns_created_record() {
        let (app, store, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(post_entry(
                Some(&token),
                json!({
                    "userId": "u1",
                    "entryDate": "2024-05-01",
                    "moodColor": "#6f4e37",
                    "reflection": "ok"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["entryDate"], "2024-05-01");
        assert_eq!(body["moodColor"], "#6f4e37");
        assert_eq!(body["reflection"], "ok");
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_post_entry_with_empty_mood_color_is_rejected() {
        let (app, store, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(post_entry(
                Some(&token),
                json!({ "userId": "u1", "entryDate": "2024-05-01", "moodColor": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["missingFields"], json!(["moodColor"]));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_post_entry_with_unreachable_store_is_generic_failure() {
        let (app, store, config) = app();
        let token = create_test_token("u1", 900, &config);
        store.set_unreachable(true);

        let response = app
            .oneshot(post_entry(
                Some(&token),
                json!({ "userId": "u1", "entryDate": "2024-05-01", "moodColor": "#6f4e37" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to access journal entries");
    }

    #[tokio::test]
    async fn test_post_entry_with_wrong_typed_field_is_validation_error() {
        let (app, store, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(post_entry(
                Some(&token),
                json!({ "userId": "u1", "entryDate": "2024-05-01", "moodColor": 123 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
        assert_eq!(body["missingFields"], json!([]));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_post_entry_without_json_content_type_is_validation_error() {
        let (app, _, config) = app();
        let token = create_test_token("u1", 900, &config);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/entries")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from("userId=u1"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_post_entry_over_body_limit_is_payload_too_large() {
        let (app, store, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(post_entry(
                Some(&token),
                json!({
                    "userId": "u1",
                    "entryDate": "2024-05-01",
                    "moodColor": "#6f4e37",
                    "imageUrl": "a".repeat(crate::MAX_ENTRY_BODY_BYTES + 1),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json_body(response).await["error"].is_string());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_post_entry_without_token_is_unauthorized() {
        let (app, store, _) = app();

        let response = app
            .oneshot(post_entry(
                None,
                json!({ "userId": "u1", "entryDate": "2024-05-01", "moodColor": "#6f4e37" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_and_heatmap_reflect_stored_entries() {
        let (app, _, config) = app();
        let token = create_test_token("u1", 900, &config);

        for day in ["2024-05-01", "2024-05-01", "2024-05-03"] {
            let response = app
                .clone()
                .oneshot(post_entry(
                    Some(&token),
                    json!({ "userId": "u1", "entryDate": day, "moodColor": "#c69c6e" }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(get(
                &token,
                "/api/entries?start_date=2024-05-01&end_date=2024-05-02",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let response = app
            .oneshot(get(&token, "/api/entries/heatmap?year=2024"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let heatmap = json_body(response).await;
        let cells = heatmap["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 366);
        let may_1 = cells.iter().find(|c| c["date"] == "2024-05-01").unwrap();
        assert_eq!(may_1["count"], 2);
        assert_eq!(may_1["bucket"], 1);
    }

    #[tokio::test]
    async fn test_list_with_end_date_at_calendar_minimum_is_bad_request() {
        let (app, _, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(get(&token, "/api/entries?end_date=-262143-01-05"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["invalidFields"], json!(["end_date"]));
    }

    #[tokio::test]
    async fn test_list_with_inverted_range_is_bad_request() {
        let (app, _, config) = app();
        let token = create_test_token("u1", 900, &config);

        let response = app
            .oneshot(get(
                &token,
                "/api/entries?start_date=2024-06-01&end_date=2024-05-01",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
