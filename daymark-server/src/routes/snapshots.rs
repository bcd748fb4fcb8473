//! Snapshot endpoints: one whole-snapshot JSON resource per remote id.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use daymark_core::Snapshot;
use daymark_core::remote::{CreateSnapshotRequest, CreateSnapshotResponse, SnapshotMeta};
use daymark_core::token::normalize_token;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/snapshots", post(create_snapshot))
        .route("/snapshots/{id}", get(fetch_snapshot))
        .route("/snapshots/{id}", put(replace_snapshot))
}

/// Reject anything outside the token alphabet before an id touches the
/// filesystem.
fn validate_id(id: &str) -> Result<String, AppError> {
    match normalize_token(id) {
        Ok(id) => Ok(id),
        Err(e) => Err(AppError::bad_request(e.to_string())),
    }
}

/// POST /snapshots - Create (or overwrite) a snapshot under the client's
/// derived id. Re-login and push-repair races are harmless: last write
/// wins, same as everywhere else in the protocol.
async fn create_snapshot(
    State(state): State<AppState>,
    Json(request): Json<CreateSnapshotRequest>,
) -> Result<Json<CreateSnapshotResponse>, AppError> {
    let id = validate_id(&request.id)?;

    state.write(&id, &request.snapshot)?;

    Ok(Json(CreateSnapshotResponse { id }))
}

/// GET /snapshots/:id - Fetch the whole snapshot
async fn fetch_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, AppError> {
    let id = validate_id(&id)?;

    match state.read(&id)? {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(AppError::not_found(format!("No snapshot with id {id}"))),
    }
}

/// PUT /snapshots/:id - Replace the whole snapshot. 404 when it doesn't
/// exist yet; the client repairs by re-creating.
async fn replace_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(snapshot): Json<Snapshot>,
) -> Result<Json<SnapshotMeta>, AppError> {
    let id = validate_id(&id)?;

    if !state.exists(&id) {
        return Err(AppError::not_found(format!("No snapshot with id {id}")));
    }

    state.write(&id, &snapshot)?;

    Ok(Json(SnapshotMeta {
        updated_at: snapshot.updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_dir(dir.path().to_path_buf()).unwrap();
        let app = Router::new()
            .merge(crate::routes::health::router())
            .merge(router())
            .with_state(state);
        (app, dir)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn snapshot_body(updated_at: i64) -> Value {
        json!({
            "events": [{
                "id": "e1",
                "title": "Lunch",
                "date": "2025-03-01",
                "isImportant": false,
                "createdAt": 1
            }],
            "notes": [{ "date": "2025-03-01", "content": "hi", "updatedAt": 1 }],
            "updatedAt": updated_at
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app();

        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_fetch_replace_cycle() {
        let (app, _dir) = test_app();

        // Create
        let mut create = snapshot_body(100);
        create["id"] = json!("abc123");
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/snapshots", create))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["id"], "abc123");

        // Fetch what we created
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/snapshots/abc123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["updatedAt"], 100);
        assert_eq!(body["events"][0]["title"], "Lunch");

        // Replace wholesale
        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/snapshots/abc123",
                json!({ "events": [], "notes": [], "updatedAt": 200 }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["updatedAt"], 200);

        // Fetch reflects the replacement
        let resp = app
            .oneshot(Request::builder().uri("/snapshots/abc123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["updatedAt"], 200);
        assert!(body["events"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_is_404() {
        let (app, _dir) = test_app();

        let resp = app
            .oneshot(Request::builder().uri("/snapshots/nothere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("nothere"));
    }

    #[tokio::test]
    async fn test_replace_missing_is_404() {
        let (app, _dir) = test_app();

        let resp = app
            .oneshot(json_request("PUT", "/snapshots/nothere", snapshot_body(5)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_id_is_400() {
        let (app, _dir) = test_app();

        let mut create = snapshot_body(1);
        create["id"] = json!("../escape");
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/snapshots", create))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app
            .oneshot(Request::builder().uri("/snapshots/bad%20id").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
