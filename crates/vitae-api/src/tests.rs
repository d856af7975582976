//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use vitae_core::{
  resume::{Resume, ResumeFields, ResumeId, ResumeSummary},
  store::ResumeStore,
};
use vitae_store_sqlite::SqliteStore;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  match body {
    Some(v) => send_raw(app, method, uri, Some("application/json"), &v.to_string()).await,
    None => send_raw(app, method, uri, None, "").await,
  }
}

/// Sends `body` verbatim, with a `Content-Type` only when one is given.
async fn send_raw(
  app: &Router,
  method: &str,
  uri: &str,
  content_type: Option<&str>,
  body: &str,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(content_type) = content_type {
    builder = builder.header(header::CONTENT_TYPE, content_type);
  }
  let req = builder.body(Body::from(body.to_owned())).unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes)
      .unwrap_or_else(|_| panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))
  };
  (status, value)
}

fn full_body(name: &str) -> Value {
  json!({
    "name": name,
    "email": "jane@x.com",
    "phone": "555-123-4567",
    "city": "Austin",
    "country": "TX",
    "resume_content": "<section data-title=\"Header\">Jane Doe</section>\n<p>ünïcödé</p>",
    "template": "modern",
  })
}

async fn create(app: &Router, body: Value) -> ResumeId {
  let (status, v) = send(app, "POST", "/resumes", Some(body)).await;
  assert_eq!(status, StatusCode::OK, "create failed: {v}");
  v["id"].as_i64().unwrap()
}

async fn list_len(app: &Router) -> usize {
  let (_, v) = send(app, "GET", "/resumes", None).await;
  v.as_array().unwrap().len()
}

// ── Create / get ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_returns_submitted_fields() {
  let app = app().await;
  let body = full_body("Jane Doe");

  let (status, created) = send(&app, "POST", "/resumes", Some(body.clone())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["message"], "Resume saved successfully");
  let id = created["id"].as_i64().unwrap();
  assert!(id > 0);

  let (status, got) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  for key in ["name", "email", "phone", "city", "country", "resume_content", "template"] {
    assert_eq!(got[key], body[key], "field {key}");
  }
  assert_eq!(got["id"], id);
  assert!(got["created_at"].is_string());
  assert!(got["updated_at"].is_string());
}

#[tokio::test]
async fn create_ignores_client_created_at() {
  let app = app().await;
  let mut body = full_body("Jane");
  body["created_at"] = json!("1999-01-01T00:00:00Z");

  let id = create(&app, body).await;
  let (_, got) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  let resume: Resume = serde_json::from_value(got).unwrap();
  assert!(resume.created_at.to_rfc3339() > "1999-01-01T00:00:00Z".to_owned());
}

#[tokio::test]
async fn create_without_name_or_email_is_rejected() {
  let app = app().await;
  create(&app, full_body("Existing")).await;

  for body in [
    json!({ "email": "jane@x.com" }),
    json!({ "name": "Jane" }),
    json!({ "name": "", "email": "jane@x.com" }),
    json!({ "name": "Jane", "email": null }),
  ] {
    let (status, v) = send(&app, "POST", "/resumes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Name and email are required");
  }
  assert_eq!(list_len(&app).await, 1);
}

#[tokio::test]
async fn create_with_only_required_fields() {
  let app = app().await;
  let id = create(&app, json!({ "name": "Jane", "email": "jane@x.com" })).await;

  let (_, got) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  assert_eq!(got["phone"], Value::Null);
  assert_eq!(got["resume_content"], Value::Null);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
  let app = app().await;
  let (status, v) = send(&app, "GET", "/resumes/999", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(v["error"], "Resume not found");
}

// ── List ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_newest_first_without_content() {
  let app = app().await;
  let a = create(&app, full_body("A")).await;
  let b = create(&app, full_body("B")).await;

  let (status, v) = send(&app, "GET", "/resumes", None).await;
  assert_eq!(status, StatusCode::OK);
  let list: Vec<ResumeSummary> = serde_json::from_value(v.clone()).unwrap();
  let ids: Vec<_> = list.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![b, a]);
  assert!(v[0].get("resume_content").is_none());
  assert!(v[0].get("updated_at").is_none());
}

// ── Update ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_then_get_reflects_every_field() {
  let app = app().await;
  let id = create(&app, full_body("Jane")).await;
  let (_, before) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  let before: Resume = serde_json::from_value(before).unwrap();

  let replacement = json!({
    "name": "Jane Q. Doe",
    "email": "jq@x.com",
    "phone": null,
    "city": "Paris",
    "country": "France",
    "resume_content": "<p>rewritten</p>",
    "template": "classic",
  });
  let (status, v) = send(&app, "PUT", &format!("/resumes/{id}"), Some(replacement.clone())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(v["message"], "Resume updated successfully");

  let (_, after) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  for key in ["name", "email", "phone", "city", "country", "resume_content", "template"] {
    assert_eq!(after[key], replacement[key], "field {key}");
  }
  let after: Resume = serde_json::from_value(after).unwrap();
  assert_eq!(after.created_at, before.created_at);
  assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn update_cannot_blank_required_fields() {
  let app = app().await;
  let id = create(&app, full_body("Jane")).await;

  let (status, _) = send(
    &app,
    "PUT",
    &format!("/resumes/{id}"),
    Some(json!({ "name": "", "email": "jane@x.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, got) = send(&app, "GET", &format!("/resumes/{id}"), None).await;
  assert_eq!(got["name"], "Jane");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
  let app = app().await;
  let (status, _) = send(&app, "PUT", "/resumes/31", Some(full_body("Ghost"))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(list_len(&app).await, 0);
}

// ── Delete ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
  let app = app().await;
  let id = create(&app, full_body("Jane")).await;
  let uri = format!("/resumes/{id}");

  let (status, v) = send(&app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(v["message"], "Resume deleted successfully");

  let (status, _) = send(&app, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
}

// ── Malformed requests ────────────────────────────────────────────────────────

#[tokio::test]
async fn body_without_json_content_type_reads_as_missing_fields() {
  let app = app().await;
  let id = create(&app, full_body("Jane")).await;
  let fields = full_body("Jane").to_string();

  for (method, uri) in [("POST", "/resumes".to_owned()), ("PUT", format!("/resumes/{id}"))] {
    let (status, v) = send_raw(&app, method, &uri, None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{method} without body");
    assert_eq!(v["error"], "Name and email are required");

    let (status, v) = send_raw(&app, method, &uri, Some("text/plain"), &fields).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{method} as text/plain");
    assert_eq!(v["error"], "Name and email are required");
  }
  assert_eq!(list_len(&app).await, 1);
}

#[tokio::test]
async fn undecodable_body_is_400_without_decoder_detail() {
  let app = app().await;

  for body in [
    "{\"name\": \"Jane\",",
    "not json at all",
    r#"{"name": 5, "email": "jane@x.com"}"#,
    r#"{"name": "Jane", "email": ["jane@x.com"]}"#,
  ] {
    let (status, v) = send_raw(&app, "POST", "/resumes", Some("application/json"), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(v["error"], "Invalid JSON body");
  }
  assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn non_numeric_id_is_404() {
  let app = api_router(Arc::new(BrokenStore));

  let cases = [
    ("GET", "/resumes/abc", None),
    ("PUT", "/resumes/abc", Some(full_body("Jane"))),
    ("DELETE", "/resumes/1.5", None),
  ];
  for (method, uri, body) in cases {
    let (status, v) = send(&app, method, uri, body).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
    assert_eq!(v["error"], "Resume not found");
  }
}

// ── Store failures ────────────────────────────────────────────────────────────

/// A store whose every call fails with an error carrying internal detail.
struct BrokenStore;

fn disk_on_fire() -> std::io::Error { std::io::Error::other("disk /var/db on fire") }

impl ResumeStore for BrokenStore {
  type Error = std::io::Error;

  async fn insert(&self, _fields: ResumeFields) -> Result<Resume, Self::Error> {
    Err(disk_on_fire())
  }

  async fn list(&self) -> Result<Vec<ResumeSummary>, Self::Error> { Err(disk_on_fire()) }

  async fn get(&self, _id: ResumeId) -> Result<Option<Resume>, Self::Error> {
    Err(disk_on_fire())
  }

  async fn update(
    &self,
    _id: ResumeId,
    _fields: ResumeFields,
  ) -> Result<Option<Resume>, Self::Error> {
    Err(disk_on_fire())
  }

  async fn delete(&self, _id: ResumeId) -> Result<bool, Self::Error> { Err(disk_on_fire()) }
}

#[tokio::test]
async fn store_failures_are_generic_500s() {
  let app = api_router(Arc::new(BrokenStore));

  let cases = [
    ("POST", "/resumes", Some(full_body("Jane")), "Failed to save resume"),
    ("GET", "/resumes", None, "Failed to fetch resumes"),
    ("GET", "/resumes/1", None, "Failed to fetch resume"),
    ("PUT", "/resumes/1", Some(full_body("Jane")), "Failed to update resume"),
    ("DELETE", "/resumes/1", None, "Failed to delete resume"),
  ];
  for (method, uri, body, message) in cases {
    let (status, v) = send(&app, method, uri, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    assert_eq!(v["error"], message);
    assert!(!v.to_string().contains("disk"), "leaked detail: {v}");
  }
}

#[tokio::test]
async fn validation_runs_before_the_store() {
  let app = api_router(Arc::new(BrokenStore));
  let (status, _) = send(&app, "POST", "/resumes", Some(json!({ "name": "Jane" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}
