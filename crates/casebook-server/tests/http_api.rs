//! End-to-end tests over a real listener

use casebook_model::Submission;
use casebook_server::{build_router, AppState};
use casebook_test_utils::{alice_submission, MemoryCasebook, ALICE_KEY};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

struct TestServer {
    base: String,
    client: reqwest::Client,
    env: Arc<MemoryCasebook>,
}

impl TestServer {
    async fn start(env: MemoryCasebook) -> Self {
        let env = Arc::new(env);
        let app = build_router(AppState::new(env.casebook.clone()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            env,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .request(method, format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, body).await
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![])).await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn first_edit_appends_and_second_replaces() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![alice_submission()])).await;

    let (status, body) = server
        .post(
            "/edit-submission-endpoint",
            json!({
                "originalSubmissionId": ALICE_KEY,
                "editedData": {"cases": [{"group": "Group A", "values": [], "tensions": []}]},
                "editedBy": "fac1",
                "facilitatorComment": "  trimmed values  "
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Edited version created");
    assert_eq!(body["isNewVersion"], true);
    assert_eq!(body["newSubmissionId"], "2024-06-01T12:00:00.000Z");

    let (status, body) = server
        .post(
            "/edit-submission-endpoint",
            json!({
                "originalSubmissionId": ALICE_KEY,
                "editedData": {"username": "alice-edited"},
                "editedBy": "fac2"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Edited version updated");
    assert_eq!(body["isNewVersion"], false);

    let stored = server.env.focus_group.snapshot();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], alice_submission());
    let edited = &stored[1];
    assert!(edited.is_edited_version);
    assert_eq!(edited.original_submission_id.as_deref(), Some(ALICE_KEY));
    assert_eq!(edited.username, "alice-edited");
    assert_eq!(edited.edited_by.as_deref(), Some("fac2"));
    assert!(edited.cases[0].values.is_empty());
    assert_eq!(edited.facilitator_comment.as_deref(), Some("trimmed values"));
}

#[tokio::test]
async fn edit_of_unknown_submission_is_404() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![alice_submission()])).await;
    let (status, body) = server
        .post(
            "/edit-submission-endpoint",
            json!({
                "originalSubmissionId": "nobody|n@x.com|2020-01-01T00:00:00Z",
                "editedData": {},
                "editedBy": "fac1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
    assert_eq!(server.env.focus_group.save_count(), 0);
}

#[tokio::test]
async fn edit_without_editor_is_400() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![alice_submission()])).await;
    let (status, body) = server
        .post(
            "/edit-submission-endpoint",
            json!({"originalSubmissionId": ALICE_KEY, "editedData": {}}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_json_is_400_with_error_body() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![])).await;
    let resp = server
        .client
        .post(format!("{}/submit-focus-group", server.base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn focus_group_submit_and_group_lookup() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![])).await;
    let (status, body) = server
        .post(
            "/submit-focus-group",
            json!({
                "username": "bob",
                "email": "b@x.com",
                "cases": [{"group": "Group B", "values": [], "tensions": []}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["submissionId"], "bob|b@x.com|2024-06-01T12:00:00.000Z");

    let (status, all) = server.get("/focus-group-submissions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(1));

    let (_, found) = server.get("/group-submissions?group=Group%20B").await;
    let found: Vec<Submission> = serde_json::from_value(found).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "bob");

    let (_, none) = server.get("/group-submissions?group=Group%20Z").await;
    assert_eq!(none, json!([]));

    let (status, body) = server.get("/group-submissions").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn case_study_crud_over_http() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![])).await;
    let (status, body) = server
        .post(
            "/submit-case-study",
            json!({
                "username": "carol",
                "email": "c@x.com",
                "cases": [{"group": "Solo", "values": [], "tensions": []}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, record) = server.get(&format!("/case-studies/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "pending");

    let (status, body) = server
        .send(
            reqwest::Method::PUT,
            &format!("/case-studies/{id}"),
            json!({"username": "caroline"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caseStudy"]["username"], "caroline");

    let resp = server
        .client
        .delete(format!("{}/case-studies/{id}", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, body) = server.get(&format!("/case-studies/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, list) = server.get("/case-studies").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn histories_skip_predefined_tensions() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![alice_submission()])).await;

    let (status, body) = server.get("/user-value-history/a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["values"][0]["value"], "Fairness");

    let (_, body) = server.get("/user-tension-history/a@x.com").await;
    let labels: Vec<&str> = body["tensions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["value"].as_str())
        .collect();
    assert_eq!(labels, vec!["Speed vs. Care"]);

    let (_, body) = server.get("/user-value-history/nobody@x.com").await;
    assert_eq!(body["values"], json!([]));
}

#[tokio::test]
async fn register_then_login() {
    let server = TestServer::start(MemoryCasebook::new(vec![], vec![])).await;
    let (status, body) = server
        .post(
            "/register",
            json!({"username": "alice", "email": "a@x.com", "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"].get("passwordHash").is_none());

    let (status, _) = server
        .post(
            "/register",
            json!({"username": "alice", "email": "a@x.com", "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = server
        .post("/login", json!({"email": "a@x.com", "password": "pw"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");

    let (status, _) = server
        .post("/login", json!({"email": "a@x.com", "password": "nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = server.get("/profile/a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@x.com");
}
