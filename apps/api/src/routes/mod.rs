pub mod health;

use axum::{
    routing::{get, put},
    Router,
};

use crate::document::handlers as documents;
use crate::records::handlers as records;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Records
        .route(
            "/api/v1/basic-info",
            get(records::handle_get_basic_info).put(records::handle_put_basic_info),
        )
        .route(
            "/api/v1/careers",
            get(records::handle_list_careers).post(records::handle_create_career),
        )
        .route("/api/v1/careers/order", put(records::handle_reorder_careers))
        .route(
            "/api/v1/careers/:id",
            put(records::handle_update_career).delete(records::handle_delete_career),
        )
        .route(
            "/api/v1/educations",
            get(records::handle_list_educations).post(records::handle_create_education),
        )
        .route(
            "/api/v1/educations/order",
            put(records::handle_reorder_educations),
        )
        .route(
            "/api/v1/educations/:id",
            put(records::handle_update_education).delete(records::handle_delete_education),
        )
        .route(
            "/api/v1/projects",
            get(records::handle_list_projects).post(records::handle_create_project),
        )
        .route("/api/v1/projects/order", put(records::handle_reorder_projects))
        .route(
            "/api/v1/projects/:id",
            put(records::handle_update_project).delete(records::handle_delete_project),
        )
        .route(
            "/api/v1/skills",
            get(records::handle_list_skills).post(records::handle_create_skill),
        )
        .route("/api/v1/skills/order", put(records::handle_reorder_skills))
        .route(
            "/api/v1/skills/:id",
            put(records::handle_update_skill).delete(records::handle_delete_skill),
        )
        // Documents and derived views
        .route("/api/v1/documents/resume", get(documents::handle_resume))
        .route(
            "/api/v1/documents/career-statement",
            get(documents::handle_career_statement),
        )
        .route("/api/v1/stats/tech-stack", get(documents::handle_tech_stack))
        .route("/api/v1/dashboard", get(documents::handle_dashboard))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::engine::YearMonth;
    use crate::records::MemoryRecordStore;
    use crate::session::OWNER_HEADER;

    fn app() -> Router {
        let fixed = YearMonth::new(2024, 3).unwrap();
        let state = AppState {
            store: Arc::new(MemoryRecordStore::default()),
            clock: Arc::new(move || fixed),
        };
        build_router(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        owner: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(owner) = owner {
            builder = builder.header(OWNER_HEADER, owner.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, bytes.to_vec())
    }

    async fn send_json(
        app: &Router,
        method: Method,
        uri: &str,
        owner: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = send(app, method, uri, owner, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn seed_profile(app: &Router, owner: Uuid) {
        let (status, _) = send_json(
            app,
            Method::PUT,
            "/api/v1/basic-info",
            Some(owner),
            Some(json!({ "name": "홍길동", "name_en": "Gildong Hong", "introduce": "**Rust** 개발자" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for career in [
            json!({ "company": "Alpha", "position": "Engineer", "start_date": "2019-01", "end_date": "2020-03" }),
            json!({ "company": "Beta", "position": "Lead", "start_date": "2021-03", "current": true }),
        ] {
            let (status, _) =
                send_json(app, Method::POST, "/api/v1/careers", Some(owner), Some(career)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _) = send_json(
            app,
            Method::POST,
            "/api/v1/projects",
            Some(owner),
            Some(json!({
                "name": "Storefront",
                "start_date": "2022-01",
                "tech_stack": ["React", "Node.js", "React"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_health_needs_no_identity() {
        let (status, body) = send_json(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "careerbook-api");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (status, body) = send_json(&app(), Method::GET, "/api/v1/careers", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/careers",
            Some(Uuid::new_v4()),
            Some(json!({ "company": "Alpha", "position": "", "start_date": "2020/01" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_basic_info_is_not_found() {
        let (status, body) =
            send_json(&app(), Method::GET, "/api/v1/basic-info", Some(Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_resume_document_json() {
        let app = app();
        let owner = Uuid::new_v4();
        seed_profile(&app, owner).await;

        let (status, body) = send_json(
            &app,
            Method::GET,
            "/api/v1/documents/resume?sort=oldest",
            Some(owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "이력서");
        assert_eq!(body["sort"], "oldest");
        assert_eq!(body["header"]["name"], "홍길동");
        assert_eq!(body["introduction"][0]["text"], "Rust");
        assert_eq!(body["experience"]["total_tenure_label"], "4년 2개월");
        assert_eq!(body["experience"]["careers"][0]["company"], "Alpha");
        assert_eq!(body["experience"]["careers"][1]["tenure_label"], "3년 0개월");
        assert!(body.get("educations").is_none());
        assert!(body.get("skills").is_none());
    }

    #[tokio::test]
    async fn test_career_statement_markdown() {
        let app = app();
        let owner = Uuid::new_v4();
        seed_profile(&app, owner).await;

        let (status, content_type, bytes) = send(
            &app,
            Method::GET,
            "/api/v1/documents/career-statement?format=markdown",
            Some(owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/markdown"));

        let md = String::from_utf8(bytes).unwrap();
        assert!(md.starts_with("# 경력기술서\n"));
        assert!(md.contains("## 경력 (총 4년 2개월)"));
        assert!(!md.contains("## 자기소개"));
    }

    #[tokio::test]
    async fn test_document_rejects_unknown_section() {
        let (status, body) = send_json(
            &app(),
            Method::GET,
            "/api/v1/documents/resume?sections=career,hobbies",
            Some(Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_tech_stack_stats() {
        let app = app();
        let owner = Uuid::new_v4();
        seed_profile(&app, owner).await;

        let (status, body) =
            send_json(&app, Method::GET, "/api/v1/stats/tech-stack", Some(owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project_count"], 1);
        assert_eq!(body["groups"][0]["category"], "프론트엔드");
        assert_eq!(body["groups"][0]["technologies"][0]["name"], "React");
        assert_eq!(body["groups"][0]["technologies"][0]["count"], 2);
        assert_eq!(body["groups"][1]["category"], "백엔드");
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let app = app();
        let owner = Uuid::new_v4();
        seed_profile(&app, owner).await;

        let (status, body) =
            send_json(&app, Method::GET, "/api/v1/dashboard", Some(owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_tenure_label"], "4년 2개월");
        assert_eq!(body["current_career"]["company"], "Beta");
        assert_eq!(body["counts"]["careers"], 2);
        assert_eq!(body["counts"]["projects"], 1);
    }

    #[tokio::test]
    async fn test_reorder_and_delete_skills() {
        let app = app();
        let owner = Uuid::new_v4();

        let mut ids = Vec::new();
        for name in ["Rust", "Go"] {
            let (status, body) = send_json(
                &app,
                Method::POST,
                "/api/v1/skills",
                Some(owner),
                Some(json!({ "category": "Backend", "name": name, "level": 3 })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            ids.push(body["id"].as_str().unwrap().to_string());
        }

        let (status, _) = send_json(
            &app,
            Method::PUT,
            "/api/v1/skills/order",
            Some(owner),
            Some(json!({ "ids": [ids[1], ids[0]] })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, listed) = send_json(&app, Method::GET, "/api/v1/skills", Some(owner), None).await;
        assert_eq!(listed[0]["name"], "Go");
        assert_eq!(listed[1]["name"], "Rust");

        let uri = format!("/api/v1/skills/{}", ids[0]);
        let (status, _) = send_json(&app, Method::DELETE, &uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, Method::DELETE, &uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_owner() {
        let app = app();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        seed_profile(&app, owner).await;

        let (_, careers) = send_json(&app, Method::GET, "/api/v1/careers", Some(owner), None).await;
        let career_id = careers[0]["id"].as_str().unwrap().to_string();

        let (_, theirs) =
            send_json(&app, Method::GET, "/api/v1/careers", Some(stranger), None).await;
        assert_eq!(theirs, json!([]));

        let (status, _) = send_json(
            &app,
            Method::PUT,
            &format!("/api/v1/careers/{career_id}"),
            Some(stranger),
            Some(json!({ "company": "Hijack", "position": "", "start_date": "2020-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
