pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::admin;
use crate::assessment::handlers as assessment;
use crate::auth::handlers as auth;
use crate::state::AppState;

/// `/score` is public; keep its skill maps small.
pub const SCORE_BODY_LIMIT: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        // Assessment
        .route(
            "/api/v1/assessment/upload",
            post(assessment::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/dashboard", get(assessment::handle_dashboard))
        .route("/api/v1/schemes", get(assessment::handle_schemes))
        .route(
            "/api/v1/score",
            post(assessment::handle_score).layer(DefaultBodyLimit::max(SCORE_BODY_LIMIT)),
        )
        // Admin
        .route("/api/v1/admin/stats", get(admin::handle_admin_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::advisor::{CareerAdvisor, JobRequirementSet, Scheme};
    use crate::auth::session::SessionStore;
    use crate::config::Config;
    use crate::scoring::similarity::SimilarityMetric;
    use crate::scoring::{ScoringEngine, UserSkillSet};

    struct StubAdvisor;

    #[async_trait]
    impl CareerAdvisor for StubAdvisor {
        async fn extract_skills(&self, _resume_text: &str) -> UserSkillSet {
            [("Python", 2)].into_iter().collect()
        }

        async fn job_requirements(&self, _target_job: &str) -> JobRequirementSet {
            JobRequirementSet::new()
        }

        async fn suggest_schemes(&self, _target_job: &str, _missing: &[String]) -> Vec<Scheme> {
            Vec::new()
        }
    }

    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/skillbridge_test".to_string(),
            redis_url: "redis://127.0.0.1/".to_string(),
            gemini_api_key: String::new(),
            session_secret: "test-secret".to_string(),
            session_ttl_secs: 60,
            max_upload_bytes: 1024 * 1024,
            fuzzy_cutoff: 0.5,
            fuzzy_metric: SimilarityMetric::Gestalt,
            port: 0,
            rust_log: "info".to_string(),
        };
        // never connects: the routes under test do not reach Postgres or Redis
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let redis = redis::Client::open(config.redis_url.clone()).unwrap();

        AppState {
            db,
            sessions: SessionStore::new(redis, config.session_secret.clone(), config.session_ttl_secs),
            advisor: Arc::new(StubAdvisor),
            scorer: Arc::new(ScoringEngine::with_fuzzy(
                config.fuzzy_cutoff,
                config.fuzzy_metric,
            )),
            config,
        }
    }

    async fn send(request: Request<Body>) -> Response {
        build_router(test_state()).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillbridge-api");
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let response = send(post_json(
            "/api/v1/score",
            json!({
                "user_skills": {"sql": 2, "python": 3},
                "job_requirements": {
                    "SQL": {"req_prof": 3, "weight": 2},
                    "Python": {"req_prof": 2, "weight": 1}
                }
            }),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 75.0);
        assert_eq!(body["missing"], json!(["SQL"]));
    }

    #[tokio::test]
    async fn test_score_endpoint_empty_requirements() {
        let response = send(post_json("/api/v1/score", json!({"user_skills": {"rust": 3}}))).await;
        let body = json_body(response).await;
        assert_eq!(body["score"], 0.0);
        assert_eq!(body["missing"], json!([]));
    }

    #[tokio::test]
    async fn test_score_endpoint_rejects_oversized_body() {
        let user_skills: serde_json::Map<String, Value> = (0..20_000)
            .map(|i| (format!("skill{i}"), json!(1)))
            .collect();
        let response = send(post_json(
            "/api/v1/score",
            json!({"user_skills": user_skills, "job_requirements": {}}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let response = send(
            Request::builder()
                .uri("/api/v1/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_forged_cookie_is_rejected() {
        let forged = format!("skillbridge_session={}.deadbeef", uuid::Uuid::new_v4());
        let response = send(
            Request::builder()
                .uri("/api/v1/schemes")
                .header(header::COOKIE, forged)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upload_requires_login() {
        let response = send(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessment/upload")
                .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
                .body(Body::from("--X--\r\n"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_without_session_clears_cookie() {
        let response = send(post_json("/api/v1/auth/logout", json!({}))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_db() {
        let response = send(post_json(
            "/api/v1/auth/register",
            json!({"name": " ", "email": "a@b.c", "password": "pw"}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
