pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::questionnaire::handlers as questionnaire;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Questionnaire API
        .route(
            "/api/v1/questionnaire/steps",
            get(questionnaire::handle_list_steps),
        )
        .route(
            "/api/v1/questionnaire/steps/:step",
            get(questionnaire::handle_get_step),
        )
        .route(
            "/api/v1/questionnaire/sessions",
            post(questionnaire::handle_create_session),
        )
        .route(
            "/api/v1/questionnaire/sessions/:id",
            get(questionnaire::handle_get_session),
        )
        .route(
            "/api/v1/questionnaire/sessions/:id/answers",
            post(questionnaire::handle_record_answer),
        )
        .route(
            "/api/v1/questionnaire/sessions/:id/submit",
            post(questionnaire::handle_submit),
        )
        // Matching API
        .route("/api/v1/matches", post(matching::handle_match))
        .route("/api/v1/majors", get(matching::handle_list_majors))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::questionnaire::store::InMemoryAnswerStore;

    const CATALOG: &str = r#"[
        {"name": "Engineering", "description": "Build things",
         "careers": "Engineer,Designer,Manager,Consultant", "skills": ["CAD", "Physics"],
         "weights": {"analytical": 0.8, "creative": 0.3, "social": 0.5, "technical": 0.9}},
        {"name": "Physics", "description": "Study matter",
         "weights": {"analytical": 0.9, "creative": 0.2, "social": 0.4, "technical": 0.8}},
        {"name": "Art", "description": "Make art",
         "weights": {"analytical": 0.1, "creative": 1.0, "social": 0.6, "technical": 0.1}}
    ]"#;

    fn test_state() -> (AppState, InMemoryAnswerStore) {
        let store = InMemoryAnswerStore::new();
        let state = AppState {
            catalog: Arc::new(Catalog::from_json_str(CATALOG).unwrap()),
            answers: Arc::new(store.clone()),
            config: Config::default(),
        };
        (state, store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_steps_listing_and_lookup() {
        let (state, _) = test_state();
        let app = build_router(state);

        let (status, body) = send(&app, Method::GET, "/api/v1/questionnaire/steps", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_steps"], 4);
        assert_eq!(body["steps"][3]["dimension"], "technical");

        let (status, body) = send(&app, Method::GET, "/api/v1/questionnaire/steps/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dimension"], "creative");
        assert_eq!(body["progress"], 50);

        let (status, _) = send(&app, Method::GET, "/api/v1/questionnaire/steps/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_full_questionnaire_flow() {
        let (state, store) = test_state();
        let app = build_router(state);

        let (status, created) = send(&app, Method::POST, "/api/v1/questionnaire/sessions", None).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["session_id"].as_str().unwrap().to_string();
        let answers_uri = format!("/api/v1/questionnaire/sessions/{id}/answers");

        for (step, value) in [(1, json!(8)), (2, json!("3")), (3, json!(5))] {
            let (status, body) = send(
                &app,
                Method::POST,
                &answers_uri,
                Some(json!({"step": step, "value": value})),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            assert_eq!(body["complete"], false);
        }

        let (status, body) = send(
            &app,
            Method::POST,
            &answers_uri,
            Some(json!({"step": 4, "value": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["complete"], true);
        assert!(body["next_step"].is_null());

        let (status, report) = send(
            &app,
            Method::POST,
            &format!("/api/v1/questionnaire/sessions/{id}/submit?top_k=2"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{report}");
        let matches = report["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["name"], "Engineering");
        assert_eq!(matches[0]["match_percentage"], 100);
        assert_eq!(matches[0]["careers"].as_array().unwrap().len(), 3);
        assert_eq!(matches[1]["name"], "Physics");
        assert_eq!(matches[1]["match_percentage"], 90);
        assert_eq!(report["personality"]["code"], "ESTP");

        // Answers are cleared once recommendations are produced.
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_revisited_step_last_write_wins() {
        let (state, _) = test_state();
        let app = build_router(state);
        let id = uuid::Uuid::new_v4();
        let answers_uri = format!("/api/v1/questionnaire/sessions/{id}/answers");

        for value in [2, 8] {
            send(&app, Method::POST, &answers_uri, Some(json!({"step": 3, "value": value}))).await;
        }

        let (status, progress) = send(
            &app,
            Method::GET,
            &format!("/api/v1/questionnaire/sessions/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progress["answers"]["social"], 8.0);
        assert_eq!(progress["next_step"]["step"], 1);
        assert_eq!(progress["missing"], json!(["analytical", "creative", "technical"]));
    }

    #[tokio::test]
    async fn test_invalid_answer_rejected_and_not_stored() {
        let (state, store) = test_state();
        let app = build_router(state);
        let id = uuid::Uuid::new_v4();
        let answers_uri = format!("/api/v1/questionnaire/sessions/{id}/answers");

        send(&app, Method::POST, &answers_uri, Some(json!({"step": 1, "value": 6}))).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &answers_uri,
            Some(json!({"step": 1, "value": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"]["dimension"], "analytical");

        let (status, _) = send(
            &app,
            Method::POST,
            &answers_uri,
            Some(json!({"step": 1, "value": "very"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            &answers_uri,
            Some(json!({"step": 7, "value": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        use crate::questionnaire::store::AnswerStore;
        let stored = store.load(id).await.unwrap();
        assert_eq!(stored[crate::models::dimension::Dimension::Analytical], Some(6.0));
    }

    #[tokio::test]
    async fn test_early_submit_reports_missing_steps() {
        let (state, store) = test_state();
        let app = build_router(state);
        let id = uuid::Uuid::new_v4();
        send(
            &app,
            Method::POST,
            &format!("/api/v1/questionnaire/sessions/{id}/answers"),
            Some(json!({"step": 1, "value": 5})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/questionnaire/sessions/{id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INCOMPLETE_PROFILE");
        assert_eq!(body["error"]["details"]["next_step"], 2);
        // Partial answers survive a failed submit.
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_direct_match_endpoint() {
        let (state, _) = test_state();
        let app = build_router(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/matches",
            Some(json!({
                "scores": {"analytical_score": 8, "creative_score": 3, "social_score": 5, "technical_score": 9}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"].as_array().unwrap().len(), 3);
        assert_eq!(body["matches"][2]["name"], "Art");
        assert_eq!(body["profile"]["analytical"], 8.0);
        assert_eq!(body["matches"][0]["name"], "Engineering");
        assert_eq!(body["matches"][0]["dimension_matches"]["technical"], 1.0);
    }

    #[tokio::test]
    async fn test_direct_match_rejects_bad_requests() {
        let (state, _) = test_state();
        let app = build_router(state);
        let scores = json!({"analytical": 8, "creative": 3, "social": 5, "technical": 9});

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/matches",
            Some(json!({"scores": scores, "top_k": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/matches",
            Some(json!({"scores": {"analytical": 8}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
        assert_eq!(
            body["error"]["details"]["missing"],
            json!(["creative", "social", "technical"])
        );
        assert!(body["error"]["details"].get("dimension").is_none());
    }

    #[tokio::test]
    async fn test_direct_match_out_of_range_names_dimension() {
        let (state, _) = test_state();
        let app = build_router(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/matches",
            Some(json!({
                "scores": {"analytical": 8, "creative": 30, "social": 5, "technical": 9}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
        assert_eq!(body["error"]["details"]["dimension"], "creative");
        assert_eq!(body["error"]["details"]["step"], 2);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Profile is invalid"));
    }

    #[tokio::test]
    async fn test_list_majors() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send(&app, Method::GET, "/api/v1/majors", None).await;
        assert_eq!(status, StatusCode::OK);
        let majors = body.as_array().unwrap();
        assert_eq!(majors.len(), 3);
        assert_eq!(majors[0]["weights"]["technical"], 0.9);
        assert_eq!(majors[0]["careers"].as_array().unwrap().len(), 4);
    }
}
