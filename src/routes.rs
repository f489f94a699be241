use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router with global middleware applied
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(public::register_post))
        .route("/login", post(public::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{dashboard, goals, tasks};

    Router::new()
        .route("/dashboard", get(dashboard::get))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/:id",
            get(tasks::show).put(tasks::update).delete(tasks::delete),
        )
        .route("/goals", get(goals::list).post(goals::create))
        .route(
            "/goals/:id",
            get(goals::show).put(goals::update).delete(goals::delete),
        )
        // route_layer so unknown paths still 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, TokenIssuer};
    use crate::testing::{test_state, TEST_SECRET};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::Duration;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn protected_route_without_header_is_unauthorized() {
        let (status, body) = send(app(test_state()), get("/dashboard", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["error"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let issuer = TokenIssuer::new(TEST_SECRET, Duration::hours(72));
        let claims = Claims::new(Uuid::new_v4(), "ada@example.com", Duration::hours(-1));
        let token = issuer.sign(&claims).unwrap();

        let (status, body) = send(app(test_state()), get("/tasks", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token has expired");
    }

    #[tokio::test]
    async fn token_from_another_secret_is_unauthorized() {
        let issuer = TokenIssuer::new("not-the-server-secret", Duration::hours(72));
        let token = issuer.issue(Uuid::new_v4(), "ada@example.com").unwrap();

        let (status, _) = send(app(test_state()), get("/goals", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let state = test_state();
        let token = state.tokens.issue(Uuid::new_v4(), "ada@example.com").unwrap();

        let (status, body) = send(app(state), get("/dashboard", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["completed_tasks"], 0);
        assert_eq!(body["data"]["average_progress"], 0);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found_rather_than_unauthorized() {
        let response = app(test_state()).oneshot(get("/nope", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn non_uuid_id_is_not_found() {
        let state = test_state();
        let token = state.tokens.issue(Uuid::new_v4(), "ada@example.com").unwrap();

        let (status, body) = send(app(state), get("/tasks/42", Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }
}
