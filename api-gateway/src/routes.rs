//! HTTP routes
//!
//! - `POST /api/price/recommend`: pricing recommendation
//! - `GET /ping`: liveness probe
//! - `GET /health`: service status and version

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use fairprice_common::{FairPriceError, PricingInput, PricingResult};
use fairprice_engine::PricingEngine;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::CorsSettings;
use crate::error::ApiError;
use crate::rate_limit::{self, RateLimiter};

// ============ STATE ============

#[derive(Clone)]
pub struct AppState {
    pub engine: PricingEngine,
    pub limiter: Arc<RateLimiter>,
}

// ============ HANDLERS ============

async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn recommend_price(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PricingResult>, ApiError> {
    let input = parse_input(&body)?;

    let result = state
        .engine
        .try_compute_recommendation(&input)
        .map_err(ApiError::from)
        .inspect_err(|err| warn!(error = %err, "rejected pricing input"))?;

    info!(
        recommended = %result.recommended_price,
        risk = %result.risk_level,
        scenarios = result.profit_scenarios.len(),
        "price recommended"
    );
    Ok(Json(result))
}

fn parse_input(body: &[u8]) -> Result<PricingInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingInput);
    }
    // a literal `null` body counts as missing
    serde_json::from_slice::<Option<PricingInput>>(body)
        .map_err(FairPriceError::from)?
        .ok_or(ApiError::MissingInput)
}

// ============ ROUTER ============

/// CORS layer from settings; `*` disables credentials
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer> {
    let wildcard = settings.allowed_origins.iter().any(|o| o == "*");

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(settings.max_age_secs));

    if wildcard {
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = settings
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {o:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(settings.allow_credentials))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/price/recommend", post(recommend_price))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit::enforce,
        ));

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .merge(api)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateLimitSettings;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_with(settings: RateLimitSettings) -> Router {
        let state = AppState {
            engine: PricingEngine::default(),
            limiter: Arc::new(RateLimiter::new(settings)),
        };
        router(state, cors_layer(&CorsSettings::default()).unwrap())
    }

    fn app() -> Router {
        app_with(RateLimitSettings {
            burst: 100,
            ..RateLimitSettings::default()
        })
    }

    fn recommend(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/price/recommend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_ping() {
        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_recommend_returns_full_result() {
        let (status, body) = send(
            app(),
            recommend(
                r#"{"unitCost":8.5,"desiredMargin":20,"competitorMinPrice":10,"competitorMaxPrice":15}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendedPrice"], serde_json::json!(11.38));
        assert_eq!(body["riskLevel"], "low");
        assert_eq!(body["suggestedRange"]["max"], serde_json::json!(12.75));
        assert_eq!(body["profitScenarios"].as_array().unwrap().len(), 4);
        assert_eq!(body["riskFactors"][0], "Within the competitive price range");
        assert!(body["confidenceNote"].as_str().unwrap().starts_with("This recommendation"));
    }

    #[tokio::test]
    async fn test_empty_body_is_missing_input() {
        let (status, body) = send(app(), recommend("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no input provided");
    }

    #[tokio::test]
    async fn test_null_body_is_missing_input() {
        let (status, body) = send(app(), recommend(" null ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no input provided");
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_bad_request() {
        let (status, body) = send(
            app(),
            recommend(
                r#"{"unitCost":"abc","desiredMargin":20,"competitorMinPrice":10,"competitorMaxPrice":15}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Serialization error: invalid value"));
        assert!(message.contains("abc"));
    }

    #[tokio::test]
    async fn test_invalid_fields_are_reported() {
        let (status, body) = send(
            app(),
            recommend(
                r#"{"unitCost":0,"desiredMargin":20,"competitorMinPrice":20,"competitorMaxPrice":10}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["unitCost"][0], "Please enter a valid unit cost");
        assert_eq!(
            body["fields"]["competitorMaxPrice"][0],
            "Max price must be greater than min price"
        );
    }

    #[tokio::test]
    async fn test_rate_limit_applies_to_api_only() {
        let app = app_with(RateLimitSettings {
            burst: 1,
            ..RateLimitSettings::default()
        });
        let body =
            r#"{"unitCost":8.5,"desiredMargin":20,"competitorMinPrice":10,"competitorMaxPrice":15}"#;

        let (first, _) = send(app.clone(), recommend(body)).await;
        let (second, error) = send(app.clone(), recommend(body)).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(error["error"], "rate limit exceeded");

        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_cors_rejects_bad_origin() {
        let settings = CorsSettings {
            allowed_origins: vec!["bad\norigin".to_string()],
            ..CorsSettings::default()
        };
        assert!(cors_layer(&settings).is_err());
    }
}
