use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use fluidplan_core::domain::contract::PlanRequest;
use fluidplan_core::domain::plan::FluidPlan;
use fluidplan_core::error::PlanError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fluidplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/calculate", post(calculate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlan {
    success: bool,
    calculation_id: Uuid,
    calculated_at: DateTime<Utc>,
    #[serde(flatten)]
    plan: FluidPlan,
}

#[derive(Debug, Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

impl ApiError {
    fn new(status: StatusCode, error: String) -> (StatusCode, Json<ApiError>) {
        (
            status,
            Json(ApiError {
                success: false,
                error,
            }),
        )
    }
}

async fn calculate(
    body: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<ApiPlan>, (StatusCode, Json<ApiError>)> {
    let Json(request) = body.map_err(|e| {
        tracing::warn!(error = %e, "rejected calculate request body");
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    })?;

    let calculation_id = Uuid::new_v4();

    let plan = plan_for(request).map_err(|e| match &e {
        PlanError::Validation(v) => {
            tracing::warn!(%calculation_id, field = v.field, "validation failed");
            ApiError::new(StatusCode::BAD_REQUEST, e.public_message())
        }
        PlanError::Computation(_) => {
            let err = anyhow::Error::new(e.clone());
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%calculation_id, error = %err, "fluid plan calculation failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.public_message())
        }
    })?;

    tracing::info!(
        %calculation_id,
        correction_time = plan.correction_time,
        alerts_len = plan.alerts.len(),
        "fluid plan calculated"
    );

    Ok(Json(ApiPlan {
        success: true,
        calculation_id,
        calculated_at: Utc::now(),
        plan,
    }))
}

fn plan_for(request: PlanRequest) -> Result<FluidPlan, PlanError> {
    let snapshot = request.validate_and_into_snapshot()?;
    Ok(fluidplan_core::compute_plan(&snapshot)?)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &fluidplan_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_calculate(body: String) -> (StatusCode, Value) {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/calculate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let resp = app()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn calculate_returns_flat_plan() {
        let body = json!({
            "sodium": 129,
            "potassium": 2.8,
            "chloride": 67,
            "ph": 7.4,
            "weight": 3.2,
        });
        let (status, v) = post_calculate(body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["success"], true);
        assert!(v["calculationId"].is_string());
        assert!(v["calculatedAt"].is_string());
        assert_eq!(v["fluidType"], "NS + 5% Dextrose + 40 mEq/L KCl");
        assert_eq!(v["correctionTime"], 36);
        assert_eq!(v["bolusRecommendation"]["volume"], 20);
        assert_eq!(v["bolusRecommendation"]["totalVolume"], 64);
        assert_eq!(v["recheckInterval"], "24 hours");
        assert!(v["alerts"].as_array().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn calculate_reports_validation_message() {
        let body = json!({
            "sodium": 160,
            "potassium": 4.0,
            "chloride": 100,
            "ph": 7.4,
            "weight": 4.0,
        });
        let (status, v) = post_calculate(body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Sodium must be between 120 and 155 mmol/L");
    }

    #[tokio::test]
    async fn calculate_reports_missing_field() {
        let body = json!({
            "sodium": 140,
            "potassium": 4.0,
            "chloride": 100,
            "ph": 7.4,
        });
        let (status, v) = post_calculate(body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"], "Weight is required");
    }

    #[tokio::test]
    async fn calculate_rejects_non_numeric_body() {
        let (status, v) = post_calculate(r#"{"sodium": "high"}"#.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Invalid request body");
    }
}
