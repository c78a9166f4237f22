use std::sync::Arc;

use crate::{
    config::Config,
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{
        Country, CountryQuery, CountrySummary, MessageResponse, RefreshResponse, StatusResponse,
    },
};
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use country_currency_core::{refresh::RefreshOutcome, utils::time_utils::format_utc_iso};
use tokio::{fs, task};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

const REFRESH_MESSAGE: &str = "Countries refreshed and chart updated successfully!";
const REFRESH_NO_CHART_MESSAGE: &str = "Countries refreshed; chart could not be generated";

/// Outcome of a refresh followed by chart regeneration.
pub struct RefreshReport {
    pub outcome: RefreshOutcome,
    pub chart_path: Option<String>,
}

/// Runs one refresh and regenerates the chart. A chart failure after a
/// successful refresh is logged and reported as a missing path.
pub async fn perform_refresh(state: &Arc<AppState>) -> ApiResult<RefreshReport> {
    let _guard = state.refresh_lock.lock().await;
    let outcome = state.refresh_service.refresh().await?;

    let chart = state.chart_service.clone();
    let chart_path = match task::spawn_blocking(move || chart.generate()).await {
        Ok(Ok(path)) => Some(path.to_string_lossy().to_string()),
        Ok(Err(e)) => {
            tracing::warn!("Chart regeneration failed after refresh: {}", e);
            None
        }
        Err(e) => {
            tracing::warn!("Chart regeneration task failed: {}", e);
            None
        }
    };

    Ok(RefreshReport {
        outcome,
        chart_path,
    })
}

#[utoipa::path(get, path = "/", responses((status = 200, body = MessageResponse)))]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Country Currency API is running!"))
}

#[utoipa::path(
    post,
    path = "/countries/refresh",
    responses(
        (status = 200, body = RefreshResponse),
        (status = 503, body = ErrorBody),
        (status = 500, body = ErrorBody)
    )
)]
async fn refresh_countries(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let report = perform_refresh(&state).await?;
    let message = if report.chart_path.is_some() {
        REFRESH_MESSAGE
    } else {
        REFRESH_NO_CHART_MESSAGE
    };
    Ok(Json(RefreshResponse {
        message: message.to_string(),
        chart_path: report.chart_path,
        last_refreshed_at: format_utc_iso(report.outcome.refreshed_at),
        inserted: report.outcome.inserted,
        skipped: report.outcome.skipped,
    }))
}

#[utoipa::path(
    get,
    path = "/countries",
    params(CountryQuery),
    responses((status = 200, body = [CountrySummary]), (status = 404, body = ErrorBody))
)]
async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountryQuery>,
) -> ApiResult<Json<Vec<CountrySummary>>> {
    let countries = state.country_service.list_countries(&query.into_filter())?;
    if countries.is_empty() {
        return Err(ApiError::NotFound("No countries found".to_string()));
    }
    Ok(Json(countries.into_iter().map(CountrySummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/countries/image",
    responses(
        (status = 200, content_type = "image/png", description = "GDP summary chart"),
        (status = 404, body = ErrorBody),
        (status = 500, body = ErrorBody)
    )
)]
async fn get_image(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let chart = state.chart_service.clone();
    let generated = task::spawn_blocking(move || chart.generate())
        .await
        .context("Chart task panicked")?;
    let path = match generated {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Chart generation failed: {}", e);
            return Err(ApiError::Internal("Failed to generate image".to_string()));
        }
    };

    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("Chart file not found".to_string()));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Reading chart").into()),
    };
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))],
        bytes,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/countries/{name}",
    params(("name" = String, Path, description = "Country name, any case")),
    responses((status = 200, body = Country), (status = 404, body = ErrorBody))
)]
async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Country>> {
    match state.country_service.get_country_by_name(&name) {
        Ok(country) => Ok(Json(Country::from(country))),
        Err(country_currency_core::Error::NotFound(_)) => {
            Err(ApiError::NotFound("Country not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/countries/{name}",
    params(("name" = String, Path, description = "Country name, any case")),
    responses((status = 200, body = MessageResponse), (status = 404, body = ErrorBody))
)]
async fn delete_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.country_service.delete_country(&name).await? {
        return Err(ApiError::NotFound("Country not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Country deleted")))
}

#[utoipa::path(get, path = "/status", responses((status = 200, body = StatusResponse)))]
async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatusResponse>> {
    let status = state.country_service.get_status()?;
    Ok(Json(StatusResponse::from(status)))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        refresh_countries,
        list_countries,
        get_image,
        get_country,
        delete_country,
        get_status
    ),
    components(schemas(
        Country,
        CountrySummary,
        RefreshResponse,
        StatusResponse,
        MessageResponse,
        ErrorBody
    )),
    tags((name = "country-currency"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let router = Router::new()
        .route("/", get(root))
        .route(
            "/countries/refresh",
            get(refresh_countries).post(refresh_countries),
        )
        .route("/countries", get(list_countries))
        .route("/countries/image", get(get_image))
        .route("/countries/{name}", get(get_country).delete(delete_country))
        .route("/status", get(get_status))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http());
    Ok(router)
}
