use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use fitness_app::infrastructure::security::RouteLimit;
use fitness_app::AppContext;
use fitness_errors::AppError;
use serde::Deserialize;
use serde_json::Value;

use super::limits::enforce;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
pub struct ParseBody {
    #[serde(default)]
    text: String,
}

pub async fn search(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::NUTRITION_SEARCH, &headers)?;
    Ok(Json(ctx.nutrition.search(&params.query).await?))
}

pub async fn parse(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(body): Json<ParseBody>,
) -> Result<Json<Value>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::NUTRITION_PARSE, &headers)?;
    Ok(Json(ctx.nutrition.parse(&body.text).await?))
}
