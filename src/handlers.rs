use crate::errors::{AppError, ForecastError};
use crate::form::FormInput;
use crate::models::{DefaultsQuery, DefaultsResponse, ForecastRequest, ForecastResponse};
use crate::report::build_report;
use crate::series::{validate_days_ahead, Series};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Html,
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DefaultsQuery>,
) -> Result<Html<String>, AppError> {
    let today = today();
    let days = query.days.unwrap_or(state.config.default_days);
    let form = FormInput::defaults(today, days, &state.config);
    render_page(&state, today, &form)
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let today = today();
    let form = FormInput::from_pairs(&pairs, today, &state.config).inspect_err(|err| {
        warn!("rejected form post: {err}");
    })?;
    render_page(&state, today, &form)
}

pub async fn forecast(
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastResponse>, AppError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        warn!("rejected forecast body: {}", rejection.body_text());
    })?;
    let report = forecast_request(payload)
        .inspect_err(|err| warn!("rejected forecast request: {err}"))?;

    info!(
        samples = report.table.len(),
        target_date = %report.prediction.target_date,
        value = report.prediction.value,
        "forecast computed"
    );
    Ok(Json(report))
}

pub async fn get_defaults(
    State(state): State<AppState>,
    Query(query): Query<DefaultsQuery>,
) -> Json<DefaultsResponse> {
    let days = query.days.unwrap_or(state.config.default_days);
    let form = FormInput::defaults(today(), days, &state.config);
    Json(DefaultsResponse {
        days: form.days,
        days_ahead: form.days_ahead,
        samples: form.rows,
    })
}

pub async fn health() -> &'static str {
    "ok"
}

fn forecast_request(payload: ForecastRequest) -> Result<ForecastResponse, ForecastError> {
    let days_ahead = validate_days_ahead(payload.days_ahead)?;
    let series = Series::new(payload.samples)?;
    build_report(&series, days_ahead)
}

fn render_page(state: &AppState, today: NaiveDate, form: &FormInput) -> Result<Html<String>, AppError> {
    let report = build_report(&form.to_series()?, form.days_ahead)?;
    Ok(Html(render_index(
        today,
        state.config.default_consumption,
        form,
        &report,
    )))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
