//! Birthday registration and query endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::state::{AppState, ScanServiceTrait, UserServiceTrait};
use crate::api::types::ApiError;
use crate::domain::user::UserRecord;
use crate::domain::ScanOutcome;
use crate::infrastructure::user::RegisterRequest;

/// Request to register a birthday (JSON body or HTML form submission)
#[derive(Debug, Deserialize)]
pub struct RegisterBirthdayRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "dateOfBirth", alias = "date_of_birth")]
    pub date_of_birth: Option<String>,
}

/// Response for a successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
    pub birthday: String,
}

/// One record in a listing response
#[derive(Debug, Serialize)]
pub struct BirthdayEntry {
    pub username: String,
    pub email: String,
    pub birthday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_birthday_today: Option<bool>,
}

impl BirthdayEntry {
    fn from_record(record: &UserRecord, today: Option<NaiveDate>) -> Self {
        Self {
            username: record.username().to_string(),
            email: record.email().to_string(),
            birthday: record.formatted_birthday(),
            is_birthday_today: today.map(|date| record.is_birthday_on(date)),
        }
    }
}

/// Response for listing endpoints
#[derive(Debug, Serialize)]
pub struct BirthdaysListResponse {
    pub success: bool,
    pub count: usize,
    pub birthdays: Vec<BirthdayEntry>,
}

/// Response for the manual scan trigger
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub message: String,
    pub outcome: ScanOutcome,
}

/// Register a new birthday from a JSON body
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterBirthdayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    register_inner(&state, req).await
}

/// Register a new birthday from a form submission
pub async fn register_form(
    State(state): State<AppState>,
    Form(req): Form<RegisterBirthdayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    register_inner(&state, req).await
}

async fn register_inner(
    state: &AppState,
    req: RegisterBirthdayRequest,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (username, email, date_of_birth) = match (req.username, req.email, req.date_of_birth) {
        (Some(u), Some(e), Some(d)) if !u.is_empty() && !e.is_empty() && !d.is_empty() => {
            (u, e, d)
        }
        _ => {
            return Err(ApiError::bad_request(
                "Username, email and date of birth are required",
            ))
        }
    };

    let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d").map_err(|_| {
        ApiError::bad_request("Date of birth must be a calendar date in YYYY-MM-DD format")
    })?;

    let record = state
        .user_service
        .register(RegisterRequest {
            username,
            email,
            date_of_birth,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            username: record.username().to_string(),
            birthday: record.formatted_birthday(),
        }),
    ))
}

/// List every stored birthday, sorted by date of birth
pub async fn list_birthdays(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.user_service.list_all().await?;
    let today = Local::now().date_naive();

    Ok(Json(BirthdaysListResponse {
        success: true,
        count: records.len(),
        birthdays: records
            .iter()
            .map(|r| BirthdayEntry::from_record(r, Some(today)))
            .collect(),
    }))
}

/// List only the birthdays falling on today's date
pub async fn todays_birthdays(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let today = Local::now().date_naive();
    let records = state.user_service.birthdays_on(today).await?;

    Ok(Json(BirthdaysListResponse {
        success: true,
        count: records.len(),
        birthdays: records
            .iter()
            .map(|r| BirthdayEntry::from_record(r, None))
            .collect(),
    }))
}

/// Trigger an immediate birthday scan and report its outcome
pub async fn trigger_scan(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    match state.scan_service.run_scan().await {
        Ok(outcome) => Ok(Json(ScanResponse {
            success: true,
            message: "Birthday check completed. See logs for details.".to_string(),
            outcome,
        })),
        Err(e) => {
            error!(error = %e, "Manual birthday scan failed");
            Err(ApiError::internal("Birthday check failed"))
        }
    }
}
