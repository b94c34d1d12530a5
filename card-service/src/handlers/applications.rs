use crate::dtos::applications::{CREATED_MESSAGE, REMOVED_MESSAGE};
use crate::dtos::{
    ApplicationResponse, CreateApplicationRequest, CreateApplicationResponse,
    DeleteApplicationResponse,
};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    let records = state.applications.list_applications().await?;
    Ok(Json(
        records.into_iter().map(ApplicationResponse::from).collect(),
    ))
}

pub async fn create_application(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected application payload: {}", rejection.body_text());
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    let record = state
        .applications
        .create_application(request.name, request.income)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateApplicationResponse {
            message: CREATED_MESSAGE.to_string(),
            application: ApplicationResponse::from(record),
        }),
    ))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteApplicationResponse>, AppError> {
    let deleted = state.applications.delete_application(&name).await?;
    Ok(Json(DeleteApplicationResponse {
        message: REMOVED_MESSAGE.to_string(),
        deleted,
    }))
}
