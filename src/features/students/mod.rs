pub mod model;

use crate::AppState;
use crate::domain::StudentDraft;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use model::{JsonStudent, StudentPayload, parse_student_id};
use serde_json::json;

const STUDENT_NOT_FOUND: ApiError = ApiError::NotFound {
    message: "Student not found",
};

pub fn students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .route(
            "/students/{id}",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler),
        )
}

async fn list_students_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<JsonStudent>>> {
    let students = state.repo.get_all_students().await?;

    let json_students: Vec<JsonStudent> = students.iter().map(JsonStudent::from).collect();

    Ok(Json(json_students))
}

// a miss is answered with an empty object and 200, unlike PUT and DELETE
async fn get_student_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_student_id(&raw_id)?;

    match state.repo.get_student_by_id(id).await? {
        Some(student) => Ok(Json(JsonStudent::from(&student)).into_response()),
        None => {
            tracing::debug!("Student {} not found, answering with an empty object", id);
            Ok(Json(json!({})).into_response())
        }
    }
}

async fn create_student_handler(
    State(state): State<AppState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<Json<JsonStudent>> {
    let draft = payload_to_draft(payload)?;

    let student = state.repo.insert_student(&draft).await?;
    tracing::info!("Created student {}", student);

    Ok(Json(JsonStudent::from(&student)))
}

async fn update_student_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<Json<JsonStudent>> {
    let id = parse_student_id(&raw_id)?;

    // the lookup decides first: an unknown id is a 404 even when the body is garbage
    let draft = match payload_to_draft(payload) {
        Ok(draft) => draft,
        Err(e) => {
            if state.repo.get_student_by_id(id).await?.is_none() {
                return Err(STUDENT_NOT_FOUND);
            }
            return Err(e);
        }
    };

    let student = state
        .repo
        .update_student(id, &draft)
        .await?
        .ok_or(STUDENT_NOT_FOUND)?;
    tracing::info!("Updated student {}", student);

    Ok(Json(JsonStudent::from(&student)))
}

// a miss answers 404 with the message "Student Deleted", nothing was removed
async fn delete_student_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<JsonStudent>> {
    let id = parse_student_id(&raw_id)?;

    let student = state
        .repo
        .delete_student(id)
        .await?
        .ok_or(ApiError::NotFound {
            message: "Student Deleted",
        })?;
    tracing::info!("Deleted student {}", student);

    Ok(Json(JsonStudent::from(&student)))
}

// a body axum can't deserialize (missing field, wrong type, not json) is malformed input,
// same as a bad date
fn payload_to_draft(
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<StudentDraft> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::MalformedInput(rejection.body_text()))?;
    StudentDraft::try_from(payload)
}
