//! Axum route handlers for owner-scoped record CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    BasicInfo, BasicInfoInput, Career, CareerInput, Education, EducationInput, Project,
    ProjectInput, RecordKind, Skill, SkillInput,
};
use crate::records::validation::{
    validate_basic_info, validate_career, validate_education, validate_project, validate_skill,
};
use crate::session::Owner;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Basic info
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/basic-info
pub async fn handle_get_basic_info(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<BasicInfo>, AppError> {
    let info = state
        .store
        .get_basic_info(owner)
        .await?
        .ok_or_else(|| AppError::NotFound("Basic info has not been saved yet".to_string()))?;
    Ok(Json(info))
}

/// PUT /api/v1/basic-info
pub async fn handle_put_basic_info(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<BasicInfoInput>,
) -> Result<Json<BasicInfo>, AppError> {
    let input = validate_basic_info(input)?;
    Ok(Json(state.store.upsert_basic_info(owner, input).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Careers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/careers
pub async fn handle_list_careers(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<Career>>, AppError> {
    Ok(Json(state.store.list_careers(owner).await?))
}

/// POST /api/v1/careers
pub async fn handle_create_career(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<CareerInput>,
) -> Result<(StatusCode, Json<Career>), AppError> {
    let input = validate_career(input)?;
    let career = state.store.create_career(owner, input).await?;
    info!("Created career {} for owner {owner}", career.id);
    Ok((StatusCode::CREATED, Json(career)))
}

/// PUT /api/v1/careers/:id
pub async fn handle_update_career(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Json(input): Json<CareerInput>,
) -> Result<Json<Career>, AppError> {
    let input = validate_career(input)?;
    Ok(Json(state.store.update_career(owner, id, input).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Educations
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/educations
pub async fn handle_list_educations(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<Education>>, AppError> {
    Ok(Json(state.store.list_educations(owner).await?))
}

/// POST /api/v1/educations
pub async fn handle_create_education(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<EducationInput>,
) -> Result<(StatusCode, Json<Education>), AppError> {
    let input = validate_education(input)?;
    let education = state.store.create_education(owner, input).await?;
    Ok((StatusCode::CREATED, Json(education)))
}

/// PUT /api/v1/educations/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Json(input): Json<EducationInput>,
) -> Result<Json<Education>, AppError> {
    let input = validate_education(input)?;
    Ok(Json(state.store.update_education(owner, id, input).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.list_projects(owner).await?))
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<ProjectInput>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let input = validate_project(input)?;
    let project = state.store.create_project(owner, input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Json(input): Json<ProjectInput>,
) -> Result<Json<Project>, AppError> {
    let input = validate_project(input)?;
    Ok(Json(state.store.update_project(owner, id, input).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(state.store.list_skills(owner).await?))
}

/// POST /api/v1/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<SkillInput>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let input = validate_skill(input)?;
    let skill = state.store.create_skill(owner, input).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

/// PUT /api/v1/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Json(input): Json<SkillInput>,
) -> Result<Json<Skill>, AppError> {
    let input = validate_skill(input)?;
    Ok(Json(state.store.update_skill(owner, id, input).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared delete / reorder
// ────────────────────────────────────────────────────────────────────────────

async fn delete_of_kind(
    state: &AppState,
    owner: Uuid,
    kind: RecordKind,
    id: Uuid,
) -> Result<StatusCode, AppError> {
    state.store.delete_record(owner, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_of_kind(
    state: &AppState,
    owner: Uuid,
    kind: RecordKind,
    request: ReorderRequest,
) -> Result<StatusCode, AppError> {
    state.store.reorder(owner, kind, &request.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/careers/:id
pub async fn handle_delete_career(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_of_kind(&state, owner, RecordKind::Career, id).await
}

/// DELETE /api/v1/educations/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_of_kind(&state, owner, RecordKind::Education, id).await
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_of_kind(&state, owner, RecordKind::Project, id).await
}

/// DELETE /api/v1/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_of_kind(&state, owner, RecordKind::Skill, id).await
}

/// PUT /api/v1/careers/order
pub async fn handle_reorder_careers(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    reorder_of_kind(&state, owner, RecordKind::Career, request).await
}

/// PUT /api/v1/educations/order
pub async fn handle_reorder_educations(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    reorder_of_kind(&state, owner, RecordKind::Education, request).await
}

/// PUT /api/v1/projects/order
pub async fn handle_reorder_projects(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    reorder_of_kind(&state, owner, RecordKind::Project, request).await
}

/// PUT /api/v1/skills/order
pub async fn handle_reorder_skills(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    reorder_of_kind(&state, owner, RecordKind::Skill, request).await
}
