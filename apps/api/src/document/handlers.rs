use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::composer::compose_document;
use crate::document::dashboard::{summarize, DashboardSummary};
use crate::document::markdown::render_markdown;
use crate::document::sections::{DocumentKind, SectionSelection};
use crate::engine::{tech_stack_stats, SortOrder, TechStackGroup};
use crate::errors::AppError;
use crate::records::load_bundle;
use crate::session::Owner;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    /// `latest` (default) or `oldest`.
    pub sort: Option<String>,
    /// Comma-separated section override; the kind's defaults apply when absent.
    pub sections: Option<String>,
    /// `json` (default) or `markdown`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Markdown,
}

impl DocumentQuery {
    fn sort_order(&self) -> Result<SortOrder, AppError> {
        match self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(SortOrder::default()),
        }
    }

    fn selection(&self, kind: DocumentKind) -> Result<SectionSelection, AppError> {
        match &self.sections {
            Some(raw) => Ok(SectionSelection::from_list(raw)?),
            None => Ok(kind.default_sections()),
        }
    }

    fn output_format(&self) -> Result<OutputFormat, AppError> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") | Some("json") => Ok(OutputFormat::Json),
            Some("markdown") | Some("md") => Ok(OutputFormat::Markdown),
            Some(other) => Err(AppError::Validation(format!(
                "Unsupported format '{other}' (expected 'json' or 'markdown')"
            ))),
        }
    }
}

async fn render_document(
    state: &AppState,
    owner: Owner,
    kind: DocumentKind,
    query: &DocumentQuery,
) -> Result<Response, AppError> {
    let order = query.sort_order()?;
    let selection = query.selection(kind)?;
    let format = query.output_format()?;

    let bundle = load_bundle(state.store.as_ref(), owner.0).await?;
    let view = compose_document(kind, &bundle, &selection, order, state.now())?;
    debug!(?kind, ?order, ?format, "Composed document for owner {}", owner.0);

    Ok(match format {
        OutputFormat::Json => Json(view).into_response(),
        OutputFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&view),
        )
            .into_response(),
    })
}

/// GET /api/v1/documents/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<DocumentQuery>,
) -> Result<Response, AppError> {
    render_document(&state, owner, DocumentKind::Resume, &query).await
}

/// GET /api/v1/documents/career-statement
pub async fn handle_career_statement(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<DocumentQuery>,
) -> Result<Response, AppError> {
    render_document(&state, owner, DocumentKind::CareerStatement, &query).await
}

#[derive(Debug, Serialize)]
pub struct TechStackResponse {
    pub project_count: usize,
    pub groups: Vec<TechStackGroup>,
}

/// GET /api/v1/stats/tech-stack
pub async fn handle_tech_stack(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<TechStackResponse>, AppError> {
    let projects = state.store.list_projects(owner).await?;
    Ok(Json(TechStackResponse {
        project_count: projects.len(),
        groups: tech_stack_stats(&projects),
    }))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<DashboardSummary>, AppError> {
    let bundle = load_bundle(state.store.as_ref(), owner).await?;
    Ok(Json(summarize(&bundle, state.now())?))
}
