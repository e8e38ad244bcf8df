// Record layer: owner-scoped CRUD behind the RecordStore trait.
// Handlers validate payloads, then call the store with the caller's identity.

pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod validation;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{BasicInfo, Career, Education, Project, Skill};

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::RecordStore;

/// Every collection an owner has, resolved into memory before any document or
/// statistic is computed.
#[derive(Debug, Clone, Default)]
pub struct RecordBundle {
    pub basic_info: Option<BasicInfo>,
    pub careers: Vec<Career>,
    pub educations: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
}

pub async fn load_bundle(store: &dyn RecordStore, owner: Uuid) -> Result<RecordBundle, AppError> {
    let (basic_info, careers, educations, projects, skills) = tokio::try_join!(
        store.get_basic_info(owner),
        store.list_careers(owner),
        store.list_educations(owner),
        store.list_projects(owner),
        store.list_skills(owner),
    )?;

    Ok(RecordBundle {
        basic_info,
        careers,
        educations,
        projects,
        skills,
    })
}
