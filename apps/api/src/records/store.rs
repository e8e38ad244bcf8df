//! Record store: the keyed collection API every handler goes through.
//!
//! Every call takes the owner explicitly. A record that exists but belongs to
//! someone else is indistinguishable from a missing one (`NotFound`).
//!
//! `AppState` holds an `Arc<dyn RecordStore>`: `PgRecordStore` in production,
//! `MemoryRecordStore` for local runs without a database and for tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    BasicInfo, BasicInfoInput, Career, CareerInput, Education, EducationInput, Project,
    ProjectInput, RecordKind, Skill, SkillInput,
};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_basic_info(&self, owner: Uuid) -> Result<Option<BasicInfo>, AppError>;
    /// Creates the singleton on first save, replaces it afterwards.
    async fn upsert_basic_info(
        &self,
        owner: Uuid,
        input: BasicInfoInput,
    ) -> Result<BasicInfo, AppError>;

    // Lists are ordered by display_order, then insertion.
    async fn list_careers(&self, owner: Uuid) -> Result<Vec<Career>, AppError>;
    async fn create_career(&self, owner: Uuid, input: CareerInput) -> Result<Career, AppError>;
    async fn update_career(
        &self,
        owner: Uuid,
        id: Uuid,
        input: CareerInput,
    ) -> Result<Career, AppError>;

    async fn list_educations(&self, owner: Uuid) -> Result<Vec<Education>, AppError>;
    async fn create_education(
        &self,
        owner: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError>;
    async fn update_education(
        &self,
        owner: Uuid,
        id: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError>;

    async fn list_projects(&self, owner: Uuid) -> Result<Vec<Project>, AppError>;
    async fn create_project(&self, owner: Uuid, input: ProjectInput) -> Result<Project, AppError>;
    async fn update_project(
        &self,
        owner: Uuid,
        id: Uuid,
        input: ProjectInput,
    ) -> Result<Project, AppError>;

    async fn list_skills(&self, owner: Uuid) -> Result<Vec<Skill>, AppError>;
    async fn create_skill(&self, owner: Uuid, input: SkillInput) -> Result<Skill, AppError>;
    async fn update_skill(
        &self,
        owner: Uuid,
        id: Uuid,
        input: SkillInput,
    ) -> Result<Skill, AppError>;

    async fn delete_record(&self, owner: Uuid, kind: RecordKind, id: Uuid)
        -> Result<(), AppError>;

    /// Assigns `display_order = position` to each listed id. Unlisted records
    /// keep their current order value. Any id the owner does not hold fails the
    /// whole call without changes.
    async fn reorder(&self, owner: Uuid, kind: RecordKind, ids: &[Uuid]) -> Result<(), AppError>;
}

pub(crate) fn not_found(kind: RecordKind, id: Uuid) -> AppError {
    AppError::NotFound(format!("{} record {id} not found", kind.table()))
}
