use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    BasicInfo, BasicInfoInput, Career, CareerInput, Education, EducationInput, Project,
    ProjectInput, RecordKind, Skill, SkillInput,
};
use crate::records::store::{not_found, RecordStore};

/// Process-local store. Used when no `DATABASE_URL` is configured and by tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Collections>,
}

#[derive(Default)]
struct Collections {
    basic_info: HashMap<Uuid, BasicInfo>,
    careers: Vec<Career>,
    educations: Vec<Education>,
    projects: Vec<Project>,
    skills: Vec<Skill>,
}

/// Gives the in-memory collections one shape so ordering and ownership rules
/// are written once.
trait Owned {
    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
    fn display_order(&self) -> i32;
    fn set_display_order(&mut self, order: i32);
}

macro_rules! impl_owned {
    ($($ty:ty),*) => {
        $(impl Owned for $ty {
            fn id(&self) -> Uuid { self.id }
            fn owner_id(&self) -> Uuid { self.owner_id }
            fn display_order(&self) -> i32 { self.display_order }
            fn set_display_order(&mut self, order: i32) { self.display_order = order; }
        })*
    };
}

impl_owned!(Career, Education, Project, Skill);

fn list_owned<T: Owned + Clone>(items: &[T], owner: Uuid) -> Vec<T> {
    let mut out: Vec<T> = items.iter().filter(|i| i.owner_id() == owner).cloned().collect();
    // stable: ties fall back to insertion order
    out.sort_by_key(|i| i.display_order());
    out
}

fn next_order<T: Owned>(items: &[T], owner: Uuid) -> i32 {
    items
        .iter()
        .filter(|i| i.owner_id() == owner)
        .map(|i| i.display_order() + 1)
        .max()
        .unwrap_or(0)
}

fn find_owned<T: Owned>(
    items: &mut [T],
    owner: Uuid,
    id: Uuid,
    kind: RecordKind,
) -> Result<&mut T, AppError> {
    items
        .iter_mut()
        .find(|i| i.id() == id && i.owner_id() == owner)
        .ok_or_else(|| not_found(kind, id))
}

fn remove_owned<T: Owned>(
    items: &mut Vec<T>,
    owner: Uuid,
    id: Uuid,
    kind: RecordKind,
) -> Result<(), AppError> {
    let before = items.len();
    items.retain(|i| !(i.id() == id && i.owner_id() == owner));
    if items.len() == before {
        return Err(not_found(kind, id));
    }
    Ok(())
}

fn reorder_owned<T: Owned>(
    items: &mut [T],
    owner: Uuid,
    ids: &[Uuid],
    kind: RecordKind,
) -> Result<(), AppError> {
    if let Some(missing) = ids
        .iter()
        .find(|id| !items.iter().any(|i| i.id() == **id && i.owner_id() == owner))
    {
        return Err(not_found(kind, *missing));
    }
    for (position, id) in ids.iter().enumerate() {
        if let Some(item) = items
            .iter_mut()
            .find(|i| i.id() == *id && i.owner_id() == owner)
        {
            item.set_display_order(position as i32);
        }
    }
    Ok(())
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_basic_info(&self, owner: Uuid) -> Result<Option<BasicInfo>, AppError> {
        Ok(self.inner.read().await.basic_info.get(&owner).cloned())
    }

    async fn upsert_basic_info(
        &self,
        owner: Uuid,
        input: BasicInfoInput,
    ) -> Result<BasicInfo, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let created_at = inner
            .basic_info
            .get(&owner)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let mut info = BasicInfo::from_input(owner, input, now);
        info.created_at = created_at;
        inner.basic_info.insert(owner, info.clone());
        Ok(info)
    }

    async fn list_careers(&self, owner: Uuid) -> Result<Vec<Career>, AppError> {
        Ok(list_owned(&self.inner.read().await.careers, owner))
    }

    async fn create_career(&self, owner: Uuid, input: CareerInput) -> Result<Career, AppError> {
        let mut inner = self.inner.write().await;
        let career = Career::from_input(owner, input, next_order(&inner.careers, owner));
        inner.careers.push(career.clone());
        Ok(career)
    }

    async fn update_career(
        &self,
        owner: Uuid,
        id: Uuid,
        input: CareerInput,
    ) -> Result<Career, AppError> {
        let mut inner = self.inner.write().await;
        let career = find_owned(&mut inner.careers, owner, id, RecordKind::Career)?;
        career.apply(input);
        Ok(career.clone())
    }

    async fn list_educations(&self, owner: Uuid) -> Result<Vec<Education>, AppError> {
        Ok(list_owned(&self.inner.read().await.educations, owner))
    }

    async fn create_education(
        &self,
        owner: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError> {
        let mut inner = self.inner.write().await;
        let education = Education::from_input(owner, input, next_order(&inner.educations, owner));
        inner.educations.push(education.clone());
        Ok(education)
    }

    async fn update_education(
        &self,
        owner: Uuid,
        id: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError> {
        let mut inner = self.inner.write().await;
        let education = find_owned(&mut inner.educations, owner, id, RecordKind::Education)?;
        education.apply(input);
        Ok(education.clone())
    }

    async fn list_projects(&self, owner: Uuid) -> Result<Vec<Project>, AppError> {
        Ok(list_owned(&self.inner.read().await.projects, owner))
    }

    async fn create_project(&self, owner: Uuid, input: ProjectInput) -> Result<Project, AppError> {
        let mut inner = self.inner.write().await;
        let project = Project::from_input(owner, input, next_order(&inner.projects, owner));
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        owner: Uuid,
        id: Uuid,
        input: ProjectInput,
    ) -> Result<Project, AppError> {
        let mut inner = self.inner.write().await;
        let project = find_owned(&mut inner.projects, owner, id, RecordKind::Project)?;
        project.apply(input);
        Ok(project.clone())
    }

    async fn list_skills(&self, owner: Uuid) -> Result<Vec<Skill>, AppError> {
        Ok(list_owned(&self.inner.read().await.skills, owner))
    }

    async fn create_skill(&self, owner: Uuid, input: SkillInput) -> Result<Skill, AppError> {
        let mut inner = self.inner.write().await;
        let skill = Skill::from_input(owner, input, next_order(&inner.skills, owner));
        inner.skills.push(skill.clone());
        Ok(skill)
    }

    async fn update_skill(
        &self,
        owner: Uuid,
        id: Uuid,
        input: SkillInput,
    ) -> Result<Skill, AppError> {
        let mut inner = self.inner.write().await;
        let skill = find_owned(&mut inner.skills, owner, id, RecordKind::Skill)?;
        skill.apply(input);
        Ok(skill.clone())
    }

    async fn delete_record(
        &self,
        owner: Uuid,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        match kind {
            RecordKind::Career => remove_owned(&mut inner.careers, owner, id, kind),
            RecordKind::Education => remove_owned(&mut inner.educations, owner, id, kind),
            RecordKind::Project => remove_owned(&mut inner.projects, owner, id, kind),
            RecordKind::Skill => remove_owned(&mut inner.skills, owner, id, kind),
        }
    }

    async fn reorder(&self, owner: Uuid, kind: RecordKind, ids: &[Uuid]) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        match kind {
            RecordKind::Career => reorder_owned(&mut inner.careers, owner, ids, kind),
            RecordKind::Education => reorder_owned(&mut inner.educations, owner, ids, kind),
            RecordKind::Project => reorder_owned(&mut inner.projects, owner, ids, kind),
            RecordKind::Skill => reorder_owned(&mut inner.skills, owner, ids, kind),
        }
    }
}
