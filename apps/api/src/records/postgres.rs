use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    BasicInfo, BasicInfoInput, Career, CareerInput, Education, EducationInput, Project,
    ProjectInput, RecordKind, Skill, SkillInput,
};
use crate::records::store::{not_found, RecordStore};

/// PostgreSQL-backed store. Tables are created by the embedded migrations in
/// `migrations/`.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get_basic_info(&self, owner: Uuid) -> Result<Option<BasicInfo>, AppError> {
        Ok(
            sqlx::query_as::<_, BasicInfo>("SELECT * FROM basic_info WHERE owner_id = $1")
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert_basic_info(
        &self,
        owner: Uuid,
        input: BasicInfoInput,
    ) -> Result<BasicInfo, AppError> {
        let info = sqlx::query_as::<_, BasicInfo>(
            r#"
            INSERT INTO basic_info
                (owner_id, name, name_en, nickname, email, phone, github, blog,
                 linkedin, introduce, tags, profile_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (owner_id) DO UPDATE SET
                name = EXCLUDED.name,
                name_en = EXCLUDED.name_en,
                nickname = EXCLUDED.nickname,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                github = EXCLUDED.github,
                blog = EXCLUDED.blog,
                linkedin = EXCLUDED.linkedin,
                introduce = EXCLUDED.introduce,
                tags = EXCLUDED.tags,
                profile_image = EXCLUDED.profile_image,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&input.name)
        .bind(&input.name_en)
        .bind(&input.nickname)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.github)
        .bind(&input.blog)
        .bind(&input.linkedin)
        .bind(&input.introduce)
        .bind(&input.tags)
        .bind(&input.profile_image)
        .fetch_one(&self.pool)
        .await?;

        info!("Upserted basic info for owner {owner}");
        Ok(info)
    }

    async fn list_careers(&self, owner: Uuid) -> Result<Vec<Career>, AppError> {
        Ok(sqlx::query_as::<_, Career>(
            "SELECT * FROM careers WHERE owner_id = $1 ORDER BY display_order, created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_career(&self, owner: Uuid, input: CareerInput) -> Result<Career, AppError> {
        Ok(sqlx::query_as::<_, Career>(
            r#"
            INSERT INTO careers
                (id, owner_id, company, position, start_date, end_date, current,
                 description, achievements, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                    (SELECT COALESCE(MAX(display_order) + 1, 0) FROM careers WHERE owner_id = $2))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&input.company)
        .bind(&input.position)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(input.current)
        .bind(&input.description)
        .bind(&input.achievements)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_career(
        &self,
        owner: Uuid,
        id: Uuid,
        input: CareerInput,
    ) -> Result<Career, AppError> {
        sqlx::query_as::<_, Career>(
            r#"
            UPDATE careers SET
                company = $3, position = $4, start_date = $5, end_date = $6,
                current = $7, description = $8, achievements = $9, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.company)
        .bind(&input.position)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(input.current)
        .bind(&input.description)
        .bind(&input.achievements)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(RecordKind::Career, id))
    }

    async fn list_educations(&self, owner: Uuid) -> Result<Vec<Education>, AppError> {
        Ok(sqlx::query_as::<_, Education>(
            "SELECT * FROM educations WHERE owner_id = $1 ORDER BY display_order, created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_education(
        &self,
        owner: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError> {
        Ok(sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO educations
                (id, owner_id, school, major, degree, start_date, end_date, gpa, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    (SELECT COALESCE(MAX(display_order) + 1, 0) FROM educations WHERE owner_id = $2))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&input.school)
        .bind(&input.major)
        .bind(&input.degree)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(&input.gpa)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_education(
        &self,
        owner: Uuid,
        id: Uuid,
        input: EducationInput,
    ) -> Result<Education, AppError> {
        sqlx::query_as::<_, Education>(
            r#"
            UPDATE educations SET
                school = $3, major = $4, degree = $5, start_date = $6, end_date = $7,
                gpa = $8, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.school)
        .bind(&input.major)
        .bind(&input.degree)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(&input.gpa)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(RecordKind::Education, id))
    }

    async fn list_projects(&self, owner: Uuid) -> Result<Vec<Project>, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE owner_id = $1 ORDER BY display_order, created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_project(&self, owner: Uuid, input: ProjectInput) -> Result<Project, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (id, owner_id, name, description, start_date, end_date, role,
                 tech_stack, achievements, url, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    (SELECT COALESCE(MAX(display_order) + 1, 0) FROM projects WHERE owner_id = $2))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(&input.role)
        .bind(&input.tech_stack)
        .bind(&input.achievements)
        .bind(&input.url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_project(
        &self,
        owner: Uuid,
        id: Uuid,
        input: ProjectInput,
    ) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                name = $3, description = $4, start_date = $5, end_date = $6, role = $7,
                tech_stack = $8, achievements = $9, url = $10, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(&input.role)
        .bind(&input.tech_stack)
        .bind(&input.achievements)
        .bind(&input.url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(RecordKind::Project, id))
    }

    async fn list_skills(&self, owner: Uuid) -> Result<Vec<Skill>, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            "SELECT * FROM skills WHERE owner_id = $1 ORDER BY display_order, created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_skill(&self, owner: Uuid, input: SkillInput) -> Result<Skill, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (id, owner_id, category, name, level, display_order)
            VALUES ($1, $2, $3, $4, $5,
                    (SELECT COALESCE(MAX(display_order) + 1, 0) FROM skills WHERE owner_id = $2))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&input.category)
        .bind(&input.name)
        .bind(i16::from(input.level))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_skill(
        &self,
        owner: Uuid,
        id: Uuid,
        input: SkillInput,
    ) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills SET category = $3, name = $4, level = $5, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.category)
        .bind(&input.name)
        .bind(i16::from(input.level))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(RecordKind::Skill, id))
    }

    async fn delete_record(
        &self,
        owner: Uuid,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<(), AppError> {
        // Table names come from the closed RecordKind enum, never from input.
        let sql = format!("DELETE FROM {} WHERE id = $1 AND owner_id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }
        info!("Deleted {} record {id} for owner {owner}", kind.table());
        Ok(())
    }

    async fn reorder(&self, owner: Uuid, kind: RecordKind, ids: &[Uuid]) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE {} SET display_order = $1, updated_at = NOW() WHERE id = $2 AND owner_id = $3",
            kind.table()
        );

        let mut tx = self.pool.begin().await?;
        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query(&sql)
                .bind(position as i32)
                .bind(id)
                .bind(owner)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                // dropping the transaction rolls back earlier updates
                return Err(not_found(kind, *id));
            }
        }
        tx.commit().await?;

        info!("Reordered {} {} records for owner {owner}", ids.len(), kind.table());
        Ok(())
    }
}
