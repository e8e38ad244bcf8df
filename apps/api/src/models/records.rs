use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::engine::{Categorized, Dated, EngineError, HasTechStack, Timespan};

// ────────────────────────────────────────────────────────────────────────────
// Shared enums
// ────────────────────────────────────────────────────────────────────────────

/// Skill proficiency. Stored as a SMALLINT 1–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum SkillLevel {
    Basic = 1,
    Proficient = 2,
    Expert = 3,
}

impl SkillLevel {
    pub fn description(&self) -> &'static str {
        match self {
            SkillLevel::Basic => "기본적인 사용 경험과 협업에 필요한 지식 보유",
            SkillLevel::Proficient => "매우 능숙하지는 않지만 업무 수행 가능",
            SkillLevel::Expert => "관련 지식과 경험이 풍부하며 능숙하게 업무 진행 가능",
        }
    }
}

impl TryFrom<i16> for SkillLevel {
    type Error = EngineError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SkillLevel::Basic),
            2 => Ok(SkillLevel::Proficient),
            3 => Ok(SkillLevel::Expert),
            other => Err(EngineError::InvalidSkillLevel(other)),
        }
    }
}

impl From<SkillLevel> for i16 {
    fn from(level: SkillLevel) -> Self {
        level as i16
    }
}

/// The list-shaped record collections. `BasicInfo` is a per-owner singleton
/// and is not a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Career,
    Education,
    Project,
    Skill,
}

impl RecordKind {
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Career => "careers",
            RecordKind::Education => "educations",
            RecordKind::Project => "projects",
            RecordKind::Skill => "skills",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BasicInfo {
    pub owner_id: Uuid,
    pub name: String,
    pub name_en: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
    pub blog: Option<String>,
    pub linkedin: Option<String>,
    /// Free text; `**keyword**` marks emphasis.
    pub introduce: Option<String>,
    pub tags: Vec<String>,
    /// URL or embedded data URI, stored opaquely.
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Career {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Always `None` while `current` is set.
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub school: String,
    pub major: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub role: String,
    pub tech_stack: Vec<String>,
    /// Leading whitespace encodes nesting depth.
    pub achievements: Vec<String>,
    pub url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: String,
    pub name: String,
    #[sqlx(try_from = "i16")]
    pub level: SkillLevel,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Write payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInfoInput {
    pub name: String,
    pub name_en: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
    pub blog: Option<String>,
    pub linkedin: Option<String>,
    pub introduce: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareerInput {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationInput {
    pub school: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub degree: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    pub category: String,
    pub name: String,
    pub level: SkillLevel,
}

// ────────────────────────────────────────────────────────────────────────────
// Constructors used by the in-process store
// ────────────────────────────────────────────────────────────────────────────

impl BasicInfo {
    pub fn from_input(owner_id: Uuid, input: BasicInfoInput, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            name: input.name,
            name_en: input.name_en,
            nickname: input.nickname,
            email: input.email,
            phone: input.phone,
            github: input.github,
            blog: input.blog,
            linkedin: input.linkedin,
            introduce: input.introduce,
            tags: input.tags,
            profile_image: input.profile_image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Career {
    pub fn from_input(owner_id: Uuid, input: CareerInput, display_order: i32) -> Self {
        let now = Utc::now();
        let mut career = Self {
            id: Uuid::new_v4(),
            owner_id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: None,
            current: false,
            description: String::new(),
            achievements: Vec::new(),
            display_order,
            created_at: now,
            updated_at: now,
        };
        career.apply(input);
        career
    }

    pub fn apply(&mut self, input: CareerInput) {
        self.company = input.company;
        self.position = input.position;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.current = input.current;
        self.description = input.description;
        self.achievements = input.achievements;
        self.updated_at = Utc::now();
    }
}

impl Education {
    pub fn from_input(owner_id: Uuid, input: EducationInput, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            school: input.school,
            major: input.major,
            degree: input.degree,
            start_date: input.start_date,
            end_date: input.end_date,
            gpa: input.gpa,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: EducationInput) {
        self.school = input.school;
        self.major = input.major;
        self.degree = input.degree;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.gpa = input.gpa;
        self.updated_at = Utc::now();
    }
}

impl Project {
    pub fn from_input(owner_id: Uuid, input: ProjectInput, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            role: input.role,
            tech_stack: input.tech_stack,
            achievements: input.achievements,
            url: input.url,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: ProjectInput) {
        self.name = input.name;
        self.description = input.description;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.role = input.role;
        self.tech_stack = input.tech_stack;
        self.achievements = input.achievements;
        self.url = input.url;
        self.updated_at = Utc::now();
    }
}

impl Skill {
    pub fn from_input(owner_id: Uuid, input: SkillInput, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            category: input.category,
            name: input.name,
            level: input.level,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: SkillInput) {
        self.category = input.category;
        self.name = input.name;
        self.level = input.level;
        self.updated_at = Utc::now();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine trait impls
// ────────────────────────────────────────────────────────────────────────────

impl Dated for Career {
    fn start_date(&self) -> &str {
        &self.start_date
    }
}

impl Timespan for Career {
    fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }
    fn is_ongoing(&self) -> bool {
        self.current
    }
}

impl Dated for Education {
    fn start_date(&self) -> &str {
        &self.start_date
    }
}

impl Dated for Project {
    fn start_date(&self) -> &str {
        &self.start_date
    }
}

impl HasTechStack for Project {
    fn tech_stack(&self) -> &[String] {
        &self.tech_stack
    }
}

impl Categorized for Skill {
    fn category(&self) -> &str {
        &self.category
    }
}
