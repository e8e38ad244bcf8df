use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CareerStatement,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "이력서",
            DocumentKind::CareerStatement => "경력기술서",
        }
    }

    /// The résumé shows everything; the career statement leaves out education
    /// and the free-text introduction.
    pub fn default_sections(&self) -> SectionSelection {
        match self {
            DocumentKind::Resume => SectionSelection::all(),
            DocumentKind::CareerStatement => SectionSelection {
                basic: true,
                introduce: false,
                career: true,
                skills: true,
                education: false,
                projects: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Basic,
    Introduce,
    Career,
    Skills,
    Education,
    Projects,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Basic,
        Section::Introduce,
        Section::Career,
        Section::Skills,
        Section::Education,
        Section::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Basic => "basic",
            Section::Introduce => "introduce",
            Section::Career => "career",
            Section::Skills => "skills",
            Section::Education => "education",
            Section::Projects => "projects",
        }
    }
}

impl FromStr for Section {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == key)
            .ok_or_else(|| EngineError::UnknownSection(s.trim().to_string()))
    }
}

/// Which sections a composed document includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSelection {
    pub basic: bool,
    pub introduce: bool,
    pub career: bool,
    pub skills: bool,
    pub education: bool,
    pub projects: bool,
}

impl SectionSelection {
    pub fn all() -> Self {
        Self {
            basic: true,
            introduce: true,
            career: true,
            skills: true,
            education: true,
            projects: true,
        }
    }

    /// Parses a comma-separated override such as `basic,career,projects`.
    /// Only the listed sections are enabled; blank items are ignored.
    pub fn from_list(raw: &str) -> Result<Self, EngineError> {
        let mut selection = Self::default();
        for item in raw.split(',').filter(|item| !item.trim().is_empty()) {
            selection.set(item.parse()?, true);
        }
        Ok(selection)
    }

    pub fn is_enabled(&self, section: Section) -> bool {
        match section {
            Section::Basic => self.basic,
            Section::Introduce => self.introduce,
            Section::Career => self.career,
            Section::Skills => self.skills,
            Section::Education => self.education,
            Section::Projects => self.projects,
        }
    }

    pub fn set(&mut self, section: Section, enabled: bool) {
        let flag = match section {
            Section::Basic => &mut self.basic,
            Section::Introduce => &mut self.introduce,
            Section::Career => &mut self.career,
            Section::Skills => &mut self.skills,
            Section::Education => &mut self.education,
            Section::Projects => &mut self.projects,
        };
        *flag = enabled;
    }
}
