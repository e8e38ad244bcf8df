//! Builds the render-ready view-model for a résumé or career statement.
//!
//! Everything here is derived on demand from a resolved [`RecordBundle`] and is
//! never persisted. Sections that are deselected, or that have nothing to show,
//! come out as `None` and are omitted from the serialized view.

use serde::Serialize;
use uuid::Uuid;

use crate::document::markup::{parse_achievements, split_emphasis, Achievement, TextSegment};
use crate::document::sections::{DocumentKind, SectionSelection};
use crate::engine::{
    compute_duration_at, compute_total_tenure_at, group_by_category, sort_by_start_date,
    CategoryGroup, EngineError, SortOrder, Tenure, YearMonth,
};
use crate::models::{BasicInfo, Career, Education, Project, Skill, SkillLevel};
use crate::records::RecordBundle;

pub const MISSING_NAME: &str = "이름 없음";

#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub kind: DocumentKind,
    pub title: &'static str,
    pub sort: SortOrder,
    pub sections: SectionSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<Vec<TextSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<CategoryGroup<SkillView>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educations: Option<Vec<EducationView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub name: String,
    /// `name_en / nickname`, whichever of the two are present.
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
    pub blog: Option<String>,
    pub linkedin: Option<String>,
    pub tags: Vec<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    pub total_tenure: Tenure,
    pub total_tenure_label: String,
    pub careers: Vec<CareerView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerView {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub tenure: Tenure,
    pub tenure_label: String,
    pub description: String,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub level_description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationView {
    pub id: Uuid,
    pub school: String,
    pub major: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub role: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub tech_stack: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub url: Option<String>,
}

pub fn compose_document(
    kind: DocumentKind,
    bundle: &RecordBundle,
    selection: &SectionSelection,
    order: SortOrder,
    now: YearMonth,
) -> Result<DocumentView, EngineError> {
    let header = selection
        .basic
        .then(|| build_header(bundle.basic_info.as_ref()));

    let introduction = if selection.introduce {
        bundle
            .basic_info
            .as_ref()
            .and_then(|info| non_blank(info.introduce.as_deref()))
            .map(split_emphasis)
            .filter(|segments| !segments.is_empty())
    } else {
        None
    };

    let experience = if selection.career && !bundle.careers.is_empty() {
        Some(build_experience(&bundle.careers, order, now)?)
    } else {
        None
    };

    let skills = (selection.skills && !bundle.skills.is_empty()).then(|| build_skills(&bundle.skills));

    let educations = if selection.education && !bundle.educations.is_empty() {
        Some(
            sort_by_start_date(&bundle.educations, order)?
                .iter()
                .map(EducationView::from)
                .collect(),
        )
    } else {
        None
    };

    let projects = if selection.projects && !bundle.projects.is_empty() {
        Some(
            sort_by_start_date(&bundle.projects, order)?
                .iter()
                .map(ProjectView::from)
                .collect(),
        )
    } else {
        None
    };

    Ok(DocumentView {
        kind,
        title: kind.title(),
        sort: order,
        sections: *selection,
        header,
        introduction,
        experience,
        skills,
        educations,
        projects,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

fn build_header(info: Option<&BasicInfo>) -> HeaderView {
    let Some(info) = info else {
        return HeaderView {
            name: MISSING_NAME.to_string(),
            display_name: None,
            email: None,
            phone: None,
            github: None,
            blog: None,
            linkedin: None,
            tags: Vec::new(),
            profile_image: None,
        };
    };

    let variants: Vec<&str> = [info.name_en.as_deref(), info.nickname.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .collect();

    HeaderView {
        name: non_blank(Some(info.name.as_str()))
            .unwrap_or(MISSING_NAME)
            .to_string(),
        display_name: (!variants.is_empty()).then(|| variants.join(" / ")),
        email: owned(&info.email),
        phone: owned(&info.phone),
        github: owned(&info.github),
        blog: owned(&info.blog),
        linkedin: owned(&info.linkedin),
        tags: info
            .tags
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect(),
        profile_image: owned(&info.profile_image),
    }
}

fn build_experience(
    careers: &[Career],
    order: SortOrder,
    now: YearMonth,
) -> Result<ExperienceView, EngineError> {
    let total_tenure = compute_total_tenure_at(careers, now)?;
    let careers = sort_by_start_date(careers, order)?
        .into_iter()
        .map(|career| {
            let tenure = compute_duration_at(
                &career.start_date,
                career.end_date.as_deref(),
                career.current,
                now,
            )?;
            Ok(CareerView {
                id: career.id,
                achievements: parse_achievements(&career.achievements),
                tenure_label: tenure.to_string(),
                tenure,
                company: career.company,
                position: career.position,
                start_date: career.start_date,
                end_date: career.end_date,
                current: career.current,
                description: career.description,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(ExperienceView {
        total_tenure_label: total_tenure.to_string(),
        total_tenure,
        careers,
    })
}

fn build_skills(skills: &[Skill]) -> Vec<CategoryGroup<SkillView>> {
    group_by_category(skills)
        .into_iter()
        .map(|group| CategoryGroup {
            category: group.category,
            items: group.items.iter().map(SkillView::from).collect(),
        })
        .collect()
}

impl From<&Skill> for SkillView {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.clone(),
            level: skill.level,
            level_description: skill.level.description(),
        }
    }
}

impl From<&Education> for EducationView {
    fn from(education: &Education) -> Self {
        Self {
            id: education.id,
            school: education.school.clone(),
            major: education.major.clone(),
            degree: education.degree.clone(),
            start_date: education.start_date.clone(),
            end_date: education.end_date.clone(),
            gpa: owned(&education.gpa),
        }
    }
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            role: project.role.clone(),
            start_date: project.start_date.clone(),
            end_date: project.end_date.clone(),
            tech_stack: project.tech_stack.clone(),
            achievements: parse_achievements(&project.achievements),
            url: owned(&project.url),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{
        BasicInfoInput, CareerInput, EducationInput, ProjectInput, SkillInput,
    };
    use chrono::Utc;

    pub(crate) fn sample_bundle() -> RecordBundle {
        let owner = Uuid::new_v4();
        let basic_info = BasicInfo::from_input(
            owner,
            BasicInfoInput {
                name: "홍길동".to_string(),
                name_en: Some("Gildong Hong".to_string()),
                nickname: Some("  ".to_string()),
                email: Some("gildong@example.com".to_string()),
                introduce: Some("**Rust** 백엔드 개발자".to_string()),
                tags: vec!["backend".to_string(), "".to_string()],
                ..Default::default()
            },
            Utc::now(),
        );

        let careers = vec![
            Career::from_input(
                owner,
                CareerInput {
                    company: "Alpha".to_string(),
                    position: "Engineer".to_string(),
                    start_date: "2019-01".to_string(),
                    end_date: Some("2020-03".to_string()),
                    achievements: vec![
                        "Shipped **billing**".to_string(),
                        "  Cut costs".to_string(),
                    ],
                    ..Default::default()
                },
                0,
            ),
            Career::from_input(
                owner,
                CareerInput {
                    company: "Beta".to_string(),
                    position: "Lead".to_string(),
                    start_date: "2021-03".to_string(),
                    current: true,
                    ..Default::default()
                },
                1,
            ),
        ];

        let skills = vec![
            Skill::from_input(
                owner,
                SkillInput {
                    category: "Backend".to_string(),
                    name: "Rust".to_string(),
                    level: SkillLevel::Expert,
                },
                0,
            ),
            Skill::from_input(
                owner,
                SkillInput {
                    category: "Frontend".to_string(),
                    name: "React".to_string(),
                    level: SkillLevel::Basic,
                },
                1,
            ),
            Skill::from_input(
                owner,
                SkillInput {
                    category: "Backend".to_string(),
                    name: "Go".to_string(),
                    level: SkillLevel::Proficient,
                },
                2,
            ),
        ];

        let educations = vec![Education::from_input(
            owner,
            EducationInput {
                school: "Seoul Univ".to_string(),
                major: "CS".to_string(),
                degree: "BS".to_string(),
                start_date: "2012-03".to_string(),
                end_date: Some("2018-02".to_string()),
                gpa: None,
            },
            0,
        )];

        let projects = vec![
            Project::from_input(
                owner,
                ProjectInput {
                    name: "Old".to_string(),
                    start_date: "2019-05".to_string(),
                    tech_stack: vec!["React".to_string()],
                    ..Default::default()
                },
                0,
            ),
            Project::from_input(
                owner,
                ProjectInput {
                    name: "New".to_string(),
                    start_date: "2022-07".to_string(),
                    tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
                    achievements: vec!["Launched".to_string(), "".to_string()],
                    ..Default::default()
                },
                1,
            ),
        ];

        RecordBundle {
            basic_info: Some(basic_info),
            careers,
            educations,
            projects,
            skills,
        }
    }

    fn now() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_resume_includes_every_section() {
        let bundle = sample_bundle();
        let kind = DocumentKind::Resume;
        let view =
            compose_document(kind, &bundle, &kind.default_sections(), SortOrder::Latest, now())
                .unwrap();

        assert_eq!(view.title, "이력서");
        let header = view.header.unwrap();
        assert_eq!(header.name, "홍길동");
        assert_eq!(header.display_name.as_deref(), Some("Gildong Hong"));
        assert_eq!(header.tags, vec!["backend"]);

        let intro = view.introduction.unwrap();
        assert_eq!(intro[0].text, "Rust");
        assert!(intro[0].emphasized);

        assert!(view.educations.is_some());
        assert!(view.projects.is_some());
    }

    #[test]
    fn test_experience_tenure_and_order() {
        let bundle = sample_bundle();
        let view = compose_document(
            DocumentKind::Resume,
            &bundle,
            &SectionSelection::all(),
            SortOrder::Latest,
            now(),
        )
        .unwrap();

        let experience = view.experience.unwrap();
        // 14 months at Alpha + 36 months at Beta
        assert_eq!(experience.total_tenure, Tenure { years: 4, months: 2 });
        assert_eq!(experience.total_tenure_label, "4년 2개월");

        let companies: Vec<_> = experience.careers.iter().map(|c| c.company.as_str()).collect();
        assert_eq!(companies, vec!["Beta", "Alpha"]);
        assert_eq!(experience.careers[0].tenure_label, "3년 0개월");
        assert_eq!(experience.careers[1].achievements.len(), 2);
        assert_eq!(experience.careers[1].achievements[1].level, 1);
    }

    #[test]
    fn test_career_statement_omits_education_and_introduction() {
        let bundle = sample_bundle();
        let kind = DocumentKind::CareerStatement;
        let view =
            compose_document(kind, &bundle, &kind.default_sections(), SortOrder::Oldest, now())
                .unwrap();

        assert_eq!(view.title, "경력기술서");
        assert!(view.educations.is_none());
        assert!(view.introduction.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("educations").is_none());
        assert!(json.get("introduction").is_none());
        assert_eq!(json["projects"][0]["name"], "Old");

        let projects = view.projects.as_ref().unwrap();
        assert_eq!(projects[0].name, "Old");
        assert_eq!(projects[1].achievements.len(), 1);
    }

    #[test]
    fn test_skills_grouped_in_first_seen_order_with_descriptions() {
        let bundle = sample_bundle();
        let view = compose_document(
            DocumentKind::Resume,
            &bundle,
            &SectionSelection::all(),
            SortOrder::Latest,
            now(),
        )
        .unwrap();

        let skills = view.skills.unwrap();
        let categories: Vec<_> = skills.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Backend", "Frontend"]);
        let backend: Vec<_> = skills[0].items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(backend, vec!["Rust", "Go"]);
        assert_eq!(
            skills[0].items[0].level_description,
            SkillLevel::Expert.description()
        );
    }

    #[test]
    fn test_empty_bundle_yields_only_placeholder_header() {
        let view = compose_document(
            DocumentKind::Resume,
            &RecordBundle::default(),
            &SectionSelection::all(),
            SortOrder::Latest,
            now(),
        )
        .unwrap();

        assert_eq!(view.header.unwrap().name, MISSING_NAME);
        assert!(view.introduction.is_none());
        assert!(view.experience.is_none());
        assert!(view.skills.is_none());
        assert!(view.educations.is_none());
        assert!(view.projects.is_none());
    }

    #[test]
    fn test_invalid_date_surfaces_engine_error() {
        let mut bundle = sample_bundle();
        bundle.careers[0].start_date = "March 2019".to_string();

        let result = compose_document(
            DocumentKind::Resume,
            &bundle,
            &SectionSelection::all(),
            SortOrder::Latest,
            now(),
        );
        assert!(matches!(result, Err(EngineError::InvalidDateFormat(_))));
    }
}
