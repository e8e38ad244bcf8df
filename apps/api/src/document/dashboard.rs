use serde::Serialize;

use crate::document::sections::Section;
use crate::engine::{compute_duration_at, compute_total_tenure_at, EngineError, Tenure, YearMonth};
use crate::records::RecordBundle;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_tenure: Tenure,
    pub total_months: u32,
    pub total_tenure_label: String,
    pub current_career: Option<CurrentCareer>,
    pub counts: RecordCounts,
    pub sections: Vec<SectionFill>,
    pub filled_sections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentCareer {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub tenure: Tenure,
    pub tenure_label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub careers: usize,
    pub educations: usize,
    pub projects: usize,
    pub skills: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionFill {
    pub section: Section,
    pub filled: bool,
    pub entry_count: usize,
}

/// Summarises how far the owner has got with their records.
///
/// Basic info counts as filled once a non-blank name exists, the introduction
/// once it has non-blank text. List sections are filled when non-empty.
pub fn summarize(bundle: &RecordBundle, now: YearMonth) -> Result<DashboardSummary, EngineError> {
    let total_tenure = compute_total_tenure_at(&bundle.careers, now)?;

    let current_career = match bundle.careers.iter().find(|c| c.current) {
        Some(career) => {
            let tenure = compute_duration_at(&career.start_date, None, true, now)?;
            Some(CurrentCareer {
                company: career.company.clone(),
                position: career.position.clone(),
                start_date: career.start_date.clone(),
                tenure_label: tenure.to_string(),
                tenure,
            })
        }
        None => None,
    };

    let counts = RecordCounts {
        careers: bundle.careers.len(),
        educations: bundle.educations.len(),
        projects: bundle.projects.len(),
        skills: bundle.skills.len(),
    };

    let has_text = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
    let info = bundle.basic_info.as_ref();

    let sections: Vec<SectionFill> = Section::ALL
        .into_iter()
        .map(|section| {
            let entry_count = match section {
                Section::Basic => usize::from(has_text(info.map(|i| i.name.as_str()))),
                Section::Introduce => usize::from(has_text(info.and_then(|i| i.introduce.as_deref()))),
                Section::Career => counts.careers,
                Section::Skills => counts.skills,
                Section::Education => counts.educations,
                Section::Projects => counts.projects,
            };
            SectionFill {
                section,
                filled: entry_count > 0,
                entry_count,
            }
        })
        .collect();

    let filled_sections = sections.iter().filter(|s| s.filled).count();

    Ok(DashboardSummary {
        total_tenure_label: total_tenure.to_string(),
        total_months: total_tenure.total_months(),
        total_tenure,
        current_career,
        counts,
        sections,
        filled_sections,
    })
}
