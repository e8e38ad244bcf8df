//! Write-side checks run before any store call.
//!
//! Each `validate_*` consumes the payload and hands back the normalized version
//! that should be persisted (e.g. a current career loses its end date).

use crate::engine::YearMonth;
use crate::errors::AppError;
use crate::models::{BasicInfoInput, CareerInput, EducationInput, ProjectInput, SkillInput};

pub fn validate_basic_info(input: BasicInfoInput) -> Result<BasicInfoInput, AppError> {
    require_non_blank("name", &input.name)?;
    Ok(input)
}

pub fn validate_career(mut input: CareerInput) -> Result<CareerInput, AppError> {
    require_non_blank("company", &input.company)?;
    if input.current {
        input.end_date = None;
    }
    input.end_date = check_period(&input.start_date, input.end_date.take())?;
    Ok(input)
}

pub fn validate_education(mut input: EducationInput) -> Result<EducationInput, AppError> {
    require_non_blank("school", &input.school)?;
    input.end_date = check_period(&input.start_date, input.end_date.take())?;
    Ok(input)
}

pub fn validate_project(mut input: ProjectInput) -> Result<ProjectInput, AppError> {
    require_non_blank("name", &input.name)?;
    input.end_date = check_period(&input.start_date, input.end_date.take())?;
    Ok(input)
}

pub fn validate_skill(input: SkillInput) -> Result<SkillInput, AppError> {
    require_non_blank("name", &input.name)?;
    Ok(input)
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Start must parse; a blank end becomes `None`; a present end must parse and
/// must not precede the start.
fn check_period(start: &str, end: Option<String>) -> Result<Option<String>, AppError> {
    let start_ym: YearMonth = start.parse()?;
    let Some(end) = end.filter(|e| !e.trim().is_empty()) else {
        return Ok(None);
    };
    let end_ym: YearMonth = end.parse()?;
    if end_ym < start_ym {
        return Err(AppError::Validation(format!(
            "end_date {end_ym} precedes start_date {start_ym}"
        )));
    }
    Ok(Some(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;

    fn career(start: &str, end: Option<&str>, current: bool) -> CareerInput {
        CareerInput {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: start.into(),
            end_date: end.map(String::from),
            current,
            ..Default::default()
        }
    }

    #[test]
    fn test_current_career_clears_end_date() {
        let out = validate_career(career("2021-03", Some("2022-01"), true)).unwrap();
        assert!(out.end_date.is_none());
    }

    #[test]
    fn test_blank_end_date_becomes_none() {
        let out = validate_career(career("2021-03", Some(""), false)).unwrap();
        assert!(out.end_date.is_none());
    }

    #[test]
    fn test_bad_start_date_rejected() {
        let err = validate_career(career("2021.03", None, false)).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("2021.03")));
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert!(matches!(
            validate_career(career("2022-03", Some("2021-12"), false)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_required_fields() {
        let mut input = career("2021-03", None, false);
        input.company = "  ".into();
        assert!(validate_career(input).is_err());

        assert!(validate_basic_info(BasicInfoInput::default()).is_err());
        assert!(validate_basic_info(BasicInfoInput {
            name: "홍길동".into(),
            ..Default::default()
        })
        .is_ok());

        assert!(validate_skill(SkillInput {
            category: "Lang".into(),
            name: "".into(),
            level: SkillLevel::Basic,
        })
        .is_err());
    }

    #[test]
    fn test_education_and_project_dates_checked() {
        assert!(validate_education(EducationInput {
            school: "KAIST".into(),
            start_date: "2015-03".into(),
            end_date: Some("2019-02".into()),
            ..Default::default()
        })
        .is_ok());
        assert!(validate_project(ProjectInput {
            name: "Careerbook".into(),
            start_date: "bad".into(),
            ..Default::default()
        })
        .is_err());
    }
}
