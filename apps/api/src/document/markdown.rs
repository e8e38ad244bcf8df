use crate::document::composer::{CareerView, DocumentView, HeaderView, ProjectView};
use crate::document::markup::{join_emphasis, Achievement};

const ONGOING_LABEL: &str = "재직 중";

/// Renders a composed document as Markdown for preview and printing.
pub fn render_markdown(view: &DocumentView) -> String {
    let mut md = format!("# {}\n\n", view.title);

    if let Some(header) = &view.header {
        render_header(&mut md, header);
    }

    if let Some(intro) = &view.introduction {
        md.push_str("## 자기소개\n\n");
        md.push_str(&join_emphasis(intro));
        md.push_str("\n\n");
    }

    if let Some(experience) = &view.experience {
        md.push_str(&format!("## 경력 (총 {})\n\n", experience.total_tenure_label));
        for career in &experience.careers {
            render_career(&mut md, career);
        }
    }

    if let Some(groups) = &view.skills {
        md.push_str("## 기술 스택\n\n");
        for group in groups {
            md.push_str(&format!("### {}\n\n", group.category));
            for skill in &group.items {
                md.push_str(&format!("- **{}**: {}\n", skill.name, skill.level_description));
            }
            md.push('\n');
        }
    }

    if let Some(educations) = &view.educations {
        md.push_str("## 학력\n\n");
        for education in educations {
            md.push_str(&format!("### {}\n\n", education.school));
            let detail: Vec<&str> = [education.major.as_str(), education.degree.as_str()]
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect();
            if !detail.is_empty() {
                md.push_str(&format!("{}  \n", detail.join(" · ")));
            }
            md.push_str(&format!(
                "{}  \n",
                period(&education.start_date, education.end_date.as_deref(), false)
            ));
            if let Some(gpa) = &education.gpa {
                md.push_str(&format!("GPA: {gpa}  \n"));
            }
            md.push('\n');
        }
    }

    if let Some(projects) = &view.projects {
        md.push_str("## 프로젝트\n\n");
        for project in projects {
            render_project(&mut md, project);
        }
    }

    md
}

fn period(start: &str, end: Option<&str>, ongoing: bool) -> String {
    match (ongoing, end) {
        (true, _) => format!("{start} ~ {ONGOING_LABEL}"),
        (false, Some(end)) if !end.trim().is_empty() => format!("{start} ~ {end}"),
        _ => start.to_string(),
    }
}

fn render_header(md: &mut String, header: &HeaderView) {
    md.push_str(&format!("## {}\n\n", header.name));
    if let Some(display_name) = &header.display_name {
        md.push_str(&format!("{display_name}\n\n"));
    }

    let contacts = [
        ("이메일", &header.email),
        ("전화", &header.phone),
        ("GitHub", &header.github),
        ("블로그", &header.blog),
        ("LinkedIn", &header.linkedin),
    ];
    let mut any_contact = false;
    for (label, value) in contacts {
        if let Some(value) = value {
            md.push_str(&format!("- {label}: {value}\n"));
            any_contact = true;
        }
    }
    if any_contact {
        md.push('\n');
    }

    if !header.tags.is_empty() {
        let tags: Vec<String> = header.tags.iter().map(|t| format!("`#{t}`")).collect();
        md.push_str(&format!("{}\n\n", tags.join(" ")));
    }
}

fn render_achievements(md: &mut String, achievements: &[Achievement]) {
    for achievement in achievements {
        md.push_str(&format!(
            "{}- {}\n",
            "  ".repeat(achievement.level),
            join_emphasis(&achievement.segments)
        ));
    }
    if !achievements.is_empty() {
        md.push('\n');
    }
}

fn render_career(md: &mut String, career: &CareerView) {
    if career.position.trim().is_empty() {
        md.push_str(&format!("### {}\n\n", career.company));
    } else {
        md.push_str(&format!("### {} · {}\n\n", career.company, career.position));
    }
    md.push_str(&format!(
        "{} ({})\n\n",
        period(&career.start_date, career.end_date.as_deref(), career.current),
        career.tenure_label
    ));
    if !career.description.trim().is_empty() {
        md.push_str(&format!("{}\n\n", career.description.trim()));
    }
    render_achievements(md, &career.achievements);
}

fn render_project(md: &mut String, project: &ProjectView) {
    md.push_str(&format!("### {}\n\n", project.name));
    md.push_str(&format!(
        "{}  \n",
        period(&project.start_date, project.end_date.as_deref(), false)
    ));
    if !project.role.trim().is_empty() {
        md.push_str(&format!("역할: {}  \n", project.role));
    }
    if !project.tech_stack.is_empty() {
        md.push_str(&format!("기술: {}  \n", project.tech_stack.join(", ")));
    }
    if let Some(url) = &project.url {
        md.push_str(&format!("링크: {url}  \n"));
    }
    md.push('\n');
    if !project.description.trim().is_empty() {
        md.push_str(&format!("{}\n\n", project.description.trim()));
    }
    render_achievements(md, &project.achievements);
}
