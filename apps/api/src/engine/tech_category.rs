//! Technology label → category classification.
//!
//! Matching order:
//! 1. case-insensitive exact match on a canonical name (first category wins)
//! 2. case-insensitive whole-word match, longest canonical names first within a
//!    category (first category wins)
//! 3. catch-all `기타`
//!
//! A "word" boundary is any non `[A-Za-z0-9_]` character or the string edge, so
//! `Go` matches `Go lang` but not `Django` or `MongoDB`, and names ending in
//! punctuation such as `C++` still anchor correctly.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechCategory {
    #[serde(rename = "프론트엔드")]
    Frontend,
    #[serde(rename = "백엔드")]
    Backend,
    #[serde(rename = "데이터베이스")]
    Database,
    #[serde(rename = "클라우드/인프라")]
    CloudInfra,
    #[serde(rename = "모바일")]
    Mobile,
    #[serde(rename = "데이터/AI")]
    DataAi,
    #[serde(rename = "기타")]
    Other,
}

impl TechCategory {
    /// Fixed enumeration order. Classification and statistics both follow it.
    pub const ALL: [TechCategory; 7] = [
        TechCategory::Frontend,
        TechCategory::Backend,
        TechCategory::Database,
        TechCategory::CloudInfra,
        TechCategory::Mobile,
        TechCategory::DataAi,
        TechCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "프론트엔드",
            TechCategory::Backend => "백엔드",
            TechCategory::Database => "데이터베이스",
            TechCategory::CloudInfra => "클라우드/인프라",
            TechCategory::Mobile => "모바일",
            TechCategory::DataAi => "데이터/AI",
            TechCategory::Other => "기타",
        }
    }

    pub fn canonical_names(&self) -> &'static [&'static str] {
        match self {
            TechCategory::Frontend => &[
                "React",
                "Next.js",
                "Vue",
                "Vue.js",
                "Nuxt.js",
                "Angular",
                "Svelte",
                "JavaScript",
                "TypeScript",
                "HTML",
                "CSS",
                "SCSS",
                "Sass",
                "Tailwind CSS",
                "Redux",
                "Recoil",
                "Zustand",
                "React Query",
                "jQuery",
                "Webpack",
                "Vite",
                "Styled Components",
                "Emotion",
            ],
            TechCategory::Backend => &[
                "Node.js",
                "Express",
                "NestJS",
                "Java",
                "Spring",
                "Spring Boot",
                "Kotlin",
                "Python",
                "Django",
                "Flask",
                "FastAPI",
                "Go",
                "Golang",
                "Rust",
                "Ruby",
                "Ruby on Rails",
                "PHP",
                "Laravel",
                "C#",
                "C++",
                ".NET",
                "ASP.NET",
                "GraphQL",
                "gRPC",
                "JPA",
                "Hibernate",
                "MyBatis",
            ],
            TechCategory::Database => &[
                "MySQL",
                "PostgreSQL",
                "MariaDB",
                "Oracle",
                "MSSQL",
                "SQLite",
                "MongoDB",
                "Redis",
                "Elasticsearch",
                "DynamoDB",
                "Cassandra",
                "Firebase",
                "Supabase",
            ],
            TechCategory::CloudInfra => &[
                "AWS",
                "EC2",
                "S3",
                "Lambda",
                "GCP",
                "Azure",
                "Docker",
                "Kubernetes",
                "Terraform",
                "Jenkins",
                "GitHub Actions",
                "CI/CD",
                "Nginx",
                "Linux",
                "Vercel",
                "Kafka",
                "RabbitMQ",
            ],
            TechCategory::Mobile => &[
                "React Native",
                "Flutter",
                "Dart",
                "Swift",
                "SwiftUI",
                "Objective-C",
                "Android",
                "iOS",
                "Jetpack Compose",
            ],
            TechCategory::DataAi => &[
                "TensorFlow",
                "PyTorch",
                "Keras",
                "Scikit-learn",
                "Pandas",
                "NumPy",
                "Spark",
                "Hadoop",
                "Airflow",
                "Tableau",
                "OpenAI",
                "LangChain",
                "Machine Learning",
            ],
            TechCategory::Other => &[],
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct CategoryMatcher {
    category: TechCategory,
    exact: Vec<String>,
    // longest name first
    words: Vec<Regex>,
}

static MATCHERS: LazyLock<Vec<CategoryMatcher>> = LazyLock::new(|| {
    TechCategory::ALL
        .iter()
        .filter(|c| !c.canonical_names().is_empty())
        .map(|&category| {
            let mut names = category.canonical_names().to_vec();
            names.sort_by_key(|name| std::cmp::Reverse(name.len()));
            CategoryMatcher {
                category,
                exact: names.iter().map(|n| n.to_lowercase()).collect(),
                words: names.iter().map(|n| word_pattern(n)).collect(),
            }
        })
        .collect()
});

fn word_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)(?:^|[^0-9A-Za-z_]){}(?:$|[^0-9A-Za-z_])",
        regex::escape(name)
    ))
    .expect("escaped canonical name is a valid pattern")
}

/// Classifies a free-text technology label. Never fails: anything unmatched,
/// including an empty label, lands in [`TechCategory::Other`].
pub fn classify_tech(label: &str) -> TechCategory {
    let needle = label.trim();
    if needle.is_empty() {
        return TechCategory::Other;
    }
    let lowered = needle.to_lowercase();

    if let Some(m) = MATCHERS.iter().find(|m| m.exact.iter().any(|n| *n == lowered)) {
        return m.category;
    }

    MATCHERS
        .iter()
        .find(|m| m.words.iter().any(|re| re.is_match(needle)))
        .map(|m| m.category)
        .unwrap_or(TechCategory::Other)
}
