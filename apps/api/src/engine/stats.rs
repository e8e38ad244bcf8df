use std::collections::HashMap;

use serde::Serialize;

use crate::engine::{classify_tech, TechCategory};

/// A record exposing an ordered tech-stack tag list.
pub trait HasTechStack {
    fn tech_stack(&self) -> &[String];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechUsage {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechStackGroup {
    pub category: TechCategory,
    pub total: u32,
    pub technologies: Vec<TechUsage>,
}

/// Counts every tech tag across all projects and buckets the tags by inferred
/// category.
///
/// Categories come out in [`TechCategory::ALL`] order with empty ones skipped.
/// Within a category tags are sorted by count descending; equal counts keep the
/// order in which the tag was first seen. Tags are trimmed and then counted
/// case-sensitively, so `" React"` joins `"React"` while `"react"` stays a
/// separate entry. Blank tags are ignored.
pub fn tech_stack_stats<P: HasTechStack>(projects: &[P]) -> Vec<TechStackGroup> {
    let mut usages: Vec<TechUsage> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tag in projects.iter().flat_map(|p| p.tech_stack()) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        match positions.get(tag) {
            Some(&idx) => usages[idx].count += 1,
            None => {
                positions.insert(tag, usages.len());
                usages.push(TechUsage {
                    name: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    let mut buckets: HashMap<TechCategory, Vec<TechUsage>> = HashMap::new();
    for usage in usages {
        buckets
            .entry(classify_tech(&usage.name))
            .or_default()
            .push(usage);
    }

    TechCategory::ALL
        .iter()
        .filter_map(|category| {
            let mut technologies = buckets.remove(category)?;
            technologies.sort_by(|a, b| b.count.cmp(&a.count));
            Some(TechStackGroup {
                category: *category,
                total: technologies.iter().map(|t| t.count).sum(),
                technologies,
            })
        })
        .collect()
}
