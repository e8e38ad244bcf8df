use std::collections::HashMap;

use serde::Serialize;

/// A record carrying a free-text grouping key.
pub trait Categorized {
    fn category(&self) -> &str;
}

/// One bucket of the grouped output. Buckets are emitted as a `Vec` so the
/// first-seen category order is part of the value, not an accident of a map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<T> {
    pub category: String,
    pub items: Vec<T>,
}

/// Groups items by category. Category order follows first occurrence and item
/// order within a bucket follows input order. Keys are compared verbatim:
/// `"Backend"` and `"Backend "` are different categories.
pub fn group_by_category<T: Categorized + Clone>(items: &[T]) -> Vec<CategoryGroup<T>> {
    let mut groups: Vec<CategoryGroup<T>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match positions.get(item.category()) {
            Some(&idx) => groups[idx].items.push(item.clone()),
            None => {
                positions.insert(item.category(), groups.len());
                groups.push(CategoryGroup {
                    category: item.category().to_string(),
                    items: vec![item.clone()],
                });
            }
        }
    }

    groups
}
