use std::collections::{BTreeMap, HashMap};

/// Canonical category name → raw labels that belong to it.
pub type CategoryMapping = BTreeMap<String, Vec<String>>;

/// Category assigned to labels that appear in no mapping entry.
pub const UNCLASSIFIED: &str = "unclassified";

/// Maps free-text labels onto the categories of a [`CategoryMapping`].
#[derive(Debug, Clone, Default)]
pub struct CategoryMapper {
    by_label: HashMap<String, String>,
}

impl CategoryMapper {
    /// Build the label index. When a label is listed under several categories the last category
    /// in name order wins.
    #[must_use]
    pub fn new(mapping: &CategoryMapping) -> Self {
        let mut by_label = HashMap::new();
        for (category, labels) in mapping {
            for label in labels {
                let _ = by_label.insert(label.clone(), category.clone());
            }
        }

        Self { by_label }
    }

    /// The category of `label`, or [`UNCLASSIFIED`].
    #[must_use]
    pub fn category_of(&self, label: &str) -> &str {
        self.by_label.get(label).map_or(UNCLASSIFIED, String::as_str)
    }
}

/// Labels listed under more than one category, with the categories that claim them.
#[must_use]
pub fn overlapping_labels(mapping: &CategoryMapping) -> Vec<(String, Vec<String>)> {
    let mut claims: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (category, labels) in mapping {
        for label in labels {
            claims.entry(label.as_str()).or_default().push(category.clone());
        }
    }

    claims
        .into_iter()
        .filter(|(_, categories)| categories.len() > 1)
        .map(|(label, categories)| (label.to_owned(), categories))
        .collect()
}
