//! The fixed cat reference table.
//!
//! An ordered list of known cats and their image files. Resolution against a
//! question is a case-insensitive substring scan; the first name found in
//! table order wins, even when the question mentions several cats.

use std::path::{Path, PathBuf};

/// One known cat: display name plus its image file.
#[derive(Debug, Clone)]
pub struct CatProfile {
    pub name: String,
    pub image: PathBuf,
}

/// Ordered, immutable table of known cats. Built once at startup and passed
/// into handlers via the app state, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CatCatalog {
    cats: Vec<CatProfile>,
}

impl CatCatalog {
    pub fn new(cats: Vec<CatProfile>) -> Self {
        Self { cats }
    }

    /// The cats this deployment ships with, images under `image_dir`.
    pub fn default_cats(image_dir: &Path) -> Self {
        let cat = |name: &str, file: &str| CatProfile {
            name: name.to_string(),
            image: image_dir.join(file),
        };
        Self::new(vec![
            cat("tama", "tama.jpg"),
            cat("mike", "mike.png"),
            cat("kuro", "kuro.jpg"),
        ])
    }

    /// First cat (in table order) whose name appears in `question`.
    ///
    /// Matching is a plain case-insensitive substring test; no word
    /// boundaries, no "most specific match".
    pub fn find_target(&self, question: &str) -> Option<&CatProfile> {
        let haystack = question.to_lowercase();
        self.cats
            .iter()
            .find(|c| haystack.contains(&c.name.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatCatalog {
        CatCatalog::default_cats(Path::new("images"))
    }

    #[test]
    fn resolves_single_name_as_substring() {
        let catalog = catalog();
        let target = catalog.find_target("what does tama like to eat?").unwrap();
        assert_eq!(target.name, "tama");
        assert_eq!(target.image, Path::new("images/tama.jpg"));
    }

    #[test]
    fn first_match_in_table_order_wins() {
        // Question mentions kuro first, but tama comes first in the table.
        let catalog = catalog();
        let target = catalog.find_target("is kuro bigger than tama?").unwrap();
        assert_eq!(target.name, "tama");
    }

    #[test]
    fn no_known_name_yields_none() {
        assert!(catalog().find_target("how many cats are there?").is_none());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = catalog();
        let target = catalog.find_target("Tell me about Mike!").unwrap();
        assert_eq!(target.name, "mike");
    }
}
