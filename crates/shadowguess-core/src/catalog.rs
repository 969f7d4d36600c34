//! Subject catalog.
//!
//! An ordered list of creature names; the list positions are the item
//! indices the scheduler shuffles around. Ships with an embedded default
//! set, or loads a newline-separated file named in the configuration.

use std::fs;
use std::path::Path;

use crate::error::{CoreError, ValidationError};

const DEFAULT_SUBJECTS: &str = include_str!("catalog/default_subjects.txt");

/// Ordered subject-name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    names: Vec<String>,
}

impl Catalog {
    /// The embedded default subject set.
    pub fn embedded() -> Self {
        Self::parse(DEFAULT_SUBJECTS).expect("embedded subject list is non-empty")
    }

    /// Build a catalog from an explicit name list.
    pub fn from_names(names: Vec<String>) -> Result<Self, ValidationError> {
        if names.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }
        Ok(Self { names })
    }

    /// Load a catalog from a newline-separated file. Blank lines and `#`
    /// comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).ok_or_else(|| {
            ValidationError::EmptySubjectsFile {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn parse(contents: &str) -> Option<Self> {
        let names: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at a scheduler item index.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Whether `guess` names the subject at `index`. Comparison is
    /// case-insensitive on trimmed input.
    pub fn matches(&self, index: usize, guess: &str) -> bool {
        self.name(index)
            .is_some_and(|name| normalize(name) == normalize(guess))
    }

    /// Resolve a guess to its catalog index, for recording which subject
    /// the player actually named.
    pub fn find(&self, guess: &str) -> Option<usize> {
        let guess = normalize(guess);
        self.names.iter().position(|name| normalize(name) == guess)
    }

    /// Up to `limit` names containing `fragment`, in catalog order.
    pub fn suggestions(&self, fragment: &str, limit: usize) -> Vec<&str> {
        let fragment = normalize(fragment);
        if fragment.is_empty() {
            return Vec::new();
        }
        self.names
            .iter()
            .filter(|name| normalize(name).contains(&fragment))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
