use serde::{Deserialize, Serialize};

/// Known owner names, kept in insertion order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owners(Vec<String>);

impl Owners {
    pub fn new(names: Vec<String>) -> Self {
        let mut owners = Self::default();
        for n in names {
            owners.add(&n);
        }
        owners
    }

    /// Returns false for blanks and case-insensitive duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|n| !n.eq_ignore_ascii_case(name.trim()));
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}
