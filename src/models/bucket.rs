use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work-item category; each bucket maps 1:1 to a named remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Profiles,
    Contracts,
    Projects,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Profiles, Bucket::Contracts, Bucket::Projects];

    /// Stable key used in ids and local storage.
    pub fn key(&self) -> &'static str {
        match self {
            Bucket::Profiles => "profiles",
            Bucket::Contracts => "contracts",
            Bucket::Projects => "projects",
        }
    }

    /// Name of the remote table backing this bucket.
    pub fn table_name(&self) -> &'static str {
        match self {
            Bucket::Profiles => "Profiles",
            Bucket::Contracts => "Contracts",
            Bucket::Projects => "Main Projects",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "profiles" | "profile" => Some(Bucket::Profiles),
            "contracts" | "contract" => Some(Bucket::Contracts),
            "projects" | "project" => Some(Bucket::Projects),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
