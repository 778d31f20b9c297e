use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Capability;

/// One `roles:` entry from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub email: String,
    #[serde(default)]
    pub caps: Vec<Capability>,
}

/// Email to capability lookup, consulted only when a token is minted.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    entries: HashMap<String, Vec<Capability>>,
}

impl RoleTable {
    /// Builds the table; when an email appears twice the first entry wins.
    pub fn new(entries: impl IntoIterator<Item = RoleEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            map.entry(entry.email).or_insert(entry.caps);
        }
        Self { entries: map }
    }

    /// Unknown identities get an empty set rather than an error.
    pub fn capabilities_for(&self, email: &str) -> Vec<Capability> {
        self.entries.get(email).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
