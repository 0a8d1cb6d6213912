//! Column registry and visibility selection
//!
//! The registry fixes the canonical column order. Callers only choose which
//! columns are shown; they never reorder them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field of a project row that can be shown as a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Name,
    Repository,
    Team,
    TechStack,
    CreatedAt,
    Contributors,
    Status,
}

impl ColumnKey {
    /// External key used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Repository => "repository",
            Self::Team => "team",
            Self::TechStack => "techStack",
            Self::CreatedAt => "createdAt",
            Self::Contributors => "contributors",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "repository" => Ok(Self::Repository),
            "team" => Ok(Self::Team),
            "techstack" | "tech_stack" | "tech-stack" => Ok(Self::TechStack),
            "createdat" | "created_at" | "created-at" => Ok(Self::CreatedAt),
            "contributors" => Ok(Self::Contributors),
            "status" => Ok(Self::Status),
            _ => Err(crate::Error::UnknownColumn(s.to_string())),
        }
    }
}

/// Registry entry binding a row field to its header label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: ColumnKey,
    pub label: &'static str,
}

/// Canonical column order
pub const COLUMN_REGISTRY: [Column; 7] = [
    Column { key: ColumnKey::Name, label: "Project" },
    Column { key: ColumnKey::Repository, label: "Repository" },
    Column { key: ColumnKey::Team, label: "Team" },
    Column { key: ColumnKey::TechStack, label: "Tech Stack" },
    Column { key: ColumnKey::CreatedAt, label: "Created At" },
    Column { key: ColumnKey::Contributors, label: "Contributors" },
    Column { key: ColumnKey::Status, label: "Status" },
];

/// Look up the registry entry for a key
pub fn column(key: ColumnKey) -> &'static Column {
    COLUMN_REGISTRY
        .iter()
        .find(|c| c.key == key)
        .unwrap_or(&COLUMN_REGISTRY[0])
}

/// Immutable snapshot of which columns are visible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    keys: BTreeSet<ColumnKey>,
}

impl ColumnSelection {
    /// Every registry column
    pub fn all() -> Self {
        COLUMN_REGISTRY.iter().map(|c| c.key).collect()
    }

    /// No data columns
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from external key strings; unknown keys are dropped
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| match key.as_ref().parse::<ColumnKey>() {
                Ok(key) => Some(key),
                Err(_) => {
                    tracing::debug!("Ignoring unknown column key '{}'", key.as_ref());
                    None
                }
            })
            .collect()
    }

    pub fn contains(&self, key: ColumnKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A new selection with `key` flipped
    pub fn toggled(&self, key: ColumnKey) -> Self {
        let mut keys = self.keys.clone();
        if !keys.remove(&key) {
            keys.insert(key);
        }
        Self { keys }
    }

    /// External key strings in registry order
    pub fn to_keys(&self) -> Vec<String> {
        visible_columns(self)
            .into_iter()
            .map(|c| c.key.as_str().to_string())
            .collect()
    }
}

impl FromIterator<ColumnKey> for ColumnSelection {
    fn from_iter<T: IntoIterator<Item = ColumnKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Registry columns present in the selection, in registry order
pub fn visible_columns(selection: &ColumnSelection) -> Vec<&'static Column> {
    COLUMN_REGISTRY
        .iter()
        .filter(|c| selection.contains(c.key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(selection: &ColumnSelection) -> Vec<&'static str> {
        visible_columns(selection).iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_registry_order_wins_over_selection_order() {
        let forward = ColumnSelection::from_keys(["name", "repository", "status"]);
        let backward = ColumnSelection::from_keys(["status", "repository", "name"]);
        assert_eq!(labels(&forward), vec!["Project", "Repository", "Status"]);
        assert_eq!(labels(&forward), labels(&backward));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let selection = ColumnSelection::from_keys(["name", "budget", "", "status"]);
        assert_eq!(selection.len(), 2);
        assert_eq!(labels(&selection), vec!["Project", "Status"]);
    }

    #[test]
    fn test_empty_selection() {
        assert!(visible_columns(&ColumnSelection::none()).is_empty());
        assert!(visible_columns(&ColumnSelection::from_keys(["nope"])).is_empty());
    }

    #[test]
    fn test_all_matches_registry() {
        let all = ColumnSelection::all();
        assert_eq!(all.len(), COLUMN_REGISTRY.len());
        assert_eq!(visible_columns(&all).len(), COLUMN_REGISTRY.len());
    }

    #[test]
    fn test_toggled_does_not_mutate_original() {
        let original = ColumnSelection::from_keys(["name"]);
        let toggled = original.toggled(ColumnKey::Status);
        assert!(!original.contains(ColumnKey::Status));
        assert!(toggled.contains(ColumnKey::Status));
        assert!(!toggled.toggled(ColumnKey::Name).contains(ColumnKey::Name));
    }

    #[test]
    fn test_key_aliases_and_round_trip() {
        assert_eq!("tech_stack".parse::<ColumnKey>().unwrap(), ColumnKey::TechStack);
        assert_eq!("CreatedAt".parse::<ColumnKey>().unwrap(), ColumnKey::CreatedAt);
        for column in COLUMN_REGISTRY {
            assert_eq!(column.key.as_str().parse::<ColumnKey>().unwrap(), column.key);
        }
    }

    #[test]
    fn test_to_keys_in_registry_order() {
        let selection = ColumnSelection::from_keys(["status", "team"]);
        assert_eq!(selection.to_keys(), vec!["team", "status"]);
    }
}
