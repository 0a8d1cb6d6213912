use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::models::Project;
use crate::{Error, Result};

/// Accepted top-level shapes of a projects document
#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsDocument {
    Bare(Vec<Project>),
    Wrapped { projects: Vec<Project> },
}

/// Ordered collection of projects with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSet {
    projects: Vec<Project>,
}

impl ProjectSet {
    /// Build a set, rejecting duplicate ids
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(Error::DuplicateProjectId(project.id.clone()));
            }
        }
        Ok(Self { projects })
    }

    /// Parse a JSON document (bare array or `{"projects": [...]}`)
    pub fn from_json(content: &str) -> Result<Self> {
        let document: ProjectsDocument = serde_json::from_str(content)?;
        let projects = match document {
            ProjectsDocument::Bare(projects) => projects,
            ProjectsDocument::Wrapped { projects } => projects,
        };
        Self::new(projects)
    }

    /// Load projects from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        tracing::info!("Loaded {} projects from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects matching a search query, in original order
    pub fn filtered(&self, query: &str) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{classify, BadgeTone};

    const TWO_PROJECTS: &str = r#"[
        {"id": "1", "name": "Acme", "repositoryLink": "https://github.com/acme/x",
         "status": {"text": "Active", "variant": "active"}},
        {"id": "2", "name": "Globex", "repositoryLink": "https://github.com/globex/y",
         "team": "Data", "status": {"text": "On Hold", "variant": "onHold"}}
    ]"#;

    #[test]
    fn test_from_json_bare_array() {
        let set = ProjectSet::from_json(TWO_PROJECTS).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.projects()[1].name, "Globex");
    }

    #[test]
    fn test_from_json_wrapped() {
        let doc = format!(r#"{{"projects": {}}}"#, TWO_PROJECTS);
        let set = ProjectSet::from_json(&doc).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let doc = r#"[
            {"id": "1", "name": "A", "repositoryLink": "https://a", "status": {"text": "x"}},
            {"id": "1", "name": "B", "repositoryLink": "https://b", "status": {"text": "y"}}
        ]"#;
        assert!(matches!(
            ProjectSet::from_json(doc),
            Err(Error::DuplicateProjectId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(ProjectSet::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_filter() {
        let set = ProjectSet::from_json(TWO_PROJECTS).unwrap();
        let filtered = set.filtered("data");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_bad_variant_keeps_document() {
        let doc = r#"[
            {"id": "1", "name": "A", "repositoryLink": "https://a",
             "status": {"text": "Odd", "variant": 7}},
            {"id": "2", "name": "B", "repositoryLink": "https://b",
             "status": {"text": "Shouting", "variant": "ACTIVE"}},
            {"id": "3", "name": "C", "repositoryLink": "https://c",
             "status": {"text": "Paused", "variant": "on-hold"}}
        ]"#;
        let set = ProjectSet::from_json(doc).unwrap();
        assert_eq!(set.len(), 3);
        for project in set.projects() {
            assert_eq!(project.status.variant, None);
            assert_eq!(classify(project.status.variant), BadgeTone::Neutral);
        }
        assert_eq!(set.projects()[0].status.text, "Odd");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProjectSet::load(Path::new("/nonexistent/projdash/projects.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
