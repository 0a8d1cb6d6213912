use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// Represents one project row in the dashboard table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier, stable across renders
    pub id: String,
    pub name: String,
    pub repository_link: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub tech_stack: String,
    /// Already formatted upstream
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    pub status: Status,
}

/// A project contributor shown in the overlapping avatar stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(alias = "src")]
    pub avatar_source: String,
    #[serde(alias = "alt", default)]
    pub alt_text: String,
    #[serde(alias = "fallback")]
    pub fallback_initials: String,
}

/// Closed classification of a project's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusVariant {
    Active,
    InProgress,
    OnHold,
}

impl StatusVariant {
    pub const ALL: [StatusVariant; 3] = [Self::Active, Self::InProgress, Self::OnHold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "inProgress",
            Self::OnHold => "onHold",
        }
    }
}

impl fmt::Display for StatusVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusVariant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownStatusVariant(s.to_string()))
    }
}

/// Status badge content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub text: String,
    /// `None` when the source value was missing or not a known variant
    #[serde(default, deserialize_with = "lenient_variant")]
    pub variant: Option<StatusVariant>,
}

impl Status {
    pub fn new(text: impl Into<String>, variant: StatusVariant) -> Self {
        Self {
            text: text.into(),
            variant: Some(variant),
        }
    }
}

// Any value other than an exact variant name maps to None
fn lenient_variant<'de, D>(deserializer: D) -> Result<Option<StatusVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Null => return Ok(None),
        Value::String(name) => name.parse::<StatusVariant>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        tracing::warn!("Unrecognized status variant {}, using default badge", raw);
    }
    Ok(parsed)
}

impl Project {
    /// Repository link with the scheme stripped, for display only
    pub fn repository_display(&self) -> &str {
        let link = self.repository_link.as_str();
        link.strip_prefix("https://")
            .or_else(|| link.strip_prefix("http://"))
            .unwrap_or(link)
    }

    /// Parse the repository link, accepting only web schemes
    pub fn repository_url(&self) -> crate::Result<Url> {
        let url = Url::parse(&self.repository_link)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(crate::Error::Other(format!(
                "Refusing to open non-web link scheme '{}'",
                other
            ))),
        }
    }

    /// Case-insensitive match against name, team and tech stack
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        [&self.name, &self.team, &self.tech_stack]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(link: &str) -> Project {
        Project {
            id: "1".to_string(),
            name: "Acme".to_string(),
            repository_link: link.to_string(),
            team: "Platform".to_string(),
            tech_stack: "Rust".to_string(),
            created_at: "2024-01-01".to_string(),
            contributors: Vec::new(),
            status: Status::new("Active", StatusVariant::Active),
        }
    }

    #[test]
    fn test_repository_display_strips_scheme() {
        let p = project("https://github.com/acme/x");
        assert_eq!(p.repository_display(), "github.com/acme/x");
        assert_eq!(p.repository_link, "https://github.com/acme/x");
    }

    #[test]
    fn test_repository_display_without_scheme() {
        let p = project("github.com/acme/x");
        assert_eq!(p.repository_display(), "github.com/acme/x");
    }

    #[test]
    fn test_repository_url_rejects_other_schemes() {
        assert!(project("https://github.com/acme/x").repository_url().is_ok());
        assert!(project("javascript:alert(1)").repository_url().is_err());
        assert!(project("not a url").repository_url().is_err());
    }

    #[test]
    fn test_status_variant_parse() {
        assert_eq!("active".parse::<StatusVariant>().unwrap(), StatusVariant::Active);
        assert_eq!("inProgress".parse::<StatusVariant>().unwrap(), StatusVariant::InProgress);
        assert_eq!("onHold".parse::<StatusVariant>().unwrap(), StatusVariant::OnHold);
        for name in ["archived", "ACTIVE", "Active", "on-hold", "in_progress", " active"] {
            assert!(
                matches!(name.parse::<StatusVariant>(), Err(crate::Error::UnknownStatusVariant(_))),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_variant_names_are_case_sensitive() {
        for name in ["ACTIVE", "on-hold", "IN_PROGRESS"] {
            let json = format!(r#"{{"text": "x", "variant": "{}"}}"#, name);
            let status: Status = serde_json::from_str(&json).unwrap();
            assert_eq!(status.variant, None, "{:?}", name);
            assert_eq!(crate::status::classify(status.variant), crate::status::BadgeTone::Neutral);
        }
    }

    #[test]
    fn test_non_string_variant_deserializes_to_none() {
        for raw in ["7", "true", "{}", "[]", "null"] {
            let json = format!(r#"{{"text": "x", "variant": {}}}"#, raw);
            let status: Status = serde_json::from_str(&json).unwrap();
            assert_eq!(status.variant, None, "{:?}", raw);
        }
    }

    #[test]
    fn test_unknown_variant_deserializes_to_none() {
        let status: Status =
            serde_json::from_str(r#"{"text": "Archived", "variant": "archived"}"#).unwrap();
        assert_eq!(status.text, "Archived");
        assert_eq!(status.variant, None);

        let status: Status = serde_json::from_str(r#"{"text": "Unknown"}"#).unwrap();
        assert_eq!(status.variant, None);
    }

    #[test]
    fn test_deserialize_camel_case_row() {
        let json = r#"{
            "id": "1",
            "name": "Acme",
            "repositoryLink": "https://github.com/acme/x",
            "team": "Core",
            "techStack": "Rust",
            "createdAt": "Jan 1, 2024",
            "contributors": [
                {"src": "https://example.com/a.png", "alt": "Ann", "fallback": "AN"}
            ],
            "status": {"text": "In Progress", "variant": "inProgress"}
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.tech_stack, "Rust");
        assert_eq!(p.contributors[0].fallback_initials, "AN");
        assert_eq!(p.status.variant, Some(StatusVariant::InProgress));
    }

    #[test]
    fn test_matches_query() {
        let p = project("https://github.com/acme/x");
        assert!(p.matches(""));
        assert!(p.matches("acm"));
        assert!(p.matches("PLATFORM"));
        assert!(!p.matches("python"));
    }
}
