//! Contributor avatar availability
//!
//! A terminal cannot draw the avatar images themselves, but whether an avatar
//! loads decides between the contributor's name glyph and the fallback
//! initials. Sources are probed in the background and the outcome is cached.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use projdash_core::{AvatarAvailability, Project};

use crate::event::AvatarLoadResult;

/// Load state of one avatar source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarState {
    Loading,
    Ready,
    Failed(String),
}

/// Avatar states keyed by source
#[derive(Debug, Clone, Default)]
pub struct AvatarCache {
    avatars: HashMap<String, AvatarState>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an avatar is ready
    pub fn is_ready(&self, source: &str) -> bool {
        matches!(self.avatars.get(source), Some(AvatarState::Ready))
    }

    /// Mark an avatar as loading
    pub fn start_loading(&mut self, source: &str) {
        if !self.avatars.contains_key(source) {
            self.avatars.insert(source.to_string(), AvatarState::Loading);
        }
    }

    pub fn set_ready(&mut self, source: &str) {
        self.avatars.insert(source.to_string(), AvatarState::Ready);
    }

    pub fn set_failed(&mut self, source: &str, error: String) {
        self.avatars.insert(source.to_string(), AvatarState::Failed(error));
    }

    /// Record the outcome of a background probe
    pub fn apply(&mut self, result: AvatarLoadResult) {
        match result {
            AvatarLoadResult::Success { source } => self.set_ready(&source),
            AvatarLoadResult::Failure { source, error } => {
                tracing::debug!("Avatar '{}' unavailable: {}", source, error);
                self.set_failed(&source, error);
            }
        }
    }

    /// Sources referenced by `projects` that have never been probed
    pub fn untracked_sources(&self, projects: &[Project]) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for contributor in projects.iter().flat_map(|p| &p.contributors) {
            let source = &contributor.avatar_source;
            if source.is_empty() || self.avatars.contains_key(source) || sources.contains(source) {
                continue;
            }
            sources.push(source.clone());
        }
        sources
    }

    pub fn clear(&mut self) {
        self.avatars.clear();
    }
}

impl AvatarAvailability for AvatarCache {
    fn is_available(&self, source: &str) -> bool {
        self.is_ready(source)
    }
}

/// Check whether an avatar source can be loaded
///
/// Web sources are fetched without a Referer header; anything else is
/// treated as a local file path.
pub async fn probe_avatar(source: String) -> AvatarLoadResult {
    let outcome = if source.starts_with("http://") || source.starts_with("https://") {
        probe_remote(&source).await
    } else {
        probe_local(Path::new(&source)).await
    };

    match outcome {
        Ok(()) => AvatarLoadResult::Success { source },
        Err(error) => AvatarLoadResult::Failure { source, error },
    }
}

async fn probe_remote(source: &str) -> Result<(), String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .referer(false)
        .build()
        .map_err(|e| format!("Client error: {}", e))?;

    let response = client
        .get(source)
        .header("Accept", "image/png,image/jpeg,image/gif,image/*;q=0.8")
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    Ok(())
}

async fn probe_local(path: &Path) -> Result<(), String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    if metadata.is_file() && metadata.len() > 0 {
        Ok(())
    } else {
        Err(format!("{}: not a non-empty file", path.display()))
    }
}
