//! Search-and-download session.
//!
//! Resolve the platform, fetch every registered source in order (stopping at
//! the first failure), filter the combined rows by title, then hand the
//! caller's pick to the owning source for download.

use std::path::PathBuf;

use crate::error::{Result, RomdlError};
use crate::fetch::ContentFetcher;
use crate::listing::Row;
use crate::platform::PlatformType;
use crate::registry::ConsoleRegistry;

/// A matching row and the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub platform: PlatformType,
    pub source_url: String,
    pub row: Row,
}

/// Result of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing matched; not an error.
    Empty,
    /// Exactly one match, selected automatically.
    Single(Candidate),
    /// Several matches for the caller to choose from.
    Multiple(Vec<Candidate>),
}

impl SearchOutcome {
    fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        match candidates.len() {
            0 => SearchOutcome::Empty,
            1 => SearchOutcome::Single(candidates.remove(0)),
            _ => SearchOutcome::Multiple(candidates),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        match self {
            SearchOutcome::Empty => &[],
            SearchOutcome::Single(c) => std::slice::from_ref(c),
            SearchOutcome::Multiple(cs) => cs,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::Empty)
    }

    /// 1-based pick.
    pub fn select(&self, index: usize) -> Result<&Candidate> {
        let candidates = self.candidates();
        index
            .checked_sub(1)
            .and_then(|i| candidates.get(i))
            .ok_or(RomdlError::InvalidSelection {
                index,
                count: candidates.len(),
            })
    }
}

pub struct Orchestrator {
    registry: ConsoleRegistry,
    fetcher: ContentFetcher,
    save_root: PathBuf,
}

impl Orchestrator {
    pub fn new(registry: ConsoleRegistry, fetcher: ContentFetcher, save_root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            fetcher,
            save_root: save_root.into(),
        }
    }

    pub fn registry(&self) -> &ConsoleRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    /// Searches every source of `platform` for titles containing `title`.
    pub fn search(&mut self, platform: &str, title: &str) -> Result<SearchOutcome> {
        let platform = self.registry.resolve_platform(platform)?;
        let console = self
            .registry
            .console_mut(platform)
            .ok_or_else(|| RomdlError::UnsupportedPlatform(platform.to_string()))?;

        let mut candidates = Vec::new();
        for source in console.sources_mut() {
            let rows = source.fetch_and_parse(&self.fetcher)?;
            candidates.extend(rows.into_iter().filter(|r| r.title_matches(title)).map(|row| {
                Candidate {
                    platform,
                    source_url: source.url().to_string(),
                    row,
                }
            }));
        }
        tracing::info!(%platform, query = title.trim(), matches = candidates.len(), "search finished");
        Ok(SearchOutcome::from_candidates(candidates))
    }

    /// Downloads a candidate through the source that listed it.
    pub fn download(&self, candidate: &Candidate) -> Result<PathBuf> {
        let source = self
            .registry
            .console(candidate.platform)
            .and_then(|c| c.find_source(&candidate.source_url))
            .ok_or_else(|| RomdlError::SourceNotFound {
                platform: candidate.platform.to_string(),
                url: candidate.source_url.clone(),
            })?;
        source.download_selection(&self.fetcher, &self.save_root, &candidate.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RomdlConfig, SourceSeed};

    fn candidate(title: &str) -> Candidate {
        Candidate {
            platform: PlatformType::GameCube,
            source_url: "https://a.example/gc/".to_string(),
            row: Row::new(title, format!("{title}.zip")),
        }
    }

    #[test]
    fn outcome_shape_follows_match_count() {
        assert_eq!(SearchOutcome::from_candidates(vec![]), SearchOutcome::Empty);
        assert!(matches!(
            SearchOutcome::from_candidates(vec![candidate("a")]),
            SearchOutcome::Single(_)
        ));
        let many = SearchOutcome::from_candidates(vec![candidate("a"), candidate("b")]);
        assert_eq!(many.len(), 2);
        assert!(!many.is_empty());
    }

    #[test]
    fn select_is_one_based() {
        let many = SearchOutcome::from_candidates(vec![candidate("a"), candidate("b")]);
        assert_eq!(many.select(1).unwrap().row.title, "a");
        assert_eq!(many.select(2).unwrap().row.title, "b");
        assert!(matches!(
            many.select(0),
            Err(RomdlError::InvalidSelection { index: 0, count: 2 })
        ));
        assert!(matches!(
            many.select(3),
            Err(RomdlError::InvalidSelection { index: 3, count: 2 })
        ));
        assert!(SearchOutcome::Empty.select(1).is_err());
    }

    fn orchestrator(dir: &std::path::Path) -> Orchestrator {
        let cfg = RomdlConfig {
            cache_path: dir.join("cache"),
            save_path: dir.join("games"),
            ..Default::default()
        };
        let registry = ConsoleRegistry::from_seeds(&[SourceSeed::new(
            PlatformType::GameCube,
            "http://127.0.0.1:9/gc/",
        )])
        .unwrap();
        Orchestrator::new(registry, ContentFetcher::from_config(&cfg), &cfg.save_path)
    }

    #[test]
    fn unknown_platform_fails_before_any_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = orchestrator(dir.path());
        assert!(matches!(
            o.search("cube", "mario"),
            Err(RomdlError::UnsupportedPlatform(_))
        ));
        assert!(matches!(
            o.search("playstation_4", "mario"),
            Err(RomdlError::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn download_of_unregistered_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let o = orchestrator(dir.path());
        assert!(matches!(
            o.download(&candidate("a")),
            Err(RomdlError::SourceNotFound { .. })
        ));
    }
}
