//! Console registry: which sources serve which platform.
//!
//! Consoles are kept in registration order, and so are the sources within a
//! console; the orchestrator queries them in that order.

use crate::config::SourceSeed;
use crate::error::{Result, RomdlError};
use crate::platform::PlatformType;
use crate::source::Source;

const MYRIENT_PS3_PSN_CONTENT: &str =
    "https://myrient.erista.me/files/No-Intro/Sony%20-%20PlayStation%203%20(PSN)%20(Content)/";
const MYRIENT_PS3_PSN_UPDATES: &str =
    "https://myrient.erista.me/files/No-Intro/Sony%20-%20PlayStation%203%20(PSN)%20(Updates)/";
const MYRIENT_GAMECUBE_NKIT_RVZ: &str =
    "https://myrient.erista.me/files/Redump/Nintendo%20-%20GameCube%20-%20NKit%20RVZ%20[zstd-19-128k]/";

/// Built-in registry used when the config has no `[[sources]]`.
pub fn default_seeds() -> Vec<SourceSeed> {
    vec![
        SourceSeed::new(PlatformType::PlayStation3, MYRIENT_PS3_PSN_CONTENT),
        SourceSeed::new(PlatformType::PlayStation3, MYRIENT_PS3_PSN_UPDATES),
        SourceSeed::new(PlatformType::GameCube, MYRIENT_GAMECUBE_NKIT_RVZ),
    ]
}

/// The sources registered for one platform.
#[derive(Debug, Clone)]
pub struct Console {
    platform: PlatformType,
    sources: Vec<Source>,
}

impl Console {
    pub fn new(platform: PlatformType) -> Self {
        Self {
            platform,
            sources: Vec::new(),
        }
    }

    pub fn platform(&self) -> PlatformType {
        self.platform
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut [Source] {
        &mut self.sources
    }

    pub fn has_multiple_sources(&self) -> bool {
        self.sources.len() > 1
    }

    /// First source whose key is `key`.
    pub fn get_source_or_default(&self, key: PlatformType) -> Option<&Source> {
        self.sources.iter().find(|s| s.platform() == key)
    }

    pub fn find_source(&self, url: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.url() == url)
    }

    /// Appends `source`; rejected if a source with the same key is present.
    pub fn add_source(&mut self, source: Source) -> Result<()> {
        self.check_platform(&source)?;
        if self.get_source_or_default(source.platform()).is_some() {
            return Err(RomdlError::DuplicateSource {
                platform: self.platform.to_string(),
                url: source.url().to_string(),
            });
        }
        self.sources.push(source);
        Ok(())
    }

    /// Union with `sources` by `(key, url)` identity. Existing sources keep
    /// their place; new ones are appended in input order. A foreign source
    /// rejects the whole batch.
    pub fn add_sources(&mut self, sources: impl IntoIterator<Item = Source>) -> Result<()> {
        let sources: Vec<Source> = sources.into_iter().collect();
        for source in &sources {
            self.check_platform(source)?;
        }
        for source in sources {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
        Ok(())
    }

    /// Removes sources keyed `key`. Absent key is a no-op.
    pub fn remove_source_by_key(&mut self, key: PlatformType) {
        self.sources.retain(|s| s.platform() != key);
    }

    fn check_platform(&self, source: &Source) -> Result<()> {
        if source.platform() != self.platform {
            return Err(RomdlError::UnsupportedPlatform(format!(
                "{} source cannot be registered on the {} console",
                source.platform(),
                self.platform
            )));
        }
        Ok(())
    }
}

/// All consoles known to the process.
#[derive(Debug, Clone, Default)]
pub struct ConsoleRegistry {
    consoles: Vec<Console>,
}

impl ConsoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from seeds, grouping by platform in first-seen order.
    pub fn from_seeds(seeds: &[SourceSeed]) -> Result<Self> {
        let mut registry = Self::new();
        for seed in seeds {
            registry.add_sources(seed.platform, [Source::new(seed.platform, &seed.url)])?;
        }
        Ok(registry)
    }

    /// Platforms with a console, in registration order.
    pub fn platforms(&self) -> Vec<PlatformType> {
        self.consoles.iter().map(Console::platform).collect()
    }

    pub fn console(&self, platform: PlatformType) -> Option<&Console> {
        self.consoles.iter().find(|c| c.platform == platform)
    }

    pub fn console_mut(&mut self, platform: PlatformType) -> Option<&mut Console> {
        self.consoles.iter_mut().find(|c| c.platform == platform)
    }

    /// Applies `change` to the console for `platform`. A console that did not
    /// exist yet is only kept when the change succeeds.
    fn update_console(
        &mut self,
        platform: PlatformType,
        change: impl FnOnce(&mut Console) -> Result<()>,
    ) -> Result<()> {
        if let Some(console) = self.console_mut(platform) {
            return change(console);
        }
        let mut console = Console::new(platform);
        change(&mut console)?;
        self.consoles.push(console);
        Ok(())
    }

    pub fn get_source_or_default(
        &self,
        platform: PlatformType,
        key: PlatformType,
    ) -> Option<&Source> {
        self.console(platform)?.get_source_or_default(key)
    }

    pub fn add_source(&mut self, platform: PlatformType, source: Source) -> Result<()> {
        self.update_console(platform, |c| c.add_source(source))
    }

    pub fn add_sources(
        &mut self,
        platform: PlatformType,
        sources: impl IntoIterator<Item = Source>,
    ) -> Result<()> {
        self.update_console(platform, |c| c.add_sources(sources))
    }

    pub fn remove_source_by_key(&mut self, platform: PlatformType, key: PlatformType) {
        if let Some(console) = self.console_mut(platform) {
            console.remove_source_by_key(key);
        }
    }

    /// Base URLs registered for `platform`, in registration order.
    pub fn sources_for_platform(&self, platform: PlatformType) -> Vec<String> {
        self.console(platform)
            .map(|c| c.sources.iter().map(|s| s.url().to_string()).collect())
            .unwrap_or_default()
    }

    /// Parses a platform identifier and checks that at least one source serves it.
    pub fn resolve_platform(&self, input: &str) -> Result<PlatformType> {
        let platform: PlatformType = input.parse()?;
        match self.console(platform) {
            Some(c) if !c.sources.is_empty() => Ok(platform),
            _ => Err(RomdlError::UnsupportedPlatform(format!(
                "{} (no sources registered)",
                platform
            ))),
        }
    }
}
