//! Supported game platforms.
//!
//! Platform strings from the caller are matched exactly (case-insensitive,
//! with whitespace and hyphens folded to `_`) against the canonical
//! identifiers. Partial inputs such as `"cube"` are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RomdlError;
use crate::listing::ListingFormat;

/// One fixed console per generation/brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformType {
    #[serde(rename = "playstation_1")]
    PlayStation1,
    #[serde(rename = "playstation_2")]
    PlayStation2,
    #[serde(rename = "playstation_3")]
    PlayStation3,
    #[serde(rename = "playstation_4")]
    PlayStation4,
    #[serde(rename = "playstation_5")]
    PlayStation5,
    #[serde(rename = "gamecube")]
    GameCube,
    #[serde(rename = "gameboy_advance")]
    GameBoyAdvance,
}

impl PlatformType {
    pub const ALL: [PlatformType; 7] = [
        PlatformType::PlayStation1,
        PlatformType::PlayStation2,
        PlatformType::PlayStation3,
        PlatformType::PlayStation4,
        PlatformType::PlayStation5,
        PlatformType::GameCube,
        PlatformType::GameBoyAdvance,
    ];

    /// Canonical identifier, also used as the download sub-directory.
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformType::PlayStation1 => "playstation_1",
            PlatformType::PlayStation2 => "playstation_2",
            PlatformType::PlayStation3 => "playstation_3",
            PlatformType::PlayStation4 => "playstation_4",
            PlatformType::PlayStation5 => "playstation_5",
            PlatformType::GameCube => "gamecube",
            PlatformType::GameBoyAdvance => "gameboy_advance",
        }
    }

    /// Parser strategy used for this platform's listing pages.
    pub fn listing_format(self) -> ListingFormat {
        match self {
            PlatformType::PlayStation1
            | PlatformType::PlayStation2
            | PlatformType::PlayStation3
            | PlatformType::PlayStation4
            | PlatformType::PlayStation5
            | PlatformType::GameCube
            | PlatformType::GameBoyAdvance => ListingFormat::DirectoryIndex,
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformType {
    type Err = RomdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        PlatformType::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| RomdlError::UnsupportedPlatform(s.trim().to_string()))
    }
}

/// Lower-case, trim, and fold runs of whitespace or hyphens into one `_`.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_sep = false;
    for c in s.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }
    out
}
