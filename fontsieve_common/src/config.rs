//! Definitions for the `fontsieve.toml` profile file.
//!
//! A profile names a target codepoint range along with the number of missing codepoints that is
//! still acceptable, and optionally where to download candidate fonts from:
//!
//! ```toml
//! [profile.arabic]
//! ranges = "0x0020-0x007D,0x0600-0x06FF,0x0750-0x077F,0x08A0-0x08FF"
//! tolerance = 5
//!
//! [profile.arabic.download]
//! fonts = ["noto-sans-arabic", "noto-naskh-arabic", "noto-kufi-arabic"]
//! subsets = "arabic"
//! ```

use crate::codepoints::{parse_range_list, CodepointRange};
use anyhow::*;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

pub const DEFAULT_FONT_API: &str = "https://gwfh.mranftl.com/api/fonts/";

fn default_font_api() -> String {
    DEFAULT_FONT_API.to_string()
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DownloadSource {
    #[serde(default = "default_font_api")]
    pub api: String,
    pub fonts: Vec<String>,
    #[serde(default)]
    pub subsets: Option<String>,
}
impl DownloadSource {
    /// Returns the metadata URL for one font id.
    pub fn font_url(&self, font_id: &str) -> String {
        match &self.subsets {
            Some(subsets) => format!("{}{font_id}?subsets={subsets}", self.api),
            None => format!("{}{font_id}", self.api),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub ranges: String,
    #[serde(default)]
    pub tolerance: usize,
    #[serde(default)]
    pub download: Option<DownloadSource>,
}
impl Profile {
    pub fn target_ranges(&self) -> Result<Vec<CodepointRange>> {
        parse_range_list(&self.ranges)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profile: BTreeMap<String, Profile>,
}
impl ProfileFile {
    pub fn parse(data: &str) -> Result<ProfileFile> {
        let parsed = toml::from_str::<ProfileFile>(data)?;
        for (name, profile) in &parsed.profile {
            profile
                .target_ranges()
                .with_context(|| format!("Invalid ranges in profile '{name}'"))?;
        }
        Ok(parsed)
    }

    pub fn load(path: &Path) -> Result<ProfileFile> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Could not read profile file '{}'", path.display()))?;
        ProfileFile::parse(&data)
    }

    pub fn get(&self, name: &str) -> Result<&Profile> {
        match self.profile.get(name) {
            Some(profile) => Ok(profile),
            None => {
                let known: Vec<_> = self.profile.keys().map(String::as_str).collect();
                bail!("No such profile: '{name}' (available: {})", known.join(", "))
            }
        }
    }
}
