//! Output options shared by the formatters and the conversion pipeline.
//!
//! Options can be loaded from YAML with kebab-case keys; missing keys take
//! their defaults:
//! ```yaml
//! transpose: -2
//! include-tabs: false
//! simplify: true
//! ```

use crate::chord::RenderOptions;
use crate::error::ChordSheetError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FormatOptions {
    /// Semitones to shift every chord by.
    pub transpose: i32,
    /// Keep tab sections in the output.
    pub include_tabs: bool,
    /// Render `add9` triads as `2`.
    pub simplify: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            transpose: 0,
            include_tabs: true,
            simplify: false,
        }
    }
}

impl FormatOptions {
    /// Parse options from a YAML document.
    ///
    /// # Errors
    /// `ChordSheetError::Config` when the YAML is malformed or has unknown keys.
    pub fn from_yaml(yaml: &str) -> Result<Self, ChordSheetError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ChordSheetError::Config(e.to_string()))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            simplify: self.simplify,
        }
    }
}
