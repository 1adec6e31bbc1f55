//! Engine configuration.
//!
//! The server configures the item core at startup by providing:
//! - `ViewConfig`: How items are decorated for the client
//! - `MergeConfig`: Cost constants for the repair station
//! - `LogConfig`: Tracing filter defaults
//! - `EngineConfig`: Combines all configuration
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use voxel_items::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "merge": { "rename_cost": 3 } }"#).unwrap();
//! assert_eq!(config.merge.rename_cost, 3);
//! assert_eq!(config.merge.repair_bonus_percent, 12);
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Settings for the client view transform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Color of rendered enchantment lore lines (0xRRGGBB).
    pub enchant_line_color: u32,

    /// Color of synthesized names when rarity coloring is off or the
    /// material is not registered.
    pub fallback_name_color: u32,

    /// Color synthesized names with the material's rarity color.
    pub color_names_by_rarity: bool,

    /// Write the hidden decoration marker so revert does not depend on
    /// matching localized text.
    pub write_marker: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            enchant_line_color: 0xAAAAAA,
            fallback_name_color: 0xFFFFFF,
            color_names_by_rarity: true,
            write_marker: true,
        }
    }
}

impl ViewConfig {
    /// Disable the hidden marker (revert falls back to text heuristics).
    #[must_use]
    pub fn without_marker(mut self) -> Self {
        self.write_marker = false;
        self
    }

    /// Use a fixed name color instead of the rarity color.
    #[must_use]
    pub fn with_fixed_name_color(mut self, color: u32) -> Self {
        self.color_names_by_rarity = false;
        self.fallback_name_color = color;
        self
    }
}

/// Cost constants for the enchantment merge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Percentage of max durability restored on top of the better input.
    pub repair_bonus_percent: u32,

    /// Cost added when two damageable items of the same kind are combined.
    pub durability_cost: u32,

    /// Cost added for a non-empty rename.
    pub rename_cost: u32,

    /// Lower bound on the merge cost (before renaming).
    pub min_cost: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            repair_bonus_percent: 12,
            durability_cost: 2,
            rename_cost: 1,
            min_cost: 1,
        }
    }
}

/// Tracing defaults. `RUST_LOG` still wins when set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive ("info", "debug", ...).
    pub level: String,

    /// Extra `target=level` directives.
    pub targets: Vec<(String, String)>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            targets: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Add a per-target directive.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>, level: impl Into<String>) -> Self {
        self.targets.push((target.into(), level.into()));
        self
    }

    /// Render as an `EnvFilter` directive string.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut parts = vec![self.level.clone()];
        parts.extend(self.targets.iter().map(|(t, l)| format!("{t}={l}")));
        parts.join(",")
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub view: ViewConfig,
    pub merge: MergeConfig,
    pub log: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            merge: MergeConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the view settings.
    #[must_use]
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Replace the merge settings.
    #[must_use]
    pub fn with_merge(mut self, merge: MergeConfig) -> Self {
        self.merge = merge;
        self
    }

    /// Replace the logging settings.
    #[must_use]
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}
