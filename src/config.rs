//! Tunable thresholds and level table.
//!
//! Defaults reproduce the shipped game exactly; hosts may override them by
//! passing a serialized config across the WASM boundary.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::GridBounds;

/// Thresholds for the safety gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyThresholds {
    /// Fewer free exits than this after eating is a trap.
    pub min_exits: usize,
    /// Absolute floor for the open area around the food after eating.
    pub min_space_floor: usize,
    /// Open area must also be at least `snake length + space_slack`.
    pub space_slack: usize,
    /// Absolute floor for the area behind each exit.
    pub exit_space_floor: usize,
    /// More blocked or off-grid sides than this boxes the food in.
    pub max_wall_neighbors: usize,
    /// Corner exits need `snake length + corner_slack` cells each.
    pub corner_slack: usize,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            min_exits: 2,
            min_space_floor: 6,
            space_slack: 2,
            exit_space_floor: 4,
            max_wall_neighbors: 2,
            corner_slack: 3,
        }
    }
}

/// Shortlist sizing for one placement tier: `max(min, ceil(len * percent / 100))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistSize {
    pub min: usize,
    pub percent: usize,
}

impl ShortlistSize {
    /// Never exceeds `len`, and keeps at least one cell of a non-empty list.
    pub fn for_len(&self, len: usize) -> usize {
        let scaled = len.saturating_mul(self.percent).div_ceil(100);
        self.min.max(scaled).max(1).min(len)
    }

    fn validate(&self, tier: &str) -> Result<()> {
        if self.min == 0 && self.percent == 0 {
            return Err(Error::InvalidConfig(format!(
                "{} shortlist would always be empty",
                tier
            )));
        }
        if self.percent > 100 {
            return Err(Error::InvalidConfig(format!(
                "{} shortlist percent must be at most 100, got {}",
                tier, self.percent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementConfig {
    pub safety: SafetyThresholds,
    /// Tier 1: safe cells ranked by open area.
    pub safe_shortlist: ShortlistSize,
    /// Tier 2: reachable cells ranked by free-neighbor count.
    pub fallback_shortlist: ShortlistSize,
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        if self.safety.min_exits == 0 {
            return Err(Error::InvalidConfig("minExits must be positive".into()));
        }
        self.safe_shortlist.validate("safe")?;
        self.fallback_shortlist.validate("fallback")
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            safety: SafetyThresholds::default(),
            safe_shortlist: ShortlistSize { min: 3, percent: 50 },
            fallback_shortlist: ShortlistSize { min: 2, percent: 30 },
        }
    }
}

/// One level: how much food ends it and how many walls it spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub food: u32,
    pub walls: usize,
}

/// The ten-level progression: each level needs two more food and adds two walls.
pub fn default_levels() -> Vec<LevelConfig> {
    (0..10)
        .map(|i| LevelConfig {
            food: 5 + 2 * i as u32,
            walls: 2 * i,
        })
        .collect()
}

/// Configuration for a headless game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Lives at the start of the game and of every new level.
    pub lives: u32,
    pub levels: Vec<LevelConfig>,
    pub placement: PlacementConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            lives: 3,
            levels: default_levels(),
            placement: PlacementConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.lives == 0 {
            return Err(Error::InvalidConfig("lives must be positive".into()));
        }
        if self.levels.is_empty() {
            return Err(Error::InvalidConfig("at least one level is required".into()));
        }
        if let Some(n) = self.levels.iter().position(|l| l.food == 0) {
            return Err(Error::InvalidConfig(format!("level {} requires no food", n + 1)));
        }
        self.placement.validate()
    }
}
