//! Engine tuning and per-interaction modifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default snap radius in cells.
pub const DEFAULT_EDGE_DISTANCE_THRESHOLD: f64 = 5.0;
/// Default bound on overlap-push passes.
pub const DEFAULT_MAX_PUSH_PASSES: u32 = 10;
/// Default cap on the summed height of two vertically snapped items.
pub const DEFAULT_MAX_COMBINED_HEIGHT: i32 = 6;
/// Default floor for heights shrunk by the combined-height cap.
pub const DEFAULT_MIN_SNAP_HEIGHT: i32 = 3;
/// Default height forced while the fullscreen modifier is held.
pub const DEFAULT_FULLSCREEN_HEIGHT: i32 = 10;
/// Default halo (in cells) used to find neighbours of a dragged item.
pub const DEFAULT_CLOSE_BLOCK_MARGIN: i32 = 1;

/// Tuning shared by every engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edges farther than this from the dragged centre are ignored.
    pub edge_distance_threshold: f64,
    pub max_push_passes: u32,
    pub max_combined_height: i32,
    pub min_snap_height: i32,
    pub fullscreen_height: i32,
    pub close_block_margin: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            edge_distance_threshold: DEFAULT_EDGE_DISTANCE_THRESHOLD,
            max_push_passes: DEFAULT_MAX_PUSH_PASSES,
            max_combined_height: DEFAULT_MAX_COMBINED_HEIGHT,
            min_snap_height: DEFAULT_MIN_SNAP_HEIGHT,
            fullscreen_height: DEFAULT_FULLSCREEN_HEIGHT,
            close_block_margin: DEFAULT_CLOSE_BLOCK_MARGIN,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn edge_distance_threshold(mut self, threshold: f64) -> Self {
        self.edge_distance_threshold = threshold;
        self
    }

    #[must_use]
    pub fn max_push_passes(mut self, passes: u32) -> Self {
        self.max_push_passes = passes;
        self
    }

    #[must_use]
    pub fn max_combined_height(mut self, height: i32) -> Self {
        self.max_combined_height = height;
        self
    }

    #[must_use]
    pub fn min_snap_height(mut self, height: i32) -> Self {
        self.min_snap_height = height;
        self
    }

    #[must_use]
    pub fn fullscreen_height(mut self, height: i32) -> Self {
        self.fullscreen_height = height;
        self
    }

    #[must_use]
    pub fn close_block_margin(mut self, margin: i32) -> Self {
        self.close_block_margin = margin;
        self
    }

    /// Height both items shrink to when a vertical snap exceeds the cap.
    #[must_use]
    pub fn capped_snap_height(&self) -> i32 {
        self.min_snap_height.max(self.max_combined_height / 2)
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.edge_distance_threshold.is_finite() || self.edge_distance_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.edge_distance_threshold,
            });
        }
        if self.max_push_passes == 0 {
            return Err(ConfigError::ZeroPushPasses);
        }
        for (field, value) in [
            ("max_combined_height", self.max_combined_height),
            ("min_snap_height", self.min_snap_height),
            ("fullscreen_height", self.fullscreen_height),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveHeight { field, value });
            }
        }
        if self.close_block_margin < 0 {
            return Err(ConfigError::NegativeMargin {
                value: self.close_block_margin,
            });
        }
        Ok(())
    }
}

/// Invalid [`GridConfig`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidThreshold { value: f64 },
    ZeroPushPasses,
    NonPositiveHeight { field: &'static str, value: i32 },
    NegativeMargin { value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold { value } => {
                write!(f, "edge distance threshold must be finite and >= 0, got {value}")
            }
            Self::ZeroPushPasses => write!(f, "max_push_passes must be at least 1"),
            Self::NonPositiveHeight { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::NegativeMargin { value } => {
                write!(f, "close_block_margin must be >= 0, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Modifier keys held during an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionModifiers {
    /// Force the dragged item to the top row at fullscreen height.
    pub fullscreen: bool,
    /// Keep the dragged item's own height on left/right snaps.
    pub proportional: bool,
}

impl InteractionModifiers {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            fullscreen: false,
            proportional: false,
        }
    }
}
