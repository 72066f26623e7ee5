//! Engine configuration
//!
//! Everything the engine needs besides its RNG seed: grid size, shape catalog,
//! palette size, score table and progression constants. Deserializable so the
//! binary can load it from JSON; missing fields take the classic defaults.

use serde::Deserialize;
use thiserror::Error;

use crate::pieces::ShapeCatalog;
use crate::types::{
    BASE_TICK_MS, GRID_HEIGHT, GRID_WIDTH, LINE_SCORES, MAX_SHAPE_DIM, PALETTE_SIZE,
    POINTS_PER_LEVEL,
};

/// Smallest accepted grid side. Never below `MAX_SHAPE_DIM`, so every shape
/// fits horizontally.
pub const MIN_GRID_DIM: usize = MAX_SHAPE_DIM;

/// Largest accepted grid side
pub const MAX_GRID_DIM: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width {0} is outside {min}..={max}", min = MIN_GRID_DIM, max = MAX_GRID_DIM)]
    GridWidth(usize),
    #[error("grid height {0} is outside {min}..={max}", min = MIN_GRID_DIM, max = MAX_GRID_DIM)]
    GridHeight(usize),
    #[error("palette must have at least one color")]
    EmptyPalette,
    #[error("shape catalog is empty")]
    EmptyCatalog,
    #[error("points_per_level must be positive")]
    PointsPerLevel,
    #[error("base_tick_ms must be positive")]
    BaseTick,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Colors are drawn uniformly from `0..palette_size`.
    pub palette_size: u8,
    /// Points per lock indexed by rows cleared (index 0 unused).
    pub line_scores: [u32; 5],
    pub points_per_level: u32,
    /// Gravity period at level 1.
    pub base_tick_ms: u32,
    pub shapes: ShapeCatalog,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_DIM..=MAX_GRID_DIM).contains(&self.grid_width) {
            return Err(ConfigError::GridWidth(self.grid_width));
        }
        if !(MIN_GRID_DIM..=MAX_GRID_DIM).contains(&self.grid_height) {
            return Err(ConfigError::GridHeight(self.grid_height));
        }
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::PointsPerLevel);
        }
        if self.base_tick_ms == 0 {
            return Err(ConfigError::BaseTick);
        }
        Ok(())
    }

    /// Classic settings with a different catalog.
    pub fn with_shapes(shapes: ShapeCatalog) -> Self {
        Self {
            shapes,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH as usize,
            grid_height: GRID_HEIGHT as usize,
            palette_size: PALETTE_SIZE,
            line_scores: LINE_SCORES,
            points_per_level: POINTS_PER_LEVEL,
            base_tick_ms: BASE_TICK_MS,
            shapes: ShapeCatalog::classic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{PieceKind, Shape};

    #[test]
    fn test_default_is_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.grid_width, 10);
        assert_eq!(cfg.grid_height, 20);
        assert_eq!(cfg.shapes.len(), 7);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let cfg = EngineConfig {
            grid_width: 3,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::GridWidth(3)));

        let cfg = EngineConfig {
            grid_height: 65,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::GridHeight(65)));
    }

    #[test]
    fn test_rejects_empty_catalog_and_palette() {
        let cfg = EngineConfig::with_shapes(ShapeCatalog::new(Vec::new()));
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyCatalog));

        let cfg = EngineConfig {
            palette_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_narrowest_grid_fits_every_shape() {
        let cfg = EngineConfig {
            grid_width: MIN_GRID_DIM,
            grid_height: MIN_GRID_DIM,
            shapes: ShapeCatalog::new(vec![
                PieceKind::O.shape(),
                Shape::parse("####").unwrap(),
                Shape::parse("####").unwrap().rotated_cw(),
            ]),
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_progression_constants() {
        let cfg = EngineConfig {
            points_per_level: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::PointsPerLevel));

        let cfg = EngineConfig {
            base_tick_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BaseTick));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{ "grid_width": 8, "shapes": [[[1, 1], [1]], [[1]]] }"#)
                .unwrap();
        assert_eq!(cfg.grid_width, 8);
        assert_eq!(cfg.grid_height, 20);
        assert_eq!(cfg.shapes.len(), 2);
        assert_eq!(cfg.shapes.get(0).unwrap(), Shape::parse("##/#.").unwrap());
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_deserialize_rejects_bad_shape_and_unknown_field() {
        let err = serde_json::from_str::<EngineConfig>(r#"{ "shapes": [[[0, 0]]] }"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("no occupied cells"), "{err}");

        assert!(serde_json::from_str::<EngineConfig>(r#"{ "gravity": 3 }"#).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::GridWidth(2).to_string(),
            "grid width 2 is outside 4..=64"
        );
    }
}
