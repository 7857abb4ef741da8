//! View configuration.

use std::fmt;
use std::sync::Arc;

use crate::error::{MatviewError, Result};
use crate::geom::{BoxCorners, BoxSides, BoxSize};
use crate::log::LogLevel;
use crate::tile::{DefaultTileRenderStrategy, TileRenderStrategy};

/// Default row height in px.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Default column width in px.
pub const DEFAULT_COL_WIDTH: f32 = 40.0;

/// Default tile size in px.
pub const DEFAULT_TILE_SIZE: BoxSize = BoxSize {
    width: 200.0,
    height: 500.0,
};

/// Host-facing partial configuration.
///
/// Every field is optional; unset fields keep their current value when the
/// update is applied. Fixed counts of 0 mean no fixed band on that side.
#[derive(Default)]
pub struct MatrixViewConfig {
    /// How many rows/cols to show in the fixed bands.
    pub show_fixed: Option<BoxSides<usize>>,
    /// Which fixed corners to overlay. When unset, corners are derived
    /// automatically from the fixed counts (a corner shows when both of
    /// its adjacent bands do).
    pub show_fixed_corners: Option<BoxCorners<bool>>,
    /// Size of the tiles used for virtualization.
    pub tile_size: Option<BoxSize>,
    /// Extra tile rows/cols kept materialized around the viewport.
    pub prefetch_margin: Option<usize>,
    /// Strategy deciding which tiles to show. Replaces the default
    /// prefetching strategy.
    pub tile_render_strategy: Option<Arc<dyn TileRenderStrategy>>,
    /// Diagnostic log level.
    pub log_level: Option<LogLevel>,
}

impl fmt::Debug for MatrixViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixViewConfig")
            .field("show_fixed", &self.show_fixed)
            .field("show_fixed_corners", &self.show_fixed_corners)
            .field("tile_size", &self.tile_size)
            .field("prefetch_margin", &self.prefetch_margin)
            .field(
                "tile_render_strategy",
                &self.tile_render_strategy.as_ref().map(|_| ".."),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Fully resolved configuration, kept by the engine.
#[derive(Clone)]
pub struct Config {
    show_fixed: BoxSides<usize>,
    show_fixed_corners: Option<BoxCorners<bool>>,
    tile_size: BoxSize,
    prefetch_margin: usize,
    log_level: LogLevel,
    strategy: Arc<dyn TileRenderStrategy>,
    custom_strategy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_fixed: BoxSides::default(),
            show_fixed_corners: None,
            tile_size: DEFAULT_TILE_SIZE,
            prefetch_margin: 1,
            log_level: LogLevel::Off,
            strategy: Arc::new(DefaultTileRenderStrategy { prefetch_margin: 1 }),
            custom_strategy: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("show_fixed", &self.show_fixed)
            .field("show_fixed_corners", &self.show_fixed_corners)
            .field("tile_size", &self.tile_size)
            .field("prefetch_margin", &self.prefetch_margin)
            .field("log_level", &self.log_level)
            .field("custom_strategy", &self.custom_strategy)
            .finish()
    }
}

impl Config {
    /// Requested fixed counts per side.
    pub fn show_fixed(&self) -> BoxSides<usize> {
        self.show_fixed
    }

    /// Tile size used for virtualization.
    pub fn tile_size(&self) -> BoxSize {
        self.tile_size
    }

    /// Prefetch margin of the default strategy.
    pub fn prefetch_margin(&self) -> usize {
        self.prefetch_margin
    }

    /// Current log level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// The active visibility strategy.
    pub fn strategy(&self) -> Arc<dyn TileRenderStrategy> {
        Arc::clone(&self.strategy)
    }

    /// Corner overlay flags: explicit if configured, otherwise derived (a
    /// corner shows when both of its adjacent bands are present).
    pub fn corner_flags(&self) -> BoxCorners<bool> {
        if let Some(corners) = self.show_fixed_corners {
            return corners;
        }
        let fixed = self.show_fixed;
        BoxCorners {
            top_left: fixed.top > 0 && fixed.left > 0,
            top_right: fixed.top > 0 && fixed.right > 0,
            bottom_right: fixed.bottom > 0 && fixed.right > 0,
            bottom_left: fixed.bottom > 0 && fixed.left > 0,
        }
    }

    /// Merge `update` over the current values.
    ///
    /// Returns `true` when a structural field (tile size or fixed counts)
    /// changed and the tile layout must be rebuilt. Strategy, prefetch,
    /// corner and log level changes apply in place.
    ///
    /// # Errors
    /// `InvalidSize` if the new tile size is not strictly positive and
    /// finite.
    pub fn apply(&mut self, update: MatrixViewConfig) -> Result<bool> {
        let mut structural = false;

        if let Some(tile_size) = update.tile_size {
            if !tile_size.width.is_finite()
                || !tile_size.height.is_finite()
                || tile_size.width <= 0.0
                || tile_size.height <= 0.0
            {
                return Err(MatviewError::InvalidSize(format!(
                    "tile size {}x{} must be positive",
                    tile_size.width, tile_size.height
                )));
            }
            if tile_size != self.tile_size {
                self.tile_size = tile_size;
                structural = true;
            }
        }

        if let Some(show_fixed) = update.show_fixed {
            if show_fixed != self.show_fixed {
                self.show_fixed = show_fixed;
                structural = true;
            }
        }

        if let Some(corners) = update.show_fixed_corners {
            self.show_fixed_corners = Some(corners);
        }

        if let Some(level) = update.log_level {
            self.log_level = level;
        }

        if let Some(margin) = update.prefetch_margin {
            self.prefetch_margin = margin;
        }

        if let Some(strategy) = update.tile_render_strategy {
            self.strategy = strategy;
            self.custom_strategy = true;
        } else if update.prefetch_margin.is_some() && !self.custom_strategy {
            self.strategy = Arc::new(DefaultTileRenderStrategy {
                prefetch_margin: self.prefetch_margin,
            });
        }

        Ok(structural)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::geom::{Point2D, RowCol};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tile_size(), DEFAULT_TILE_SIZE);
        assert_eq!(config.prefetch_margin(), 1);
        assert_eq!(config.show_fixed(), BoxSides::default());
        assert_eq!(config.log_level(), LogLevel::Off);
    }

    #[test]
    fn test_structural_change_detection() {
        let mut config = Config::default();
        let structural = config
            .apply(MatrixViewConfig {
                tile_size: Some(BoxSize {
                    width: 100.0,
                    height: 100.0,
                }),
                ..MatrixViewConfig::default()
            })
            .unwrap();
        assert!(structural);

        // same value again is not structural
        let structural = config
            .apply(MatrixViewConfig {
                tile_size: Some(BoxSize {
                    width: 100.0,
                    height: 100.0,
                }),
                ..MatrixViewConfig::default()
            })
            .unwrap();
        assert!(!structural);
    }

    #[test]
    fn test_strategy_swap_is_not_structural() {
        struct Never;
        impl TileRenderStrategy for Never {
            fn visible_tiles(
                &self,
                _scroll_position: Point2D,
                _tile_size: BoxSize,
                _canvas_size: Option<BoxSize>,
                _viewport_size: Option<BoxSize>,
            ) -> Vec<RowCol<usize>> {
                Vec::new()
            }
        }

        let mut config = Config::default();
        let structural = config
            .apply(MatrixViewConfig {
                tile_render_strategy: Some(Arc::new(Never)),
                ..MatrixViewConfig::default()
            })
            .unwrap();
        assert!(!structural);
    }

    #[test]
    fn test_prefetch_margin_rebuilds_default_strategy() {
        let mut config = Config::default();
        config
            .apply(MatrixViewConfig {
                prefetch_margin: Some(0),
                ..MatrixViewConfig::default()
            })
            .unwrap();

        let canvas = BoxSize {
            width: 1000.0,
            height: 1000.0,
        };
        let viewport = BoxSize {
            width: 300.0,
            height: 300.0,
        };
        let tile = BoxSize {
            width: 100.0,
            height: 100.0,
        };
        let tiles = config
            .strategy()
            .visible_tiles(Point2D::default(), tile, Some(canvas), Some(viewport));
        assert_eq!(tiles.len(), 9, "margin 0 must reach the swapped strategy");
    }

    #[test]
    fn test_invalid_tile_size_rejected() {
        let mut config = Config::default();
        let result = config.apply(MatrixViewConfig {
            tile_size: Some(BoxSize {
                width: 0.0,
                height: 100.0,
            }),
            ..MatrixViewConfig::default()
        });
        assert!(matches!(result, Err(MatviewError::InvalidSize(_))));
    }

    #[test]
    fn test_corner_flags_derived() {
        let mut config = Config::default();
        config
            .apply(MatrixViewConfig {
                show_fixed: Some(BoxSides {
                    top: 1,
                    left: 2,
                    right: 0,
                    bottom: 0,
                }),
                ..MatrixViewConfig::default()
            })
            .unwrap();
        let corners = config.corner_flags();
        assert!(corners.top_left);
        assert!(!corners.top_right);
        assert!(!corners.bottom_left);
        assert!(!corners.bottom_right);
    }

    #[test]
    fn test_corner_flags_explicit_override() {
        let mut config = Config::default();
        config
            .apply(MatrixViewConfig {
                show_fixed_corners: Some(BoxCorners {
                    top_left: false,
                    top_right: true,
                    bottom_right: false,
                    bottom_left: false,
                }),
                ..MatrixViewConfig::default()
            })
            .unwrap();
        assert!(config.corner_flags().top_right);
        assert!(!config.corner_flags().top_left);
    }
}
