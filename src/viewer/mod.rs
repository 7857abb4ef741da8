//! Main `MatrixView` struct - the primary entry point for the engine.
//!
//! This module provides the engine façade that handles:
//! - Owning the model, configuration and the current layout snapshot
//! - Structural rebuilds (matrix replaced, sizes or config changed)
//! - The per-tick scroll path, delegated to the scroll synchronizer
//! - The host-facing region, corner and renderer-registry views
//!
//! Structural changes are atomic: the new geometry, regions and tiles are
//! built completely before being swapped in with a single assignment, so a
//! scroll tick observes either the fully-old or fully-new layout, never a
//! mix.

mod registry;
mod scroll;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::{Config, MatrixViewConfig, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::error::Result;
use crate::geom::{BoxCorners, BoxSize, Point2D, RowCol, RowsCols, Slice};
use crate::layout::{
    partition, AxisModel, MatrixGeometry, RegionDescriptor, RegionKind, RegionSet,
};
use crate::log::{Log, LogSink};
use crate::model::{Dimension, MatrixModel, SizeProvider};
use crate::tile::{build_tiles, grid_extent, Cell, Tile};

pub use registry::{RendererRegistry, TileId, TileRenderer};
pub use scroll::{ScrollState, ScrollUpdate};

/// Environment queries provided by the host, not owned by the engine.
pub trait HostEnvironment {
    /// Pixel size of the scroll container, including scrollbars, or `None`
    /// while the host has not measured it yet.
    fn container_size(&self) -> Option<BoxSize>;

    /// Scrollbar thickness in px.
    fn scrollbar_width(&self) -> f32;

    /// Whether the host render engine keeps scrollbars outside the content
    /// box. Legacy engines do not reserve scrollbar space inside the
    /// container, so the scrollbar width must not be subtracted when
    /// deriving the viewport size.
    fn legacy_scrollbar_quirk(&self) -> bool;
}

/// One region of the layout, ready for the host to mount: its descriptor
/// and the tiles carrying the region's cells.
pub struct RegionView<V> {
    pub(crate) descriptor: RegionDescriptor,
    pub(crate) tiles: Vec<Tile<V>>,
    /// Maps a row-major tile index to its position in `tiles`.
    pub(crate) tiles_by_index: HashMap<usize, usize>,
    /// Visible set after the last tick; `None` until the first sync after
    /// a rebuild.
    pub(crate) last_visible: Option<HashSet<usize>>,
}

impl<V> RegionView<V> {
    fn new(descriptor: RegionDescriptor, tiles: Vec<Tile<V>>) -> Self {
        let tiles_by_index = tiles
            .iter()
            .enumerate()
            .map(|(position, tile)| (tile.row_major_index, position))
            .collect();
        Self {
            descriptor,
            tiles,
            tiles_by_index,
            last_visible: None,
        }
    }

    fn empty(kind: RegionKind) -> Self {
        Self::new(
            RegionDescriptor {
                kind,
                row_slice: Slice::default(),
                col_slice: Slice::default(),
                pixel_size: BoxSize::default(),
                pixel_offset: Point2D::default(),
                scroll_offset: Point2D::default(),
            },
            Vec::new(),
        )
    }

    /// Which region this is.
    pub fn kind(&self) -> RegionKind {
        self.descriptor.kind
    }

    /// Index slices and pixel placement of the region.
    pub fn descriptor(&self) -> &RegionDescriptor {
        &self.descriptor
    }

    /// The region's tiles, in row-major order of creation.
    pub fn tiles(&self) -> &[Tile<V>] {
        &self.tiles
    }
}

/// Pixel box of a fixed corner overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerView {
    /// Extent of the corner box.
    pub size: BoxSize,
    /// Placement relative to the viewport origin.
    pub offset: Point2D,
}

/// The five region views of one layout generation.
pub(crate) struct Regions<V> {
    top: RegionView<V>,
    bottom: RegionView<V>,
    left: RegionView<V>,
    right: RegionView<V>,
    center: RegionView<V>,
}

impl<V> Regions<V> {
    fn empty() -> Self {
        Self {
            top: RegionView::empty(RegionKind::Top),
            bottom: RegionView::empty(RegionKind::Bottom),
            left: RegionView::empty(RegionKind::Left),
            right: RegionView::empty(RegionKind::Right),
            center: RegionView::empty(RegionKind::Center),
        }
    }

    fn get(&self, kind: RegionKind) -> &RegionView<V> {
        match kind {
            RegionKind::Top => &self.top,
            RegionKind::Bottom => &self.bottom,
            RegionKind::Left => &self.left,
            RegionKind::Right => &self.right,
            RegionKind::Center => &self.center,
        }
    }

    fn get_mut(&mut self, kind: RegionKind) -> &mut RegionView<V> {
        match kind {
            RegionKind::Top => &mut self.top,
            RegionKind::Bottom => &mut self.bottom,
            RegionKind::Left => &mut self.left,
            RegionKind::Right => &mut self.right,
            RegionKind::Center => &mut self.center,
        }
    }
}

/// One immutable layout generation: geometry, tile grid and regions.
struct ViewLayout<V> {
    geometry: MatrixGeometry,
    viewport_size: Option<BoxSize>,
    grid: RowsCols<usize>,
    regions: Regions<V>,
}

impl<V> ViewLayout<V> {
    fn empty(viewport_size: Option<BoxSize>) -> Self {
        Self {
            geometry: MatrixGeometry::empty(),
            viewport_size,
            grid: RowsCols::default(),
            regions: Regions::empty(),
        }
    }
}

/// The tile virtualization engine.
///
/// Owns the matrix model, the resolved configuration and the current
/// layout snapshot. The host feeds it structural inputs (`set_matrix`,
/// `set_config`, size providers) and scroll ticks (`scroll_to`), and
/// mounts the per-region tile views it exposes.
pub struct MatrixView<V> {
    env: Box<dyn HostEnvironment>,
    log: Log,
    config: Config,
    model: MatrixModel<V>,
    row_sizes: SizeProvider,
    col_sizes: SizeProvider,
    layout: ViewLayout<V>,
    registry: RendererRegistry,
}

impl<V: Clone> MatrixView<V> {
    /// Create an engine with an empty matrix.
    ///
    /// `env` supplies container measurements; `sink` receives diagnostics
    /// (pass [`crate::NullLog`] to silence them).
    pub fn new(env: Box<dyn HostEnvironment>, sink: Arc<dyn LogSink>) -> Self {
        let mut view = Self {
            log: Log::new(sink, "matrix-view: "),
            config: Config::default(),
            model: MatrixModel::new(),
            row_sizes: SizeProvider::Constant(DEFAULT_ROW_HEIGHT),
            col_sizes: SizeProvider::Constant(DEFAULT_COL_WIDTH),
            layout: ViewLayout::empty(None),
            registry: RendererRegistry::default(),
            env,
        };
        view.layout.viewport_size = view.viewport_size();
        view
    }

    /// Replace the cell matrix.
    ///
    /// The matrix is copied, then the full layout is rebuilt. On error the
    /// previous model and layout stay in place.
    ///
    /// # Errors
    /// `SizeMismatch` for ragged input; any size-provider or partition
    /// error against the new dimension.
    pub fn set_matrix(&mut self, cells: &[Vec<V>]) -> Result<()> {
        let mut model = MatrixModel::new();
        model.set_cells(cells)?;
        self.log.debug(|| {
            let dimension = model.dimension();
            format!(
                "initialized new model with size: {}x{}",
                dimension.rows, dimension.cols
            )
        });
        let layout = Self::build_layout(
            &self.config,
            &model,
            &self.row_sizes,
            &self.col_sizes,
            self.viewport_size(),
        )?;
        self.model = model;
        self.install(layout);
        Ok(())
    }

    /// Replace the row height provider and rebuild.
    ///
    /// # Errors
    /// Size-provider resolution errors against the current row extent.
    pub fn set_row_sizes(&mut self, provider: SizeProvider) -> Result<()> {
        let layout = Self::build_layout(
            &self.config,
            &self.model,
            &provider,
            &self.col_sizes,
            self.viewport_size(),
        )?;
        self.row_sizes = provider;
        self.install(layout);
        Ok(())
    }

    /// Replace the column width provider and rebuild.
    ///
    /// # Errors
    /// Size-provider resolution errors against the current column extent.
    pub fn set_col_sizes(&mut self, provider: SizeProvider) -> Result<()> {
        let layout = Self::build_layout(
            &self.config,
            &self.model,
            &self.row_sizes,
            &provider,
            self.viewport_size(),
        )?;
        self.col_sizes = provider;
        self.install(layout);
        Ok(())
    }

    /// Apply a partial configuration update.
    ///
    /// Tile size and fixed count changes rebuild the layout; strategy,
    /// prefetch, corner and log level changes apply in place and only
    /// affect future ticks. On error nothing is changed.
    ///
    /// # Errors
    /// `InvalidSize` for a non-positive tile size; partition errors for
    /// overlapping fixed counts.
    pub fn set_config(&mut self, update: MatrixViewConfig) -> Result<()> {
        let mut next = self.config.clone();
        let structural = next.apply(update)?;
        if structural {
            let layout = Self::build_layout(
                &next,
                &self.model,
                &self.row_sizes,
                &self.col_sizes,
                self.viewport_size(),
            )?;
            self.config = next;
            self.install(layout);
        } else {
            self.config = next;
        }
        self.log.set_level(self.config.log_level());
        self.log.info(|| format!("did apply config: {:?}", self.config));
        Ok(())
    }

    /// Re-derive the regions' pixel placement after the container resized.
    ///
    /// The index slices, geometry and tiles are unaffected; only the pixel
    /// boxes depend on the viewport.
    ///
    /// # Errors
    /// Partition errors; none are expected for inputs that previously
    /// partitioned cleanly.
    pub fn handle_resize(&mut self) -> Result<()> {
        let viewport_size = self.viewport_size();
        let set = partition(
            self.model.dimension(),
            self.config.show_fixed(),
            viewport_size,
            &self.layout.geometry,
        )?;
        self.layout.viewport_size = viewport_size;
        for kind in RegionKind::ALL {
            self.layout.regions.get_mut(kind).descriptor = *set.get(kind);
        }
        self.log.debug(|| format!("handle_resize() => {viewport_size:?}"));
        Ok(())
    }

    /// One scroll tick.
    ///
    /// Re-evaluates visibility for all five regions at `scroll`, flips the
    /// tiles whose flag changed (notifying their registered renderers
    /// exactly once each) and returns the fixed bands' canvas translations
    /// for the host to apply. Cost is proportional to the visible tile
    /// count, independent of the matrix size; this path never triggers a
    /// structural rebuild.
    pub fn scroll_to(&mut self, scroll: ScrollState) -> ScrollUpdate {
        self.log
            .trace(|| format!("scroll_to({}, {})", scroll.left, scroll.top));
        let strategy = self.config.strategy();
        let tile_size = self.config.tile_size();
        let canvas_size = Some(self.layout.geometry.canvas_size());
        let viewport_known = self.layout.viewport_size.is_some();
        let grid = self.layout.grid;

        let mut changed = Vec::new();
        let regions = &mut self.layout.regions;
        let registry = &mut self.registry;
        for kind in RegionKind::ALL {
            scroll::sync_region(
                regions.get_mut(kind),
                strategy.as_ref(),
                tile_size,
                canvas_size,
                viewport_known,
                grid,
                scroll,
                registry,
                &mut changed,
            );
        }

        let translations = crate::geom::BoxSides {
            top: scroll::canvas_translation(&regions.top.descriptor, scroll),
            bottom: scroll::canvas_translation(&regions.bottom.descriptor, scroll),
            left: scroll::canvas_translation(&regions.left.descriptor, scroll),
            right: scroll::canvas_translation(&regions.right.descriptor, scroll),
        };
        self.log
            .trace(|| format!("scroll_to(..) flipped {} tiles", changed.len()));
        ScrollUpdate {
            canvas_translations: translations,
            changed,
        }
    }

    /// Size of the viewport: the container minus scrollbars, unless the
    /// legacy quirk says the container never reserves scrollbar space.
    pub fn viewport_size(&self) -> Option<BoxSize> {
        let container = self.env.container_size()?;
        if self.env.legacy_scrollbar_quirk() {
            return Some(container);
        }
        let scrollbar = self.env.scrollbar_width();
        Some(BoxSize {
            width: (container.width - scrollbar).max(0.0),
            height: (container.height - scrollbar).max(0.0),
        })
    }

    /// Full pixel rectangle spanned by the matrix.
    pub fn canvas_size(&self) -> BoxSize {
        self.layout.geometry.canvas_size()
    }

    /// The current geometry snapshot.
    pub fn geometry(&self) -> &MatrixGeometry {
        &self.layout.geometry
    }

    /// The resolved configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current cell model.
    pub fn model(&self) -> &MatrixModel<V> {
        &self.model
    }

    /// View of one region.
    pub fn region(&self, kind: RegionKind) -> &RegionView<V> {
        self.layout.regions.get(kind)
    }

    /// All five region views, in `RegionKind::ALL` order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionView<V>> {
        RegionKind::ALL
            .into_iter()
            .map(|kind| self.layout.regions.get(kind))
    }

    /// The renderer registry, for the host to attach paint handles.
    ///
    /// The registry is cleared on every structural rebuild; re-register
    /// against the new tiles afterwards.
    pub fn renderers_mut(&mut self) -> &mut RendererRegistry {
        &mut self.registry
    }

    /// Pixel boxes of the enabled fixed corner overlays. `None` entries are
    /// disabled corners, degenerate corners, or an unmeasured viewport.
    pub fn corners(&self) -> BoxCorners<Option<CornerView>> {
        let Some(viewport) = self.layout.viewport_size else {
            return BoxCorners::default();
        };
        let flags = self.config.corner_flags();
        let top_height = self.layout.regions.top.descriptor.pixel_size.height;
        let bottom_height = self.layout.regions.bottom.descriptor.pixel_size.height;
        let left_width = self.layout.regions.left.descriptor.pixel_size.width;
        let right_width = self.layout.regions.right.descriptor.pixel_size.width;

        let corner = |enabled: bool, width: f32, height: f32, top: f32, left: f32| {
            (enabled && width > 0.0 && height > 0.0).then_some(CornerView {
                size: BoxSize { width, height },
                offset: Point2D { top, left },
            })
        };

        BoxCorners {
            top_left: corner(flags.top_left, left_width, top_height, 0.0, 0.0),
            top_right: corner(
                flags.top_right,
                right_width,
                top_height,
                0.0,
                (viewport.width - right_width).max(0.0),
            ),
            bottom_right: corner(
                flags.bottom_right,
                right_width,
                bottom_height,
                (viewport.height - bottom_height).max(0.0),
                (viewport.width - right_width).max(0.0),
            ),
            bottom_left: corner(
                flags.bottom_left,
                left_width,
                bottom_height,
                (viewport.height - bottom_height).max(0.0),
                0.0,
            ),
        }
    }

    /// Build a complete layout candidate without touching `self`.
    fn build_layout(
        config: &Config,
        model: &MatrixModel<V>,
        row_sizes: &SizeProvider,
        col_sizes: &SizeProvider,
        viewport_size: Option<BoxSize>,
    ) -> Result<ViewLayout<V>> {
        let dimension = model.dimension();
        let geometry = MatrixGeometry::new(
            AxisModel::from_provider(row_sizes, dimension.rows)?,
            AxisModel::from_provider(col_sizes, dimension.cols)?,
        );
        let set = partition(dimension, config.show_fixed(), viewport_size, &geometry)?;
        let canvas = geometry.canvas_size();
        let tile_size = config.tile_size();

        let regions = Regions {
            top: Self::build_region(model, &geometry, set.top, tile_size, canvas)?,
            bottom: Self::build_region(model, &geometry, set.bottom, tile_size, canvas)?,
            left: Self::build_region(model, &geometry, set.left, tile_size, canvas)?,
            right: Self::build_region(model, &geometry, set.right, tile_size, canvas)?,
            center: Self::build_region(model, &geometry, set.center, tile_size, canvas)?,
        };
        Ok(ViewLayout {
            grid: grid_extent(tile_size, canvas),
            geometry,
            viewport_size,
            regions,
        })
    }

    /// Collect a region's cells and tile them.
    fn build_region(
        model: &MatrixModel<V>,
        geometry: &MatrixGeometry,
        descriptor: RegionDescriptor,
        tile_size: BoxSize,
        canvas: BoxSize,
    ) -> Result<RegionView<V>> {
        let mut cells =
            Vec::with_capacity(descriptor.row_slice.len() * descriptor.col_slice.len());
        for row in descriptor.row_slice.start..descriptor.row_slice.end {
            for col in descriptor.col_slice.start..descriptor.col_slice.end {
                let Some(value) = model.get(row, col) else {
                    continue;
                };
                let rect = geometry.cell_rect(row, col)?;
                cells.push(Cell {
                    index: RowCol { row, col },
                    position: rect.position,
                    size: rect.size,
                    value: value.clone(),
                });
            }
        }
        let tiles = build_tiles(cells, tile_size, Some(canvas))?;
        Ok(RegionView::new(descriptor, tiles))
    }

    /// Swap in a fully built layout and invalidate per-generation state.
    fn install(&mut self, layout: ViewLayout<V>) {
        self.layout = layout;
        // tile objects were discarded, so their paint handles go with them
        self.registry.clear();
    }
}

/// Descriptors of the current regions, e.g. for hosts sizing their DOM
/// before mounting tiles.
impl<V: Clone> MatrixView<V> {
    /// The five current region descriptors as a set.
    pub fn region_set(&self) -> RegionSet {
        RegionSet {
            top: self.layout.regions.top.descriptor,
            bottom: self.layout.regions.bottom.descriptor,
            left: self.layout.regions.left.descriptor,
            right: self.layout.regions.right.descriptor,
            center: self.layout.regions.center.descriptor,
        }
    }

    /// The matrix extent currently laid out.
    pub fn dimension(&self) -> Dimension {
        self.model.dimension()
    }
}
