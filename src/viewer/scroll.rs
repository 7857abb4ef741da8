//! Scroll synchronization across the fixed regions.
//!
//! On every scroll tick each fixed band's canvas is translated opposite the
//! scroll direction on the axis it does not freeze, so its content appears
//! pinned while staying pixel-aligned with the scrollable body. Visibility
//! is then re-evaluated per region and diffed, flipping only the tiles
//! whose flag actually changed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geom::{BoxSize, Point2D, RowsCols};
use crate::layout::{RegionDescriptor, RegionKind};
use crate::tile::{Tile, TileRenderStrategy, Visibility};
use crate::viewer::registry::{RendererRegistry, TileId};
use crate::viewer::RegionView;

/// Scroll offset of the primary scrollable region.
///
/// Transient: read from the host on every tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Horizontal scroll offset in px.
    pub left: f32,
    /// Vertical scroll offset in px.
    pub top: f32,
}

/// Outcome of one scroll tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollUpdate {
    /// Canvas translation to apply to each fixed band so its content
    /// sticks opposite the scroll direction.
    pub canvas_translations: crate::geom::BoxSides<Point2D>,
    /// Tiles whose visibility flag flipped this tick, in region order.
    pub changed: Vec<TileId>,
}

/// The scroll coordinate a region observes.
///
/// The axis a band does not freeze follows the main scroll; the frozen
/// axis is pinned at the band's own scroll offset so right/bottom bands
/// show their trailing cols/rows. The center is clamped against the
/// maximum scroll so an overshooting host value cannot select tiles past
/// the canvas.
pub(crate) fn effective_scroll(descriptor: &RegionDescriptor, scroll: ScrollState) -> Point2D {
    match descriptor.kind {
        RegionKind::Top => Point2D {
            top: 0.0,
            left: scroll.left,
        },
        RegionKind::Bottom => Point2D {
            top: descriptor.scroll_offset.top,
            left: scroll.left,
        },
        RegionKind::Left => Point2D {
            top: scroll.top,
            left: 0.0,
        },
        RegionKind::Right => Point2D {
            top: scroll.top,
            left: descriptor.scroll_offset.left,
        },
        RegionKind::Center => Point2D {
            top: scroll.top.clamp(0.0, descriptor.scroll_offset.top),
            left: scroll.left.clamp(0.0, descriptor.scroll_offset.left),
        },
    }
}

/// Translation of a region's canvas: the negated effective scroll.
pub(crate) fn canvas_translation(descriptor: &RegionDescriptor, scroll: ScrollState) -> Point2D {
    let effective = effective_scroll(descriptor, scroll);
    Point2D {
        top: -effective.top,
        left: -effective.left,
    }
}

/// Flip one tile if its computed visibility differs from the current flag,
/// notifying its registered renderer. `Visible → Visible` and
/// `Hidden → Hidden` are never observable events.
fn flip<V>(
    tile: &mut Tile<V>,
    show: bool,
    region: RegionKind,
    registry: &mut RendererRegistry,
    changed: &mut Vec<TileId>,
) {
    let target = if show {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    if tile.visibility == target {
        return;
    }
    tile.visibility = target;
    let id = TileId {
        region,
        row_major_index: tile.row_major_index,
    };
    registry.notify(id, show);
    changed.push(id);
}

/// Re-evaluate one region's visibility for `scroll` and apply the diff.
///
/// The first sync after a rebuild settles every tile out of `Unknown`;
/// subsequent ticks only walk the symmetric difference of the previous and
/// next visible sets, keeping the steady-state cost proportional to the
/// visible tile count rather than the region's total tile count.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sync_region<V>(
    view: &mut RegionView<V>,
    strategy: &dyn TileRenderStrategy,
    tile_size: BoxSize,
    canvas_size: Option<BoxSize>,
    viewport_known: bool,
    grid: RowsCols<usize>,
    scroll: ScrollState,
    registry: &mut RendererRegistry,
    changed: &mut Vec<TileId>,
) {
    let scroll_position = effective_scroll(&view.descriptor, scroll);
    let viewport = viewport_known.then_some(view.descriptor.pixel_size);

    // map to row-major flat indices; indices past the grid (prefetch over
    // the edge) are dropped here, they must not alias other tiles
    let next: HashSet<usize> = strategy
        .visible_tiles(scroll_position, tile_size, canvas_size, viewport)
        .into_iter()
        .filter(|index| index.row < grid.rows && index.col < grid.cols)
        .map(|index| index.row * grid.cols + index.col)
        .collect();

    let kind = view.descriptor.kind;
    match view.last_visible.take() {
        None => {
            for tile in &mut view.tiles {
                let show = next.contains(&tile.row_major_index);
                flip(tile, show, kind, registry, changed);
            }
        }
        Some(previous) => {
            for flat in next.difference(&previous) {
                if let Some(&position) = view.tiles_by_index.get(flat) {
                    if let Some(tile) = view.tiles.get_mut(position) {
                        flip(tile, true, kind, registry, changed);
                    }
                }
            }
            for flat in previous.difference(&next) {
                if let Some(&position) = view.tiles_by_index.get(flat) {
                    if let Some(tile) = view.tiles.get_mut(position) {
                        flip(tile, false, kind, registry, changed);
                    }
                }
            }
        }
    }
    view.last_visible = Some(next);
}
