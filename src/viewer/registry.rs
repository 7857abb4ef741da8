//! Renderer registry: stable tile identities mapped to host paint handles.
//!
//! The registry replaces a two-way tile ↔ renderer link: the engine never
//! stores a back-pointer on the tile, so there is no destruction-ordering
//! hazard between tiles and the host's paint surfaces. Handles are keyed by
//! the tile's stable grid identity and the registry is cleared whenever the
//! owning layout is rebuilt, so a handle can never outlive its tile.

use std::collections::HashMap;

use crate::layout::RegionKind;

/// Stable identity of a tile within one layout generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// Region owning the tile.
    pub region: RegionKind,
    /// Row-major index of the tile in the canvas tile grid.
    pub row_major_index: usize,
}

/// Host-side paint handle for a tile.
pub trait TileRenderer {
    /// Called exactly once per visibility flip of the owning tile.
    fn visibility_changed(&mut self, tile: TileId, visible: bool);
}

/// Registry of renderer handles, keyed by tile identity.
#[derive(Default)]
pub struct RendererRegistry {
    handles: HashMap<TileId, Box<dyn TileRenderer>>,
}

impl RendererRegistry {
    /// Attach a paint handle to a tile. A previous handle for the same tile
    /// is dropped.
    pub fn register(&mut self, id: TileId, renderer: Box<dyn TileRenderer>) {
        self.handles.insert(id, renderer);
    }

    /// Detach the paint handle of a tile, if any.
    pub fn unregister(&mut self, id: TileId) -> Option<Box<dyn TileRenderer>> {
        self.handles.remove(&id)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Notify the handle of `id`, if one is registered.
    pub(crate) fn notify(&mut self, id: TileId, visible: bool) {
        if let Some(handle) = self.handles.get_mut(&id) {
            handle.visibility_changed(id, visible);
        }
    }

    /// Drop all handles; called when the owning layout is rebuilt.
    pub(crate) fn clear(&mut self) {
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        events: Rc<RefCell<Vec<(TileId, bool)>>>,
    }

    impl TileRenderer for Recorder {
        fn visibility_changed(&mut self, tile: TileId, visible: bool) {
            self.events.borrow_mut().push((tile, visible));
        }
    }

    #[test]
    fn test_notify_reaches_registered_handle() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = RendererRegistry::default();
        let id = TileId {
            region: RegionKind::Center,
            row_major_index: 3,
        };
        registry.register(
            id,
            Box::new(Recorder {
                events: Rc::clone(&events),
            }),
        );

        registry.notify(id, true);
        registry.notify(
            TileId {
                region: RegionKind::Top,
                row_major_index: 3,
            },
            true,
        );
        assert_eq!(*events.borrow(), vec![(id, true)]);
    }

    #[test]
    fn test_unregister_and_clear() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = RendererRegistry::default();
        let id = TileId {
            region: RegionKind::Left,
            row_major_index: 0,
        };
        registry.register(
            id,
            Box::new(Recorder {
                events: Rc::clone(&events),
            }),
        );
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(id).is_some());
        registry.notify(id, false);
        assert!(events.borrow().is_empty());

        registry.register(
            id,
            Box::new(Recorder {
                events: Rc::clone(&events),
            }),
        );
        registry.clear();
        assert!(registry.is_empty());
    }
}
