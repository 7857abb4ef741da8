//! Common test utilities and helpers.
//!
//! Provides a scriptable host environment, a recording renderer handle and
//! matrix/view builders shared by the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell as StdCell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use matview::{
    BoxSize, HostEnvironment, MatrixView, MatrixViewConfig, NullLog, TileId, TileRenderer,
};

// ============================================================================
// Host environment
// ============================================================================

/// Scriptable host environment. Cloning shares the underlying state, so a
/// test can change the container size after handing the environment to the
/// engine and then call `handle_resize`.
#[derive(Clone)]
pub struct SharedEnv {
    container: Rc<StdCell<Option<BoxSize>>>,
    scrollbar: f32,
    legacy: bool,
}

impl SharedEnv {
    pub fn new(container: Option<BoxSize>) -> Self {
        Self {
            container: Rc::new(StdCell::new(container)),
            scrollbar: 0.0,
            legacy: false,
        }
    }

    pub fn with_scrollbar(mut self, width: f32) -> Self {
        self.scrollbar = width;
        self
    }

    pub fn with_legacy_quirk(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn set_container(&self, size: Option<BoxSize>) {
        self.container.set(size);
    }
}

impl HostEnvironment for SharedEnv {
    fn container_size(&self) -> Option<BoxSize> {
        self.container.get()
    }

    fn scrollbar_width(&self) -> f32 {
        self.scrollbar
    }

    fn legacy_scrollbar_quirk(&self) -> bool {
        self.legacy
    }
}

// ============================================================================
// Recording renderer
// ============================================================================

/// Renderer handle that records every notification it receives.
pub struct RecordingRenderer {
    events: Rc<RefCell<Vec<(TileId, bool)>>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Rc<RefCell<Vec<(TileId, bool)>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: Rc::clone(&events),
            },
            events,
        )
    }
}

impl TileRenderer for RecordingRenderer {
    fn visibility_changed(&mut self, tile: TileId, visible: bool) {
        self.events.borrow_mut().push((tile, visible));
    }
}

// ============================================================================
// View builders
// ============================================================================

/// A `rows`x`cols` matrix whose value at (r, c) is `r * cols + c`.
pub fn numbered_matrix(rows: usize, cols: usize) -> Vec<Vec<usize>> {
    (0..rows)
        .map(|row| (0..cols).map(|col| row * cols + col).collect())
        .collect()
}

/// Engine over a numbered matrix with the given container size and config.
pub fn make_view(
    rows: usize,
    cols: usize,
    container: Option<BoxSize>,
    config: MatrixViewConfig,
) -> MatrixView<usize> {
    let env = SharedEnv::new(container);
    let mut view = MatrixView::new(Box::new(env), Arc::new(NullLog));
    view.set_config(config).expect("config must apply");
    view.set_matrix(&numbered_matrix(rows, cols))
        .expect("matrix must build");
    view
}
