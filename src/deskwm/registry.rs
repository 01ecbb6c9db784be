use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, trace};

use super::apps::AppDefinition;
use super::geometry::GeometryPolicy;
use super::stacking::Stacking;
use super::window::{Window, WindowSpec};
use super::{Position, Screen, Size, WindowId};
use crate::layouts::Placement;

/// Owner of every open window.
///
/// All mutations on an unknown id are silent no-ops: the callers are UI
/// event handlers, and a double click on a close button is not an error.
/// Geometry is never rejected, only clamped.
#[derive(Debug)]
pub struct WindowRegistry {
    // keyed by id, and ids grow, so iteration is creation order
    windows: BTreeMap<WindowId, Window>,
    next_id: WindowId,
    stacking: Stacking,
    policy: GeometryPolicy,
    screen: Screen,
}

impl WindowRegistry {
    pub fn new(screen: Screen, policy: GeometryPolicy, initial_z_index: u64) -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            stacking: Stacking::new(initial_z_index),
            policy,
            screen,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn create_window(&mut self, spec: WindowSpec) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        let z_index = self.stacking.allocate();

        let mut window = Window::new(id, z_index, spec);
        let (position, size) =
            self.policy
                .clamp_geometry(window.position, window.size, &self.screen);
        window.position = position;
        window.size = size;

        info!(
            "creating window {} ({}) at {:?} size {:?}",
            id, window.content, position, size
        );
        self.windows.insert(id, window);
        self.stacking.activate(id);
        self.check_invariants();
        id
    }

    /// Opens a window for an application definition, placed by `placement`.
    pub fn launch_app(&mut self, app: &AppDefinition, placement: &mut dyn Placement) -> WindowId {
        let size = self.policy.clamp_size(app.default_size());
        let position = placement.place(&self.screen, size, self.windows.len());
        debug!(
            "launching {} with {} placement at {:?}",
            app.id,
            placement.id(),
            position
        );
        let mut spec = WindowSpec::new(app.title.clone(), app.content.clone(), position, size);
        spec.resizable = app.resizable;
        spec.closable = app.closable;
        self.create_window(spec)
    }

    pub fn close_window(&mut self, id: WindowId) {
        match self.windows.get(&id) {
            None => {
                debug!("close: window {} not found", id);
                return;
            }
            Some(window) if !window.is_closable => {
                debug!("close: window {} is not closable", id);
                return;
            }
            Some(_) => {}
        }
        info!("closing window {}", id);
        self.windows.remove(&id);
        if self.stacking.deactivate(id) {
            if let Some(next) = self.topmost_visible() {
                debug!("focus passes from {} to {}", id, next);
                self.stacking.activate(next);
            }
        }
        self.check_invariants();
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("minimize: window {} not found", id);
            return;
        };
        info!("minimizing window {}", id);
        window.is_minimized = true;
        // focus is dropped, not handed to another window
        self.stacking.deactivate(id);
        self.check_invariants();
    }

    /// A minimized window comes back in the state it was minimized from, a
    /// maximized one included. A visible maximized window gets its
    /// pre-maximize geometry back. Either way it ends up raised and active.
    pub fn restore_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("restore: window {} not found", id);
            return;
        };
        if window.is_minimized {
            info!("restoring minimized window {}", id);
            window.is_minimized = false;
        } else if window.is_maximized {
            info!("restoring maximized window {}", id);
            unmaximize(window);
        }
        window.z_index = self.stacking.allocate();
        self.stacking.activate(id);
        self.check_invariants();
    }

    /// Toggle. Leaves minimized state and focus alone.
    pub fn maximize_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("maximize: window {} not found", id);
            return;
        };
        if window.is_maximized {
            info!("unmaximizing window {}", id);
            unmaximize(window);
        } else {
            info!("maximizing window {}", id);
            let (position, size) = self.screen.available_area();
            window.saved_position = Some(window.position);
            window.saved_size = Some(window.size);
            window.position = position;
            window.size = size;
            window.is_maximized = true;
        }
        self.check_invariants();
    }

    pub fn focus_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("focus: window {} not found", id);
            return;
        };
        // the active window is never a hidden one
        window.is_minimized = false;
        window.z_index = self.stacking.allocate();
        trace!("focusing window {} at z-index {}", id, window.z_index);
        self.stacking.activate(id);
        self.check_invariants();
    }

    /// One drag sample. Ignored while maximized.
    pub fn update_window_position(&mut self, id: WindowId, position: Position) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("move: window {} not found", id);
            return;
        };
        if window.is_maximized {
            debug!("move: window {} is maximized", id);
            return;
        }
        window.position = self
            .policy
            .clamp_position(position, window.size, &self.screen);
        trace!("window {} moved to {:?}", id, window.position);
        self.check_invariants();
    }

    /// One resize sample. Ignored for fixed-size and maximized windows.
    pub fn update_window_size(&mut self, id: WindowId, size: Size) {
        let Some(window) = self.windows.get_mut(&id) else {
            debug!("resize: window {} not found", id);
            return;
        };
        if !window.is_resizable || window.is_maximized {
            debug!("resize: window {} cannot be resized right now", id);
            return;
        }
        window.size = self.policy.clamp_size(size);
        // the horizontal range depends on the width
        window.position = self
            .policy
            .clamp_position(window.position, window.size, &self.screen);
        trace!("window {} resized to {:?}", id, window.size);
        self.check_invariants();
    }

    pub fn set_window_title(&mut self, id: WindowId, title: impl Into<String>) {
        match self.windows.get_mut(&id) {
            Some(window) => window.title = title.into(),
            None => debug!("title: window {} not found", id),
        }
    }

    /// Taskbar button: minimizes the active window, brings back a minimized
    /// one, focuses anything else.
    pub fn toggle_taskbar_entry(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(&id) else {
            debug!("taskbar: window {} not found", id);
            return;
        };
        if self.stacking.is_active(id) {
            self.minimize_window(id);
        } else if window.is_minimized {
            self.restore_window(id);
        } else {
            self.focus_window(id);
        }
    }

    /// The viewport changed: maximized windows follow it, the others are
    /// pulled back within reach.
    pub fn resize_screen(&mut self, width: i32, height: i32) {
        info!("screen resized to {}x{}", width, height);
        self.screen.width = width;
        self.screen.height = height;
        let (area_position, area_size) = self.screen.available_area();
        for window in self.windows.values_mut() {
            if window.is_maximized {
                window.position = area_position;
                window.size = area_size;
            } else {
                window.position =
                    self.policy
                        .clamp_position(window.position, window.size, &self.screen);
            }
        }
        self.check_invariants();
    }

    pub fn get_window(&self, id: WindowId) -> Option<Window> {
        self.windows.get(&id).cloned()
    }

    pub fn get_active_window(&self) -> Option<Window> {
        self.stacking
            .active()
            .and_then(|id| self.windows.get(&id))
            .cloned()
    }

    /// Creation order.
    pub fn list_all(&self) -> Vec<Window> {
        self.windows.values().cloned().collect()
    }

    pub fn list_visible(&self) -> Vec<Window> {
        self.windows
            .values()
            .filter(|w| w.is_visible())
            .cloned()
            .collect()
    }

    /// Visible windows, bottom to top.
    pub fn stacking_order(&self) -> Vec<Window> {
        let mut windows = self.list_visible();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    fn topmost_visible(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let mut z_indices = BTreeSet::new();
        for window in self.windows.values() {
            debug_assert!(
                z_indices.insert(window.z_index),
                "z-index {} allocated twice",
                window.z_index
            );
            if !window.is_maximized {
                debug_assert!(window.size.width >= self.policy.min_width);
                debug_assert!(window.size.height >= self.policy.min_height);
            }
        }
        if let Some(active) = self.stacking.active() {
            debug_assert!(
                self.windows.get(&active).is_some_and(|w| w.is_visible()),
                "active window {} is gone or hidden",
                active
            );
        }
    }
}

fn unmaximize(window: &mut Window) {
    if let Some(position) = window.saved_position.take() {
        window.position = position;
    }
    if let Some(size) = window.saved_size.take() {
        window.size = size;
    }
    window.is_maximized = false;
}
