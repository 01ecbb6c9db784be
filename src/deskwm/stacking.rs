use log::trace;

use super::WindowId;

/// Hands out z-indices and remembers which window has input focus.
///
/// The counter only ever grows, so every allocation lands above every window
/// already on screen and no two windows can share a z-index. The active
/// window is tracked separately: minimizing drops focus without touching the
/// stacking order.
#[derive(Debug)]
pub struct Stacking {
    next_z_index: u64,
    active: Option<WindowId>,
}

impl Stacking {
    pub fn new(initial_z_index: u64) -> Self {
        Self {
            next_z_index: initial_z_index,
            active: None,
        }
    }

    pub fn allocate(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index += 1;
        trace!("allocated z-index {}", z_index);
        z_index
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn is_active(&self, id: WindowId) -> bool {
        self.active == Some(id)
    }

    pub fn activate(&mut self, id: WindowId) {
        self.active = Some(id);
    }

    /// Drops focus if `id` holds it. Returns whether it did.
    pub fn deactivate(&mut self, id: WindowId) -> bool {
        if self.is_active(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
