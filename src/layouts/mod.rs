use crate::deskwm::{Position, Screen, Size};

mod cascade;
pub use cascade::*;
mod centered;
pub use centered::*;

/// Decides where a freshly launched window shows up. The registry still
/// clamps whatever comes back.
pub trait Placement {
    fn id(&self) -> String;
    fn place(&mut self, screen: &Screen, size: Size, open_windows: usize) -> Position;
}

pub fn placement_by_id(id: &str) -> Option<Box<dyn Placement>> {
    match id {
        "cascade" => Some(Box::new(CascadePlacement::init())),
        "center" => Some(Box::new(CenteredPlacement::init())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_placements_resolve() {
        assert_eq!(placement_by_id("cascade").unwrap().id(), "cascade");
        assert_eq!(placement_by_id("center").unwrap().id(), "center");
        assert!(placement_by_id("tiling").is_none());
    }
}
