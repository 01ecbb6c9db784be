use serde::Serialize;

mod apps;
mod deskwm;
mod geometry;
mod registry;
mod screen;
mod stacking;
mod window;

pub use apps::{builtin_apps, find_app, AppDefinition};
pub use deskwm::{DeskWm, DeskWmError};
pub use geometry::GeometryPolicy;
pub use registry::WindowRegistry;
pub use screen::Screen;
pub use window::{ContentRef, Window, WindowSpec, WindowState};

pub type WindowId = u64;

/// Top-left corner, in screen pixels. Can go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}
