//! Window management core of a simulated desktop shell: window lifecycle,
//! stacking and focus, geometry clamping, and a line-based event loop the
//! presentation layer talks to.
pub mod config;
pub mod deskwm;
pub mod layouts;
pub mod shell;

pub use crate::deskwm::{
    ContentRef, DeskWm, DeskWmError, GeometryPolicy, Position, Screen, Size, Window, WindowId,
    WindowRegistry, WindowSpec, WindowState,
};
