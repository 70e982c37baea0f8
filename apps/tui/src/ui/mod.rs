// UI module: layout shell, per-page screens and reusable chart widgets.

pub mod render;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use render::ui;
