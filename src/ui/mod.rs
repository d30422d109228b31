pub mod components;
mod styles;

pub use styles::{barrier_badge, setup_styles};
