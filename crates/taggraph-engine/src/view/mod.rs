pub mod viewport;

pub use viewport::{ScreenGeometry, Viewport, ViewportTransform};
