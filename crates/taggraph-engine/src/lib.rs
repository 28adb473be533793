pub mod graph;
pub mod source;
pub mod util;
pub mod view;

pub use graph::{GraphModel, GraphSession, LayoutBounds, Selection, SelectionMode, TapOutcome};
pub use view::{ScreenGeometry, Viewport, ViewportTransform};
