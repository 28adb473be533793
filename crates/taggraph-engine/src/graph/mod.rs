pub mod layout;
pub mod model;
pub mod select;
pub mod state;

pub use layout::{solve, LayoutBounds, LayoutResult};
pub use model::GraphModel;
pub use select::{SearchOutcome, SelectOutcome, Selection, SelectionMode};
pub use state::{GraphSession, TapOutcome};
