pub mod field;
pub mod progress;
pub mod step_frame;

pub use field::{ChoiceField, TextAreaField, TextField};
pub use progress::Progress;
pub use step_frame::StepFrame;
