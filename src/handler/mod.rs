// handler/mod.rs
pub mod errors;
pub mod memory;
pub mod render;
pub mod submission;
pub mod traits;

// Re-export main interfaces for easy access
pub use errors::{SubmitError, TransportError};
pub use memory::{SyntheticSubmit, TextCell};
pub use render::render_result;
pub use submission::{CALCULATE_OPTION_PRICE_PATH, FormSubmissionHandler, Submission};
pub use traits::{FormSource, PriceTransport, ResultDisplay, SubmitEvent, TransportResponse};
