//! Interactive length-of-stay predictor
//!
//! Loads the trained model once, asks for one admission and prints the
//! predicted stay.

pub mod catalog;
pub mod prompt;
pub mod service;
pub mod session;

pub use prompt::{parse_choice, parse_in_range, PromptError, Prompter, ValidationError};
pub use service::{format_prediction, PredictionService};
pub use session::collect_input;
