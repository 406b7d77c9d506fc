//! Entity recognition for plain text.
//!
//! This module defines the [`Entity`] span type, the [`EntityRecognizer`] trait
//! every backend implements, and the rule-based recognizer that needs no model
//! files. The transformer backend lives in [`crate::ml`].

mod gazetteer;
mod rules;
mod traits;
mod types;

pub use rules::*;
pub use traits::*;
pub use types::*;
