//! Form classification and field extraction.
//!
//! Both stages are pure functions over already-recognized text:
//! [`classify`] picks one of the three statutory templates and [`extract`]
//! fills that template's fields from ordered pattern tables.

mod classifier;
mod extractor;
pub mod patterns;
pub mod templates;

pub use classifier::classify;
pub use extractor::{detect_dates, extract, split_lines};
