//! Export eligibility for canonical tenders.
//!
//! Decides once per tender whether it is passed downstream, based on its origin source, its
//! representative price against a works-dependent threshold, and whether an older generation of
//! the same national source duplicates a record already held from the newer one.

#![forbid(unsafe_code)]

mod classifier;
mod decision;
mod dedup;
mod error;
pub mod price;
pub mod similarity;
pub mod works;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use classifier::EligibilityClassifier;
pub use decision::{Classification, Decision, Reason};
pub use dedup::first_buyer_name;
pub use error::EligibilityError;
