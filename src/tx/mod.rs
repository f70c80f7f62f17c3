//! Claim transaction assembly, submission, and confirmation.

mod calldata;
mod submitter;

pub use calldata::ClaimRequest;
pub use submitter::{confirm, submit};
