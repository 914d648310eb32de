//! Combat module - overlap regions, strike arbitration and tuning.

mod capsule;
mod protocol;
mod tuning;

pub use capsule::{intersect, Capsule};
pub use protocol::*;
pub use tuning::*;
