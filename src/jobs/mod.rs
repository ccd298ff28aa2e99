//! Job construction: merging per-unit data with book- and voice-level
//! metadata into immutable work descriptors.

mod builder;
mod types;

pub use builder::{BuildError, JobBuilder};
pub use types::{JobDescriptor, JobFailure, JobResult, JobSuccess};
