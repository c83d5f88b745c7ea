//! Prelude module for convenient imports.
//!
//! Re-exports the types and traits needed to define segments and run
//! pipelines, so users can get started with a single import.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipekit::prelude::*;
//!
//! let mut pipeline = Pipeline::named("demo", segments)?;
//! let output = pipeline.process(Envelope::single(json!("Initial Stuff.")))?;
//! ```

pub use crate::envelope::{Envelope, SegmentOutput};
pub use crate::error::{ConfigError, SegmentError, SegmentResult};
pub use crate::logging::{Logger, Severity};
pub use crate::pipeline::Pipeline;
pub use crate::segment::{PassThrough, Segment};
