//! Pipekit - a micro framework for composing data-processing steps into
//! logged pipelines.
//!
//! Wrap your processing functions as [`Segment`]s and compose them into
//! [`Pipeline`]s. In return you get a conveniently set up logging facility
//! and some structure in your data flow. It also adds a layer of reusability
//! to your code, though that still depends a great deal on how you design
//! the inputs and outputs of your steps.
//!
//! The framework tries to stay minimal, also in terms of what you need to
//! know about it:
//!
//! - [`Segment`] — implement this trait and define `process`; optionally
//!   define `check` to validate inputs before processing.
//! - [`Pipeline`] — an ordered chain of segments. It is a segment itself,
//!   so pipelines nest.
//! - [`Envelope`] / [`SegmentOutput`] — how results travel to the next
//!   step: an explicit envelope unpacks into multiple arguments, a plain
//!   value arrives as the sole positional argument.
//!
//! ## Quick Start
//!
//! ```
//! use pipekit::prelude::*;
//! use serde_json::{json, Value};
//!
//! struct Shout;
//!
//! impl Segment for Shout {
//!     fn type_name(&self) -> &'static str {
//!         "Shout"
//!     }
//!
//!     fn process(&mut self, input: Envelope) -> Result<SegmentOutput, SegmentError> {
//!         let text = input.arg(0).and_then(Value::as_str).unwrap_or_default();
//!         Ok(SegmentOutput::Value(json!(text.to_uppercase())))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = Pipeline::named("docs", vec![Box::new(Shout)])?;
//! let output = pipeline.process(Envelope::single(json!("hello")))?;
//! assert_eq!(output.as_value(), Some(&json!("HELLO")));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Every segment and pipeline logs under its identity string
//! (`"<TypeName>.<name>"`). Configuration comes from environment variables —
//! `LOGLEVEL`, `STDOUT_LOGLEVEL`, and `<NAME>_LOGFILE` for per-tier file
//! sinks — see the [`logging`] module. A custom `SUCCESS` severity between
//! `INFO` and `WARNING` marks successful pipeline completion.
//!
//! ## Module Organization
//!
//! - [`segment`] - The [`Segment`] trait and the [`PassThrough`] step
//! - [`pipeline`] - [`Pipeline`] execution and fault tolerance
//! - [`envelope`] - [`Envelope`] and [`SegmentOutput`] data flow types
//! - [`logging`] - Severity tiers, configuration resolution, sinks
//! - [`error`] - [`SegmentError`] and [`ConfigError`]
//! - [`prelude`] - One-stop imports

pub mod envelope;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prelude;
pub mod segment;

pub use envelope::{Envelope, SegmentOutput};
pub use error::{ConfigError, SegmentError, SegmentResult};
pub use pipeline::Pipeline;
pub use segment::{PassThrough, Segment};
