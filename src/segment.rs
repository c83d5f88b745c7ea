//! Segment - the atomic processing step of a pipeline.
//!
//! Implementing [`Segment`] and defining `process` is all it takes to make a
//! step usable in a [`Pipeline`](crate::pipeline::Pipeline). `check` can
//! optionally be defined to validate inputs before processing.

use crate::envelope::{Envelope, SegmentOutput};
use crate::error::{ConfigError, SegmentResult};
use crate::logging::{self, Logger};

/// Segment name used when none is supplied at construction.
pub const DEFAULT_NAME: &str = "default";

/// A (reusable) processing step.
///
/// Segments are constructed once and reused across any number of pipeline
/// runs. The framework keeps them stateless with respect to itself; any state
/// an implementation holds is its own responsibility.
///
/// A segment's identity string (`"<TypeName>.<name>"`, see [`signature`])
/// stays stable for its lifetime and is used both for log attribution and
/// logger deduplication.
///
/// [`signature`]: Segment::signature
pub trait Segment {
    /// Type part of the identity string, e.g. `"Pipeline"`.
    fn type_name(&self) -> &'static str {
        "Segment"
    }

    /// Instance name.
    fn name(&self) -> &str {
        DEFAULT_NAME
    }

    /// Stable identity string `"<TypeName>.<name>"`.
    fn signature(&self) -> String {
        format!("{}.{}", self.type_name(), self.name())
    }

    /// Called before processing, to allow early crashing.
    ///
    /// If this is not the first step of a chain, the preceding segment is
    /// given, to allow a better error message or warning. An error here
    /// prevents `process` from being invoked for this step; the return value
    /// is otherwise ignored.
    fn check(&self, previous: Option<&dyn Segment>, input: &Envelope) -> SegmentResult<()> {
        let _ = (previous, input);
        Ok(())
    }

    /// Process inputs and deliver an output.
    ///
    /// The default implementation wraps the arguments it received and passes
    /// them on unchanged.
    fn process(&mut self, input: Envelope) -> SegmentResult<SegmentOutput> {
        Ok(SegmentOutput::Envelope(input))
    }
}

/// A segment that forwards its input unchanged.
///
/// The concrete form of the trait's default behavior — handy as a placeholder
/// while sketching out a chain, or for exercising pipeline plumbing in tests.
pub struct PassThrough {
    name: String,
    log: Logger,
}

impl PassThrough {
    /// A pass-through segment with the default name.
    pub fn new() -> Result<Self, ConfigError> {
        Self::named(DEFAULT_NAME)
    }

    /// A pass-through segment with an explicit name.
    pub fn named(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let log = logging::resolve(&format!("PassThrough.{}", name))?;
        Ok(Self { name, log })
    }
}

impl Segment for PassThrough {
    fn type_name(&self) -> &'static str {
        "PassThrough"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, input: Envelope) -> SegmentResult<SegmentOutput> {
        self.log.debug(&format!("passing through: {}", input));
        Ok(SegmentOutput::Envelope(input))
    }
}
