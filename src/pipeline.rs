//! Pipeline - an ordered chain of segments, itself usable as a segment.
//!
//! A pipeline drives its children through a validate → process loop: each
//! segment's output becomes the next segment's call arguments, with plain
//! return values normalized to a single positional argument. Execution is
//! strictly sequential and synchronous — one call stack, no deferred work.
//!
//! # Fault tolerance
//!
//! By default a failing segment aborts the run and the error surfaces to the
//! caller. With `continue_on_errors` enabled, failures are logged at warning
//! severity and swallowed; the next segment then receives the same input the
//! failing one was given, since a failed step never updates the data in
//! flight. The flag is read at the moment of each failure, so toggling it
//! between runs takes effect immediately.
//!
//! Pipelines nest: a pipeline is a segment, and each nesting level applies
//! its own fault-tolerance policy to errors bubbling up from below.

use crate::envelope::{Envelope, SegmentOutput};
use crate::error::{ConfigError, SegmentError, SegmentResult};
use crate::logging::{self, Logger};
use crate::segment::{Segment, DEFAULT_NAME};

/// An ordered chain of (reusable) processing steps.
///
/// # Example
///
/// ```
/// use pipekit::prelude::*;
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pipeline = Pipeline::named(
///     "noop",
///     vec![
///         Box::new(PassThrough::named("first")?),
///         Box::new(PassThrough::named("second")?),
///     ],
/// )?;
///
/// let output = pipeline.process(Envelope::single(json!("Hello")))?;
/// assert_eq!(output.into_envelope().arg(0), Some(&json!("Hello")));
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    name: String,
    segments: Vec<Box<dyn Segment>>,
    continue_on_errors: bool,
    log: Logger,
}

impl Pipeline {
    /// Create a pipeline with the default name.
    pub fn new(segments: Vec<Box<dyn Segment>>) -> Result<Self, ConfigError> {
        Self::named(DEFAULT_NAME, segments)
    }

    /// Create a named pipeline.
    pub fn named(
        name: impl Into<String>,
        segments: Vec<Box<dyn Segment>>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let log = logging::resolve(&format!("Pipeline.{}", name))?;
        Ok(Self {
            name,
            segments,
            continue_on_errors: false,
            log,
        })
    }

    /// Set the fault-tolerance policy, builder style.
    pub fn with_continue_on_errors(mut self, continue_on_errors: bool) -> Self {
        self.continue_on_errors = continue_on_errors;
        self
    }

    /// Toggle the fault-tolerance policy between runs.
    pub fn set_continue_on_errors(&mut self, continue_on_errors: bool) {
        self.continue_on_errors = continue_on_errors;
    }

    /// Current fault-tolerance policy.
    pub fn continue_on_errors(&self) -> bool {
        self.continue_on_errors
    }

    /// Append a segment to the end of the chain.
    ///
    /// The chain must not be rebuilt mid-run; between runs it is free game.
    pub fn push(&mut self, segment: Box<dyn Segment>) {
        self.segments.push(segment);
    }

    /// The child segments, in execution order.
    pub fn segments(&self) -> &[Box<dyn Segment>] {
        &self.segments
    }

    /// Number of child segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the pipeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Apply the fault-tolerance policy to a failed step.
    ///
    /// Associated function rather than method so the segment list can stay
    /// mutably borrowed at the call site.
    fn handle_failure(
        log: &Logger,
        continue_on_errors: bool,
        signature: &str,
        input: &Envelope,
        error: SegmentError,
    ) -> SegmentResult<()> {
        if continue_on_errors {
            log.warning(&format!(
                "{} failed, but processing will continue: {}",
                signature, error
            ));
            Ok(())
        } else {
            log.error(&format!(
                "{} could not process {}: {}",
                signature, input, error
            ));
            Err(error)
        }
    }
}

impl Segment for Pipeline {
    fn type_name(&self) -> &'static str {
        "Pipeline"
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// Pass the check on to the first element of the chain.
    fn check(&self, previous: Option<&dyn Segment>, input: &Envelope) -> SegmentResult<()> {
        match self.segments.first() {
            Some(first) => first.check(previous, input),
            None => Ok(()),
        }
    }

    fn process(&mut self, input: Envelope) -> SegmentResult<SegmentOutput> {
        self.log.info("starting up");

        let mut data = SegmentOutput::Envelope(input);

        for index in 0..self.segments.len() {
            // Arbitrary return values become the sole first argument of the
            // next call.
            let args = data.into_envelope();

            self.log.debug(&format!("next input: {}", args));

            let (done, rest) = self.segments.split_at_mut(index);
            let previous = done.last().map(|segment| segment.as_ref());
            let segment = &mut rest[0];
            let signature = segment.signature();

            // Let the segment check the input (and probably crash early).
            let step = match segment.check(previous, &args) {
                Ok(()) => {
                    self.log.info(&format!("{} says input is ok", signature));
                    match segment.process(args.clone()) {
                        Ok(output) => {
                            self.log.info(&format!("{} is done", signature));
                            Some(output)
                        }
                        Err(error) => {
                            Self::handle_failure(
                                &self.log,
                                self.continue_on_errors,
                                &signature,
                                &args,
                                error,
                            )?;
                            None
                        }
                    }
                }
                Err(error) => {
                    Self::handle_failure(
                        &self.log,
                        self.continue_on_errors,
                        &signature,
                        &args,
                        error,
                    )?;
                    None
                }
            };

            // A failed (but tolerated) step does not update the data; the
            // next segment receives the same input the failing one was given.
            data = match step {
                Some(output) => output,
                None => SegmentOutput::Envelope(args),
            };
        }

        self.log.success("output was produced.");
        self.log.debug(&format!("output was {}", data));

        Ok(data)
    }
}
