//! End-to-end pipeline execution tests.
//!
//! These tests drive full pipelines through custom segments: the demo chain
//! (plain value → explicit keyword envelope → plain value), the strict and
//! tolerant fault-tolerance policies, and nested pipelines with independent
//! policies per level.

use std::sync::{Arc, Mutex};

use pipekit::prelude::*;
use serde_json::{json, Value};

/// Shared record of the envelopes a segment has observed.
type Observations = Arc<Mutex<Vec<Envelope>>>;

/// Works the stuff and reports a constant result.
struct Worker {
    name: String,
    log: Logger,
}

impl Worker {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            log: pipekit::logging::resolve(&format!("Worker.{}", name)).unwrap(),
        }
    }
}

impl Segment for Worker {
    fn type_name(&self) -> &'static str {
        "Worker"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, input: Envelope) -> Result<SegmentOutput, SegmentError> {
        let stuff = input.arg(0).cloned().unwrap_or(Value::Null);
        self.log.warning(&format!("I work the stuff: {}", stuff));
        Ok(SegmentOutput::Value(json!("Stuff was worked...")))
    }
}

/// Records its input, then hands a keyword argument to the next segment.
struct Preprocessor {
    name: String,
    observed: Observations,
}

impl Segment for Preprocessor {
    fn type_name(&self) -> &'static str {
        "Preprocessor"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, input: Envelope) -> Result<SegmentOutput, SegmentError> {
        self.observed.lock().unwrap().push(input);
        Ok(SegmentOutput::Envelope(Envelope::empty().with_kwarg(
            "stuff",
            json!(format!("Preprocessed by {}.", self.signature())),
        )))
    }
}

/// Turns the `stuff` keyword into a plain final string.
struct Finisher;

impl Segment for Finisher {
    fn type_name(&self) -> &'static str {
        "Finisher"
    }

    fn check(&self, previous: Option<&dyn Segment>, input: &Envelope) -> Result<(), SegmentError> {
        if input.kwarg("stuff").is_none() {
            let sender = previous.map(|p| p.signature()).unwrap_or_default();
            return Err(SegmentError::InvalidInput(format!(
                "{} did not supply 'stuff'",
                sender
            )));
        }
        Ok(())
    }

    fn process(&mut self, input: Envelope) -> Result<SegmentOutput, SegmentError> {
        let stuff = input
            .kwarg("stuff")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(SegmentOutput::Value(json!(format!("Finished: {}", stuff))))
    }
}

/// Passes its input through unchanged, recording what it saw.
struct Recorder {
    observed: Observations,
}

impl Segment for Recorder {
    fn type_name(&self) -> &'static str {
        "Recorder"
    }

    fn process(&mut self, input: Envelope) -> Result<SegmentOutput, SegmentError> {
        self.observed.lock().unwrap().push(input.clone());
        Ok(SegmentOutput::Envelope(input))
    }
}

/// Rejects every input during `check`.
struct RejectAll;

impl Segment for RejectAll {
    fn type_name(&self) -> &'static str {
        "RejectAll"
    }

    fn check(&self, _previous: Option<&dyn Segment>, _input: &Envelope) -> Result<(), SegmentError> {
        Err(SegmentError::InvalidInput("rejected".to_string()))
    }
}

/// Accepts any input, then fails while processing it.
struct Exploding;

impl Segment for Exploding {
    fn type_name(&self) -> &'static str {
        "Exploding"
    }

    fn process(&mut self, _input: Envelope) -> Result<SegmentOutput, SegmentError> {
        Err(SegmentError::Processing("boom".to_string()))
    }
}

#[test]
fn demo_chain_produces_the_final_segments_string() {
    let observed: Observations = Arc::new(Mutex::new(Vec::new()));

    let mut pipeline = Pipeline::named(
        "demopipe",
        vec![
            Box::new(Worker::new("one")),
            Box::new(Preprocessor {
                name: "two".to_string(),
                observed: Arc::clone(&observed),
            }),
            Box::new(Finisher),
        ],
    )
    .unwrap();

    let output = pipeline
        .process(Envelope::single(json!("Initial Stuff.")))
        .unwrap();

    // The final result is exactly what the last segment produced.
    assert_eq!(
        output.as_value(),
        Some(&json!("Finished: Preprocessed by Preprocessor.two."))
    );

    // Segment "one" returned a plain value, so segment "two" received it as
    // the sole positional argument with no keywords.
    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0].args, vec![json!("Stuff was worked...")]);
    assert!(observed[0].kwargs.is_empty());
}

#[test]
fn strict_mode_aborts_and_skips_the_rest_of_the_chain() {
    let observed: Observations = Arc::new(Mutex::new(Vec::new()));

    let mut pipeline = Pipeline::named(
        "strict",
        vec![
            Box::new(RejectAll),
            Box::new(Recorder {
                observed: Arc::clone(&observed),
            }),
        ],
    )
    .unwrap();

    let result = pipeline.process(Envelope::single(json!("payload")));

    assert!(matches!(result, Err(SegmentError::InvalidInput(_))));
    assert!(observed.lock().unwrap().is_empty());
}

#[test]
fn tolerant_mode_continues_with_the_failed_segments_input() {
    let observed: Observations = Arc::new(Mutex::new(Vec::new()));

    let mut pipeline = Pipeline::named(
        "tolerant",
        vec![
            Box::new(RejectAll),
            Box::new(Recorder {
                observed: Arc::clone(&observed),
            }),
        ],
    )
    .unwrap()
    .with_continue_on_errors(true);

    let output = pipeline.process(Envelope::single(json!("payload"))).unwrap();

    // The recorder ran, and it received the same input the rejecting segment
    // was given — not that segment's would-be output.
    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0], Envelope::single(json!("payload")));
    assert_eq!(
        output,
        SegmentOutput::Envelope(Envelope::single(json!("payload")))
    );
}

#[test]
fn tolerant_mode_survives_processing_failures_too() {
    let observed: Observations = Arc::new(Mutex::new(Vec::new()));

    let mut pipeline = Pipeline::named(
        "tolerant-process",
        vec![
            Box::new(Exploding),
            Box::new(Recorder {
                observed: Arc::clone(&observed),
            }),
        ],
    )
    .unwrap()
    .with_continue_on_errors(true);

    pipeline.process(Envelope::single(json!(42))).unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0], Envelope::single(json!(42)));
}

#[test]
fn strict_mode_surfaces_the_original_processing_error() {
    let mut pipeline =
        Pipeline::named("strict-process", vec![Box::new(Exploding)]).unwrap();

    let result = pipeline.process(Envelope::empty());

    match result {
        Err(SegmentError::Processing(message)) => assert_eq!(message, "boom"),
        other => panic!("expected a processing error, got {:?}", other),
    }
}

#[test]
fn nested_pipelines_apply_their_own_policies() {
    let observed: Observations = Arc::new(Mutex::new(Vec::new()));

    // The inner pipeline is strict, so its failure bubbles up as a single
    // segment error; the tolerant outer pipeline swallows it and moves on.
    let inner = Pipeline::named("inner", vec![Box::new(Exploding)]).unwrap();

    let mut outer = Pipeline::named(
        "outer",
        vec![
            Box::new(inner),
            Box::new(Recorder {
                observed: Arc::clone(&observed),
            }),
        ],
    )
    .unwrap()
    .with_continue_on_errors(true);

    let output = outer.process(Envelope::single(json!("through"))).unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0], Envelope::single(json!("through")));
    assert_eq!(
        output,
        SegmentOutput::Envelope(Envelope::single(json!("through")))
    );
}

#[test]
fn nested_strict_pipelines_propagate_the_original_error() {
    let inner = Pipeline::named("inner-strict", vec![Box::new(Exploding)]).unwrap();
    let mut outer = Pipeline::named("outer-strict", vec![Box::new(inner)]).unwrap();

    let result = outer.process(Envelope::empty());
    assert!(matches!(result, Err(SegmentError::Processing(_))));
}

#[test]
fn toggling_the_policy_between_runs_takes_effect() {
    let mut pipeline = Pipeline::named("toggled", vec![Box::new(Exploding)]).unwrap();

    assert!(pipeline.process(Envelope::empty()).is_err());

    pipeline.set_continue_on_errors(true);
    assert!(pipeline.process(Envelope::empty()).is_ok());

    pipeline.set_continue_on_errors(false);
    assert!(pipeline.process(Envelope::empty()).is_err());
}

#[test]
fn check_failure_with_previous_context() {
    // Worker returns a plain value, so Finisher's check sees no "stuff"
    // keyword and rejects, naming the sender.
    let mut pipeline = Pipeline::named(
        "mismatched",
        vec![Box::new(Worker::new("head")), Box::new(Finisher)],
    )
    .unwrap();

    let result = pipeline.process(Envelope::single(json!("Initial Stuff.")));

    match result {
        Err(SegmentError::InvalidInput(message)) => {
            assert!(message.contains("Worker.head"));
            assert!(message.contains("did not supply 'stuff'"));
        }
        other => panic!("expected an input error, got {:?}", other),
    }
}
