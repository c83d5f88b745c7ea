//! Envelope - the carrier of call arguments between pipeline segments.
//!
//! The envelope defines how data flows from one segment to the next: an
//! ordered sequence of positional arguments plus a mapping of named
//! arguments. It is a transparent container — constructing one never
//! inspects or validates its contents.
//!
//! A segment's `process` does not return an envelope directly but a
//! [`SegmentOutput`]: either an explicit envelope (multiple arguments for
//! the next call) or an arbitrary single value. The pipeline normalizes a
//! plain value into an envelope carrying it as the sole positional argument,
//! so segments can return ordinary values without wrapping them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Positional and named arguments for the next segment in a chain.
///
/// # Example
///
/// ```
/// use pipekit::envelope::Envelope;
/// use serde_json::json;
///
/// let envelope = Envelope::empty()
///     .with_arg(json!("Hello"))
///     .with_kwarg("world", json!("World!"));
///
/// assert_eq!(envelope.arg(0), Some(&json!("Hello")));
/// assert_eq!(envelope.kwarg("world"), Some(&json!("World!")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Positional arguments, in call order.
    pub args: Vec<Value>,
    /// Named arguments.
    pub kwargs: Map<String, Value>,
}

impl Envelope {
    /// Create an envelope with no arguments at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an envelope from parts.
    pub fn new(args: Vec<Value>, kwargs: Map<String, Value>) -> Self {
        Self { args, kwargs }
    }

    /// Create an envelope carrying `value` as the sole positional argument.
    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            args: vec![value.into()],
            kwargs: Map::new(),
        }
    }

    /// Append a positional argument.
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Insert a named argument.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Named argument under `key`, if present.
    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.kwargs.get(key)
    }

    /// True when the envelope carries no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = serde_json::to_string(&self.args).map_err(|_| fmt::Error)?;
        let kwargs = serde_json::to_string(&self.kwargs).map_err(|_| fmt::Error)?;
        write!(f, "(args={}, kwargs={})", args, kwargs)
    }
}

/// What a segment's `process` may deliver.
///
/// The two variants replace any runtime "is this value a wrapper?" check
/// with an explicit tag the pipeline matches on. Returning an envelope means
/// "unpack these as arguments for the next call"; returning a value means
/// "hand this on as-is".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentOutput {
    /// Arguments to be unpacked into the next segment's call.
    Envelope(Envelope),
    /// A plain value, delivered as the sole positional argument.
    Value(Value),
}

impl SegmentOutput {
    /// The "no result" output; downstream this becomes a single null argument.
    pub fn none() -> Self {
        SegmentOutput::Value(Value::Null)
    }

    /// Normalize into call arguments for the next segment.
    ///
    /// A plain value becomes an envelope with that value as the sole
    /// positional argument and no named arguments.
    pub fn into_envelope(self) -> Envelope {
        match self {
            SegmentOutput::Envelope(envelope) => envelope,
            SegmentOutput::Value(value) => Envelope::single(value),
        }
    }

    /// The carried value, if this is the `Value` variant.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            SegmentOutput::Value(value) => Some(value),
            SegmentOutput::Envelope(_) => None,
        }
    }

    /// The carried envelope, if this is the `Envelope` variant.
    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            SegmentOutput::Envelope(envelope) => Some(envelope),
            SegmentOutput::Value(_) => None,
        }
    }
}

impl From<Envelope> for SegmentOutput {
    fn from(envelope: Envelope) -> Self {
        SegmentOutput::Envelope(envelope)
    }
}

impl From<Value> for SegmentOutput {
    fn from(value: Value) -> Self {
        SegmentOutput::Value(value)
    }
}

impl fmt::Display for SegmentOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentOutput::Envelope(envelope) => write!(f, "{}", envelope),
            SegmentOutput::Value(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_envelope() {
        let envelope = Envelope::empty();
        assert!(envelope.is_empty());
        assert_eq!(envelope.arg(0), None);
        assert_eq!(envelope.kwarg("anything"), None);
    }

    #[test]
    fn test_builder_order() {
        let envelope = Envelope::empty()
            .with_arg(json!(1))
            .with_arg(json!(2))
            .with_kwarg("k", json!("w"));

        assert_eq!(envelope.args, vec![json!(1), json!(2)]);
        assert_eq!(envelope.kwarg("k"), Some(&json!("w")));
    }

    #[test]
    fn test_plain_value_becomes_sole_positional_argument() {
        let output = SegmentOutput::Value(json!("Stuff was worked..."));
        let envelope = output.into_envelope();

        assert_eq!(envelope.args, vec![json!("Stuff was worked...")]);
        assert!(envelope.kwargs.is_empty());
    }

    #[test]
    fn test_explicit_envelope_passes_through_unchanged() {
        let wrapped = Envelope::empty().with_kwarg("stuff", json!("Preprocessed."));
        let output = SegmentOutput::Envelope(wrapped.clone());

        assert_eq!(output.into_envelope(), wrapped);
    }

    #[test]
    fn test_none_output_is_null_argument() {
        let envelope = SegmentOutput::none().into_envelope();
        assert_eq!(envelope.args, vec![Value::Null]);
        assert!(envelope.kwargs.is_empty());
    }

    #[test]
    fn test_display_format() {
        let envelope = Envelope::single(json!("Hello")).with_kwarg("world", json!("World!"));
        assert_eq!(
            envelope.to_string(),
            r#"(args=["Hello"], kwargs={"world":"World!"})"#
        );
    }

    #[test]
    fn test_output_accessors() {
        let value = SegmentOutput::Value(json!(42));
        assert_eq!(value.as_value(), Some(&json!(42)));
        assert!(value.as_envelope().is_none());

        let envelope = SegmentOutput::Envelope(Envelope::single(json!(42)));
        assert!(envelope.as_value().is_none());
        assert!(envelope.as_envelope().is_some());
    }
}
