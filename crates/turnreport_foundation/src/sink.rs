//! Structured output sinks.
//!
//! Parsers never build a whole document tree. They write start/end
//! object, start/end array, property and scalar events to a
//! [`ReportSink`] as they go. Two sinks ship with the crate:
//!
//! - [`JsonSink`] streams JSON text through a `serde_json` formatter.
//! - [`ValueSink`] assembles a `serde_json::Value` in memory, which can
//!   then be turned into a typed [`Report`](crate::model::Report).

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

// =============================================================================
// Sink trait
// =============================================================================

/// A scalar value written to a sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// String.
    Str(&'a str),
}

impl From<bool> for Scalar<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar<'_> {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Scalar<'_> {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Scalar<'_> {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Scalar<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(v.as_str())
    }
}

/// Receiver of structured output events.
///
/// Events must nest properly: every `begin_*` is closed by the matching
/// `end_*`, and inside an object every value is preceded by `property`.
pub trait ReportSink {
    /// Opens an object.
    ///
    /// # Errors
    /// Returns a sink error if the event is out of place or the write fails.
    fn begin_object(&mut self) -> Result<()>;

    /// Closes the innermost object.
    ///
    /// # Errors
    /// Returns a sink error if no object is open.
    fn end_object(&mut self) -> Result<()>;

    /// Opens an array.
    ///
    /// # Errors
    /// Returns a sink error if the event is out of place or the write fails.
    fn begin_array(&mut self) -> Result<()>;

    /// Closes the innermost array.
    ///
    /// # Errors
    /// Returns a sink error if no array is open.
    fn end_array(&mut self) -> Result<()>;

    /// Names the next value of the innermost object.
    ///
    /// # Errors
    /// Returns a sink error outside an object.
    fn property(&mut self, name: &str) -> Result<()>;

    /// Writes a scalar value.
    ///
    /// # Errors
    /// Returns a sink error if the event is out of place or the write fails.
    fn scalar(&mut self, value: Scalar<'_>) -> Result<()>;

    /// Writes `name: value` inside an object.
    ///
    /// # Errors
    /// Propagates sink errors.
    fn field(&mut self, name: &str, value: Scalar<'_>) -> Result<()> {
        self.property(name)?;
        self.scalar(value)
    }

    /// Writes `name: value` only when the value is present.
    ///
    /// # Errors
    /// Propagates sink errors.
    fn optional_field(&mut self, name: &str, value: Option<Scalar<'_>>) -> Result<()> {
        match value {
            Some(v) => self.field(name, v),
            None => Ok(()),
        }
    }
}

/// Writes any serializable record to a sink as nested events.
///
/// Entity parsers produce small typed records (a unit, a structure) and hand
/// them over one at a time, so output stays streaming at entity granularity.
///
/// # Errors
/// Returns a serialization error if the record cannot be represented, or
/// propagates sink errors.
pub fn emit<T: Serialize + ?Sized>(sink: &mut dyn ReportSink, record: &T) -> Result<()> {
    let value = serde_json::to_value(record)?;
    emit_value(sink, &value)
}

/// Replays a `serde_json::Value` into a sink.
///
/// # Errors
/// Propagates sink errors.
pub fn emit_value(sink: &mut dyn ReportSink, value: &Value) -> Result<()> {
    match value {
        Value::Null => sink.scalar(Scalar::Null),
        Value::Bool(b) => sink.scalar(Scalar::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                sink.scalar(Scalar::Int(i))
            } else {
                sink.scalar(Scalar::Float(n.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => sink.scalar(Scalar::Str(s)),
        Value::Array(items) => {
            sink.begin_array()?;
            for item in items {
                emit_value(sink, item)?;
            }
            sink.end_array()
        }
        Value::Object(map) => {
            sink.begin_object()?;
            for (key, item) in map {
                sink.property(key)?;
                emit_value(sink, item)?;
            }
            sink.end_object()
        }
    }
}

// =============================================================================
// JSON text sink
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameKind {
    Object,
    Array,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    kind: FrameKind,
    first: bool,
    /// Object frames: a property was named and awaits its value.
    keyed: bool,
}

/// Streams JSON text to a writer.
pub struct JsonSink<W: Write, F: Formatter = CompactFormatter> {
    writer: W,
    formatter: F,
    stack: Vec<Frame>,
    root_written: bool,
}

impl<W: Write> JsonSink<W> {
    /// Creates a compact JSON sink.
    pub fn new(writer: W) -> Self {
        Self::with_formatter(writer, CompactFormatter)
    }
}

impl<W: Write> JsonSink<W, PrettyFormatter<'static>> {
    /// Creates an indented JSON sink.
    pub fn pretty(writer: W) -> Self {
        Self::with_formatter(writer, PrettyFormatter::new())
    }
}

impl<W: Write, F: Formatter> JsonSink<W, F> {
    /// Creates a sink with a custom formatter.
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Self {
            writer,
            formatter,
            stack: Vec::new(),
            root_written: false,
        }
    }

    /// Returns true once a complete top-level value has been written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.root_written && self.stack.is_empty()
    }

    /// Flushes and returns the writer.
    ///
    /// # Errors
    /// Returns an I/O error if the flush fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn before_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                if self.root_written {
                    return Err(Error::sink("second top-level value"));
                }
                Ok(())
            }
            Some(frame) if frame.kind == FrameKind::Array => {
                let first = frame.first;
                frame.first = false;
                self.formatter
                    .begin_array_value(&mut self.writer, first)
                    .map_err(Error::from)
            }
            Some(frame) => {
                if frame.keyed {
                    Ok(())
                } else {
                    Err(Error::sink("object value written without a property"))
                }
            }
        }
    }

    fn after_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                self.root_written = true;
                Ok(())
            }
            Some(frame) if frame.kind == FrameKind::Array => self
                .formatter
                .end_array_value(&mut self.writer)
                .map_err(Error::from),
            Some(frame) => {
                frame.keyed = false;
                self.formatter
                    .end_object_value(&mut self.writer)
                    .map_err(Error::from)
            }
        }
    }

    fn write_str(&mut self, value: &str) -> Result<()> {
        let w = &mut self.writer;
        let f = &mut self.formatter;
        f.begin_string(w)?;
        let bytes = value.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let escape = match byte {
                b'"' => CharEscape::Quote,
                b'\\' => CharEscape::ReverseSolidus,
                b'\n' => CharEscape::LineFeed,
                b'\r' => CharEscape::CarriageReturn,
                b'\t' => CharEscape::Tab,
                0x08 => CharEscape::Backspace,
                0x0c => CharEscape::FormFeed,
                0x00..=0x1f => CharEscape::AsciiControl(byte),
                _ => continue,
            };
            if start < i {
                f.write_string_fragment(w, &value[start..i])?;
            }
            f.write_char_escape(w, escape)?;
            start = i + 1;
        }
        if start < bytes.len() {
            f.write_string_fragment(w, &value[start..])?;
        }
        f.end_string(w)?;
        Ok(())
    }

    fn close(&mut self, kind: FrameKind) -> Result<()> {
        match self.stack.pop() {
            Some(frame) if frame.kind == kind => {
                if frame.keyed {
                    return Err(Error::sink("object closed with a dangling property"));
                }
                match kind {
                    FrameKind::Object => self.formatter.end_object(&mut self.writer)?,
                    FrameKind::Array => self.formatter.end_array(&mut self.writer)?,
                }
                self.after_value()
            }
            Some(frame) => Err(Error::sink(format!(
                "mismatched close: expected {:?}, found {kind:?}",
                frame.kind
            ))),
            None => Err(Error::sink("close with nothing open")),
        }
    }
}

impl<W: Write, F: Formatter> ReportSink for JsonSink<W, F> {
    fn begin_object(&mut self) -> Result<()> {
        self.before_value()?;
        self.formatter.begin_object(&mut self.writer)?;
        self.stack.push(Frame {
            kind: FrameKind::Object,
            first: true,
            keyed: false,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.close(FrameKind::Object)
    }

    fn begin_array(&mut self) -> Result<()> {
        self.before_value()?;
        self.formatter.begin_array(&mut self.writer)?;
        self.stack.push(Frame {
            kind: FrameKind::Array,
            first: true,
            keyed: false,
        });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.close(FrameKind::Array)
    }

    fn property(&mut self, name: &str) -> Result<()> {
        let first = match self.stack.last_mut() {
            Some(frame) if frame.kind == FrameKind::Object && !frame.keyed => {
                let first = frame.first;
                frame.first = false;
                frame.keyed = true;
                first
            }
            _ => return Err(Error::sink(format!("property '{name}' outside an object"))),
        };
        self.formatter
            .begin_object_key(&mut self.writer, first)?;
        self.write_str(name)?;
        self.formatter.end_object_key(&mut self.writer)?;
        self.formatter.begin_object_value(&mut self.writer)?;
        Ok(())
    }

    fn scalar(&mut self, value: Scalar<'_>) -> Result<()> {
        self.before_value()?;
        match value {
            Scalar::Null => self.formatter.write_null(&mut self.writer)?,
            Scalar::Bool(b) => self.formatter.write_bool(&mut self.writer, b)?,
            Scalar::Int(i) => self.formatter.write_i64(&mut self.writer, i)?,
            Scalar::Float(v) if v.is_finite() => {
                self.formatter.write_f64(&mut self.writer, v)?;
            }
            Scalar::Float(_) => self.formatter.write_null(&mut self.writer)?,
            Scalar::Str(s) => self.write_str(s)?,
        }
        self.after_value()
    }
}

// =============================================================================
// In-memory value sink
// =============================================================================

enum Node {
    Object(Map<String, Value>, Option<String>),
    Array(Vec<Value>),
}

/// Builds a `serde_json::Value` from sink events.
///
/// When a property repeats inside one object and both values are arrays,
/// the arrays are concatenated. This is how repeated report sections (for
/// example two `Events during turn:` blocks in concatenated input) end up
/// in one list.
#[derive(Default)]
pub struct ValueSink {
    stack: Vec<Node>,
    root: Option<Value>,
}

impl ValueSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished value.
    ///
    /// # Errors
    /// Returns a sink error if containers are still open or nothing was written.
    pub fn into_value(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(Error::sink(format!(
                "{} container(s) still open",
                self.stack.len()
            )));
        }
        self.root.ok_or_else(|| Error::sink("no value written"))
    }

    fn complete(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                if self.root.is_some() {
                    return Err(Error::sink("second top-level value"));
                }
                self.root = Some(value);
                Ok(())
            }
            Some(Node::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Node::Object(map, key)) => {
                let Some(key) = key.take() else {
                    return Err(Error::sink("object value written without a property"));
                };
                match (map.get_mut(&key), value) {
                    (Some(Value::Array(existing)), Value::Array(more)) => existing.extend(more),
                    (_, value) => {
                        map.insert(key, value);
                    }
                }
                Ok(())
            }
        }
    }
}

impl ReportSink for ValueSink {
    fn begin_object(&mut self) -> Result<()> {
        if let Some(Node::Object(_, None)) = self.stack.last() {
            return Err(Error::sink("object value written without a property"));
        }
        self.stack.push(Node::Object(Map::new(), None));
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Node::Object(map, None)) => self.complete(Value::Object(map)),
            Some(Node::Object(_, Some(key))) => Err(Error::sink(format!(
                "object closed with dangling property '{key}'"
            ))),
            Some(Node::Array(_)) => Err(Error::sink("end_object while an array is open")),
            None => Err(Error::sink("close with nothing open")),
        }
    }

    fn begin_array(&mut self) -> Result<()> {
        if let Some(Node::Object(_, None)) = self.stack.last() {
            return Err(Error::sink("object value written without a property"));
        }
        self.stack.push(Node::Array(Vec::new()));
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Node::Array(items)) => self.complete(Value::Array(items)),
            Some(Node::Object(..)) => Err(Error::sink("end_array while an object is open")),
            None => Err(Error::sink("close with nothing open")),
        }
    }

    fn property(&mut self, name: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Node::Object(_, key @ None)) => {
                *key = Some(name.to_string());
                Ok(())
            }
            _ => Err(Error::sink(format!("property '{name}' outside an object"))),
        }
    }

    fn scalar(&mut self, value: Scalar<'_>) -> Result<()> {
        let value = match value {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(i) => Value::Number(i.into()),
            Scalar::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Scalar::Str(s) => Value::String(s.to_string()),
        };
        self.complete(value)
    }
}
