//! Untyped field values, the currency between typed records and the codec.

use crate::error::CodecError;
use crate::schema::FieldDef;

/// A single decoded (or to-be-encoded) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    String(String),
    Bytes(Vec<u8>),
    Option(Option<Box<Value>>),
}

impl Value {
    pub fn some(inner: Value) -> Self {
        Value::Option(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Option(_) => "option",
        }
    }
}

/// Decoded values paired with their layout, consumed by name.
#[derive(Debug)]
pub struct Fields {
    defs: &'static [FieldDef],
    values: Vec<Option<Value>>,
}

impl Fields {
    pub fn new(defs: &'static [FieldDef], values: Vec<Value>) -> Self {
        Self {
            defs,
            values: values.into_iter().map(Some).collect(),
        }
    }

    fn take(&mut self, name: &'static str) -> Result<Value, CodecError> {
        let idx = self
            .defs
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| CodecError::InvalidField {
                field: name,
                reason: "not declared in schema".into(),
            })?;

        self.values
            .get_mut(idx)
            .and_then(Option::take)
            .ok_or_else(|| CodecError::InvalidField {
                field: name,
                reason: "missing or already taken".into(),
            })
    }

    pub fn u8(&mut self, name: &'static str) -> Result<u8, CodecError> {
        match self.take(name)? {
            Value::U8(v) => Ok(v),
            other => Err(mismatch(name, "u8", &other)),
        }
    }

    pub fn string(&mut self, name: &'static str) -> Result<String, CodecError> {
        match self.take(name)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(name, "string", &other)),
        }
    }

    pub fn key(&mut self, name: &'static str) -> Result<[u8; 32], CodecError> {
        match self.take(name)? {
            Value::Bytes(bytes) => bytes.try_into().map_err(|v: Vec<u8>| {
                CodecError::InvalidField {
                    field: name,
                    reason: format!("expected 32 bytes, got {}", v.len()),
                }
            }),
            other => Err(mismatch(name, "bytes", &other)),
        }
    }

    pub fn option_u8(&mut self, name: &'static str) -> Result<Option<u8>, CodecError> {
        match self.take(name)? {
            Value::Option(None) => Ok(None),
            Value::Option(Some(inner)) => match *inner {
                Value::U8(v) => Ok(Some(v)),
                other => Err(mismatch(name, "u8", &other)),
            },
            other => Err(mismatch(name, "option", &other)),
        }
    }
}

fn mismatch(field: &'static str, expected: &str, got: &Value) -> CodecError {
    CodecError::InvalidField {
        field,
        reason: format!("expected {expected}, got {}", got.kind_name()),
    }
}
