//! Schema-driven encoder and decoder.
//!
//! Encoding writes fields strictly in declared order into one contiguous
//! buffer. Decoding consumes a buffer left to right with a cursor; bytes
//! left over once every declared field is read are ignored by [`decode`]
//! and rejected by [`decode_exact`].

use tracing::trace;

use crate::error::CodecError;
use crate::record::Record;
use crate::schema::{FieldDef, SchemaEntry, SchemaRegistry, WireType};
use crate::value::{Fields, Value};

// ---------------------------------------------------------------------------
// Typed entry points
// ---------------------------------------------------------------------------

/// Encode a typed record using its registered layout.
pub fn encode<R: Record>(registry: &SchemaRegistry, record: &R) -> Result<Vec<u8>, CodecError> {
    let entry = registry.entry(R::KIND)?;
    encode_values(entry, &record.to_values())
}

/// Decode a typed record, ignoring any bytes after the last declared field.
pub fn decode<R: Record>(registry: &SchemaRegistry, data: &[u8]) -> Result<R, CodecError> {
    let entry = registry.entry(R::KIND)?;
    let (values, _consumed) = read_values(entry, data)?;
    R::from_fields(Fields::new(entry.fields, values))
}

/// Like [`decode`], but the buffer must end exactly at the last field.
pub fn decode_exact<R: Record>(registry: &SchemaRegistry, data: &[u8]) -> Result<R, CodecError> {
    let entry = registry.entry(R::KIND)?;
    let (values, consumed) = read_values(entry, data)?;
    if consumed != data.len() {
        return Err(CodecError::TrailingBytes(data.len() - consumed));
    }
    R::from_fields(Fields::new(entry.fields, values))
}

// ---------------------------------------------------------------------------
// Untyped entry points
// ---------------------------------------------------------------------------

/// Encode one value per declared field, in declared order.
pub fn encode_values(entry: &SchemaEntry, values: &[Value]) -> Result<Vec<u8>, CodecError> {
    if values.len() != entry.fields.len() {
        let field = entry
            .fields
            .get(values.len())
            .or(entry.fields.last())
            .map_or("<record>", |f| f.name);
        return Err(CodecError::InvalidField {
            field,
            reason: format!(
                "{} expects {} fields, got {}",
                entry.kind,
                entry.fields.len(),
                values.len()
            ),
        });
    }

    let mut writer = Writer::with_capacity(entry.min_encoded_len());
    for (def, value) in entry.fields.iter().zip(values) {
        writer.write_field(def.name, &def.ty, value)?;
    }

    trace!(kind = %entry.kind, len = writer.buf.len(), "encoded record");
    Ok(writer.buf)
}

/// Decode one value per declared field. Trailing bytes are ignored.
pub fn decode_values(entry: &SchemaEntry, data: &[u8]) -> Result<Vec<Value>, CodecError> {
    read_values(entry, data).map(|(values, _)| values)
}

fn read_values(entry: &SchemaEntry, data: &[u8]) -> Result<(Vec<Value>, usize), CodecError> {
    let mut reader = Reader::new(data);
    let mut values = Vec::with_capacity(entry.fields.len());

    for def in entry.fields {
        values.push(reader.read_field(def)?);
    }

    trace!(
        kind = %entry.kind,
        consumed = reader.pos,
        trailing = reader.remaining(),
        "decoded record"
    );
    Ok((values, reader.pos))
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn write_field(
        &mut self,
        name: &'static str,
        ty: &WireType,
        value: &Value,
    ) -> Result<(), CodecError> {
        match (ty, value) {
            (WireType::U8, Value::U8(v)) => self.buf.push(*v),
            (WireType::String, Value::String(s)) => {
                let len = u32::try_from(s.len()).map_err(|_| CodecError::InvalidField {
                    field: name,
                    reason: format!("string of {} bytes exceeds u32 length prefix", s.len()),
                })?;
                self.buf.extend_from_slice(&len.to_le_bytes());
                self.buf.extend_from_slice(s.as_bytes());
            }
            (WireType::FixedBytes(n), Value::Bytes(bytes)) => {
                if bytes.len() != *n {
                    return Err(CodecError::InvalidField {
                        field: name,
                        reason: format!("expected {n} bytes, got {}", bytes.len()),
                    });
                }
                self.buf.extend_from_slice(bytes);
            }
            (WireType::Option(_), Value::Option(None)) => self.buf.push(0),
            (WireType::Option(inner), Value::Option(Some(v))) => {
                self.buf.push(1);
                self.write_field(name, inner, v)?;
            }
            (ty, value) => {
                return Err(CodecError::InvalidField {
                    field: name,
                    reason: format!("expected {ty}, got {}", value.kind_name()),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, name: &str, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::MalformedInput(format!(
                "field `{name}` needs {n} bytes at offset {}, only {} left",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_field(&mut self, def: &FieldDef) -> Result<Value, CodecError> {
        self.read_typed(def.name, &def.ty)
    }

    fn read_typed(&mut self, name: &str, ty: &WireType) -> Result<Value, CodecError> {
        match ty {
            WireType::U8 => Ok(Value::U8(self.take(name, 1)?[0])),
            WireType::String => {
                let prefix = self.take(name, 4)?;
                let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
                let bytes = self.take(name, len)?;
                let s = std::str::from_utf8(bytes).map_err(|e| {
                    CodecError::MalformedInput(format!("field `{name}` is not UTF-8: {e}"))
                })?;
                Ok(Value::String(s.to_owned()))
            }
            WireType::FixedBytes(n) => Ok(Value::Bytes(self.take(name, *n)?.to_vec())),
            WireType::Option(inner) => match self.take(name, 1)?[0] {
                0 => Ok(Value::none()),
                1 => Ok(Value::some(self.read_typed(name, inner)?)),
                tag => Err(CodecError::MalformedInput(format!(
                    "field `{name}` has invalid option tag {tag}"
                ))),
            },
        }
    }
}
