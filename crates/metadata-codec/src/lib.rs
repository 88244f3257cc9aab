//! Schema-driven binary codec for the token metadata program.
//!
//! Every record the metadata program reads or writes is described once, as
//! an ordered list of `(field name, wire type)` pairs in the
//! [`schema::SchemaRegistry`]. The [`codec`] module walks that table to turn
//! typed [`record`] values into bytes and back, so the encode and decode
//! paths can never drift apart.
//!
//! ```text
//! u8          1 byte
//! string      u32 LE length || UTF-8 bytes
//! [N]         N raw bytes
//! option<T>   1-byte tag (0 = absent, 1 = present) || T if present
//! ```
//!
//! There is no type tag on the wire; the reader must know which record it
//! expects (instruction payloads are dispatched by their leading opcode).

pub mod codec;
pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use codec::{decode, decode_exact, decode_values, encode, encode_values};
pub use error::CodecError;
pub use record::{
    CreateMetadataArgs, Metadata, NameSymbolTuple, Record, UpdateMetadataArgs,
    CREATE_METADATA_OPCODE, METADATA_LEN, NAME_LENGTH, NAME_SYMBOL_TUPLE_LEN, SYMBOL_LENGTH,
    UPDATE_METADATA_OPCODE, URI_LENGTH,
};
pub use schema::{FieldDef, RecordKind, SchemaEntry, SchemaRegistry, WireType};
pub use value::{Fields, Value};
