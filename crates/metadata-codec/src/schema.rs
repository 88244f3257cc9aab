//! Field layouts for every record the metadata program understands.
//!
//! Each [`RecordKind`] carries its layout as a `const` table. A
//! [`SchemaRegistry`] is built once (usually [`SchemaRegistry::standard`])
//! and passed by reference to the encoder and decoder.

use std::fmt;

use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// How a single field is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// One byte.
    U8,
    /// u32 little-endian length prefix followed by UTF-8 bytes.
    String,
    /// Exactly `N` raw bytes, no prefix.
    FixedBytes(usize),
    /// 1-byte presence tag followed by the inner type when the tag is 1.
    Option(&'static WireType),
}

impl WireType {
    /// Smallest number of bytes this type can occupy.
    pub const fn min_len(&self) -> usize {
        match self {
            WireType::U8 => 1,
            WireType::String => 4,
            WireType::FixedBytes(n) => *n,
            WireType::Option(_) => 1,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::U8 => f.write_str("u8"),
            WireType::String => f.write_str("string"),
            WireType::FixedBytes(n) => write!(f, "[{n}]"),
            WireType::Option(inner) => write!(f, "option<{inner}>"),
        }
    }
}

/// A named field in a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: WireType,
}

const fn field(name: &'static str, ty: WireType) -> FieldDef {
    FieldDef { name, ty }
}

// ---------------------------------------------------------------------------
// Layout tables
// ---------------------------------------------------------------------------

const CREATE_METADATA_ARGS_FIELDS: &[FieldDef] = &[
    field("instruction", WireType::U8),
    field("allow_duplicates", WireType::U8),
    field("name", WireType::String),
    field("symbol", WireType::String),
    field("uri", WireType::String),
];

const UPDATE_METADATA_ARGS_FIELDS: &[FieldDef] = &[
    field("instruction", WireType::U8),
    field("uri", WireType::String),
    field("reserved", WireType::U8),
];

const METADATA_FIELDS: &[FieldDef] = &[
    field("allow_duplicates", WireType::Option(&WireType::U8)),
    field("mint", WireType::FixedBytes(32)),
    field("name", WireType::String),
    field("symbol", WireType::String),
    field("uri", WireType::String),
];

const NAME_SYMBOL_TUPLE_FIELDS: &[FieldDef] = &[
    field("update_authority", WireType::FixedBytes(32)),
    field("metadata", WireType::FixedBytes(32)),
];

// ---------------------------------------------------------------------------
// Record kinds
// ---------------------------------------------------------------------------

/// The fixed set of record shapes exchanged with the metadata program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    CreateMetadataArgs,
    UpdateMetadataArgs,
    Metadata,
    NameSymbolTuple,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::CreateMetadataArgs,
        RecordKind::UpdateMetadataArgs,
        RecordKind::Metadata,
        RecordKind::NameSymbolTuple,
    ];

    /// Declared field layout, in wire order.
    pub const fn fields(self) -> &'static [FieldDef] {
        match self {
            RecordKind::CreateMetadataArgs => CREATE_METADATA_ARGS_FIELDS,
            RecordKind::UpdateMetadataArgs => UPDATE_METADATA_ARGS_FIELDS,
            RecordKind::Metadata => METADATA_FIELDS,
            RecordKind::NameSymbolTuple => NAME_SYMBOL_TUPLE_FIELDS,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RecordKind::CreateMetadataArgs => "CreateMetadataArgs",
            RecordKind::UpdateMetadataArgs => "UpdateMetadataArgs",
            RecordKind::Metadata => "Metadata",
            RecordKind::NameSymbolTuple => "NameSymbolTuple",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One registered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    pub kind: RecordKind,
    pub fields: &'static [FieldDef],
}

impl SchemaEntry {
    pub const fn of(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: kind.fields(),
        }
    }

    /// Length of the shortest possible encoding (empty strings, absent
    /// options).
    pub fn min_encoded_len(&self) -> usize {
        self.fields.iter().map(|f| f.ty.min_len()).sum()
    }
}

/// Immutable lookup from record kind to layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
}

impl SchemaRegistry {
    /// Registry holding every record kind.
    pub fn standard() -> Self {
        Self::with_kinds(&RecordKind::ALL)
    }

    /// Registry holding only the given kinds. Looking up anything else fails
    /// with [`CodecError::SchemaLookup`].
    pub fn with_kinds(kinds: &[RecordKind]) -> Self {
        let mut entries: Vec<SchemaEntry> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !entries.iter().any(|e| e.kind == *kind) {
                entries.push(SchemaEntry::of(*kind));
            }
        }
        Self { entries }
    }

    pub fn entry(&self, kind: RecordKind) -> Result<&SchemaEntry, CodecError> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .ok_or(CodecError::SchemaLookup(kind))
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(kind: RecordKind) -> Vec<&'static str> {
        kind.fields().iter().map(|f| f.name).collect()
    }

    #[test]
    fn create_metadata_args_layout() {
        assert_eq!(
            names(RecordKind::CreateMetadataArgs),
            ["instruction", "allow_duplicates", "name", "symbol", "uri"]
        );
    }

    #[test]
    fn update_metadata_args_layout() {
        assert_eq!(
            names(RecordKind::UpdateMetadataArgs),
            ["instruction", "uri", "reserved"]
        );
    }

    #[test]
    fn metadata_layout_starts_with_optional_flag() {
        let fields = RecordKind::Metadata.fields();
        assert_eq!(fields[0].ty, WireType::Option(&WireType::U8));
        assert_eq!(fields[1].ty, WireType::FixedBytes(32));
    }

    #[test]
    fn name_symbol_tuple_is_two_keys() {
        let entry = SchemaEntry::of(RecordKind::NameSymbolTuple);
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.min_encoded_len(), 64);
    }

    #[test]
    fn min_encoded_len_counts_prefixes() {
        // option tag + mint + three empty strings
        assert_eq!(SchemaEntry::of(RecordKind::Metadata).min_encoded_len(), 1 + 32 + 12);
    }

    #[test]
    fn standard_registry_has_every_kind() {
        let registry = SchemaRegistry::standard();
        for kind in RecordKind::ALL {
            assert_eq!(registry.entry(kind).unwrap().kind, kind);
        }
    }

    #[test]
    fn missing_kind_is_lookup_error() {
        let registry = SchemaRegistry::with_kinds(&[RecordKind::Metadata]);
        assert_eq!(
            registry.entry(RecordKind::NameSymbolTuple),
            Err(CodecError::SchemaLookup(RecordKind::NameSymbolTuple))
        );
    }

    #[test]
    fn duplicate_kinds_are_registered_once() {
        let registry =
            SchemaRegistry::with_kinds(&[RecordKind::Metadata, RecordKind::Metadata]);
        assert_eq!(registry.entries().len(), 1);
    }

    #[test]
    fn wire_type_display() {
        assert_eq!(WireType::FixedBytes(32).to_string(), "[32]");
        assert_eq!(WireType::Option(&WireType::U8).to_string(), "option<u8>");
    }
}
