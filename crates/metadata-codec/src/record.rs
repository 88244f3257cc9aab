//! Typed records and their mapping onto the schema tables.

use crate::error::CodecError;
use crate::schema::RecordKind;
use crate::value::{Fields, Value};

/// Max name length accepted by the metadata program.
pub const NAME_LENGTH: usize = 32;

/// Max symbol length accepted by the metadata program.
pub const SYMBOL_LENGTH: usize = 10;

/// Max uri length accepted by the metadata program.
pub const URI_LENGTH: usize = 200;

/// Space reserved for a metadata account: mint, the three strings, and
/// 200 bytes of slack for length prefixes and the option tag.
pub const METADATA_LEN: usize = 32 + NAME_LENGTH + SYMBOL_LENGTH + URI_LENGTH + 200;

/// Space reserved for a name/symbol ownership account.
pub const NAME_SYMBOL_TUPLE_LEN: usize = 32 + 32 + 200;

/// Opcode of the create-metadata instruction.
pub const CREATE_METADATA_OPCODE: u8 = 0;

/// Opcode of the update-metadata instruction.
pub const UPDATE_METADATA_OPCODE: u8 = 1;

/// A Rust type with a registered wire layout.
pub trait Record: Sized {
    const KIND: RecordKind;

    /// One value per declared field, in declared order.
    fn to_values(&self) -> Vec<Value>;

    fn from_fields(fields: Fields) -> Result<Self, CodecError>;
}

fn expect_opcode(kind: RecordKind, expected: u8, got: u8) -> Result<(), CodecError> {
    if got != expected {
        return Err(CodecError::MalformedInput(format!(
            "{kind} opcode must be {expected}, got {got}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CreateMetadataArgs
// ---------------------------------------------------------------------------

/// Payload of the create-metadata instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMetadataArgs {
    pub allow_duplicates: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl CreateMetadataArgs {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            allow_duplicates: 0,
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
        }
    }
}

impl Record for CreateMetadataArgs {
    const KIND: RecordKind = RecordKind::CreateMetadataArgs;

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::U8(CREATE_METADATA_OPCODE),
            Value::U8(self.allow_duplicates),
            Value::String(self.name.clone()),
            Value::String(self.symbol.clone()),
            Value::String(self.uri.clone()),
        ]
    }

    fn from_fields(mut fields: Fields) -> Result<Self, CodecError> {
        expect_opcode(Self::KIND, CREATE_METADATA_OPCODE, fields.u8("instruction")?)?;
        Ok(Self {
            allow_duplicates: fields.u8("allow_duplicates")?,
            name: fields.string("name")?,
            symbol: fields.string("symbol")?,
            uri: fields.string("uri")?,
        })
    }
}

// ---------------------------------------------------------------------------
// UpdateMetadataArgs
// ---------------------------------------------------------------------------

/// Payload of the update-metadata instruction. Name and symbol are fixed at
/// creation; only the uri can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMetadataArgs {
    pub uri: String,
}

impl UpdateMetadataArgs {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl Record for UpdateMetadataArgs {
    const KIND: RecordKind = RecordKind::UpdateMetadataArgs;

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::U8(UPDATE_METADATA_OPCODE),
            Value::String(self.uri.clone()),
            Value::U8(0),
        ]
    }

    fn from_fields(mut fields: Fields) -> Result<Self, CodecError> {
        expect_opcode(Self::KIND, UPDATE_METADATA_OPCODE, fields.u8("instruction")?)?;
        let uri = fields.string("uri")?;
        // reserved byte carries no information
        fields.u8("reserved")?;
        Ok(Self { uri })
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// On-chain metadata account contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub allow_duplicates: Option<u8>,
    /// Mint of the token asset
    pub mint: [u8; 32],
    pub name: String,
    /// The symbol for the asset, ie, AAPL or SHOES
    pub symbol: String,
    /// URI pointing to JSON representing the asset
    pub uri: String,
}

impl Record for Metadata {
    const KIND: RecordKind = RecordKind::Metadata;

    fn to_values(&self) -> Vec<Value> {
        vec![
            match self.allow_duplicates {
                Some(v) => Value::some(Value::U8(v)),
                None => Value::none(),
            },
            Value::Bytes(self.mint.to_vec()),
            Value::String(self.name.clone()),
            Value::String(self.symbol.clone()),
            Value::String(self.uri.clone()),
        ]
    }

    fn from_fields(mut fields: Fields) -> Result<Self, CodecError> {
        Ok(Self {
            allow_duplicates: fields.option_u8("allow_duplicates")?,
            mint: fields.key("mint")?,
            name: fields.string("name")?,
            symbol: fields.string("symbol")?,
            uri: fields.string("uri")?,
        })
    }
}

// ---------------------------------------------------------------------------
// NameSymbolTuple
// ---------------------------------------------------------------------------

/// Ownership record stored at the address derived from a name/symbol pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSymbolTuple {
    /// The key allowed to update the metadata after creation
    pub update_authority: [u8; 32],
    /// Pointer back to the metadata account
    pub metadata: [u8; 32],
}

impl Record for NameSymbolTuple {
    const KIND: RecordKind = RecordKind::NameSymbolTuple;

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Bytes(self.update_authority.to_vec()),
            Value::Bytes(self.metadata.to_vec()),
        ]
    }

    fn from_fields(mut fields: Fields) -> Result<Self, CodecError> {
        Ok(Self {
            update_authority: fields.key("update_authority")?,
            metadata: fields.key("metadata")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::schema::SchemaRegistry;

    #[test]
    fn metadata_len_bound() {
        assert_eq!(METADATA_LEN, 474);
    }

    #[test]
    fn to_values_matches_field_count() {
        assert_eq!(
            CreateMetadataArgs::new("a", "b", "c").to_values().len(),
            RecordKind::CreateMetadataArgs.fields().len()
        );
        assert_eq!(
            UpdateMetadataArgs::new("c").to_values().len(),
            RecordKind::UpdateMetadataArgs.fields().len()
        );
        assert_eq!(
            Metadata::default().to_values().len(),
            RecordKind::Metadata.fields().len()
        );
        assert_eq!(
            NameSymbolTuple::default().to_values().len(),
            RecordKind::NameSymbolTuple.fields().len()
        );
    }

    #[test]
    fn create_args_reject_update_opcode() {
        let registry = SchemaRegistry::standard();
        let mut bytes = encode(&registry, &CreateMetadataArgs::new("a", "b", "c")).unwrap();
        bytes[0] = UPDATE_METADATA_OPCODE;
        let result: Result<CreateMetadataArgs, _> = decode(&registry, &bytes);
        assert!(matches!(result, Err(CodecError::MalformedInput(_))));
    }

    #[test]
    fn update_args_reject_create_opcode() {
        let registry = SchemaRegistry::standard();
        let mut bytes = encode(&registry, &UpdateMetadataArgs::new("u")).unwrap();
        bytes[0] = CREATE_METADATA_OPCODE;
        let result: Result<UpdateMetadataArgs, _> = decode(&registry, &bytes);
        assert!(result.unwrap_err().to_string().contains("opcode"));
    }

    #[test]
    fn allow_duplicates_survives_roundtrip() {
        let registry = SchemaRegistry::standard();
        let mut args = CreateMetadataArgs::new("Name", "SYM", "uri");
        args.allow_duplicates = 1;
        let bytes = encode(&registry, &args).unwrap();
        assert_eq!(bytes[1], 1);
        let decoded: CreateMetadataArgs = decode(&registry, &bytes).unwrap();
        assert_eq!(decoded, args);
    }
}
