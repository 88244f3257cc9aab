//! Randomized round-trip and truncation checks against the public API.

use metadata_codec::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_string(rng: &mut StdRng, max: usize) -> String {
    let len = rng.gen_range(0..=max);
    (0..len)
        .map(|_| rng.gen_range(b'!'..=b'~') as char)
        .collect()
}

fn random_key(rng: &mut StdRng) -> [u8; 32] {
    let mut key = [0u8; 32];
    rng.fill(&mut key);
    key
}

fn random_metadata(rng: &mut StdRng) -> Metadata {
    Metadata {
        allow_duplicates: if rng.gen_bool(0.5) {
            Some(rng.gen())
        } else {
            None
        },
        mint: random_key(rng),
        name: random_string(rng, NAME_LENGTH),
        symbol: random_string(rng, SYMBOL_LENGTH),
        uri: random_string(rng, URI_LENGTH),
    }
}

#[test]
fn metadata_roundtrips_and_fits_account_size() {
    let registry = SchemaRegistry::standard();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let md = random_metadata(&mut rng);
        let bytes = encode(&registry, &md).unwrap();
        assert!(bytes.len() <= METADATA_LEN);

        let decoded: Metadata = decode(&registry, &bytes).unwrap();
        assert_eq!(decoded, md);
    }
}

#[test]
fn metadata_decodes_from_zero_padded_account() {
    // Accounts are allocated at METADATA_LEN and the record is written at
    // the front; the padding must not disturb decoding.
    let registry = SchemaRegistry::standard();
    let mut rng = StdRng::seed_from_u64(7);
    let md = random_metadata(&mut rng);

    let mut account = vec![0u8; METADATA_LEN];
    let bytes = encode(&registry, &md).unwrap();
    account[..bytes.len()].copy_from_slice(&bytes);

    let decoded: Metadata = decode(&registry, &account).unwrap();
    assert_eq!(decoded, md);
}

#[test]
fn instruction_args_roundtrip() {
    let registry = SchemaRegistry::standard();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let create = CreateMetadataArgs::new(
            random_string(&mut rng, NAME_LENGTH),
            random_string(&mut rng, SYMBOL_LENGTH),
            random_string(&mut rng, URI_LENGTH),
        );
        let bytes = encode(&registry, &create).unwrap();
        assert_eq!(bytes[0], CREATE_METADATA_OPCODE);
        assert_eq!(decode::<CreateMetadataArgs>(&registry, &bytes).unwrap(), create);

        let update = UpdateMetadataArgs::new(random_string(&mut rng, URI_LENGTH));
        let bytes = encode(&registry, &update).unwrap();
        assert_eq!(bytes[0], UPDATE_METADATA_OPCODE);
        assert_eq!(decode::<UpdateMetadataArgs>(&registry, &bytes).unwrap(), update);
    }
}

#[test]
fn name_symbol_tuple_roundtrip() {
    let registry = SchemaRegistry::standard();
    let mut rng = StdRng::seed_from_u64(99);
    let tuple = NameSymbolTuple {
        update_authority: random_key(&mut rng),
        metadata: random_key(&mut rng),
    };
    let bytes = encode(&registry, &tuple).unwrap();
    assert_eq!(decode::<NameSymbolTuple>(&registry, &bytes).unwrap(), tuple);
    assert!(bytes.len() <= NAME_SYMBOL_TUPLE_LEN);
}

#[test]
fn truncated_instruction_args_are_malformed() {
    let registry = SchemaRegistry::standard();
    let bytes = encode(&registry, &CreateMetadataArgs::new("Foo", "FOO", "http://x")).unwrap();

    for cut in 0..bytes.len() {
        let err = decode::<CreateMetadataArgs>(&registry, &bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, CodecError::MalformedInput(_)),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn untyped_values_follow_schema_order() {
    let registry = SchemaRegistry::standard();
    let entry = registry.entry(RecordKind::UpdateMetadataArgs).unwrap();
    let values = decode_values(entry, &[1, 1, 0, 0, 0, b'z', 0]).unwrap();
    assert_eq!(
        values,
        vec![Value::U8(1), Value::String("z".into()), Value::U8(0)]
    );
}
