use log::debug;
use solana_sdk::signature::Keypair;
use std::fs;
use std::path::Path;

use crate::error::{FixtureError, Result};

/// Secret key followed by public key, as written by `solana-keygen`.
pub const KEYPAIR_LENGTH: usize = 64;

/// Reads a keypair stored as a JSON array of bytes.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<Keypair> {
    let path = path.as_ref();
    debug!("Loading keypair from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    let bytes: Vec<u8> =
        serde_json::from_str(&contents).map_err(|source| FixtureError::KeypairJson {
            path: path.to_path_buf(),
            source,
        })?;

    keypair_from_bytes(&bytes).map_err(|reason| FixtureError::InvalidKeypair {
        path: path.to_path_buf(),
        reason,
    })
}

/// Builds a keypair from its 64-byte encoding.
pub fn keypair_from_bytes(bytes: &[u8]) -> std::result::Result<Keypair, String> {
    if bytes.len() != KEYPAIR_LENGTH {
        return Err(format!(
            "expected {} bytes, found {}",
            KEYPAIR_LENGTH,
            bytes.len()
        ));
    }

    // Rejects a public half that does not match the secret half.
    Keypair::try_from(bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn keypair_json(keypair: &Keypair) -> String {
        serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_load_keypair_round_trips_bytes() {
        let original = Keypair::new();
        let file = write_json(&keypair_json(&original));

        let loaded = load_keypair(file.path()).unwrap();
        assert_eq!(loaded.to_bytes(), original.to_bytes());
        assert_eq!(loaded.pubkey(), original.pubkey());
    }

    #[test]
    fn test_load_keypair_twice_is_identical() {
        let file = write_json(&keypair_json(&Keypair::new()));

        let first = load_keypair(file.path()).unwrap();
        let second = load_keypair(file.path()).unwrap();
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_load_keypair_accepts_whitespace_and_newlines() {
        let original = Keypair::new();
        let pretty = serde_json::to_string_pretty(&original.to_bytes().to_vec()).unwrap();
        let file = write_json(&format!("\n{pretty}\n"));

        let loaded = load_keypair(file.path()).unwrap();
        assert_eq!(loaded.pubkey(), original.pubkey());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        match load_keypair(&path) {
            Err(FixtureError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let file = write_json("[1, 2, 3");
        assert!(matches!(
            load_keypair(file.path()),
            Err(FixtureError::KeypairJson { .. })
        ));
    }

    #[test]
    fn test_out_of_range_byte_is_rejected() {
        let mut values = vec![0u16; KEYPAIR_LENGTH];
        values[0] = 256;
        let file = write_json(&serde_json::to_string(&values).unwrap());

        assert!(matches!(
            load_keypair(file.path()),
            Err(FixtureError::KeypairJson { .. })
        ));
    }

    #[test]
    fn test_object_instead_of_array_is_rejected() {
        let file = write_json(r#"{"secret": [1, 2, 3]}"#);
        assert!(matches!(
            load_keypair(file.path()),
            Err(FixtureError::KeypairJson { .. })
        ));
    }

    #[test]
    fn test_wrong_length_is_invalid_keypair() {
        let file = write_json(&serde_json::to_string(&vec![7u8; 32]).unwrap());

        match load_keypair(file.path()) {
            Err(FixtureError::InvalidKeypair { reason, .. }) => {
                assert!(reason.contains("expected 64 bytes, found 32"), "{reason}");
            }
            other => panic!("expected InvalidKeypair, got {other:?}"),
        }
    }

    #[test]
    fn test_keypair_from_bytes_matches_original() {
        let original = Keypair::new();
        let rebuilt = keypair_from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(rebuilt.to_bytes(), original.to_bytes());
    }

    #[test]
    fn test_mismatched_public_half_is_invalid_keypair() {
        let secret_owner = Keypair::new();
        let other = Keypair::new();
        let mut bytes = secret_owner.to_bytes().to_vec();
        bytes[32..].copy_from_slice(&other.to_bytes()[32..]);
        let file = write_json(&serde_json::to_string(&bytes).unwrap());

        assert!(matches!(
            load_keypair(file.path()),
            Err(FixtureError::InvalidKeypair { .. })
        ));
    }
}
