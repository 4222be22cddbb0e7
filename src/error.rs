//! Errors raised while loading test fixtures.

use std::path::PathBuf;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixtureError>;

/// Every variant is fatal: a test run cannot start without its fixtures.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("keypair file {} is not a JSON byte array: {source}", .path.display())]
    KeypairJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid keypair in {}: {reason}", .path.display())]
    InvalidKeypair { path: PathBuf, reason: String },

    #[error("failed to parse CLI config {}: {source}", .path.display())]
    ConfigYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("CLI config {} has no json_rpc_url", .path.display())]
    MissingRpcUrl { path: PathBuf },

    #[error("home directory unavailable; pass the CLI config path explicitly")]
    HomeDirUnavailable,

    #[error("RPC request for {address} failed: {reason}")]
    Rpc { address: Pubkey, reason: String },

    #[error("account {address} exists but is not an executable program")]
    NotExecutable { address: Pubkey },
}

impl FixtureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
