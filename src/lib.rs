//! Fixtures for integration tests of the nautilus programs: the payer and
//! program authority keypairs, and the cluster connection taken from the
//! Solana CLI config.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod solana_utils;
pub mod wallet;

pub use config::{
    ConfigPathProvider, Endpoint, FixedConfigPaths, HomeConfigPaths, TestConfig, LOCAL_RPC_URL,
    REMOTE_DELAY,
};
pub use error::{FixtureError, Result};
pub use fixtures::{FixturePaths, Fixtures, TestProgram};
pub use wallet::load_keypair;
