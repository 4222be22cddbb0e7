use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{ConfigPathProvider, TestConfig};
use crate::error::Result;
use crate::wallet::load_keypair;

/// Every program under test is deployed with an authority keypair of this name.
pub const PROGRAM_KEYPAIR_FILE: &str = "program_nautilus-keypair.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestProgram {
    Wallets,
    Tokens,
    Records,
    Accounts,
}

impl TestProgram {
    pub const ALL: [TestProgram; 4] = [
        TestProgram::Wallets,
        TestProgram::Tokens,
        TestProgram::Records,
        TestProgram::Accounts,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            TestProgram::Wallets => "wallets",
            TestProgram::Tokens => "tokens",
            TestProgram::Records => "records",
            TestProgram::Accounts => "accounts",
        }
    }

    /// `<root>/programs/<name>/target/deploy/program_nautilus-keypair.json`
    pub fn keypair_path(self, workspace_root: &Path) -> PathBuf {
        workspace_root
            .join("programs")
            .join(self.dir_name())
            .join("target")
            .join("deploy")
            .join(PROGRAM_KEYPAIR_FILE)
    }
}

impl fmt::Display for TestProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Where keypairs are read from.
#[derive(Debug, Clone)]
pub struct FixturePaths {
    /// Overrides both the CLI config's `keypair_path` and the provider default.
    pub payer: Option<PathBuf>,
    pub workspace_root: PathBuf,
}

impl Default for FixturePaths {
    fn default() -> Self {
        Self {
            payer: None,
            workspace_root: PathBuf::from("."),
        }
    }
}

impl FixturePaths {
    pub fn payer_path(
        &self,
        config: &TestConfig,
        provider: &dyn ConfigPathProvider,
    ) -> Result<PathBuf> {
        if let Some(payer) = &self.payer {
            return Ok(payer.clone());
        }
        if let Some(path) = config.keypair_path() {
            // The CLI also accepts signer URIs (usb://, prompt://) and `~` paths here.
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            debug!(
                "Ignoring CLI config keypair_path {}: not a readable file",
                path.display()
            );
        }
        provider.default_keypair_path()
    }
}

/// Identities and connection settings for a test run.
pub struct Fixtures {
    pub payer: Keypair,
    pub program_wallets: Keypair,
    pub program_tokens: Keypair,
    pub program_records: Keypair,
    pub program_accounts: Keypair,
    pub config: TestConfig,
}

impl Fixtures {
    pub fn load(paths: &FixturePaths, provider: &dyn ConfigPathProvider) -> Result<Self> {
        let config = TestConfig::resolve(provider)?;

        let payer_path = paths.payer_path(&config, provider)?;
        debug!("Payer keypair path: {}", payer_path.display());
        let payer = load_keypair(&payer_path)?;

        let load_program =
            |program: TestProgram| load_keypair(program.keypair_path(&paths.workspace_root));

        let fixtures = Self {
            payer,
            program_wallets: load_program(TestProgram::Wallets)?,
            program_tokens: load_program(TestProgram::Tokens)?,
            program_records: load_program(TestProgram::Records)?,
            program_accounts: load_program(TestProgram::Accounts)?,
            config,
        };
        info!(
            "Loaded fixtures: payer {} against {}",
            fixtures.payer.pubkey(),
            fixtures.config.json_rpc_url()
        );
        Ok(fixtures)
    }

    pub fn program(&self, program: TestProgram) -> &Keypair {
        match program {
            TestProgram::Wallets => &self.program_wallets,
            TestProgram::Tokens => &self.program_tokens,
            TestProgram::Records => &self.program_records,
            TestProgram::Accounts => &self.program_accounts,
        }
    }

    pub fn program_id(&self, program: TestProgram) -> Pubkey {
        self.program(program).pubkey()
    }
}

impl fmt::Debug for Fixtures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixtures")
            .field("payer", &self.payer.pubkey())
            .field("program_wallets", &self.program_wallets.pubkey())
            .field("program_tokens", &self.program_tokens.pubkey())
            .field("program_records", &self.program_records.pubkey())
            .field("program_accounts", &self.program_accounts.pubkey())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
