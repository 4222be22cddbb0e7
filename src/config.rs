//! Resolution of the Solana CLI configuration into test timing and a
//! connection handle.
//!
//! The CLI config lives at `~/.config/solana/cli/config.yml`. Only
//! `json_rpc_url` is required; `keypair_path` is picked up when present.

use log::{debug, info};
use serde::Deserialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{FixtureError, Result};

/// Endpoint of a `solana-test-validator` on its default port.
pub const LOCAL_RPC_URL: &str = "http://localhost:8899";

/// Wait between dependent transactions against a remote cluster.
pub const REMOTE_DELAY: Duration = Duration::from_secs(10);

/// Where the CLI config and the default payer keypair are found.
pub trait ConfigPathProvider {
    fn cli_config_path(&self) -> Result<PathBuf>;

    fn default_keypair_path(&self) -> Result<PathBuf>;
}

/// `~/.config/solana/cli/config.yml` and `~/.config/solana/id.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HomeConfigPaths;

impl ConfigPathProvider for HomeConfigPaths {
    fn cli_config_path(&self) -> Result<PathBuf> {
        if let Some(ref config_file) = *solana_cli_config::CONFIG_FILE {
            Ok(PathBuf::from(config_file))
        } else {
            Err(FixtureError::HomeDirUnavailable)
        }
    }

    fn default_keypair_path(&self) -> Result<PathBuf> {
        let config = self.cli_config_path()?;
        keypair_beside(&config).ok_or(FixtureError::HomeDirUnavailable)
    }
}

/// Explicit paths, for tests and command line overrides.
#[derive(Debug, Clone)]
pub struct FixedConfigPaths {
    cli_config: PathBuf,
    keypair: PathBuf,
}

impl FixedConfigPaths {
    pub fn new(cli_config: impl Into<PathBuf>, keypair: impl Into<PathBuf>) -> Self {
        Self {
            cli_config: cli_config.into(),
            keypair: keypair.into(),
        }
    }

    /// With the standard `<solana dir>/cli/config.yml` layout the default
    /// payer is `<solana dir>/id.json`. Any other location falls back to
    /// `~/.config/solana/id.json`.
    pub fn from_config_file(cli_config: impl Into<PathBuf>) -> Self {
        let cli_config = cli_config.into();
        let keypair = match keypair_beside(&cli_config) {
            Some(keypair) => keypair,
            None => {
                let keypair = HomeConfigPaths
                    .default_keypair_path()
                    .unwrap_or_else(|_| PathBuf::from("id.json"));
                info!(
                    "{} is not inside a solana cli/ directory; default payer is {}",
                    cli_config.display(),
                    keypair.display()
                );
                keypair
            }
        };
        Self {
            cli_config,
            keypair,
        }
    }
}

impl ConfigPathProvider for FixedConfigPaths {
    fn cli_config_path(&self) -> Result<PathBuf> {
        Ok(self.cli_config.clone())
    }

    fn default_keypair_path(&self) -> Result<PathBuf> {
        Ok(self.keypair.clone())
    }
}

fn keypair_beside(cli_config: &Path) -> Option<PathBuf> {
    let cli_dir = cli_config.parent()?;
    if cli_dir.file_name()? != "cli" {
        return None;
    }
    let solana_dir = cli_dir.parent()?;
    Some(solana_dir.join("id.json"))
}

/// The subset of the CLI config this crate reads. Other keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct CliConfigFile {
    json_rpc_url: Option<String>,
    keypair_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Local,
    Remote,
}

impl Endpoint {
    pub fn classify(json_rpc_url: &str) -> Self {
        if json_rpc_url == LOCAL_RPC_URL {
            Endpoint::Local
        } else {
            Endpoint::Remote
        }
    }

    pub fn delay(self) -> Duration {
        match self {
            Endpoint::Local => Duration::ZERO,
            Endpoint::Remote => REMOTE_DELAY,
        }
    }

    /// Metadata programs are not loaded into a bare local validator.
    pub fn skip_metadata(self) -> bool {
        self == Endpoint::Local
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Local => write!(f, "local"),
            Endpoint::Remote => write!(f, "remote"),
        }
    }
}

/// Connection and timing shared by every test in a run.
///
/// Build it once at startup with [`TestConfig::resolve`] and hand out
/// references.
pub struct TestConfig {
    connection: Arc<RpcClient>,
    json_rpc_url: String,
    endpoint: Endpoint,
    keypair_path: Option<PathBuf>,
}

impl TestConfig {
    pub fn resolve(provider: &dyn ConfigPathProvider) -> Result<Self> {
        let path = provider.cli_config_path()?;
        Self::load(&path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading CLI config from: {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        Self::from_yaml_str(&contents, path)
    }

    /// `source` is only used to label errors.
    pub fn from_yaml_str(contents: &str, source: &Path) -> Result<Self> {
        let file: CliConfigFile =
            serde_yaml::from_str(contents).map_err(|e| FixtureError::ConfigYaml {
                path: source.to_path_buf(),
                source: e,
            })?;

        let json_rpc_url = file
            .json_rpc_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| FixtureError::MissingRpcUrl {
                path: source.to_path_buf(),
            })?;

        let mut config = Self::from_rpc_url(json_rpc_url);
        config.keypair_path = file
            .keypair_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    pub fn from_rpc_url(json_rpc_url: impl Into<String>) -> Self {
        let json_rpc_url = json_rpc_url.into();
        let endpoint = Endpoint::classify(&json_rpc_url);
        info!(
            "Using {} endpoint {} (delay {}s)",
            endpoint,
            json_rpc_url,
            endpoint.delay().as_secs()
        );

        let connection = Arc::new(RpcClient::new_with_commitment(
            json_rpc_url.clone(),
            CommitmentConfig::confirmed(),
        ));

        Self {
            connection,
            json_rpc_url,
            endpoint,
            keypair_path: None,
        }
    }

    pub fn connection(&self) -> &Arc<RpcClient> {
        &self.connection
    }

    pub fn json_rpc_url(&self) -> &str {
        &self.json_rpc_url
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn delay(&self) -> Duration {
        self.endpoint.delay()
    }

    pub fn skip_metadata(&self) -> bool {
        self.endpoint.skip_metadata()
    }

    /// `keypair_path` from the CLI config, if it set one.
    pub fn keypair_path(&self) -> Option<&Path> {
        self.keypair_path.as_deref()
    }

    /// Waits [`TestConfig::delay`]. Returns at once against a local validator.
    pub async fn sleep(&self) {
        let delay = self.delay();
        if delay.is_zero() {
            return;
        }
        debug!("Sleeping {}s for {}", delay.as_secs(), self.json_rpc_url);
        tokio::time::sleep(delay).await;
    }
}

impl fmt::Debug for TestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestConfig")
            .field("json_rpc_url", &self.json_rpc_url)
            .field("endpoint", &self.endpoint)
            .field("keypair_path", &self.keypair_path)
            .finish_non_exhaustive()
    }
}
