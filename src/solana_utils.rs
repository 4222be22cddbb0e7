use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;

use crate::error::{FixtureError, Result};

/// Fetches `program_id` and checks it holds a deployed program.
pub async fn verify_program_deployed(rpc: &RpcClient, program_id: &Pubkey) -> Result<Account> {
    debug!("Fetching program account {}", program_id);
    let account = rpc
        .get_account(program_id)
        .await
        .map_err(|e| FixtureError::Rpc {
            address: *program_id,
            reason: e.to_string(),
        })?;

    if !account.executable {
        return Err(FixtureError::NotExecutable {
            address: *program_id,
        });
    }
    Ok(account)
}
