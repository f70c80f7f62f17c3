//! Wallet connection flow.
//!
//! Requests account access, then moves the wallet onto the required network,
//! registering the network first when the wallet does not know it.

use crate::config::REQUIRED_NETWORK;
use crate::error::{ClaimError, ClaimResult};
use crate::wallet::provider::{WalletError, WalletProvider};
use crate::wallet::rpc;

use ethers::types::Address;
use ethers::utils::to_checksum;
use tracing::{debug, info};

/// Identity the wallet agreed to transact with, on the required network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub address: Address,
}

impl ConnectedAccount {
    /// EIP-55 rendering of the account address.
    pub fn checksummed(&self) -> String {
        to_checksum(&self.address, None)
    }
}

/// Connect to the wallet and leave it on the required network.
///
/// A transport failure on the very first request means no wallet is
/// listening at the endpoint at all.
pub async fn connect<W>(wallet: &W, endpoint: &str) -> ClaimResult<ConnectedAccount>
where
    W: WalletProvider + ?Sized,
{
    let accounts = rpc::request_accounts(wallet)
        .await
        .map_err(|e| ClaimError::at_first_request(e, endpoint))?;
    let address = accounts
        .first()
        .copied()
        .ok_or_else(|| ClaimError::Internal("wallet returned no accounts".into()))?;
    debug!("Wallet granted access to {}", to_checksum(&address, None));

    let current = rpc::chain_id(wallet).await?;
    if REQUIRED_NETWORK.matches(current) {
        debug!("Wallet already on chain {}", current);
    } else {
        info!(
            "Switching wallet from chain {} to chain {}",
            current, REQUIRED_NETWORK.chain_id
        );
        ensure_network(wallet).await?;
    }

    Ok(ConnectedAccount { address })
}

/// Switch the wallet to the required network, registering it on code 4902.
async fn ensure_network<W>(wallet: &W) -> ClaimResult<()>
where
    W: WalletProvider + ?Sized,
{
    let chain_hex = REQUIRED_NETWORK.chain_id_hex();
    match rpc::switch_chain(wallet, &chain_hex).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_unrecognized_chain() => {
            info!(
                "Wallet does not know {}, registering it",
                REQUIRED_NETWORK.name
            );
            rpc::add_chain(wallet, &REQUIRED_NETWORK)
                .await
                .map_err(chain_switch)?;
            rpc::switch_chain(wallet, &chain_hex)
                .await
                .map_err(chain_switch)?;
            Ok(())
        }
        Err(e) => Err(chain_switch(e)),
    }
}

fn chain_switch(source: WalletError) -> ClaimError {
    ClaimError::ChainSwitch {
        network: REQUIRED_NETWORK.name,
        source,
    }
}
