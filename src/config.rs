//! Fixed network and contract configuration.
//!
//! The claim targets exactly one chain and one downstream contract, so the
//! configuration is compile-time constants rather than a loaded file.

use ethers::types::{Address, TxHash, H160};

/// The network the claim transaction must be submitted on.
#[derive(Debug, Clone, Copy)]
pub struct RequiredNetwork {
    pub chain_id: u64,
    pub name: &'static str,
    pub currency_name: &'static str,
    pub currency_symbol: &'static str,
    pub currency_decimals: u8,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
}

/// Base mainnet.
pub const REQUIRED_NETWORK: RequiredNetwork = RequiredNetwork {
    chain_id: 8453,
    name: "Base",
    currency_name: "ETH",
    currency_symbol: "ETH",
    currency_decimals: 18,
    rpc_url: "https://mainnet.base.org",
    explorer_url: "https://basescan.org",
};

/// The airdrop distributor every claim is forwarded to by the vault proxy.
pub const AIRDROP_DISTRIBUTOR: Address = H160([
    0x0b, 0xd4, 0x07, 0x8e, 0x15, 0xee, 0xa5, 0xac, 0x22, 0xa0, 0xe6, 0xf2, 0x15, 0xc2, 0x72,
    0x86, 0x92, 0x0f, 0xda, 0x1a,
]);

/// Default wallet provider endpoint (Frame's local JSON-RPC listener).
pub const DEFAULT_WALLET_ENDPOINT: &str = "http://127.0.0.1:1248";

impl RequiredNetwork {
    /// Chain id as the 0x-prefixed hex quantity wallets exchange.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Whether a reported chain id matches this network.
    pub fn matches(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }

    /// Block-explorer URL for a transaction hash.
    pub fn tx_url(&self, hash: TxHash) -> String {
        format!("{}/tx/{:#x}", self.explorer_url, hash)
    }
}
