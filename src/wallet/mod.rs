//! Wallet connectivity.

pub mod connector;
pub mod provider;
pub mod rpc;

pub use connector::{connect, ConnectedAccount};
pub use provider::{HttpWallet, WalletError, WalletProvider};
