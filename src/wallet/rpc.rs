//! Typed wrappers over the wallet's JSON-RPC methods.

use crate::config::RequiredNetwork;
use crate::wallet::provider::{WalletError, WalletProvider};

use ethers::types::{Address, Bytes, TransactionReceipt, TxHash, U256, U64};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Call parameters for gas estimation and transaction submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl AddChainParams {
    /// Registration payload for a network the wallet does not know yet.
    pub fn from_network(network: &RequiredNetwork) -> Self {
        Self {
            chain_id: network.chain_id_hex(),
            chain_name: network.name.to_string(),
            native_currency: NativeCurrency {
                name: network.currency_name.to_string(),
                symbol: network.currency_symbol.to_string(),
                decimals: network.currency_decimals,
            },
            rpc_urls: vec![network.rpc_url.to_string()],
            block_explorer_urls: vec![network.explorer_url.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams<'a> {
    chain_id: &'a str,
}

/// Ask the wallet for the accounts it is willing to transact with.
pub async fn request_accounts<W>(wallet: &W) -> Result<Vec<Address>, WalletError>
where
    W: WalletProvider + ?Sized,
{
    let raw = wallet.request("eth_requestAccounts", json!([])).await?;
    decode(raw)
}

/// Chain the wallet is currently on.
pub async fn chain_id<W>(wallet: &W) -> Result<u64, WalletError>
where
    W: WalletProvider + ?Sized,
{
    let raw = wallet.request("eth_chainId", json!([])).await?;
    let id: U64 = decode(raw)?;
    Ok(id.as_u64())
}

/// Ask the wallet to move to the chain with the given hex id.
pub async fn switch_chain<W>(wallet: &W, chain_id_hex: &str) -> Result<(), WalletError>
where
    W: WalletProvider + ?Sized,
{
    wallet
        .request(
            "wallet_switchEthereumChain",
            json!([SwitchChainParams {
                chain_id: chain_id_hex
            }]),
        )
        .await?;
    Ok(())
}

/// Register a network with the wallet.
pub async fn add_chain<W>(wallet: &W, network: &RequiredNetwork) -> Result<(), WalletError>
where
    W: WalletProvider + ?Sized,
{
    wallet
        .request(
            "wallet_addEthereumChain",
            json!([AddChainParams::from_network(network)]),
        )
        .await?;
    Ok(())
}

/// Dry-run the call and return the wallet's gas estimate.
pub async fn estimate_gas<W>(wallet: &W, tx: &TxParams) -> Result<U256, WalletError>
where
    W: WalletProvider + ?Sized,
{
    let raw = wallet.request("eth_estimateGas", json!([tx])).await?;
    decode(raw)
}

/// Hand the transaction to the wallet for signing and broadcast.
pub async fn send_transaction<W>(wallet: &W, tx: &TxParams) -> Result<TxHash, WalletError>
where
    W: WalletProvider + ?Sized,
{
    let raw = wallet.request("eth_sendTransaction", json!([tx])).await?;
    decode(raw)
}

/// Receipt for a broadcast transaction, `None` while still pending.
pub async fn transaction_receipt<W>(
    wallet: &W,
    hash: TxHash,
) -> Result<Option<TransactionReceipt>, WalletError>
where
    W: WalletProvider + ?Sized,
{
    let raw = wallet.request("eth_getTransactionReceipt", json!([hash])).await?;
    decode(raw)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, WalletError> {
    serde_json::from_value(value).map_err(|e| WalletError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUIRED_NETWORK;
    use crate::wallet::provider::MockWalletProvider;
    use std::str::FromStr;

    #[tokio::test]
    async fn chain_id_parses_hex_quantity() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .withf(|method, params| method == "eth_chainId" && params == &json!([]))
            .returning(|_, _| Ok(json!("0x2105")));

        assert_eq!(chain_id(&wallet).await.unwrap(), 8453);
    }

    #[tokio::test]
    async fn switch_chain_sends_eip3326_params() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .withf(|method, params| {
                method == "wallet_switchEthereumChain"
                    && params == &json!([{ "chainId": "0x2105" }])
            })
            .returning(|_, _| Ok(Value::Null));

        switch_chain(&wallet, "0x2105").await.unwrap();
    }

    #[tokio::test]
    async fn add_chain_sends_full_network_definition() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .withf(|method, params| {
                method == "wallet_addEthereumChain"
                    && params
                        == &json!([{
                            "chainId": "0x2105",
                            "chainName": "Base",
                            "nativeCurrency": { "name": "ETH", "symbol": "ETH", "decimals": 18 },
                            "rpcUrls": ["https://mainnet.base.org"],
                            "blockExplorerUrls": ["https://basescan.org"],
                        }])
            })
            .returning(|_, _| Ok(Value::Null));

        add_chain(&wallet, &REQUIRED_NETWORK).await.unwrap();
    }

    #[tokio::test]
    async fn tx_params_serialize_in_wallet_shape() {
        let tx = TxParams {
            from: Address::from_str("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").unwrap(),
            to: Address::from_str("0x0bd4078e15eea5ac22a0e6f215c27286920fda1a").unwrap(),
            data: Bytes::from_str("0x1234").unwrap(),
        };

        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .withf(|method, params| {
                method == "eth_estimateGas"
                    && params
                        == &json!([{
                            "from": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                            "to": "0x0bd4078e15eea5ac22a0e6f215c27286920fda1a",
                            "data": "0x1234",
                        }])
            })
            .returning(|_, _| Ok(json!("0x5208")));

        let gas = estimate_gas(&wallet, &tx).await.unwrap();
        assert_eq!(gas, U256::from(21_000u64));
    }

    #[tokio::test]
    async fn pending_receipt_is_none() {
        let hash = TxHash::from_str(
            "0x1111111111111111111111111111111111111111111111111111111111111111",
        )
        .unwrap();

        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .withf(move |method, params| {
                method == "eth_getTransactionReceipt" && params == &json!([hash])
            })
            .returning(|_, _| Ok(Value::Null));

        assert!(transaction_receipt(&wallet, hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_response_is_a_decode_error() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_request()
            .returning(|_, _| Ok(json!({ "not": "a chain id" })));

        let err = chain_id(&wallet).await.unwrap_err();
        assert!(matches!(err, WalletError::Decode(_)));
    }
}
