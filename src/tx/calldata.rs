//! Claim input validation and calldata assembly.

use crate::config::AIRDROP_DISTRIBUTOR;
use crate::error::{ClaimError, ClaimResult};

use ethers::abi::{encode, Token};
use ethers::types::{Address, Bytes, U256};
use ethers::utils::{id, to_checksum};

/// A validated claim: the vault proxy to call and the raw payload the proxy
/// forwards to the distributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub vault: Address,
    pub payload: Bytes,
}

impl ClaimRequest {
    /// Validate raw user input into a submittable claim.
    pub fn parse(vault_input: &str, payload_input: &str) -> ClaimResult<Self> {
        Ok(Self {
            vault: parse_vault_address(vault_input)?,
            payload: parse_payload(payload_input)?,
        })
    }

    /// Full calldata for the vault proxy: `execute(distributor, 0, payload)`.
    pub fn calldata(&self) -> Bytes {
        let selector = id("execute(address,uint256,bytes)");
        let args = encode(&[
            Token::Address(AIRDROP_DISTRIBUTOR),
            Token::Uint(U256::zero()),
            Token::Bytes(self.payload.to_vec()),
        ]);

        let mut calldata = Vec::with_capacity(4 + args.len());
        calldata.extend_from_slice(&selector);
        calldata.extend_from_slice(&args);
        Bytes::from(calldata)
    }
}

/// Parse an address, enforcing the EIP-55 checksum when the input mixes
/// upper- and lowercase hex. All-lowercase and all-uppercase inputs carry no
/// checksum and are accepted as-is.
fn parse_vault_address(input: &str) -> ClaimResult<Address> {
    let input = input.trim();
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_address());
    }

    let address: Address = digits.parse().map_err(|_| invalid_address())?;

    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        let expected = to_checksum(&address, None);
        if &expected[2..] != digits {
            return Err(invalid_address());
        }
    }

    Ok(address)
}

fn invalid_address() -> ClaimError {
    ClaimError::InvalidInput("Please enter a valid vault address".into())
}

fn parse_payload(input: &str) -> ClaimResult<Bytes> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ClaimError::InvalidInput("Please enter the claim data".into()));
    }
    let digits = match input.strip_prefix("0x") {
        Some(d) => d,
        None => return Err(ClaimError::InvalidInput("Data must start with 0x".into())),
    };
    if digits.is_empty() {
        return Err(ClaimError::InvalidInput(
            "Data must include the claim payload after 0x".into(),
        ));
    }
    let bytes = hex::decode(digits)
        .map_err(|_| ClaimError::InvalidInput("Data must be hex-encoded bytes".into()))?;
    Ok(Bytes::from(bytes))
}
