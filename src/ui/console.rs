//! Console command loop and rendering.

use super::FormState;
use crate::config::{AIRDROP_DISTRIBUTOR, REQUIRED_NETWORK};
use crate::error::{ClaimError, ClaimResult};
use crate::tx::{self, ClaimRequest};
use crate::wallet::{self, ConnectedAccount, WalletProvider};

use ethers::types::TxHash;
use ethers::utils::to_checksum;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

/// Interactive claim console.
///
/// Commands run to completion one at a time; the wallet is never asked to do
/// two things at once.
pub struct Console<W, Out> {
    wallet: W,
    endpoint: String,
    out: Out,
    form: FormState,
    connected: Option<ConnectedAccount>,
    submitted: Option<TxHash>,
}

impl<W, Out> Console<W, Out>
where
    W: WalletProvider,
    Out: Write,
{
    pub fn new(wallet: W, endpoint: impl Into<String>, out: Out) -> Self {
        Self {
            wallet,
            endpoint: endpoint.into(),
            out,
            form: FormState::Idle,
            connected: None,
            submitted: None,
        }
    }

    /// Read commands until EOF or `quit`.
    pub async fn run<R>(&mut self, input: R) -> ClaimResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.render_banner()?;
        let mut lines = input.lines();

        loop {
            self.prompt("> ")?;
            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            match line.trim() {
                "" => continue,
                "connect" => self.handle_connect().await?,
                "claim" => {
                    self.prompt("Vault address: ")?;
                    let vault = match lines.next_line().await? {
                        Some(line) => line,
                        None => break,
                    };
                    self.prompt("Claim data: ")?;
                    let data = match lines.next_line().await? {
                        Some(line) => line,
                        None => break,
                    };
                    self.handle_claim(&vault, &data).await?;
                }
                "status" => self.render_status()?,
                "help" => self.render_help()?,
                "quit" | "exit" => break,
                other => {
                    writeln!(
                        self.out,
                        "Unknown command: {}. Type 'help' for commands.",
                        other
                    )?
                }
            }
        }

        writeln!(self.out, "Goodbye.")?;
        Ok(())
    }

    /// Connect the wallet and move it to the required network.
    async fn handle_connect(&mut self) -> ClaimResult<()> {
        self.form = FormState::Submitting;
        writeln!(self.out, "Connecting to wallet at {}...", self.endpoint)?;

        match wallet::connect(&self.wallet, &self.endpoint).await {
            Ok(account) => {
                self.connected = Some(account);
                self.form = FormState::Success {
                    notice: "Wallet connected successfully!".into(),
                };
                self.alert("Wallet connected successfully!")?;
                writeln!(self.out, "Connected account: {}", account.checksummed())?;
            }
            Err(err) => self.fail(err)?,
        }
        Ok(())
    }

    /// Validate the inputs, submit the claim, and wait for it to land.
    async fn handle_claim(&mut self, vault_input: &str, data_input: &str) -> ClaimResult<()> {
        // Each attempt starts from a clean slate.
        self.form = FormState::Submitting;
        self.submitted = None;

        let request = match ClaimRequest::parse(vault_input, data_input) {
            Ok(request) => request,
            Err(err) => return self.fail(err),
        };

        writeln!(
            self.out,
            "Submitting claim through vault {}...",
            to_checksum(&request.vault, None)
        )?;
        let hash = match tx::submit(&self.wallet, &self.endpoint, &request).await {
            Ok(hash) => hash,
            Err(err) => return self.fail(err),
        };
        self.submitted = Some(hash);

        // The hash is shown as soon as the wallet reports it, before the
        // transaction has landed.
        writeln!(self.out, "Transaction sent: {:#x}", hash)?;
        writeln!(self.out, "Track it at {}", REQUIRED_NETWORK.tx_url(hash))?;
        writeln!(self.out, "Waiting for confirmation...")?;

        match tx::confirm(&self.wallet, hash).await {
            Ok(_receipt) => {
                self.form = FormState::Success {
                    notice: "Transaction successful!".into(),
                };
                self.alert("Transaction successful!")
            }
            Err(err) => self.fail(err),
        }
    }

    /// Record a failed attempt and show its message.
    fn fail(&mut self, err: ClaimError) -> ClaimResult<()> {
        error!("Action failed: {}", err);
        if let Some(code) = err.provider_code() {
            debug!("Provider error code: {}", code);
        }

        let message = err.to_string();
        self.form = FormState::Failed {
            message: message.clone(),
        };
        self.alert(&message)
    }

    fn alert(&mut self, message: &str) -> ClaimResult<()> {
        writeln!(self.out, "*** {}", message)?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> ClaimResult<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_banner(&mut self) -> ClaimResult<()> {
        writeln!(self.out, "Definitive $VVV Airdrop Claim")?;
        writeln!(
            self.out,
            "Network: {} (chain id {})",
            REQUIRED_NETWORK.name, REQUIRED_NETWORK.chain_id
        )?;
        writeln!(
            self.out,
            "Distributor: {}",
            to_checksum(&AIRDROP_DISTRIBUTOR, None)
        )?;
        writeln!(self.out, "Type 'help' for commands.")?;
        Ok(())
    }

    fn render_help(&mut self) -> ClaimResult<()> {
        writeln!(self.out, "Commands:")?;
        writeln!(
            self.out,
            "  connect  Connect the wallet and switch it to {}",
            REQUIRED_NETWORK.name
        )?;
        writeln!(
            self.out,
            "  claim    Submit the airdrop claim through your Base vault proxy"
        )?;
        writeln!(
            self.out,
            "           Make sure your claim data starts with 0x and matches"
        )?;
        writeln!(self.out, "           the format provided by Definitive")?;
        writeln!(self.out, "  status   Show the connected account and last claim")?;
        writeln!(self.out, "  quit     Exit")?;
        Ok(())
    }

    fn render_status(&mut self) -> ClaimResult<()> {
        match self.connected {
            Some(account) => {
                writeln!(self.out, "Connected account: {}", account.checksummed())?
            }
            None => writeln!(self.out, "Not connected. Run 'connect' first.")?,
        }
        if let Some(hash) = self.submitted {
            writeln!(self.out, "Last claim: {}", REQUIRED_NETWORK.tx_url(hash))?;
        }
        let state = match &self.form {
            FormState::Idle => "idle".to_string(),
            FormState::Submitting => "submitting".to_string(),
            FormState::Success { notice } => format!("success ({})", notice),
            FormState::Failed { message } => format!("failed ({})", message),
        };
        writeln!(self.out, "State: {}", state)?;
        Ok(())
    }
}
