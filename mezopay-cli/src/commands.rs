//! Command implementations.
//!
//! Each command returns a JSON document; `main` prints it to stdout.

use std::path::Path;

use alloy_primitives::{Address, U256};
use mezopay::display::BalanceView;
use mezopay::{
    ConfigError, PaymentError, PaymentOutcome, PaymentRequest, PaymentStatus, QrCodeData,
    from_base_units, is_valid_address, to_base_units,
};
use mezopay_evm::{EvmLedgerError, WalletSession};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::{Cli, Command, GlobalArgs, RequestArgs};
use crate::error::CliError;

/// Result of a command that ran to completion.
#[derive(Debug)]
pub struct CommandOutput {
    /// JSON document to print.
    pub value: Value,
    /// `false` when the command finished but the payment failed.
    pub success: bool,
}

impl CommandOutput {
    fn ok(value: impl Serialize) -> Result<Self, CliError> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            success: true,
        })
    }
}

/// Runs the parsed command.
///
/// # Errors
///
/// Returns [`CliError`] when the command cannot produce a result.
pub async fn run(cli: Cli) -> Result<CommandOutput, CliError> {
    let Cli { global, command } = cli;
    match command {
        Command::Qr {
            request,
            svg,
            size,
        } => qr(&global, request, svg.as_deref(), size),
        Command::Parse { uri } => parse(&uri),
        Command::ToUnits { amount, decimals } => to_units(&amount, decimals),
        Command::FromUnits { value, decimals } => from_units(value, decimals),
        Command::Validate { address } => CommandOutput::ok(json!({
            "valid": is_valid_address(&address),
            "address": address,
        })),
        Command::Balance { address } => balance(&global, address).await,
        Command::Pay { request, no_wait } => pay(&global, request, no_wait).await,
    }
}

fn payment_request(global: &GlobalArgs, args: RequestArgs) -> Result<PaymentRequest, CliError> {
    let to = match args.to {
        Some(to) => to,
        None => global
            .merchant_address
            .ok_or(ConfigError::MissingMerchant)?
            .to_checksum(None),
    };
    Ok(PaymentRequest {
        to,
        amount: args.amount,
        memo: args.memo.filter(|m| !m.is_empty()),
        order_id: args.order_id.filter(|o| !o.is_empty()),
    })
}

fn wallet_session(global: &GlobalArgs) -> Result<WalletSession, CliError> {
    match global.private_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(WalletSession::from_private_key(key)
            .map_err(EvmLedgerError::from)?),
        _ => Ok(WalletSession::new()),
    }
}

fn qr(
    global: &GlobalArgs,
    args: RequestArgs,
    svg: Option<&Path>,
    size: u32,
) -> Result<CommandOutput, CliError> {
    let request = payment_request(global, args)?;
    request.validate()?;
    let data = QrCodeData::new(request);
    let mut value = serde_json::to_value(&data)?;

    if let (Some(target), Value::Object(fields)) = (svg, &mut value) {
        let rendered = data.to_svg(size)?;
        if target == Path::new("-") {
            fields.insert("svg".to_owned(), Value::String(rendered));
        } else {
            std::fs::write(target, rendered).map_err(|source| CliError::WriteFile {
                path: target.to_owned(),
                source,
            })?;
            tracing::info!(path = %target.display(), size, "Wrote QR code");
            fields.insert(
                "svgFile".to_owned(),
                Value::String(target.display().to_string()),
            );
        }
    }
    Ok(CommandOutput {
        value,
        success: true,
    })
}

fn parse(uri: &str) -> Result<CommandOutput, CliError> {
    let data = QrCodeData::parse(uri).ok_or_else(|| CliError::InvalidUri(uri.to_owned()))?;
    CommandOutput::ok(data)
}

fn to_units(amount: &str, decimals: u8) -> Result<CommandOutput, CliError> {
    let value = to_base_units(amount, decimals)?;
    CommandOutput::ok(json!({
        "amount": amount,
        "decimals": decimals,
        "baseUnits": value.to_string(),
    }))
}

fn from_units(value: U256, decimals: u8) -> Result<CommandOutput, CliError> {
    CommandOutput::ok(json!({
        "baseUnits": value.to_string(),
        "decimals": decimals,
        "amount": from_base_units(value, decimals),
    }))
}

async fn balance(global: &GlobalArgs, address: Option<Address>) -> Result<CommandOutput, CliError> {
    let sdk = mezopay_evm::connect(&global.config(), wallet_session(global)?)?;
    let owner = address
        .or_else(|| sdk.wallet().address)
        .ok_or(CliError::NoAccount)?;
    let balance = sdk.get_balance(owner).await?;
    CommandOutput::ok(json!({
        "network": sdk.network().name,
        "address": owner,
        "display": BalanceView::new(Some(&balance)).formatted,
        "balance": balance,
    }))
}

async fn pay(
    global: &GlobalArgs,
    args: RequestArgs,
    no_wait: bool,
) -> Result<CommandOutput, CliError> {
    let sdk = mezopay_evm::connect(&global.config(), wallet_session(global)?)?;
    let request = payment_request(global, args)?;
    request.validate()?;
    if !sdk.wallet().is_connected {
        return Err(PaymentError::WalletNotConnected.into());
    }

    match sdk.ledger().node_chain_id().await {
        Ok(chain_id) if chain_id != sdk.chain_id() => tracing::warn!(
            expected = sdk.chain_id(),
            actual = chain_id,
            "RPC endpoint serves a different chain"
        ),
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read chain ID from RPC endpoint"),
    }

    tracing::info!(
        network = sdk.network().name,
        to = %request.to,
        amount = %request.amount,
        "Sending MUSD payment"
    );
    let outcome = if no_wait {
        sdk.submit_payment(&request).await?
    } else {
        sdk.pay(&request).await
    };
    payment_report(sdk.network(), &outcome)
}

fn payment_report(
    network: &mezopay::networks::MezoNetwork,
    outcome: &PaymentOutcome,
) -> Result<CommandOutput, CliError> {
    let mut value = serde_json::to_value(outcome)?;
    if let (Some(hash), Value::Object(fields)) = (outcome.transaction_hash(), &mut value) {
        fields.insert(
            "explorerUrl".to_owned(),
            Value::String(network.explorer_tx_url(&hash)),
        );
    }
    Ok(CommandOutput {
        value,
        success: outcome.status() != PaymentStatus::Failed,
    })
}
