//! Swap execution
//!
//! Allowance check, conditional approval and submission of the router call.
//! Steps run strictly in order: the swap depends on the approval being mined.

pub mod abi;

use crate::core::pricing::QuoteEngine;
use crate::domain::entities::{SwapReceipt, SwapRequest, SwapVariant, Token};
use crate::domain::repositories::WalletProvider;
use crate::infrastructure::config::SwapConfig;
use crate::shared::error::SwapError;
use crate::shared::types::{ContractCall, SwapResult};
use crate::shared::utils::{
    current_timestamp, format_fixed_with, from_base_units, generate_id, parse_address,
    parse_positive_amount, same_address, to_base_units,
};
use abi::ContractAbi;
use ethers::abi::Token as AbiToken;
use ethers::types::{Address as ChainAddress, TransactionRequest, TxHash, U256};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::Arc;

/// Executes token swaps through the router
pub struct SwapExecutor {
    provider: Arc<dyn WalletProvider>,
    quotes: Arc<QuoteEngine>,
    abi: ContractAbi,
    router: ChainAddress,
    wrapped_native_address: String,
    slippage_multiplier: Decimal,
    deadline_offset_secs: u64,
}

impl SwapExecutor {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        quotes: Arc<QuoteEngine>,
        config: &SwapConfig,
    ) -> SwapResult<Self> {
        config.validate()?;
        let router = parse_address(&config.router_address)
            .map_err(|e| SwapError::config(format!("Invalid router address: {}", e)))?;

        Ok(Self {
            provider,
            quotes,
            abi: ContractAbi::load()?,
            router,
            wrapped_native_address: config.wrapped_native_address.clone(),
            slippage_multiplier: config.slippage_multiplier(),
            deadline_offset_secs: config.deadline_offset_secs,
        })
    }

    /// Swap `from_amount` of `from` into `to` for `wallet`.
    ///
    /// Bad input comes back as `SwapError::Validation` before any chain call.
    /// Any later failure comes back as `SwapError::Execution`.
    pub async fn execute(
        &self,
        wallet: &str,
        from: &Token,
        to: &Token,
        from_amount: &str,
    ) -> SwapResult<SwapReceipt> {
        let (owner, amount_in) = self.validate(wallet, from, to, from_amount)?;

        log::info!(
            "Swapping {} {} for {} from {}",
            from_amount,
            from.symbol,
            to.symbol,
            wallet
        );

        match self.run(owner, wallet, from, to, from_amount, amount_in).await {
            Ok(receipt) => {
                log::info!("Swap {} confirmed: {:?}", receipt.request_id, receipt.transaction_hash);
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Swap {} -> {} failed: {}", from.symbol, to.symbol, e);
                Err(SwapError::execution(e.to_string()))
            }
        }
    }

    fn validate(
        &self,
        wallet: &str,
        from: &Token,
        to: &Token,
        from_amount: &str,
    ) -> SwapResult<(ChainAddress, U256)> {
        if wallet.is_empty() {
            return Err(SwapError::validation("Wallet not connected"));
        }
        let owner = parse_address(wallet)?;
        parse_address(&from.address)?;
        parse_address(&to.address)?;

        if same_address(&from.address, &to.address) {
            return Err(SwapError::validation("Cannot swap a token for itself"));
        }
        if parse_positive_amount(from_amount).is_none() {
            return Err(SwapError::validation("Amount must be greater than zero"));
        }

        let amount_in = to_base_units(from_amount, from.decimals)?;
        if amount_in.is_zero() {
            return Err(SwapError::validation("Amount must be greater than zero"));
        }

        Ok((owner, amount_in))
    }

    async fn run(
        &self,
        owner: ChainAddress,
        wallet: &str,
        from: &Token,
        to: &Token,
        from_amount: &str,
        amount_in: U256,
    ) -> SwapResult<SwapReceipt> {
        let from_native = from.is_native(&self.wrapped_native_address);
        let to_native = to.is_native(&self.wrapped_native_address);
        let from_contract = parse_address(&from.address)?;

        let approval_hash = if from_native {
            None
        } else {
            self.ensure_allowance(owner, from_contract, amount_in).await?
        };

        let quote = self
            .quotes
            .quote(from, to, from_amount)
            .await
            .ok_or_else(|| SwapError::internal("No quote available"))?;
        let min_amount_out = min_amount_out(&quote.to_amount, self.slippage_multiplier, to.decimals)?;

        let request = SwapRequest {
            id: generate_id(),
            wallet_address: wallet.to_string(),
            from_token: from.clone(),
            to_token: to.clone(),
            from_amount: from_amount.to_string(),
            amount_in,
            min_amount_out,
            deadline: current_timestamp() + self.deadline_offset_secs,
        };

        let variant = SwapVariant::select(from_native, to_native);
        let path = AbiToken::Array(
            request
                .path()
                .iter()
                .map(|hop| parse_address(hop).map(AbiToken::Address))
                .collect::<SwapResult<Vec<_>>>()?,
        );
        let deadline = AbiToken::Uint(U256::from(request.deadline));
        let args = match variant {
            SwapVariant::NativeIn => vec![
                AbiToken::Uint(request.min_amount_out),
                path,
                AbiToken::Address(owner),
                deadline,
            ],
            SwapVariant::NativeOut | SwapVariant::TokenToToken => vec![
                AbiToken::Uint(request.amount_in),
                AbiToken::Uint(request.min_amount_out),
                path,
                AbiToken::Address(owner),
                deadline,
            ],
        };

        let mut transaction = TransactionRequest::new()
            .from(owner)
            .to(self.router)
            .data(self.abi.encode_router(variant.method_name(), &args)?);
        if variant == SwapVariant::NativeIn {
            transaction = transaction.value(request.amount_in);
        }

        log::debug!(
            "Submitting {} for request {} (min out {} {}, deadline {})",
            variant.method_name(),
            request.id,
            from_base_units(request.min_amount_out, to.decimals),
            to.symbol,
            request.deadline
        );
        let transaction_hash = self.provider.send_transaction(transaction).await?;
        let confirmation = self.provider.wait(transaction_hash).await?;
        if !confirmation.is_success() {
            return Err(SwapError::contract(format!(
                "Swap transaction {:?} reverted",
                transaction_hash
            )));
        }

        Ok(SwapReceipt {
            request_id: request.id,
            transaction_hash,
            approval_hash,
            variant,
            amount_in: request.amount_in,
            min_amount_out: request.min_amount_out,
            deadline: request.deadline,
            quote,
        })
    }

    /// Approve the router for the maximum amount when the current allowance
    /// does not cover `amount_in`. Waits for the approval to be mined.
    async fn ensure_allowance(
        &self,
        owner: ChainAddress,
        token: ChainAddress,
        amount_in: U256,
    ) -> SwapResult<Option<TxHash>> {
        let data = self.abi.encode_erc20(
            "allowance",
            &[AbiToken::Address(owner), AbiToken::Address(self.router)],
        )?;
        let output = self.provider.read(ContractCall::new(token, data)).await?;
        let allowance = self
            .abi
            .decode_erc20("allowance", &output)?
            .into_iter()
            .next()
            .and_then(AbiToken::into_uint)
            .ok_or_else(|| SwapError::contract("Malformed allowance response"))?;

        if allowance >= amount_in {
            log::debug!("Allowance {} covers {}, skipping approval", allowance, amount_in);
            return Ok(None);
        }

        log::info!("Approving router to spend token {:?}", token);
        let data = self.abi.encode_erc20(
            "approve",
            &[AbiToken::Address(self.router), AbiToken::Uint(U256::MAX)],
        )?;
        let approval = TransactionRequest::new().from(owner).to(token).data(data);
        let hash = self.provider.send_transaction(approval).await?;
        let confirmation = self.provider.wait(hash).await?;
        if !confirmation.is_success() {
            return Err(SwapError::contract(format!("Approval transaction {:?} reverted", hash)));
        }

        Ok(Some(hash))
    }
}

/// Minimum acceptable output in base units: `to_amount` scaled by the
/// slippage multiplier, truncated to the token's precision.
pub fn min_amount_out(to_amount: &str, slippage_multiplier: Decimal, decimals: u8) -> SwapResult<U256> {
    let amount = Decimal::from_str(to_amount.trim())?;
    let minimum = amount
        .checked_mul(slippage_multiplier)
        .ok_or_else(|| SwapError::validation("Minimum output overflow"))?;

    to_base_units(
        &format_fixed_with(minimum, decimals as u32, RoundingStrategy::ToZero),
        decimals,
    )
}
