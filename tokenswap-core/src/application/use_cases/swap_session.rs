//! Swap form session
//!
//! Holds the state an external UI renders and publishes every change as a
//! `SwapSnapshot` on a watch channel.

use crate::core::lifecycle::{SwapStateMachine, SwapStatus};
use crate::core::pricing::QuoteEngine;
use crate::core::tokens::{ResolvedToken, TokenMetadataResolver};
use crate::core::transactions::SwapExecutor;
use crate::domain::entities::{Quote, SwapOutcome, SwapReceipt, Token};
use crate::domain::repositories::WalletProvider;
use crate::infrastructure::config::SwapConfig;
use crate::shared::constants::{
    INVALID_FORM_MESSAGE, INVALID_TOKEN_ADDRESS_MESSAGE, SWAP_FAILED_MESSAGE,
    UNVERIFIED_TOKEN_MESSAGE,
};
use crate::shared::error::SwapError;
use crate::shared::types::{Address, SwapResult};
use crate::shared::utils::{parse_positive_amount, to_base_units};
use ethers::types::TxHash;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenSide {
    From,
    To,
}

/// Everything the UI needs to render the swap form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSnapshot {
    pub wallet_address: Option<Address>,
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub from_amount: String,
    pub to_amount: String,
    pub quote: Option<Quote>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub status: SwapStatus,
    pub last_transaction: Option<TxHash>,
}

#[derive(Default)]
struct SessionState {
    view: SwapSnapshot,
    machine: SwapStateMachine,
    quote_generation: u64,
    /// Selected token whose metadata could not be read
    unverified: Option<Token>,
}

impl SessionState {
    fn select(&mut self, side: TokenSide, token: Token) {
        let view = &mut self.view;
        match side {
            TokenSide::From => {
                if view.to_token.as_ref() == Some(&token) {
                    view.to_token = view.from_token.take();
                }
                view.from_token = Some(token);
            }
            TokenSide::To => {
                if view.from_token.as_ref() == Some(&token) {
                    view.from_token = view.to_token.take();
                }
                view.to_token = Some(token);
            }
        }
    }

    /// The warning stays only while the unverified token is on the form
    fn sync_warning(&mut self) {
        let view = &mut self.view;
        let on_form = self.unverified.as_ref().is_some_and(|token| {
            view.from_token.as_ref() == Some(token) || view.to_token.as_ref() == Some(token)
        });
        if on_form {
            view.warning = Some(UNVERIFIED_TOKEN_MESSAGE.to_string());
        } else {
            self.unverified = None;
            view.warning = None;
        }
    }

    fn quotable_inputs(&self) -> Option<(Token, Token, String)> {
        let view = &self.view;
        parse_positive_amount(&view.from_amount)?;
        Some((
            view.from_token.clone()?,
            view.to_token.clone()?,
            view.from_amount.clone(),
        ))
    }

    fn submittable_inputs(&self) -> Option<(Address, Token, Token, String)> {
        let wallet = self.view.wallet_address.clone()?;
        let (from, to, amount) = self.quotable_inputs()?;
        to_base_units(&amount, from.decimals).ok()?;
        Some((wallet, from, to, amount))
    }
}

struct SessionInner {
    quotes: Arc<QuoteEngine>,
    executor: SwapExecutor,
    resolver: TokenMetadataResolver,
    provider: Arc<dyn WalletProvider>,
    reset_delay: Duration,
    state: Mutex<SessionState>,
    updates: watch::Sender<SwapSnapshot>,
}

impl SessionInner {
    fn publish(&self, state: &mut SessionState) {
        state.view.status = state.machine.status();
        self.updates.send_replace(state.view.clone());
    }

    async fn reset_after_success(&self, attempt: u64) {
        let mut state = self.state.lock().await;
        if state.machine.reset_after_success(attempt) {
            log::debug!("Resetting swap form after attempt {}", attempt);
            state.view.from_amount.clear();
            state.view.to_amount.clear();
            state.view.quote = None;
            state.quote_generation += 1;
            self.publish(&mut state);
        }
    }
}

/// UI-facing swap session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SwapSession {
    inner: Arc<SessionInner>,
}

impl SwapSession {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        quotes: Arc<QuoteEngine>,
        config: &SwapConfig,
    ) -> SwapResult<Self> {
        let executor = SwapExecutor::new(provider.clone(), quotes.clone(), config)?;
        let resolver = TokenMetadataResolver::new(provider.clone())?;
        let (updates, _) = watch::channel(SwapSnapshot::default());

        Ok(Self {
            inner: Arc::new(SessionInner {
                quotes,
                executor,
                resolver,
                provider,
                reset_delay: config.success_reset_delay(),
                state: Mutex::new(SessionState::default()),
                updates,
            }),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SwapSnapshot> {
        self.inner.updates.subscribe()
    }

    pub fn snapshot(&self) -> SwapSnapshot {
        self.inner.updates.borrow().clone()
    }

    /// Use the wallet's first account
    pub async fn connect_wallet(&self) -> SwapResult<Address> {
        let accounts = self.inner.provider.request_accounts().await;
        let mut state = self.inner.state.lock().await;

        let account = match accounts {
            Ok(accounts) => accounts
                .first()
                .map(|account| ethers::utils::to_checksum(account, None))
                .ok_or_else(|| SwapError::validation("Wallet exposed no accounts")),
            Err(e) => Err(e),
        };

        match &account {
            Ok(address) => {
                log::info!("Wallet connected: {}", address);
                state.view.wallet_address = Some(address.clone());
            }
            Err(e) => {
                log::warn!("Wallet connection failed: {}", e);
                state.view.error = Some(e.to_string());
            }
        }
        self.inner.publish(&mut state);
        account
    }

    pub async fn set_wallet(&self, wallet: Option<Address>) {
        let mut state = self.inner.state.lock().await;
        state.view.wallet_address = wallet;
        self.inner.publish(&mut state);
    }

    pub async fn select_from_token(&self, token: Token) -> Option<Quote> {
        self.select(TokenSide::From, token, false).await
    }

    pub async fn select_to_token(&self, token: Token) -> Option<Quote> {
        self.select(TokenSide::To, token, false).await
    }

    /// Resolve a custom token address and select it on `side`.
    ///
    /// A malformed address leaves the form untouched apart from the error
    /// message. A token whose metadata could not be read is still selected,
    /// with a warning.
    pub async fn add_custom_token(&self, side: TokenSide, address: &str) -> SwapResult<ResolvedToken> {
        let resolved = match self.inner.resolver.resolve(address.trim()).await {
            Ok(resolved) => resolved,
            Err(e) => {
                log::debug!("Rejected custom token {}: {}", address, e);
                let mut state = self.inner.state.lock().await;
                state.view.error = Some(INVALID_TOKEN_ADDRESS_MESSAGE.to_string());
                self.inner.publish(&mut state);
                return Err(e);
            }
        };

        self.select(side, resolved.token.clone(), !resolved.is_resolved()).await;
        Ok(resolved)
    }

    pub async fn set_from_amount(&self, amount: impl Into<String>) -> Option<Quote> {
        {
            let mut state = self.inner.state.lock().await;
            state.view.from_amount = amount.into();
            state.view.error = None;
        }
        self.refresh_quote().await
    }

    /// Swap the two sides, carrying the current output over as the new input
    pub async fn switch_tokens(&self) -> Option<Quote> {
        {
            let mut state = self.inner.state.lock().await;
            let view = &mut state.view;
            std::mem::swap(&mut view.from_token, &mut view.to_token);
            std::mem::swap(&mut view.from_amount, &mut view.to_amount);
            view.error = None;
        }
        self.refresh_quote().await
    }

    /// Re-quote the current inputs.
    ///
    /// Only the most recently started request may update the form; a result
    /// that arrives after newer input is dropped and `None` is returned.
    pub async fn refresh_quote(&self) -> Option<Quote> {
        let (generation, (from, to, amount)) = {
            let mut state = self.inner.state.lock().await;
            state.quote_generation += 1;
            let generation = state.quote_generation;

            match state.quotable_inputs() {
                Some(inputs) => {
                    state.view.is_loading = true;
                    self.inner.publish(&mut state);
                    (generation, inputs)
                }
                None => {
                    state.view.to_amount.clear();
                    state.view.quote = None;
                    state.view.is_loading = false;
                    self.inner.publish(&mut state);
                    return None;
                }
            }
        };

        let quote = self.inner.quotes.quote(&from, &to, &amount).await;

        let mut state = self.inner.state.lock().await;
        if state.quote_generation != generation {
            log::debug!(
                "Discarding stale quote for {} {} -> {} (generation {} < {})",
                amount,
                from.symbol,
                to.symbol,
                generation,
                state.quote_generation
            );
            return None;
        }

        state.view.is_loading = false;
        state.view.to_amount = quote
            .as_ref()
            .map(|quote| quote.to_amount.clone())
            .unwrap_or_default();
        state.view.quote = quote.clone();
        self.inner.publish(&mut state);
        quote
    }

    /// "1 FROM ≈ rate TO" for the current quote
    pub fn exchange_rate(&self) -> Option<String> {
        let quote = self.snapshot().quote?;
        let rate = quote.rate()?;
        Some(format!("1 {} ≈ {} {}", quote.from_token.symbol, rate, quote.to_token.symbol))
    }

    pub async fn can_submit(&self) -> bool {
        let state = self.inner.state.lock().await;
        state.submittable_inputs().is_some() && !state.view.is_loading && !state.machine.is_pending()
    }

    /// Run a swap with the current form values.
    ///
    /// Incomplete input leaves the status unchanged and returns a validation
    /// error. Otherwise the status moves to `pending` and lands in `success`
    /// or `error`; a success returns to `idle` after the reset delay.
    pub async fn submit(&self) -> SwapResult<SwapReceipt> {
        let (attempt, (wallet, from, to, amount)) = {
            let mut state = self.inner.state.lock().await;
            let inputs = match state.submittable_inputs() {
                Some(inputs) => inputs,
                None => {
                    state.view.error = Some(INVALID_FORM_MESSAGE.to_string());
                    self.inner.publish(&mut state);
                    return Err(SwapError::validation(INVALID_FORM_MESSAGE));
                }
            };
            let attempt = state.machine.begin()?;
            state.view.error = None;
            self.inner.publish(&mut state);
            (attempt, inputs)
        };

        let result = self.inner.executor.execute(&wallet, &from, &to, &amount).await;
        let outcome = SwapOutcome::from(result.clone());

        {
            let mut state = self.inner.state.lock().await;
            state.machine.finish(attempt, &outcome);
            match &outcome {
                SwapOutcome::Confirmed(receipt) => {
                    state.view.last_transaction = Some(receipt.transaction_hash);
                }
                SwapOutcome::Failed(e) => {
                    log::warn!("Swap attempt {} failed: {}", attempt, e);
                    state.view.error = Some(SWAP_FAILED_MESSAGE.to_string());
                }
            }
            self.inner.publish(&mut state);
        }

        if outcome.is_success() {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                tokio::time::sleep(inner.reset_delay).await;
                inner.reset_after_success(attempt).await;
            });
        }

        result
    }

    async fn select(&self, side: TokenSide, token: Token, unverified: bool) -> Option<Quote> {
        {
            let mut state = self.inner.state.lock().await;
            if unverified {
                state.unverified = Some(token.clone());
            } else if state.unverified.as_ref() == Some(&token) {
                state.unverified = None;
            }
            state.select(side, token);
            state.sync_warning();
            state.view.error = None;
        }
        self.refresh_quote().await
    }
}
