//! Constants for the swap core
//!
//! Contract-boundary defaults (overridable through `SwapConfig`), the
//! placeholder token and user-facing messages.

use rust_decimal::Decimal;

// Network
pub const DEFAULT_CHAIN_ID: u64 = 1; // Ethereum mainnet
pub const DEFAULT_RPC_URL: &str = "https://cloudflare-eth.com";

// Contracts
pub const DEFAULT_ROUTER_ADDRESS: &str = "0x66a9893cc07d91d95644aedd05d03f95e1dba8af";
pub const WRAPPED_NATIVE_ADDRESS: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

// Pricing
pub const BASIS_POINTS_DENOMINATOR: u32 = 10_000;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50; // 0.5%
pub const DEFAULT_FEE_MULTIPLIER: Decimal = Decimal::from_parts(992, 0, 0, false, 3); // 0.3% fee + 0.5% slippage
pub const ORACLE_QUOTE_DECIMALS: u32 = 9;
pub const DEFAULT_PRICE_FEED_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_PRICE_PLATFORM: &str = "ethereum";

// Fallback model for pairs missing from the table
pub const FALLBACK_DEFAULT_RATE_MIN: f64 = 0.8;
pub const FALLBACK_DEFAULT_RATE_SPAN: f64 = 0.4;

// Transactions
pub const DEFAULT_DEADLINE_OFFSET_SECS: u64 = 20 * 60;
pub const SUCCESS_RESET_DELAY_MS: u64 = 3_000;

// Network timeouts
pub const RPC_TIMEOUT: u64 = 30_000; // 30 seconds
pub const TRANSACTION_CONFIRMATION_TIMEOUT: u64 = 300_000; // 5 minutes

// Token metadata
pub const PLACEHOLDER_TOKEN_NAME: &str = "Unknown Token";
pub const PLACEHOLDER_TOKEN_SYMBOL: &str = "UNKNOWN";
pub const PLACEHOLDER_TOKEN_DECIMALS: u8 = 18;
pub const TOKEN_LOGO_BASE_URL: &str =
    "https://raw.githubusercontent.com/uniswap/assets/master/blockchains/ethereum/assets";

// Validation
pub const ADDRESS_LENGTH: usize = 42; // 0x + 40 hex chars

// User-facing messages
pub const INVALID_FORM_MESSAGE: &str = "Please fill in all fields correctly";
pub const INVALID_TOKEN_ADDRESS_MESSAGE: &str = "Please enter a valid token address";
pub const UNVERIFIED_TOKEN_MESSAGE: &str = "Token metadata could not be verified on-chain";
pub const SWAP_FAILED_MESSAGE: &str = "Swap failed. Please try again.";

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
