use anyhow::{anyhow, Context, Result};
use std::env;
use tokenswap_core::{build_quote_engine, find_common_token, SwapConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tokenswap_core::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [from, to, amount] = args.as_slice() else {
        return Err(anyhow!("Usage: quote <FROM_SYMBOL> <TO_SYMBOL> <AMOUNT>"));
    };

    let from_token = find_common_token(from).with_context(|| format!("Unknown token symbol: {}", from))?;
    let to_token = find_common_token(to).with_context(|| format!("Unknown token symbol: {}", to))?;

    let config = SwapConfig::from_env()?;
    let engine = build_quote_engine(&config)?;

    let quote = engine
        .quote(&from_token, &to_token, amount)
        .await
        .ok_or_else(|| anyhow!("Amount must be a positive number, got '{}'", amount))?;

    println!("{} {} -> {} {} ({:?})", quote.from_amount, from_token.symbol, quote.to_amount, to_token.symbol, quote.source);
    if let Some(rate) = quote.rate() {
        println!("1 {} ≈ {} {}", from_token.symbol, rate, to_token.symbol);
    }
    Ok(())
}
