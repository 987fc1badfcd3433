use tokenswap_core::{SwapConfig, NAME, VERSION};

fn main() {
    tokenswap_core::init();

    let config = match SwapConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("{} {} Configuration:\n", NAME, VERSION);
    println!("  Chain ID: {}", config.chain_id);
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Router Address: {}", config.router_address);
    println!("  Wrapped Native Address: {}", config.wrapped_native_address);
    println!("  Slippage Tolerance: {} bps", config.slippage_bps);
    println!("  Oracle Fee Multiplier: {}", config.fee_multiplier);
    println!("  Deadline Offset: {}s", config.deadline_offset_secs);
    println!("  Success Reset Delay: {}ms", config.success_reset_delay_ms);
    println!("  Price Feed: {} ({})", config.price_feed_url, config.price_platform);
    println!("  RPC Timeout: {}ms", config.rpc_timeout_ms);
    println!("  Confirmation Timeout: {}ms", config.confirmation_timeout_ms);
    println!(
        "  Private Key: {}",
        if std::env::var("TOKENSWAP_PRIVATE_KEY").is_ok() { "(set)" } else { "(not set)" }
    );
}
