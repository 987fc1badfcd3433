//! Contract ABIs consumed by the swap core

use crate::shared::types::SwapResult;
use ethers::abi::{parse_abi, Abi, Function, Token};
use ethers::types::Bytes;

pub const ERC20_ABI: &[&str] = &[
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function decimals() view returns (uint8)",
    "function allowance(address owner, address spender) view returns (uint256)",
    "function approve(address spender, uint256 value) returns (bool)",
];

pub const ROUTER_ABI: &[&str] = &[
    "function swapExactETHForTokens(uint256 amountOutMin, address[] path, address to, uint256 deadline) payable returns (uint256[] amounts)",
    "function swapExactTokensForETH(uint256 amountIn, uint256 amountOutMin, address[] path, address to, uint256 deadline) returns (uint256[] amounts)",
    "function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] path, address to, uint256 deadline) returns (uint256[] amounts)",
];

/// Parsed ERC20 and router ABIs
#[derive(Debug, Clone)]
pub struct ContractAbi {
    erc20: Abi,
    router: Abi,
}

impl ContractAbi {
    pub fn load() -> SwapResult<Self> {
        Ok(Self {
            erc20: parse_abi(ERC20_ABI)?,
            router: parse_abi(ROUTER_ABI)?,
        })
    }

    pub fn erc20_function(&self, name: &str) -> SwapResult<&Function> {
        Ok(self.erc20.function(name)?)
    }

    pub fn router_function(&self, name: &str) -> SwapResult<&Function> {
        Ok(self.router.function(name)?)
    }

    pub fn encode_erc20(&self, name: &str, args: &[Token]) -> SwapResult<Bytes> {
        let data = self.erc20_function(name)?.encode_input(args)?;
        Ok(data.into())
    }

    pub fn decode_erc20(&self, name: &str, output: &[u8]) -> SwapResult<Vec<Token>> {
        Ok(self.erc20_function(name)?.decode_output(output)?)
    }

    pub fn encode_router(&self, name: &str, args: &[Token]) -> SwapResult<Bytes> {
        let data = self.router_function(name)?.encode_input(args)?;
        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, U256};

    #[test]
    fn test_selectors_match_erc20_standard() {
        let abi = ContractAbi::load().expect("Failed to parse ABIs");

        assert_eq!(abi.erc20_function("approve").expect("approve").short_signature(), [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(abi.erc20_function("allowance").expect("allowance").short_signature(), [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(abi.erc20_function("decimals").expect("decimals").short_signature(), [0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn test_router_selector() {
        let abi = ContractAbi::load().expect("Failed to parse ABIs");
        let function = abi.router_function("swapExactTokensForTokens").expect("router function");
        assert_eq!(function.short_signature(), [0x38, 0xed, 0x17, 0x39]);
    }

    #[test]
    fn test_encode_approve() {
        let abi = ContractAbi::load().expect("Failed to parse ABIs");
        let data = abi
            .encode_erc20("approve", &[Token::Address(Address::zero()), Token::Uint(U256::MAX)])
            .expect("Failed to encode approve");

        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn test_decode_decimals() {
        let abi = ContractAbi::load().expect("Failed to parse ABIs");
        let output = ethers::abi::encode(&[Token::Uint(U256::from(6u8))]);
        let decoded = abi.decode_erc20("decimals", &output).expect("Failed to decode");
        assert_eq!(decoded, vec![Token::Uint(U256::from(6u8))]);
    }

    #[test]
    fn test_unknown_function() {
        let abi = ContractAbi::load().expect("Failed to parse ABIs");
        assert!(abi.erc20_function("transferFrom").is_err());
    }
}
