//! Solidity interface of the MUSD token.

use alloy_sol_types::sol;

sol! {
    /// ERC-20 subset used for MUSD balances and payments.
    ///
    /// Reference: <https://eips.ethereum.org/EIPS/eip-20>
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address, hex};
    use alloy_sol_types::SolCall;

    #[test]
    fn test_transfer_selector() {
        assert_eq!(IERC20::transferCall::SIGNATURE, "transfer(address,uint256)");
        assert_eq!(IERC20::transferCall::SELECTOR, hex!("a9059cbb"));
        assert_eq!(IERC20::balanceOfCall::SELECTOR, hex!("70a08231"));
    }

    #[test]
    fn test_transfer_calldata() {
        let call = IERC20::transferCall {
            to: address!("1234567890123456789012345678901234567890"),
            amount: U256::from(50_000_000_000_000_000_000_u128),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &hex!("a9059cbb"));
        assert_eq!(
            &data[16..36],
            &hex!("1234567890123456789012345678901234567890")
        );
    }
}
