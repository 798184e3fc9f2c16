//! Known Mezo networks and MUSD token deployments.

use alloy_primitives::{Address, TxHash, address};

/// An EIP-155 chain ID (e.g., 31611 for Mezo Testnet).
pub type ChainId = u64;

/// Mezo Testnet chain ID.
pub const MEZO_TESTNET_CHAIN_ID: ChainId = 31611;

/// Mezo Mainnet chain ID.
pub const MEZO_MAINNET_CHAIN_ID: ChainId = 31612;

/// MUSD contract address on Mezo Testnet.
pub const MUSD_TESTNET: Address = address!("118917a40FAF1CD7a13dB0Ef56C86De7973Ac503");

/// MUSD contract address on Mezo Mainnet.
pub const MUSD_MAINNET: Address = address!("118917a40FAF1CD7a13dB0Ef56C86De7973Ac503");

/// Native currency of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    /// Display name.
    pub name: &'static str,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Number of decimals.
    pub decimals: u8,
}

/// Static description of a supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MezoNetwork {
    /// Human-readable network name.
    pub name: &'static str,
    /// EIP-155 chain ID.
    pub chain_id: ChainId,
    /// Default JSON-RPC endpoint.
    pub rpc_url: &'static str,
    /// Block explorer base URL, without trailing slash.
    pub explorer_url: &'static str,
    /// Native gas currency.
    pub native_currency: NativeCurrency,
    /// MUSD token contract.
    pub musd_address: Address,
    /// Whether this is a test network.
    pub testnet: bool,
}

const MEZO_NATIVE: NativeCurrency = NativeCurrency {
    name: "Mezo",
    symbol: "BTC",
    decimals: 18,
};

/// Mezo Testnet.
pub const MEZO_TESTNET: MezoNetwork = MezoNetwork {
    name: "Mezo Testnet",
    chain_id: MEZO_TESTNET_CHAIN_ID,
    rpc_url: "https://rpc.test.mezo.org",
    explorer_url: "https://explorer.test.mezo.org",
    native_currency: MEZO_NATIVE,
    musd_address: MUSD_TESTNET,
    testnet: true,
};

/// Mezo Mainnet.
pub const MEZO_MAINNET: MezoNetwork = MezoNetwork {
    name: "Mezo Mainnet",
    chain_id: MEZO_MAINNET_CHAIN_ID,
    rpc_url: "https://rpc-http.mezo.boar.network",
    explorer_url: "https://explorer.mezo.org",
    native_currency: MEZO_NATIVE,
    musd_address: MUSD_MAINNET,
    testnet: false,
};

/// All supported networks.
pub static MEZO_NETWORKS: &[MezoNetwork] = &[MEZO_TESTNET, MEZO_MAINNET];

/// Looks up a supported network by chain ID.
#[must_use]
pub fn network_by_chain_id(chain_id: ChainId) -> Option<&'static MezoNetwork> {
    MEZO_NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

impl MezoNetwork {
    /// Formats the chain ID as a CAIP-2 identifier (`eip155:<id>`).
    #[must_use]
    pub fn caip2(&self) -> String {
        format!("eip155:{}", self.chain_id)
    }

    /// Explorer page for a transaction.
    #[must_use]
    pub fn explorer_tx_url(&self, tx: &TxHash) -> String {
        format!("{}/tx/{tx}", self.explorer_url)
    }

    /// Explorer page for an account or contract.
    #[must_use]
    pub fn explorer_address_url(&self, address: &Address) -> String {
        format!("{}/address/{address}", self.explorer_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_networks() {
        assert_eq!(network_by_chain_id(31611), Some(&MEZO_TESTNET));
        assert_eq!(network_by_chain_id(31612), Some(&MEZO_MAINNET));
        assert_eq!(network_by_chain_id(1), None);
    }

    #[test]
    fn test_explorer_urls() {
        let tx = TxHash::repeat_byte(0xab);
        assert_eq!(
            MEZO_MAINNET.explorer_tx_url(&tx),
            format!("https://explorer.mezo.org/tx/0x{}", "ab".repeat(32))
        );
        assert_eq!(
            MEZO_TESTNET.explorer_address_url(&MUSD_TESTNET),
            format!("https://explorer.test.mezo.org/address/{}", MUSD_TESTNET.to_checksum(None))
        );
        assert_eq!(MEZO_TESTNET.caip2(), "eip155:31611");
    }
}
