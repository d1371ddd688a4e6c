/// Supported chain registry and address helpers
/// The target-network list is static; chain selection is not runtime
/// configuration.

/// A supported target chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub name: &'static str,
    pub chain_id: u64,
}

/// Networks the route contract is deployed on
pub const SUPPORTED_CHAINS: [Chain; 3] = [
    Chain { name: "Base", chain_id: 8453 },
    Chain { name: "Optimism", chain_id: 10 },
    Chain { name: "Mode", chain_id: 34443 },
];

/// Caller address sent to the solver when no wallet is connected
/// The solver tolerates it for quote-only requests.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Look up a chain by (case-insensitive) name
pub fn find_chain(name: &str) -> Option<Chain> {
    SUPPORTED_CHAINS
        .iter()
        .copied()
        .find(|chain| chain.name.eq_ignore_ascii_case(name))
}

/// Check whether a string is a 20-byte hex address (0x + 40 hex chars)
pub fn is_hex_address(value: &str) -> bool {
    let Some(hex) = value.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Check whether a string is a 0x-prefixed hex byte string of whole bytes
///
/// Calldata is opaque; only the encoding is validated, never the content.
pub fn is_hex_bytes(value: &str) -> bool {
    let Some(hex) = value.strip_prefix("0x") else {
        return false;
    };
    hex.len() % 2 == 0 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Shorten an address for display (0x1234...abcd)
pub fn short_address(address: &str) -> String {
    if address.len() > 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}
