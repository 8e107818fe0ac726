//! Token metadata lookup by Move coin type

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::shared::types::TokenDescriptor;

/// Well-known Aptos coins: (type, symbol, decimals, name)
const KNOWN_TOKENS: &[(&str, &str, u8, &str)] = &[
    ("0x1::aptos_coin::AptosCoin", "APT", 8, "Aptos Coin"),
    (
        "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC",
        "USDC",
        6,
        "USD Coin (LayerZero)",
    ),
    (
        "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDT",
        "USDT",
        6,
        "Tether USD (LayerZero)",
    ),
    (
        "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::WETH",
        "WETH",
        6,
        "Wrapped Ether (LayerZero)",
    ),
    (
        "0x159df6b7689437016108a019fd5bef736bac692b6d4a1f10c941f6fbb9a74ca6::oft::CakeOFT",
        "CAKE",
        8,
        "PancakeSwap Token",
    ),
];

/// Source of token metadata. A miss is `None`, not an error: most pools on
/// a permissionless DEX trade coins nobody tracks.
pub trait TokenCatalog: Send + Sync {
    fn lookup(&self, type_tag: &str) -> Option<Arc<TokenDescriptor>>;

    /// Find by symbol, case-insensitive. Used for user input only.
    fn find_by_symbol(&self, symbol: &str) -> Option<Arc<TokenDescriptor>>;
}

/// In-memory catalog, built from the known-token table plus configured extras
#[derive(Debug, Clone, Default)]
pub struct StaticTokenCatalog {
    tokens: HashMap<String, Arc<TokenDescriptor>>,
}

impl StaticTokenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_tokens() -> Self {
        let tokens = KNOWN_TOKENS
            .iter()
            .map(|(type_tag, symbol, decimals, name)| {
                TokenDescriptor::new(type_tag, symbol, *decimals).with_name(name)
            });
        Self::new().extend(tokens)
    }

    /// Add tokens; later entries replace earlier ones with the same type
    pub fn extend(mut self, tokens: impl IntoIterator<Item = TokenDescriptor>) -> Self {
        for token in tokens {
            debug!("Registering token {} ({})", token.symbol, token.type_tag);
            self.tokens.insert(token.type_tag.clone(), Arc::new(token));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenCatalog for StaticTokenCatalog {
    fn lookup(&self, type_tag: &str) -> Option<Arc<TokenDescriptor>> {
        self.tokens.get(type_tag.trim()).cloned()
    }

    fn find_by_symbol(&self, symbol: &str) -> Option<Arc<TokenDescriptor>> {
        let mut matches: Vec<_> = self
            .tokens
            .values()
            .filter(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .collect();
        // deterministic pick when two types share a symbol
        matches.sort_by(|a, b| a.type_tag.cmp(&b.type_tag));
        matches.first().map(|t| Arc::clone(t))
    }
}
