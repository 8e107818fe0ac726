//! umi-pools - PancakeSwap (Aptos) pool reader and constant product swap quoter
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod math;
pub mod shared;

// Re-export main types for convenience
pub use domain::dex::{CurveModel, ProtocolBook, ProtocolConfig, QuoteCalculator};
pub use domain::pool::{Pool, PoolPair, SwapQuote};
pub use infrastructure::blockchain::{PoolDataProvider, PoolResourceMapper, ResourceFetcher, TokenCatalog};
pub use shared::types::{AccountAddress, TokenAmount, TokenDescriptor};
