//! DEX domain - protocol registry, pricing curves and the quote interface

mod curve;
mod dex_interface;
mod dex_registry;

pub use curve::CurveModel;
pub use dex_interface::QuoteCalculator;
pub use dex_registry::{ProtocolBook, ProtocolConfig, PANCAKE_ACCOUNT, PANCAKE_FEE_PER_MILLE};
