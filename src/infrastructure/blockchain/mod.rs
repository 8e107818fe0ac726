//! Direct blockchain reading for Aptos DEX data

pub mod account_parser;
pub mod dex_adapters;
pub mod dex_structures;
pub mod pool_mapper;
pub mod rpc_client;
pub mod token_metadata;

pub use account_parser::{extract_type_args, StructTag};
pub use dex_adapters::{DexAdapterFactory, PancakeAdapter, PoolDataProvider};
pub use dex_structures::{RawResource, TokenPairReserve};
pub use pool_mapper::PoolResourceMapper;
pub use rpc_client::{AptosRpcClient, ResourceFetcher};
pub use token_metadata::{StaticTokenCatalog, TokenCatalog};
