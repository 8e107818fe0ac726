pub mod factory;
pub mod pancake_adapter;
pub mod traits;

pub use factory::DexAdapterFactory;
pub use pancake_adapter::PancakeAdapter;
pub use traits::PoolDataProvider;
