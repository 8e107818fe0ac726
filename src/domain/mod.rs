//! Domain layer - pools, protocols and swap pricing

pub mod dex;
pub mod pool;
