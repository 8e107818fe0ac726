//! Infrastructure layer - chain access and external data

pub mod blockchain;
