// crates/upconv-core/src/signal/mod.rs

pub mod bitpack;
pub mod interpolate;
pub mod quantize;
