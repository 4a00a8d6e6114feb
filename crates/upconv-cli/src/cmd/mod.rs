// crates/upconv-cli/src/cmd/mod.rs

pub mod analyze;
pub mod convert;
