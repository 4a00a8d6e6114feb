// crates/upconv-cli/src/io/mod.rs

pub mod bin;
pub mod pcm;
