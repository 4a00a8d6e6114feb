pub mod config;
pub mod error;
pub mod validate;

pub mod pipeline;
pub mod signal;
pub mod sink;

pub use crate::config::{RemainderPolicy, SourceFormat, TailPolicy, UpconvConfig};
pub use crate::error::{Result, UpconvError};
pub use crate::pipeline::{Conversion, ConvertStats, Upconverter};
