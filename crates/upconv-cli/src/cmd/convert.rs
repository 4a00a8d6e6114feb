use clap::{Args, ValueEnum};
use upconv_core::config::{
    DEFAULT_BIT_WIDTH, SINK_SAMPLE_RATE, SOURCE_BITS_PER_SAMPLE, SOURCE_CHANNELS, SOURCE_SAMPLE_RATE,
};
use upconv_core::validate::validate_source;
use upconv_core::{RemainderPolicy, SourceFormat, TailPolicy, UpconvConfig, Upconverter};

use crate::io::{bin, pcm};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Tail {
    /// Hold the last sample for one more span (N*F samples)
    Hold,
    /// Drop the trailing span ((N-1)*F samples)
    Truncate,
}

impl From<Tail> for TailPolicy {
    fn from(t: Tail) -> Self {
        match t {
            Tail::Hold => TailPolicy::Hold,
            Tail::Truncate => TailPolicy::Truncate,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Remainder {
    /// Pad the last byte with code 0 (warns)
    Pad,
    /// Fail if the code count does not fill the last byte
    Reject,
}

impl From<Remainder> for RemainderPolicy {
    fn from(r: Remainder) -> Self {
        match r {
            Remainder::Pad => RemainderPolicy::Pad,
            Remainder::Reject => RemainderPolicy::Reject,
        }
    }
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input file: raw s16le mono PCM, no header
    #[arg(long)]
    pub r#in: String,

    /// Output file for packed codes. If omitted, writes to stdout.
    #[arg(long)]
    pub out: Option<String>,

    /// Declared sample rate of the input (must equal the fixed source rate)
    #[arg(long, default_value_t = SOURCE_SAMPLE_RATE)]
    pub rate: u32,

    /// Declared channel count of the input (must be 1)
    #[arg(long, default_value_t = SOURCE_CHANNELS)]
    pub channels: u16,

    /// Sink rate in Hz; must be an integer multiple of the source rate
    #[arg(long, default_value_t = SINK_SAMPLE_RATE)]
    pub sink_rate: u32,

    /// Code width W in bits (1..=8)
    #[arg(long, default_value_t = DEFAULT_BIT_WIDTH)]
    pub bit_width: u8,

    #[arg(long, value_enum, default_value_t = Tail::Hold)]
    pub tail: Tail,

    #[arg(long, value_enum, default_value_t = Remainder::Pad)]
    pub remainder: Remainder,
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let config = UpconvConfig {
        source_rate: SOURCE_SAMPLE_RATE,
        sink_rate: args.sink_rate,
        bit_width: args.bit_width,
        tail: args.tail.into(),
        remainder: args.remainder.into(),
    };
    let up = Upconverter::new(config)?;

    // Declared format is checked before the input is read.
    let fmt = SourceFormat {
        sample_rate: args.rate,
        channels: args.channels,
        bits_per_sample: SOURCE_BITS_PER_SAMPLE,
    };
    validate_source(&fmt, up.config())?;

    let samples = pcm::read_s16le(&args.r#in)?;
    let conv = up.convert(&samples)?;

    bin::write_packed_to(args.out.as_deref(), &conv.bytes)?;

    eprintln!(
        "convert ok: in_samples={} factor={} bit_width={} codes={} padded={} bytes={} overloads={} peak_error={:.6} crc32={:08x} out={}",
        conv.stats.input_samples,
        up.factor(),
        up.config().bit_width,
        conv.stats.codes,
        conv.stats.padded_codes,
        conv.stats.bytes,
        conv.stats.overloads,
        conv.stats.peak_error,
        crc32fast::hash(&conv.bytes),
        args.out.as_deref().unwrap_or("-"),
    );

    Ok(())
}
