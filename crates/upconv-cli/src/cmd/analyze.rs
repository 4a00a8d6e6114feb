use clap::{ArgAction, Args};
use std::io::Cursor;
use upconv_core::config::DEFAULT_BIT_WIDTH;
use upconv_core::signal::bitpack::{codes_per_byte, unpack_codes};
use upconv_core::validate::validate_bit_width;

use crate::io::bin;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Packed code stream written by `convert`
    #[arg(long)]
    pub r#in: String,

    /// Code width W the stream was packed with
    #[arg(long, default_value_t = DEFAULT_BIT_WIDTH)]
    pub bit_width: u8,

    /// Number of codes to read. Defaults to every slot in the file
    /// (includes a padded slot, if any).
    #[arg(long)]
    pub codes: Option<usize>,

    /// Also report zstd compressed size (`--zstd false` to skip)
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub zstd: bool,

    /// Zstd compression level (1..=22 typical). Higher is slower.
    #[arg(long, default_value_t = 3)]
    pub zstd_level: i32,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    validate_bit_width(args.bit_width)?;
    let bytes = bin::read_packed(&args.r#in)?;

    let count = args
        .codes
        .unwrap_or(bytes.len() * codes_per_byte(args.bit_width));
    let codes = unpack_codes(args.bit_width, &bytes, count)?;

    let levels = 1usize << args.bit_width;
    let mut h = vec![0u64; levels];
    for &c in &codes {
        h[c as usize] += 1;
    }

    let n = codes.len() as u64;
    let half = (levels / 2) as f64;
    let mean = mean_code(&h, n);
    // Mid-scale (2^(W-1)) is silence; express the offset in s16 units too.
    let dc_codes = if n == 0 { 0.0 } else { mean - half };
    let dc_s16 = dc_codes / ((levels - 1) as f64 / 2.0) * 32768.0;
    let distinct = h.iter().filter(|&&c| c > 0).count();

    eprintln!("--- analyze ---");
    eprintln!("file            = {}", args.r#in);
    eprintln!("bytes           = {}", bytes.len());
    eprintln!("bit_width       = {}", args.bit_width);
    eprintln!("codes           = {}", n);
    eprintln!("distinct_codes  = {}/{}", distinct, levels);
    eprintln!("mean_code       = {:.6}", mean);
    eprintln!("dc_offset       = {:.6} codes ({:.1} s16)", dc_codes, dc_s16);
    eprintln!("entropy_bits    = {:.6} (max {}.000000)", entropy_bits(&h, n), args.bit_width);
    eprintln!("crc32           = {:08x}", crc32fast::hash(&bytes));

    if args.zstd {
        let z = zstd_size(&bytes, args.zstd_level)?;
        let ratio = if z == 0 { 0.0 } else { (bytes.len() as f64) / (z as f64) };
        eprintln!("--- zstd ---");
        eprintln!("zstd_level      = {}", args.zstd_level);
        eprintln!("zstd_bytes      = {}", z);
        eprintln!("ratio_raw/zstd  = {:.4}x", ratio);
    }

    eprintln!("--- histogram ---");
    for (code, &c) in h.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let pct = (c as f64) * 100.0 / (n as f64);
        eprintln!("code={:>3} (0x{:02X}) count={} ({:.3}%)", code, code, c, pct);
    }

    Ok(())
}

fn zstd_size(bytes: &[u8], level: i32) -> anyhow::Result<usize> {
    let out = zstd::stream::encode_all(Cursor::new(bytes), level)?;
    Ok(out.len())
}

fn mean_code(h: &[u64], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum: u64 = h.iter().enumerate().map(|(code, &c)| code as u64 * c).sum();
    sum as f64 / total as f64
}

fn entropy_bits(h: &[u64], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut ent = 0.0;
    for &c in h.iter() {
        if c == 0 {
            continue;
        }
        let p = (c as f64) / (total as f64);
        ent -= p * p.log2();
    }
    ent
}
