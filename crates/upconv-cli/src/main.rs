// crates/upconv-cli/src/main.rs

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "upconv")]
#[command(about = "PCM to noise-shaped nibble stream upconverter", long_about = None)]
pub struct Cli {
    /// Diagnostics level written to stderr
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upsample raw s16le mono PCM and write packed W-bit codes
    Convert(cmd::convert::ConvertArgs),

    /// Unpack a code stream and report histogram, DC offset, crc32, compressibility
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .init();

    match cli.cmd {
        Commands::Convert(args) => cmd::convert::run(args),
        Commands::Analyze(args) => cmd::analyze::run(args),
    }
}
