use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use typeprobe_core::{Address, DecodeMode, Decoder, DecoderConfig, Result as DecodeResult};
use typeprobe_utils::{
    debug, init_logging, init_logging_with_format, init_logging_with_level, LogFormat, LogLevel, LoggingError,
    LoggingGuard,
};

/// Decode Go runtime type metadata from a 64-bit ELF image.
#[derive(Parser, Debug)]
#[command(name = "typeprobe")]
#[command(version)]
#[command(about = "Decode Go runtime type metadata from a 64-bit ELF image", long_about = None)]
struct Cli
{
    /// Log at debug level regardless of RUST_LOG
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    /// Log output format (pretty or json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Section whose base address anchors relative name and type offsets
    #[arg(long, global = true, default_value = ".rodata")]
    metadata_section: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Decode a type descriptor
    Type
    {
        /// Path to the ELF image
        #[arg(short, long)]
        file: PathBuf,
        /// Descriptor address (hex format: 0x4a1b20 or decimal)
        address: Address,
    },
    /// Decode an interface descriptor and its method table
    Interface
    {
        /// Path to the ELF image
        #[arg(short, long)]
        file: PathBuf,
        /// Descriptor address (hex format: 0x4a1b20 or decimal)
        address: Address,
    },
    /// Decode an itab (interface/concrete type pair)
    Itab
    {
        /// Path to the ELF image
        #[arg(short, long)]
        file: PathBuf,
        /// Itab address (hex format: 0x4a1b20 or decimal)
        address: Address,
    },
}

impl Commands
{
    fn target(&self) -> (DecodeMode, &PathBuf, Address)
    {
        match self {
            Commands::Type { file, address } => (DecodeMode::Type, file, *address),
            Commands::Interface { file, address } => (DecodeMode::Interface, file, *address),
            Commands::Itab { file, address } => (DecodeMode::Itab, file, *address),
        }
    }
}

fn start_logging(cli: &Cli) -> Result<LoggingGuard, LoggingError>
{
    match (cli.debug, cli.log_format) {
        (true, format) => init_logging_with_level(LogLevel::Debug, format.unwrap_or(LogFormat::Pretty)),
        (false, Some(format)) => init_logging_with_format(format),
        (false, None) => init_logging(),
    }
}

fn run(cli: &Cli) -> DecodeResult<()>
{
    let (mode, file, address) = cli.command.target();
    debug!(file = %file.display(), %address, ?mode, "Decoding");

    let config = DecoderConfig::default().with_metadata_section(cli.metadata_section.clone());
    let mut decoder = Decoder::open_with_config(file, config)?;
    let decoded = decoder.decode(mode, address)?;

    println!("{decoded}");
    Ok(())
}

fn main() -> ExitCode
{
    let cli = Cli::parse();

    let _guard = match start_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Returning instead of exiting lets the guard flush the log file.
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
