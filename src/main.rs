mod cli;

use clap::Parser;
use prefixint::config::{CodecConfig, DecodeMode, DEFAULT_CONFIG_FILE};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prefixint")]
#[command(about = "HPACK-style prefixed integer codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Encode a value and print the bytes as hex
    Encode {
        value: u32,
        #[arg(long, help = "Prefix width in bits (overrides config)")]
        prefix: Option<u8>,
        #[arg(long, default_value = "0", value_parser = cli::parse_byte, help = "Flag bits above the prefix")]
        flags: u8,
    },
    /// Decode a hex-encoded integer
    Decode {
        hex: String,
        #[arg(long, help = "Mask the first byte with this prefix width")]
        prefix: Option<u8>,
        #[arg(long, help = "Validate continuation bits")]
        strict: bool,
    },
    /// Show the digit layout of a hex-encoded integer
    Inspect { hex: String },
    /// Decode a binary stream of integers
    DecodeStream {
        #[arg(long, help = "Input file (stdin if omitted)")]
        input: Option<String>,
        #[arg(long, help = "Prefix width in bits (overrides config)")]
        prefix: Option<u8>,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CodecConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!("Using config: {:?}", config);

    let result = match cli.command {
        Commands::Encode { value, prefix, flags } => {
            cli::run_encode(value, prefix.unwrap_or(config.prefix_bits), flags, cli.json)
        }
        Commands::Decode { hex, prefix, strict } => {
            let mode = if strict { DecodeMode::Strict } else { config.decode_mode };
            cli::run_decode(&hex, prefix, mode, cli.json)
        }
        Commands::Inspect { hex } => cli::run_inspect(&hex, cli.json),
        Commands::DecodeStream { input, prefix } => {
            cli::run_decode_stream(
                input.as_deref(),
                prefix.unwrap_or(config.prefix_bits),
                config.max_stream_values,
                cli.json,
            )
            .await
        }
        Commands::GenerateConfig { output } => cli::run_generate_config(&output, cli.json),
    };

    if let Err(e) = &result {
        if cli.json {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            eprintln!("❌ {}", e);
        }
    }
    result
}
