mod printing;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use linecode_core::logging::{init_logging, LogLevel};
use linecode_core::{encode_untraced, encode_valid, validate, LinecodeConfig, OutputFormat, Scheme};

/// linecode: 2B1Q and 8B6T line coding, explained step by step
///
/// Converts a string of binary digits into a multi-level line signal and
/// shows every decision the encoder takes, including the DC balance
/// corrections applied by 8B6T.
#[derive(Parser, Debug)]
#[command(name = "linecode")]
#[command(author, version, about = "Encodes bit strings with 2B1Q or 8B6T line coding", long_about = None)]
struct Cli {
    /// Configuration file (default: search LINECODE_CONFIG, ./linecode.yaml, ...)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a bit string.
    Encode {
        /// Bits to encode, e.g. 00011011
        bits: String,

        /// Line coding scheme (2B1Q or 8B6T; default from config)
        #[arg(short, long)]
        scheme: Option<Scheme>,

        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print only the signal, without the step-by-step trace
        #[arg(long)]
        no_trace: bool,

        /// Also include the DC balance profile
        #[arg(long)]
        profile: bool,
    },

    /// Check whether a bit string is valid for a scheme.
    Validate {
        /// Bits to check
        bits: String,

        /// Line coding scheme (2B1Q or 8B6T; default from config)
        #[arg(short, long)]
        scheme: Option<Scheme>,
    },

    /// List the supported schemes.
    Schemes,

    /// Show the effective configuration.
    Config {
        /// Print an example configuration file instead
        #[arg(long)]
        example: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<LinecodeConfig> {
    let config = match path {
        Some(p) => LinecodeConfig::load_from(p)
            .with_context(|| format!("loading configuration from {}", p.display()))?,
        None => LinecodeConfig::load().context("loading configuration")?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Encode {
            bits,
            scheme,
            format,
            no_trace,
            profile,
        } => {
            let scheme = scheme.unwrap_or(config.encoding.scheme);
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            let traced = config.encoding.trace && !no_trace;
            let show_profile = profile || config.output.show_profile;

            tracing::debug!(%scheme, bits = bits.len(), traced, "encoding");
            let input = validate(&bits, scheme)?;
            let result = if traced {
                encode_valid(&input)
            } else {
                encode_untraced(&input)
            };
            let result = if show_profile {
                result.with_profile()
            } else {
                result
            };

            match format {
                OutputFormat::Json => println!("{}", result.to_json()?),
                OutputFormat::Yaml => print!("{}", result.to_yaml()?),
                OutputFormat::Text => {
                    printing::print_result(&result, &input, traced && config.output.show_trace);
                    if let Some(profile) = &result.profile {
                        printing::print_profile(profile, &result.signal);
                    }
                }
            }
        }

        Commands::Validate { bits, scheme } => {
            let scheme = scheme.unwrap_or(config.encoding.scheme);
            let input = validate(&bits, scheme)?;
            println!(
                "valid: {} bits, {} {} symbol(s)",
                input.bits().len(),
                input.symbol_count(),
                scheme
            );
        }

        Commands::Schemes => printing::print_schemes(),

        Commands::Config { example } => {
            if example {
                print!("{}", LinecodeConfig::example_yaml());
            } else {
                print!("{}", config.to_yaml()?);
            }
        }
    }

    Ok(())
}
