//! quill CLI
//!
//! Encode, decode, train and hack Caesar, Vigenère and Vernam ciphers.

mod io;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quill_cipher::{CipherKind, Error as CipherError, FrequencyModel, KeyRecovery};
use quill_config::Config;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Encodes text, decodes it with Caesar, Vigenere and Vernam ciphers. Hacks text encoded with Caesar and Vigenere ciphers")]
#[command(version)]
struct Cli {
    /// Configuration file (default: <config dir>/quill/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log statistics decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text with a key
    Encode {
        #[command(flatten)]
        args: CodecArgs,
    },

    /// Decode text with a key
    Decode {
        #[command(flatten)]
        args: CodecArgs,
    },

    /// Build a letter frequency model for hacking Caesar ciphers
    Train {
        /// Training text (default: one console line)
        #[arg(long)]
        text_file: Option<PathBuf>,

        /// Where to write the model (default: model_file from config)
        #[arg(long)]
        model_file: Option<PathBuf>,
    },

    /// Recover the plaintext without the key
    Hack {
        /// Cipher: caesar, vigenere
        #[arg(long)]
        cipher: Option<CipherKind>,

        /// Frequency model for caesar (default: model_file from config)
        #[arg(long)]
        model_file: Option<PathBuf>,

        /// Ciphertext file (default: one console line)
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Output file (default: console)
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Pick vigenere candidate N (1-26) instead of asking
        #[arg(long)]
        choice: Option<usize>,
    },

    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
struct CodecArgs {
    /// Cipher: caesar, vigenere, vernam (default: default_cipher from config)
    #[arg(long)]
    cipher: Option<CipherKind>,

    /// Keyword or number
    #[arg(long, allow_hyphen_values = true)]
    key: String,

    /// Input file (default: one console line)
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Output file (default: console)
    #[arg(long)]
    output_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref()).context("cannot load configuration")?;

    match cli.command {
        Commands::Encode { args } => cmd_codec(&config, args, true),
        Commands::Decode { args } => cmd_codec(&config, args, false),
        Commands::Train { text_file, model_file } => cmd_train(&config, text_file, model_file),
        Commands::Hack {
            cipher,
            model_file,
            input_file,
            output_file,
            choice,
        } => cmd_hack(&config, cipher, model_file, input_file, output_file, choice),
        Commands::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "quill=debug" } else { "quill=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn cipher_or_default(config: &Config, cipher: Option<CipherKind>) -> Result<CipherKind> {
    match cipher {
        Some(kind) => Ok(kind),
        None => config
            .default_cipher
            .parse()
            .context("invalid default_cipher in configuration"),
    }
}

fn model_path(config: &Config, model_file: Option<PathBuf>) -> Result<PathBuf> {
    model_file
        .or_else(|| config.model_file.clone())
        .context("no model file: pass --model-file or set model_file in the configuration")
}

// ═══════════════════════════════════════════════════════════
// ENCODE / DECODE
// ═══════════════════════════════════════════════════════════

fn cmd_codec(config: &Config, args: CodecArgs, encoding: bool) -> Result<()> {
    let kind = cipher_or_default(config, args.cipher)?;
    let stdin = std::io::stdin();
    let text = io::read_text(args.input_file.as_deref(), &mut stdin.lock())?;

    let result = if encoding {
        quill_cipher::encode(kind, &text, &args.key)
    } else {
        quill_cipher::decode(kind, &text, &args.key)
    }?;

    tracing::info!(cipher = %kind, chars = text.chars().count(), encoding, "text processed");
    io::write_text(args.output_file.as_deref(), &result, &mut std::io::stdout())
}

// ═══════════════════════════════════════════════════════════
// TRAIN
// ═══════════════════════════════════════════════════════════

fn cmd_train(config: &Config, text_file: Option<PathBuf>, model_file: Option<PathBuf>) -> Result<()> {
    let path = model_path(config, model_file)?;
    let stdin = std::io::stdin();
    let text = io::read_text(text_file.as_deref(), &mut stdin.lock())?;

    let model = quill_cipher::train(&text)?;
    write_model(&path, &model)?;

    tracing::info!("model written to {}", path.display());
    Ok(())
}

fn write_model(path: &Path, model: &FrequencyModel) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, model.to_bytes()?)
        .with_context(|| format!("cannot write model file {}", path.display()))
}

fn read_model(path: &Path) -> Result<FrequencyModel> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("The model file {} doesn't exist", path.display()))?;
    FrequencyModel::from_bytes(&bytes).context("Incorrect model file")
}

// ═══════════════════════════════════════════════════════════
// HACK
// ═══════════════════════════════════════════════════════════

fn cmd_hack(
    config: &Config,
    cipher: Option<CipherKind>,
    model_file: Option<PathBuf>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    choice: Option<usize>,
) -> Result<()> {
    let kind = cipher_or_default(config, cipher)?;
    if !kind.is_hackable() {
        bail!("Incorrect combination of cipher and task: {kind} can't be hacked");
    }

    // read the model before prompting for text so a bad path fails fast
    let model = match kind {
        CipherKind::Caesar => Some(read_model(&model_path(config, model_file)?)?),
        _ => None,
    };

    let stdin = std::io::stdin();
    let mut console = stdin.lock();
    let text = io::read_text(input_file.as_deref(), &mut console)?;

    let outcome = match model {
        Some(model) => quill_cipher::break_shift(&text, &model)
            .map(|found| {
                tracing::info!(key = found.key, distance = %found.distance, "shift recovered");
                found.plaintext
            })
            .map_err(anyhow::Error::from),
        None => hack_vigenere(config, &text, choice, &mut console),
    };

    match outcome {
        Ok(plaintext) => io::write_text(output_file.as_deref(), &plaintext, &mut std::io::stdout()),
        Err(err) => match err.downcast_ref::<CipherError>() {
            Some(CipherError::UnhackableText(reason)) => {
                tracing::warn!("{reason}");
                println!("The text is inappropriate for hacking. Or it's decoded.");
                Ok(())
            }
            _ => Err(err),
        },
    }
}

fn hack_vigenere(
    config: &Config,
    text: &str,
    choice: Option<usize>,
    console: &mut impl BufRead,
) -> Result<String> {
    let recovery = KeyRecovery::new(config.thresholds.clone());
    let candidates = recovery.candidates(text)?;

    let mut stdout = std::io::stdout();
    let picked = io::select_candidate(&candidates, choice, console, &mut stdout)?;
    stdout.flush()?;

    tracing::info!(key = %picked.key, "vigenere key selected");
    Ok(picked.plaintext.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::parse_from(["quill", "encode", "--cipher", "vigenere", "--key", "lemon"]);
        match cli.command {
            Commands::Encode { args } => {
                assert_eq!(args.cipher, Some(CipherKind::Vigenere));
                assert_eq!(args.key, "lemon");
                assert!(args.input_file.is_none());
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_parse_negative_caesar_key() {
        let cli = Cli::parse_from(["quill", "decode", "--key", "-3"]);
        match cli.command {
            Commands::Decode { args } => assert_eq!(args.key, "-3"),
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_cipher() {
        assert!(Cli::try_parse_from(["quill", "encode", "--cipher", "enigma", "--key", "1"]).is_err());
    }

    #[test]
    fn test_cipher_default_from_config() {
        let mut config = Config::default();
        assert_eq!(cipher_or_default(&config, None).unwrap(), CipherKind::Caesar);

        config.default_cipher = "vernam".into();
        assert_eq!(cipher_or_default(&config, None).unwrap(), CipherKind::Vernam);
        assert_eq!(
            cipher_or_default(&config, Some(CipherKind::Vigenere)).unwrap(),
            CipherKind::Vigenere
        );

        config.default_cipher = "enigma".into();
        assert!(cipher_or_default(&config, None).is_err());
    }

    #[test]
    fn test_model_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models").join("english.json");

        let model = quill_cipher::train("It was the best of times").unwrap();
        write_model(&path, &model).unwrap();
        assert_eq!(read_model(&path).unwrap(), model);

        std::fs::write(&path, b"garbage").unwrap();
        assert!(read_model(&path).is_err());
        assert!(read_model(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_model_path_falls_back_to_config() {
        let mut config = Config::default();
        assert!(model_path(&config, None).is_err());

        config.model_file = Some(PathBuf::from("from-config.json"));
        assert_eq!(model_path(&config, None).unwrap(), PathBuf::from("from-config.json"));
        assert_eq!(
            model_path(&config, Some(PathBuf::from("flag.json"))).unwrap(),
            PathBuf::from("flag.json")
        );
    }
}
