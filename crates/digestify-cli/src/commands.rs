//! CLI arguments and command execution

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use digestify_core::config::CONFIG_ENV;
use digestify_core::{sign, verify, DigestifyConfig, HashAlgorithm, SecretKey, Verification};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::status::Status;

/// Status for a failed argument parse, `None` when clap only printed help or
/// version text
pub fn usage_status(err: &clap::Error) -> Option<Status> {
    if err.use_stderr() {
        Some(Status::Failed)
    } else {
        None
    }
}

/// Sign and verify HMAC for files. Stdin, stdout also supported.
#[derive(Parser, Debug)]
#[command(name = "digestify")]
#[command(about = "Sign and verify HMAC for files. Stdin, stdout also supported.")]
#[command(version)]
pub struct Cli {
    /// Source file (stdin when omitted)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Target file for the signed copy (stdout when omitted)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Verify file digest instead of signing
    #[arg(short = 'c', long)]
    pub verify: bool,

    /// Hash function for HMAC: sha1, sha224, sha256, sha384 or sha512
    #[arg(long)]
    pub digestmod: Option<String>,

    /// Bytes read per block
    #[arg(short, long)]
    pub block_size: Option<usize>,

    /// JSON configuration file (defaults to $DIGESTIFY_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug info
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr tracing subscriber. `RUST_LOG` takes precedence.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "digestify=debug,digestify_cli=debug,digestify_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Merge the config file (if any) with command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<DigestifyConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let mut config = match path {
        Some(path) => DigestifyConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DigestifyConfig::default(),
    };

    if let Some(name) = &cli.digestmod {
        config.algorithm = name.parse::<HashAlgorithm>()?;
    }
    if let Some(block_size) = cli.block_size {
        config.block_size = block_size;
    }
    config.validate()?;

    if cli.verify && !config.can_verify() {
        anyhow::bail!(
            "block size {} must exceed the {} byte {} trailer",
            config.block_size,
            config.algorithm.trailer_len(),
            config.algorithm
        );
    }

    Ok(config)
}

fn open_source(cli: &Cli) -> Result<Box<dyn Read>> {
    let source: Box<dyn Read> = match &cli.source {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    Ok(source)
}

/// Whether both paths name the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Run one sign or verify pass with an already acquired key
pub fn execute(cli: &Cli, config: &DigestifyConfig, key: &SecretKey) -> Result<Status> {
    info!(algorithm = %config.algorithm, block_size = config.block_size, "hash algorithm");
    if key.is_empty() {
        warn!("secret key is empty");
    }

    if !cli.verify {
        if let (Some(source), Some(target)) = (&cli.source, &cli.target) {
            // Creating the target would truncate the source before it is read
            if same_file(source, target) {
                anyhow::bail!(
                    "source and target are the same file: {}",
                    source.display()
                );
            }
        }
    }

    let source = open_source(cli)?;

    if cli.verify {
        let outcome = verify(key, config.algorithm, source, config.block_size)?;
        report(&outcome).context("failed to write verification result")?;
        return Ok(Status::from(&outcome));
    }

    match &cli.target {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let target = BufWriter::new(file);
            if let Err(e) = sign(key, config.algorithm, source, target, config.block_size) {
                warn!(path = %path.display(), "signing failed, removing partial output");
                if let Err(remove_err) = std::fs::remove_file(path) {
                    warn!(path = %path.display(), error = %remove_err, "could not remove partial output");
                }
                return Err(e.into());
            }
        }
        None => {
            let target = BufWriter::new(io::stdout().lock());
            sign(key, config.algorithm, source, target, config.block_size)?;
        }
    }

    Ok(Status::Signed)
}

fn report(outcome: &Verification) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    let verdict = match outcome {
        Verification::Valid => "Success".to_string(),
        Verification::Mismatch => "Fail (incorrect digest)".to_string(),
        Verification::Indeterminate(defect) => {
            format!("Fail (digest is missing or malformed: {})", defect)
        }
    };
    writeln!(stdout, "Digest integrity check... {}", verdict)?;
    stdout.flush()
}
