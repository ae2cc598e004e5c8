//! keytree-driver - load a tree, delete a batch of keys, show both states.
//!
//! ```text
//! keytree-driver <keys-file> <delete-file> [--degree N] [--allow-duplicates]
//! ```
//!
//! Defaults come from `KEYTREE_MIN_DEGREE` / `KEYTREE_DUPLICATES`; flags
//! override them. Log level follows `RUST_LOG` (default `keytree=info`).

use std::path::PathBuf;
use std::process::ExitCode;

use keytree::common::config::ENV_MIN_DEGREE;
use keytree::{load_tree, read_keys, BTreeConfig, DuplicatePolicy, Error, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str =
    "usage: keytree-driver <keys-file> <delete-file> [--degree N] [--allow-duplicates]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    keys_file: PathBuf,
    delete_file: PathBuf,
    degree: Option<usize>,
    allow_duplicates: bool,
}

fn usage_error(message: impl Into<String>) -> Error {
    Error::Config {
        name: "arguments".to_string(),
        message: format!("{}\n{USAGE}", message.into()),
    }
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut degree = None;
    let mut allow_duplicates = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--degree" | "-t" => {
                let raw = args
                    .next()
                    .ok_or_else(|| usage_error("--degree needs a value"))?;
                let t = raw.parse::<usize>().map_err(|e| Error::Config {
                    name: ENV_MIN_DEGREE.to_string(),
                    message: format!("'{raw}' is not a positive integer ({e})"),
                })?;
                degree = Some(t);
            }
            "--allow-duplicates" => allow_duplicates = true,
            flag if flag.starts_with("--") => {
                return Err(usage_error(format!("unknown flag {flag}")));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(keys_file), Some(delete_file), None) => Ok(Args {
            keys_file,
            delete_file,
            degree,
            allow_duplicates,
        }),
        _ => Err(usage_error("expected exactly two files")),
    }
}

fn resolve_config(args: &Args, base: BTreeConfig) -> Result<BTreeConfig> {
    let mut config = base;
    if let Some(t) = args.degree {
        config = config.with_min_degree(t)?;
    }
    if args.allow_duplicates {
        config = config.with_duplicates(DuplicatePolicy::Allow);
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args, BTreeConfig::from_env()?)?;
    tracing::info!(
        degree = config.min_degree.get(),
        duplicates = %config.duplicates,
        "building tree"
    );

    let mut report = load_tree(&args.keys_file, config)?;
    println!("{}", report.tree);

    let deletes = read_keys(&args.delete_file)?;
    let mut missing = 0;
    for key in &deletes {
        if !report.tree.delete(key) {
            println!("Key '{key}' is not in the tree.");
            missing += 1;
        }
    }
    println!("{}", report.tree);

    report.tree.validate()?;
    tracing::info!(
        requested = deletes.len(),
        missing,
        remaining = report.tree.len(),
        stats = %report.tree.stats_snapshot(),
        "deletes applied"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keytree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
