//! jprec CLI.
//!
//! Decodes JSON with exact integers at chosen positions and writes it back
//! out, plus a few tools for looking at patterns and fingerprints.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use json_precision::json::{self, scalars, Limits};
use json_precision::pointer::{Fnv1a, LevelIndex, PatternSet, WildcardScope};
use json_precision::precision::{encode_value, NumberMode, OverrideScope};
use json_precision::Config;

#[derive(Parser)]
#[command(name = "jprec")]
#[command(about = "Exact-integer JSON decoding driven by path patterns", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a document and write it back as compact JSON
    Parse(DecodeArgs),

    /// List every scalar with its canonical path, depth and decoded kind
    Inspect(DecodeArgs),

    /// Print FNV-1a fingerprints of the given strings
    Hash {
        /// Strings to fingerprint
        #[arg(required = true)]
        texts: Vec<String>,

        /// Hash seed (defaults to the FNV-1a offset basis)
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Compile patterns and print the level index as JSON
    Compile {
        /// Path patterns, e.g. '#/items/*/id'
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DecodeArgs {
    /// Input file, stdin when absent or "-"
    file: Option<PathBuf>,

    /// Path pattern whose numbers decode exactly (repeatable)
    #[arg(short = 'p', long = "pointer")]
    pointers: Vec<String>,

    /// Member name whose numbers always decode exactly (repeatable)
    #[arg(short = 'f', long = "field")]
    fields: Vec<String>,

    /// Decoding of numbers no pattern or field selects
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Let `*` stand for array elements only
    #[arg(long)]
    arrays_only: bool,

    /// Apply override fields to everything beneath the named member
    #[arg(long)]
    subtree_overrides: bool,

    /// Confirm fingerprint hits against the pattern text
    #[arg(long)]
    verify: bool,

    /// Use strict parser limits and reject duplicate keys
    #[arg(long)]
    strict: bool,

    /// JSON config file; flags are applied on top of it
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Float,
    Mixed,
    Exact,
}

impl From<ModeArg> for NumberMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Float => NumberMode::Float,
            ModeArg::Mixed => NumberMode::Mixed,
            ModeArg::Exact => NumberMode::Exact,
        }
    }
}

impl DecodeArgs {
    /// Load the config file, if any, and layer the flags over it.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        config.pointers.extend(self.pointers.iter().cloned());
        config.force_fields.extend(self.fields.iter().cloned());
        if let Some(mode) = self.mode {
            config.options.number_mode = mode.into();
        }
        if self.arrays_only {
            config.options.wildcard = WildcardScope::ArraysOnly;
        }
        if self.subtree_overrides {
            config.options.override_scope = OverrideScope::Subtree;
        }
        config.verify_matches |= self.verify;
        if self.strict {
            config.limits = Limits::strict();
        }
        Ok(config)
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => {
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))
            }
            _ => {
                let mut input = Vec::new();
                io::stdin()
                    .read_to_end(&mut input)
                    .context("reading stdin")?;
                Ok(input)
            }
        }
    }

    fn decode(&self) -> Result<json::JsonValue> {
        let input = self.read_input()?;
        let config = self.config()?;
        let index = config.compile()?;
        let value = json::Parser::new(&input, config.limits)?
            .with_pointer(&index)
            .with_overrides(Arc::new(config.overrides()))
            .with_options(config.options)
            .parse()?;
        Ok(value)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn compile_report(patterns: Vec<String>) -> Result<String> {
    let index = LevelIndex::compile(&PatternSet::new(patterns))?;
    let levels: Vec<Vec<String>> = index
        .levels()
        .iter()
        .map(|bucket| bucket.iter().map(|fp| format!("{fp:08x}")).collect())
        .collect();
    let report = serde_json::json!({
        "seed": format!("{:08x}", index.hasher().seed()),
        "max_depth": index.max_depth(),
        "levels": levels,
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse(args) => {
            let value = args.decode()?;
            println!("{}", json::stringify(&value));
        }
        Commands::Inspect(args) => {
            let value = args.decode()?;
            for scalar in scalars(&value) {
                println!(
                    "{}\t{}\t{}\t{}",
                    scalar.path,
                    scalar.depth,
                    scalar.value.type_name(),
                    encode_value(scalar.value)
                );
            }
        }
        Commands::Hash { texts, seed } => {
            let hasher = seed.map_or_else(Fnv1a::new, Fnv1a::with_seed);
            for text in texts {
                println!("{:08x}\t{text}", hasher.hash(&text));
            }
        }
        Commands::Compile { patterns } => {
            println!("{}", compile_report(patterns)?);
        }
        Commands::Version => {
            println!("jprec v{}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        println!("jprec v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
