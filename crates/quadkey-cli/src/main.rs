use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use quadkey_core::{
    build_quad_slots_with, classify, escape_quotes, normalize_value_with, KeyDigest, Literal,
    Persisted, Quad, QuadSlot, SlotConfig, Term,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

/// Exit code for a term or quad the normalizer rejects
const EXIT_INVALID: i32 = 1;
/// Exit code for unreadable or unparseable input
const EXIT_ERROR: i32 = 2;

/// QuadKey — 64-bit surrogate keys for RDF quad terms
#[derive(Parser)]
#[command(name = "quadkey", version, about, long_about = None)]
struct Cli {
    /// Suppress normal output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log level for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the surrogate key of a single term
    Hash {
        #[command(flatten)]
        term: TermArgs,
        /// Datatype URI of a --literal
        #[arg(long, requires = "literal")]
        datatype: Option<String>,
        /// Language tag of a --literal
        #[arg(long, requires = "literal")]
        lang: Option<String>,
        #[command(flatten)]
        key: KeyArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize every position of a quad read from a JSON file
    Quad {
        /// Path to a JSON quad, or `-` for stdin
        file: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Escape quotes in a literal value for SQL persistence
    Escape {
        /// Raw literal text
        text: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TermArgs {
    /// URI term
    #[arg(long)]
    uri: Option<String>,
    /// Blank node identifier
    #[arg(long)]
    bnode: Option<String>,
    /// Literal lexical value
    #[arg(long)]
    literal: Option<String>,
    /// Quoted graph identifier
    #[arg(long)]
    quoted_graph: Option<String>,
    /// Query variable name
    #[arg(long)]
    variable: Option<String>,
    /// Regex pattern placeholder
    #[arg(long)]
    pattern: Option<String>,
    /// The absent term
    #[arg(long)]
    null: bool,
}

#[derive(Args)]
struct KeyArgs {
    /// Fold keys into the signed 64-bit range
    #[arg(long)]
    signed: bool,
    /// Digest used to derive keys
    #[arg(long, value_enum, default_value_t = DigestArg::Md5)]
    digest: DigestArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum DigestArg {
    Md5,
    Sha256,
}

impl KeyArgs {
    fn config(&self) -> SlotConfig {
        SlotConfig {
            use_signed_ints: self.signed,
            digest: match self.digest {
                DigestArg::Md5 => KeyDigest::Md5,
                DigestArg::Sha256 => KeyDigest::Sha256,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let exit_code = match cli.command {
        Commands::Hash {
            term,
            datatype,
            lang,
            key,
            json,
        } => cmd_hash(term_from_args(term, datatype, lang), key.config(), json, cli.quiet),
        Commands::Quad { file, key, json } => cmd_quad(&file, key.config(), json, cli.quiet),
        Commands::Escape { text } => {
            if !cli.quiet {
                println!("{}", escape_quotes(&text));
            }
            0
        }
        Commands::Version => {
            println!(
                "quadkey {} (quadkey-core {})",
                env!("CARGO_PKG_VERSION"),
                quadkey_core::VERSION
            );
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn term_from_args(args: TermArgs, datatype: Option<String>, lang: Option<String>) -> Term {
    if let Some(uri) = args.uri {
        Term::uri(uri)
    } else if let Some(id) = args.bnode {
        Term::blank(id)
    } else if let Some(lexical) = args.literal {
        Term::literal(Literal {
            lexical,
            datatype,
            language: lang,
        })
    } else if let Some(identifier) = args.quoted_graph {
        Term::quoted_graph(identifier)
    } else if let Some(name) = args.variable {
        Term::variable(name)
    } else if let Some(regex) = args.pattern {
        Term::pattern(regex)
    } else {
        Term::Null
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_hash(term: Term, config: SlotConfig, json: bool, quiet: bool) -> i32 {
    let result = classify(&term)
        .and_then(|kind| normalize_value_with(&term, kind, config).map(|key| (kind, key)));
    let (kind, key) = match result {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return EXIT_INVALID;
        }
    };
    tracing::info!(%term, %kind, %key, "hashed term");

    if quiet {
        return 0;
    }
    if json {
        let out = serde_json::json!({
            "term": term,
            "kind": kind,
            "key": key,
            "signed": config.use_signed_ints,
            "digest": config.digest,
        });
        println!("{}", out);
    } else {
        println!("{} {}", "kind:".bold(), kind);
        println!("{} {}", "key: ".bold(), key);
    }
    0
}

fn cmd_quad(file: &Path, config: SlotConfig, json: bool, quiet: bool) -> i32 {
    let text = match read_input(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{} cannot read {}: {}", "error:".red().bold(), file.display(), e);
            return EXIT_ERROR;
        }
    };
    let quad: Quad = match serde_json::from_str(&text) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{} invalid quad JSON: {}", "error:".red().bold(), e);
            return EXIT_ERROR;
        }
    };
    let slots = match build_quad_slots_with(&quad, config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return EXIT_INVALID;
        }
    };
    let datatype = slots.iter().find_map(QuadSlot::datatype_slot);

    if quiet {
        return 0;
    }
    if json {
        let out = serde_json::json!({
            "slots": slots.iter().map(slot_json).collect::<Vec<_>>(),
            "datatype": datatype.as_ref().map(slot_json),
        });
        println!("{}", out);
    } else {
        for slot in &slots {
            print_slot(slot.position().label(), slot);
        }
        if let Some(ref dt) = datatype {
            print_slot("dataType", dt);
        }
    }
    0
}

// ── Helpers ───────────────────────────────────────────────

fn read_input(file: &Path) -> std::io::Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(file)
    }
}

fn persisted_json(slot: &QuadSlot) -> serde_json::Value {
    match slot.canonicalize_for_persistence() {
        None => serde_json::Value::Null,
        Some(Persisted::Bytes(bytes)) => {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        Some(Persisted::Term(term)) => serde_json::to_value(term).unwrap_or_default(),
    }
}

fn slot_json(slot: &QuadSlot) -> serde_json::Value {
    serde_json::json!({
        "position": slot.position(),
        "kind": slot.kind(),
        "key": slot.key(),
        "term": slot.term(),
        "persisted": persisted_json(slot),
    })
}

fn print_slot(label: &str, slot: &QuadSlot) {
    println!(
        "{} {} {:>20}  {}",
        format!("{:<10}", label).bold(),
        slot.kind(),
        slot.key().to_string(),
        slot.term()
    );
}
