//! Command-line interface for abnf
//!
//! Usage:
//!   abnf check `<grammar>` `<rule>` `<input>` [--query `<json>`]   - Match input against a rule
//!   abnf rules `<grammar>`                                      - Print the compiled rules
//!
//! `<input>` is a file path, or `-` to read standard input. `check` exits with status 1 when
//! the input does not match and 2 on any other error.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use abnf::abnf::config::{AbnfConfig, Loader};
use abnf::abnf::formats::{FormatRegistry, JsonFormatter, TreevizFormatter, YamlFormatter};
use abnf::{Grammar, Mode, Node, Query};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "abnf", version, about = "Compile ABNF grammars and match input against them")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file layered over the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate input against a grammar rule
    Check {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Rule to evaluate, in any casing
        rule: String,

        /// Input file, or `-` for standard input
        input: String,

        /// Print the nodes matching a JSON query instead of the whole tree,
        /// e.g. '{"name": "host"}'
        #[arg(short, long)]
        query: Option<String>,

        /// Fail unless the rule matches the entire input
        #[arg(long)]
        complete: bool,

        /// Output format: treeviz, json or yaml
        #[arg(short, long)]
        format: Option<String>,

        /// Include failed attempts in treeviz output
        #[arg(long)]
        show_failures: bool,
    },
    /// Print every compiled rule in grammar notation
    Rules {
        #[command(flatten)]
        grammar: GrammarArgs,
    },
}

#[derive(Debug, Args)]
struct GrammarArgs {
    /// Grammar source file
    grammar: PathBuf,

    /// How grammar line endings are read: strict or lenient
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Do not layer the grammar over the RFC 5234 core rules
    #[arg(long)]
    no_core: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_directive = directive_for_verbosity(cli.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::from(2)
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "abnf=warn",
        1 => "abnf=debug",
        _ => "abnf=trace",
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check {
            grammar,
            rule,
            input,
            query,
            complete,
            format,
            show_failures,
        } => {
            let mut loader = load_config(cli.config.as_deref(), &grammar)?;
            if let Some(format) = format {
                loader = loader.set_override("output.format", format)?;
            }
            if show_failures {
                loader = loader.set_override("output.show_failures", true)?;
            }
            let config = loader.build()?;

            let compiled = compile(&grammar.grammar, &config)?;
            let input = read_input(&input)?;
            let query = query
                .as_deref()
                .map(serde_json::from_str::<Query>)
                .transpose()?;

            handle_check_command(&compiled, &rule, &input, query.as_ref(), complete, &config)
        }
        Command::Rules { grammar } => {
            let config = load_config(cli.config.as_deref(), &grammar)?.build()?;
            let compiled = compile(&grammar.grammar, &config)?;
            handle_rules_command(&compiled);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>, grammar: &GrammarArgs) -> CliResult<Loader> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(mode) = grammar.mode {
        loader = loader.set_override("compile.mode", mode.to_string())?;
    }
    if grammar.no_core {
        loader = loader.set_override("compile.core", false)?;
    }
    Ok(loader)
}

fn compile(path: &Path, config: &AbnfConfig) -> CliResult<Grammar> {
    let source = fs::read_to_string(path)
        .map_err(|error| format!("cannot read grammar {}: {error}", path.display()))?;
    let mode = config.compile.mode;

    let grammar = if config.compile.core {
        Grammar::core()?.extend(mode, &source)?
    } else {
        Grammar::compile(mode, &source)?
    };
    info!(path = %path.display(), rules = grammar.rules().len(), %mode, "grammar compiled");
    Ok(grammar)
}

fn read_input(input: &str) -> CliResult<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    fs::read_to_string(input).map_err(|error| format!("cannot read input {input}: {error}").into())
}

/// Handle the check command
fn handle_check_command(
    grammar: &Grammar,
    rule: &str,
    input: &str,
    query: Option<&Query>,
    complete: bool,
    config: &AbnfConfig,
) -> CliResult<ExitCode> {
    let rule = grammar.rule(rule)?;
    let graph = rule.graph(input);
    let root = graph.root();

    let matched = match root.length() {
        Some(length) => !complete || length == input.len(),
        None => false,
    };
    debug!(rule = rule.name(), outcome = ?root.outcome(), matched, "evaluated input");

    let output = match query {
        Some(query) => render_matches(&graph.filter(query), config)?,
        None => registry(config).serialize(root, config.output.format.as_str())?,
    };
    print!("{output}");

    if !matched {
        if let Some(length) = root.length() {
            eprintln!("matched {length} of {} bytes", input.len());
        }
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the rules command
fn handle_rules_command(grammar: &Grammar) {
    for (name, rule) in grammar.rules() {
        println!("{name} = {}", rule.expression());
    }
}

fn registry(config: &AbnfConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(TreevizFormatter {
        label_width: config.output.label_width,
        show_failures: config.output.show_failures,
    });
    registry.register(JsonFormatter);
    registry.register(YamlFormatter);
    registry
}

fn render_matches(nodes: &[&Node<'_>], config: &AbnfConfig) -> CliResult<String> {
    use abnf::abnf::config::OutputFormat;

    let rendered = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(nodes)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(nodes)?,
        OutputFormat::Treeviz => nodes
            .iter()
            .filter_map(|node| {
                node.text()
                    .map(|text| format!("{} @{}: {:?}\n", node.path(), node.index(), text))
            })
            .collect(),
    };
    Ok(rendered)
}
