//! Transom: the building-model translator.
//!
//! Transom translates between a typed, in-memory building-energy model graph
//! and the flat, name-addressed workspace format a simulation engine
//! consumes. The translator walks the object graph recursively, memoizing by
//! identity so shared schedules and curves are emitted exactly once, placing
//! a named placeholder before populating each record so companion objects
//! that reference each other resolve cleanly, and emitting every record
//! before the records that reference it.
//!
//! # Modules
//!
//! - [`schema`]: The schema registry (object types, field descriptors,
//!   reference groups)
//! - [`model`]: The source object graph
//! - [`workspace`]: The flat target document
//! - [`translate`]: The forward and reverse translators
//! - [`validate`]: Model validation and error reporting
//! - [`error`]: Error types for transom operations

pub mod error;
pub mod model;
pub mod schema;
pub mod translate;
pub mod validate;
pub mod workspace;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::TransomError;

use translate::{ForwardTranslator, ReverseTranslator, TranslateOptions, TranslationReport};

/// The transom CLI application.
#[derive(Parser)]
#[command(name = "transom")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Translate a model graph into a workspace.
    Forward(ForwardArgs),
    /// Translate a workspace back into a model graph.
    Reverse(ReverseArgs),
    /// Validate a model graph against the schema.
    Validate(ValidateArgs),
}

/// Arguments for the forward subcommand.
#[derive(clap::Args)]
struct ForwardArgs {
    /// Input model graph (JSON).
    input: PathBuf,

    /// Schema registry file (JSON); defaults to the built-in registry.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Write the resulting workspace to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,

    /// Re-validate choice fields against the schema.
    #[arg(long)]
    validate_choices: bool,

    /// Bound on the reference-chain recursion depth.
    #[arg(long, default_value_t = 128)]
    max_depth: usize,
}

/// Arguments for the reverse subcommand.
#[derive(clap::Args)]
struct ReverseArgs {
    /// Input workspace (JSON).
    input: PathBuf,

    /// Schema registry file (JSON); defaults to the built-in registry.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Write the resulting model graph to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,

    /// Re-validate choice fields against the schema.
    #[arg(long)]
    validate_choices: bool,

    /// Bound on the reference-chain recursion depth.
    #[arg(long, default_value_t = 128)]
    max_depth: usize,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input model graph (JSON) to validate.
    input: PathBuf,

    /// Schema registry file (JSON); defaults to the built-in registry.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the transom CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TransomError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Forward(args)) => run_forward(args),
        Some(Commands::Reverse(args)) => run_reverse(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            // No subcommand: just print a banner and exit successfully.
            println!("transom {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("The building-model translator.");
            println!();
            println!("Run 'transom --help' for usage information.");
            Ok(())
        }
    }
}

/// Loads the schema registry from a file, or falls back to the built-in one.
fn load_schema(path: &Option<PathBuf>) -> Result<schema::SchemaRegistry, TransomError> {
    match path {
        Some(path) => schema::io_json::read_schema_json(path),
        None => Ok(schema::builtin()),
    }
}

/// Prints a translation report in the requested format.
fn print_report(report: &TranslationReport, format: &str) -> Result<(), TransomError> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(report)
                .expect("translation reports always serialize");
            println!("{}", json);
            Ok(())
        }
        "text" => {
            print!("{}", report);
            Ok(())
        }
        other => Err(TransomError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// Execute the forward subcommand.
fn run_forward(args: ForwardArgs) -> Result<(), TransomError> {
    let registry = load_schema(&args.schema)?;
    let graph = model::io_json::read_model_json(&args.input)?;

    let options = TranslateOptions {
        max_depth: args.max_depth,
        validate_choices: args.validate_choices,
    };
    let translation = ForwardTranslator::new(&registry)
        .with_options(options)
        .translate(&graph)?;

    print_report(&translation.report, &args.report)?;
    println!("{} record(s) emitted", translation.workspace.len());

    if let Some(output) = &args.output {
        workspace::io_json::write_workspace_json(output, &translation.workspace)?;
    }
    Ok(())
}

/// Execute the reverse subcommand.
fn run_reverse(args: ReverseArgs) -> Result<(), TransomError> {
    let registry = load_schema(&args.schema)?;
    let workspace = workspace::io_json::read_workspace_json(&args.input)?;

    let options = TranslateOptions {
        max_depth: args.max_depth,
        validate_choices: args.validate_choices,
    };
    let translation = ReverseTranslator::new(&registry)
        .with_options(options)
        .translate(&workspace)?;

    print_report(&translation.report, &args.report)?;
    println!("{} object(s) built", translation.model.len());

    if let Some(output) = &args.output {
        model::io_json::write_model_json(output, &translation.model)?;
    }
    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), TransomError> {
    let registry = load_schema(&args.schema)?;
    let graph = model::io_json::read_model_json(&args.input)?;

    let opts = validate::ValidateOptions {
        strict: args.strict,
    };
    let report = validate::validate_model(&graph, &registry, &opts);

    match args.output.as_str() {
        "json" => {
            // Simple JSON output for programmatic use
            println!("{{");
            println!("  \"error_count\": {},", report.error_count());
            println!("  \"warning_count\": {},", report.warning_count());
            println!("  \"issues\": [");
            for (i, issue) in report.issues.iter().enumerate() {
                let comma = if i < report.issues.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"severity\": \"{:?}\",", issue.severity);
                println!("      \"code\": \"{:?}\",", issue.code);
                println!(
                    "      \"message\": \"{}\",",
                    issue.message.replace('"', "\\\"")
                );
                println!("      \"context\": \"{}\"", issue.context);
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        _ => {
            // Default text output
            print!("{}", report);
        }
    }

    // Determine exit status
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(TransomError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
