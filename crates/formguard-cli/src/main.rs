use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use formguard_core::{
    check_value, CnpjPolicy, ErrorReport, KeyBinding, RawValue, RuleKind, Schema, Validator,
    ValueBag,
};

#[derive(Parser)]
#[command(name = "formguard")]
#[command(about = "Validate form values against a field schema", long_about = None)]
struct Cli {
    /// Log rule dispatch at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a values file against a schema file
    Validate(ValidateArgs),

    /// Check a single value against one rule
    Check(CheckArgs),
}

#[derive(Args)]
struct ValidateArgs {
    /// Schema file (.yaml/.yml or .json)
    #[arg(short, long)]
    schema: PathBuf,

    /// Values file (.yaml/.yml or .json), a mapping of field name to value
    #[arg(long)]
    values: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the schema's key binding
    #[arg(long, value_enum)]
    key_binding: Option<KeyBindingArg>,

    /// Override the schema's CNPJ policy
    #[arg(long, value_enum)]
    cnpj_policy: Option<CnpjPolicyArg>,
}

#[derive(Args)]
struct CheckArgs {
    /// Rule identifier, e.g. cpf, cnpj, email, required, toBeTrue
    rule: String,

    /// Value to check
    value: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyBindingArg {
    Fixed,
    FieldName,
}

impl From<KeyBindingArg> for KeyBinding {
    fn from(arg: KeyBindingArg) -> Self {
        match arg {
            KeyBindingArg::Fixed => KeyBinding::Fixed,
            KeyBindingArg::FieldName => KeyBinding::FieldName,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CnpjPolicyArg {
    Lenient,
    Strict,
}

impl From<CnpjPolicyArg> for CnpjPolicy {
    fn from(arg: CnpjPolicyArg) -> Self {
        match arg {
            CnpjPolicyArg::Lenient => CnpjPolicy::Lenient,
            CnpjPolicyArg::Strict => CnpjPolicy::Strict,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let passed = match cli.command {
        Commands::Validate(args) => run_validate(args)?,
        Commands::Check(args) => run_check(args),
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_schema(path: &Path) -> Result<Schema> {
    let schema = if is_yaml(path) {
        Schema::from_yaml_file(path)
    } else {
        Schema::from_json_file(path)
    };
    schema.with_context(|| format!("Failed to load schema from {}", path.display()))
}

fn load_values(path: &Path) -> Result<ValueBag> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values from {}", path.display()))?;

    let raw: RawValue = if is_yaml(path) {
        serde_yaml::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };

    match raw {
        RawValue::Object(map) => Ok(map.into_iter().collect()),
        RawValue::Null => Ok(ValueBag::new()),
        other => bail!(
            "Values file {} must contain a mapping, found {}",
            path.display(),
            other
        ),
    }
}

fn run_validate(args: ValidateArgs) -> Result<bool> {
    let schema = load_schema(&args.schema)?;
    let values = load_values(&args.values)?;

    let mut config = schema.options;
    if let Some(key_binding) = args.key_binding {
        config.key_binding = key_binding.into();
    }
    if let Some(cnpj_policy) = args.cnpj_policy {
        config.cnpj_policy = cnpj_policy.into();
    }

    tracing::debug!(
        fields = schema.len(),
        values = values.len(),
        config = ?config,
        "Validating"
    );

    let report = Validator::new(config).validate(&schema, &values);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&schema, &report),
    }

    Ok(!report.has_error())
}

fn print_text(schema: &Schema, report: &ErrorReport) {
    for (field, rule) in schema.iter() {
        let status = if report.is_invalid(field) { "INVALID" } else { "ok" };
        println!("{:<24} {:<18} {}", field, rule, status);
    }
    println!("hasError: {}", report.has_error());
}

fn run_check(args: CheckArgs) -> bool {
    let rule = RuleKind::from(args.rule);
    if !rule.is_known() {
        tracing::warn!(rule = %rule, "Unknown rule, checking truthiness");
    }

    let invalid = check_value(&rule, RawValue::String(args.value));
    println!("{}", if invalid { "invalid" } else { "valid" });
    !invalid
}
