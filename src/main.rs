use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use protofix::config::{RuleSet, default_rules};
use protofix::patch::run;

#[derive(Parser)]
#[command(name = "protofix")]
#[command(
	author,
	version,
	about = "Copy a proto tree to a scratch directory and patch it for the schema compiler"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// The source protos directory
	#[arg(value_name = "SOURCE_DIR", required_unless_present = "list_rules")]
	source: Option<PathBuf>,

	/// The temporary destination directory (must already exist)
	#[arg(value_name = "DEST_DIR", required_unless_present = "list_rules")]
	destination: Option<PathBuf>,

	/// Print the built-in rules and exit
	#[arg(long)]
	list_rules: bool,

	/// Log more (-v for info, -vv for debug); RUST_LOG overrides
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run_cli(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("protofix={level}")));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run_cli(cli: Cli) -> Result<ExitCode> {
	let rule_set = default_rules().context("Failed to load built-in rules")?;

	if cli.list_rules {
		return handle_list_rules(&rule_set);
	}

	match (cli.source, cli.destination) {
		(Some(source), Some(destination)) => handle_patch(&source, &destination, &rule_set),
		// clap enforces both positionals unless --list-rules is given
		_ => anyhow::bail!(
			"Two arguments required: the source protos directory path and temporary destination one"
		),
	}
}

fn handle_patch(source: &Path, destination: &Path, rule_set: &RuleSet) -> Result<ExitCode> {
	let report = run(source, destination, rule_set).with_context(|| {
		format!(
			"Failed to patch {} into {}",
			source.display(),
			destination.display()
		)
	})?;

	tracing::info!(
		copied = report.files_copied,
		patched = report.files_patched.len(),
		"done"
	);
	Ok(ExitCode::SUCCESS)
}

fn handle_list_rules(rule_set: &RuleSet) -> Result<ExitCode> {
	if rule_set.rules.is_empty() {
		println!("No rules defined.");
		return Ok(ExitCode::SUCCESS);
	}

	for (i, rule) in rule_set.rules.iter().enumerate() {
		println!("Rule {}: {}", i + 1, rule.name);
		if let Some(ref files) = rule.files {
			for file in files {
				println!("    file: {file}");
			}
		}
		if let Some(ref glob) = rule.glob {
			println!("    glob: {glob}");
		}
		for replacement in &rule.replace {
			println!("    replace: {} -> {}", replacement.from, replacement.to);
		}
		for substitution in &rule.substitute {
			println!("    substitute: {substitution}");
		}
		if rule.quote_examples {
			println!("    quote-examples: true");
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}
