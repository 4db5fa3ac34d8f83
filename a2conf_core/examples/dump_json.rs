//! Print a parsed configuration as nested JSON.
//!
//! ```sh
//! cargo run --example dump_json -- /etc/apache2/apache2.conf
//! ```

use std::path::PathBuf;

use a2conf_core::A2confConfig;
use a2conf_core::parse_file_with;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
	/// Configuration file to read.
	config: PathBuf,
	/// Keep `Include` directives instead of expanding them.
	#[arg(long)]
	no_includes: bool,
}

fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("a2conf_core=warn")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let mut options = A2confConfig::load(&std::env::current_dir().into_diagnostic()?)?
		.unwrap_or_default()
		.parse;
	options.includes = !args.no_includes;

	let tree = parse_file_with(&args.config, &options)?;
	let json = serde_json::to_string_pretty(&tree.to_json(tree.root())).into_diagnostic()?;
	println!("{json}");

	Ok(())
}
