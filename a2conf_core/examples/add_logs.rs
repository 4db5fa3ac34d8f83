//! Add `CustomLog` and `ErrorLog` directives to virtual hosts missing them.

use std::path::PathBuf;

use a2conf_core::A2confConfig;
use a2conf_core::Anchor;
use a2conf_core::parse_file_with;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
	config: PathBuf,
	/// Where to write the result; `-` prints it.
	#[arg(long, short, default_value = "-")]
	output: PathBuf,
}

fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("a2conf_core=info")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let config = A2confConfig::load(&std::env::current_dir().into_diagnostic()?)?.unwrap_or_default();
	let mut tree = parse_file_with(&args.config, &config.parse)?;
	let vhosts: Vec<_> = tree.virtual_hosts().collect();

	for vhost in vhosts {
		let Some(server_name) = tree
			.first(vhost, "ServerName", false)
			.and_then(|id| tree[id].args())
			.map(ToString::to_string)
		else {
			tracing::info!("virtual host at line {:?} has no ServerName, skipping", tree[vhost].line());
			continue;
		};

		if tree.first(vhost, "CustomLog", false).is_none() {
			let line = format!("CustomLog ${{APACHE_LOG_DIR}}/{server_name}-access.log combined");
			tree.insert_after_any(vhost, [line], &[
				Anchor::Name("ServerName"),
				Anchor::Name("ServerAlias"),
			])?;
		}

		if tree.first(vhost, "ErrorLog", false).is_none() {
			let line = format!("ErrorLog ${{APACHE_LOG_DIR}}/{server_name}-error.log");
			tree.insert_after_any(vhost, [line], &[
				Anchor::Name("ServerName"),
				Anchor::Name("ServerAlias"),
				Anchor::Name("CustomLog"),
			])?;
		}
	}

	tree.write_with(&args.output, &config.dump)?;

	Ok(())
}
