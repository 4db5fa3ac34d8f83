//! List the virtual hosts that have `SSLEngine on`, with their location.

use std::path::PathBuf;

use a2conf_core::parse_file;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
	config: PathBuf,
}

fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("a2conf_core=warn")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let tree = parse_file(&args.config)?;

	for vhost in tree.virtual_hosts() {
		let Some(server_name) = tree.first(vhost, "ServerName", false).and_then(|id| tree[id].args()) else {
			continue;
		};
		let ssl = tree
			.first(vhost, "SSLEngine", false)
			.and_then(|id| tree[id].args())
			.is_some_and(|value| value.eq_ignore_ascii_case("on"));

		if ssl {
			let node = &tree[vhost];
			let location = node
				.path()
				.map(|path| format!("{}:{}", path.display(), node.line().unwrap_or_default()))
				.unwrap_or_default();
			println!("{server_name} has SSL enabled ({location})");
		}
	}

	Ok(())
}
