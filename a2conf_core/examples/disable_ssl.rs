//! Drop every virtual host that enables SSL, point the remaining ones at a new
//! document root and strip their aliases.

use std::path::PathBuf;

use a2conf_core::Anchor;
use a2conf_core::parse_file;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
	config: PathBuf,
	/// Document root for the virtual hosts that are kept.
	#[arg(long, default_value = "/var/www/example2")]
	document_root: String,
	/// Write the result back to `config` instead of printing it.
	#[arg(long)]
	in_place: bool,
}

fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("a2conf_core=warn")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let mut tree = parse_file(&args.config)?;
	let vhosts: Vec<_> = tree.virtual_hosts().collect();

	for vhost in vhosts {
		if tree.first(vhost, "SSLEngine", true).is_some() {
			tree.delete(vhost)?;
			continue;
		}

		match tree.first(vhost, "DocumentRoot", false) {
			Some(id) => {
				tree[id].set_args(args.document_root.as_str());
				tree[id].set_suffix(" # New DocumentRoot!");
			}
			None => {
				let line = format!("DocumentRoot {}", args.document_root);
				tree.insert(vhost, [line], Some(Anchor::Name("ServerName")))?;
			}
		}

		let aliases: Vec<_> = tree.children(vhost, Some("ServerAlias"), false).collect();
		for alias in aliases {
			tree.delete(alias)?;
		}
	}

	if args.in_place {
		tree.save()?;
	} else {
		tree.write("-")?;
	}

	Ok(())
}
