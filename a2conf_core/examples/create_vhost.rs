//! Build a virtual host from scratch and print it.

use a2conf_core::Tree;
use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
	#[arg(default_value = "example.com")]
	server_name: String,
	#[arg(long, default_value = "*:80")]
	listen: String,
}

fn main() -> miette::Result<()> {
	let args = Args::parse();

	let mut tree = Tree::new();
	let root = tree.root();
	let vhost = tree.new_section("VirtualHost", args.listen);
	tree.add(root, vhost)?;

	let comment = tree.new_comment("This VirtualHost is auto-generated");
	tree.add(vhost, comment)?;
	tree.insert(
		vhost,
		[
			format!("ServerName {}", args.server_name),
			format!("ServerAlias www.{}", args.server_name),
			String::new(),
			format!("DocumentRoot /var/www/{}/", args.server_name),
		],
		None,
	)?;

	print!("{tree}");

	Ok(())
}
