use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::A2confError;
use crate::A2confResult;
use crate::Tree;
use crate::config::DumpOptions;
use crate::node::NodeId;
use crate::node::NodeKind;

/// Write target that prints to standard output instead of a file.
pub const STDOUT_PATH: &str = "-";

impl Tree {
	/// Render the whole tree with default options.
	pub fn dump(&self) -> String {
		self.dump_with(&DumpOptions::default())
	}

	/// Render the whole tree.
	pub fn dump_with(&self, options: &DumpOptions) -> String {
		self.dump_node(self.root(), options)
	}

	/// Render `id` and its subtree as if it were at the top level. The root
	/// renders only its children.
	pub fn dump_node(&self, id: NodeId, options: &DumpOptions) -> String {
		let mut output = String::new();
		self.render(&mut output, id, 0, options);
		output
	}

	/// Write the rendered tree into `writer`.
	pub fn write_to(&self, writer: &mut impl Write, options: &DumpOptions) -> A2confResult<()> {
		writer.write_all(self.dump_with(options).as_bytes())?;
		writer.flush()?;
		Ok(())
	}

	/// Write the tree to `path` with default options. The path `-` prints to
	/// standard output.
	pub fn write(&self, path: impl AsRef<Path>) -> A2confResult<()> {
		self.write_with(path, &DumpOptions::default())
	}

	/// Write the tree to `path`. The path `-` prints to standard output.
	pub fn write_with(&self, path: impl AsRef<Path>, options: &DumpOptions) -> A2confResult<()> {
		let path = path.as_ref();
		if path == Path::new(STDOUT_PATH) {
			return self.write_to(&mut std::io::stdout().lock(), options);
		}

		let file = File::create(path)?;
		self.write_to(&mut BufWriter::new(file), options)?;
		tracing::debug!("wrote {}", path.display());
		Ok(())
	}

	/// Write the tree back to the file it was parsed from.
	pub fn save(&self) -> A2confResult<()> {
		let Some(path) = self.path() else {
			return Err(A2confError::NoSourcePath);
		};

		self.write(path)
	}

	fn render(&self, output: &mut String, id: NodeId, depth: usize, options: &DumpOptions) {
		let node = &self[id];
		let indent = options.indent.repeat(depth);
		let suffix = if options.comments { node.suffix.as_str() } else { "" };

		match &node.kind {
			NodeKind::Root => {
				for &child in &node.children {
					self.render(output, child, depth, options);
				}
			}
			NodeKind::Directive { command, args } => {
				output.push_str(&indent);
				output.push_str(command);
				push_args(output, args);
				output.push_str(suffix);
				output.push('\n');
			}
			NodeKind::Section {
				tag,
				args,
				close_suffix,
			} => {
				output.push_str(&indent);
				output.push('<');
				output.push_str(tag);
				push_args(output, args);
				output.push('>');
				output.push_str(suffix);
				output.push('\n');

				for &child in &node.children {
					self.render(output, child, depth + 1, options);
				}

				output.push_str(&indent);
				output.push_str("</");
				output.push_str(tag);
				output.push('>');
				if options.comments {
					output.push_str(close_suffix);
				}
				output.push('\n');
			}
			NodeKind::Blank => {
				if node.suffix.is_empty() {
					if options.blank_lines {
						output.push('\n');
					}
				} else if options.comments {
					output.push_str(&indent);
					output.push_str(&node.suffix);
					output.push('\n');
				}
			}
			NodeKind::Raw => {
				output.push_str(&indent);
				output.push_str(node.raw.as_deref().unwrap_or_default());
				output.push('\n');
			}
		}
	}
}

fn push_args(output: &mut String, args: &str) {
	if !args.is_empty() {
		output.push(' ');
		output.push_str(args);
	}
}

impl fmt::Display for Tree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.dump())
	}
}
