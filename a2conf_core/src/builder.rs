use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::A2confError;
use crate::A2confResult;
use crate::Tree;
use crate::config::ParseOptions;
use crate::config::UnbalancedClosePolicy;
use crate::include::is_include;
use crate::line::Line;
use crate::line::classify;
use crate::node::Node;
use crate::node::NodeId;
use crate::node::NodeKind;

/// A problem found while parsing that did not stop the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
	/// File being parsed when the problem was found. `None` for text parsed
	/// from memory.
	pub file: Option<PathBuf>,
	/// 1-indexed line number.
	pub line: usize,
	pub kind: WarningKind,
}

/// The kind of [`ParseWarning`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum WarningKind {
	/// The line could not be classified and was kept verbatim.
	UnparsableLine { raw: String },
	/// Text followed the `>` of a section opening tag. It is kept in the
	/// opening line's suffix.
	TrailingText { tag: String, text: String },
	/// An include pattern matched no files.
	MissingInclude { pattern: String },
	/// An included file could not be read or parsed and was skipped.
	IncludeFailed { target: String, reason: String },
	/// A closing tag appeared with no open section.
	UnbalancedClose { tag: String },
	/// A closing tag named a different section than the one it closed.
	MismatchedClose { expected: String, found: String },
	/// A section was still open at the end of the file.
	UnclosedSection { tag: String },
}

impl ParseWarning {
	/// Human-readable message for this warning.
	pub fn message(&self) -> String {
		match &self.kind {
			WarningKind::UnparsableLine { raw } => {
				format!("cannot parse line `{raw}`, keeping it verbatim")
			}
			WarningKind::TrailingText { tag, text } => {
				format!("text `{text}` after `<{tag}>` is not part of the section arguments")
			}
			WarningKind::MissingInclude { pattern } => {
				format!("include pattern `{pattern}` matched no files")
			}
			WarningKind::IncludeFailed { target, reason } => {
				format!("failed to include `{target}`: {reason}")
			}
			WarningKind::UnbalancedClose { tag } => {
				format!("closing tag `</{tag}>` has no open section")
			}
			WarningKind::MismatchedClose { expected, found } => {
				format!("closing tag `</{found}>` closes section `<{expected}>`")
			}
			WarningKind::UnclosedSection { tag } => {
				format!("section `<{tag}>` is never closed")
			}
		}
	}

	/// `file:line` location, or just the line for in-memory text.
	pub fn location(&self) -> String {
		match &self.file {
			Some(file) => format!("{}:{}", file.display(), self.line),
			None => format!("line {}", self.line),
		}
	}
}

/// Parse configuration text with default options.
pub fn parse_str(content: impl AsRef<str>) -> A2confResult<Tree> {
	parse_str_with(content, &ParseOptions::default())
}

/// Parse configuration text. Relative includes resolve against
/// `options.server_root`, or the working directory when unset.
pub fn parse_str_with(content: impl AsRef<str>, options: &ParseOptions) -> A2confResult<Tree> {
	let mut builder = Builder::new(options);
	let mut tree = builder.build(content.as_ref(), None)?;
	tree.warnings = builder.warnings;
	Ok(tree)
}

/// Parse a configuration file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> A2confResult<Tree> {
	parse_file_with(path, &ParseOptions::default())
}

/// Parse a configuration file, expanding includes as configured.
///
/// A missing or unreadable `path` fails the whole parse; problems inside
/// included files are recorded as warnings on the returned tree.
pub fn parse_file_with(path: impl AsRef<Path>, options: &ParseOptions) -> A2confResult<Tree> {
	let mut builder = Builder::new(options);
	let mut tree = builder.build_file(path.as_ref())?;
	tree.warnings = builder.warnings;
	Ok(tree)
}

/// Single-pass tree builder shared by a top-level parse and every file it
/// includes.
pub(crate) struct Builder<'a> {
	pub(crate) options: &'a ParseOptions,
	/// Canonical paths of the files currently being parsed, outermost first.
	pub(crate) open_files: Vec<PathBuf>,
	pub(crate) warnings: Vec<ParseWarning>,
}

impl<'a> Builder<'a> {
	pub(crate) fn new(options: &'a ParseOptions) -> Self {
		Self {
			options,
			open_files: Vec::new(),
			warnings: Vec::new(),
		}
	}

	/// Read and parse `path` as an independent tree.
	pub(crate) fn build_file(&mut self, path: &Path) -> A2confResult<Tree> {
		let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
		if self.open_files.contains(&canonical) {
			let chain = self
				.open_files
				.iter()
				.chain(std::iter::once(&canonical))
				.map(|file| file.display().to_string())
				.collect::<Vec<_>>()
				.join(" -> ");
			return Err(A2confError::IncludeCycle { chain });
		}

		let content = std::fs::read_to_string(path).map_err(|e| {
			A2confError::FileRead {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		self.open_files.push(canonical);
		let result = self.build(&content, Some(path));
		self.open_files.pop();

		result
	}

	/// Build a tree from `content` in one forward pass over its lines.
	pub(crate) fn build(&mut self, content: &str, file: Option<&Path>) -> A2confResult<Tree> {
		let mut tree = Tree::new();
		tree.path = file.map(Path::to_path_buf);
		tree.nodes[0].path = tree.path.clone();

		let root = tree.root();
		let mut cursor = root;

		for (index, raw) in content.lines().enumerate() {
			let line_number = index + 1;
			let line = classify(raw);

			match line {
				Line::Close { tag, suffix } => {
					cursor = self.close_section(&mut tree, cursor, tag, suffix, file, line_number)?;
				}
				Line::Blank { ref suffix } if suffix.is_empty() && !self.options.keep_blank_lines => {}
				Line::Directive {
					ref command,
					ref args,
					..
				} if self.options.includes && is_include(command) => {
					self.expand_include(&mut tree, cursor, command, args, file, line_number)?;
				}
				line => {
					if let Line::Raw { raw: text } = &line {
						self.warn(file, line_number, WarningKind::UnparsableLine {
							raw: text.clone(),
						});
					}
					if let Line::Open { tag, trailing, .. } = &line {
						if !trailing.is_empty() {
							self.warn(file, line_number, WarningKind::TrailingText {
								tag: tag.clone(),
								text: trailing.clone(),
							});
						}
					}

					let opens = line.is_open();
					let Some(node) = Node::from_line(line, raw) else {
						continue;
					};
					let id = tree.alloc(node.located(file, line_number));
					tree.attach(cursor, id);
					if opens {
						cursor = id;
					}
				}
			}
		}

		let last_line = content.lines().count();
		while cursor != root {
			if let Some(tag) = tree[cursor].section() {
				let tag = tag.to_string();
				self.warn(file, last_line, WarningKind::UnclosedSection { tag });
			}
			cursor = tree[cursor].parent.unwrap_or(root);
		}

		Ok(tree)
	}

	/// Pop the cursor for a closing tag and return the new cursor.
	fn close_section(
		&mut self,
		tree: &mut Tree,
		cursor: NodeId,
		found: String,
		suffix: String,
		file: Option<&Path>,
		line: usize,
	) -> A2confResult<NodeId> {
		let Some(parent) = tree[cursor].parent else {
			return match self.options.unbalanced_close {
				UnbalancedClosePolicy::Reject => {
					Err(A2confError::UnbalancedClose {
						tag: found,
						file: display_file(file),
						line,
					})
				}
				UnbalancedClosePolicy::Clamp => {
					self.warn(file, line, WarningKind::UnbalancedClose { tag: found });
					Ok(cursor)
				}
			};
		};

		if let NodeKind::Section {
			tag, close_suffix, ..
		} = &mut tree[cursor].kind
		{
			if !tag.eq_ignore_ascii_case(&found) {
				if self.options.strict_close_tags {
					return Err(A2confError::MismatchedClose {
						expected: tag.clone(),
						found,
						file: display_file(file),
						line,
					});
				}

				let expected = tag.clone();
				*close_suffix = suffix;
				self.warn(file, line, WarningKind::MismatchedClose { expected, found });
				return Ok(parent);
			}

			*close_suffix = suffix;
		}

		Ok(parent)
	}

	pub(crate) fn warn(&mut self, file: Option<&Path>, line: usize, kind: WarningKind) {
		let warning = ParseWarning {
			file: file.map(Path::to_path_buf),
			line,
			kind,
		};
		tracing::warn!("{}: {}", warning.location(), warning.message());
		self.warnings.push(warning);
	}
}

pub(crate) fn display_file(file: Option<&Path>) -> String {
	file.map_or_else(|| "<input>".to_string(), |file| file.display().to_string())
}
