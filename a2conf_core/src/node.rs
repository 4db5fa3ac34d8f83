use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::line::Line;

/// Handle to a node stored in a [`Tree`](crate::Tree).
///
/// Two handles are equal when they refer to the same node, regardless of the
/// node's contents. Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// The arena index behind this handle.
	pub fn index(self) -> usize {
		self.0
	}
}

/// The structural kind of a [`Node`] together with its parsed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NodeKind {
	/// The single root of a tree. It has no line of its own.
	Root,
	/// `<Tag args> ... </Tag>`. The closing line is regenerated from `tag`
	/// when the tree is written; `close_suffix` holds the comment that
	/// followed the closing tag in the source.
	Section {
		tag: String,
		args: String,
		close_suffix: String,
	},
	/// `Command args`.
	Directive { command: String, args: String },
	/// Empty line or comment-only line. The comment lives in the node suffix.
	Blank,
	/// A line that could not be classified, kept verbatim in the node's raw
	/// text.
	Raw,
}

/// A single entry of a configuration tree.
///
/// Nodes are owned by their [`Tree`](crate::Tree) and addressed with
/// [`NodeId`]. Structural links (`parent`, `children`) can only be changed
/// through the tree's mutation methods; the textual fields are editable
/// through `&mut tree[id]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	pub(crate) kind: NodeKind,
	pub(crate) raw: Option<String>,
	pub(crate) suffix: String,
	pub(crate) children: Vec<NodeId>,
	pub(crate) parent: Option<NodeId>,
	pub(crate) path: Option<PathBuf>,
	pub(crate) line: Option<usize>,
}

impl Node {
	pub(crate) fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			raw: None,
			suffix: String::new(),
			children: Vec::new(),
			parent: None,
			path: None,
			line: None,
		}
	}

	/// Build a node from a classified line. Returns `None` for closing tags,
	/// which never become nodes.
	pub(crate) fn from_line(line: Line, raw: &str) -> Option<Self> {
		let (kind, suffix) = match line {
			Line::Open {
				tag, args, suffix, ..
			} => {
				(
					NodeKind::Section {
						tag,
						args,
						close_suffix: String::new(),
					},
					suffix,
				)
			}
			Line::Directive {
				command,
				args,
				suffix,
			} => (NodeKind::Directive { command, args }, suffix),
			Line::Blank { suffix } => (NodeKind::Blank, suffix),
			Line::Raw { .. } => (NodeKind::Raw, String::new()),
			Line::Close { .. } => return None,
		};

		Some(Self {
			raw: Some(raw.trim().to_string()),
			suffix,
			..Self::new(kind)
		})
	}

	pub(crate) fn located(mut self, path: Option<&Path>, line: usize) -> Self {
		self.path = path.map(Path::to_path_buf);
		self.line = Some(line);
		self
	}

	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	/// The source text this node was built from, if any.
	pub fn raw(&self) -> Option<&str> {
		self.raw.as_deref()
	}

	/// Trailing comment, including the whitespace before the `#`.
	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	pub fn set_suffix(&mut self, suffix: impl Into<String>) {
		self.suffix = suffix.into();
	}

	pub fn parent(&self) -> Option<NodeId> {
		self.parent
	}

	/// Child handles in document order.
	pub fn child_ids(&self) -> &[NodeId] {
		&self.children
	}

	/// File the node was read from.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// 1-indexed line number within [`path`](Self::path).
	pub fn line(&self) -> Option<usize> {
		self.line
	}

	/// Section tag, e.g. `VirtualHost`.
	pub fn section(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Section { tag, .. } => Some(tag),
			_ => None,
		}
	}

	/// Directive command, e.g. `ServerName`.
	pub fn command(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Directive { command, .. } => Some(command),
			_ => None,
		}
	}

	/// Argument string of a section or directive.
	pub fn args(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Section { args, .. } | NodeKind::Directive { args, .. } => Some(args),
			_ => None,
		}
	}

	/// Replace the argument string and return the previous one. Nodes without
	/// arguments are left untouched and return `None`.
	pub fn set_args(&mut self, value: impl Into<String>) -> Option<String> {
		match &mut self.kind {
			NodeKind::Section { args, .. } | NodeKind::Directive { args, .. } => {
				Some(std::mem::replace(args, value.into()))
			}
			_ => None,
		}
	}

	/// Name used for lookups: `<Tag>` for sections, the command for
	/// directives.
	pub fn name(&self) -> Option<String> {
		match &self.kind {
			NodeKind::Section { tag, .. } => Some(format!("<{tag}>")),
			NodeKind::Directive { command, .. } => Some(command.clone()),
			_ => None,
		}
	}

	/// Compare [`name`](Self::name) with `name`, ignoring ASCII case.
	/// Sections are matched by `<Tag>`; the closing `>` may be omitted.
	pub fn matches_name(&self, name: &str) -> bool {
		match &self.kind {
			NodeKind::Section { tag, .. } => {
				name.strip_prefix('<').is_some_and(|rest| {
					rest.strip_suffix('>')
						.unwrap_or(rest)
						.eq_ignore_ascii_case(tag)
				})
			}
			NodeKind::Directive { command, .. } => command.eq_ignore_ascii_case(name),
			_ => false,
		}
	}

	pub fn is_root(&self) -> bool {
		matches!(self.kind, NodeKind::Root)
	}

	pub fn is_section(&self) -> bool {
		matches!(self.kind, NodeKind::Section { .. })
	}

	pub fn is_directive(&self) -> bool {
		matches!(self.kind, NodeKind::Directive { .. })
	}

	/// Only the root and sections may hold children.
	pub fn is_container(&self) -> bool {
		matches!(self.kind, NodeKind::Root | NodeKind::Section { .. })
	}

	pub(crate) fn kind_label(&self) -> &'static str {
		match self.kind {
			NodeKind::Root => "root",
			NodeKind::Section { .. } => "section",
			NodeKind::Directive { .. } => "directive",
			NodeKind::Blank => "blank",
			NodeKind::Raw => "raw",
		}
	}
}
