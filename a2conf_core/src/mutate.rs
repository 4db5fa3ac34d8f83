use std::collections::HashSet;

use crate::A2confError;
use crate::A2confResult;
use crate::Tree;
use crate::line::Line;
use crate::line::classify;
use crate::node::Node;
use crate::node::NodeId;
use crate::node::NodeKind;

/// Something that can be inserted into a tree: an existing detached node or a
/// line of configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
	Node(NodeId),
	Raw(String),
}

impl From<NodeId> for Item {
	fn from(id: NodeId) -> Self {
		Self::Node(id)
	}
}

impl From<&str> for Item {
	fn from(raw: &str) -> Self {
		Self::Raw(raw.to_string())
	}
}

impl From<String> for Item {
	fn from(raw: String) -> Self {
		Self::Raw(raw)
	}
}

/// Selects the insertion point for [`Tree::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor<'a> {
	/// Insert right after this child.
	Node(NodeId),
	/// Insert right after the last child with this name, compared
	/// case-insensitively (`ServerName`, `<VirtualHost>`).
	Name(&'a str),
}

impl From<NodeId> for Anchor<'_> {
	fn from(id: NodeId) -> Self {
		Self::Node(id)
	}
}

impl<'a> From<&'a str> for Anchor<'a> {
	fn from(name: &'a str) -> Self {
		Self::Name(name)
	}
}

impl Tree {
	/// Create a detached node from one line of configuration text.
	///
	/// Closing tags are rejected because sections regenerate them.
	pub fn new_node(&mut self, raw: &str) -> A2confResult<NodeId> {
		let line = classify(raw);
		if matches!(line, Line::Close { .. }) {
			return Err(A2confError::InvalidNode(raw.trim().to_string()));
		}

		let node = Node::from_line(line, raw).ok_or_else(|| A2confError::InvalidNode(raw.to_string()))?;
		Ok(self.alloc(node))
	}

	/// Create a detached `command args` directive.
	pub fn new_directive(&mut self, command: impl Into<String>, args: impl Into<String>) -> NodeId {
		self.alloc(Node::new(NodeKind::Directive {
			command: command.into(),
			args: args.into(),
		}))
	}

	/// Create a detached, empty `<tag args>` section.
	pub fn new_section(&mut self, tag: impl Into<String>, args: impl Into<String>) -> NodeId {
		self.alloc(Node::new(NodeKind::Section {
			tag: tag.into(),
			args: args.into(),
			close_suffix: String::new(),
		}))
	}

	/// Create a detached comment line. A leading `# ` is added when missing.
	pub fn new_comment(&mut self, text: &str) -> NodeId {
		let text = text.trim();
		let suffix = if text.starts_with('#') {
			text.to_string()
		} else {
			format!("# {text}")
		};
		let mut node = Node::new(NodeKind::Blank);
		node.suffix = suffix;
		self.alloc(node)
	}

	/// Create a detached blank line.
	pub fn new_blank(&mut self) -> NodeId {
		self.alloc(Node::new(NodeKind::Blank))
	}

	/// Append one item to the end of `parent`'s children.
	pub fn add(&mut self, parent: NodeId, item: impl Into<Item>) -> A2confResult<NodeId> {
		let ids = self.insert_at(parent, vec![item.into()], None)?;
		Ok(ids[0])
	}

	/// Insert `items` as one contiguous block under `parent`.
	///
	/// With an anchor, the block goes right after it: after the anchor node
	/// itself, or after the last child whose name matches. A missing or
	/// unmatched anchor appends to the end. Returns the inserted handles in
	/// order.
	pub fn insert<I>(
		&mut self,
		parent: NodeId,
		items: impl IntoIterator<Item = I>,
		anchor: Option<Anchor<'_>>,
	) -> A2confResult<Vec<NodeId>>
	where
		I: Into<Item>,
	{
		let anchors: Vec<Anchor<'_>> = anchor.into_iter().collect();
		self.insert_at(parent, items.into_iter().map(Into::into).collect(), Some(anchors.as_slice()))
	}

	/// Like [`insert`](Self::insert) with several candidate anchors. The last
	/// anchor in `anchors` that resolves wins, so `["ServerName",
	/// "ServerAlias"]` places the block after the aliases when there are any.
	pub fn insert_after_any<I>(
		&mut self,
		parent: NodeId,
		items: impl IntoIterator<Item = I>,
		anchors: &[Anchor<'_>],
	) -> A2confResult<Vec<NodeId>>
	where
		I: Into<Item>,
	{
		self.insert_at(parent, items.into_iter().map(Into::into).collect(), Some(anchors))
	}

	/// Unlink `id` from its parent. The subtree stays in the arena and can be
	/// inserted again.
	///
	/// Fails with [`A2confError::Detached`] for the root and for nodes that
	/// were already deleted.
	pub fn delete(&mut self, id: NodeId) -> A2confResult<()> {
		let Some(parent) = self.nodes[id.0].parent.take() else {
			return Err(A2confError::Detached);
		};

		self.nodes[parent.0].children.retain(|child| *child != id);
		Ok(())
	}

	/// Move the top-level nodes of `other` to the end of `parent`'s children.
	/// The other tree's root is not copied and its warnings are appended to
	/// this tree's. Returns the new handles of the moved top-level nodes.
	pub fn extend(&mut self, parent: NodeId, mut other: Tree) -> A2confResult<Vec<NodeId>> {
		self.ensure_container(parent)?;
		self.warnings.append(&mut other.warnings);

		let top = std::mem::take(&mut other.nodes[0].children);
		let ids = top
			.into_iter()
			.map(|child| self.adopt(&mut other, child, parent))
			.collect();

		Ok(ids)
	}

	/// Recursively unlink every descendant of `id` for which `keep` returns
	/// `false`. Descendants of removed nodes are not visited.
	pub fn retain<F>(&mut self, id: NodeId, mut keep: F)
	where
		F: FnMut(&Node) -> bool,
	{
		self.retain_inner(id, &mut keep);
	}

	fn retain_inner<F>(&mut self, id: NodeId, keep: &mut F)
	where
		F: FnMut(&Node) -> bool,
	{
		let children = self.nodes[id.0].children.clone();
		let mut kept = Vec::with_capacity(children.len());

		for child in children {
			if keep(&self.nodes[child.0]) {
				kept.push(child);
				self.retain_inner(child, keep);
			} else {
				self.nodes[child.0].parent = None;
			}
		}

		self.nodes[id.0].children = kept;
	}

	fn insert_at(
		&mut self,
		parent: NodeId,
		items: Vec<Item>,
		anchors: Option<&[Anchor<'_>]>,
	) -> A2confResult<Vec<NodeId>> {
		self.ensure_container(parent)?;

		let mut ids = Vec::with_capacity(items.len());
		for item in items {
			let id = match item {
				Item::Node(id) => id,
				Item::Raw(raw) => self.new_node(&raw)?,
			};
			ids.push(id);
		}
		self.ensure_insertable(parent, &ids)?;

		let children = &self.nodes[parent.0].children;
		let index = anchors
			.unwrap_or_default()
			.iter()
			.rev()
			.find_map(|anchor| {
				match anchor {
					Anchor::Node(target) => children.iter().position(|child| child == target),
					Anchor::Name(name) => {
						children
							.iter()
							.rposition(|child| self.nodes[child.0].matches_name(name))
					}
				}
			})
			.map_or(children.len(), |position| position + 1);

		for id in &ids {
			self.nodes[id.0].parent = Some(parent);
		}
		self.nodes[parent.0]
			.children
			.splice(index..index, ids.iter().copied());

		Ok(ids)
	}

	fn ensure_container(&self, id: NodeId) -> A2confResult<()> {
		let node = &self.nodes[id.0];
		if node.is_container() {
			Ok(())
		} else {
			Err(A2confError::NotAContainer(node.kind_label().to_string()))
		}
	}

	fn ensure_insertable(&self, parent: NodeId, ids: &[NodeId]) -> A2confResult<()> {
		let mut seen = HashSet::new();
		for &id in ids {
			let node = &self.nodes[id.0];
			if node.is_root() {
				return Err(A2confError::InvalidNode("root".to_string()));
			}
			if node.parent.is_some() || !seen.insert(id) {
				return Err(A2confError::AlreadyAttached);
			}
			if id == parent || self.ancestors(parent).any(|ancestor| ancestor == id) {
				return Err(A2confError::WouldCreateCycle);
			}
		}

		Ok(())
	}

	/// Move `id` and its subtree out of `other` and under `parent`.
	fn adopt(&mut self, other: &mut Tree, id: NodeId, parent: NodeId) -> NodeId {
		let source = &mut other.nodes[id.0];
		let children = std::mem::take(&mut source.children);
		let node = Node {
			kind: std::mem::replace(&mut source.kind, NodeKind::Blank),
			raw: source.raw.take(),
			suffix: std::mem::take(&mut source.suffix),
			children: Vec::new(),
			parent: None,
			path: source.path.take(),
			line: source.line,
		};

		let new_id = self.alloc(node);
		self.attach(parent, new_id);
		for child in children {
			self.adopt(other, child, new_id);
		}

		new_id
	}
}
