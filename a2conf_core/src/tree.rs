use std::ops::Index;
use std::ops::IndexMut;
use std::path::Path;
use std::path::PathBuf;

use crate::ParseWarning;
use crate::node::Node;
use crate::node::NodeId;
use crate::node::NodeKind;

const ROOT: NodeId = NodeId(0);

/// A parsed configuration: an arena owning every node, rooted at
/// [`Tree::root`].
///
/// Children are owned through the arena; parent links are plain handles.
/// Deleting a node only unlinks it, so its handle stays valid and the node can
/// be inserted again. All nodes are released when the tree is dropped.
#[derive(Debug, Clone)]
pub struct Tree {
	pub(crate) nodes: Vec<Node>,
	pub(crate) path: Option<PathBuf>,
	pub(crate) warnings: Vec<ParseWarning>,
}

impl Default for Tree {
	fn default() -> Self {
		Self::new()
	}
}

impl Tree {
	/// Create an empty tree holding only a root.
	pub fn new() -> Self {
		Self {
			nodes: vec![Node::new(NodeKind::Root)],
			path: None,
			warnings: Vec::new(),
		}
	}

	pub fn root(&self) -> NodeId {
		ROOT
	}

	/// The file this tree was parsed from.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn set_path(&mut self, path: impl Into<PathBuf>) {
		self.path = Some(path.into());
	}

	/// Non-fatal problems recorded while parsing, in the order they were
	/// found.
	pub fn warnings(&self) -> &[ParseWarning] {
		&self.warnings
	}

	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(id.0)
	}

	/// Whether `id` is reachable from the root.
	pub fn is_attached(&self, id: NodeId) -> bool {
		id == ROOT || self.ancestors(id).any(|ancestor| ancestor == ROOT)
	}

	pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(node);
		id
	}

	/// Append an already allocated, detached node to `parent`.
	pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
	}
}

impl Index<NodeId> for Tree {
	type Output = Node;

	fn index(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}
}

impl IndexMut<NodeId> for Tree {
	fn index_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id.0]
	}
}
