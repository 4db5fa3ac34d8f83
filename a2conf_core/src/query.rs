use std::slice;

use serde_json::Map;
use serde_json::Value;

use crate::Tree;
use crate::node::NodeId;
use crate::node::NodeKind;

/// Lazy iterator over the children or descendants of a node.
///
/// Created by [`Tree::children`]. Descendants are produced in depth-first
/// pre-order, which is document order.
#[derive(Debug, Clone)]
pub struct Children<'a> {
	tree: &'a Tree,
	stack: Vec<slice::Iter<'a, NodeId>>,
	name: Option<&'a str>,
	recursive: bool,
}

impl Iterator for Children<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<NodeId> {
		loop {
			let Some(&id) = self.stack.last_mut()?.next() else {
				self.stack.pop();
				continue;
			};

			let node = &self.tree[id];
			if self.recursive && !node.children.is_empty() {
				self.stack.push(node.children.iter());
			}

			if self.name.is_none_or(|name| node.matches_name(name)) {
				return Some(id);
			}
		}
	}
}

/// Iterator over the parent chain of a node, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
	tree: &'a Tree,
	current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<NodeId> {
		let id = self.current?;
		self.current = self.tree[id].parent;
		Some(id)
	}
}

impl Tree {
	/// Children of `id`, or all its descendants when `recursive` is set,
	/// optionally restricted to nodes named `name`.
	///
	/// Names compare ASCII case-insensitively; sections are named `<Tag>`.
	///
	/// ```
	/// use a2conf_core::parse_str;
	///
	/// let tree = parse_str("<VirtualHost *:80>\nServerName a.com\n</VirtualHost>\n").unwrap();
	/// let vhost = tree.first(tree.root(), "<VirtualHost>", false).unwrap();
	/// let names: Vec<_> = tree
	/// 	.children(vhost, Some("servername"), false)
	/// 	.filter_map(|id| tree[id].args())
	/// 	.collect();
	/// assert_eq!(names, ["a.com"]);
	/// ```
	pub fn children<'a>(&'a self, id: NodeId, name: Option<&'a str>, recursive: bool) -> Children<'a> {
		Children {
			tree: self,
			stack: vec![self[id].children.iter()],
			name,
			recursive,
		}
	}

	/// First node that [`children`](Self::children) would yield, or `None`.
	pub fn first(&self, id: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
		self.children(id, Some(name), recursive).next()
	}

	/// Every node below the root in document order.
	pub fn descendants(&self) -> Children<'_> {
		self.children(self.root(), None, true)
	}

	/// Parents of `id`, nearest first, ending with the root. Detached nodes
	/// stop at the top of their detached subtree.
	pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
		Ancestors {
			tree: self,
			current: self[id].parent,
		}
	}

	/// Nesting depth of `id`; top-level nodes have depth `0`.
	pub fn depth(&self, id: NodeId) -> usize {
		self.ancestors(id).count().saturating_sub(1)
	}

	/// All `<VirtualHost>` sections, including ones nested in conditional
	/// sections such as `<IfModule>`.
	pub fn virtual_hosts(&self) -> Children<'_> {
		self.children(self.root(), Some("<VirtualHost>"), true)
	}

	/// Host names served by `vhost`: its `ServerName` followed by every
	/// `ServerAlias` value, in order.
	pub fn host_names(&self, vhost: NodeId) -> Vec<String> {
		let mut names = Vec::new();
		if let Some(args) = self.first(vhost, "ServerName", false).and_then(|id| self[id].args()) {
			names.push(args.to_string());
		}

		for alias in self.children(vhost, Some("ServerAlias"), false) {
			if let Some(args) = self[alias].args() {
				names.extend(args.split_whitespace().map(ToString::to_string));
			}
		}

		names
	}

	/// Virtual hosts serving `hostname`. When `arg` is given only hosts whose
	/// section arguments contain it (for example `:443`) are returned.
	pub fn find_virtual_hosts<'a>(
		&'a self,
		hostname: &'a str,
		arg: Option<&'a str>,
	) -> impl Iterator<Item = NodeId> + 'a {
		self.virtual_hosts().filter(move |&vhost| {
			let matches_arg = arg.is_none_or(|arg| self[vhost].args().is_some_and(|args| args.contains(arg)));
			matches_arg && self.host_names(vhost).iter().any(|name| name == hostname)
		})
	}

	/// First virtual host serving `hostname`, if any.
	pub fn find_virtual_host(&self, hostname: &str, arg: Option<&str>) -> Option<NodeId> {
		self.find_virtual_hosts(hostname, arg).next()
	}

	/// Summarize the subtree under `id` as nested JSON.
	///
	/// Sections become objects keyed by `"Tag args"`, directives become
	/// `"Command": "args"` pairs. Repeated keys keep the last value; comments
	/// and blank lines are skipped.
	pub fn to_json(&self, id: NodeId) -> Value {
		let mut map = Map::new();

		for &child in &self[id].children {
			match &self[child].kind {
				NodeKind::Section { tag, args, .. } => {
					let key = if args.is_empty() {
						tag.clone()
					} else {
						format!("{tag} {args}")
					};
					map.insert(key, self.to_json(child));
				}
				NodeKind::Directive { command, args } => {
					map.insert(command.clone(), Value::String(args.clone()));
				}
				_ => {}
			}
		}

		Value::Object(map)
	}
}
