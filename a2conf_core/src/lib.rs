//! `a2conf_core` parses Apache httpd configuration files into an editable tree
//! of sections and directives, answers structural queries against it, and
//! writes it back out as configuration text. `Include` and `IncludeOptional`
//! directives are expanded in place, so one tree can describe a whole server
//! configuration spread over many files.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Configuration file
//!   → Line classifier (open tag, close tag, directive, blank/comment)
//!   → Tree builder (one forward pass with a cursor over the open section)
//!   → Include resolver (globs matched files, parses each, splices the nodes)
//!   → Tree (queries, edits)
//!   → Serializer (regenerates text, four spaces per nesting level)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Parse and dump options, loadable from `a2conf.toml`.
//! - [`line`]: Classification of a single configuration line.
//! - [`include`]: Include path resolution and glob expansion.
//!
//! ## Key Types
//!
//! - [`Tree`]: An arena owning every node of a parsed configuration.
//! - [`NodeId`]: A handle to one node; equal handles mean the same node.
//! - [`Node`]: The fields of one node: kind, arguments, comment, source
//!   location.
//! - [`ParseWarning`]: A non-fatal problem recorded during parsing.
//! - [`A2confError`]: Every error the crate can return.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a2conf_core::parse_file;
//!
//! let mut tree = parse_file("/etc/apache2/apache2.conf").unwrap();
//!
//! for vhost in tree.virtual_hosts().collect::<Vec<_>>() {
//! 	if tree.first(vhost, "SSLEngine", false).is_none() {
//! 		tree.delete(vhost).unwrap();
//! 	}
//! }
//!
//! // `-` prints to standard output.
//! tree.write("-").unwrap();
//! ```

pub use builder::*;
pub use config::*;
pub use error::*;
pub use mutate::*;
pub use node::*;
pub use query::*;
pub use serializer::*;
pub use tree::*;

mod builder;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod include;
pub mod line;
mod mutate;
mod node;
mod query;
mod serializer;
mod tree;

#[cfg(test)]
mod __fixtures;
