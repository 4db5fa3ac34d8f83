use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum A2confError {
	#[error(transparent)]
	#[diagnostic(code(a2conf::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read configuration file `{path}`: {reason}")]
	#[diagnostic(code(a2conf::file_read))]
	FileRead { path: String, reason: String },

	#[error("failed to parse a2conf config file: {0}")]
	#[diagnostic(
		code(a2conf::config_parse),
		help("check that a2conf.toml is valid TOML with [parse] and/or [dump] sections")
	)]
	ConfigParse(String),

	#[error("include cycle detected: {chain}")]
	#[diagnostic(
		code(a2conf::include_cycle),
		help("remove the Include directive that re-enters a file already being parsed")
	)]
	IncludeCycle { chain: String },

	#[error("`Include {pattern}` at {file}:{line} matched no files")]
	#[diagnostic(
		code(a2conf::missing_include),
		help("use `IncludeOptional` for targets that may be absent, or set `missing_include = \"warn\"`")
	)]
	MissingInclude {
		pattern: String,
		file: String,
		line: usize,
	},

	#[error("invalid include pattern `{pattern}`: {reason}")]
	#[diagnostic(code(a2conf::invalid_glob))]
	InvalidGlob { pattern: String, reason: String },

	#[error("closing tag `</{tag}>` at {file}:{line} has no open section")]
	#[diagnostic(
		code(a2conf::unbalanced_close),
		help("remove the stray closing tag or set `unbalanced_close = \"clamp\"`")
	)]
	UnbalancedClose {
		tag: String,
		file: String,
		line: usize,
	},

	#[error("closing tag `</{found}>` at {file}:{line} does not match open section `<{expected}>`")]
	#[diagnostic(
		code(a2conf::mismatched_close),
		help("fix the closing tag or disable `strict_close_tags`")
	)]
	MismatchedClose {
		expected: String,
		found: String,
		file: String,
		line: usize,
	},

	#[error("node is not attached to a parent")]
	#[diagnostic(
		code(a2conf::detached),
		help("the node was already deleted, or it is the root of its tree")
	)]
	Detached,

	#[error("node is already attached to a parent")]
	#[diagnostic(
		code(a2conf::already_attached),
		help("delete the node from its current parent before inserting it elsewhere")
	)]
	AlreadyAttached,

	#[error("`{0}` nodes cannot have children")]
	#[diagnostic(code(a2conf::not_a_container))]
	NotAContainer(String),

	#[error("inserting a node into its own subtree would create a cycle")]
	#[diagnostic(code(a2conf::would_create_cycle))]
	WouldCreateCycle,

	#[error("tree was not parsed from a file")]
	#[diagnostic(
		code(a2conf::no_source_path),
		help("use `write(path)` with an explicit target instead of `save()`")
	)]
	NoSourcePath,

	#[error("cannot build a node from `{0}`")]
	#[diagnostic(
		code(a2conf::invalid_node),
		help("closing tags are generated from their section and cannot be inserted as nodes")
	)]
	InvalidNode(String),
}

pub type A2confResult<T> = Result<T, A2confError>;
