use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::A2confError;
use crate::A2confResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["a2conf.toml", ".a2conf.toml", ".config/a2conf.toml"];

/// Indent unit written once per nesting level.
pub const DEFAULT_INDENT: &str = "    ";

/// What to do when a plain `Include` matches no files.
///
/// `IncludeOptional` is never affected by this setting; a missing optional
/// target is always recorded as a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MissingIncludePolicy {
	/// Record a warning and continue with the rest of the file.
	#[default]
	Warn,
	/// Fail the whole parse.
	Error,
}

/// What to do with a closing tag that has no open section to close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum UnbalancedClosePolicy {
	/// Stay at the root, record a warning and keep parsing.
	#[default]
	Clamp,
	/// Fail the whole parse.
	Reject,
}

/// Options controlling how configuration text is turned into a tree.
///
/// ```toml
/// [parse]
/// includes = true
/// missing_include = "warn"
/// unbalanced_close = "clamp"
/// strict_close_tags = false
/// keep_blank_lines = true
/// server_root = "/etc/apache2"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParseOptions {
	/// Expand `Include` and `IncludeOptional` directives. When `false` they
	/// are kept as ordinary directives.
	pub includes: bool,
	/// Policy for a plain `Include` whose target matches nothing.
	pub missing_include: MissingIncludePolicy,
	/// Policy for closing tags that would pop past the root.
	pub unbalanced_close: UnbalancedClosePolicy,
	/// Require `</Tag>` to name the section it closes. When `false` any
	/// closing tag closes the innermost open section and a mismatch is only
	/// recorded as a warning.
	pub strict_close_tags: bool,
	/// Keep empty lines as blank nodes so they survive a dump.
	pub keep_blank_lines: bool,
	/// Directory that relative include paths resolve against. When unset they
	/// resolve against the directory of the including file.
	pub server_root: Option<PathBuf>,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			includes: true,
			missing_include: MissingIncludePolicy::default(),
			unbalanced_close: UnbalancedClosePolicy::default(),
			strict_close_tags: false,
			keep_blank_lines: true,
			server_root: None,
		}
	}
}

impl ParseOptions {
	/// Shorthand for options that leave include directives untouched.
	pub fn without_includes() -> Self {
		Self {
			includes: false,
			..Self::default()
		}
	}
}

/// Options controlling how a tree is written back to text.
///
/// ```toml
/// [dump]
/// indent = "    "
/// comments = true
/// blank_lines = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
	/// String written once per nesting level.
	pub indent: String,
	/// Emit comment-only lines and trailing `#` comments.
	pub comments: bool,
	/// Emit blank lines.
	pub blank_lines: bool,
}

impl Default for DumpOptions {
	fn default() -> Self {
		Self {
			indent: DEFAULT_INDENT.to_string(),
			comments: true,
			blank_lines: true,
		}
	}
}

/// Configuration loaded from an `a2conf.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct A2confConfig {
	#[serde(default)]
	pub parse: ParseOptions,
	#[serde(default)]
	pub dump: DumpOptions,
}

impl A2confConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> A2confResult<Option<A2confConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	/// Parse a config from TOML text.
	pub fn from_toml(content: &str) -> A2confResult<A2confConfig> {
		toml::from_str(content).map_err(|e| A2confError::ConfigParse(e.to_string()))
	}
}
