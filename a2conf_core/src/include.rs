//! Expansion of `Include` and `IncludeOptional` directives.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use ignore::WalkBuilder;

use crate::A2confError;
use crate::A2confResult;
use crate::Tree;
use crate::builder::Builder;
use crate::builder::WarningKind;
use crate::builder::display_file;
use crate::config::MissingIncludePolicy;
use crate::node::NodeId;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Whether `command` pulls other files into the configuration.
pub fn is_include(command: &str) -> bool {
	command.eq_ignore_ascii_case("include") || command.eq_ignore_ascii_case("includeoptional")
}

fn is_optional(command: &str) -> bool {
	command.eq_ignore_ascii_case("includeoptional")
}

/// Turn an include argument into an absolute-or-relative pattern.
///
/// Quotes are removed, relative paths are joined onto `base_dir`, and a path
/// naming a directory becomes `<dir>/*`.
pub fn resolve_pattern(argument: &str, base_dir: &Path) -> PathBuf {
	let argument = argument.trim();
	let unquoted = if argument.starts_with(['"', '\'']) {
		snailquote::unescape(argument).unwrap_or_else(|_| argument.to_string())
	} else {
		argument.to_string()
	};

	let path = Path::new(&unquoted);
	let resolved = if path.is_absolute() {
		path.to_path_buf()
	} else {
		base_dir.join(path)
	};

	if resolved.is_dir() {
		resolved.join("*")
	} else {
		resolved
	}
}

/// List the files matched by `pattern`, sorted by file name and then by full
/// path.
///
/// A pattern without wildcards matches itself when it names a file. Wildcards
/// may appear in any component; a `*` never crosses a `/`. Files whose name
/// starts with `.` only match when the last pattern component also starts with
/// `.`.
pub fn expand_pattern(pattern: &Path) -> A2confResult<Vec<PathBuf>> {
	if !has_glob_meta(&pattern.to_string_lossy()) {
		return Ok(if pattern.is_file() {
			vec![pattern.to_path_buf()]
		} else {
			Vec::new()
		});
	}

	let mut base = PathBuf::new();
	let mut rest: Vec<String> = Vec::new();
	for component in pattern.components() {
		let text = component.as_os_str().to_string_lossy();
		if rest.is_empty() && !has_glob_meta(&text) {
			base.push(component);
		} else if matches!(component, Component::Normal(_)) {
			rest.push(text.into_owned());
		}
	}
	if base.as_os_str().is_empty() {
		base = PathBuf::from(".");
	}

	let relative_pattern = rest.join("/");
	let matcher = GlobBuilder::new(&relative_pattern)
		.literal_separator(true)
		.build()
		.map_err(|e| {
			A2confError::InvalidGlob {
				pattern: pattern.display().to_string(),
				reason: e.to_string(),
			}
		})?
		.compile_matcher();
	let allow_hidden = rest.last().is_some_and(|last| last.starts_with('.'));
	let max_depth = if relative_pattern.contains("**") {
		None
	} else {
		Some(rest.len())
	};

	let walker = WalkBuilder::new(&base)
		.standard_filters(false)
		.follow_links(true)
		.max_depth(max_depth)
		.build();

	let mut matches: Vec<PathBuf> = walker
		.filter_map(Result::ok)
		.filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
		.filter_map(|entry| {
			let path = entry.into_path();
			let relative = path.strip_prefix(&base).ok()?;
			let hidden = relative
				.file_name()
				.is_some_and(|name| name.to_string_lossy().starts_with('.'));
			(matcher.is_match(relative) && (allow_hidden || !hidden)).then_some(path)
		})
		.collect();

	matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
	Ok(matches)
}

fn has_glob_meta(text: &str) -> bool {
	text.contains(GLOB_META)
}

/// Fatal errors cross include boundaries; everything else is isolated to the
/// included file.
fn is_fatal(error: &A2confError) -> bool {
	matches!(
		error,
		A2confError::IncludeCycle { .. } | A2confError::MissingInclude { .. }
	)
}

impl Builder<'_> {
	/// Parse every file matched by an include directive and splice its
	/// top-level nodes onto `cursor`. The directive itself is not kept.
	pub(crate) fn expand_include(
		&mut self,
		tree: &mut Tree,
		cursor: NodeId,
		command: &str,
		argument: &str,
		file: Option<&Path>,
		line: usize,
	) -> A2confResult<()> {
		let base_dir = self
			.options
			.server_root
			.clone()
			.or_else(|| file.and_then(Path::parent).map(Path::to_path_buf))
			.unwrap_or_else(|| PathBuf::from("."));
		let pattern = resolve_pattern(argument, &base_dir);

		let files = match expand_pattern(&pattern) {
			Ok(files) => files,
			Err(e) => {
				self.warn(file, line, WarningKind::IncludeFailed {
					target: pattern.display().to_string(),
					reason: e.to_string(),
				});
				return Ok(());
			}
		};

		if files.is_empty() {
			if !is_optional(command) && self.options.missing_include == MissingIncludePolicy::Error {
				return Err(A2confError::MissingInclude {
					pattern: pattern.display().to_string(),
					file: display_file(file),
					line,
				});
			}

			self.warn(file, line, WarningKind::MissingInclude {
				pattern: pattern.display().to_string(),
			});
			return Ok(());
		}

		tracing::debug!(
			"{command} {argument} matched {} file(s) at {}:{line}",
			files.len(),
			display_file(file)
		);

		for path in files {
			match self.build_file(&path) {
				Ok(included) => {
					tree.extend(cursor, included)?;
				}
				Err(e) if is_fatal(&e) => return Err(e),
				Err(e) => {
					self.warn(file, line, WarningKind::IncludeFailed {
						target: path.display().to_string(),
						reason: e.to_string(),
					});
				}
			}
		}

		Ok(())
	}
}
