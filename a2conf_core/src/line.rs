//! Classification of a single physical configuration line.

/// One classified line of Apache-style configuration.
///
/// Every variant keeps the trailing comment (including the whitespace that
/// precedes the `#`) so it can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Line {
	/// `<Tag args>` opens a section. `trailing` is any non-comment text after
	/// the `>`; it is also kept at the front of `suffix`.
	Open {
		tag: String,
		args: String,
		trailing: String,
		suffix: String,
	},
	/// `</Tag>` closes the innermost open section.
	Close { tag: String, suffix: String },
	/// `Command args`.
	Directive {
		command: String,
		args: String,
		suffix: String,
	},
	/// Empty line or a line holding only a comment. `suffix` is the comment
	/// text, empty for a blank line.
	Blank { suffix: String },
	/// A line that could not be classified. It is kept verbatim.
	Raw { raw: String },
}

impl Line {
	/// Returns `true` for lines that open a section.
	pub fn is_open(&self) -> bool {
		matches!(self, Self::Open { .. })
	}

	/// Returns `true` for lines that close a section.
	pub fn is_close(&self) -> bool {
		matches!(self, Self::Close { .. })
	}
}

/// Classify one line. Surrounding whitespace is ignored.
///
/// ```
/// use a2conf_core::line::Line;
/// use a2conf_core::line::classify;
///
/// assert_eq!(
/// 	classify("  ServerName example.com # main"),
/// 	Line::Directive {
/// 		command: "ServerName".into(),
/// 		args: "example.com".into(),
/// 		suffix: " # main".into(),
/// 	}
/// );
/// ```
pub fn classify(line: &str) -> Line {
	let line = line.trim();
	let (body, suffix) = split_comment(line);
	let suffix = suffix.to_string();

	if let Some(rest) = body.strip_prefix("</") {
		let tag = rest
			.split(|c: char| c.is_whitespace() || c == '>')
			.next()
			.unwrap_or_default()
			.to_string();
		return Line::Close { tag, suffix };
	}

	if let Some(inner) = body.strip_prefix('<') {
		let tag_end = inner
			.find(|c: char| c.is_whitespace() || c == '>')
			.unwrap_or(inner.len());
		let tag = &inner[..tag_end];
		if tag.is_empty() {
			return Line::Raw {
				raw: line.to_string(),
			};
		}

		let rest = &inner[tag_end..];
		let (args, trailing) = match rest.find('>') {
			Some(end) => (rest[..end].trim(), rest[end + 1..].trim()),
			None => (rest.trim(), ""),
		};
		let suffix = if trailing.is_empty() {
			suffix
		} else {
			format!(" {trailing}{suffix}")
		};
		return Line::Open {
			tag: tag.to_string(),
			args: args.to_string(),
			trailing: trailing.to_string(),
			suffix,
		};
	}

	if body.is_empty() {
		return Line::Blank { suffix };
	}

	let (command, args) = split_command(body);
	Line::Directive {
		command: command.to_string(),
		args: args.to_string(),
		suffix,
	}
}

/// Split `body` at its first run of whitespace into command and arguments.
pub(crate) fn split_command(body: &str) -> (&str, &str) {
	match body.find(char::is_whitespace) {
		Some(end) => (&body[..end], body[end..].trim()),
		None => (body, ""),
	}
}

/// Split a trimmed line into its content and its trailing comment.
///
/// A `#` opens a comment at the start of the line or after whitespace, outside
/// double quotes. Inside quotes a backslash escapes the next character. The
/// returned suffix begins at the whitespace preceding the `#`.
pub(crate) fn split_comment(line: &str) -> (&str, &str) {
	let mut in_quotes = false;
	let mut escaped = false;
	let mut previous: Option<char> = None;

	for (index, c) in line.char_indices() {
		if escaped {
			escaped = false;
			previous = Some(c);
			continue;
		}

		match c {
			'\\' if in_quotes => escaped = true,
			'"' => in_quotes = !in_quotes,
			'#' if !in_quotes && previous.is_none_or(char::is_whitespace) => {
				let start = line[..index].trim_end().len();
				return (&line[..start], &line[start..]);
			}
			_ => {}
		}
		previous = Some(c);
	}

	(line, "")
}
