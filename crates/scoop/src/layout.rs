//! Output layout.
//!
//! Label/value pairs go on one line when they fit:
//!
//! ```text
//! ic| main.rs:4 in main()- x: 1, y: "two"
//! ```
//!
//! Otherwise each pair gets its own line, aligned under the first:
//!
//! ```text
//! ic| main.rs:4 in main()
//!     first: 1
//!     second: [
//!                 2,
//!             ]
//! ```
//!
//! Widths are counted in characters. Content is never truncated.

use crate::config::{DEFAULT_CONTEXT_DELIMITER, DEFAULT_LINE_WRAP_WIDTH, DEFAULT_PAIR_DELIMITER};
use crate::extract::is_literal;

/// Layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Width past which output switches to one pair per line.
    pub line_wrap_width: usize,
    /// Separates the context from the values.
    pub context_delimiter: String,
    /// Separates pairs on one line.
    pub pair_delimiter: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_wrap_width: DEFAULT_LINE_WRAP_WIDTH,
            context_delimiter: DEFAULT_CONTEXT_DELIMITER.to_string(),
            pair_delimiter: DEFAULT_PAIR_DELIMITER.to_string(),
        }
    }
}

/// One rendered value and the source text that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Source text of the argument, if it could be recovered.
    pub label: Option<String>,
    /// The rendered value.
    pub value: String,
}

impl Pair {
    /// A pair with a label.
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
        }
    }

    /// A pair printed as its value alone.
    pub fn unlabeled(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }

    /// The label worth printing: absent for a literal whose value prints
    /// as the literal itself. `0x10`, `b'a'` and `1u8` keep theirs.
    fn shown_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|label| !(is_literal(label) && same_text(label, &self.value)))
    }

    fn inline(&self) -> String {
        match self.shown_label() {
            Some(label) => format!("{label}: {}", self.value),
            None => self.value.clone(),
        }
    }
}

/// Lays out one invocation's output.
#[must_use]
pub fn layout(prefix: &str, context: Option<&str>, pairs: &[Pair], opts: &LayoutOptions) -> String {
    if pairs.is_empty() {
        return format!("{prefix}{}", context.unwrap_or_default());
    }

    let joined = pairs
        .iter()
        .map(Pair::inline)
        .collect::<Vec<_>>()
        .join(&opts.pair_delimiter);
    let one_line = match context {
        Some(context) => format!("{prefix}{context}{}{joined}", opts.context_delimiter),
        None => format!("{prefix}{joined}"),
    };

    let first_width = one_line.lines().next().map_or(0, |line| line.chars().count());
    if !joined.contains('\n') && first_width <= opts.line_wrap_width {
        return one_line;
    }

    match context {
        Some(context) => {
            let indent = blank(prefix);
            std::iter::once(format!("{prefix}{context}"))
                .chain(pairs.iter().map(|pair| format_pair(&indent, pair)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        None => {
            let body = pairs
                .iter()
                .map(|pair| format_pair("", pair))
                .collect::<Vec<_>>()
                .join("\n");
            indented_lines(prefix, &body).join("\n")
        }
    }
}

/// One pair in block layout, starting with `line_prefix`.
fn format_pair(line_prefix: &str, pair: &Pair) -> String {
    let Some(label) = pair.shown_label() else {
        return indented_lines(line_prefix, &pair.value).join("\n");
    };

    let mut lines = indented_lines(line_prefix, label);
    let last = lines.pop().unwrap_or_default();
    let value_prefix = format!("{last}: ");

    let value = &pair.value;
    let quoted = value.len() > 1
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    let value = if quoted {
        value.replace('\n', "\n ")
    } else {
        value.clone()
    };

    lines.extend(indented_lines(&value_prefix, &value));
    lines.join("\n")
}

/// `text`'s lines, the first after `prefix` and the rest indented to match.
fn indented_lines(prefix: &str, text: &str) -> Vec<String> {
    let indent = blank(prefix);
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                format!("{prefix}{line}")
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}

/// Equal up to whitespace, so `(1,'c')` matches its value `(1, 'c')`.
fn same_text(label: &str, value: &str) -> bool {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .eq(value.chars().filter(|c| !c.is_whitespace()))
}

fn blank(prefix: &str) -> String {
    " ".repeat(prefix.chars().count())
}
