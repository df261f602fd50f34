//! Call disambiguation.
//!
//! Finds the call node a call site belongs to among the debugger calls in
//! the enclosing function body.

use std::sync::Arc;

use scoop_syntax::ast::{Call, CallKind};
use scoop_syntax::{parse_expr, SyntaxKind};
use tracing::debug;

use crate::bindings::Spellings;
use crate::error::{Result, ScoopError};
use crate::extract;
use crate::source::Located;

/// The call a site was resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedCall {
    /// The call node.
    pub call: Call,
    /// Text the call's tree was parsed from.
    pub source: Arc<str>,
    /// `true` if the call was cut out of raw text because the enclosing
    /// block did not parse cleanly.
    pub isolated: bool,
}

impl ResolvedCall {
    /// Source text of each of the `expected` values.
    #[must_use]
    pub fn labels(&self, expected: usize) -> Vec<Option<String>> {
        extract::extract_call(&self.call, &self.source, expected)
    }
}

/// Resolves call sites within one located block.
pub struct Resolver<'a> {
    located: &'a Located,
    spellings: &'a Spellings,
}

impl<'a> Resolver<'a> {
    /// A resolver over `located`, accepting calls spelled per `spellings`.
    #[must_use]
    pub fn new(located: &'a Located, spellings: &'a Spellings) -> Self {
        Self {
            located,
            spellings,
        }
    }

    /// Debugger calls in the block, in evaluation order: nested calls
    /// before the call enclosing them, otherwise left to right.
    #[must_use]
    pub fn candidates(&self) -> Vec<Call> {
        let mut calls: Vec<Call> = self
            .located
            .block
            .descendants()
            .filter_map(Call::cast)
            .filter(|call| self.spellings.matches(call))
            .collect();
        calls.sort_by_key(|call| {
            let range = call.syntax().text_range();
            (range.end(), std::cmp::Reverse(range.start()))
        });
        calls
    }

    /// Picks the call that passed `arity` values.
    ///
    /// `invocation` counts earlier invocations from the same call site and
    /// breaks ties between calls that share it.
    ///
    /// # Errors
    ///
    /// [`ScoopError::NoSourceAvailable`] when no call matches.
    pub fn resolve(&self, arity: usize, invocation: usize) -> Result<ResolvedCall> {
        let site = &self.located.site;
        let candidates = self.candidates();

        let mut found: Vec<Call> = if site.has_column() {
            let (anchored, rest): (Vec<Call>, Vec<Call>) = candidates
                .into_iter()
                .partition(|call| call.anchors().contains(&self.located.offset));
            if anchored.is_empty() {
                rest.into_iter()
                    .filter(|call| self.inside_macro_at_offset(call))
                    .collect()
            } else {
                anchored
            }
        } else {
            candidates
                .into_iter()
                .filter(|call| self.on_line(call))
                .collect()
        };

        if found.len() > 1 {
            let by_arity: Vec<Call> = found
                .iter()
                .filter(|call| extract::arity(call).map_or(true, |n| n == arity))
                .cloned()
                .collect();
            if !by_arity.is_empty() {
                found = by_arity;
            }
        }

        if found.is_empty() {
            if site.has_column() && self.located.block_has_errors() {
                return self.isolate();
            }
            return Err(ScoopError::no_source(
                site.file,
                site.line,
                "no matching call found",
            ));
        }

        let count = found.len();
        let call = found.swap_remove(invocation % count);
        debug!(
            target: "scoop::resolve",
            site = %site,
            candidates = count,
            call = %call.syntax(),
            "resolved call"
        );
        Ok(ResolvedCall {
            call,
            source: Arc::clone(&self.located.file.text),
            isolated: false,
        })
    }

    /// Calls generated by another macro report that macro's position.
    fn inside_macro_at_offset(&self, call: &Call) -> bool {
        let offset = self.located.offset;
        call.syntax()
            .ancestors()
            .skip(1)
            .any(|node| node.kind() == SyntaxKind::MacroCall && node.text_range().start() == offset)
    }

    fn on_line(&self, call: &Call) -> bool {
        let range = call.syntax().text_range();
        let first = self.located.line_col(range.start()).line;
        let last = self.located.line_col(range.end()).line;
        let line = self.located.site.line;
        if line < first || line > last {
            return false;
        }
        call.kind() != CallKind::Method || self.spellings.receiver_is_bound(call)
    }

    /// Cuts the call out of the raw text following the call site, widening
    /// one closing delimiter at a time until the text parses as one call.
    fn isolate(&self) -> Result<ResolvedCall> {
        let site = &self.located.site;
        let text = self.located.text();
        let start = usize::from(self.located.offset);
        let end = usize::from(self.located.block_range().end()).max(start);
        let region = &text[start..end];
        let pad = extract::line_prefix(text, self.located.offset);

        let cuts = region
            .char_indices()
            .filter(|(_, c)| matches!(c, ')' | ']' | '}'))
            .map(|(idx, c)| idx + c.len_utf8());
        for cut in cuts {
            let candidate = format!("{pad}{}", &region[..cut]);
            let parse = parse_expr(&candidate);
            if !parse.ok() {
                continue;
            }
            let Some(call) = extract::sole_call(&parse.syntax()) else {
                continue;
            };
            if !self.spellings.matches(&call) {
                continue;
            }
            debug!(target: "scoop::resolve", site = %site, text = %candidate.trim_start(), "isolated call text");
            return Ok(ResolvedCall {
                call,
                source: Arc::from(candidate),
                isolated: true,
            });
        }

        Err(ScoopError::no_source(
            site.file,
            site.line,
            "could not isolate the call text",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite::CallSite;
    use crate::source::{Locator, MemorySources};

    const FILE: &str = "src/resolve_case.rs";

    fn located(text: &str, line: u32, column: u32) -> Located {
        let sources = MemorySources::new().with_file(FILE, text);
        let site = CallSite {
            file: FILE,
            line,
            column,
            module_path: None,
        };
        Locator::new(&sources).locate(&site).unwrap()
    }

    fn column_of(text: &str, line: u32, needle: &str) -> u32 {
        let line_text = text.lines().nth(line as usize - 1).unwrap();
        let byte = line_text.find(needle).unwrap();
        u32::try_from(line_text[..byte].chars().count() + 1).unwrap()
    }

    fn resolved_text(located: &Located, arity: usize, invocation: usize) -> String {
        let spellings = Spellings::canonical();
        let resolved = Resolver::new(located, &spellings)
            .resolve(arity, invocation)
            .unwrap();
        resolved.call.syntax().text().to_string()
    }

    #[test]
    fn candidates_in_evaluation_order() {
        let text = "fn main() {\n    ic!(ic!(1), ic!(2));\n    ic!(3);\n}\n";
        let located = located(text, 2, 5);
        let spellings = Spellings::canonical();
        let order: Vec<String> = Resolver::new(&located, &spellings)
            .candidates()
            .iter()
            .map(|c| c.syntax().text().to_string())
            .collect();
        assert_eq!(order, vec!["ic!(1)", "ic!(2)", "ic!(ic!(1), ic!(2))", "ic!(3)"]);
    }

    #[test]
    fn same_line_calls_resolve_by_column() {
        let text = "fn main() {\n    let d = &scoop::IC;\n    d.ic((1,)); d.ic((2, 3));\n}\n";
        let first = located(text, 3, column_of(text, 3, "d.ic((1"));
        assert_eq!(resolved_text(&first, 1, 0), "d.ic((1,))");
        let second = located(text, 3, column_of(text, 3, "ic((2"));
        assert_eq!(resolved_text(&second, 2, 0), "d.ic((2, 3))");
    }

    #[test]
    fn calls_inside_other_macros_cycle_in_order() {
        let text = "fn main() {\n    let v = vec![ic!(1), ic!(2)];\n}\n";
        let located = located(text, 2, column_of(text, 2, "vec!"));
        assert_eq!(resolved_text(&located, 1, 0), "ic!(1)");
        assert_eq!(resolved_text(&located, 1, 1), "ic!(2)");
        assert_eq!(resolved_text(&located, 1, 2), "ic!(1)");
    }

    #[test]
    fn nested_debugger_calls() {
        let text = "fn main() {\n    ic!(ic!(1));\n}\n";
        let outer = located(text, 2, 5);
        assert_eq!(resolved_text(&outer, 1, 0), "ic!(ic!(1))");
        assert_eq!(resolved_text(&outer, 1, 1), "ic!(ic!(1))");
        let inner = located(text, 2, 9);
        assert_eq!(resolved_text(&inner, 1, 0), "ic!(1)");
    }

    #[test]
    fn line_only_filters_by_arity() {
        let text = "fn main() {\n    ic!(a); ic!(b, c);\n}\n";
        let located = located(text, 2, 0);
        assert_eq!(resolved_text(&located, 2, 0), "ic!(b, c)");
        assert_eq!(resolved_text(&located, 1, 0), "ic!(a)");
    }

    #[test]
    fn line_only_requires_bound_receiver() {
        let text = "fn main() {\n    let s = when.format(&f); IC.format((a,));\n}\n";
        let located = located(text, 2, 0);
        assert_eq!(resolved_text(&located, 1, 0), "IC.format((a,))");
    }

    #[test]
    fn multiline_call_matches_any_of_its_lines() {
        let text = "fn main() {\n    ic!(\n        a,\n        b,\n    );\n}\n";
        let located = located(text, 3, 0);
        assert_eq!(resolved_text(&located, 2, 0), "ic!(\n        a,\n        b,\n    )");
    }

    #[test]
    fn no_call_at_site() {
        let text = "fn main() {\n    println!(\"x\");\n}\n";
        let located = located(text, 2, 5);
        let spellings = Spellings::canonical();
        let err = Resolver::new(&located, &spellings).resolve(0, 0).unwrap_err();
        assert!(matches!(err, ScoopError::NoSourceAvailable { .. }));
    }

    #[test]
    fn isolates_call_from_broken_block() {
        let text = "fn main() {\n    let v = f::<{ ic!(a, b) }, );\n}\n";
        let located = located(text, 2, column_of(text, 2, "ic!"));
        assert!(located.block_has_errors());

        let spellings = Spellings::canonical();
        let resolved = Resolver::new(&located, &spellings).resolve(2, 0).unwrap();
        assert!(resolved.isolated);
        assert_eq!(resolved.call.syntax().text().to_string(), "ic!(a, b)");
        assert_eq!(
            resolved.labels(2),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
        assert_eq!(resolved.call.syntax().text_range().start(), 18.into());
    }

    #[test]
    fn isolation_gives_up() {
        let text = "fn main() {\n    let v = f::<{ ic!(a, b }, );\n}\n";
        let located = located(text, 2, column_of(text, 2, "ic!"));
        let spellings = Spellings::canonical();
        let err = Resolver::new(&located, &spellings).resolve(2, 0).unwrap_err();
        assert!(err.is_recoverable());
    }
}
