//! Which names refer to the debugger at a call site.
//!
//! The entry point can be renamed (`use scoop::ic as peek;`) and a debugger
//! instance can be bound to any name (`let d = &scoop::IC;`). A
//! [`FrameBindings`] implementation reports those bindings for the scopes
//! around a located call; [`Spellings`] turns them into the set of call
//! shapes that count as debugger calls.

use rowan::NodeOrToken;
use rustc_hash::{FxHashMap, FxHashSet};
use scoop_syntax::ast::{Call, CallKind};
use scoop_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

use crate::source::Located;

/// What a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Binding {
    /// The `ic` entry point (macro or function).
    EntryPoint,
    /// A [`Debugger`](crate::Debugger) instance.
    Instance,
}

/// Names bound in one scope.
pub type Bindings = FxHashMap<SmolStr, Binding>;

/// Reports the names bound to the debugger around a call.
pub trait FrameBindings: Send + Sync {
    /// Bindings inside the enclosing function: `use` renames, `let`
    /// bindings and parameters.
    fn local_bindings(&self, located: &Located) -> Bindings;

    /// Bindings outside any function body: `use` renames and `static` or
    /// `const` items.
    fn enclosing_bindings(&self, located: &Located) -> Bindings;
}

/// Finds bindings by scanning the syntax tree of the call's file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceBindings;

impl FrameBindings for SourceBindings {
    fn local_bindings(&self, located: &Located) -> Bindings {
        let mut bindings = Bindings::default();
        let block = &located.block;
        if block.kind() != SyntaxKind::Block {
            return bindings;
        }

        if let Some(params) = block
            .parent()
            .and_then(|def| def.children().find(|n| n.kind() == SyntaxKind::ParamList))
        {
            for param in params.children().filter(|n| n.kind() == SyntaxKind::Param) {
                scan_declaration(&param, &mut bindings);
            }
        }

        for node in block.descendants() {
            if !same_function(&node, block) {
                continue;
            }
            match node.kind() {
                SyntaxKind::UseItem => scan_use(&node, &mut bindings),
                SyntaxKind::LetStmt | SyntaxKind::OtherItem => {
                    scan_declaration(&node, &mut bindings);
                }
                _ => {}
            }
        }
        bindings
    }

    fn enclosing_bindings(&self, located: &Located) -> Bindings {
        let mut bindings = Bindings::default();
        for node in located.root().descendants() {
            if node.ancestors().any(|a| a.kind() == SyntaxKind::Block) {
                continue;
            }
            match node.kind() {
                SyntaxKind::UseItem => scan_use(&node, &mut bindings),
                SyntaxKind::OtherItem => scan_declaration(&node, &mut bindings),
                _ => {}
            }
        }
        bindings
    }
}

/// `true` if `node` belongs to `block` itself rather than to a nested
/// function.
fn same_function(node: &SyntaxNode, block: &SyntaxNode) -> bool {
    node.ancestors()
        .take_while(|a| a != block)
        .all(|a| a.kind() != SyntaxKind::FnDef)
}

fn significant_tokens(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter(|t| !t.kind().is_trivia())
        .collect()
}

/// `use a::{ic as peek, IC as DBG};`
fn scan_use(node: &SyntaxNode, bindings: &mut Bindings) {
    let tokens = significant_tokens(node);
    for window in tokens.windows(3) {
        let [orig, kw, alias] = window else {
            continue;
        };
        if kw.kind() != SyntaxKind::KwAs
            || alias.kind() != SyntaxKind::Ident
            || alias.text() == "_"
        {
            continue;
        }
        let binding = match orig.text() {
            "ic" | "ic_format" => Binding::EntryPoint,
            "IC" => Binding::Instance,
            _ => continue,
        };
        bindings.insert(SmolStr::new(alias.text()), binding);
    }
}

/// `let name = ...;`, `static NAME: Debugger = ...;` or a parameter
/// `name: &Debugger`.
fn scan_declaration(node: &SyntaxNode, bindings: &mut Bindings) {
    let tokens = significant_tokens(node);
    let mut rest = tokens.iter().skip_while(|t| {
        matches!(
            t.kind(),
            SyntaxKind::KwPub
                | SyntaxKind::KwLet
                | SyntaxKind::KwStatic
                | SyntaxKind::KwConst
                | SyntaxKind::KwMut
                | SyntaxKind::KwRef
                | SyntaxKind::KwCrate
                | SyntaxKind::LParen
                | SyntaxKind::RParen
                | SyntaxKind::Amp
        )
    });
    let Some(name) = rest.next() else {
        return;
    };
    if name.kind() != SyntaxKind::Ident || name.text() == "_" {
        return;
    }
    let rest: Vec<&SyntaxToken> = rest.collect();
    if let Some(binding) = classify(&rest) {
        bindings.insert(SmolStr::new(name.text()), binding);
    }
}

/// Classifies the type annotation and initializer of a declaration.
fn classify(tokens: &[&SyntaxToken]) -> Option<Binding> {
    let mentions_instance = tokens
        .iter()
        .any(|t| t.kind() == SyntaxKind::Ident && matches!(t.text(), "Debugger" | "IC"));
    if mentions_instance {
        return Some(Binding::Instance);
    }

    let value_start = tokens.iter().position(|t| t.kind() == SyntaxKind::Eq)? + 1;
    let value: Vec<_> = tokens[value_start..]
        .iter()
        .filter(|t| t.kind() != SyntaxKind::Semi)
        .collect();
    let is_path = value.iter().all(|t| {
        matches!(
            t.kind(),
            SyntaxKind::Ident | SyntaxKind::ColonColon | SyntaxKind::KwCrate
        )
    });
    let names_entry = value
        .last()
        .is_some_and(|t| t.kind() == SyntaxKind::Ident && t.text() == "ic");
    (is_path && names_entry).then_some(Binding::EntryPoint)
}

/// The call shapes that count as debugger calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spellings {
    macros: FxHashSet<SmolStr>,
    functions: FxHashSet<SmolStr>,
    receivers: FxHashSet<SmolStr>,
    methods: FxHashSet<SmolStr>,
}

impl Spellings {
    /// The spellings that are always valid: `ic!`, `ic_format!`, `ic(..)`,
    /// `IC.ic(..)` and `.format(..)`.
    #[must_use]
    pub fn canonical() -> Self {
        let set = |names: &[&str]| names.iter().copied().map(SmolStr::new).collect();
        Self {
            macros: set(&["ic", "ic_format"]),
            functions: set(&["ic"]),
            receivers: set(&["IC"]),
            methods: set(&["ic", "format"]),
        }
    }

    /// Canonical spellings plus the names bound in `enclosing` and `local`.
    #[must_use]
    pub fn from_bindings(enclosing: &Bindings, local: &Bindings) -> Self {
        let mut spellings = Self::canonical();
        for (name, binding) in enclosing.iter().chain(local) {
            match binding {
                Binding::EntryPoint => {
                    spellings.macros.insert(name.clone());
                    spellings.functions.insert(name.clone());
                }
                Binding::Instance => {
                    spellings.receivers.insert(name.clone());
                }
            }
        }
        spellings
    }

    /// Computes the spellings valid at `located`.
    #[must_use]
    pub fn at(bindings: &dyn FrameBindings, located: &Located) -> Self {
        Self::from_bindings(
            &bindings.enclosing_bindings(located),
            &bindings.local_bindings(located),
        )
    }

    /// Returns `true` if `call` is spelled like a debugger call.
    #[must_use]
    pub fn matches(&self, call: &Call) -> bool {
        let Some(name) = call.name() else {
            return false;
        };
        match call.kind() {
            CallKind::Macro => self.macros.contains(&name),
            CallKind::Function => self.functions.contains(&name),
            CallKind::Method => self.methods.contains(&name),
        }
    }

    /// Returns `true` if `call` is a method call whose receiver is a name
    /// bound to a debugger instance.
    #[must_use]
    pub fn receiver_is_bound(&self, call: &Call) -> bool {
        let Some(receiver) = call.receiver() else {
            return false;
        };
        receiver
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .last()
            .is_some_and(|t| self.receivers.contains(t.text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite::CallSite;
    use crate::source::{Locator, MemorySources};

    const TEXT: &str = r#"use scoop::{ic as peek, IC as DBG, Debugger};
use scoop::ic_format as fmt_it;

static SHARED: Debugger = Debugger::new_const();
const LIMIT: usize = 3;

fn show(d: &Debugger, n: usize) {
    use scoop::ic as look;
    let local = &scoop::IC;
    let alias = scoop::ic;
    let count = n + 1;
    fn nested() {
        let hidden = &scoop::IC;
    }
    d.ic((count,));
}
"#;

    fn located() -> Located {
        let sources = MemorySources::new().with_file("src/show.rs", TEXT);
        let site = CallSite {
            file: "src/show.rs",
            line: 15,
            column: 5,
            module_path: None,
        };
        Locator::new(&sources).locate(&site).unwrap()
    }

    fn sorted(bindings: &Bindings) -> Vec<(String, Binding)> {
        let mut pairs: Vec<_> = bindings
            .iter()
            .map(|(name, binding)| (name.to_string(), *binding))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn file_level_bindings_are_found() {
        let located = located();
        assert_eq!(
            sorted(&SourceBindings.enclosing_bindings(&located)),
            vec![
                ("DBG".to_string(), Binding::Instance),
                ("SHARED".to_string(), Binding::Instance),
                ("fmt_it".to_string(), Binding::EntryPoint),
                ("peek".to_string(), Binding::EntryPoint),
            ]
        );
    }

    #[test]
    fn local_bindings_skip_nested_functions() {
        let located = located();
        assert_eq!(
            sorted(&SourceBindings.local_bindings(&located)),
            vec![
                ("alias".to_string(), Binding::EntryPoint),
                ("d".to_string(), Binding::Instance),
                ("local".to_string(), Binding::Instance),
                ("look".to_string(), Binding::EntryPoint),
            ]
        );
    }

    #[test]
    fn spellings_match_calls() {
        let located = located();
        let spellings = Spellings::at(&SourceBindings, &located);
        let parse = scoop_syntax::parse(
            "fn f() { peek!(1); look((1,)); other!(1); d.ic((1,)); d.other((1,)); x.format((1,)); }",
        );
        let matched: Vec<String> = parse
            .syntax()
            .descendants()
            .filter_map(Call::cast)
            .filter(|call| spellings.matches(call))
            .map(|call| call.syntax().text().to_string())
            .collect();
        assert_eq!(
            matched,
            vec!["peek!(1)", "look((1,))", "d.ic((1,))", "x.format((1,))"]
        );
    }

    #[test]
    fn receiver_binding() {
        let located = located();
        let spellings = Spellings::at(&SourceBindings, &located);
        let parse = scoop_syntax::parse("fn f() { d.ic((1,)); self.local.ic((2,)); x.format((3,)); }");
        let bound: Vec<bool> = parse
            .syntax()
            .descendants()
            .filter_map(Call::cast)
            .map(|call| spellings.receiver_is_bound(&call))
            .collect();
        assert_eq!(bound, vec![true, true, false]);
    }
}
