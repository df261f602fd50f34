//! Value rendering.
//!
//! Values are rendered through, in order of precedence:
//! 1. a renderer registered for the value's type in a [`RendererRegistry`],
//! 2. the configured [`ArgToString`] strategy,
//! 3. the default strategy: `Debug` text re-laid out by [`pretty`].
//!
//! Custom renderers that panic fall back to the default strategy. A `Debug`
//! impl that fails or panics renders as `<unrenderable TYPE>`.

pub mod pretty;

use std::any::type_name;
use std::fmt::{self, Debug, Write as _};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::args::Arg;

/// A function turning a value into display text.
pub type RenderFn = Arc<dyn Fn(&dyn Debug) -> String + Send + Sync>;

/// Identifies the types a registered renderer applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Exactly one type, by its `type_name`.
    Exact(SmolStr),
    /// Every instantiation of a generic type, e.g. `alloc::vec::Vec`.
    Family(SmolStr),
}

impl TypeTag {
    /// The tag for exactly `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::Exact(SmolStr::new(type_name::<T>()))
    }

    /// The tag for every instantiation of the generic type `T` is one of.
    #[must_use]
    pub fn family_of<T: ?Sized>() -> Self {
        let name = type_name::<T>();
        Self::family(name)
    }

    /// The tag for every instantiation of the type at `path`. Generic
    /// arguments in `path` are ignored.
    #[must_use]
    pub fn family(path: &str) -> Self {
        let base = path.split('<').next().unwrap_or(path);
        Self::Family(SmolStr::new(base))
    }

    /// Returns `true` if this tag covers `type_name`. References are looked
    /// through.
    #[must_use]
    pub fn matches(&self, type_name: &str) -> bool {
        let name = strip_references(type_name);
        match self {
            Self::Exact(exact) => strip_references(exact) == name,
            Self::Family(base) => name
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('<')),
        }
    }
}

fn strip_references(mut name: &str) -> &str {
    loop {
        if let Some(rest) = name.strip_prefix("&mut ") {
            name = rest;
        } else if let Some(rest) = name.strip_prefix('&') {
            name = rest;
        } else {
            return name;
        }
    }
}

/// Ordered, runtime-editable mapping from type tags to renderers.
///
/// An exact tag wins over a family tag; among family tags, the earliest
/// registered wins. Dispatch decisions are memoized per type name and the
/// memo is cleared by every registration change.
#[derive(Default)]
pub struct RendererRegistry {
    entries: IndexMap<TypeTag, RenderFn>,
    dispatch: Mutex<FxHashMap<&'static str, Option<usize>>>,
}

impl RendererRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `render` for `tag`, returning the renderer it replaces.
    pub fn register(
        &mut self,
        tag: TypeTag,
        render: impl Fn(&dyn Debug) -> String + Send + Sync + 'static,
    ) -> Option<RenderFn> {
        let previous = self.entries.insert(tag, Arc::new(render));
        self.dispatch.get_mut().clear();
        previous
    }

    /// Removes the renderer for `tag`.
    pub fn unregister(&mut self, tag: &TypeTag) -> Option<RenderFn> {
        let removed = self.entries.shift_remove(tag);
        self.dispatch.get_mut().clear();
        removed
    }

    /// Number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The renderer that applies to `type_name`, if any.
    #[must_use]
    pub fn lookup(&self, type_name: &'static str) -> Option<RenderFn> {
        if self.entries.is_empty() {
            return None;
        }
        let mut dispatch = self.dispatch.lock();
        let index = *dispatch
            .entry(type_name)
            .or_insert_with(|| self.find(type_name));
        index
            .and_then(|idx| self.entries.get_index(idx))
            .map(|(_, render)| Arc::clone(render))
    }

    fn find(&self, type_name: &str) -> Option<usize> {
        let exact = self
            .entries
            .keys()
            .position(|tag| matches!(tag, TypeTag::Exact(_)) && tag.matches(type_name));
        exact.or_else(|| {
            self.entries
                .keys()
                .position(|tag| matches!(tag, TypeTag::Family(_)) && tag.matches(type_name))
        })
    }

    #[cfg(test)]
    fn memoized(&self) -> usize {
        self.dispatch.lock().len()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

/// The configured value-to-string strategy.
#[derive(Clone, Default)]
pub enum ArgToString {
    /// `Debug` text, re-laid out to the line width.
    #[default]
    Default,
    /// A caller-provided function.
    Custom(RenderFn),
}

impl ArgToString {
    /// Wraps a function as a custom strategy.
    pub fn custom(render: impl Fn(&dyn Debug) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(render))
    }
}

impl fmt::Debug for ArgToString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Renders arguments for one invocation.
pub struct Renderer<'a> {
    registry: &'a RendererRegistry,
    strategy: &'a ArgToString,
    width: usize,
}

impl<'a> Renderer<'a> {
    /// A renderer over `registry` and `strategy`, laying out to `width`.
    #[must_use]
    pub fn new(registry: &'a RendererRegistry, strategy: &'a ArgToString, width: usize) -> Self {
        Self {
            registry,
            strategy,
            width,
        }
    }

    /// Renders one argument. Never panics.
    #[must_use]
    pub fn render(&self, arg: Arg<'_>) -> String {
        let custom = self.registry.lookup(arg.type_name).or_else(|| match self.strategy {
            ArgToString::Default => None,
            ArgToString::Custom(render) => Some(Arc::clone(render)),
        });

        if let Some(render) = custom {
            match catch_unwind(AssertUnwindSafe(|| render(arg.value))) {
                Ok(text) => return text,
                Err(_) => debug!(
                    target: "scoop::render",
                    type_name = arg.type_name,
                    "custom renderer panicked; using the default"
                ),
            }
        }

        render_default(arg, self.width)
    }
}

/// The default strategy: pretty-printed `Debug` text with escaped newlines
/// turned into line breaks.
#[must_use]
pub fn render_default(arg: Arg<'_>, width: usize) -> String {
    let Some(flat) = debug_text(arg.value) else {
        debug!(target: "scoop::render", type_name = arg.type_name, "Debug impl failed");
        return format!("<unrenderable {}>", arg.type_name);
    };
    let laid_out = pretty::pretty(&flat, width).unwrap_or(flat);
    unescape_newlines(&laid_out)
}

fn debug_text(value: &dyn Debug) -> Option<String> {
    catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        write!(text, "{value:?}").ok().map(|()| text)
    }))
    .ok()
    .flatten()
}

/// Replaces each escaped `\n` with a line break. Escaped backslashes are
/// kept as they are.
#[must_use]
pub fn unescape_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('\\') => {
                chars.next();
                out.push_str("\\\\");
            }
            _ => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Debug for Failing {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn upper(value: &dyn Debug) -> String {
        format!("{value:?}").to_uppercase()
    }

    #[test]
    fn type_tags() {
        assert!(TypeTag::of::<u8>().matches("u8"));
        assert!(TypeTag::of::<u8>().matches("&u8"));
        assert!(!TypeTag::of::<u8>().matches("u16"));

        let family = TypeTag::family_of::<Vec<u8>>();
        assert_eq!(family, TypeTag::Family("alloc::vec::Vec".into()));
        assert!(family.matches("alloc::vec::Vec<i32>"));
        assert!(family.matches("&mut alloc::vec::Vec<&str>"));
        assert!(!family.matches("alloc::vec::VecDeque<i32>"));
    }

    #[test]
    fn exact_beats_family() {
        let mut registry = RendererRegistry::new();
        registry.register(TypeTag::family("alloc::vec::Vec"), |_| "family".into());
        registry.register(TypeTag::of::<Vec<u8>>(), |_| "exact".into());

        let bytes = registry.lookup(std::any::type_name::<Vec<u8>>()).unwrap();
        assert_eq!(bytes(&1), "exact");
        let words = registry.lookup(std::any::type_name::<Vec<&str>>()).unwrap();
        assert_eq!(words(&1), "family");
        assert!(registry.lookup("u8").is_none());
    }

    #[test]
    fn unregister_invalidates_dispatch() {
        let mut registry = RendererRegistry::new();
        let tag = TypeTag::of::<u32>();
        registry.register(tag.clone(), |_| "custom".into());
        assert!(registry.lookup("u32").is_some());
        assert_eq!(registry.memoized(), 1);

        assert!(registry.unregister(&tag).is_some());
        assert_eq!(registry.memoized(), 0);
        assert!(registry.lookup("u32").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn renderer_precedence() {
        let mut registry = RendererRegistry::new();
        registry.register(TypeTag::of::<&str>(), |_| "registered".into());
        let strategy = ArgToString::custom(upper);
        let renderer = Renderer::new(&registry, &strategy, 70);

        assert_eq!(renderer.render(Arg::new(&"x")), "registered");
        assert_eq!(renderer.render(Arg::new(&Some('a'))), "SOME('A')");

        let plain = ArgToString::Default;
        let renderer = Renderer::new(&registry, &plain, 70);
        assert_eq!(renderer.render(Arg::new(&Some('a'))), "Some('a')");
    }

    #[test]
    fn panicking_renderer_falls_back() {
        let registry = RendererRegistry::new();
        let strategy = ArgToString::custom(|_| panic!("renderer bug"));
        let renderer = Renderer::new(&registry, &strategy, 70);
        assert_eq!(renderer.render(Arg::new(&[1, 2])), "[1, 2]");
    }

    #[test]
    fn failing_debug_is_unrenderable() {
        let text = render_default(Arg::new(&Failing), 70);
        assert!(text.starts_with("<unrenderable "));
        assert!(text.ends_with("Failing>"));
    }

    #[test]
    fn newlines_are_unescaped() {
        let text = render_default(Arg::new(&"line1\nline2"), 70);
        assert_eq!(text, "\"line1\nline2\"");
        let text = render_default(Arg::new(&"C:\\new"), 70);
        assert_eq!(text, "\"C:\\\\new\"");
    }
}
