//! The debugger facade.
//!
//! A [`Debugger`] turns one invocation into one piece of output: it locates
//! the call site, finds the call in the source, recovers each argument's
//! text, renders the values and lays the pairs out.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{trace, warn};

use crate::args::{Arg, Args};
use crate::bindings::{FrameBindings, SourceBindings, Spellings};
use crate::callsite::CallSite;
use crate::config::{Config, ConfigureOutput, NoSourcePolicy};
use crate::error::{Result, ScoopError};
use crate::layout::{layout, LayoutOptions, Pair};
use crate::output;
use crate::render::{RenderFn, Renderer, RendererRegistry, TypeTag};
use crate::resolve::Resolver;
use crate::source::{FsSources, Located, Locator, SourceProvider};

/// A print debugger.
///
/// Every entry point evaluates to the values it was given: nothing for no
/// values, the value itself for one, and the tuple for several. That holds
/// whether or not the debugger is enabled.
///
/// ```
/// use scoop::Debugger;
///
/// let debugger = Debugger::new();
/// debugger.disable();
/// let n = debugger.ic((1 + 2,));
/// assert_eq!(n, 3);
/// ```
pub struct Debugger {
    config: RwLock<Config>,
    enabled: AtomicBool,
    sources: Arc<dyn SourceProvider>,
    bindings: Arc<dyn FrameBindings>,
    renderers: RwLock<RendererRegistry>,
    warned: Mutex<FxHashSet<CallSite>>,
    invocations: Mutex<FxHashMap<CallSite, usize>>,
}

impl Debugger {
    /// An enabled debugger with the default configuration, reading source
    /// files from disk.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(FsSources::new())
    }

    /// An enabled debugger reading source text from `sources`.
    #[must_use]
    pub fn with_sources(sources: impl SourceProvider + 'static) -> Self {
        Self {
            config: RwLock::new(Config::default()),
            enabled: AtomicBool::new(true),
            sources: Arc::new(sources),
            bindings: Arc::new(SourceBindings),
            renderers: RwLock::new(RendererRegistry::new()),
            warned: Mutex::new(FxHashSet::default()),
            invocations: Mutex::new(FxHashMap::default()),
        }
    }

    /// Replaces how names bound to the debugger are discovered.
    #[must_use]
    pub fn with_bindings(mut self, bindings: impl FrameBindings + 'static) -> Self {
        self.bindings = Arc::new(bindings);
        self
    }

    /// Turns output on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Turns output off. Values are still passed through.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Returns `true` if invocations produce output.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Updates the options set in `update`.
    ///
    /// # Errors
    ///
    /// [`ScoopError::InvalidConfiguration`] when `update` sets nothing; the
    /// configuration is left as it was.
    pub fn configure_output(&self, update: ConfigureOutput) -> Result<()> {
        update.apply(&mut self.config.write())
    }

    /// A copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Renders values whose type matches `tag` with `render`, returning the
    /// renderer it replaces.
    pub fn register_renderer(
        &self,
        tag: TypeTag,
        render: impl Fn(&dyn fmt::Debug) -> String + Send + Sync + 'static,
    ) -> Option<RenderFn> {
        self.renderers.write().register(tag, render)
    }

    /// Removes the renderer registered for `tag`.
    pub fn unregister_renderer(&self, tag: &TypeTag) -> Option<RenderFn> {
        self.renderers.write().unregister(tag)
    }

    /// Prints `args` with their source text and returns them.
    #[track_caller]
    pub fn ic<A: Args>(&self, args: A) -> A::Output {
        if self.is_enabled() {
            let site = CallSite::caller();
            self.emit_at(&site, &args.args());
        }
        args.into_output()
    }

    /// The text [`ic`](Self::ic) would print for `args`.
    #[track_caller]
    pub fn format<A: Args>(&self, args: A) -> String {
        let site = CallSite::caller();
        self.format_at(&site, &args.args())
    }

    /// Prints `args` as called from `site`, if enabled.
    pub fn emit_at(&self, site: &CallSite, args: &[Arg<'_>]) {
        if !self.is_enabled() {
            return;
        }
        let config = self.config();
        let text = self.format_with(&config, site, args, Ordinal::Advance);
        output::write_out(config.output.as_ref(), &text);
    }

    /// The text printed for `args` as called from `site`.
    ///
    /// Formatting does not count as an invocation: the next
    /// [`emit_at`](Self::emit_at) from `site` prints the same text.
    #[must_use]
    pub fn format_at(&self, site: &CallSite, args: &[Arg<'_>]) -> String {
        let config = self.config();
        self.format_with(&config, site, args, Ordinal::Peek)
    }

    fn format_with(
        &self,
        config: &Config,
        site: &CallSite,
        args: &[Arg<'_>],
        ordinal: Ordinal,
    ) -> String {
        let prefix = config.prefix.render();

        let (located, labels) = if args.is_empty() {
            (Locator::new(self.sources.as_ref()).locate(site).ok(), Vec::new())
        } else {
            match self.recover(site, args.len(), ordinal) {
                Ok((located, labels)) => (Some(located), labels),
                Err(err) => {
                    if let NoSourcePolicy::Message(message) = &config.no_source {
                        return format!("{prefix}{message}");
                    }
                    self.warn_once(site, &err);
                    (None, vec![None; args.len()])
                }
            }
        };

        let context = (config.include_context || args.is_empty())
            .then(|| context(config, site, located.as_ref()));

        let pairs: Vec<Pair> = {
            let renderers = self.renderers.read();
            let renderer = Renderer::new(&renderers, &config.arg_to_string, config.line_wrap_width);
            args.iter()
                .zip(labels)
                .map(|(arg, label)| Pair {
                    label,
                    value: renderer.render(*arg),
                })
                .collect()
        };

        let opts = LayoutOptions {
            line_wrap_width: config.line_wrap_width,
            ..LayoutOptions::default()
        };
        layout(&prefix, context.as_deref(), &pairs, &opts)
    }

    /// Locates `site` and recovers the text of its `count` arguments.
    fn recover(
        &self,
        site: &CallSite,
        count: usize,
        ordinal: Ordinal,
    ) -> Result<(Located, Vec<Option<String>>)> {
        let located = Locator::new(self.sources.as_ref()).locate(site)?;
        let spellings = Spellings::at(self.bindings.as_ref(), &located);
        let invocation = self.invocation(site, ordinal);
        let resolved = Resolver::new(&located, &spellings).resolve(count, invocation)?;
        let labels = resolved.labels(count);
        trace!(target: "scoop::debugger", site = %site, ?labels, "recovered labels");
        Ok((located, labels))
    }

    /// How many times `site` has been emitted from before.
    fn invocation(&self, site: &CallSite, ordinal: Ordinal) -> usize {
        let mut invocations = self.invocations.lock();
        match ordinal {
            Ordinal::Peek => invocations.get(site).copied().unwrap_or(0),
            Ordinal::Advance => {
                let count = invocations.entry(*site).or_insert(0);
                let current = *count;
                *count += 1;
                current
            }
        }
    }

    fn warn_once(&self, site: &CallSite, err: &ScoopError) {
        if self.warned.lock().insert(*site) {
            warn!(
                target: "scoop::debugger",
                site = %site,
                "{err}; printing values without labels"
            );
        }
    }
}

/// Whether resolving a site counts as one of its invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ordinal {
    Peek,
    Advance,
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Debugger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("enabled", &self.is_enabled())
            .field("config", &*self.config.read())
            .field("renderers", &*self.renderers.read())
            .finish_non_exhaustive()
    }
}

/// `file:line in function()`, optionally followed by the time.
fn context(config: &Config, site: &CallSite, located: Option<&Located>) -> String {
    let file = if config.context_abs_path {
        let path = located.map_or_else(|| PathBuf::from(site.file), |l| l.file.path.clone());
        std::path::absolute(&path)
            .unwrap_or(path)
            .display()
            .to_string()
    } else {
        Path::new(site.file)
            .file_name()
            .map_or_else(|| site.file.to_string(), |name| name.to_string_lossy().into_owned())
    };

    let mut context = format!("{file}:{}", site.line);
    if let Some(function) = located.and_then(|l| l.function.as_ref()) {
        context.push_str(&format!(" in {function}()"));
    }
    if config.include_time {
        context.push_str(" at ");
        context.push_str(&timestamp());
    }
    context
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ))
    .unwrap_or_default()
}
