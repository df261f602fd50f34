//! Debugger configuration.
//!
//! [`Config`] is the full configuration a debugger reads at the start of
//! every invocation. [`ConfigureOutput`] is a partial update: options left
//! unset keep their current value.

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::error::{Result, ScoopError};
use crate::output::{OutputSink, StderrSink};
use crate::render::ArgToString;

/// Default output prefix.
pub const DEFAULT_PREFIX: &str = "ic| ";
/// Default width after which output wraps into a block.
pub const DEFAULT_LINE_WRAP_WIDTH: usize = 70;
/// Separates the context from the values.
pub const DEFAULT_CONTEXT_DELIMITER: &str = "- ";
/// Separates label/value pairs on one line.
pub const DEFAULT_PAIR_DELIMITER: &str = ", ";

/// The text printed before every line of output.
#[derive(Clone)]
pub enum Prefix {
    /// A fixed string.
    Static(String),
    /// Evaluated on every invocation.
    Dynamic(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Prefix {
    /// A prefix computed by `f` on every invocation.
    pub fn dynamic(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    /// The prefix text for the current invocation.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Dynamic(f) => f(),
        }
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::Static(DEFAULT_PREFIX.to_string())
    }
}

impl From<&str> for Prefix {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for Prefix {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

impl Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// What to print when the call's source cannot be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoSourcePolicy {
    /// Print the values without labels and warn once per call site.
    #[default]
    Values,
    /// Print the prefix followed by this message instead of the values.
    Message(String),
}

/// Complete debugger configuration.
#[derive(Clone)]
pub struct Config {
    /// Printed before every line.
    pub prefix: Prefix,
    /// Where output goes.
    pub output: Arc<dyn OutputSink>,
    /// Value-to-string strategy for types without a registered renderer.
    pub arg_to_string: ArgToString,
    /// Prefix values with `file:line in function()`.
    pub include_context: bool,
    /// Use the full path of the file in the context.
    pub context_abs_path: bool,
    /// Width after which output wraps into a block.
    pub line_wrap_width: usize,
    /// Append the wall-clock time to the context.
    pub include_time: bool,
    /// Behaviour when the source cannot be recovered.
    pub no_source: NoSourcePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: Prefix::default(),
            output: Arc::new(StderrSink::new()),
            arg_to_string: ArgToString::Default,
            include_context: false,
            context_abs_path: false,
            line_wrap_width: DEFAULT_LINE_WRAP_WIDTH,
            include_time: false,
            no_source: NoSourcePolicy::Values,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("prefix", &self.prefix)
            .field("arg_to_string", &self.arg_to_string)
            .field("include_context", &self.include_context)
            .field("context_abs_path", &self.context_abs_path)
            .field("line_wrap_width", &self.line_wrap_width)
            .field("include_time", &self.include_time)
            .field("no_source", &self.no_source)
            .finish_non_exhaustive()
    }
}

/// A partial configuration update.
///
/// ```
/// use scoop::{ConfigureOutput, Debugger};
///
/// let debugger = Debugger::new();
/// debugger
///     .configure_output(ConfigureOutput::new().prefix("dbg> ").include_context(true))
///     .unwrap();
/// assert!(debugger.configure_output(ConfigureOutput::new()).is_err());
/// ```
#[derive(Clone, Default)]
#[must_use]
pub struct ConfigureOutput {
    prefix: Option<Prefix>,
    output_function: Option<Arc<dyn OutputSink>>,
    arg_to_string_function: Option<ArgToString>,
    include_context: Option<bool>,
    context_abs_path: Option<bool>,
    line_wrap_width: Option<usize>,
    include_time: Option<bool>,
    no_source_policy: Option<NoSourcePolicy>,
}

impl ConfigureOutput {
    /// An update with no option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets a prefix computed on every invocation.
    pub fn prefix_fn(mut self, prefix: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.prefix = Some(Prefix::dynamic(prefix));
        self
    }

    /// Sets the output sink.
    pub fn output_function(mut self, sink: impl OutputSink + 'static) -> Self {
        self.output_function = Some(Arc::new(sink));
        self
    }

    /// Sets the value-to-string function.
    pub fn arg_to_string_function(
        mut self,
        render: impl Fn(&dyn Debug) -> String + Send + Sync + 'static,
    ) -> Self {
        self.arg_to_string_function = Some(ArgToString::custom(render));
        self
    }

    /// Restores the default value-to-string strategy.
    pub fn default_arg_to_string(mut self) -> Self {
        self.arg_to_string_function = Some(ArgToString::Default);
        self
    }

    /// Sets whether the `file:line in function()` context is printed.
    pub fn include_context(mut self, include: bool) -> Self {
        self.include_context = Some(include);
        self
    }

    /// Sets whether the context shows the full file path.
    pub fn context_abs_path(mut self, absolute: bool) -> Self {
        self.context_abs_path = Some(absolute);
        self
    }

    /// Sets the wrap width.
    pub fn line_wrap_width(mut self, width: usize) -> Self {
        self.line_wrap_width = Some(width);
        self
    }

    /// Sets whether the time is appended to the context.
    pub fn include_time(mut self, include: bool) -> Self {
        self.include_time = Some(include);
        self
    }

    /// Sets the behaviour when no source is available.
    pub fn no_source_policy(mut self, policy: NoSourcePolicy) -> Self {
        self.no_source_policy = Some(policy);
        self
    }

    /// Returns `true` if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.output_function.is_none()
            && self.arg_to_string_function.is_none()
            && self.include_context.is_none()
            && self.context_abs_path.is_none()
            && self.line_wrap_width.is_none()
            && self.include_time.is_none()
            && self.no_source_policy.is_none()
    }

    /// Applies the set options to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoopError::InvalidConfiguration`] without touching
    /// `config` when no option is set.
    pub fn apply(self, config: &mut Config) -> Result<()> {
        if self.is_empty() {
            return Err(ScoopError::InvalidConfiguration);
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(output) = self.output_function {
            config.output = output;
        }
        if let Some(strategy) = self.arg_to_string_function {
            config.arg_to_string = strategy;
        }
        if let Some(include) = self.include_context {
            config.include_context = include;
        }
        if let Some(absolute) = self.context_abs_path {
            config.context_abs_path = absolute;
        }
        if let Some(width) = self.line_wrap_width {
            config.line_wrap_width = width;
        }
        if let Some(include) = self.include_time {
            config.include_time = include;
        }
        if let Some(policy) = self.no_source_policy {
            config.no_source = policy;
        }
        Ok(())
    }
}

impl Debug for ConfigureOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigureOutput")
            .field("prefix", &self.prefix)
            .field("output_function", &self.output_function.is_some())
            .field("arg_to_string_function", &self.arg_to_string_function)
            .field("include_context", &self.include_context)
            .field("context_abs_path", &self.context_abs_path)
            .field("line_wrap_width", &self.line_wrap_width)
            .field("include_time", &self.include_time)
            .field("no_source_policy", &self.no_source_policy)
            .finish()
    }
}
