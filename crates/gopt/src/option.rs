use std::fmt;

/// Value kind of a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean presence switch; never consumes a value.
    Flag,
    /// Single string value, last occurrence wins.
    String,
    /// Single integer value, last occurrence wins.
    Int,
    /// Single floating point value, last occurrence wins.
    Float,
    /// Repeatable string value; occurrences accumulate in order.
    StringList,
}

impl OptionKind {
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Flag)
    }

    pub(crate) fn type_hint(self) -> &'static str {
        match self {
            Self::Flag => "",
            Self::String => " <string>",
            Self::Int => " <int>",
            Self::Float => " <float>",
            Self::StringList => " <value>...",
        }
    }
}

/// Typed fallback applied when an option is absent from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl DefaultValue {
    /// Raw values synthesized for an absent option.
    pub(crate) fn to_values(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::List(items) => write!(f, "[{}]", items.join(" ")),
        }
    }
}

/// Checks the raw values collected for an option. The error message is
/// reported inside [`ParseError::ValidationFailed`](crate::ParseError::ValidationFailed).
pub type Validator = Box<dyn Fn(&[String]) -> Result<(), String>>;

/// Handle returned by registration; used to read values back after parsing.
///
/// A handle is only meaningful for the [`Parser`](crate::Parser) that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptId(pub(crate) usize);

/// Definition of an option, used with [`Parser::try_register`](crate::Parser::try_register).
pub struct OptionSpec {
    pub(crate) short: Option<String>,
    pub(crate) long: Option<String>,
    pub(crate) kind: OptionKind,
    pub(crate) help: String,
    pub(crate) required: bool,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) validator: Option<Validator>,
}

impl OptionSpec {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            short: None,
            long: None,
            kind,
            help: String::new(),
            required: false,
            default: None,
            validator: None,
        }
    }

    /// Single-character alias, without the dash. Empty means none.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = non_empty(short.into());
        self
    }

    /// Long name, without the dashes. Empty means none.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = non_empty(long.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn validator<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), E> + 'static,
        E: fmt::Display,
    {
        self.validator = Some(wrap_validator(f));
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn wrap_validator<F, E>(f: F) -> Validator
where
    F: Fn(&[String]) -> Result<(), E> + 'static,
    E: fmt::Display,
{
    Box::new(move |values: &[String]| f(values).map_err(|e| e.to_string()))
}

/// A registered option.
pub struct CliOption {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) kind: OptionKind,
    pub(crate) help: String,
    pub(crate) required: bool,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) validator: Option<Validator>,
}

impl CliOption {
    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Mark the option as mandatory.
    pub fn required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Attach a validator; it replaces any previous one.
    pub fn validator<F, E>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[String]) -> Result<(), E> + 'static,
        E: fmt::Display,
    {
        self.validator = Some(wrap_validator(f));
        self
    }

    /// `-n/--name`, `-n` or `--name`.
    pub fn display_name(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(s) = self.short {
            parts.push(format!("-{s}"));
        }
        if let Some(l) = &self.long {
            parts.push(format!("--{l}"));
        }
        parts.join("/")
    }

    pub(crate) fn validate(&self, values: &[String]) -> Result<(), crate::ParseError> {
        match &self.validator {
            Some(check) => check(values).map_err(|message| crate::ParseError::ValidationFailed {
                option: self.display_name(),
                message,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for CliOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliOption")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Per-parse state of one option.
#[derive(Debug, Clone, Default)]
pub(crate) struct OptState {
    pub(crate) present: bool,
    pub(crate) explicit: bool,
    pub(crate) values: Vec<String>,
    /// Validator already ran against the current `values`.
    pub(crate) validated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_display_matches_help_format() {
        assert_eq!(DefaultValue::Int(5).to_string(), "5");
        assert_eq!(DefaultValue::Float(5.0).to_string(), "5");
        assert_eq!(DefaultValue::Float(0.25).to_string(), "0.25");
        assert_eq!(DefaultValue::Bool(true).to_string(), "true");
        assert_eq!(
            DefaultValue::List(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a b]"
        );
    }

    #[test]
    fn list_default_is_copied_in_full() {
        let d = DefaultValue::List(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(d.to_values(), vec!["x", "y"]);
        assert_eq!(DefaultValue::Str("one".to_string()).to_values(), vec!["one"]);
    }

    #[test]
    fn option_spec_treats_empty_names_as_absent() {
        let spec = OptionSpec::new(OptionKind::Flag).short("").long("verbose");
        assert!(spec.short.is_none());
        assert_eq!(spec.long.as_deref(), Some("verbose"));
    }
}
