use std::collections::HashMap;
use std::path::Path;

use crate::error::{DefinitionError, ParseError};
use crate::option::{CliOption, DefaultValue, OptId, OptState, OptionKind, OptionSpec};

/// Registered options plus the result of the last successful [`Parser::parse`].
///
/// Options are registered first, then `parse` is called with the argument
/// vector (without the program name), then values are read back through the
/// [`OptId`] handles returned at registration.
#[derive(Debug)]
pub struct Parser {
    program: String,
    usage: String,
    options: Vec<CliOption>,
    by_short: HashMap<char, OptId>,
    by_long: HashMap<String, OptId>,
    states: Vec<OptState>,
    args: Vec<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Parser named after the base name of the running executable.
    pub fn new() -> Self {
        let program = std::env::args()
            .next()
            .map(|arg0| program_base_name(&arg0))
            .unwrap_or_default();
        Self::with_name(program)
    }

    pub fn with_name(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            usage: String::new(),
            options: Vec::new(),
            by_short: HashMap::new(),
            by_long: HashMap::new(),
            states: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Free-text fragment printed after the program name in the help header.
    pub fn set_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        self.usage = usage.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Registered options in registration order.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    pub fn option(&self, id: OptId) -> &CliOption {
        &self.options[id.0]
    }

    /// Adjust a registered option (`required`, `validator`).
    pub fn option_mut(&mut self, id: OptId) -> &mut CliOption {
        &mut self.options[id.0]
    }

    /// Boolean switch: `-v` / `--verbose`.
    pub fn add_flag(&mut self, short: &str, long: &str, help: &str, default: Option<bool>) -> OptId {
        let mut spec = OptionSpec::new(OptionKind::Flag).short(short).long(long).help(help);
        if let Some(b) = default {
            spec = spec.default_value(DefaultValue::Bool(b));
        }
        self.register(spec)
    }

    /// Single string: `-n name` / `--name name` / `--name=name`.
    pub fn add_string(
        &mut self,
        short: &str,
        long: &str,
        help: &str,
        default: Option<&str>,
    ) -> OptId {
        let mut spec = OptionSpec::new(OptionKind::String).short(short).long(long).help(help);
        if let Some(s) = default {
            spec = spec.default_value(DefaultValue::Str(s.to_string()));
        }
        self.register(spec)
    }

    pub fn add_int(&mut self, short: &str, long: &str, help: &str, default: Option<i64>) -> OptId {
        let mut spec = OptionSpec::new(OptionKind::Int).short(short).long(long).help(help);
        if let Some(n) = default {
            spec = spec.default_value(DefaultValue::Int(n));
        }
        self.register(spec)
    }

    pub fn add_float(&mut self, short: &str, long: &str, help: &str, default: Option<f64>) -> OptId {
        let mut spec = OptionSpec::new(OptionKind::Float).short(short).long(long).help(help);
        if let Some(x) = default {
            spec = spec.default_value(DefaultValue::Float(x));
        }
        self.register(spec)
    }

    /// Repeatable string: `--tag a --tag b` collects `["a", "b"]`.
    pub fn add_string_list(
        &mut self,
        short: &str,
        long: &str,
        help: &str,
        default: Option<&[&str]>,
    ) -> OptId {
        let mut spec = OptionSpec::new(OptionKind::StringList)
            .short(short)
            .long(long)
            .help(help);
        if let Some(items) = default {
            spec = spec.default_value(DefaultValue::List(
                items.iter().map(|s| s.to_string()).collect(),
            ));
        }
        self.register(spec)
    }

    /// Register `spec`, panicking on an invalid definition.
    ///
    /// # Panics
    ///
    /// If the short or long name is already taken, if both are empty, or if
    /// the short name is not a single character.
    pub fn register(&mut self, spec: OptionSpec) -> OptId {
        match self.try_register(spec) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Register `spec`, reporting an invalid definition instead of panicking.
    pub fn try_register(&mut self, spec: OptionSpec) -> Result<OptId, DefinitionError> {
        let short = match spec.short.as_deref() {
            None => None,
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c != '-' => Some(c),
                    _ => return Err(DefinitionError::InvalidShort(raw.to_string())),
                }
            }
        };
        if let Some(long) = &spec.long {
            if long.starts_with('-') || long.contains('=') {
                return Err(DefinitionError::InvalidLong(long.clone()));
            }
        }
        if short.is_none() && spec.long.is_none() {
            return Err(DefinitionError::Unnamed);
        }
        if let Some(c) = short {
            if self.by_short.contains_key(&c) {
                return Err(DefinitionError::DuplicateShort(c));
            }
        }
        if let Some(long) = &spec.long {
            if self.by_long.contains_key(long) {
                return Err(DefinitionError::DuplicateLong(long.clone()));
            }
        }

        let id = OptId(self.options.len());
        if let Some(c) = short {
            self.by_short.insert(c, id);
        }
        if let Some(long) = &spec.long {
            self.by_long.insert(long.clone(), id);
        }
        self.options.push(CliOption {
            short,
            long: spec.long,
            kind: spec.kind,
            help: spec.help,
            required: spec.required,
            default: spec.default,
            validator: spec.validator,
        });
        self.states.push(OptState::default());
        Ok(id)
    }

    /// Scan `argv` (without the program name).
    ///
    /// On error nothing is committed: option values and positionals keep what
    /// the previous successful parse left (or stay empty). Each successful
    /// parse starts from a clean slate.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<(), ParseError> {
        let argv: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        let mut states = vec![OptState::default(); self.options.len()];
        let mut args: Vec<String> = Vec::new();

        let mut i = 0usize;
        while i < argv.len() {
            let token = argv[i];

            if token == "--" {
                args.extend(argv[i + 1..].iter().map(|s| s.to_string()));
                break;
            }

            if let Some(body) = token.strip_prefix("--") {
                // --name or --name=value
                let (name, inline) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (body, None),
                };
                let id = *self
                    .by_long
                    .get(name)
                    .ok_or_else(|| ParseError::UnknownOption(format!("--{name}")))?;
                self.consume(&mut states, id, inline, &argv, &mut i)?;
                i += 1;
                continue;
            }

            if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
                // -v, -abc, -n5, -n 5
                for (pos, letter) in cluster.char_indices() {
                    let id = *self
                        .by_short
                        .get(&letter)
                        .ok_or_else(|| ParseError::UnknownOption(format!("-{letter}")))?;
                    let rest = &cluster[pos + letter.len_utf8()..];
                    if self.options[id.0].kind.takes_value() && !rest.is_empty() {
                        self.consume(&mut states, id, Some(rest), &argv, &mut i)?;
                        break;
                    }
                    self.consume(&mut states, id, None, &argv, &mut i)?;
                }
                i += 1;
                continue;
            }

            args.push(token.to_string());
            i += 1;
        }

        self.post_validate(&mut states)?;

        tracing::debug!(
            program = %self.program,
            options = states.iter().filter(|s| s.explicit).count(),
            positionals = args.len(),
            "parsed command line"
        );
        self.states = states;
        self.args = args;
        Ok(())
    }

    /// Record one occurrence of option `id`. `i` points at the token holding
    /// the option name and is advanced when the next token is taken as value.
    fn consume(
        &self,
        states: &mut [OptState],
        id: OptId,
        inline: Option<&str>,
        argv: &[&str],
        i: &mut usize,
    ) -> Result<(), ParseError> {
        let opt = &self.options[id.0];
        let state = &mut states[id.0];
        state.present = true;
        state.explicit = true;
        state.validated = false;

        if opt.kind == OptionKind::Flag {
            state.values = vec!["true".to_string()];
            tracing::trace!(option = %opt.display_name(), "matched flag");
            return Ok(());
        }

        let value = match inline {
            Some(v) => v.to_string(),
            None => {
                if *i + 1 >= argv.len() {
                    return Err(ParseError::MissingValue(opt.display_name()));
                }
                *i += 1;
                argv[*i].to_string()
            }
        };
        tracing::trace!(option = %opt.display_name(), value = %value, "matched option");

        if opt.kind == OptionKind::StringList {
            state.values.push(value);
        } else {
            state.values = vec![value];
        }

        if opt.validator.is_some() {
            opt.validate(&state.values)?;
            state.validated = true;
        }
        Ok(())
    }

    /// Required checks, defaults for absent options, and validators that have
    /// not yet seen the final values.
    fn post_validate(&self, states: &mut [OptState]) -> Result<(), ParseError> {
        for (opt, state) in self.options.iter().zip(states.iter_mut()) {
            if !state.present {
                if opt.required {
                    return Err(ParseError::RequiredMissing(opt.display_name()));
                }
                if let Some(default) = &opt.default {
                    match opt.kind {
                        OptionKind::Flag => {
                            if *default == DefaultValue::Bool(true) {
                                state.values = vec!["true".to_string()];
                                state.present = true;
                            }
                        }
                        _ => {
                            state.values = default.to_values();
                            state.present = true;
                        }
                    }
                    state.validated = false;
                }
            }

            if state.present && !state.validated {
                opt.validate(&state.values)?;
                state.validated = true;
            }
        }
        Ok(())
    }

    /// Supplied on the command line or set present by a default.
    pub fn is_present(&self, id: OptId) -> bool {
        self.states[id.0].present
    }

    /// Supplied on the command line; defaults never count.
    pub fn is_explicit(&self, id: OptId) -> bool {
        self.states[id.0].explicit
    }

    /// First raw value, else the stringified default, else `""`.
    pub fn get_string(&self, id: OptId) -> String {
        if let Some(first) = self.states[id.0].values.first() {
            return first.clone();
        }
        self.options[id.0]
            .default
            .as_ref()
            .and_then(|d| d.to_values().into_iter().next())
            .unwrap_or_default()
    }

    /// All raw values in command-line order, else the list default.
    pub fn get_string_list(&self, id: OptId) -> Vec<String> {
        let values = &self.states[id.0].values;
        if !values.is_empty() {
            return values.clone();
        }
        match &self.options[id.0].default {
            Some(DefaultValue::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Integer value; an absent value without an integer default is `0`.
    pub fn get_int(&self, id: OptId) -> Result<i64, ParseError> {
        let text = self.get_string(id);
        if text.is_empty() {
            return Ok(match self.options[id.0].default {
                Some(DefaultValue::Int(n)) => n,
                _ => 0,
            });
        }
        text.parse::<i64>()
            .map_err(|e| self.conversion_error(id, text, "int", e.to_string()))
    }

    /// Float value; an absent value without a float default is `0.0`.
    pub fn get_float(&self, id: OptId) -> Result<f64, ParseError> {
        let text = self.get_string(id);
        if text.is_empty() {
            return Ok(match self.options[id.0].default {
                Some(DefaultValue::Float(x)) => x,
                _ => 0.0,
            });
        }
        text.parse::<f64>()
            .map_err(|e| self.conversion_error(id, text, "float", e.to_string()))
    }

    fn conversion_error(
        &self,
        id: OptId,
        value: String,
        target: &'static str,
        reason: String,
    ) -> ParseError {
        ParseError::TypeConversion {
            option: self.options[id.0].display_name(),
            value,
            target,
            reason,
        }
    }

    /// Positional arguments from the last successful parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

fn program_base_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg0.to_string())
}
