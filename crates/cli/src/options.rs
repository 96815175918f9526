use anyhow::{Context, Result};
use forge_client::ClientConfig;
use gopt::{OptId, Parser};
use thiserror::Error;

use crate::logging::Logging;

/// Bad command line. Reported with the command's help text and exit code 2.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UsageError {
    pub message: String,
    pub help: String,
}

impl UsageError {
    pub fn new(parser: &Parser, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: parser.help_text(),
        }
    }
}

/// Options every command accepts.
pub struct CommonOptions {
    help: OptId,
    verbose: OptId,
    api: OptId,
}

impl CommonOptions {
    pub fn register(parser: &mut Parser) -> Self {
        let help = parser.add_flag("h", "help", "show this help", None);
        let verbose = parser.add_flag("v", "verbose", "enable verbose output", None);
        let api = parser.add_string(
            "",
            "api",
            "API base URL (overrides SRC_API_URL)",
            None,
        );
        parser.option_mut(api).validator(|values: &[String]| {
            values
                .iter()
                .try_for_each(|v| ClientConfig::parse(v, None).map(|_| ()))
        });
        Self { help, verbose, api }
    }

    pub fn help_requested(&self, parser: &Parser) -> bool {
        parser.is_present(self.help)
    }

    /// Apply `--verbose` to the already installed subscriber.
    pub fn apply_verbosity(&self, parser: &Parser, logging: &Logging) {
        logging.set_verbose(parser.is_present(self.verbose));
    }

    /// Environment configuration with `--api` applied on top.
    pub fn client_config(&self, parser: &Parser) -> Result<ClientConfig> {
        let config = ClientConfig::from_env().context("invalid API configuration")?;
        if !parser.is_present(self.api) {
            return Ok(config);
        }
        let url = parser.get_string(self.api);
        config
            .with_base_url(&url)
            .with_context(|| format!("invalid --api value: {url}"))
    }
}

/// Run `parser` over `argv`, turning parse failures into a [`UsageError`].
pub fn parse_args(parser: &mut Parser, argv: &[String]) -> Result<(), UsageError> {
    parser
        .parse(argv)
        .map_err(|err| UsageError::new(parser, err.to_string()))
}

/// Validator for repeatable `key=value` options.
pub fn key_value_pairs(values: &[String]) -> Result<(), String> {
    match values.iter().find(|v| !v.contains('=')) {
        Some(bad) => Err(format!("expected key=value, got {bad:?}")),
        None => Ok(()),
    }
}
