//! getopt-style command-line option parsing.
//!
//! Options are registered on a [`Parser`] (flags, single string/int/float
//! values and repeatable string values), the argument vector is scanned once,
//! and values are read back through the [`OptId`] handle each registration
//! returned.
//!
//! Supported syntax:
//! - `--name value`, `--name=value`
//! - `-n value`, `-nvalue`, clusters of flags such as `-abc`
//! - `--` ends option recognition; everything after it is positional
//!
//! ```
//! use gopt::Parser;
//!
//! let mut p = Parser::with_name("greet");
//! let verbose = p.add_flag("v", "verbose", "enable verbose", None);
//! let count = p.add_int("n", "count", "times to greet", Some(1));
//!
//! p.parse(&["-vn3", "alice"]).unwrap();
//! assert!(p.is_present(verbose));
//! assert_eq!(p.get_int(count).unwrap(), 3);
//! assert_eq!(p.args(), ["alice"]);
//! ```

mod error;
mod help;
mod option;
mod parser;

pub use error::{DefinitionError, ParseError};
pub use option::{CliOption, DefaultValue, OptId, OptionKind, OptionSpec, Validator};
pub use parser::Parser;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
