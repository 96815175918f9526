use std::io::{self, Write};

use crate::option::CliOption;
use crate::parser::Parser;

const NAME_COLUMN: usize = 20;

impl Parser {
    /// Render the usage header and the option listing, sorted by long name.
    pub fn help_text(&self) -> String {
        let mut lines = vec![
            format!("Usage: {} {}", self.program(), self.usage().trim())
                .trim_end()
                .to_string(),
            String::new(),
            "Options:".to_string(),
        ];

        let mut opts: Vec<&CliOption> = self.options().iter().collect();
        opts.sort_by(|a, b| a.long().unwrap_or("").cmp(b.long().unwrap_or("")));

        for opt in opts {
            let line = format!(
                "  {:<width$} {}{}{}",
                format_names(opt),
                opt.kind().type_hint(),
                opt.default_value()
                    .map(|d| format!(" (default: {d})"))
                    .unwrap_or_default(),
                if opt.is_required() { " [required]" } else { "" },
                width = NAME_COLUMN,
            );
            lines.push(line.trim_end().to_string());
            if !opt.help().is_empty() {
                lines.push(format!("      {}", opt.help()));
            }
        }
        lines.join("\n")
    }

    pub fn write_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.help_text())
    }

    /// Write the help text to stdout.
    pub fn print_help(&self) {
        println!("{}", self.help_text());
    }
}

fn format_names(opt: &CliOption) -> String {
    let mut names = Vec::with_capacity(2);
    if let Some(s) = opt.short() {
        names.push(format!("-{s}"));
    }
    if let Some(l) = opt.long() {
        names.push(format!("--{l}"));
    }
    names.join(", ")
}
