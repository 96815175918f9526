//! `cargo run -p gopt --example greet -- -v --name alice -n 2 extra args`

use std::process::ExitCode;

use gopt::Parser;

fn main() -> ExitCode {
    let mut p = Parser::with_name("greet");
    p.set_usage("[options] [args...]");
    let help = p.add_flag("h", "help", "show this help", None);
    let verbose = p.add_flag("v", "verbose", "enable verbose", None);
    let name = p.add_string("", "name", "name to greet", Some("world"));
    let count = p.add_int("n", "count", "times to greet", Some(1));

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = p.parse(&argv) {
        eprintln!("parse error: {err}");
        eprintln!("{}", p.help_text());
        return ExitCode::from(2);
    }
    if p.is_present(help) {
        p.print_help();
        return ExitCode::SUCCESS;
    }

    let count = match p.get_int(count) {
        Ok(n) => n,
        Err(err) => {
            eprintln!("parse error: {err}");
            return ExitCode::from(2);
        }
    };
    if !p.args().is_empty() {
        println!("args: {:?}", p.args());
    }
    for i in 0..count {
        if p.is_present(verbose) {
            println!("hello ({}/{count}) {}", i + 1, p.get_string(name));
        } else {
            println!("hello {}", p.get_string(name));
        }
    }
    ExitCode::SUCCESS
}
