use std::io::Read;

use anyhow::{Context, Result, bail};
use forge_client::{ForgeClient, Method, fields_to_object, parse_body, render};
use gopt::Parser;
use serde_json::Value;

use crate::logging::Logging;
use crate::options::{CommonOptions, UsageError, key_value_pairs, parse_args};

/// `src api <METHOD> <PATH> [options]`
pub fn run(argv: &[String], logging: &Logging) -> Result<()> {
    let mut p = Parser::with_name("src api");
    p.set_usage("<METHOD> <PATH> [options]");
    let common = CommonOptions::register(&mut p);
    let fields = p.add_string_list("f", "field", "add a string body field key=value", None);
    let typed = p.add_string_list(
        "F",
        "typed-field",
        "add a body field key=value; true, false, null and numbers keep their JSON type",
        None,
    );
    let input = p.add_string("i", "input", "read the JSON body from FILE (- for stdin)", None);
    let select = p.add_string("s", "select", "print only the value at a dotted path", None);
    let raw = p.add_flag("", "raw", "print compact JSON", None);
    p.option_mut(fields).validator(key_value_pairs);
    p.option_mut(typed).validator(key_value_pairs);

    parse_args(&mut p, argv)?;
    if common.help_requested(&p) {
        p.print_help();
        return Ok(());
    }
    common.apply_verbosity(&p, logging);

    let [method, path] = p.args() else {
        return Err(UsageError::new(&p, "expected <METHOD> <PATH>").into());
    };
    let method = parse_method(method).map_err(|msg| UsageError::new(&p, msg))?;

    let has_fields = p.is_present(fields) || p.is_present(typed);
    let body = if p.is_present(input) {
        if has_fields {
            return Err(UsageError::new(&p, "--input cannot be combined with --field").into());
        }
        Some(read_body(&p.get_string(input))?)
    } else if has_fields {
        let object = fields_to_object(&p.get_string_list(fields), &p.get_string_list(typed))?;
        Some(Value::Object(object))
    } else {
        None
    };

    let config = common.client_config(&p)?;
    let client = ForgeClient::new(config)?;
    tracing::debug!(%method, path = %path, "executing api command");

    let response = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(client.request(method, path, body.as_ref()))
        .with_context(|| format!("request to {path} failed"))?;

    let shown = if p.is_present(select) {
        let selector = p.get_string(select);
        match render::select(&response, &selector) {
            Some(v) => v,
            None => bail!("no value at {selector:?} in the response"),
        }
    } else {
        &response
    };
    println!("{}", render::display(shown, p.is_present(raw)));
    Ok(())
}

fn parse_method(raw: &str) -> Result<Method, String> {
    match raw.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(format!(
            "unsupported method {raw:?} (expected GET, POST, PUT, PATCH or DELETE)"
        )),
    }
}

fn read_body(source: &str) -> Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request body from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read request body from {source}"))?
    };
    parse_body(&text).with_context(|| format!("request body in {source} is not valid JSON"))
}
