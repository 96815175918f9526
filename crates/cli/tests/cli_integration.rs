use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn src() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_src"));
    cmd.env_remove("SRC_API_URL")
        .env_remove("SRC_TOKEN")
        .env_remove("RUST_LOG")
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

fn run(args: &[&str]) -> Output {
    src().args(args).output().expect("failed to run src")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        src()
            .env("SRC_API_URL", uri)
            .env("SRC_TOKEN", "test-token")
            .args(&args)
            .output()
            .expect("failed to run src")
    })
    .await
    .expect("blocking task panicked")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_lists_commands() {
    let out = run(&["--help"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(
        text.contains("Usage: src") && text.contains("api <METHOD> <PATH>"),
        "unexpected help output:\n{text}"
    );
}

#[test]
fn version_is_printed() {
    let out = run(&["version"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), format!("src {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Commands:"));
}

#[test]
fn unknown_command_fails() {
    let out = run(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown command: frobnicate"));
}

#[test]
fn api_help_shows_options() {
    let out = run(&["api", "--help"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("Usage: src api <METHOD> <PATH> [options]"));
    assert!(text.contains("-f, --field"));
    assert!(text.contains("<value>..."));
}

#[test]
fn api_unknown_option_prints_usage() {
    let out = run(&["api", "GET", "/x", "--bogus"]);
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("error: unknown option --bogus"), "stderr:\n{err}");
    assert!(err.contains("Usage: src api"));
}

#[test]
fn api_rejects_malformed_field() {
    let out = run(&["api", "POST", "/x", "-f", "title"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("validation failed for -f/--field"));
}

#[test]
fn api_rejects_unknown_method() {
    let out = run(&["api", "TRACE", "/x"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("unsupported method"));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_get_prints_selected_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [{"slug": "widgets", "visibility": "public"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run_against(&server, &["api", "get", "/orgs/acme/repos", "-s", "repositories.0.slug"]).await;
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "widgets\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_post_builds_body_from_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acme/widgets/issues"))
        .and(body_json(json!({"title": "Broken build", "priority": 2, "draft": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "7"})))
        .expect(1)
        .mount(&server)
        .await;

    let out = run_against(
        &server,
        &[
            "api",
            "POST",
            "/acme/widgets/issues",
            "-f",
            "title=Broken build",
            "-Fpriority=2",
            "--typed-field=draft=false",
            "--raw",
        ],
    )
    .await;
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "{\"id\":\"7\"}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_status_exits_with_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such repo"))
        .mount(&server)
        .await;

    let out = run_against(&server, &["api", "GET", "/acme/missing"]).await;
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("http.error 404: no such repo"), "stderr:\n{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_flag_overrides_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let out = tokio::task::spawn_blocking(move || {
        src()
            .env("SRC_API_URL", "http://127.0.0.1:9")
            .args(["api", "GET", "/ping", "-s", "ok", "--api", uri.as_str()])
            .output()
            .expect("failed to run src")
    })
    .await
    .expect("blocking task panicked");
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "true\n");
}

#[test]
fn malformed_dotenv_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join(".env"),
        "BROKEN LINE HERE\nSRC_API_URL=ftp://from-dotenv\n",
    )
    .expect("write .env");

    let out = src()
        .current_dir(dir.path())
        .args(["api", "GET", "/x"])
        .output()
        .expect("failed to run src");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error: invalid .env"), "stderr:\n{err}");
}

#[test]
fn dotenv_settings_are_applied() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join(".env"), "SRC_API_URL=ftp://from-dotenv\n").expect("write .env");

    let out = src()
        .current_dir(dir.path())
        .args(["api", "GET", "/x"])
        .output()
        .expect("failed to run src");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("ftp://from-dotenv"), "stderr:\n{err}");
}

#[test]
fn parser_events_follow_rust_log() {
    let out = src()
        .env("RUST_LOG", "gopt=trace")
        .args(["api", "--help"])
        .output()
        .expect("failed to run src");
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("matched flag"), "stderr:\n{err}");
    assert!(err.contains("parsed command line"), "stderr:\n{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn verbose_enables_debug_logging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let out = run_against(&server, &["api", "-v", "GET", "/ping"]).await;
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert!(stderr(&out).contains("sending request"), "stderr:\n{}", stderr(&out));

    let quiet = run_against(&server, &["api", "GET", "/ping"]).await;
    assert!(!stderr(&quiet).contains("sending request"));
}
