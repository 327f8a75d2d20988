//! Integration tests that run the CLI binary.

const CHAT_VARS: &[&str] = &[
    "EQX_CHAT_UPSTREAM_URL",
    "EQX_CHAT_ENDPOINT",
    "EQX_CHAT_PROXY_URL",
    "EQX_CHAT_BIND",
    "EQX_CHAT_REVEAL_MS",
    "EQX_CHAT_SHOW_TIMESTAMPS",
];

fn bin() -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_eqx", "-", "chat"));
    let mut cmd = std::process::Command::new(bin);
    for var in CHAT_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A local port with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--prompt"), "expected usage text in output");
    assert!(stdout.contains("serve"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("eqx-chat"));
}

#[test]
fn cli_empty_prompt_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["-p", "   "])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty prompt"), "got: {}", stderr);
}

#[test]
fn cli_config_shows_endpoints() {
    // Run from temp dir so dotenv() won't load .env from project root
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("config")
        .env("EQX_CHAT_UPSTREAM_URL", "http://chat.internal:5001")
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("direct"), "got: {}", stdout);
    assert!(stdout.contains("http://chat.internal:5001/GetChatbotResponse"));
}

#[test]
fn cli_invalid_config_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("config")
        .env("EQX_CHAT_ENDPOINT", "sideways")
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("EQX_CHAT_ENDPOINT"), "got: {}", stderr);
}

#[test]
fn cli_prompt_with_unreachable_server_prints_network_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["-p", "hello", "--no-reveal"])
        .env("EQX_CHAT_UPSTREAM_URL", closed_port_url())
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Network error. Could not reach the chatbot server."),
        "got: {}",
        stdout
    );
}
