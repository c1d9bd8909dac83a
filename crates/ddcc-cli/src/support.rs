use ddcc_registry::{Finding, Severity};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    })
}

pub fn print_json_or_exit(payload: &Value, label: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} payload: {err}");
        std::process::exit(1);
    });
    println!("{rendered}");
}

pub fn print_finding(finding: &Finding) {
    match finding.severity {
        Severity::Warning | Severity::Fixable => eprintln!("warning: {finding}"),
        Severity::Fixed | Severity::Error => eprintln!("{finding}"),
    }
}

pub fn result_label(passed: bool) -> &'static str {
    if passed { "accepted" } else { "rejected" }
}
