use crate::support::{exit_on_error, print_json_or_exit, result_label};
use ddcc_registry::{RegistryDocument, check_liveness, fetch_live_addresses};
use serde_json::json;
use std::path::PathBuf;

const CHECK_KIND: &str = "ddcc.online_check.v1";

pub fn run(root: String, registry: String, master_url: String, json_output: bool) {
    let live = exit_on_error(fetch_live_addresses(&master_url));
    let registry_path = PathBuf::from(root).join(registry);
    let (document, _) = exit_on_error(RegistryDocument::load(&registry_path));
    let report = exit_on_error(check_liveness(&document, &live));

    if json_output {
        let payload = json!({
            "schema": 1,
            "checkKind": CHECK_KIND,
            "result": result_label(report.passed()),
            "registry": registry_path.display().to_string(),
            "liveAddresses": live.len(),
            "checked": report.checked,
            "missing": report.missing,
        });
        print_json_or_exit(&payload, "online");
    } else {
        for row in &report.missing {
            eprintln!(
                "Address not found in master server: {}/{}",
                row.id, row.address
            );
        }
        if report.passed() {
            println!("[online] OK (checked={})", report.checked);
        } else {
            println!(
                "[online] FAIL (checked={}, missing={})",
                report.checked,
                report.missing.len()
            );
        }
    }

    if !report.passed() {
        std::process::exit(1);
    }
}
