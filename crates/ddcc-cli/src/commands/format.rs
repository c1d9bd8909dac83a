use crate::support::{exit_on_error, print_finding, print_json_or_exit, result_label};
use ddcc_registry::{EditMode, FormatOptions, Severity, run_format};
use serde_json::json;
use std::path::PathBuf;

const CHECK_KIND: &str = "ddcc.format_check.v1";

pub struct Args {
    pub root: String,
    pub registry: String,
    pub icons: String,
    pub schema: String,
    pub info_url: String,
    pub noedit: bool,
    pub skip_schema: bool,
    pub skip_remote: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let options = FormatOptions {
        repo_root: PathBuf::from(&args.root),
        registry: PathBuf::from(&args.registry),
        icons: PathBuf::from(&args.icons),
        schema: (!args.skip_schema).then(|| PathBuf::from(&args.schema)),
        info_source: (!args.skip_remote).then(|| args.info_url.clone()),
        mode: EditMode::from_noedit(args.noedit),
    };
    let outcome = exit_on_error(run_format(&options));
    let findings = outcome.session.findings();
    let passed = outcome.passed();

    if args.json {
        let payload = json!({
            "schema": 1,
            "checkKind": CHECK_KIND,
            "result": result_label(passed),
            "mode": options.mode.as_str(),
            "registry": options.repo_root.join(&options.registry).display().to_string(),
            "written": outcome.written,
            "remoteCommunities": outcome.remote_communities,
            "gamemodes": outcome.session.gamemodes(),
            "findings": findings,
        });
        print_json_or_exit(&payload, "format");
    } else {
        for finding in findings {
            print_finding(finding);
        }
        if outcome.written {
            println!("Edited JSON");
        }
        let count = |severity: Severity| {
            findings
                .iter()
                .filter(|finding| finding.severity == severity)
                .count()
        };
        if passed {
            println!(
                "[format] OK (mode={}, fixed={}, warnings={})",
                options.mode.as_str(),
                count(Severity::Fixed),
                count(Severity::Warning)
            );
        } else {
            println!(
                "[format] FAIL (mode={}, errors={}, fixable={}, fixed={}, warnings={})",
                options.mode.as_str(),
                count(Severity::Error),
                count(Severity::Fixable),
                count(Severity::Fixed),
                count(Severity::Warning)
            );
        }
    }

    if !passed {
        std::process::exit(1);
    }
}
