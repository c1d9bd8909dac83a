//! ddcc CLI: the `ddcc` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    support::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            root,
            registry,
            icons,
            schema,
            info_url,
            noedit,
            skip_schema,
            skip_remote,
            json,
        } => commands::format::run(commands::format::Args {
            root,
            registry,
            icons,
            schema,
            info_url,
            noedit,
            skip_schema,
            skip_remote,
            json,
        }),

        Commands::Online {
            root,
            registry,
            master_url,
            json,
        } => commands::online::run(root, registry, master_url, json),
    }
}
