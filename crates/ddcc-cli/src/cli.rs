use clap::{Parser, Subcommand};
use ddcc_registry::{
    DEFAULT_ICONS_DIR, DEFAULT_INFO_URL, DEFAULT_MASTER_URL, DEFAULT_REGISTRY_PATH,
    DEFAULT_SCHEMA_PATH,
};

#[derive(Parser)]
#[command(
    name = "ddcc",
    about = "ddcc: curation checks for the DDNet custom community registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and normalize the registry, fixing what can be fixed
    Format {
        /// Repository root the registry, icons and schema paths resolve against
        #[arg(long, default_value = ".")]
        root: String,

        /// Registry JSON path
        #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
        registry: String,

        /// Icon directory
        #[arg(long, default_value = DEFAULT_ICONS_DIR)]
        icons: String,

        /// JSON schema handed to the external validator
        #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
        schema: String,

        /// Info endpoint (URL, file:// URL, or path)
        #[arg(long, default_value = DEFAULT_INFO_URL)]
        info_url: String,

        /// Report fixable issues without writing any correction
        #[arg(long)]
        noedit: bool,

        /// Skip the external schema validator
        #[arg(long)]
        skip_schema: bool,

        /// Skip the info endpoint audit
        #[arg(long)]
        skip_remote: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check every registry address against the live master server list
    Online {
        /// Repository root the registry path resolves against
        #[arg(long, default_value = ".")]
        root: String,

        /// Registry JSON path
        #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
        registry: String,

        /// Master server list (URL, file:// URL, or path)
        #[arg(long, default_value = DEFAULT_MASTER_URL)]
        master_url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
