//! CLI module for dashgate
//!
//! Provides the command-line interface for running the gate.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// dashgate - Login gate in front of an embedded dashboard
#[derive(Parser, Debug)]
#[command(name = "dashgate")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DASHGATE_HOST               Bind address (default: 0.0.0.0)
    DASHGATE_PORT               Listen port (default: 8080)
    DASHGATE_EMAIL              Accepted login email (required)
    DASHGATE_PASSWORD           Accepted login password (required)
    DASHGATE_DASHBOARD_URL      Dashboard embed URL (required)
    DASHGATE_AUDIT_LOG          Audit log file (default: ~/.dashgate/access_log.txt)
    DASHGATE_BASE_PATH          Mount path of the gate (default: /)
    DASHGATE_PAGE_TITLE         Page title (default: Dashboard Access)
    DASHGATE_SESSION_TTL_SECS   Idle session lifetime (default: 1440)
    DASHGATE_TRUST_PROXY        Use X-Forwarded-For for the audit IP (default: false)
    DASHGATE_LOG_LEVEL          Log level (default: info)
    DASHGATE_LOG_DIR            Also write logs to daily files in this directory
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gate server
    Serve(serve::ServeArgs),
    /// Validate the environment configuration and print it (password masked)
    Check(check::CheckArgs),
}
