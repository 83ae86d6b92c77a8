//! # Backoffice CLI
//!
//! Headless command-line interface for Backoffice Console.
//!
//! Every command runs the same `backoffice_console` flows as the desktop
//! views, against the REST API configured in `ConsoleConfig` and the session
//! persisted by `login`.
//!
//! ## Commands
//!
//! - `login` / `logout` / `whoami` - Session management
//! - `list` - Searchable, paginated entity listing
//! - `show` - Fetch one record
//! - `toggle` - Activate or deactivate a record
//! - `create` / `update` - Submit an entity form
//!

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use backoffice_core::{EntityKind, RecordId};

pub use commands::run;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "backoffice-cli")]
#[command(version, about = "Backoffice Console command-line client")]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/backoffice/config.toml)
    #[arg(long, short = 'c', global = true, env = "BACKOFFICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(long, short = 'u')]
        user: String,
        #[arg(long, short = 'p', env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Show the signed-in operator and tenant
    Whoami,

    /// List records of an entity
    List {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        /// Case-insensitive substring over the entity's search fields
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Only rooms of this building
        #[arg(long, value_parser = parse_record_id)]
        building: Option<RecordId>,
    },

    /// Show one record
    Show {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        #[arg(value_parser = parse_record_id)]
        id: RecordId,
    },

    /// Activate or deactivate a record
    Toggle {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        #[arg(value_parser = parse_record_id)]
        id: RecordId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },

    /// Create a record from key=value fields
    Create {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        #[arg(long = "field", short = 'f', value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// Update a record; unspecified fields keep their current values
    Update {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        #[arg(value_parser = parse_record_id)]
        id: RecordId,
        #[arg(long = "field", short = 'f', value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
        /// Current password (users only)
        #[arg(long, requires = "new_password")]
        old_password: Option<String>,
        /// Replacement password (users only)
        #[arg(long, requires = "old_password")]
        new_password: Option<String>,
    },
}

// ============================================================================
// Value Parsers
// ============================================================================

fn parse_entity(raw: &str) -> Result<EntityKind, String> {
    raw.parse::<EntityKind>().map_err(|e| e.to_string())
}

fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    raw.trim()
        .parse::<i64>()
        .map(RecordId)
        .map_err(|_| format!("'{}' is not a record id", raw))
}

/// Split a `key=value` argument; the value may be empty or contain `=`
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

// ============================================================================
// Logging
// ============================================================================

/// Default filter directive for a `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`
pub fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Acme").unwrap(),
            ("name".to_string(), "Acme".to_string())
        );
        assert_eq!(
            parse_assignment("address2=").unwrap(),
            ("address2".to_string(), String::new())
        );
        assert_eq!(
            parse_assignment("remarks=a=b").unwrap(),
            ("remarks".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_malformed() {
        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("42").unwrap(), RecordId(42));
        assert!(parse_record_id("abc").is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(9), "trace");
    }

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from([
            "backoffice-cli",
            "list",
            "billing-profiles",
            "--search",
            "acme",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Command::List {
                entity,
                search,
                page,
                building,
            } => {
                assert_eq!(entity, EntityKind::BillingProfile);
                assert_eq!(search.as_deref(), Some("acme"));
                assert_eq!(page, 2);
                assert_eq!(building, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_fields() {
        let cli = Cli::try_parse_from([
            "backoffice-cli",
            "create",
            "role",
            "-f",
            "name=Auditor",
            "-f",
            "description=Read only",
        ])
        .unwrap();
        let Command::Create { entity, fields } = cli.command else {
            panic!("expected create");
        };
        assert_eq!(entity, EntityKind::Role);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].1, "Read only");
    }

    #[test]
    fn test_password_flags_come_together() {
        let result = Cli::try_parse_from([
            "backoffice-cli",
            "update",
            "user",
            "3",
            "--old-password",
            "old",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_entity_rejected() {
        assert!(Cli::try_parse_from(["backoffice-cli", "list", "planets"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["backoffice-cli", "whoami", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
