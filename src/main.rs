//! Backoffice Console
//!
//! Desktop client for managing clients, users, roles, billing profiles,
//! buildings and rooms.
//!
//! This is the main entry point for the Dioxus Desktop application.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Initialize logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .pretty()
        .init();

    // Print startup banner
    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   🏢 Backoffice Console v{:<33}║", backoffice_ui::VERSION);
    println!("║   Tenant, Building & Room Management                      ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    backoffice_ui::launch();
}
