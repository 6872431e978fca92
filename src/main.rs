//! gamemon - query game-server status from the command line
//!
//! Looks up one server via the game-monitor service, serving from the local
//! cache when the record is still fresh, and prints the result as a text
//! summary or JSON.

use clap::Parser;

use gamemon::cli::Cli;
use gamemon::data::ServerRecord;
use gamemon::GameMonitor;

/// Prints a human-readable summary of one record
fn print_summary(record: &ServerRecord) {
    println!(
        "{} ({}:{})",
        record.name.as_deref().unwrap_or("<unnamed>"),
        record.ip,
        record.port
    );
    if let Some(map) = &record.map {
        println!("  map:     {}", map);
    }
    if let Some(game) = &record.game {
        println!(
            "  game:    {} {}",
            game.name.as_deref().unwrap_or("?"),
            game.version.as_deref().unwrap_or("")
        );
    }
    println!("  players: {}/{}", record.count.current, record.count.max);
    for player in &record.players {
        match player.score {
            Some(score) => println!("    {} ({})", player.name, score),
            None => println!("    {}", player.name),
        }
    }
    if !record.variables.is_empty() {
        println!("  variables:");
        for (name, value) in &record.variables {
            println!("    {} = {}", name, value);
        }
    }
    println!("  updated: {}", record.updated.format("%Y-%m-%d %H:%M:%S UTC"));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.host.is_none() || cli.port.is_none() {
        eprintln!("Usage: gamemon <HOST> <PORT>");
        std::process::exit(2);
    }

    let mut monitor = GameMonitor::new(cli.monitor_options());

    match monitor.query(cli.host.as_deref(), cli.port).await {
        Some(record) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_summary(&record);
            }
            Ok(())
        }
        None => {
            eprintln!(
                "No data available for {}:{}",
                cli.host.as_deref().unwrap_or(""),
                cli.port.unwrap_or(0)
            );
            std::process::exit(1);
        }
    }
}
