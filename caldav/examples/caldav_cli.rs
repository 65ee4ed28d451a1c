// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! CalDAV property inspection tool.
//!
//! This is a standalone CLI example for checking the property decoder against
//! real CalDAV servers. It serves as both a validation tool and example code
//! for using the CalDavClient API.

use std::error::Error;
use std::io::Write as _;

use cdav_caldav::{
    CalDavClient, CalDavConfig, CalDavError, CalendarCollection, Depth, PropFindRequest,
    PropertyValue,
};
use clap::{Parser, Subcommand};
use colored::Colorize as _;
use tracing_subscriber::EnvFilter;

/// CalDAV property inspection tool.
#[derive(Parser)]
#[command(name = "caldav_cli")]
#[command(about = "CalDAV property inspection tool", long_about = None)]
#[command(version)]
struct Cli {
    /// CalDAV server URL
    #[arg(long)]
    server: Option<String>,
    /// Calendar home path
    #[arg(long, default_value = "/")]
    home: String,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List all calendar collections in the calendar home
    ListCals,
    /// Show the decoded properties of one collection
    Props {
        /// Collection href
        href: String,
    },
    /// Show the raw multistatus properties of one collection
    Raw {
        /// Collection href
        href: String,
    },
}

impl Cli {
    fn build_config(&self) -> Result<CalDavConfig, Box<dyn Error>> {
        let server = self
            .server
            .clone()
            .or_else(|| std::env::var("CDAV_CALDAV_SERVER").ok())
            .ok_or_else(|| {
                "CDAV_CALDAV_SERVER must be provided via --server or CDAV_CALDAV_SERVER env var"
                    .to_string()
            })?;

        Ok(CalDavConfig {
            base_url: server,
            calendar_home: self.home.clone(),
            timeout_secs: self.timeout,
            user_agent: "cdav-caldav-cli/0.1.0".to_string(),
        })
    }
}

async fn cmd_list_cals(client: &CalDavClient, json: bool) -> Result<(), Box<dyn Error>> {
    let calendars = client.list_calendars().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calendars)?);
        return Ok(());
    }

    if calendars.is_empty() {
        println!("No calendars found");
        return Ok(());
    }

    println!("{:-<100}", "");
    println!(
        "{:<50} {:<20} {:<10} {:<20}",
        "Href", "Name", "Color", "Components"
    );
    println!("{:-<100}", "");

    for cal in &calendars {
        let href = cal.href.as_ref().map_or("", |h| h.as_str());
        let name = cal.display_name.as_deref().unwrap_or("Unnamed");
        let color = cal.color.as_deref().unwrap_or("-");
        println!(
            "{:<50} {:<20} {:<10} {}",
            href,
            name,
            color,
            format_components(cal)
        );
    }

    Ok(())
}

fn format_components(cal: &CalendarCollection) -> String {
    let Some(set) = cal.components else {
        return "-".to_string();
    };
    [
        (set.vevent, "VEVENT"),
        (set.vjournal, "VJOURNAL"),
        (set.vtodo, "VTODO"),
    ]
    .into_iter()
    .filter_map(|(enabled, name)| enabled.then_some(name))
    .collect::<Vec<_>>()
    .join(", ")
}

async fn cmd_props(client: &CalDavClient, href: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let props = client.calendar_properties(href).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    if props.is_empty() {
        println!("No known properties reported");
        return Ok(());
    }

    for (name, value) in props.iter() {
        let rendered = match value {
            PropertyValue::Undefined => "undefined".dimmed().to_string(),
            PropertyValue::Invalid(raw) => format!("invalid ({raw:?})").yellow().to_string(),
            other => serde_json::to_string(other)?,
        };
        println!("{} = {}", name.to_string().cyan(), rendered);
    }

    Ok(())
}

async fn cmd_raw(client: &CalDavClient, href: &str) -> Result<(), Box<dyn Error>> {
    let multistatus = client
        .propfind(href, &PropFindRequest::calendar_properties(), Depth::Zero)
        .await?;

    for response in &multistatus.responses {
        println!("{}", response.href.as_str().bold());
        for prop_stat in &response.prop_stats {
            println!("  {}", prop_stat.status.dimmed());
            for (name, value) in prop_stat.props.iter() {
                println!("    {} = {:?}", name.to_string().cyan(), value.text());
            }
        }
    }

    Ok(())
}

/// Format error for user-friendly display.
fn format_error(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<CalDavError>() {
        Some(CalDavError::Status { status: 401 | 403, .. }) => {
            format!("{} Access denied", "Error:".red().bold())
        }
        Some(CalDavError::Status { status: 404, .. }) => {
            format!("{} Resource not found", "Error:".red().bold())
        }
        Some(CalDavError::Http(e)) => format!(
            "{} Network error - check server URL and connection: {e}",
            "Error:".red().bold()
        ),
        _ => format!("{} {}", "Error:".red().bold(), err),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env files (if they exist)
    // Priority: .env.local (highest) -> .env -> existing environment variables (lowest)
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    let client = CalDavClient::new(config)?;

    // Create a new runtime for the async operations
    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async {
        match &cli.command {
            Commands::ListCals => cmd_list_cals(&client, cli.json).await,
            Commands::Props { href } => cmd_props(&client, href, cli.json).await,
            Commands::Raw { href } => cmd_raw(&client, href).await,
        }
    });

    if let Err(e) = result {
        // Flush stdout before printing error
        std::io::stdout().flush().ok();
        eprintln!("{}", format_error(e.as_ref()));
        std::process::exit(1);
    }

    Ok(())
}
