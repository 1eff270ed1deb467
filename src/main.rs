use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use cloudcost::service::RegionCost;
use cloudcost::{CloudCostConfig, RegionCostService, logging, web};

/// Weather-driven data center cost index for cloud regions.
#[derive(Parser)]
#[command(name = "cloudcost")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cost report for every region (default).
    Report,
    /// Serve the HTTP API and static frontend.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CloudCostConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    logging::init_tracing(&config.logging)?;

    let service = Arc::new(
        RegionCostService::from_config(&config).context("Failed to set up region cost service")?,
    );

    match cli.command.unwrap_or(Command::Report) {
        Command::Serve => web::run(&config.server, service).await,
        Command::Report => {
            let costs = service.all_costs().await;
            print_report(&costs);
            Ok(())
        }
    }
}

fn print_report(costs: &[RegionCost]) {
    let now = Utc::now();
    println!(
        "{:<24} {:<34} {:<11} {:>6} {:<12} {:>8} {:<8} {:<10}",
        "Region", "Weather", "Power", "Index", "Health", "Monthly", "Factors", "Local time"
    );

    for record in costs {
        let weather = &record.weather;
        let cost = &record.cost;

        let summary = &record.summary;

        let conditions = format!(
            "{} {}{} {}{} {}",
            summary.weather_emoji,
            summary.temperature_indicator,
            weather.format_temperature(),
            summary.humidity_indicator,
            weather.format_humidity(),
            weather.format_wind()
        );
        let factors: String = cost
            .factor_statuses()
            .iter()
            .map(|(_, _, status)| status.symbol())
            .collect();
        let local_time = record
            .region
            .local_time(now)
            .map_or_else(|| "-".to_string(), |t| t.format("%H:%M %Z").to_string());

        println!(
            "{:<24} {:<34} {:<11} {:>6.2} {} {:<10} {:>7} {:<8} {:<10}",
            record.region.display_name,
            conditions,
            summary.electricity_price,
            cost.final_index,
            cost.health_score.emoji(),
            cost.health_score.as_str(),
            format!("${}", cost.estimated_monthly_cost),
            factors,
            local_time
        );
    }

    if let Some(best) = costs
        .iter()
        .min_by(|a, b| a.cost.final_index.total_cmp(&b.cost.final_index))
    {
        println!();
        println!(
            "Cheapest right now: {} ({:.2}). {}",
            best.region.display_name,
            best.cost.final_index,
            best.cost.simple_explanation()
        );
    }
}
