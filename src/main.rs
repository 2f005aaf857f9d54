use clap::{Parser, Subcommand};
use log::{error, info};
use time::OffsetDateTime;
use tokio::time::{interval, MissedTickBehavior};

use comfort_dashboard::render::TextChart;
use comfort_dashboard::utils::format_datetime;
use comfort_dashboard::{ApiClient, ChartSurface, Dashboard, DashboardConfig, Preferences};

#[derive(Parser, Debug)]
#[command(author, version, about = "Comfort zone dashboard for a workspace", long_about = None)]
struct Args {
    /// Workspace to show (overrides COMFORT_WORKSPACE_ID)
    #[arg(short, long, global = true)]
    workspace: Option<String>,

    /// User whose preferences apply (overrides COMFORT_USER_ID)
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll telemetry and redraw until interrupted
    Watch,
    /// Show the latest reading once
    Current,
    /// Show the normalized telemetry history
    History {
        /// Look-back window in hours (defaults to COMFORT_HISTORY_HOURS)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        hours: Option<u32>,
    },
    /// Show stored comfort preferences
    Prefs,
    /// Save comfort preferences
    Save {
        #[arg(long)]
        preferred_temp: f64,
        #[arg(long)]
        temp_threshold: f64,
        #[arg(long)]
        preferred_humidity: f64,
        #[arg(long)]
        humidity_threshold: f64,
    },
}

async fn watch_loop(
    dashboard: &Dashboard,
    period: std::time::Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Watching {} every {} seconds",
        dashboard.scope().workspace_id,
        period.as_secs()
    );

    let preferences = dashboard.load_preferences().await;
    let mut chart = TextChart::new(std::io::stdout());
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        info!("Refreshing at {}", format_datetime(&OffsetDateTime::now_utc()));

        let frame = dashboard.refresh(preferences.as_ref()).await;
        chart.draw(&frame)?;
    }
}

async fn run(
    command: Command,
    dashboard: &Dashboard,
    config: &DashboardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chart = TextChart::new(std::io::stdout());

    match command {
        Command::Watch => {
            // Handle Ctrl+C gracefully
            let (tx, mut rx) = tokio::sync::oneshot::channel();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                let _ = tx.send(());
            });

            tokio::select! {
                result = watch_loop(dashboard, config.poll_interval) => result?,
                _ = &mut rx => {
                    info!("Program terminated by user. Exiting gracefully.");
                }
            }
        }
        Command::Current => {
            let preferences = dashboard.load_preferences().await;
            chart.draw(&dashboard.current_frame(preferences.as_ref()).await)?;
        }
        Command::History { hours } => {
            let hours = hours.unwrap_or(config.history_hours);
            match dashboard.history_for(hours).await {
                Some(series) => chart.draw_series(&series)?,
                None => return Err(format!("no telemetry history for the last {} hours", hours).into()),
            }
        }
        Command::Prefs => {
            let preferences = match dashboard.load_preferences().await {
                Some(preferences) => preferences,
                None => {
                    info!("Using default preferences");
                    Preferences::default()
                }
            };
            println!("Preferred temperature: {}", preferences.preferred_temp);
            println!("Temperature threshold: {}", preferences.temp_threshold);
            println!("Preferred humidity:    {}", preferences.preferred_humidity);
            println!("Humidity threshold:    {}", preferences.humidity_threshold);
        }
        Command::Save {
            preferred_temp,
            temp_threshold,
            preferred_humidity,
            humidity_threshold,
        } => {
            let preferences = Preferences {
                preferred_temp,
                temp_threshold,
                preferred_humidity,
                humidity_threshold,
            };
            match dashboard.save_preferences(&preferences).await {
                Ok(_) => println!("Your comfort preferences have been saved!"),
                Err(e) => return Err(format!("Error saving preferences: {}", e).into()),
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = match DashboardConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    if let Some(workspace) = args.workspace {
        config.workspace_id = workspace;
    }
    if let Some(user) = args.user {
        config.user_id = user;
    }

    let client = ApiClient::new(config.api_url.clone(), config.request_timeout)?;
    info!("Using comfort API at {}", client.base_url());
    let dashboard = Dashboard::new(client, config.scope(), config.history_hours);

    let command = args.command.unwrap_or(Command::Watch);
    if let Err(e) = run(command, &dashboard, &config).await {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
