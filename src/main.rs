use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod aqi;
mod charts;
mod config;
mod dashboard;
mod llm;
mod weather;

use charts::{Chart, Series};
use config::Settings;
use llm::GeminiClient;
use weather::WeatherClient;

#[derive(Parser)]
#[command(name = "skycast")]
#[command(about = "Terminal weather dashboard with ASCII forecast charts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard: current weather, air quality, AI report, forecast
    Weather {
        /// City to report on
        city: String,

        /// OpenWeather API key
        #[arg(long, env = "OPENWEATHER_API_KEY")]
        api_key: String,

        /// Gemini API key for the AI weather report
        #[arg(long, env = "GEMINI_API_KEY")]
        gemini_api_key: Option<String>,

        /// Gemini model used for the report
        #[arg(long, default_value = config::DEFAULT_GEMINI_MODEL)]
        gemini_model: String,
    },

    /// Print the weekly forecast as a bar chart and exit
    Forecast {
        /// City to fetch the forecast for
        city: String,

        /// OpenWeather API key
        #[arg(long, env = "OPENWEATHER_API_KEY")]
        api_key: String,

        /// Bar marker character
        #[arg(short, long, default_value = "+")]
        marker: String,
    },

    /// Render a demo chart from fixed data (no network access)
    Chart {
        /// Bar marker character
        #[arg(short, long, default_value = "+")]
        marker: String,

        /// Use the grid layout instead of linear bars
        #[arg(long)]
        grid: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Weather {
            city,
            api_key,
            gemini_api_key,
            gemini_model,
        } => {
            let settings = Settings {
                openweather_api_key: api_key,
                gemini_api_key,
                gemini_model,
            };
            run_dashboard(&city, settings).await
        }

        Commands::Forecast {
            city,
            api_key,
            marker,
        } => {
            let client = WeatherClient::new(api_key, config::REQUEST_TIMEOUT)?;
            info!("Fetching forecast for {}...", dashboard::title_case(&city));
            let forecast = client.forecast(&city).await?;
            let series = weather::daily_temperature_series(&forecast.list);

            let chart = Chart::new(series);
            println!("{}", chart.bar(&marker)?);
            Ok(())
        }

        Commands::Chart { marker, grid } => {
            let series: Series = [
                ("mon", 1),
                ("tue", 2),
                ("wed", 3),
                ("thu", 4),
                ("fri", 4),
                ("sat", 2),
                ("sun", 1),
            ]
            .into_iter()
            .collect();

            let chart = Chart::new(series);
            let rendered = if grid {
                chart.grid(&marker)?
            } else {
                chart.bar(&marker)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn run_dashboard(city: &str, settings: Settings) -> Result<()> {
    let client = WeatherClient::new(settings.openweather_api_key.clone(), config::REQUEST_TIMEOUT)?;
    let display_city = dashboard::title_case(city);

    info!("Fetching weather data for {display_city}...");
    let current = client.current(city).await?;
    let air_quality = client.air_quality(city).await?;
    let forecast = client.forecast(city).await?;
    let series = weather::daily_temperature_series(&forecast.list);

    let report = match settings.gemini_api_key {
        Some(key) => {
            info!("Fetching weather report from Gemini for {display_city}...");
            let gemini = GeminiClient::new(key, settings.gemini_model, config::REQUEST_TIMEOUT)?;
            let prompt = llm::weather_report_prompt(
                &display_city,
                &dashboard::format_weather(&current),
                &dashboard::format_air_quality(&air_quality),
            );
            match gemini.generate(&prompt).await {
                Ok(text) => text,
                Err(err) => {
                    warn!("weather report unavailable: {err:#}");
                    llm::FALLBACK_REPORT.to_string()
                }
            }
        }
        None => "Set GEMINI_API_KEY to enable the AI weather report.".to_string(),
    };

    dashboard::run(dashboard::App {
        city: display_city,
        weather: current,
        air_quality,
        report,
        forecast: series,
    })
}
