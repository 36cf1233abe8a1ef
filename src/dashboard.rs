//! Live weather dashboard: clock header, current weather and air quality
//! on the left, AI weather report and forecast chart on the right,
//! redrawn once per second until 'q' or Esc.

use crate::aqi;
use crate::charts::{Chart, Series, TerminalProbe};
use crate::weather::{AirQualityEntry, CurrentWeather};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Everything the dashboard shows, fetched once up front. The live loop
/// only re-renders; it performs no I/O beyond the terminal.
pub struct App {
    pub city: String,
    pub weather: CurrentWeather,
    pub air_quality: AirQualityEntry,
    pub report: String,
    pub forecast: Series,
}

/// Runs the dashboard until the user exits, restoring the terminal on the
/// way out even when drawing fails.
pub fn run(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        _ => {}
                    }
                }
            }
        }
        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // clock
            Constraint::Min(10),   // main panels
            Constraint::Length(1), // exit hint
        ])
        .split(f.area());

    let clock = Paragraph::new(Local::now().format("%a %b %e %H:%M:%S %Y").to_string())
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(Style::default().fg(Color::Blue)));
    f.render_widget(clock, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(chunks[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main[1]);

    let weather = Paragraph::new(format_weather(&app.weather))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Blue))
                .title(format!(" Weather in {} ", app.city)),
        );
    f.render_widget(weather, left[0]);

    let air_quality = Paragraph::new(format_air_quality(&app.air_quality))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Blue))
                .title(" Current Air Quality "),
        );
    f.render_widget(air_quality, left[1]);

    let report = Paragraph::new(app.report.as_str())
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Blue))
                .title(" Weather Report "),
        );
    f.render_widget(report, right[0]);

    // fresh chart per draw so the panel never accumulates stale writes
    let chart = Chart::with_probe(app.forecast.clone(), &TerminalProbe);
    let forecast_text = chart
        .grid("+")
        .unwrap_or_else(|err| err.to_string());
    let forecast = Paragraph::new(forecast_text).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Magenta))
            .title(" Weekly Forecast "),
    );
    f.render_widget(forecast, right[1]);

    let hint = Paragraph::new("Press 'q' to exit").style(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(hint, chunks[2]);
}

/// Plain-text block for the current-weather panel; also fed to the report
/// prompt.
pub fn format_weather(weather: &CurrentWeather) -> String {
    let (condition, description) = weather
        .weather
        .first()
        .map(|c| (c.main.as_str(), c.description.as_str()))
        .unwrap_or(("unknown", "unknown"));

    format!(
        " Current Weather: {condition} ({description})\n \
         Temperature: {:.1}°C (feels like {:.1}°C)\n \
         Min Temperature: {:.1}°C\n \
         Max Temperature: {:.1}°C\n\n \
         Humidity: {:.0}%\n \
         Pressure: {:.0} hPa\n \
         Wind Speed: {:.1} m/s\n \
         Wind Direction: {:.0}°\n",
        weather.main.temp,
        weather.main.feels_like,
        weather.main.temp_min,
        weather.main.temp_max,
        weather.main.humidity,
        weather.main.pressure,
        weather.wind.speed,
        weather.wind.deg,
    )
}

/// Plain-text block for the air-quality panel; also fed to the report
/// prompt.
pub fn format_air_quality(entry: &AirQualityEntry) -> String {
    let mut out = String::new();
    match aqi::lookup(entry.main.aqi) {
        Some(level) => {
            out.push_str(&format!(
                " Air Quality Index: {} ({})\n\n",
                entry.main.aqi, level.qualitative_name
            ));
            out.push_str(&format!(" Description: {}\n\n", level.description));
            out.push_str(&format!(
                " Health Advisory: {}\n\n",
                level.health_advisory
            ));
        }
        None => {
            out.push_str(&format!(
                " Air Quality Index: {} (out of scale)\n\n",
                entry.main.aqi
            ));
        }
    }

    out.push_str(" Air Quality Breakdown:\n");
    let c = &entry.components;
    out.push_str(&format!("  - CO: {} µg/m³\n", c.co));
    out.push_str(&format!("  - NO2: {} µg/m³\n", c.no2));
    out.push_str(&format!("  - O3: {} µg/m³\n", c.o3));
    out.push_str(&format!("  - SO2: {} µg/m³\n", c.so2));
    out.push_str(&format!("  - PM2.5: {} µg/m³\n", c.pm2_5));
    out.push_str(&format!("  - PM10: {} µg/m³\n", c.pm10));
    out
}

/// "new york" -> "New York", for panel titles and the report prompt.
pub fn title_case(city: &str) -> String {
    city.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{AqiIndex, Condition, MainMetrics, Pollutants, Wind};

    fn sample_weather() -> CurrentWeather {
        CurrentWeather {
            weather: vec![Condition {
                main: "Clouds".to_string(),
                description: "scattered clouds".to_string(),
            }],
            main: MainMetrics {
                temp: 12.3,
                feels_like: 11.0,
                temp_min: 8.0,
                temp_max: 15.5,
                humidity: 63.0,
                pressure: 1013.0,
            },
            wind: Wind {
                speed: 4.2,
                deg: 230.0,
            },
        }
    }

    fn sample_air_quality(aqi: u8) -> AirQualityEntry {
        AirQualityEntry {
            main: AqiIndex { aqi },
            components: Pollutants {
                co: 201.9,
                no2: 0.77,
                o3: 68.7,
                so2: 0.64,
                pm2_5: 0.5,
                pm10: 0.54,
            },
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("canberra"), "Canberra");
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("RIO DE JANEIRO"), "Rio De Janeiro");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_format_weather() {
        let text = format_weather(&sample_weather());
        assert!(text.contains("Clouds (scattered clouds)"));
        assert!(text.contains("12.3°C (feels like 11.0°C)"));
        assert!(text.contains("Humidity: 63%"));
        assert!(text.contains("Wind Direction: 230°"));
    }

    #[test]
    fn test_format_air_quality_known_index() {
        let text = format_air_quality(&sample_air_quality(2));
        assert!(text.contains("Air Quality Index: 2 (Fair)"));
        assert!(text.contains("Health Advisory:"));
        assert!(text.contains("- PM2.5: 0.5 µg/m³"));
    }

    #[test]
    fn test_format_air_quality_out_of_scale() {
        let text = format_air_quality(&sample_air_quality(9));
        assert!(text.contains("Air Quality Index: 9 (out of scale)"));
        assert!(text.contains("Air Quality Breakdown:"));
    }
}
