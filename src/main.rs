use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::debug;

use habitual::cli::args::{Cli, Commands};
use habitual::cli::handlers::{self, Style};
use habitual::config::AppConfig;
use habitual::db;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;
    let style = Style::new(&config, cli.no_color);

    // Ensure data directory exists and open DB
    let db_path = config.ensure_data_dir()?;
    let conn = db::open(&db_path)?;
    debug!("using database {:?}", db_path);

    // Streaks are anchored on the local calendar day
    let today = Local::now().date_naive();

    match cli.command {
        None => handlers::handle_dashboard(&conn, &config, style, today)?,
        Some(Commands::Add(args)) => handlers::handle_add(&conn, style, &args, today)?,
        Some(Commands::Edit { habit, changes }) => {
            handlers::handle_edit(&conn, style, &habit, &changes)?;
        }
        Some(Commands::Remove { habit }) => handlers::handle_remove(&conn, style, &habit)?,
        Some(Commands::List) => handlers::handle_list(&conn, style, today)?,
        Some(Commands::Toggle { habit, date, count }) => {
            handlers::handle_toggle(&conn, style, &habit, date.as_deref(), count, today)?;
        }
        Some(Commands::Stats { range }) => {
            handlers::handle_stats(&conn, &config, style, range.as_deref(), today)?;
        }
        Some(Commands::Calendar { habit, month }) => {
            handlers::handle_calendar(&conn, style, &habit, month.as_deref(), today)?;
        }
        Some(Commands::Achievements) => handlers::handle_achievements(&conn, style, today)?,
        Some(Commands::Export) => handlers::handle_export(&conn, today)?,
        Some(Commands::Config {
            chart_range,
            color,
            show_achievements,
        }) => {
            handlers::handle_config(&mut config, style, chart_range.as_deref(), color, show_achievements)?;
        }
    }

    Ok(())
}
