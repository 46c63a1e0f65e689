use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::cli::args::{EditArgs, HabitArgs};
use crate::config::AppConfig;
use crate::db::repository::{CompletionRepo, HabitRepo};
use crate::models::habit::{parse_reminder, parse_weekday};
use crate::models::{Dashboard, Frequency, HabitPatch, HabitWithStats, NewHabit};
use crate::stats::achievements::{evaluate_dashboard, unlocked_count};
use crate::stats::calendar::{month_calendar, DayState};
use crate::stats::{average_completion_rate, decorate_habits};
use crate::stats::goals::{today_progress, weekly_progress};
use crate::stats::series::{average_percentage, completion_series, ChartRange};
use crate::utils::dates::{format_iso_date, month_start, parse_iso_date, parse_month};
use crate::utils::format::{format_days, format_time, pad_display, progress_bar, short_id};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($style:expr, $color:expr, $($arg:tt)*) => {{
        println!("{}", $style.paint($color, format!($($arg)*)));
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(config: &AppConfig, no_color: bool) -> Self {
        Self {
            color: config.display.color && !no_color,
        }
    }

    fn paint(&self, code: &str, text: impl std::fmt::Display) -> String {
        if self.color {
            format!("{}{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

const NAME_WIDTH: usize = 24;

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Fetch a fresh snapshot and run the full statistics pipeline over it.
pub fn load_dashboard(conn: &Connection, today: NaiveDate) -> Result<Dashboard> {
    let habits = HabitRepo::list(conn).context("Loading habits")?;
    let completions = CompletionRepo::list(conn).context("Loading completions")?;
    Ok(decorate_habits(&habits, &completions, today))
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub fn handle_dashboard(conn: &Connection, config: &AppConfig, style: Style, today: NaiveDate) -> Result<()> {
    let dash = load_dashboard(conn, today)?;

    println!();
    println_colored!(style, GOLD, "  Habits — {}", format_iso_date(today));
    println!();

    if dash.habits.is_empty() {
        println_colored!(style, DIM, "  No habits yet. Create one with: habitual add <name>");
        println!();
        return Ok(());
    }

    let done = dash.completed_today() as u32;
    let total = dash.habits.len() as u32;
    println_colored!(
        style,
        BOLD,
        "  Today: {}/{} done  {}",
        done,
        total,
        progress_bar(done, total, 12)
    );
    println!();

    for habit in dash.by_reminder() {
        print_habit_line(style, habit, today);
    }

    println!();
    print_global(style, &dash);

    if config.display.show_achievements {
        let achievements = evaluate_dashboard(&dash);
        println_colored!(
            style,
            DIM,
            "  Achievements: {}/{} unlocked",
            unlocked_count(&achievements),
            achievements.len()
        );
    }
    println!();
    Ok(())
}

fn print_habit_line(style: Style, habit: &HabitWithStats, today: NaiveDate) {
    let mark = if habit.completed_today {
        style.paint(GREEN, "✓")
    } else {
        style.paint(DIM, "○")
    };
    let reminder = habit
        .habit
        .reminder_time
        .map(format_time)
        .unwrap_or_else(|| "     ".to_string());
    let goal = today_progress(habit, today)
        .map(|p| format!("  {}/{}", p.count, p.goal))
        .unwrap_or_default();

    println!(
        "  {} {}  {}  {:>8}  best {:<4} {:>3}%{}",
        mark,
        style.paint(DIM, reminder),
        pad_display(&habit.habit.name, NAME_WIDTH),
        format_days(habit.current_streak),
        habit.longest_streak,
        habit.completion_rate,
        goal
    );
}

fn print_global(style: Style, dash: &Dashboard) {
    let g = &dash.global;
    let color = if g.global_current_streak > 0 { GREEN } else { AMBER };
    println_colored!(
        style,
        color,
        "  Perfect days: {} current  |  {} best  |  {} total",
        format_days(g.global_current_streak),
        format_days(g.global_longest_streak),
        g.total_complete_days
    );
}

// ─── Add / edit / remove ─────────────────────────────────────────────────────

fn parse_weekdays(days: &[String]) -> Result<Vec<u8>> {
    days.iter()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_weekday(d).map_err(anyhow::Error::from))
        .collect()
}

pub fn new_habit_from_args(args: &HabitArgs, today: NaiveDate) -> Result<NewHabit> {
    let weekly_days = args.weekly.as_deref().map(parse_weekdays).transpose()?;
    Ok(NewHabit {
        name: args.name.clone(),
        description: args.description.clone(),
        frequency: if weekly_days.is_some() { Frequency::Weekly } else { Frequency::Daily },
        weekly_days,
        start_date: args.start.as_deref().map(parse_iso_date).transpose()?.unwrap_or(today),
        reminder_time: args.reminder.as_deref().map(parse_reminder).transpose()?,
        track_count: args.track_count || args.goal.is_some(),
        count_goal: args.goal,
    })
}

pub fn patch_from_args(changes: &EditArgs) -> Result<HabitPatch> {
    let mut patch = HabitPatch {
        name: changes.name.clone(),
        start_date: changes.start.as_deref().map(parse_iso_date).transpose()?,
        ..Default::default()
    };

    if changes.clear_description {
        patch.description = Some(None);
    } else if let Some(desc) = &changes.description {
        patch.description = Some(Some(desc.clone()));
    }

    if changes.daily {
        patch.frequency = Some(Frequency::Daily);
    } else if let Some(days) = &changes.weekly {
        patch.frequency = Some(Frequency::Weekly);
        patch.weekly_days = Some(parse_weekdays(days)?);
    }

    if changes.clear_reminder {
        patch.reminder_time = Some(None);
    } else if let Some(r) = &changes.reminder {
        patch.reminder_time = Some(Some(parse_reminder(r)?));
    }

    if changes.no_count {
        patch.track_count = Some(false);
        patch.count_goal = Some(None);
    } else if let Some(goal) = changes.goal {
        patch.track_count = Some(true);
        patch.count_goal = Some(Some(goal));
    } else if changes.track_count {
        patch.track_count = Some(true);
    }

    Ok(patch)
}

pub fn handle_add(conn: &Connection, style: Style, args: &HabitArgs, today: NaiveDate) -> Result<()> {
    let habit = HabitRepo::create(conn, new_habit_from_args(args, today)?)?;
    println_colored!(
        style,
        GREEN,
        "  ✓ Added {} ({}, from {})  id {}",
        habit.name,
        habit.schedule_label(),
        format_iso_date(habit.start_date),
        short_id(&habit.id)
    );
    Ok(())
}

pub fn handle_edit(conn: &Connection, style: Style, reference: &str, changes: &EditArgs) -> Result<()> {
    let patch = patch_from_args(changes)?;
    if patch.is_empty() {
        println_colored!(style, DIM, "  Nothing to change");
        return Ok(());
    }
    let habit = HabitRepo::require(conn, reference)?;
    let updated = HabitRepo::update(conn, &habit.id, patch)?;
    println_colored!(style, GREEN, "  ✓ Updated {} ({})", updated.name, updated.schedule_label());
    Ok(())
}

pub fn handle_remove(conn: &Connection, style: Style, reference: &str) -> Result<()> {
    let habit = HabitRepo::require(conn, reference)?;
    HabitRepo::delete(conn, &habit.id)?;
    println_colored!(style, RED, "  ✗ Removed {} and its history", habit.name);
    Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

pub fn handle_list(conn: &Connection, style: Style, today: NaiveDate) -> Result<()> {
    let dash = load_dashboard(conn, today)?;

    println!();
    if dash.habits.is_empty() {
        println_colored!(style, DIM, "  No habits yet");
        println!();
        return Ok(());
    }

    println_colored!(
        style,
        DIM,
        "  {:<8}  {}  {:<22}  {:>7}  {:>7}  {:>4}",
        "id",
        pad_display("name", NAME_WIDTH),
        "schedule",
        "current",
        "longest",
        "rate"
    );
    for h in &dash.habits {
        println!(
            "  {:<8}  {}  {:<22}  {:>7}  {:>7}  {:>3}%",
            short_id(&h.habit.id),
            pad_display(&h.habit.name, NAME_WIDTH),
            h.habit.schedule_label(),
            h.current_streak,
            h.longest_streak,
            h.completion_rate
        );
        if let Some(desc) = &h.habit.description {
            println_colored!(style, DIM, "            {}", desc);
        }
    }
    println!();
    Ok(())
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

pub fn handle_toggle(
    conn: &Connection,
    style: Style,
    reference: &str,
    date: Option<&str>,
    count: Option<u32>,
    today: NaiveDate,
) -> Result<()> {
    let habit = HabitRepo::require(conn, reference)?;
    let date = date.map(parse_iso_date).transpose()?.unwrap_or(today);

    let outcome = CompletionRepo::toggle(conn, &habit.id, date, count)?;
    let day = if date == today { "today".to_string() } else { format_iso_date(date) };

    if outcome.is_completed() {
        let dash = load_dashboard(conn, today)?;
        let streak = dash
            .habits
            .iter()
            .find(|h| h.habit.id == habit.id)
            .map(|h| h.current_streak)
            .unwrap_or(0);
        println_colored!(
            style,
            GREEN,
            "  ✓ {} done {}  ({} streak)",
            habit.name,
            day,
            format_days(streak)
        );
    } else {
        println_colored!(style, DIM, "  ○ {} unmarked for {}", habit.name, day);
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(
    conn: &Connection,
    config: &AppConfig,
    style: Style,
    range: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let range: ChartRange = match range {
        Some(r) => r.parse()?,
        None => config.display.chart_range(),
    };
    let dash = load_dashboard(conn, today)?;
    let series = completion_series(&dash.habits, range, today);

    println!();
    println_colored!(style, GOLD, "  Statistics — {}", range.label());
    println!();
    println_colored!(
        style,
        BOLD,
        "  Total habits: {}  |  Active streak: {}  |  Best streak: {}  |  Avg completion: {}%",
        dash.habits.len(),
        format_days(dash.global.global_current_streak),
        format_days(dash.global.global_longest_streak),
        average_completion_rate(&dash.habits)
    );
    println_colored!(
        style,
        DIM,
        "  {} average: {}%",
        range.label(),
        average_percentage(&series)
    );
    println!();

    for point in &series {
        let line = format!(
            "  {}  {}/{}  {}  {:>3}%",
            point.date.format("%a %Y-%m-%d"),
            point.completed,
            point.total,
            progress_bar(point.completed, point.total, 10),
            point.percentage
        );
        if point.date > today {
            println_colored!(style, DIM, "{}", line);
        } else if point.total > 0 && point.completed == point.total {
            println_colored!(style, GREEN, "{}", line);
        } else {
            println!("{}", line);
        }
    }

    let tracked: Vec<&HabitWithStats> = dash
        .habits
        .iter()
        .filter(|h| h.habit.track_count && h.habit.count_goal.is_some())
        .collect();
    if !tracked.is_empty() {
        println!();
        println_colored!(style, DIM, "  Count goals (today · this week)");
        for h in tracked {
            if let (Some(day), Some(week)) = (today_progress(h, today), weekly_progress(h, today)) {
                println!(
                    "  {}  {}/{} {:>3}%  ·  {}/{} {:>3}%",
                    pad_display(&h.habit.name, NAME_WIDTH),
                    day.count,
                    day.goal,
                    day.percentage,
                    week.count,
                    week.goal,
                    week.percentage
                );
            }
        }
    }
    println!();
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(
    conn: &Connection,
    style: Style,
    reference: &str,
    month: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let habit = HabitRepo::require(conn, reference)?;
    let month = month.map(parse_month).transpose()?.unwrap_or_else(|| month_start(today));
    let dash = load_dashboard(conn, today)?;
    let decorated = dash
        .habits
        .iter()
        .find(|h| h.habit.id == habit.id)
        .with_context(|| format!("Habit {} missing from snapshot", habit.id))?;

    let cal = month_calendar(decorated, month, today);

    println!();
    println_colored!(style, GOLD, "  {} — {}", decorated.habit.name, month.format("%B %Y"));
    println!();
    println_colored!(style, DIM, "   S  M  T  W  T  F  S");
    for week in cal.weeks() {
        let mut line = String::from(" ");
        for cell in week {
            match cell {
                None => line.push_str("   "),
                Some((date, state)) => {
                    let day = format!("{:>3}", date.format("%-d"));
                    line.push_str(&match state {
                        DayState::Completed => style.paint(GREEN, day),
                        DayState::Missed => style.paint(RED, day),
                        DayState::Open => style.paint(BOLD, day),
                        DayState::Inactive => style.paint(DIM, day),
                    });
                }
            }
        }
        println!("{}", line);
    }
    println!();
    println_colored!(
        style,
        DIM,
        "  {} completed · {} missed",
        cal.count(DayState::Completed),
        cal.count(DayState::Missed)
    );
    println!();
    Ok(())
}

// ─── Achievements ────────────────────────────────────────────────────────────

pub fn handle_achievements(conn: &Connection, style: Style, today: NaiveDate) -> Result<()> {
    let dash = load_dashboard(conn, today)?;
    let achievements = evaluate_dashboard(&dash);

    println!();
    println_colored!(
        style,
        GOLD,
        "  Achievements — {}/{} unlocked",
        unlocked_count(&achievements),
        achievements.len()
    );
    println!();

    for a in &achievements {
        let name = pad_display(a.badge.name(), 18);
        if a.unlocked {
            println!(
                "  {} {}  {}",
                style.paint(GREEN, "★"),
                style.paint(BOLD, name),
                a.badge.description()
            );
        } else {
            let progress = a
                .progress
                .map(|p| format!("  {} {}/{}", progress_bar(p.value, p.target, 10), p.value, p.target))
                .unwrap_or_default();
            println!(
                "  {} {}  {}{}",
                style.paint(DIM, "☆"),
                style.paint(DIM, name),
                a.badge.description(),
                progress
            );
        }
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Apply changes to `config`; returns whether anything changed.
pub fn apply_config_changes(
    config: &mut AppConfig,
    chart_range: Option<&str>,
    color: Option<bool>,
    show_achievements: Option<bool>,
) -> Result<bool> {
    let mut changed = false;
    if let Some(range) = chart_range {
        let range: ChartRange = range.parse()?;
        config.display.chart_range = range.as_str().to_string();
        changed = true;
    }
    if let Some(color) = color {
        config.display.color = color;
        changed = true;
    }
    if let Some(show) = show_achievements {
        config.display.show_achievements = show;
        changed = true;
    }
    Ok(changed)
}

pub fn handle_config(
    config: &mut AppConfig,
    style: Style,
    chart_range: Option<&str>,
    color: Option<bool>,
    show_achievements: Option<bool>,
) -> Result<()> {
    if apply_config_changes(config, chart_range, color, show_achievements)? {
        config.save()?;
        println_colored!(style, GREEN, "  ✓ Settings saved");
    }

    println!();
    println_colored!(style, GOLD, "  Settings");
    println!();
    println!("  Config file:        {}", AppConfig::config_path()?.display());
    println!("  Database:           {}", config.db_path()?.display());
    println!("  Color:              {}", config.display.color);
    println!("  Chart range:        {}", config.display.chart_range().as_str());
    println!("  Show achievements:  {}", config.display.show_achievements);
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(serde::Serialize)]
struct Export<'a> {
    date: NaiveDate,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
    achievements: Vec<crate::models::Achievement>,
}

pub fn handle_export(conn: &Connection, today: NaiveDate) -> Result<()> {
    let dash = load_dashboard(conn, today)?;
    let export = Export {
        date: today,
        dashboard: &dash,
        achievements: evaluate_dashboard(&dash),
    };
    let json = serde_json::to_string_pretty(&export).context("Serializing export")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn add_args(name: &str) -> HabitArgs {
        HabitArgs {
            name: name.into(),
            description: None,
            weekly: None,
            start: None,
            reminder: None,
            track_count: false,
            goal: None,
        }
    }

    #[test]
    fn add_args_default_to_daily_from_today() {
        let new = new_habit_from_args(&add_args("Read"), d("2024-05-01")).unwrap();
        assert_eq!(new.frequency, Frequency::Daily);
        assert_eq!(new.start_date, d("2024-05-01"));
        assert!(!new.track_count);
    }

    #[test]
    fn add_args_weekly_and_goal() {
        let mut args = add_args("Gym");
        args.weekly = Some(vec!["mon".into(), "3".into()]);
        args.goal = Some(4);
        args.start = Some("2024-04-01".into());
        let new = new_habit_from_args(&args, d("2024-05-01")).unwrap();
        assert_eq!(new.frequency, Frequency::Weekly);
        assert_eq!(new.weekly_days, Some(vec![1, 3]));
        assert!(new.track_count);
        assert_eq!(new.count_goal, Some(4));
        assert_eq!(new.start_date, d("2024-04-01"));
    }

    #[test]
    fn add_args_reject_bad_input() {
        let mut args = add_args("Gym");
        args.start = Some("01/04/2024".into());
        assert!(new_habit_from_args(&args, d("2024-05-01")).is_err());

        let mut args = add_args("Gym");
        args.weekly = Some(vec!["funday".into()]);
        assert!(new_habit_from_args(&args, d("2024-05-01")).is_err());
    }

    #[test]
    fn edit_args_map_to_patch() {
        let changes = EditArgs {
            clear_description: true,
            no_count: true,
            reminder: Some("06:45".into()),
            ..Default::default()
        };
        let patch = patch_from_args(&changes).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.track_count, Some(false));
        assert_eq!(patch.count_goal, Some(None));
        assert_eq!(patch.reminder_time, Some(Some(parse_reminder("06:45").unwrap())));
        assert!(patch_from_args(&EditArgs::default()).unwrap().is_empty());
    }

    #[test]
    fn config_changes_are_validated() {
        let mut config = AppConfig::default();
        assert!(!apply_config_changes(&mut config, None, None, None).unwrap());
        assert!(apply_config_changes(&mut config, Some("30d"), Some(false), None).unwrap());
        assert_eq!(config.display.chart_range, "30days");
        assert!(!config.display.color);
        assert!(apply_config_changes(&mut config, Some("decade"), None, None).is_err());
    }

    #[test]
    fn dashboard_is_recomputed_after_each_toggle() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        let today = d("2024-01-03");
        let habit = HabitRepo::create(&conn, NewHabit::daily("Run", d("2024-01-01"))).unwrap();

        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            CompletionRepo::toggle(&conn, &habit.id, d(day), None).unwrap();
        }
        let dash = load_dashboard(&conn, today).unwrap();
        assert_eq!(dash.habits[0].current_streak, 3);
        assert_eq!(dash.global.total_complete_days, 3);

        CompletionRepo::toggle(&conn, &habit.id, d("2024-01-02"), None).unwrap();
        let dash = load_dashboard(&conn, today).unwrap();
        assert_eq!(dash.habits[0].current_streak, 1);
        assert_eq!(dash.habits[0].longest_streak, 1);
        assert_eq!(dash.global.total_complete_days, 2);
    }
}
