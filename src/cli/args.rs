use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "habitual", version, author, about = "Track daily and weekly habits, streaks and perfect days")]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new habit
    Add(HabitArgs),
    /// Change an existing habit
    Edit {
        /// Habit name or id
        habit: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete a habit and all of its completions
    Remove {
        /// Habit name or id
        habit: String,
    },
    /// List habits with their streaks and completion rates
    List,
    /// Mark a habit done for a day, or unmark it if already done
    Toggle {
        /// Habit name or id
        habit: String,
        /// Day to toggle (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Count to record, for habits that track counts
        #[arg(long)]
        count: Option<u32>,
    },
    /// Show completion statistics
    Stats {
        /// 7days, 30days, thisWeek or thisMonth (default from config)
        #[arg(long)]
        range: Option<String>,
    },
    /// Show a month calendar for one habit
    Calendar {
        /// Habit name or id
        habit: String,
        /// Month to show (YYYY-MM, default current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show achievement badges
    Achievements,
    /// Export habits and statistics as JSON to stdout
    Export,
    /// Show or change settings
    Config {
        /// Default range for `stats`
        #[arg(long)]
        chart_range: Option<String>,
        /// Enable or disable colored output
        #[arg(long)]
        color: Option<bool>,
        /// Show the achievements line on the dashboard
        #[arg(long)]
        show_achievements: Option<bool>,
    },
}

#[derive(Args, Debug)]
pub struct HabitArgs {
    /// Habit name
    pub name: String,
    /// Optional longer description
    #[arg(long, short)]
    pub description: Option<String>,
    /// Days for a weekly habit, e.g. "mon,wed,fri" or "1,3,5" (0 = Sunday)
    #[arg(long, value_delimiter = ',')]
    pub weekly: Option<Vec<String>>,
    /// First day of the habit (YYYY-MM-DD, default today)
    #[arg(long)]
    pub start: Option<String>,
    /// Reminder time (HH:MM)
    #[arg(long)]
    pub reminder: Option<String>,
    /// Track a count each day (e.g. glasses of water)
    #[arg(long)]
    pub track_count: bool,
    /// Daily count goal; implies --track-count
    #[arg(long)]
    pub goal: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New description
    #[arg(long, short, conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,
    /// Switch to daily
    #[arg(long, conflicts_with = "weekly")]
    pub daily: bool,
    /// Switch to weekly on these days
    #[arg(long, value_delimiter = ',')]
    pub weekly: Option<Vec<String>>,
    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// New reminder time (HH:MM)
    #[arg(long, conflicts_with = "clear_reminder")]
    pub reminder: Option<String>,
    /// Remove the reminder
    #[arg(long)]
    pub clear_reminder: bool,
    /// Start tracking counts
    #[arg(long, conflicts_with = "no_count")]
    pub track_count: bool,
    /// Stop tracking counts
    #[arg(long)]
    pub no_count: bool,
    /// New daily count goal; implies --track-count
    #[arg(long, conflicts_with = "no_count")]
    pub goal: Option<u32>,
}
