use serde::{Deserialize, Serialize};

/// The fixed badge set, in display order. Icons are the renderer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    FirstStep,
    HabitCollector,
    PerfectDay,
    StreakStarter,
    WeekWarrior,
    FortnightForce,
    MonthlyMaster,
    Committed,
    Centurion,
    Legendary,
}

/// Which counter a badge is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Unlocks at `threshold` habits; progress shown against the same count.
    HabitCount { threshold: u32, tracked: bool },
    /// Unlocks on any perfect day ever, or when every habit is done today.
    AnyPerfectDay,
    /// Unlocks on the longest global streak; progress follows the current one.
    GlobalStreak { threshold: u32 },
    /// Unlocks and progresses on the total number of perfect days.
    CompleteDays { threshold: u32 },
}

impl Badge {
    pub const ALL: [Badge; 10] = [
        Badge::FirstStep,
        Badge::HabitCollector,
        Badge::PerfectDay,
        Badge::StreakStarter,
        Badge::WeekWarrior,
        Badge::FortnightForce,
        Badge::MonthlyMaster,
        Badge::Committed,
        Badge::Centurion,
        Badge::Legendary,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstStep => "first-habit",
            Badge::HabitCollector => "habit-collector",
            Badge::PerfectDay => "perfect-day",
            Badge::StreakStarter => "streak-starter",
            Badge::WeekWarrior => "week-warrior",
            Badge::FortnightForce => "fortnight-force",
            Badge::MonthlyMaster => "monthly-master",
            Badge::Committed => "committed",
            Badge::Centurion => "centurion",
            Badge::Legendary => "legendary",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::FirstStep => "First Step",
            Badge::HabitCollector => "Habit Collector",
            Badge::PerfectDay => "Perfect Day",
            Badge::StreakStarter => "Streak Starter",
            Badge::WeekWarrior => "Week Warrior",
            Badge::FortnightForce => "Fortnight Force",
            Badge::MonthlyMaster => "Monthly Master",
            Badge::Committed => "Committed",
            Badge::Centurion => "Centurion",
            Badge::Legendary => "Legendary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::FirstStep => "Create your first habit",
            Badge::HabitCollector => "Create 5 habits",
            Badge::PerfectDay => "Complete all habits in a day",
            Badge::StreakStarter => "Achieve a 3-day streak",
            Badge::WeekWarrior => "Complete a 7-day streak",
            Badge::FortnightForce => "Complete a 14-day streak",
            Badge::MonthlyMaster => "Complete a 30-day streak",
            Badge::Committed => "Complete 50 perfect days total",
            Badge::Centurion => "Complete a 100-day streak",
            Badge::Legendary => "Complete a 365-day streak",
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Badge::FirstStep => Rule::HabitCount { threshold: 1, tracked: false },
            Badge::HabitCollector => Rule::HabitCount { threshold: 5, tracked: true },
            Badge::PerfectDay => Rule::AnyPerfectDay,
            Badge::StreakStarter => Rule::GlobalStreak { threshold: 3 },
            Badge::WeekWarrior => Rule::GlobalStreak { threshold: 7 },
            Badge::FortnightForce => Rule::GlobalStreak { threshold: 14 },
            Badge::MonthlyMaster => Rule::GlobalStreak { threshold: 30 },
            Badge::Committed => Rule::CompleteDays { threshold: 50 },
            Badge::Centurion => Rule::GlobalStreak { threshold: 100 },
            Badge::Legendary => Rule::GlobalStreak { threshold: 365 },
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub value: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub badge: Badge,
    pub unlocked: bool,
    pub progress: Option<Progress>,
}
