pub mod achievement;
pub mod completion;
pub mod habit;
pub mod stats;

pub use achievement::{Achievement, Badge, Progress};
pub use completion::{Completion, ToggleOutcome};
pub use habit::{Frequency, Habit, HabitPatch, NewHabit};
pub use stats::{Dashboard, GlobalStats, HabitWithStats, Streak};
