use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

use habitual::db::migrations::run_migrations;
use habitual::db::repository::{CompletionRepo, HabitRepo};
use habitual::models::{Badge, NewHabit, Streak, ToggleOutcome};
use habitual::stats::{compute_streak, decorate_habits, evaluate_achievements};
use habitual::utils::dates::{each_day, parse_iso_date};

fn d(s: &str) -> NaiveDate {
    parse_iso_date(s).unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}

fn mark(conn: &Connection, habit_id: &str, from: &str, to: &str) {
    for day in each_day(d(from), d(to)) {
        let outcome = CompletionRepo::toggle(conn, habit_id, day, None).unwrap();
        assert_eq!(outcome, ToggleOutcome::Inserted);
    }
}

fn snapshot(conn: &Connection, today: NaiveDate) -> habitual::Dashboard {
    let habits = HabitRepo::list(conn).unwrap();
    let completions = CompletionRepo::list(conn).unwrap();
    decorate_habits(&habits, &completions, today)
}

#[test]
fn consecutive_days_then_gap() {
    let conn = setup();
    let habit = HabitRepo::create(&conn, NewHabit::daily("Read", d("2024-01-01"))).unwrap();
    mark(&conn, &habit.id, "2024-01-01", "2024-01-03");

    let on_day = snapshot(&conn, d("2024-01-03"));
    assert_eq!(on_day.habits[0].current_streak, 3);
    assert_eq!(on_day.habits[0].longest_streak, 3);
    assert!(on_day.habits[0].completed_today);

    let after_gap = snapshot(&conn, d("2024-01-05"));
    assert_eq!(after_gap.habits[0].current_streak, 0);
    assert_eq!(after_gap.habits[0].longest_streak, 3);
    assert!(!after_gap.habits[0].completed_today);
}

#[test]
fn habits_started_later_do_not_block_earlier_perfect_days() {
    let conn = setup();
    let x = HabitRepo::create(&conn, NewHabit::daily("X", d("2024-01-01"))).unwrap();
    let y = HabitRepo::create(&conn, NewHabit::daily("Y", d("2024-01-03"))).unwrap();
    mark(&conn, &x.id, "2024-01-01", "2024-01-05");
    mark(&conn, &y.id, "2024-01-03", "2024-01-05");

    let dash = snapshot(&conn, d("2024-01-05"));
    // only X existed on the 1st and 2nd, and X was done
    assert_eq!(dash.global.total_complete_days, 5);
    assert_eq!(dash.global.global_current_streak, 5);

    // a day where Y existed but was skipped is not perfect
    CompletionRepo::toggle(&conn, &y.id, d("2024-01-04"), None).unwrap();
    let dash = snapshot(&conn, d("2024-01-05"));
    assert_eq!(dash.global.total_complete_days, 4);
    assert_eq!(dash.global.global_current_streak, 1);
    assert_eq!(dash.global.global_longest_streak, 3);
}

#[test]
fn completion_rate_over_ten_days() {
    let conn = setup();
    let today = d("2024-03-10");
    let start = today - Duration::days(9);
    let habit = HabitRepo::create(&conn, NewHabit::daily("Walk", start)).unwrap();
    for offset in [0, 1, 4, 6, 9] {
        CompletionRepo::toggle(&conn, &habit.id, start + Duration::days(offset), None).unwrap();
    }
    assert_eq!(snapshot(&conn, today).habits[0].completion_rate, 50);
}

#[test]
fn week_warrior_survives_broken_current_streak() {
    let conn = setup();
    let habit = HabitRepo::create(&conn, NewHabit::daily("Code", d("2024-01-01"))).unwrap();
    mark(&conn, &habit.id, "2024-01-01", "2024-01-07");

    let dash = snapshot(&conn, d("2024-01-20"));
    assert_eq!(dash.global.global_longest_streak, 7);
    assert_eq!(dash.global.global_current_streak, 0);

    let achievements = evaluate_achievements(&dash.habits, &dash.global);
    let week = achievements.iter().find(|a| a.badge == Badge::WeekWarrior).unwrap();
    assert!(week.unlocked);
    let fortnight = achievements.iter().find(|a| a.badge == Badge::FortnightForce).unwrap();
    assert!(!fortnight.unlocked);
}

#[test]
fn toggle_round_trip_and_repeatable_pipeline() {
    let conn = setup();
    let habit = HabitRepo::create(&conn, NewHabit::daily("Floss", d("2024-01-01"))).unwrap();
    mark(&conn, &habit.id, "2024-01-01", "2024-01-02");
    let today = d("2024-01-02");

    let before = snapshot(&conn, today);
    assert_eq!(before, snapshot(&conn, today));

    CompletionRepo::toggle(&conn, &habit.id, d("2024-01-02"), None).unwrap();
    CompletionRepo::toggle(&conn, &habit.id, d("2024-01-02"), None).unwrap();

    let after = snapshot(&conn, today);
    assert_eq!(before.global, after.global);
    assert_eq!(before.habits[0].current_streak, after.habits[0].current_streak);
    assert_eq!(before.habits[0].completions.len(), after.habits[0].completions.len());
}

#[test]
fn streak_primitive_on_empty_set() {
    let empty = std::collections::BTreeSet::new();
    assert_eq!(compute_streak(&empty, d("2024-01-01")), Streak { current: 0, longest: 0 });
}
