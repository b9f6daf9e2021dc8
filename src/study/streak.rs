//! Derived study statistics. Nothing here is stored; everything is computed
//! from the append-only history on each read.

use chrono::{Duration, Local, NaiveDate};

use crate::store::operations::history::HistoryEntry;
use crate::store::Store;

/// Consecutive study days counted backward from the most recent studied
/// date. Zero unless that date is `today` or yesterday; counting stops at
/// the first missing day.
pub fn current_streak(history: &[HistoryEntry], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = history
        .iter()
        .filter_map(|h| NaiveDate::parse_from_str(&h.date, "%Y-%m-%d").ok())
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    let Some(&most_recent) = dates.first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 0;
    let mut expected = most_recent;
    for date in dates {
        if date == expected {
            streak += 1;
            expected -= Duration::days(1);
        } else if date < expected {
            break;
        }
    }
    streak
}

/// Sum of study counts recorded on `today`.
pub fn studied_on(history: &[HistoryEntry], day: NaiveDate) -> u32 {
    let key = day.format("%Y-%m-%d").to_string();
    history
        .iter()
        .filter(|h| h.date == key)
        .map(|h| h.count)
        .sum()
}

/// Per-day study counts for the trailing `days` calendar days ending at
/// `today`, oldest first. Feeds the weekly activity chart.
pub fn daily_totals(history: &[HistoryEntry], today: NaiveDate, days: u32) -> Vec<(NaiveDate, u32)> {
    (0..days)
        .rev()
        .map(|back| {
            let day = today - Duration::days(i64::from(back));
            (day, studied_on(history, day))
        })
        .collect()
}

impl Store {
    pub fn current_streak(&self) -> u32 {
        current_streak(&self.history(), Local::now().date_naive())
    }

    pub fn studied_today(&self) -> u32 {
        studied_on(&self.history(), Local::now().date_naive())
    }

    pub fn weekly_activity(&self) -> Vec<(NaiveDate, u32)> {
        daily_totals(&self.history(), Local::now().date_naive(), 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: NaiveDate, count: u32) -> HistoryEntry {
        HistoryEntry {
            date: date.format("%Y-%m-%d").to_string(),
            count,
            deck_id: "d1".to_string(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_consecutive_days_make_a_streak_of_three() {
        let today = day(2026, 8, 23);
        let history = vec![
            entry(today, 1),
            entry(today - Duration::days(1), 1),
            entry(today - Duration::days(2), 1),
        ];
        assert_eq!(current_streak(&history, today), 3);
    }

    #[test]
    fn gap_ends_the_streak() {
        let today = day(2026, 8, 23);
        let history = vec![entry(today, 1), entry(today - Duration::days(3), 1)];
        assert_eq!(current_streak(&history, today), 1);
    }

    #[test]
    fn stale_history_means_no_streak() {
        let today = day(2026, 8, 23);
        let history = vec![
            entry(today - Duration::days(2), 1),
            entry(today - Duration::days(3), 1),
        ];
        assert_eq!(current_streak(&history, today), 0);
    }

    #[test]
    fn streak_may_start_yesterday() {
        let today = day(2026, 8, 23);
        let history = vec![
            entry(today - Duration::days(1), 1),
            entry(today - Duration::days(2), 1),
        ];
        assert_eq!(current_streak(&history, today), 2);
    }

    #[test]
    fn duplicate_dates_count_once() {
        let today = day(2026, 8, 23);
        let history = vec![entry(today, 1), entry(today, 5), entry(today, 2)];
        assert_eq!(current_streak(&history, today), 1);
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&[], day(2026, 8, 23)), 0);
    }

    #[test]
    fn unparseable_dates_are_ignored() {
        let today = day(2026, 8, 23);
        let mut history = vec![entry(today, 1)];
        history.push(HistoryEntry {
            date: "not-a-date".to_string(),
            count: 9,
            deck_id: "d1".to_string(),
        });
        assert_eq!(current_streak(&history, today), 1);
    }

    #[test]
    fn studied_on_sums_counts_for_the_day() {
        let today = day(2026, 8, 23);
        let history = vec![
            entry(today, 2),
            entry(today, 3),
            entry(today - Duration::days(1), 7),
        ];
        assert_eq!(studied_on(&history, today), 5);
    }

    #[test]
    fn daily_totals_cover_the_trailing_window_oldest_first() {
        let today = day(2026, 8, 23);
        let history = vec![entry(today, 4), entry(today - Duration::days(6), 1)];

        let totals = daily_totals(&history, today, 7);
        assert_eq!(totals.len(), 7);
        assert_eq!(totals[0], (today - Duration::days(6), 1));
        assert_eq!(totals[6], (today, 4));
        assert!(totals[1..6].iter().all(|(_, c)| *c == 0));
    }
}
