//! Month grid arithmetic for the calendar pane.

use chrono::{Datelike, Months, NaiveDate};

pub const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";

/// One row per week, Sunday first. `None` pads days outside the month.
pub type Week = [Option<u32>; 7];

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn month_grid(date: NaiveDate) -> Vec<Week> {
    let offset = first_of_month(date).weekday().num_days_from_sunday() as usize;
    let days = days_in_month(date);

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut column = offset;

    for day in 1..=days {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }

    weeks
}

/// Move by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2024, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2024, 12, 31)), 31);
        assert_eq!(days_in_month(ymd(2024, 4, 1)), 30);
    }

    #[test]
    fn test_month_grid_layout() {
        // September 2024 starts on a Sunday
        let grid = month_grid(ymd(2024, 9, 15));
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], Some(1));
        assert_eq!(grid[4][1], Some(30));
        assert_eq!(grid[4][2], None);

        // March 2024 starts on a Friday
        let grid = month_grid(ymd(2024, 3, 1));
        assert_eq!(grid[0][..5], [None; 5]);
        assert_eq!(grid[0][5], Some(1));
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_grid_covers_every_day_once() {
        let grid = month_grid(ymd(2024, 2, 1));
        let days: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn test_shift_months_clamps_day() {
        assert_eq!(shift_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 12, 5), 1), ymd(2025, 1, 5));
    }
}
