/// Month grid arithmetic for the calendar surface
use chrono::{Datelike, Months, NaiveDate, Weekday};

/// One month laid out as Sunday-first weeks. Days outside the month are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub first: NaiveDate,
    pub weeks: Vec<[Option<NaiveDate>; 7]>,
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift by whole months, clamping the day to the target month's length
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // only the last representable December has no successor
        None => 31,
    }
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Sun).first_day()
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Sun).last_day()
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn month_grid(month: NaiveDate) -> MonthGrid {
    let first = first_of_month(month);
    let lead = first.weekday().num_days_from_sunday() as usize;
    let total = days_in_month(first) as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week = [None; 7];
    let mut column = lead;
    for offset in 0..total {
        week[column] = first.checked_add_days(chrono::Days::new(offset as u64));
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column != 0 {
        weeks.push(week);
    }

    MonthGrid { first, weeks }
}

/// First day of every month shown when `months` months start at `shown`
pub fn visible_months(shown: NaiveDate, months: usize) -> Vec<NaiveDate> {
    let first = first_of_month(shown);
    (0..months.max(1))
        .map(|i| add_months(first, i as i32))
        .collect()
}

/// Whether `date` falls inside the visible window
pub fn is_visible(shown: NaiveDate, months: usize, date: NaiveDate) -> bool {
    let first = first_of_month(shown);
    let last = end_of_month(add_months(first, months.max(1) as i32 - 1));
    first <= date && date <= last
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_grid_leading_blanks() {
        // October 2026 starts on a Thursday
        let grid = month_grid(d(2026, 10, 16));
        assert_eq!(grid.first, d(2026, 10, 1));
        let blanks: [Option<NaiveDate>; 4] = [None; 4];
        assert_eq!(grid.weeks[0][..4], blanks);
        assert_eq!(grid.weeks[0][4], Some(d(2026, 10, 1)));
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[4][6], Some(d(2026, 10, 31)));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(d(2026, 1, 31), 1), d(2026, 2, 28));
        assert_eq!(add_months(d(2026, 3, 31), -1), d(2026, 2, 28));
        assert_eq!(add_months(d(2026, 12, 5), 1), d(2027, 1, 5));
    }

    #[test]
    fn test_week_bounds_start_sunday() {
        // 2026-10-16 is a Friday
        assert_eq!(start_of_week(d(2026, 10, 16)), d(2026, 10, 11));
        assert_eq!(end_of_week(d(2026, 10, 16)), d(2026, 10, 17));
    }

    #[test]
    fn test_visible_window() {
        assert_eq!(
            visible_months(d(2026, 11, 20), 2),
            vec![d(2026, 11, 1), d(2026, 12, 1)]
        );
        assert!(is_visible(d(2026, 11, 20), 2, d(2026, 12, 31)));
        assert!(!is_visible(d(2026, 11, 20), 2, d(2027, 1, 1)));
        assert!(!is_visible(d(2026, 11, 20), 2, d(2026, 10, 31)));
    }

    #[test]
    fn test_days_in_month_leap_year() {
        assert_eq!(days_in_month(d(2028, 2, 10)), 29);
        assert_eq!(days_in_month(d(2026, 2, 10)), 28);
    }

    #[test]
    fn test_last_representable_month() {
        assert_eq!(days_in_month(NaiveDate::MAX), 31);
        assert_eq!(end_of_month(NaiveDate::MAX), NaiveDate::MAX);
        let last_week = month_grid(NaiveDate::MAX).weeks.pop().unwrap();
        assert_eq!(last_week.iter().flatten().max(), Some(&NaiveDate::MAX));
    }
}
