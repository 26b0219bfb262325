use chrono::{Datelike, Duration, NaiveDate, Weekday};

use timetree_core::store::NodeKey;

/// Quarter identity for a date, with rollover arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarQuarter {
    quarter: i32,
    year: i32,
}

impl CalendarQuarter {
    /// Quarter containing `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            quarter: ((date.month() as i32 - 1) / 3) + 1,
            year: date.year(),
        }
    }

    fn from_parts(mut quarter: i32, mut year: i32) -> Self {
        while quarter < 1 {
            year -= 1;
            quarter += 4;
        }
        while quarter > 4 {
            year += 1;
            quarter -= 4;
        }
        Self { quarter, year }
    }

    pub fn quarter(&self) -> i32 {
        self.quarter
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The quarter immediately before this one, rolling the year when
    /// leaving Q1.
    pub fn previous(&self) -> Self {
        Self::from_parts(self.quarter - 1, self.year)
    }

    /// The quarter immediately after this one, rolling the year when
    /// leaving Q4.
    pub fn next(&self) -> Self {
        Self::from_parts(self.quarter + 1, self.year)
    }

    /// Store key for this quarter.
    pub fn key(&self) -> NodeKey {
        NodeKey::new(vec![("quarter", self.quarter), ("year", self.year)])
    }
}

/// Week identity for a date, numbered from the year's first occurrence of
/// the configured weekday.
///
/// Dates that fall before their year's anchor (early January) are numbered
/// against the previous year's anchor while keeping their own year in the
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWeek {
    date: NaiveDate,
    first_day: Weekday,
    week_number: i32,
}

impl CalendarWeek {
    /// Week containing `date`.
    pub fn new(date: NaiveDate, first_day: Weekday) -> Self {
        Self {
            date,
            first_day,
            week_number: week_number_for(date, first_day),
        }
    }

    pub fn week_number(&self) -> i32 {
        self.week_number
    }

    /// Year component of the week's key: always the date's own year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The week seven days earlier.
    pub fn previous(&self) -> Self {
        Self::new(self.date - Duration::days(7), self.first_day)
    }

    /// The week seven days later.
    pub fn next(&self) -> Self {
        Self::new(self.date + Duration::days(7), self.first_day)
    }

    /// Store key for this week.
    pub fn key(&self) -> NodeKey {
        NodeKey::new(vec![("week", self.week_number), ("year", self.year())])
    }
}

/// First date in `year` falling on `first_day`; at most six steps from
/// January 1st.
fn anchor_for(year: i32, first_day: Weekday) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid calendar date");
    while date.weekday() != first_day {
        date += Duration::days(1);
    }
    date
}

fn week_number_for(date: NaiveDate, first_day: Weekday) -> i32 {
    let mut diff = (date - anchor_for(date.year(), first_day)).num_days();
    if diff < 0 {
        diff = (date - anchor_for(date.year() - 1, first_day)).num_days();
    }
    (diff / 7) as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test_case(1, 1; "january")]
    #[test_case(2, 1; "february")]
    #[test_case(3, 1; "march")]
    #[test_case(4, 2; "april")]
    #[test_case(5, 2; "may")]
    #[test_case(6, 2; "june")]
    #[test_case(7, 3; "july")]
    #[test_case(8, 3; "august")]
    #[test_case(9, 3; "september")]
    #[test_case(10, 4; "october")]
    #[test_case(11, 4; "november")]
    #[test_case(12, 4; "december")]
    fn months_map_to_quarters(month: u32, expected: i32) {
        let quarter = CalendarQuarter::new(date(2024, month, 15));
        assert_eq!(quarter.quarter(), expected);
        assert_eq!(quarter.year(), 2024);
    }

    #[test]
    fn previous_rolls_into_prior_year() {
        let q1 = CalendarQuarter::new(date(2024, 2, 1));
        let previous = q1.previous();
        assert_eq!(previous.quarter(), 4);
        assert_eq!(previous.year(), 2023);
    }

    #[test]
    fn next_rolls_into_following_year() {
        let q4 = CalendarQuarter::new(date(2024, 11, 30));
        let next = q4.next();
        assert_eq!(next.quarter(), 1);
        assert_eq!(next.year(), 2025);
    }

    #[test]
    fn anchor_date_is_week_one() {
        // First Sunday of 2024 is January 7th.
        let week = CalendarWeek::new(date(2024, 1, 7), Weekday::Sun);
        assert_eq!(week.week_number(), 1);
    }

    #[test]
    fn days_within_a_week_share_the_number() {
        for day in 7..14 {
            let week = CalendarWeek::new(date(2024, 1, day), Weekday::Sun);
            assert_eq!(week.week_number(), 1, "january {day}");
        }
        let week = CalendarWeek::new(date(2024, 1, 14), Weekday::Sun);
        assert_eq!(week.week_number(), 2);
    }

    #[test]
    fn mid_january_lands_in_week_two() {
        let week = CalendarWeek::new(date(2024, 1, 15), Weekday::Sun);
        assert_eq!(week.week_number(), 2);
        assert_eq!(week.year(), 2024);
    }

    #[test]
    fn early_january_numbers_against_previous_year_anchor() {
        // 2024-01-03 precedes the first Sunday of 2024; the number continues
        // the 2023 sequence (anchored on 2023-01-01) but the year stays 2024.
        let week = CalendarWeek::new(date(2024, 1, 3), Weekday::Sun);
        assert_eq!(week.week_number(), 53);
        assert_eq!(week.year(), 2024);
    }

    #[test]
    fn previous_and_next_shift_by_seven_days() {
        let week = CalendarWeek::new(date(2024, 1, 15), Weekday::Sun);
        assert_eq!(week.previous().week_number(), 1);
        assert_eq!(week.next().week_number(), 3);
    }

    #[test]
    fn monday_weeks_use_their_own_anchor() {
        // First Monday of 2024 is January 1st itself.
        let week = CalendarWeek::new(date(2024, 1, 1), Weekday::Mon);
        assert_eq!(week.week_number(), 1);
        let week = CalendarWeek::new(date(2024, 1, 8), Weekday::Mon);
        assert_eq!(week.week_number(), 2);
    }
}
