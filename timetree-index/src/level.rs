use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use timetree_core::errors::{Result, TimeTreeError};
use timetree_core::store::NodeKey;

use crate::calendar::{CalendarQuarter, CalendarWeek};

/// One calendar granularity tier.
///
/// Declaration order is coarsest to finest; Quarter and Week are parallel
/// branches under Year rather than steps of a single chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Level {
    /// All levels, coarsest first.
    pub const ALL: [Level; 8] = [
        Level::Year,
        Level::Quarter,
        Level::Month,
        Level::Week,
        Level::Day,
        Level::Hour,
        Level::Minute,
        Level::Second,
    ];

    /// Node label used in the store.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Year => "Year",
            Level::Quarter => "Quarter",
            Level::Month => "Month",
            Level::Week => "Week",
            Level::Day => "Day",
            Level::Hour => "Hour",
            Level::Minute => "Minute",
            Level::Second => "Second",
        }
    }

    /// Composite key of the unit containing `local`.
    pub fn key(&self, local: NaiveDateTime, first_day: Weekday) -> NodeKey {
        match self {
            Level::Year => NodeKey::new(vec![("year", local.year())]),
            Level::Quarter => CalendarQuarter::new(local.date()).key(),
            Level::Month => NodeKey::new(vec![
                ("month", local.month() as i32),
                ("year", local.year()),
            ]),
            Level::Week => CalendarWeek::new(local.date(), first_day).key(),
            Level::Day => NodeKey::new(vec![
                ("day", local.day() as i32),
                ("month", local.month() as i32),
                ("year", local.year()),
            ]),
            Level::Hour => NodeKey::new(vec![
                ("hour", local.hour() as i32),
                ("day", local.day() as i32),
                ("month", local.month() as i32),
                ("year", local.year()),
            ]),
            Level::Minute => NodeKey::new(vec![
                ("minute", local.minute() as i32),
                ("hour", local.hour() as i32),
                ("day", local.day() as i32),
                ("month", local.month() as i32),
                ("year", local.year()),
            ]),
            Level::Second => NodeKey::new(vec![
                ("second", local.second() as i32),
                ("minute", local.minute() as i32),
                ("hour", local.hour() as i32),
                ("day", local.day() as i32),
                ("month", local.month() as i32),
                ("year", local.year()),
            ]),
        }
    }

    /// Key of the unit one step earlier at this level.
    pub fn previous_key(&self, local: NaiveDateTime, first_day: Weekday) -> NodeKey {
        self.step_key(local, first_day, -1)
    }

    /// Key of the unit one step later at this level.
    pub fn next_key(&self, local: NaiveDateTime, first_day: Weekday) -> NodeKey {
        self.step_key(local, first_day, 1)
    }

    fn step_key(&self, local: NaiveDateTime, first_day: Weekday, step: i64) -> NodeKey {
        match self {
            Level::Year => NodeKey::new(vec![("year", local.year() + step as i32)]),
            Level::Quarter => {
                let quarter = CalendarQuarter::new(local.date());
                if step < 0 {
                    quarter.previous().key()
                } else {
                    quarter.next().key()
                }
            }
            Level::Month => {
                let mut month = local.month() as i32 + step as i32;
                let mut year = local.year();
                while month < 1 {
                    month += 12;
                    year -= 1;
                }
                while month > 12 {
                    month -= 12;
                    year += 1;
                }
                NodeKey::new(vec![("month", month), ("year", year)])
            }
            Level::Week => {
                let week = CalendarWeek::new(local.date(), first_day);
                if step < 0 {
                    week.previous().key()
                } else {
                    week.next().key()
                }
            }
            Level::Day => self.key(local + Duration::days(step), first_day),
            Level::Hour => self.key(local + Duration::hours(step), first_day),
            Level::Minute => self.key(local + Duration::minutes(step), first_day),
            Level::Second => self.key(local + Duration::seconds(step), first_day),
        }
    }

    /// Containment fallback chains, nearest container first.
    ///
    /// Multi-entry chains walk the containment spine and skip disabled
    /// levels; single-entry chains are auxiliary calendar branches that
    /// disappear when their level is disabled.
    pub(crate) fn container_chains(&self) -> &'static [&'static [Level]] {
        match self {
            Level::Year => &[],
            Level::Quarter => &[&[Level::Year]],
            Level::Month => &[&[Level::Quarter], &[Level::Year]],
            Level::Week => &[&[Level::Quarter], &[Level::Year]],
            Level::Day => &[
                &[Level::Month, Level::Quarter, Level::Year],
                &[Level::Week],
            ],
            Level::Hour => &[&[Level::Day, Level::Month, Level::Quarter, Level::Year]],
            Level::Minute => &[&[
                Level::Hour,
                Level::Day,
                Level::Month,
                Level::Quarter,
                Level::Year,
            ]],
            Level::Second => &[&[
                Level::Minute,
                Level::Hour,
                Level::Day,
                Level::Month,
                Level::Quarter,
                Level::Year,
            ]],
        }
    }

    /// Containers this level actually links to under the given enabled set:
    /// the first enabled level of each chain, deduplicated.
    pub(crate) fn effective_containers(&self, enabled: &[Level]) -> Vec<Level> {
        let mut containers = Vec::new();
        for chain in self.container_chains() {
            if let Some(parent) = chain.iter().find(|level| enabled.contains(level)) {
                if !containers.contains(parent) {
                    containers.push(*parent);
                }
            }
        }
        containers
    }

    fn field_schema(&self) -> &'static [(&'static str, i32, i32)] {
        const YEAR: (&str, i32, i32) = ("year", i32::MIN, i32::MAX);
        const QUARTER: (&str, i32, i32) = ("quarter", 1, 4);
        const MONTH: (&str, i32, i32) = ("month", 1, 12);
        const WEEK: (&str, i32, i32) = ("week", 1, 54);
        const DAY: (&str, i32, i32) = ("day", 1, 31);
        const HOUR: (&str, i32, i32) = ("hour", 0, 23);
        const MINUTE: (&str, i32, i32) = ("minute", 0, 59);
        const SECOND: (&str, i32, i32) = ("second", 0, 59);

        match self {
            Level::Year => &[YEAR],
            Level::Quarter => &[QUARTER, YEAR],
            Level::Month => &[MONTH, YEAR],
            Level::Week => &[WEEK, YEAR],
            Level::Day => &[DAY, MONTH, YEAR],
            Level::Hour => &[HOUR, DAY, MONTH, YEAR],
            Level::Minute => &[MINUTE, HOUR, DAY, MONTH, YEAR],
            Level::Second => &[SECOND, MINUTE, HOUR, DAY, MONTH, YEAR],
        }
    }

    /// Checks a key against this level's field schema. Names, order and
    /// ranges must match exactly; a mismatch is a programming defect in the
    /// caller.
    pub fn validate_key(&self, key: &NodeKey) -> Result<()> {
        let schema = self.field_schema();
        if key.fields().len() != schema.len() {
            return Err(TimeTreeError::MalformedKey {
                label: self.label(),
                message: format!(
                    "expected {} fields, got {}",
                    schema.len(),
                    key.fields().len()
                ),
            });
        }
        for ((name, value), (expected, min, max)) in key.fields().iter().zip(schema) {
            if name != expected {
                return Err(TimeTreeError::MalformedKey {
                    label: self.label(),
                    message: format!("expected field {expected}, got {name}"),
                });
            }
            if value < min || value > max {
                return Err(TimeTreeError::MalformedKey {
                    label: self.label(),
                    message: format!("{name} {value} outside [{min}, {max}]"),
                });
            }
        }
        Ok(())
    }
}
