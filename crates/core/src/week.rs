// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weekly repeat pattern.
//!
//! A 7-bit mask over weekdays with Sunday in bit 0 and Saturday in bit 6.
//! The mask is also the persisted representation. Display order (which day
//! starts the week) never changes which days are set.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Weekdays in canonical bit order.
pub const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const ALL_DAYS: u8 = 0x7f;

/// A persisted mask carried bits outside the seven weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid weekday mask {0:#04x}: only the low 7 bits may be set")]
pub struct InvalidWeekBits(pub u8);

/// Set of weekdays on which a repeating alarm fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekPattern(u8);

impl WeekPattern {
    /// No days set; the alarm fires once.
    pub const NONE: Self = Self(0);
    /// Every day of the week.
    pub const EVERY_DAY: Self = Self(ALL_DAYS);

    /// Build a pattern from a list of days.
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut pattern = Self::NONE;
        for day in days {
            pattern.set(day, true);
        }
        pattern
    }

    /// Restore a pattern from its persisted mask.
    ///
    /// Returns `None` when bit 7 is set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits & !ALL_DAYS == 0).then_some(Self(bits))
    }

    /// The persisted mask.
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn set(&mut self, day: Weekday, on: bool) {
        let bit = bit_for(day);
        if on {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn is_set(&self, day: Weekday) -> bool {
        self.0 & bit_for(day) != 0
    }

    /// True when at least one day is set.
    pub fn is_repeating(&self) -> bool {
        self.0 != 0
    }

    pub fn clear_all(&mut self) {
        self.0 = 0;
    }

    /// Number of days set.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Set days, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        SUNDAY_FIRST.into_iter().filter(|day| self.is_set(*day))
    }

    /// Set days in display order for a week starting on `first_day`.
    pub fn iter_from(&self, first_day: Weekday) -> impl Iterator<Item = Weekday> + '_ {
        Self::days_in_order(first_day)
            .into_iter()
            .filter(|day| self.is_set(*day))
    }

    /// All seven weekdays in display order for a week starting on `first_day`.
    pub fn days_in_order(first_day: Weekday) -> [Weekday; 7] {
        let mut days = [first_day; 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }

    /// Days from `from` until the next set day, where 0 means `from` itself
    /// is set.
    ///
    /// Returns `None` when no day is set.
    pub fn next_matching_day_offset(&self, from: Weekday) -> Option<u32> {
        if !self.is_repeating() {
            return None;
        }
        let mut day = from;
        for offset in 0..7 {
            if self.is_set(day) {
                return Some(offset);
            }
            day = day.succ();
        }
        None
    }

    /// Short human summary: `"Every day"`, `"Never"`, or `"Mon, Wed, Fri"`.
    pub fn summary(&self, first_day: Weekday) -> String {
        match self.0 {
            0 => "Never".to_string(),
            ALL_DAYS => "Every day".to_string(),
            _ => self
                .iter_from(first_day)
                .map(|day| day.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn bit_for(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl TryFrom<u8> for WeekPattern {
    type Error = InvalidWeekBits;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(InvalidWeekBits(bits))
    }
}

impl From<WeekPattern> for u8 {
    fn from(pattern: WeekPattern) -> Self {
        pattern.bits()
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary(Weekday::Sun))
    }
}

#[cfg(test)]
#[path = "week_tests.rs"]
mod tests;
