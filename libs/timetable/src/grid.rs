//! The fixed weekly grid shared by every class.

use serde::{Deserialize, Serialize};

/// Teaching days, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All teaching days, Monday first.
pub const DAYS: [Day; 5] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
];

/// Time labels for the six daily periods.
pub const PERIOD_LABELS: [&str; 6] = [
    "9:00-10:00",
    "10:00-11:00",
    "11:15-12:15",
    "12:15-1:15",
    "2:00-3:00",
    "3:00-4:00",
];

/// Number of periods per day.
pub const PERIODS_PER_DAY: usize = PERIOD_LABELS.len();

/// First room number; period `i` is held in room `FIRST_ROOM + i`.
const FIRST_ROOM: usize = 101;

/// Room for a period. Rooms are derived, never conflict-checked.
pub fn room_for(period: usize) -> String {
    format!("Room {}", FIRST_ROOM + period)
}

/// A (day, period) coordinate in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub period: usize,
    pub time: String,
}

impl Slot {
    /// Builds the slot for `period` on `day`.
    ///
    /// Returns `None` when `period` is outside the grid.
    pub fn new(day: Day, period: usize) -> Option<Self> {
        let time = PERIOD_LABELS.get(period)?;
        Some(Self {
            day,
            period,
            time: (*time).to_string(),
        })
    }

    /// Every slot in the week, in generation order.
    pub fn week() -> impl Iterator<Item = Slot> {
        DAYS.into_iter().flat_map(|day| {
            PERIOD_LABELS
                .iter()
                .enumerate()
                .map(move |(period, time)| Slot {
                    day,
                    period,
                    time: (*time).to_string(),
                })
        })
    }
}
