//! Recurrence rules for scheduled tasks

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// A set of weekday indices, following the service's convention (Sunday = 0)
    pub struct Weekdays: u8 {
        const SUNDAY    = 1;
        const MONDAY    = 1 << 1;
        const TUESDAY   = 1 << 2;
        const WEDNESDAY = 1 << 3;
        const THURSDAY  = 1 << 4;
        const FRIDAY    = 1 << 5;
        const SATURDAY  = 1 << 6;
    }
}

impl Weekdays {
    /// The whole week. This is what daily tasks are expected to store, so that
    /// rendering code can treat daily and weekly tasks uniformly.
    pub fn every_day() -> Self {
        Self::all()
    }

    /// Build a set containing a single weekday index, or `None` when the index is out of the [0, 6] range
    pub fn from_index(day: u8) -> Option<Self> {
        if day > 6 {
            return None;
        }
        Self::from_bits(1u8 << day)
    }

    /// Tells whether this set contains the given weekday index.
    ///
    /// Out-of-range indices are simply not members of any set.
    pub fn contains_index(&self, day: u8) -> bool {
        match Self::from_index(day) {
            Some(flag) => self.contains(flag),
            None => false,
        }
    }

    /// Flip the membership of a weekday index. Out-of-range indices are ignored.
    pub fn toggle_index(&mut self, day: u8) {
        match Self::from_index(day) {
            Some(flag) => self.toggle(flag),
            None => log::warn!("Ignoring out-of-range weekday index {}", day),
        }
    }

    /// The sorted weekday indices this set contains. This is the wire representation.
    pub fn indices(&self) -> Vec<u8> {
        (0..=6).filter(|day| self.contains_index(*day)).collect()
    }
}

impl From<chrono::Weekday> for Weekdays {
    fn from(day: chrono::Weekday) -> Self {
        Weekdays::from_bits(1u8 << day.num_days_from_sunday())
            .unwrap(/* num_days_from_sunday is always in the 0..=6 range */)
    }
}

/// Used to support serde (the service exchanges weekday sets as arrays of integers)
impl Serialize for Weekdays {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.indices())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Weekdays {
    fn deserialize<D>(deserializer: D) -> Result<Weekdays, D::Error>
    where
        D: Deserializer<'de>,
    {
        let days = Vec::<u8>::deserialize(deserializer)?;
        let mut set = Weekdays::empty();
        for day in days {
            match Weekdays::from_index(day) {
                Some(flag) => set.insert(flag),
                None => {
                    return Err(serde::de::Error::custom(format!(
                        "weekday index out of range: {}",
                        day
                    )))
                }
            }
        }
        Ok(set)
    }
}

/// How often a task recurs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// Occurs every day
    Daily,
    /// Occurs on a fixed subset of weekdays
    Weekly,
}
