//! Picks the page background class from the condition code and whether the
//! sun is up.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use chrono::{NaiveTime, Timelike};

use crate::{convert::clock_value, model::WeatherSnapshot};

/// Provider condition code, e.g. `9` for drizzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionCode(pub u8);

impl FromStr for ConditionCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ConditionCode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Storms,
    WinteryPrecip,
    Rain,
    Snow,
    Dust,
    Fog,
    Wind,
    Cold,
    Clouds,
    Clear,
    Hot,
    Unknown,
}

/// Provider condition codes 0..=47 grouped by background theme.
const BUCKETS: &[(ConditionCategory, &[u8])] = &[
    (ConditionCategory::Storms, &[0, 1, 2, 3, 4, 37, 38, 39, 40, 45, 47]),
    (ConditionCategory::WinteryPrecip, &[5, 6, 7, 8, 10, 17, 18, 35]),
    (ConditionCategory::Rain, &[9, 11, 12]),
    (ConditionCategory::Snow, &[13, 14, 15, 16, 41, 42, 43, 46]),
    (ConditionCategory::Dust, &[19]),
    (ConditionCategory::Fog, &[20, 21, 22]),
    (ConditionCategory::Wind, &[23, 24]),
    (ConditionCategory::Cold, &[25]),
    (ConditionCategory::Clouds, &[26, 27, 28, 29, 30, 44]),
    (ConditionCategory::Clear, &[31, 32, 33, 34]),
    (ConditionCategory::Hot, &[36]),
];

static CATEGORY_BY_CODE: LazyLock<HashMap<u8, ConditionCategory>> = LazyLock::new(|| {
    BUCKETS
        .iter()
        .flat_map(|(category, codes)| codes.iter().map(move |code| (*code, *category)))
        .collect()
});

impl ConditionCategory {
    pub fn from_code(code: ConditionCode) -> Self {
        CATEGORY_BY_CODE.get(&code.0).copied().unwrap_or(Self::Unknown)
    }

    /// Lenient variant for the provider's string codes; anything that isn't a
    /// known small integer is `Unknown`.
    pub fn from_code_text(code: &str) -> Self {
        code.parse::<ConditionCode>().map_or(Self::Unknown, Self::from_code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storms => "Storms",
            Self::WinteryPrecip => "WinteryPrecip",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Dust => "Dust",
            Self::Fog => "Fog",
            Self::Wind => "Wind",
            Self::Cold => "Cold",
            Self::Clouds => "Clouds",
            Self::Clear => "Clear",
            Self::Hot => "Hot",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayPhase::Day => "day",
            DayPhase::Night => "night",
        }
    }
}

/// `Day` only while `now` is strictly between sunrise and sunset.
pub fn day_phase(now: NaiveTime, sunrise: &str, sunset: &str) -> DayPhase {
    let (rise, set) = match (clock_value(sunrise), clock_value(sunset)) {
        (Ok(rise), Ok(set)) => (rise, set),
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(%err, "sunrise/sunset unreadable, assuming night");
            return DayPhase::Night;
        }
    };

    let clock = now.hour() * 100 + now.minute();
    if clock > rise && clock < set { DayPhase::Day } else { DayPhase::Night }
}

/// A background class such as `dayRain` or `nightClouds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub phase: DayPhase,
    pub category: ConditionCategory,
}

impl Background {
    pub fn class_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.phase.as_str(), self.category.as_str())
    }
}

pub fn select_background(weather: &WeatherSnapshot, now: NaiveTime) -> Background {
    Background {
        phase: day_phase(now, &weather.astronomy.sunrise, &weather.astronomy.sunset),
        category: ConditionCategory::from_code_text(&weather.currently.code),
    }
}
