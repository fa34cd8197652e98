//! Shared domain types.
//!
//! Categorical codes from the source file are mapped onto closed enums here so
//! the rest of the crate never matches on raw integers.

use chrono::NaiveDate;
use clap::ValueEnum;

/// Season code (`season` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map a raw code (1-4) to a season. Anything else is unknown.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Season::Spring => "🌸",
            Season::Summer => "☀️",
            Season::Fall => "🍂",
            Season::Winter => "❄️",
        }
    }

    /// Marker followed by label, e.g. `🌸 Spring`.
    pub fn display(self) -> String {
        format!("{} {}", self.marker(), self.label())
    }
}

/// Weather situation code (`weathersit` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    /// Clear, few clouds, partly cloudy.
    Clear,
    /// Mist + cloudy, mist + broken clouds.
    Mist,
    /// Light snow, light rain + thunderstorm.
    Snow,
    /// Heavy rain + ice pellets + thunderstorm.
    Rain,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Clear, Weather::Mist, Weather::Snow, Weather::Rain];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Weather::Clear),
            2 => Some(Weather::Mist),
            3 => Some(Weather::Snow),
            4 => Some(Weather::Rain),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Mist => "Mist",
            Weather::Snow => "Snow",
            Weather::Rain => "Rain",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Weather::Clear => "☀️",
            Weather::Mist => "🌥️",
            Weather::Snow => "❄️",
            Weather::Rain => "⛈️",
        }
    }

    pub fn display(self) -> String {
        format!("{} {}", self.marker(), self.label())
    }
}

/// Weekday vs weekend classification of the `weekday` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Indexes 5 and 6 are the weekend; anything at or above 5 is treated the same way.
    pub fn from_weekday(weekday: i64) -> Self {
        if weekday >= 5 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

/// Grouping axis for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Month,
    Season,
    Weather,
    DayType,
}

/// The analysis the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisMode {
    Monthly,
    Seasonal,
    Weather,
    DayType,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 4] = [
        AnalysisMode::Monthly,
        AnalysisMode::Seasonal,
        AnalysisMode::Weather,
        AnalysisMode::DayType,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            AnalysisMode::Monthly => Dimension::Month,
            AnalysisMode::Seasonal => Dimension::Season,
            AnalysisMode::Weather => Dimension::Weather,
            AnalysisMode::DayType => Dimension::DayType,
        }
    }

    /// Name shown in the mode selector.
    pub fn display_name(self) -> &'static str {
        match self {
            AnalysisMode::Monthly => "Monthly Trend Analysis",
            AnalysisMode::Seasonal => "Seasonal Analysis",
            AnalysisMode::Weather => "Weather Analysis",
            AnalysisMode::DayType => "Weekday vs Weekend",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            AnalysisMode::Monthly => "📅 Monthly Bike Rental Trend 📅",
            AnalysisMode::Seasonal => "🌸 Seasonal Analysis 🌸",
            AnalysisMode::Weather => "🌦️ Weather Analysis 🌦️",
            AnalysisMode::DayType => "📅 Weekday vs Weekend 📅",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnalysisMode::Monthly => "Trend of bike rentals across the months of the selected range.",
            AnalysisMode::Seasonal => "Analyze total bike rentals by season.",
            AnalysisMode::Weather => "Explore how weather conditions affect bike rentals.",
            AnalysisMode::DayType => "Compare bike rentals on weekdays and weekends.",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnalysisMode::Monthly => AnalysisMode::Seasonal,
            AnalysisMode::Seasonal => AnalysisMode::Weather,
            AnalysisMode::Weather => AnalysisMode::DayType,
            AnalysisMode::DayType => AnalysisMode::Monthly,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AnalysisMode::Monthly => AnalysisMode::DayType,
            AnalysisMode::Seasonal => AnalysisMode::Monthly,
            AnalysisMode::Weather => AnalysisMode::Seasonal,
            AnalysisMode::DayType => AnalysisMode::Weather,
        }
    }

    pub fn index(self) -> usize {
        match self {
            AnalysisMode::Monthly => 0,
            AnalysisMode::Seasonal => 1,
            AnalysisMode::Weather => 2,
            AnalysisMode::DayType => 3,
        }
    }
}

/// Inclusive date interval `[start, end]`.
///
/// An inverted range (`start > end`) is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}
