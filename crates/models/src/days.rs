use chrono::Weekday;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

/// Represents the day of the week a session occurs
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DayOfWeek {
    #[strum(props(display = "Monday"))]
    Monday,
    #[strum(props(display = "Tuesday"))]
    Tuesday,
    #[strum(props(display = "Wednesday"))]
    Wednesday,
    #[strum(props(display = "Thursday"))]
    Thursday,
    #[strum(props(display = "Friday"))]
    Friday,
    #[strum(props(display = "Saturday"))]
    Saturday,
    #[strum(props(display = "Sunday"))]
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Human-readable name, e.g. "Monday"
    pub fn display_name(&self) -> &'static str {
        self.get_str("display").unwrap_or_default()
    }

    /// ISO weekday number (Monday = 1, Sunday = 7), used as the storage encoding
    pub fn number_from_monday(self) -> i16 {
        self as i16 + 1
    }

    pub fn from_number(number: i16) -> Option<Self> {
        Self::iter().find(|day| day.number_from_monday() == number)
    }

    pub fn all() -> Vec<DayOfWeek> {
        DayOfWeek::iter().collect()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_day_from_str() {
        assert_eq!(DayOfWeek::from_str("monday").unwrap(), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_str("Friday").unwrap(), DayOfWeek::Friday);
        assert_eq!(DayOfWeek::from_str("SUNDAY").unwrap(), DayOfWeek::Sunday);
        assert!(DayOfWeek::from_str("funday").is_err());
    }

    #[test]
    fn test_day_display() {
        assert_eq!(DayOfWeek::Wednesday.to_string(), "Wednesday");
        assert_eq!(DayOfWeek::Wednesday.as_str(), "wednesday");
    }

    #[test]
    fn test_day_numbering() {
        assert_eq!(DayOfWeek::Monday.number_from_monday(), 1);
        assert_eq!(DayOfWeek::Sunday.number_from_monday(), 7);

        for day in DayOfWeek::all() {
            assert_eq!(DayOfWeek::from_number(day.number_from_monday()), Some(day));
        }

        assert_eq!(DayOfWeek::from_number(0), None);
        assert_eq!(DayOfWeek::from_number(8), None);
    }

    #[test]
    fn test_day_from_weekday() {
        // 2025-09-01 was a Monday
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(DayOfWeek::from(chrono::Datelike::weekday(&date)), DayOfWeek::Monday);
    }
}
