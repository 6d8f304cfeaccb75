//! Bookable entities: tours, guides, drivers, and the companies behind them

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::domain::provider::ResponseStats;

/// What a booking points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Tour,
    Guide,
    Driver,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tour => "TOUR",
            Self::Guide => "GUIDE",
            Self::Driver => "DRIVER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TOUR" => Some(Self::Tour),
            "GUIDE" => Some(Self::Guide),
            "DRIVER" => Some(Self::Driver),
            _ => None,
        }
    }

    /// Entity name used in not-found errors and fallback labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tour => "Tour",
            Self::Guide => "Guide",
            Self::Driver => "Driver",
        }
    }

    /// Public page path for deep links.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Tour => "tours",
            Self::Guide => "guides",
            Self::Driver => "drivers",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which calendar dates a tour can be booked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityType {
    #[default]
    Daily,
    Weekdays,
    Weekends,
    SpecificDates,
    ByRequest,
}

impl AvailabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekdays => "WEEKDAYS",
            Self::Weekends => "WEEKENDS",
            Self::SpecificDates => "SPECIFIC_DATES",
            Self::ByRequest => "BY_REQUEST",
        }
    }

    /// Unknown values fall back to `Daily`, the column default.
    pub fn from_str(s: &str) -> Self {
        match s {
            "WEEKDAYS" => Self::Weekdays,
            "WEEKENDS" => Self::Weekends,
            "SPECIFIC_DATES" => Self::SpecificDates,
            "BY_REQUEST" => Self::ByRequest,
            _ => Self::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub price: Decimal,
    pub currency: String,
    pub availability_type: AvailabilityType,
    /// JSON array of `YYYY-MM-DD` strings, read only for `SpecificDates`
    pub available_dates: Option<String>,
    /// `None` means unlimited capacity
    pub max_people: Option<i32>,
}

impl Tour {
    /// Parsed `available_dates`; malformed JSON yields no dates.
    pub fn specific_dates(&self) -> Vec<String> {
        self.available_dates
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
    }

    /// Whether `date` satisfies the tour's availability rule.
    pub fn accepts_date(&self, date: NaiveDate) -> bool {
        match self.availability_type {
            AvailabilityType::Daily | AvailabilityType::ByRequest => true,
            AvailabilityType::Weekdays => {
                !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            }
            AvailabilityType::Weekends => {
                matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            }
            AvailabilityType::SpecificDates => {
                let key = date.format("%Y-%m-%d").to_string();
                self.specific_dates().iter().any(|d| d == &key)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub id: String,
    pub user_id: String,
    pub photo: Option<String>,
    pub is_available: bool,
    pub price_per_day: Option<Decimal>,
    pub currency: String,
    pub stats: ResponseStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: String,
    pub user_id: String,
    pub photo: Option<String>,
    pub is_available: bool,
    pub stats: ResponseStats,
}

/// Tour operator company. Receives inquiries but is not bookable itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub logo: Option<String>,
    pub stats: ResponseStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(kind: AvailabilityType, dates: Option<&str>) -> Tour {
        Tour {
            id: "t1".into(),
            owner_id: "owner".into(),
            title: "Old Tbilisi walk".into(),
            image: None,
            is_active: true,
            price: Decimal::new(100, 0),
            currency: "GEL".into(),
            availability_type: kind,
            available_dates: dates.map(String::from),
            max_people: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekdays_reject_saturday() {
        let t = tour(AvailabilityType::Weekdays, None);
        // 2026-05-02 is a Saturday, 2026-05-06 a Wednesday
        assert!(!t.accepts_date(d(2026, 5, 2)));
        assert!(t.accepts_date(d(2026, 5, 6)));
    }

    #[test]
    fn weekends_reject_wednesday() {
        let t = tour(AvailabilityType::Weekends, None);
        assert!(!t.accepts_date(d(2026, 5, 6)));
        assert!(t.accepts_date(d(2026, 5, 3)));
    }

    #[test]
    fn specific_dates_match_exactly() {
        let t = tour(AvailabilityType::SpecificDates, Some(r#"["2026-05-01"]"#));
        assert!(t.accepts_date(d(2026, 5, 1)));
        assert!(!t.accepts_date(d(2026, 5, 2)));
    }

    #[test]
    fn malformed_dates_mean_no_dates() {
        let t = tour(AvailabilityType::SpecificDates, Some("not json"));
        assert!(t.specific_dates().is_empty());
        assert!(!t.accepts_date(d(2026, 5, 1)));
    }

    #[test]
    fn daily_and_by_request_accept_anything() {
        assert!(tour(AvailabilityType::Daily, None).accepts_date(d(2026, 5, 2)));
        assert!(tour(AvailabilityType::ByRequest, None).accepts_date(d(2026, 5, 2)));
    }

    #[test]
    fn entity_type_parse() {
        assert_eq!(EntityType::parse("guide"), Some(EntityType::Guide));
        assert_eq!(EntityType::parse("COMPANY"), None);
        assert_eq!(AvailabilityType::from_str("bogus"), AvailabilityType::Daily);
    }
}
