//! Recurring scan schedules.
//!
//! A [`ScheduleScanSetting`] has one variant per [`Frequency`], and each
//! variant carries exactly the fields that frequency needs:
//!
//! | frequency | hour | minute | date | weekday |
//! |-----------|------|--------|------|---------|
//! | `HOUR`    |      | ✓      |      |         |
//! | `DAY`     | ✓    | ✓      |      |         |
//! | `WEEK`    | ✓    | ✓      |      | ✓       |
//! | `MONTH`   | ✓    | ✓      | ✓    |         |
//!
//! On the wire every value is a decimal string (`"0"`, `"12"`, `"55"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recurrence unit of a scan schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    /// Every hour.
    Hour,
    /// Every day.
    Day,
    /// Every week.
    Week,
    /// Every month.
    Month,
}

impl Frequency {
    /// All frequencies from shortest to longest period.
    pub const ALL: [Self; 4] = [Self::Hour, Self::Day, Self::Week, Self::Month];

    /// Returns the wire identifier (e.g. `"WEEK"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
        }
    }

    /// Returns the fields a setting of this frequency carries.
    #[must_use]
    pub const fn fields(self) -> &'static [ScheduleField] {
        match self {
            Self::Hour => &[ScheduleField::Minute],
            Self::Day => &[ScheduleField::Hour, ScheduleField::Minute],
            Self::Week => &[ScheduleField::Hour, ScheduleField::Minute, ScheduleField::Weekday],
            Self::Month => &[ScheduleField::Hour, ScheduleField::Minute, ScheduleField::Date],
        }
    }

    /// Returns `true` if settings of this frequency carry `field`.
    #[must_use]
    pub fn requires(self, field: ScheduleField) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOUR" | "HOURLY" => Ok(Self::Hour),
            "DAY" | "DAILY" => Ok(Self::Day),
            "WEEK" | "WEEKLY" => Ok(Self::Week),
            "MONTH" | "MONTHLY" => Ok(Self::Month),
            _ => Err(ScheduleError::Invalid {
                field: ScheduleField::Frequency,
                value: s.into(),
            }),
        }
    }
}

/// Day of the week for weekly schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl Weekday {
    /// All weekdays starting from Monday.
    pub const ALL: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Returns the three-letter wire code (e.g. `"MON"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
            Self::Sun => "SUN",
        }
    }

    /// Returns the English day name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mon => "Monday",
            Self::Tue => "Tuesday",
            Self::Wed => "Wednesday",
            Self::Thu => "Thursday",
            Self::Fri => "Friday",
            Self::Sat => "Saturday",
            Self::Sun => "Sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.code().eq_ignore_ascii_case(s) || day.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScheduleError::Invalid {
                field: ScheduleField::Weekday,
                value: s.into(),
            })
    }
}

/// Hour of day, `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

/// Minute of hour, aligned to 5 minutes (`0, 5, ..., 55`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minute(u8);

/// Day of month, `1..=28` so every month has it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfMonth(u8);

impl Hour {
    /// Noon, the default hour for new schedules.
    pub const NOON: Self = Self(12);

    /// Creates an hour, returning `None` outside `0..=23`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 23 { Some(Self(value)) } else { None }
    }

    /// Returns the hour as a number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Minute {
    /// Top of the hour, the default minute for new schedules.
    pub const ZERO: Self = Self(0);

    /// Creates a minute, returning `None` unless it is a multiple of 5 below 60.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < 60 && value % 5 == 0 { Some(Self(value)) } else { None }
    }

    /// Returns the minute as a number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl DayOfMonth {
    /// The first of the month, the default date for monthly schedules.
    pub const FIRST: Self = Self(1);

    /// Creates a day of month, returning `None` outside `1..=28`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 28 { Some(Self(value)) } else { None }
    }

    /// Returns the day as a number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

macro_rules! impl_string_encoded {
    ($ty:ident, $field:expr) => {
        impl FromStr for $ty {
            type Err = ScheduleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| ScheduleError::Invalid {
                        field: $field,
                        value: s.into(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_string_encoded!(Hour, ScheduleField::Hour);
impl_string_encoded!(Minute, ScheduleField::Minute);
impl_string_encoded!(DayOfMonth, ScheduleField::Date);

/// A field of a schedule setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    /// Recurrence unit.
    Frequency,
    /// Hour of day.
    Hour,
    /// Minute of hour.
    Minute,
    /// Day of month.
    Date,
    /// Day of week.
    Weekday,
}

impl ScheduleField {
    /// Returns the wire name (e.g. `"weekday"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Date => "date",
            Self::Weekday => "weekday",
        }
    }
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when editing or parsing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A value was out of range or unparseable.
    #[error("invalid {field} '{value}'")]
    Invalid {
        /// The field being set.
        field: ScheduleField,
        /// The rejected value.
        value: Box<str>,
    },

    /// The field does not exist for the current frequency.
    #[error("{field} does not apply to {frequency} schedules")]
    NotApplicable {
        /// The field being set.
        field: ScheduleField,
        /// The schedule's current frequency.
        frequency: Frequency,
    },

    /// A field the frequency requires was absent.
    #[error("{frequency} schedules require a {field}")]
    Missing {
        /// The absent field.
        field: ScheduleField,
        /// The schedule's frequency.
        frequency: Frequency,
    },
}

/// When a scheduled scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireSchedule", into = "WireSchedule")]
pub enum ScheduleScanSetting {
    /// Every hour at `minute`.
    Hourly {
        /// Minute past the hour.
        minute: Minute,
    },
    /// Every day at `hour:minute`.
    Daily {
        /// Hour of day.
        hour: Hour,
        /// Minute of hour.
        minute: Minute,
    },
    /// Every week on `weekday` at `hour:minute`.
    Weekly {
        /// Day of week.
        weekday: Weekday,
        /// Hour of day.
        hour: Hour,
        /// Minute of hour.
        minute: Minute,
    },
    /// Every month on `date` at `hour:minute`.
    Monthly {
        /// Day of month.
        date: DayOfMonth,
        /// Hour of day.
        hour: Hour,
        /// Minute of hour.
        minute: Minute,
    },
}

impl Default for ScheduleScanSetting {
    /// Daily at 12:00, the setting installed when scanning is enabled.
    fn default() -> Self {
        Self::for_frequency(Frequency::Day)
    }
}

impl ScheduleScanSetting {
    /// Returns the default setting for `frequency`: 12:00, the 1st, Monday.
    #[must_use]
    pub const fn for_frequency(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Hour => Self::Hourly { minute: Minute::ZERO },
            Frequency::Day => Self::Daily {
                hour: Hour::NOON,
                minute: Minute::ZERO,
            },
            Frequency::Week => Self::Weekly {
                weekday: Weekday::Mon,
                hour: Hour::NOON,
                minute: Minute::ZERO,
            },
            Frequency::Month => Self::Monthly {
                date: DayOfMonth::FIRST,
                hour: Hour::NOON,
                minute: Minute::ZERO,
            },
        }
    }

    /// Returns the setting's frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        match self {
            Self::Hourly { .. } => Frequency::Hour,
            Self::Daily { .. } => Frequency::Day,
            Self::Weekly { .. } => Frequency::Week,
            Self::Monthly { .. } => Frequency::Month,
        }
    }

    /// Returns the setting after switching to `frequency`.
    ///
    /// A change of frequency resets every field to the new frequency's
    /// defaults; nothing carries over. Selecting the current frequency
    /// returns the setting unchanged.
    #[must_use]
    pub fn with_frequency(self, frequency: Frequency) -> Self {
        if self.frequency() == frequency {
            self
        } else {
            Self::for_frequency(frequency)
        }
    }

    /// Returns the hour, absent for hourly schedules.
    #[must_use]
    pub const fn hour(&self) -> Option<Hour> {
        match self {
            Self::Hourly { .. } => None,
            Self::Daily { hour, .. } | Self::Weekly { hour, .. } | Self::Monthly { hour, .. } => Some(*hour),
        }
    }

    /// Returns the minute.
    #[must_use]
    pub const fn minute(&self) -> Minute {
        match self {
            Self::Hourly { minute }
            | Self::Daily { minute, .. }
            | Self::Weekly { minute, .. }
            | Self::Monthly { minute, .. } => *minute,
        }
    }

    /// Returns the day of month, present only for monthly schedules.
    #[must_use]
    pub const fn date(&self) -> Option<DayOfMonth> {
        match self {
            Self::Monthly { date, .. } => Some(*date),
            _ => None,
        }
    }

    /// Returns the weekday, present only for weekly schedules.
    #[must_use]
    pub const fn weekday(&self) -> Option<Weekday> {
        match self {
            Self::Weekly { weekday, .. } => Some(*weekday),
            _ => None,
        }
    }

    /// Sets the hour from its string encoding.
    pub fn set_hour(&mut self, value: &str) -> Result<(), ScheduleError> {
        let parsed: Hour = value.parse()?;
        let frequency = self.frequency();
        match self {
            Self::Hourly { .. } => return Err(not_applicable(ScheduleField::Hour, frequency)),
            Self::Daily { hour, .. } | Self::Weekly { hour, .. } | Self::Monthly { hour, .. } => *hour = parsed,
        }
        Ok(())
    }

    /// Sets the minute from its string encoding.
    pub fn set_minute(&mut self, value: &str) -> Result<(), ScheduleError> {
        let parsed: Minute = value.parse()?;
        match self {
            Self::Hourly { minute }
            | Self::Daily { minute, .. }
            | Self::Weekly { minute, .. }
            | Self::Monthly { minute, .. } => *minute = parsed,
        }
        Ok(())
    }

    /// Sets the day of month from its string encoding.
    pub fn set_date(&mut self, value: &str) -> Result<(), ScheduleError> {
        let parsed: DayOfMonth = value.parse()?;
        let frequency = self.frequency();
        match self {
            Self::Monthly { date, .. } => *date = parsed,
            _ => return Err(not_applicable(ScheduleField::Date, frequency)),
        }
        Ok(())
    }

    /// Sets the weekday from its code (`"MON"`) or name (`"Monday"`).
    pub fn set_weekday(&mut self, value: &str) -> Result<(), ScheduleError> {
        let parsed: Weekday = value.parse()?;
        let frequency = self.frequency();
        match self {
            Self::Weekly { weekday, .. } => *weekday = parsed,
            _ => return Err(not_applicable(ScheduleField::Weekday, frequency)),
        }
        Ok(())
    }

    /// Returns a human-readable summary, e.g. `weekly on Monday at 12:00`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Hourly { minute } => format!("every hour at :{:02}", minute.get()),
            Self::Daily { hour, minute } => format!("daily at {}", clock(*hour, *minute)),
            Self::Weekly { weekday, hour, minute } => {
                format!("weekly on {} at {}", weekday.name(), clock(*hour, *minute))
            }
            Self::Monthly { date, hour, minute } => {
                format!("monthly on day {date} at {}", clock(*hour, *minute))
            }
        }
    }
}

impl fmt::Display for ScheduleScanSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

const fn not_applicable(field: ScheduleField, frequency: Frequency) -> ScheduleError {
    ScheduleError::NotApplicable { field, frequency }
}

fn clock(hour: Hour, minute: Minute) -> String {
    format!("{:02}:{:02}", hour.get(), minute.get())
}

/// Flat wire shape: `{"frequency": "WEEK", "hour": "12", "minute": "0", "weekday": "MON"}`.
#[derive(Debug, Serialize, Deserialize)]
struct WireSchedule {
    frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekday: Option<Weekday>,
}

impl From<ScheduleScanSetting> for WireSchedule {
    fn from(setting: ScheduleScanSetting) -> Self {
        Self {
            frequency: setting.frequency(),
            hour: setting.hour().map(|h| h.to_string()),
            minute: Some(setting.minute().to_string()),
            date: setting.date().map(|d| d.to_string()),
            weekday: setting.weekday(),
        }
    }
}

impl TryFrom<WireSchedule> for ScheduleScanSetting {
    type Error = ScheduleError;

    /// Fields the frequency does not carry are dropped; missing required fields fail.
    fn try_from(wire: WireSchedule) -> Result<Self, Self::Error> {
        let frequency = wire.frequency;
        let missing = |field| ScheduleError::Missing { field, frequency };

        let minute: Minute = wire.minute.as_deref().ok_or_else(|| missing(ScheduleField::Minute))?.parse()?;
        if frequency == Frequency::Hour {
            return Ok(Self::Hourly { minute });
        }

        let hour: Hour = wire.hour.as_deref().ok_or_else(|| missing(ScheduleField::Hour))?.parse()?;
        match frequency {
            Frequency::Hour => Ok(Self::Hourly { minute }),
            Frequency::Day => Ok(Self::Daily { hour, minute }),
            Frequency::Week => {
                let weekday = wire.weekday.ok_or_else(|| missing(ScheduleField::Weekday))?;
                Ok(Self::Weekly { weekday, hour, minute })
            }
            Frequency::Month => {
                let date: DayOfMonth = wire.date.as_deref().ok_or_else(|| missing(ScheduleField::Date))?.parse()?;
                Ok(Self::Monthly { date, hour, minute })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_is_daily_at_noon() {
        let setting = ScheduleScanSetting::default();
        assert_eq!(setting.frequency(), Frequency::Day);
        assert_eq!(setting.hour(), Some(Hour::NOON));
        assert_eq!(setting.minute(), Minute::ZERO);
    }

    #[test]
    fn frequency_change_resets_hour_and_minute() {
        let mut setting = ScheduleScanSetting::default();
        setting.set_hour("7").unwrap();
        setting.set_minute("45").unwrap();

        let weekly = setting.with_frequency(Frequency::Week);
        assert_eq!(weekly.hour(), Some(Hour::NOON));
        assert_eq!(weekly.minute(), Minute::ZERO);
    }

    #[test]
    fn week_to_month_drops_weekday_and_adds_date() {
        let mut weekly = ScheduleScanSetting::for_frequency(Frequency::Week);
        weekly.set_weekday("FRI").unwrap();

        let monthly = weekly.with_frequency(Frequency::Month);
        assert_eq!(monthly.weekday(), None);
        assert_eq!(monthly.date(), Some(DayOfMonth::FIRST));

        let value = serde_json::to_value(monthly).unwrap();
        assert_eq!(
            value,
            json!({ "frequency": "MONTH", "hour": "12", "minute": "0", "date": "1" })
        );
    }

    #[test]
    fn selecting_current_frequency_keeps_fields() {
        let mut setting = ScheduleScanSetting::for_frequency(Frequency::Month);
        setting.set_date("15").unwrap();
        assert_eq!(setting.with_frequency(Frequency::Month).date().map(DayOfMonth::get), Some(15));
    }

    #[test]
    fn hourly_has_no_hour() {
        let setting = ScheduleScanSetting::for_frequency(Frequency::Hour);
        assert_eq!(setting.hour(), None);
        let value = serde_json::to_value(setting).unwrap();
        assert_eq!(value, json!({ "frequency": "HOUR", "minute": "0" }));
    }

    #[test]
    fn set_hour_rejected_for_hourly() {
        let mut setting = ScheduleScanSetting::for_frequency(Frequency::Hour);
        let err = setting.set_hour("3").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NotApplicable {
                field: ScheduleField::Hour,
                frequency: Frequency::Hour,
            }
        );
    }

    #[test]
    fn set_weekday_rejected_for_monthly() {
        let mut setting = ScheduleScanSetting::for_frequency(Frequency::Month);
        assert!(matches!(
            setting.set_weekday("MON"),
            Err(ScheduleError::NotApplicable { .. })
        ));
    }

    #[test]
    fn minute_must_be_five_minute_aligned() {
        let mut setting = ScheduleScanSetting::default();
        assert!(setting.set_minute("55").is_ok());
        assert!(setting.set_minute("7").is_err());
        assert!(setting.set_minute("60").is_err());
    }

    #[test]
    fn hour_and_date_ranges_are_enforced() {
        assert!("23".parse::<Hour>().is_ok());
        assert!("24".parse::<Hour>().is_err());
        assert!("0".parse::<DayOfMonth>().is_err());
        assert!("28".parse::<DayOfMonth>().is_ok());
        assert!("29".parse::<DayOfMonth>().is_err());
        assert!("abc".parse::<Hour>().is_err());
    }

    #[test]
    fn weekday_parses_code_and_name() {
        assert_eq!("tue".parse::<Weekday>().unwrap(), Weekday::Tue);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sun);
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn summary_formats_each_frequency() {
        let mut hourly = ScheduleScanSetting::for_frequency(Frequency::Hour);
        hourly.set_minute("5").unwrap();
        assert_eq!(hourly.summary(), "every hour at :05");

        let mut daily = ScheduleScanSetting::default();
        daily.set_hour("9").unwrap();
        daily.set_minute("30").unwrap();
        assert_eq!(daily.summary(), "daily at 09:30");

        let mut weekly = ScheduleScanSetting::for_frequency(Frequency::Week);
        weekly.set_weekday("WED").unwrap();
        assert_eq!(weekly.summary(), "weekly on Wednesday at 12:00");

        let mut monthly = ScheduleScanSetting::for_frequency(Frequency::Month);
        monthly.set_date("28").unwrap();
        monthly.set_hour("0").unwrap();
        assert_eq!(monthly.summary(), "monthly on day 28 at 00:00");
    }

    #[test]
    fn deserialise_drops_inapplicable_fields() {
        let setting: ScheduleScanSetting = serde_json::from_value(json!({
            "frequency": "DAY",
            "hour": "3",
            "minute": "15",
            "weekday": "MON",
            "date": "4",
        }))
        .unwrap();
        assert_eq!(setting.weekday(), None);
        assert_eq!(setting.date(), None);
        assert_eq!(setting.summary(), "daily at 03:15");
    }

    #[test]
    fn deserialise_rejects_missing_required_field() {
        let result: Result<ScheduleScanSetting, _> = serde_json::from_value(json!({
            "frequency": "WEEK",
            "hour": "3",
            "minute": "15",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn frequency_fields_match_applicability_table() {
        assert!(!Frequency::Hour.requires(ScheduleField::Hour));
        assert!(Frequency::Day.requires(ScheduleField::Hour));
        assert!(Frequency::Week.requires(ScheduleField::Weekday));
        assert!(!Frequency::Week.requires(ScheduleField::Date));
        assert!(Frequency::Month.requires(ScheduleField::Date));
        for frequency in Frequency::ALL {
            assert!(frequency.requires(ScheduleField::Minute));
        }
    }
}
