// used to print out the GEDCOM form of a value
use std::fmt;

// ------------- Value --------------
/// A payload interpreted according to the payload kind of its structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(u64),
    /// Text, language tags, file paths, pointer payloads and untyped payloads.
    Text(String),
    ListText(Vec<String>),
    ListEnum(Vec<String>),
    Enum(String),
    MediaType(MediaType),
    PersonalName(PersonalName),
    Time(Time),
    Age(Age),
    DateExact(DateExact),
    Date(Date),
    DatePeriod(DatePeriod),
    DateRange(DateRange),
    DateApprox(DateApprox),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) | Value::Enum(text) => Some(text.as_str()),
            _ => None,
        }
    }
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::ListText(items) | Value::ListEnum(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(true) => write!(f, "Y"),
            Value::Boolean(false) => Ok(()),
            Value::Integer(number) => write!(f, "{}", number),
            Value::Text(text) | Value::Enum(text) => write!(f, "{}", text),
            Value::ListText(items) | Value::ListEnum(items) => write!(f, "{}", items.join(", ")),
            Value::MediaType(v) => write!(f, "{}", v),
            Value::PersonalName(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Age(v) => write!(f, "{}", v),
            Value::DateExact(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::DatePeriod(v) => write!(f, "{}", v),
            Value::DateRange(v) => write!(f, "{}", v),
            Value::DateApprox(v) => write!(f, "{}", v),
        }
    }
}

// ------------- Age --------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBound {
    Less,
    Greater,
}
impl fmt::Display for AgeBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AgeBound::Less => write!(f, "<"),
            AgeBound::Greater => write!(f, ">"),
        }
    }
}

/// A duration given in any subset of years, months, weeks and days,
/// optionally bounded from one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Age {
    pub bound: Option<AgeBound>,
    pub years: Option<u64>,
    pub months: Option<u64>,
    pub weeks: Option<u64>,
    pub days: Option<u64>,
}
impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(bound) = self.bound {
            parts.push(bound.to_string());
        }
        for (amount, unit) in [
            (self.years, 'y'),
            (self.months, 'm'),
            (self.weeks, 'w'),
            (self.days, 'd'),
        ] {
            if let Some(amount) = amount {
                parts.push(format!("{}{}", amount, unit));
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}

// ------------- Time --------------
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: Option<u8>,
    /// The digits after the decimal point, as written.
    pub fraction: Option<String>,
    /// `Z` for UTC, absent for local time.
    pub timezone: Option<String>,
}
impl Time {
    pub fn is_utc(&self) -> bool {
        self.timezone.as_deref() == Some("Z")
    }
}
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, ":{:02}", second)?;
            if let Some(fraction) = &self.fraction {
                write!(f, ".{}", fraction)?;
            }
        }
        if let Some(timezone) = &self.timezone {
            write!(f, "{}", timezone)?;
        }
        Ok(())
    }
}

// ------------- Dates --------------
/// A date in any calendar, where the day requires the month. Day and year
/// hold any number of digits up to `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Date {
    pub calendar: Option<String>,
    pub day: Option<u64>,
    pub month: Option<String>,
    pub year: u64,
    pub epoch: Option<String>,
}
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(calendar) = &self.calendar {
            write!(f, "{} ", calendar)?;
        }
        if let Some(day) = self.day {
            write!(f, "{} ", day)?;
        }
        if let Some(month) = &self.month {
            write!(f, "{} ", month)?;
        }
        write!(f, "{}", self.year)?;
        if let Some(epoch) = &self.epoch {
            write!(f, " {}", epoch)?;
        }
        Ok(())
    }
}

/// A Gregorian date with all of day, month and year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateExact {
    pub day: u64,
    pub month: String,
    pub year: u64,
}
impl fmt::Display for DateExact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month, self.year)
    }
}

/// `FROM` and/or `TO` a date. At least one end is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DatePeriod {
    pub from: Option<Date>,
    pub to: Option<Date>,
}
impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => write!(f, "FROM {} TO {}", from, to),
            (Some(from), None) => write!(f, "FROM {}", from),
            (None, Some(to)) => write!(f, "TO {}", to),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateRange {
    Between(Date, Date),
    After(Date),
    Before(Date),
}
impl DateRange {
    /// The earliest date the range allows, if bounded below.
    pub fn start(&self) -> Option<&Date> {
        match self {
            DateRange::Between(start, _) | DateRange::After(start) => Some(start),
            DateRange::Before(_) => None,
        }
    }
    /// The latest date the range allows, if bounded above.
    pub fn end(&self) -> Option<&Date> {
        match self {
            DateRange::Between(_, end) | DateRange::Before(end) => Some(end),
            DateRange::After(_) => None,
        }
    }
}
impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DateRange::Between(start, end) => write!(f, "BET {} AND {}", start, end),
            DateRange::After(start) => write!(f, "AFT {}", start),
            DateRange::Before(end) => write!(f, "BEF {}", end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approximation {
    About,
    Calculated,
    Estimated,
}
impl Approximation {
    pub fn keyword(&self) -> &'static str {
        match self {
            Approximation::About => "ABT",
            Approximation::Calculated => "CAL",
            Approximation::Estimated => "EST",
        }
    }
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ABT" => Some(Approximation::About),
            "CAL" => Some(Approximation::Calculated),
            "EST" => Some(Approximation::Estimated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateApprox {
    pub qualifier: Approximation,
    pub date: Date,
}
impl fmt::Display for DateApprox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.qualifier.keyword(), self.date)
    }
}

// ------------- Names and media types --------------
/// A name with the slashes that delimit the surname removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonalName {
    pub fullname: String,
    pub surname: Option<String>,
}
impl fmt::Display for PersonalName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fullname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    pub value: String,
}
impl MediaType {
    /// `text` in `text/html; charset=utf-8`
    pub fn top_level(&self) -> &str {
        self.value.split('/').next().unwrap_or_default()
    }
    /// `html` in `text/html; charset=utf-8`
    pub fn subtype(&self) -> &str {
        self.value
            .split_once('/')
            .map(|(_, rest)| rest.split(';').next().unwrap_or_default())
            .unwrap_or_default()
    }
    /// Parameter names and their raw values, quotes included.
    pub fn parameters(&self) -> Vec<(&str, &str)> {
        self.value
            .split(';')
            .skip(1)
            .filter_map(|parameter| parameter.split_once('='))
            .collect()
    }
}
impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
