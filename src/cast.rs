//! Interpreting payload text as typed values.
//!
//! Every value type can be parsed on its own through [`FromStr`], e.g.
//! `"BET 1900 AND 1910".parse::<DateRange>()`, while [`cast_value`] picks the
//! parser from the schema's payload kind for a structure type.

// used for capture groups and their lookups
use regex::{Captures, Regex};
// used for logging
use tracing::warn;

// used to give every value type a parser
use std::str::FromStr;

use crate::error::{GedcomError, Result};
use crate::grammar;
use crate::schema::{PayloadKind, Schema};
use crate::value::{
    Age, AgeBound, Approximation, Date, DateApprox, DateExact, DatePeriod, DateRange, MediaType,
    PersonalName, Time, Value,
};

/// Casts the payload text of a structure with type identifier `type_id`.
///
/// Empty text has no value. A type that is missing from the payload table,
/// or whose payload URI is not recognized, keeps its text as is.
pub fn cast_value(text: &str, type_id: &str, schema: &Schema) -> Result<Option<Value>> {
    if text.is_empty() {
        return Ok(None);
    }
    match schema.payload_kind(type_id) {
        Some(kind) => cast_as(text, kind).map(Some),
        None => {
            warn!(type_id, "Unknown payload kind, keeping the text as is");
            Ok(Some(Value::Text(text.to_owned())))
        }
    }
}

/// Casts `text` as the given kind, regardless of where it came from.
pub fn cast_as(text: &str, kind: PayloadKind) -> Result<Value> {
    let value = match kind {
        PayloadKind::Boolean => Value::Boolean(cast_boolean(text)?),
        PayloadKind::Integer => Value::Integer(cast_integer(text)?),
        PayloadKind::Text
        | PayloadKind::Language
        | PayloadKind::FilePath
        | PayloadKind::Pointer
        | PayloadKind::Untyped => Value::Text(text.to_owned()),
        PayloadKind::ListText => Value::ListText(split_list(text)),
        PayloadKind::ListEnum => {
            matching(&grammar::LIST_ENUM, text, kind)?;
            Value::ListEnum(split_list(text))
        }
        PayloadKind::Enum => {
            matching(&grammar::ENUM, text, kind)?;
            Value::Enum(text.to_owned())
        }
        PayloadKind::MediaType => Value::MediaType(text.parse()?),
        PayloadKind::PersonalName => Value::PersonalName(text.parse()?),
        PayloadKind::Time => Value::Time(text.parse()?),
        PayloadKind::Age => Value::Age(text.parse()?),
        PayloadKind::DateExact => Value::DateExact(text.parse()?),
        PayloadKind::Date => Value::Date(text.parse()?),
        PayloadKind::DatePeriod => Value::DatePeriod(text.parse()?),
        PayloadKind::DateRange => Value::DateRange(text.parse()?),
        PayloadKind::DateApprox => Value::DateApprox(text.parse()?),
        PayloadKind::DateValue => cast_date_value(text)?,
    };
    Ok(value)
}

// ------------- helpers --------------
fn matching<'t>(regex: &Regex, text: &'t str, kind: PayloadKind) -> Result<Captures<'t>> {
    regex
        .captures(text)
        .ok_or_else(|| GedcomError::cast(text, kind))
}

fn group<'t>(captures: &Captures<'t>, name: &str) -> Option<&'t str> {
    captures.name(name).map(|m| m.as_str())
}

fn number<T: FromStr>(digits: &str, text: &str, kind: PayloadKind) -> Result<T> {
    digits.parse().map_err(|_| GedcomError::cast(text, kind))
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(|item| item.trim().to_owned()).collect()
}

/// The empty payload of a flag structure reads as false.
fn cast_boolean(text: &str) -> Result<bool> {
    match text {
        grammar::BOOLEAN => Ok(true),
        "" => Ok(false),
        _ => Err(GedcomError::cast(text, PayloadKind::Boolean)),
    }
}

fn cast_integer(text: &str) -> Result<u64> {
    matching(&grammar::INTEGER_VALUE, text, PayloadKind::Integer)?;
    number(text, text, PayloadKind::Integer)
}

/// Tries the date shapes from the most to the least specific.
fn cast_date_value(text: &str) -> Result<Value> {
    if let Ok(exact) = text.parse() {
        return Ok(Value::DateExact(exact));
    }
    if let Ok(range) = text.parse() {
        return Ok(Value::DateRange(range));
    }
    if let Ok(period) = text.parse() {
        return Ok(Value::DatePeriod(period));
    }
    if let Ok(approx) = text.parse() {
        return Ok(Value::DateApprox(approx));
    }
    if let Ok(date) = text.parse() {
        return Ok(Value::Date(date));
    }
    Err(GedcomError::cast(text, PayloadKind::DateValue))
}

// a date embedded in a period, range or approximation
fn inner_date(raw: Option<&str>, text: &str, kind: PayloadKind) -> Result<Option<Date>> {
    raw.map(|raw| raw.parse().map_err(|_| GedcomError::cast(text, kind)))
        .transpose()
}

// ------------- parsers --------------
impl FromStr for Age {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::Age;
        let captures = matching(&grammar::AGE, text, kind)?;
        let amount = |names: &[&str], unit: char| -> Result<Option<u64>> {
            names
                .iter()
                .find_map(|name| group(&captures, name))
                .map(|raw| number(raw.trim_end_matches(unit), text, kind))
                .transpose()
        };
        Ok(Age {
            bound: match group(&captures, "agebound") {
                Some("<") => Some(AgeBound::Less),
                Some(">") => Some(AgeBound::Greater),
                _ => None,
            },
            years: amount(&["years"], 'y')?,
            months: amount(&["months1", "months2"], 'm')?,
            weeks: amount(&["weeks1", "weeks2", "weeks3"], 'w')?,
            days: amount(&["days1", "days2", "days3", "days4"], 'd')?,
        })
    }
}

impl FromStr for Time {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::Time;
        let captures = matching(&grammar::TIME, text, kind)?;
        let (Some(hour), Some(minute)) = (group(&captures, "hour"), group(&captures, "minute"))
        else {
            return Err(GedcomError::cast(text, kind));
        };
        Ok(Time {
            hour: number(hour, text, kind)?,
            minute: number(minute, text, kind)?,
            second: group(&captures, "second")
                .map(|second| number(second, text, kind))
                .transpose()?,
            fraction: group(&captures, "fraction").map(str::to_owned),
            timezone: group(&captures, "tz").map(str::to_owned),
        })
    }
}

impl FromStr for Date {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::Date;
        let captures = matching(&grammar::DATE, text, kind)?;
        let month = group(&captures, "month");
        if month.is_some_and(grammar::is_reserved_month) {
            return Err(GedcomError::cast(text, kind));
        }
        let Some(year) = group(&captures, "year") else {
            return Err(GedcomError::cast(text, kind));
        };
        Ok(Date {
            calendar: group(&captures, "calendar").map(str::to_owned),
            day: group(&captures, "day")
                .map(|day| number(day, text, kind))
                .transpose()?,
            month: month.map(str::to_owned),
            year: number(year, text, kind)?,
            epoch: group(&captures, "epoch").map(str::to_owned),
        })
    }
}

impl FromStr for DateExact {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::DateExact;
        let captures = matching(&grammar::DATE_EXACT, text, kind)?;
        let (Some(day), Some(month), Some(year)) = (
            group(&captures, "day"),
            group(&captures, "month"),
            group(&captures, "year"),
        ) else {
            return Err(GedcomError::cast(text, kind));
        };
        if grammar::is_reserved_month(month) {
            return Err(GedcomError::cast(text, kind));
        }
        Ok(DateExact {
            day: number(day, text, kind)?,
            month: month.to_owned(),
            year: number(year, text, kind)?,
        })
    }
}

impl FromStr for DatePeriod {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::DatePeriod;
        let captures = matching(&grammar::DATE_PERIOD, text, kind)?;
        let to = group(&captures, "todate1").or_else(|| group(&captures, "todate2"));
        Ok(DatePeriod {
            from: inner_date(group(&captures, "fromdate"), text, kind)?,
            to: inner_date(to, text, kind)?,
        })
    }
}

impl FromStr for DateRange {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::DateRange;
        let captures = matching(&grammar::DATE_RANGE, text, kind)?;
        let date = |name| inner_date(group(&captures, name), text, kind);
        match (date("between")?, date("and")?, date("after")?, date("before")?) {
            (Some(start), Some(end), _, _) => Ok(DateRange::Between(start, end)),
            (_, _, Some(start), _) => Ok(DateRange::After(start)),
            (_, _, _, Some(end)) => Ok(DateRange::Before(end)),
            _ => Err(GedcomError::cast(text, kind)),
        }
    }
}

impl FromStr for DateApprox {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let kind = PayloadKind::DateApprox;
        let captures = matching(&grammar::DATE_APPROX, text, kind)?;
        let qualifier = group(&captures, "qualifier").and_then(Approximation::from_keyword);
        match (qualifier, inner_date(group(&captures, "date"), text, kind)?) {
            (Some(qualifier), Some(date)) => Ok(DateApprox { qualifier, date }),
            _ => Err(GedcomError::cast(text, kind)),
        }
    }
}

impl FromStr for PersonalName {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        let captures = matching(&grammar::PERSONAL_NAME, text, PayloadKind::PersonalName)?;
        Ok(PersonalName {
            fullname: text.replace('/', ""),
            surname: group(&captures, "surname").map(str::to_owned),
        })
    }
}

impl FromStr for MediaType {
    type Err = GedcomError;
    fn from_str(text: &str) -> Result<Self> {
        matching(&grammar::MEDIA_TYPE, text, PayloadKind::MediaType)?;
        Ok(MediaType {
            value: text.to_owned(),
        })
    }
}
