//! Line and payload grammars.
//!
//! Every grammar is kept twice: as a pattern string that larger grammars
//! embed, and as a compiled [`Regex`] anchored at both ends so that a match
//! always covers the whole input (partial matches are rejected). Patterns are
//! compiled once, on first use.
//!
//! The `regex` crate has no lookaround, so the rule that `FROM`, `TO`, `BET`,
//! `AND`, `AFT` and `BEF` are never months is enforced by the date parsers
//! after matching, see [`is_reserved_month`]. The optional day/month part of
//! a date is lazy so that `FROM 1 TO 2` reads as two years.
use lazy_static::lazy_static;
use regex::Regex;

pub const D: &str = " ";
pub const INTEGER: &str = "[0-9]+";
pub const STDTAG: &str = "[A-Z][A-Z0-9_]*";
pub const EXTTAG: &str = "_[A-Z0-9_]+";
pub const XREF: &str = "@[A-Z0-9_]+@";
pub const VOIDPTR: &str = "@VOID@";
pub const AGEBOUND: &str = "[<>]";
pub const BOOLEAN: &str = "Y";
pub const LIST_DELIM: &str = " *, *";

// any character allowed in a payload except the banned control and
// non-character code points, with or without '@'
pub const NONEOL: &str =
    r"[\t\x20-\x7E\x{A0}-\x{D7FF}\x{E000}-\x{FFFD}\x{10000}-\x{10FFFF}]";
pub const NONAT: &str =
    r"[\t\x20-\x3F\x41-\x7E\x{A0}-\x{D7FF}\x{E000}-\x{FFFD}\x{10000}-\x{10FFFF}]";

// everything but '/' and the C0 controls
pub const NAMECHAR: &str = r"[\x20-\x2E\x30-\x{10FFFF}]";

pub const HOUR: &str = "[0-9]|[01][0-9]|2[0-3]";
pub const MINUTE: &str = "[0-5][0-9]";
pub const SECOND: &str = "[0-5][0-9]";

pub const MT_CHAR: &str = r"[\x20-\x21\x23-\x27\x2A-\x2B\x2D-\x2E0-9A-Z\x5E-\x7E]";
pub const MT_QTEXT: &str = r"[\t\n\x20-\x21\x23-\x5B\x5D-\x7E]";
pub const MT_QPAIR: &str = r"\\[\t\x20-\x7E]";

/// Words that introduce or join date periods and ranges.
pub const RESERVED_MONTHS: [&str; 6] = ["FROM", "TO", "BET", "AND", "AFT", "BEF"];

lazy_static! {
    pub static ref TAG_PATTERN: String = format!("{STDTAG}|{EXTTAG}");
    pub static ref LINE_PATTERN: String = format!(
        "(?P<level>0|[1-9][0-9]*){D}(?:(?P<xref>{XREF}){D})?(?P<tag>{STDTAG}|{EXTTAG})\
         (?:{D}(?:(?P<pointer>{VOIDPTR}|{XREF})|(?P<linestr>(?:{NONAT}|@@){NONEOL}*)))?"
    );

    pub static ref DURATION_PATTERN: String = format!(
        "(?P<years>{INTEGER}y)(?:{D}(?P<months1>{INTEGER}m))?(?:{D}(?P<weeks1>{INTEGER}w))?(?:{D}(?P<days1>{INTEGER}d))?\
         |(?P<months2>{INTEGER}m)(?:{D}(?P<weeks2>{INTEGER}w))?(?:{D}(?P<days2>{INTEGER}d))?\
         |(?P<weeks3>{INTEGER}w)(?:{D}(?P<days3>{INTEGER}d))?\
         |(?P<days4>{INTEGER}d)"
    );
    pub static ref AGE_PATTERN: String =
        format!("(?:(?P<agebound>{AGEBOUND}){D})?(?:{})", *DURATION_PATTERN);

    static ref CALENDAR: String = format!("(?:GREGORIAN|JULIAN|FRENCH_R|HEBREW|{EXTTAG})");
    static ref MONTH: String = format!("(?:{STDTAG}|{EXTTAG})");
    static ref EPOCH: String = format!("(?:BCE|{EXTTAG})");

    /// A date without capture groups, for embedding.
    pub static ref DATE_PATTERN: String = format!(
        "(?:{cal}{D})?(?:(?:{INTEGER}{D})?{month}{D})??{INTEGER}(?:{D}{epoch})?",
        cal = *CALENDAR, month = *MONTH, epoch = *EPOCH
    );
    pub static ref DATE_CAPTURE_PATTERN: String = format!(
        "(?:(?P<calendar>{cal}){D})?(?:(?:(?P<day>{INTEGER}){D})?(?P<month>{month}){D})??\
         (?P<year>{INTEGER})(?:{D}(?P<epoch>{epoch}))?",
        cal = *CALENDAR, month = *MONTH, epoch = *EPOCH
    );
    pub static ref DATE_EXACT_PATTERN: String = format!(
        "(?P<day>{INTEGER}){D}(?P<month>{month}){D}(?P<year>{INTEGER})",
        month = *MONTH
    );
    pub static ref DATE_PERIOD_PATTERN: String = format!(
        "TO{D}(?P<todate1>{date})|FROM{D}(?P<fromdate>{date})(?:{D}TO{D}(?P<todate2>{date}))?",
        date = *DATE_PATTERN
    );
    pub static ref DATE_RANGE_PATTERN: String = format!(
        "BET{D}(?P<between>{date}){D}AND{D}(?P<and>{date})|AFT{D}(?P<after>{date})|BEF{D}(?P<before>{date})",
        date = *DATE_PATTERN
    );
    pub static ref DATE_APPROX_PATTERN: String = format!(
        "(?P<qualifier>ABT|CAL|EST){D}(?P<date>{date})",
        date = *DATE_PATTERN
    );

    pub static ref TIME_PATTERN: String = format!(
        r"(?P<hour>{HOUR}):(?P<minute>{MINUTE})(?::(?P<second>{SECOND})(?:\.(?P<fraction>{INTEGER}))?)?(?P<tz>Z)?"
    );

    static ref NAMESTR: String = format!("{NAMECHAR}+");
    pub static ref PERSONAL_NAME_PATTERN: String = format!(
        "{name}|(?:{name})?/(?P<surname>{name})?/(?:{name})?",
        name = *NAMESTR
    );

    pub static ref LIST_ENUM_PATTERN: String =
        format!("(?:{tag})(?:{LIST_DELIM}(?:{tag}))*", tag = *TAG_PATTERN);

    static ref MT_TOKEN: String = format!("{MT_CHAR}+");
    static ref MT_QSTRING: String = format!("\"(?:{MT_QTEXT}|{MT_QPAIR})*\"");
    pub static ref MEDIA_TYPE_PATTERN: String = format!(
        "{token}/{token}(?:;{token}=(?:{token}|{qstring}))*",
        token = *MT_TOKEN, qstring = *MT_QSTRING
    );

    // ------------- compiled, fullmatch -------------
    pub static ref LINE: Regex = fullmatch(&LINE_PATTERN);
    pub static ref AGE: Regex = fullmatch(&AGE_PATTERN);
    pub static ref DATE: Regex = fullmatch(&DATE_CAPTURE_PATTERN);
    pub static ref DATE_EXACT: Regex = fullmatch(&DATE_EXACT_PATTERN);
    pub static ref DATE_PERIOD: Regex = fullmatch(&DATE_PERIOD_PATTERN);
    pub static ref DATE_RANGE: Regex = fullmatch(&DATE_RANGE_PATTERN);
    pub static ref DATE_APPROX: Regex = fullmatch(&DATE_APPROX_PATTERN);
    pub static ref TIME: Regex = fullmatch(&TIME_PATTERN);
    pub static ref PERSONAL_NAME: Regex = fullmatch(&PERSONAL_NAME_PATTERN);
    pub static ref ENUM: Regex = fullmatch(&TAG_PATTERN);
    pub static ref LIST_ENUM: Regex = fullmatch(&LIST_ENUM_PATTERN);
    pub static ref MEDIA_TYPE: Regex = fullmatch(&MEDIA_TYPE_PATTERN);
    pub static ref INTEGER_VALUE: Regex = fullmatch(INTEGER);
}

fn fullmatch(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("grammar patterns are valid")
}

pub fn is_reserved_month(month: &str) -> bool {
    RESERVED_MONTHS.contains(&month)
}
