use gedcom7::cast::{cast_as, cast_value};
use gedcom7::value::{
    Age, AgeBound, Approximation, Date, DateApprox, DateExact, DatePeriod, DateRange, MediaType,
    PersonalName, Time,
};
use gedcom7::{GedcomError, PayloadKind, Schema, Value};

const V7: &str = "https://gedcom.io/terms/v7/";

fn year(year: u64) -> Date {
    Date {
        year,
        ..Date::default()
    }
}

fn rejected(text: &str, kind: PayloadKind) -> bool {
    cast_as(text, kind)
        == Err(GedcomError::Cast {
            value: text.to_owned(),
            kind,
        })
}

#[test]
fn value_follows_the_schema() {
    let schema = Schema::gedcom7();
    assert_eq!(
        cast_value("3", &format!("{V7}INDI-NCHI"), &schema),
        Ok(Some(Value::Integer(3)))
    );
    assert_eq!(
        cast_value("Y", &format!("{V7}BIRT"), &schema),
        Ok(Some(Value::Boolean(true)))
    );
    assert_eq!(cast_value("", &format!("{V7}BIRT"), &schema), Ok(None));
    assert_eq!(
        cast_value("anything", "https://example.com/unknown", &schema),
        Ok(Some(Value::Text("anything".into())))
    );
    assert_eq!(
        cast_value("x", "HEAD pseudostructure", &schema),
        Ok(Some(Value::Text("x".into())))
    );
}

#[test]
fn cast_error_message() {
    let error = cast_as("13:15A", PayloadKind::Time).unwrap_err();
    assert_eq!(error.to_string(), "Cannot interpret 13:15A as type Time");
}

#[test]
fn integers() {
    assert_eq!(cast_as("0", PayloadKind::Integer), Ok(Value::Integer(0)));
    assert_eq!(cast_as("0042", PayloadKind::Integer), Ok(Value::Integer(42)));
    assert!(rejected("-1", PayloadKind::Integer));
    assert!(rejected("+1", PayloadKind::Integer));
    assert!(rejected("1.5", PayloadKind::Integer));
    assert!(rejected("99999999999999999999999", PayloadKind::Integer));
}

#[test]
fn booleans() {
    assert_eq!(cast_as("Y", PayloadKind::Boolean), Ok(Value::Boolean(true)));
    assert!(rejected("N", PayloadKind::Boolean));
    assert!(rejected("y", PayloadKind::Boolean));
}

#[test]
fn lists_and_enumerations() {
    assert_eq!(
        cast_as("a ,b,  c", PayloadKind::ListText),
        Ok(Value::ListText(vec!["a".into(), "b".into(), "c".into()]))
    );
    assert_eq!(
        cast_as("LOCKED , _CUSTOM", PayloadKind::ListEnum),
        Ok(Value::ListEnum(vec!["LOCKED".into(), "_CUSTOM".into()]))
    );
    assert!(rejected("LOCKED, locked", PayloadKind::ListEnum));
    assert_eq!(cast_as("MALE", PayloadKind::Enum), Ok(Value::Enum("MALE".into())));
    assert!(rejected("MALE FEMALE", PayloadKind::Enum));
}

#[test]
fn text_lists_are_stable_when_joined_again() {
    for text in ["a ,b,  c", "one", " spaced out , x", "trailing,", ",,"] {
        let Ok(Value::ListText(items)) = cast_as(text, PayloadKind::ListText) else {
            panic!("{text:?} is not a list");
        };
        assert_eq!(
            cast_as(&items.join(", "), PayloadKind::ListText),
            Ok(Value::ListText(items))
        );
    }
}

#[test]
fn personal_names() {
    assert_eq!(
        "John /Doe/".parse::<PersonalName>(),
        Ok(PersonalName {
            fullname: "John Doe".into(),
            surname: Some("Doe".into()),
        })
    );
    assert_eq!(
        "/Doe/ Jr.".parse::<PersonalName>(),
        Ok(PersonalName {
            fullname: "Doe Jr.".into(),
            surname: Some("Doe".into()),
        })
    );
    assert_eq!(
        "Cher".parse::<PersonalName>(),
        Ok(PersonalName {
            fullname: "Cher".into(),
            surname: None,
        })
    );
    assert!(rejected("John /Doe/ /Smith/", PayloadKind::PersonalName));
}

#[test]
fn times() {
    assert_eq!(
        "9:05".parse::<Time>(),
        Ok(Time {
            hour: 9,
            minute: 5,
            second: None,
            fraction: None,
            timezone: None,
        })
    );
    let precise = "23:59:59.05Z".parse::<Time>().unwrap();
    assert_eq!(precise.second, Some(59));
    assert_eq!(precise.fraction.as_deref(), Some("05"));
    assert!(precise.is_utc());
    assert_eq!(precise.to_string(), "23:59:59.05Z");
    for invalid in ["13:15A", "25:01", "23:61", "23:01:71", "12", "12:5"] {
        assert!(rejected(invalid, PayloadKind::Time), "{}", invalid);
    }
}

#[test]
fn ages() {
    assert_eq!(
        "< 3y 6m".parse::<Age>(),
        Ok(Age {
            bound: Some(AgeBound::Less),
            years: Some(3),
            months: Some(6),
            ..Age::default()
        })
    );
    assert_eq!(
        "2w 3d".parse::<Age>(),
        Ok(Age {
            weeks: Some(2),
            days: Some(3),
            ..Age::default()
        })
    );
    assert_eq!(
        "4d".parse::<Age>(),
        Ok(Age {
            days: Some(4),
            ..Age::default()
        })
    );
    assert_eq!("> 1y 2m 3w 4d".parse::<Age>().unwrap().to_string(), "> 1y 2m 3w 4d");
    // units appear in descending order only
    assert!(rejected("3y 6m 5d 2w", PayloadKind::Age));
    assert!(rejected("3y6m", PayloadKind::Age));
    assert!(rejected("", PayloadKind::Age));
}

#[test]
fn ages_read_back_from_their_display() {
    let durations = [
        "1y", "1y 2m", "1y 3w", "1y 4d", "1y 2m 3w", "1y 2m 4d", "1y 3w 4d", "1y 2m 3w 4d",
        "2m", "2m 3w", "2m 4d", "2m 3w 4d",
        "3w", "3w 4d",
        "4d",
    ];
    for duration in durations {
        for bound in ["", "< ", "> "] {
            let text = format!("{bound}{duration}");
            let age: Age = text.parse().unwrap();
            assert_eq!(age.to_string(), text);
            assert_eq!(age.to_string().parse::<Age>(), Ok(age));
        }
    }
}

#[test]
fn exact_dates() {
    assert_eq!(
        "11 JAN 2022".parse::<DateExact>(),
        Ok(DateExact {
            day: 11,
            month: "JAN".into(),
            year: 2022,
        })
    );
    assert_eq!(
        "1 JAN 99999999999".parse::<DateExact>().map(|date| date.year),
        Ok(99_999_999_999)
    );
    assert_eq!(
        cast_as("99999999999 BCE", PayloadKind::DateValue),
        Ok(Value::Date(Date {
            epoch: Some("BCE".into()),
            ..year(99_999_999_999)
        }))
    );
    assert!(rejected("JAN 2022", PayloadKind::DateExact));
    assert!(rejected("11 TO 2022", PayloadKind::DateExact));
}

#[test]
fn dates() {
    assert_eq!(
        "JULIAN 5 MAY 1755 BCE".parse::<Date>(),
        Ok(Date {
            calendar: Some("JULIAN".into()),
            day: Some(5),
            month: Some("MAY".into()),
            year: 1755,
            epoch: Some("BCE".into()),
        })
    );
    assert_eq!(
        "MAR 1900".parse::<Date>(),
        Ok(Date {
            month: Some("MAR".into()),
            year: 1900,
            ..Date::default()
        })
    );
    assert!(rejected("TO 2022", PayloadKind::Date));
    assert!(rejected("5 1900", PayloadKind::Date));
}

#[test]
fn periods() {
    assert_eq!(
        "FROM 1 TO 2022".parse::<DatePeriod>(),
        Ok(DatePeriod {
            from: Some(year(1)),
            to: Some(year(2022)),
        })
    );
    assert_eq!(
        "FROM 3 MAR 1900".parse::<DatePeriod>(),
        Ok(DatePeriod {
            from: Some(Date {
                day: Some(3),
                month: Some("MAR".into()),
                year: 1900,
                ..Date::default()
            }),
            to: None,
        })
    );
    assert_eq!(
        "TO 1 JAN 2022".parse::<DatePeriod>().unwrap().to.unwrap().day,
        Some(1)
    );
    assert!(rejected("11 JAN 2022", PayloadKind::DatePeriod));
    assert!(rejected("FROM", PayloadKind::DatePeriod));
}

#[test]
fn ranges_and_approximations() {
    assert_eq!(
        "BET 1 JAN 1900 AND 1910".parse::<DateRange>(),
        Ok(DateRange::Between(
            Date {
                day: Some(1),
                month: Some("JAN".into()),
                year: 1900,
                ..Date::default()
            },
            year(1910),
        ))
    );
    assert_eq!("BEF 1900".parse::<DateRange>(), Ok(DateRange::Before(year(1900))));
    assert_eq!("AFT 1900".parse::<DateRange>().unwrap().start(), Some(&year(1900)));
    assert!(rejected("BET 1900", PayloadKind::DateRange));
    assert_eq!(
        "EST 1850".parse::<DateApprox>(),
        Ok(DateApprox {
            qualifier: Approximation::Estimated,
            date: year(1850),
        })
    );
    assert!(rejected("ABOUT 1850", PayloadKind::DateApprox));
}

#[test]
fn date_values_pick_the_most_specific_shape() {
    let cast = |text| cast_as(text, PayloadKind::DateValue).unwrap();
    assert!(matches!(cast("1 JAN 1900"), Value::DateExact(_)));
    assert!(matches!(cast("BET 1900 AND 1910"), Value::DateRange(_)));
    assert!(matches!(cast("FROM 1900"), Value::DatePeriod(_)));
    assert!(matches!(cast("CAL 1900"), Value::DateApprox(_)));
    assert_eq!(
        cast("JAN 1900"),
        Value::Date(Date {
            month: Some("JAN".into()),
            year: 1900,
            ..Date::default()
        })
    );
    assert!(rejected("sometime", PayloadKind::DateValue));
}

#[test]
fn media_types() {
    let media_type: MediaType = "text/html;charset=utf-8".parse().unwrap();
    assert_eq!(media_type.top_level(), "text");
    assert_eq!(media_type.subtype(), "html");
    assert_eq!(media_type.parameters(), [("charset", "utf-8")]);
    assert!(rejected("text", PayloadKind::MediaType));
    assert!(rejected("text/", PayloadKind::MediaType));
}

#[test]
fn text_kinds_are_unchanged() {
    for kind in [
        PayloadKind::Text,
        PayloadKind::Language,
        PayloadKind::FilePath,
        PayloadKind::Pointer,
        PayloadKind::Untyped,
    ] {
        assert_eq!(cast_as(" as is ", kind), Ok(Value::Text(" as is ".into())));
    }
}

#[test]
fn payload_kinds_by_name_and_uri() {
    assert_eq!("DateValue".parse::<PayloadKind>(), Ok(PayloadKind::DateValue));
    assert!("Nothing".parse::<PayloadKind>().is_err());
    assert_eq!(
        PayloadKind::from_uri("@<https://gedcom.io/terms/v7/record-INDI>@"),
        Some(PayloadKind::Pointer)
    );
    assert_eq!(PayloadKind::from_uri("https://example.com/other"), None);
}
