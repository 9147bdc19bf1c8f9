use tempora::{
    civil::{date, datetime, time, LocalDate, LocalDateTime, LocalTime},
    fmt::layout::{self, Century, Layout, ParseConfig, Pieces},
    tz::Offset,
    OffsetDateTime,
};

use crate::Result;

#[test]
fn two_digit_years() -> Result {
    let _ = crate::Logger::init();

    assert_eq!(LocalDate::strptime("%y", "80")?, date(1980, 1, 1));
    assert_eq!(LocalDate::strptime("%y", "10")?, date(2010, 1, 1));
    assert_eq!(LocalDate::strptime("%d/%m/%y", "14/07/24")?, date(2024, 7, 14));

    let layout = Layout::new("%y-%m-%d")?;
    let config = ParseConfig::new().century(Century::Fixed(20));
    assert_eq!(layout.parse_with(&config, "80-01-02")?.to_date()?, date(2080, 1, 2));
    Ok(())
}

#[test]
fn format_each_value_type() -> Result {
    let d = date(2024, 7, 14);
    assert_eq!(d.strftime("%A, %B %-d, %Y")?, "Sunday, July 14, 2024");
    assert_eq!(d.strftime(layout::ISO_WEEK_DATE)?, "2024-W28-7");
    assert_eq!(d.strftime(layout::ISO_ORDINAL_DATE)?, "2024-196");

    let t = time(15, 4, 0, 0);
    assert_eq!(t.strftime(layout::KITCHEN)?, "3:04PM");

    let dt = datetime(2024, 7, 14, 16, 24, 0, 123_000_000);
    assert_eq!(dt.strftime("%a %b %d %I:%M %p %Y")?, "Sun Jul 14 04:24 PM 2024");
    assert_eq!(dt.to_string(), "2024-07-14T16:24:00.123");

    let odt = OffsetDateTime::constant(2024, 7, 14, 16, 24, 0, 0, -4, 0);
    assert_eq!(odt.strftime(layout::RFC1123)?, "Sun, 14 Jul 2024 16:24:00 -0400");
    assert_eq!(odt.strftime(layout::ISO_OFFSET_DATETIME_BASIC)?, "20240714T162400-0400");
    Ok(())
}

#[test]
fn format_with_pieces() -> Result {
    let pieces = Pieces::new().date(date(2024, 7, 14)).offset(Offset::constant(5, 30));
    assert_eq!(layout::format("%Y-%m-%d %Ez", pieces)?, "2024-07-14 +05:30");
    Ok(())
}

#[test]
fn parse_each_value_type() -> Result {
    let t = LocalTime::strptime("%I:%M:%S %p", "04:24:05 pm")?;
    assert_eq!(t, time(16, 24, 5, 0));

    let dt = LocalDateTime::strptime("%Y%m%dT%H%M%S", "20240714T162400")?;
    assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 0, 0));

    let odt = OffsetDateTime::strptime(layout::RFC1123, "Sun, 14 Jul 2024 16:24:00 -0400")?;
    assert_eq!(odt.offset(), Offset::constant(-4, 0));
    assert_eq!(odt.to_utc()?.to_string(), "2024-07-14T20:24:00Z");
    Ok(())
}

#[test]
fn iso_parsing_via_from_str() -> Result {
    let expected = date(2024, 7, 14);
    for input in ["2024-07-14", "20240714", "2024-196", "2024-W28-7"] {
        assert_eq!(input.parse::<LocalDate>()?, expected);
    }
    let odt: OffsetDateTime = "2007-05-20T12:30:15+02:30".parse()?;
    assert_eq!(odt, OffsetDateTime::constant(2007, 5, 20, 12, 30, 15, 0, 2, 30));
    let t: LocalTime = "25:00:00".parse()?;
    assert_eq!(t.business_hour(), 25);
    Ok(())
}

#[test]
fn error_predicates() {
    let err = LocalDate::strptime("%Y-%m-%d", "2024-07-15 extra").unwrap_err();
    assert!(err.is_unconsumed_input());
    assert!(err.is_syntax());

    let err = LocalDate::strptime("%Y/%m/%d", "2024-07-15").unwrap_err();
    assert!(err.is_literal_mismatch());

    let err = LocalDate::strptime("%Y-%m-%d", "2024-13-01").unwrap_err();
    assert!(err.is_range());
    assert!(!err.is_syntax());

    let err = LocalDate::strptime("%Y-%m-%d %A", "2024-07-14 Monday").unwrap_err();
    assert!(err.is_mismatch());

    // A redundant field that cannot exist in the parsed year disagrees with
    // the date; as the only source of the date it is out of range.
    let err = LocalDate::strptime("%Y-%m-%d %j", "2023-03-01 366").unwrap_err();
    assert!(err.is_mismatch());
    assert!(!err.is_invalid_date());
    let err = LocalDate::strptime("%Y-%m-%d %G-W%V-%u", "2021-03-01 2021-W53-1")
        .unwrap_err();
    assert!(err.is_mismatch());
    let err = LocalDate::strptime("%Y-%j", "2023-366").unwrap_err();
    assert!(err.is_invalid_date());
    assert!(!err.is_mismatch());
    let err = LocalDate::strptime("%G-W%V-%u", "2021-W53-1").unwrap_err();
    assert!(err.is_invalid_date());

    assert!(Layout::new("%Q").unwrap_err().is_syntax());
}

#[test]
#[should_panic(expected = "requires a UTC offset")]
fn missing_offset_panics() {
    let _ = date(2024, 7, 14).strftime("%Y %z");
}
