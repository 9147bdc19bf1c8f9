use tempora::{
    civil::{date, time, LocalDate, LocalDateTime, LocalTime},
    Extent, Interval, OffsetDateTime, Period,
};

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Shift {
    day: LocalDate,
    starts: LocalTime,
    length: Extent,
    every: Period,
}

#[test]
fn struct_roundtrip() {
    let shift = Shift {
        day: date(2024, 7, 14),
        starts: time(22, 0, 0, 0),
        length: Extent::from_hours(8),
        every: Period::new().weeks(1),
    };
    let json = serde_json::to_string(&shift).unwrap();
    assert_eq!(
        json,
        r#"{"day":"2024-07-14","starts":"22:00:00","length":"PT8H","every":"P1W"}"#,
    );
    let got: Shift = serde_json::from_str(&json).unwrap();
    assert_eq!(got, shift);
}

#[test]
fn offset_datetimes_and_intervals() {
    let odt: OffsetDateTime =
        serde_json::from_str(r#""2007-05-20T12:30:15+02:30""#).unwrap();
    assert_eq!(odt, OffsetDateTime::constant(2007, 5, 20, 10, 0, 15, 0, 0, 0));

    let interval: Interval =
        serde_json::from_str(r#""R2/2024-01-01T00:00:00Z/P1D""#).unwrap();
    assert_eq!(
        serde_json::to_string(&interval).unwrap(),
        r#""R2/2024-01-01T00:00:00Z/P1D""#,
    );
}

#[test]
fn invalid_strings() {
    let err = serde_json::from_str::<LocalDate>(r#""2023-02-29""#).unwrap_err();
    assert!(err.is_data());
    let err = serde_json::from_str::<Period>(r#""PT1H""#).unwrap_err();
    assert!(err.is_data());
}

#[test]
fn five_digit_and_extreme_years() {
    for day in [date(12345, 1, 2), LocalDate::MIN, LocalDate::MAX] {
        let json = serde_json::to_string(&day).unwrap();
        let got: LocalDate = serde_json::from_str(&json).unwrap();
        assert_eq!(got, day);
    }
    let max: LocalDateTime =
        serde_json::from_str(r#""5874898-06-03T23:59:59.999999999""#).unwrap();
    assert_eq!(max, LocalDateTime::MAX);
}
