use tempora::{civil::datetime, tz::Offset, Extent, Interval, Period, Repeat};

use crate::Result;

#[test]
fn start_and_duration() -> Result {
    let interval: Interval = "2020-03-18T00:00:00Z/P20D".parse()?;
    assert!(interval.has_start());
    assert!(interval.has_duration());
    assert!(!interval.has_end());
    assert_eq!(interval.end()?.to_string(), "2020-04-07T00:00:00Z");
    assert_eq!(interval.duration(), (Period::new().days(20), Extent::ZERO));
    Ok(())
}

#[test]
fn duration_and_end() -> Result {
    let interval: Interval = "P1Y2M10DT2H30M/2008-05-11T15:30:00Z".parse()?;
    assert_eq!(interval.start()?.to_string(), "2007-03-01T13:00:00Z");
    assert_eq!(interval.end()?.to_string(), "2008-05-11T15:30:00Z");
    Ok(())
}

#[test]
fn two_endpoints() -> Result {
    let start = datetime(2024, 7, 14, 12, 0, 0, 0).to_offset(Offset::constant(2, 0));
    let end = datetime(2024, 7, 14, 12, 0, 0, 0).to_offset(Offset::UTC);
    let interval = Interval::between(start, end);
    assert_eq!(interval.duration(), (Period::ZERO, Extent::from_hours(2)));
    assert_eq!(
        interval.to_string(),
        "2024-07-14T12:00:00+02:00/2024-07-14T12:00:00Z",
    );
    let parsed: Interval = interval.to_string().parse()?;
    assert_eq!(parsed, interval);
    Ok(())
}

#[test]
fn repeating() -> Result {
    let interval: Interval = "R12/2024-01-01T09:00:00Z/PT30M".parse()?;
    assert_eq!(interval.repetitions(), Some(Repeat::Count(12)));
    assert_eq!(interval.to_string(), "R12/2024-01-01T09:00:00Z/PT30M");

    let interval: Interval = "R/P1W".parse()?;
    assert_eq!(interval.repetitions(), Some(Repeat::Unbounded));
    assert!(!interval.has_start());
    Ok(())
}

#[test]
fn unsupported_representations() -> Result {
    let interval: Interval = "P1D".parse()?;
    assert!(interval.start().unwrap_err().is_unsupported_representation());
    assert!(interval.end().unwrap_err().is_unsupported_representation());

    let interval: Interval = "2020-01-01T00:00:00Z/P1.5D".parse()?;
    assert!(interval.end().unwrap_err().is_unsupported_representation());
    Ok(())
}

#[test]
fn syntax_errors() {
    assert!("P1D/P2D".parse::<Interval>().unwrap_err().is_syntax());
    assert!("R2P1D".parse::<Interval>().unwrap_err().is_syntax());
    assert!("2020-01-01".parse::<Interval>().is_err());
}
