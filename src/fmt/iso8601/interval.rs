use crate::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    error::{fmt::iso8601::Error as E, Error, ErrorContext},
    fmt::{
        iso8601::{parse_parts, DurationPrinter},
        layout::IsoPrinter,
        Write, WriteExt,
    },
    interval::{Interval, Repeat, Shape},
    tz::Offset,
    util::parse,
    Extent, OffsetDateTime, Period,
};

/// Parses an ISO 8601 interval, with an optional `Rn/` prefix.
pub(crate) fn parse_interval(input: &str) -> Result<Interval, Error> {
    let (repeat, offset) = parse_repeat(input)?;
    let body = &input[offset..];
    let (first, second) = match split(body) {
        Some(parts) => parts,
        None => {
            let parsed = parse_parts(body)
                .context(E::IntervalMissingSeparator)?;
            let interval = Interval::of(parsed.period, parsed.extent);
            return Ok(with_repeat(interval, repeat));
        }
    };
    let (start, end) = (offset, offset + body.len() - second.len());
    let shape = match (is_duration(first), is_duration(second)) {
        (true, true) => return Err(Error::from(E::IntervalTwoDurations)),
        (false, false) => Shape::StartEnd(
            parse_endpoint(first, start)?,
            parse_endpoint(second, end)?,
        ),
        (false, true) => {
            let parsed = parse_parts(second)?;
            Shape::StartDuration(
                parse_endpoint(first, start)?,
                parsed.period,
                parsed.extent,
            )
        }
        (true, false) => {
            let parsed = parse_parts(first)?;
            Shape::DurationEnd(
                parsed.period,
                parsed.extent,
                parse_endpoint(second, end)?,
            )
        }
    };
    Ok(with_repeat(Interval::from_shape(shape), repeat))
}

fn with_repeat(interval: Interval, repeat: Option<Repeat>) -> Interval {
    match repeat {
        None => interval,
        Some(repeat) => interval.with_repetitions(repeat),
    }
}

/// Returns the repetition count and the offset at which the rest of the
/// interval begins.
fn parse_repeat(input: &str) -> Result<(Option<Repeat>, usize), Error> {
    if !input.starts_with(['R', 'r']) {
        return Ok((None, 0));
    }
    let (digits, rest) =
        parse::split_while(&input[1..], usize::MAX, |b| b.is_ascii_digit());
    let position = 1 + digits.len();
    let separator = if rest.starts_with('/') {
        1
    } else if rest.starts_with("--") {
        2
    } else {
        return Err(Error::from(E::IntervalRepetition { position }));
    };
    let repeat = if digits.is_empty() {
        Repeat::Unbounded
    } else {
        let count = parse::i64(digits.as_bytes())
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(E::IntervalRepetition { position: 1 })?;
        Repeat::Count(count)
    };
    Ok((Some(repeat), position + separator))
}

/// Splits on the first `/`, or failing that, on the first `--`.
fn split(body: &str) -> Option<(&str, &str)> {
    if let Some(i) = body.find('/') {
        return Some((&body[..i], &body[i + 1..]));
    }
    body.find("--").map(|i| (&body[..i], &body[i + 2..]))
}

fn is_duration(part: &str) -> bool {
    let part = part.strip_prefix(['-', '+']).unwrap_or(part);
    part.starts_with(['P', 'p'])
}

/// Parses an endpoint as an offset datetime, a datetime in UTC or a date at
/// midnight UTC, in that order.
fn parse_endpoint(
    part: &str,
    position: usize,
) -> Result<OffsetDateTime, Error> {
    let first_err = match part.parse::<OffsetDateTime>() {
        Ok(odt) => return Ok(odt),
        Err(err) => err,
    };
    if let Ok(dt) = part.parse::<LocalDateTime>() {
        return Ok(dt.to_offset(Offset::UTC));
    }
    if let Ok(date) = part.parse::<LocalDate>() {
        let dt = date.to_datetime(LocalTime::MIDNIGHT)?;
        return Ok(dt.to_offset(Offset::UTC));
    }
    Err(first_err).context(E::IntervalEndpoint { position })
}

/// Prints an interval with `/` separators.
pub(crate) fn print_interval<W: Write>(
    interval: &Interval,
    mut wtr: W,
) -> Result<(), Error> {
    match interval.repetitions() {
        None => {}
        Some(Repeat::Unbounded) => wtr.write_str("R/")?,
        Some(Repeat::Count(n)) => {
            wtr.write_str("R")?;
            wtr.write_int(&crate::fmt::util::DecimalFormatter::new(), n)?;
            wtr.write_str("/")?;
        }
    }
    let iso = IsoPrinter::new();
    let durations = DurationPrinter::new();
    match interval.shape() {
        Shape::StartEnd(start, end) => {
            iso.print_offset_datetime(start, &mut wtr)?;
            wtr.write_str("/")?;
            iso.print_offset_datetime(end, &mut wtr)
        }
        Shape::StartDuration(start, period, extent) => {
            iso.print_offset_datetime(start, &mut wtr)?;
            wtr.write_str("/")?;
            print_duration(&durations, &period, extent, &mut wtr)
        }
        Shape::DurationEnd(period, extent, end) => {
            print_duration(&durations, &period, extent, &mut wtr)?;
            wtr.write_str("/")?;
            iso.print_offset_datetime(end, &mut wtr)
        }
        Shape::Duration(period, extent) => {
            print_duration(&durations, &period, extent, &mut wtr)
        }
    }
}

/// A period alone prints like `Period`, and an extent alone prints like
/// `Extent`, so `PT0S` never becomes `P0D`.
fn print_duration<W: Write>(
    printer: &DurationPrinter,
    period: &Period,
    extent: Extent,
    wtr: W,
) -> Result<(), Error> {
    if period.is_zero() && !extent.is_zero() {
        printer.print_extent(extent, wtr)
    } else {
        printer.print_duration(period, extent, wtr)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn shapes() {
        let interval =
            parse_interval("2007-03-01T13:00:00Z/2008-05-11T15:30:00Z").unwrap();
        assert!(interval.has_start() && interval.has_end());
        assert_eq!(
            interval.to_string(),
            "2007-03-01T13:00:00Z/2008-05-11T15:30:00Z",
        );

        let interval =
            parse_interval("2007-03-01T13:00:00+01:00/P1Y2M10DT2H30M").unwrap();
        assert_eq!(
            interval.end().unwrap().to_string(),
            "2008-05-11T15:30:00+01:00",
        );

        let interval = parse_interval("P1Y2M10DT2H30M/2008-05-11T15:30:00Z")
            .unwrap();
        assert_eq!(interval.start().unwrap().to_string(), "2007-03-01T13:00:00Z");

        let interval = parse_interval("P1Y2M10DT2H30M").unwrap();
        assert!(!interval.has_start() && !interval.has_end());
        assert_eq!(interval.to_string(), "P1Y2M10DT2H30M");
    }

    #[test]
    fn separators_and_defaults() {
        let interval = parse_interval("2020-03-18--P20D").unwrap();
        assert_eq!(interval.to_string(), "2020-03-18T00:00:00Z/P20D");
        assert_eq!(interval.end().unwrap().to_string(), "2020-04-07T00:00:00Z");

        let interval = parse_interval("2020-03-18T12:00:00/PT1H").unwrap();
        assert_eq!(interval.to_string(), "2020-03-18T12:00:00Z/PT1H");

        let interval = parse_interval("R5--P1D").unwrap();
        assert_eq!(interval.repetitions(), Some(Repeat::Count(5)));
        assert_eq!(interval.to_string(), "R5/P1D");
        let interval = parse_interval("R5--2020-03-18--P20D").unwrap();
        assert_eq!(interval.to_string(), "R5/2020-03-18T00:00:00Z/P20D");
        assert_eq!(
            parse_interval("R--PT10M").unwrap().repetitions(),
            Some(Repeat::Unbounded),
        );
        assert!(parse_interval("R5-P1D").is_err());
    }

    #[test]
    fn repetitions() {
        let interval = parse_interval("R5/2008-03-01T13:00:00Z/P1D").unwrap();
        assert_eq!(interval.repetitions(), Some(Repeat::Count(5)));
        assert_eq!(interval.to_string(), "R5/2008-03-01T13:00:00Z/P1D");

        let interval = parse_interval("r/PT10M").unwrap();
        assert_eq!(interval.repetitions(), Some(Repeat::Unbounded));
        assert_eq!(interval.to_string(), "R/PT10M");
    }

    #[test]
    fn errors() {
        let err = |input: &str| parse_interval(input).unwrap_err().to_string();

        insta::assert_snapshot!(
            err("R5P1D"),
            @"invalid repetition count at position 2, expected `R`, optional digits and a separator",
        );
        insta::assert_snapshot!(
            err("R99999999999/P1D"),
            @"invalid repetition count at position 1, expected `R`, optional digits and a separator",
        );
        insta::assert_snapshot!(
            err("P1D/PT1H"),
            @"an interval cannot be made of two durations",
        );
        insta::assert_snapshot!(
            err("2020-01-01"),
            @"an interval without a `/` or `--` separator must be a single duration: unexpected character '2' at position 0, expected `P` to begin a duration",
        );
        let e = parse_interval("2020-01-01T00:00:00Z/2020-13-01").unwrap_err();
        assert!(e.to_string().starts_with(
            "failed to parse interval endpoint at position 21: ",
        ));
    }
}
