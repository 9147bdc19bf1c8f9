use crate::{
    error::{fmt::iso8601::Error as E, Error},
    fmt::{
        iso8601::{Designators, TimeUnit},
        util::{DecimalFormatter, FractionalFormatter},
        Write, WriteExt,
    },
    util::{itime::NANOS_PER_SECOND, parse},
    Extent, Period,
};

/// The result of parsing a duration.
#[derive(Debug)]
pub(crate) struct ParsedDuration {
    pub(crate) period: Period,
    pub(crate) extent: Extent,
    /// Whether a `T` was present.
    pub(crate) has_time: bool,
}

/// Parses all of `input` as a duration.
pub(crate) fn parse_parts(input: &str) -> Result<ParsedDuration, Error> {
    let mut parser = DurationParser { input, pos: 0 };
    let parsed = parser.parse()?;
    if let Some(found) = parse::first(&input[parser.pos..]) {
        return Err(Error::from(E::UnexpectedTrailing {
            found,
            position: parser.pos,
        }));
    }
    Ok(parsed)
}

struct DurationParser<'i> {
    input: &'i str,
    pos: usize,
}

/// A number read before a designator. `fraction` holds the digits after
/// the decimal mark, if any.
struct Number<'i> {
    integer: &'i str,
    fraction: Option<&'i str>,
    start: usize,
}

const DATE_DESIGNATORS: &str = "Y, M, W or D";
const TIME_DESIGNATORS: &str = "H, M or S";

impl<'i> DurationParser<'i> {
    fn parse(&mut self) -> Result<ParsedDuration, Error> {
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        match self.peek() {
            Some(b'P' | b'p') => self.pos += 1,
            _ => {
                return Err(Error::from(E::ExpectedDesignatorP {
                    found: self.found(),
                    position: self.pos,
                }))
            }
        }
        let start = self.pos;
        let mut period = self.parse_date_part()?;
        let mut has_time = false;
        let mut nanos = 0;
        if matches!(self.peek(), Some(b'T' | b't')) {
            self.pos += 1;
            has_time = true;
            nanos = self.parse_time_part()?;
        }
        if self.pos == start {
            return Err(Error::from(E::EmptyDuration { position: self.pos }));
        }
        if negative {
            period = period.negate();
            nanos = -nanos;
        }
        // The magnitude was checked while accumulating, and negating a
        // value in range stays in range.
        let extent = Extent::from_wide_nanos(nanos);
        Ok(ParsedDuration { period, extent, has_time })
    }

    fn parse_date_part(&mut self) -> Result<Period, Error> {
        let mut period = Period::ZERO;
        // Index into `YMWD` of the last designator seen.
        let mut last: Option<usize> = None;
        let mut seen_ymd = false;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            let number = self.parse_number()?;
            let position = self.pos;
            let designator = match self.peek() {
                Some(byte) => byte.to_ascii_uppercase(),
                None => {
                    return Err(Error::from(E::ExpectedDesignator {
                        found: None,
                        expected: DATE_DESIGNATORS,
                        position,
                    }))
                }
            };
            let index = match designator {
                b'Y' => 0,
                b'M' => 1,
                b'W' => 2,
                b'D' => 3,
                _ => {
                    return Err(Error::from(E::ExpectedDesignator {
                        found: self.found(),
                        expected: DATE_DESIGNATORS,
                        position,
                    }))
                }
            };
            if last.map_or(false, |last| index <= last) {
                return Err(Error::from(E::OutOfOrder {
                    designator: char::from(designator),
                    expected: DATE_DESIGNATORS,
                    position,
                }));
            }
            if (index == 2 && seen_ymd) || (index != 2 && last == Some(2)) {
                return Err(Error::from(E::WeeksMixed { position }));
            }
            self.pos += 1;
            last = Some(index);
            seen_ymd |= index != 2;

            let value = number.to_f64()?;
            period = match index {
                0 => period.years(value),
                1 => period.months(value),
                2 => period.weeks(value),
                _ => period.days(value),
            };
        }
        Ok(period)
    }

    /// Returns the magnitude of the time part in nanoseconds.
    fn parse_time_part(&mut self) -> Result<i128, Error> {
        let max = Extent::MAX.as_nanos();
        let mut total: i128 = 0;
        let mut last: Option<TimeUnit> = None;
        let mut fractional_at: Option<usize> = None;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            let number = self.parse_number()?;
            if fractional_at.is_some() {
                return Err(Error::from(E::FractionNotLast {
                    position: number.start,
                }));
            }
            let position = self.pos;
            let unit = match self.peek().map(|b| b.to_ascii_uppercase()) {
                Some(b'H') => TimeUnit::Hour,
                Some(b'M') => TimeUnit::Minute,
                Some(b'S') => TimeUnit::Second,
                _ => {
                    return Err(Error::from(E::ExpectedDesignator {
                        found: self.found(),
                        expected: TIME_DESIGNATORS,
                        position,
                    }))
                }
            };
            if last.map_or(false, |last| unit.nanos() >= last.nanos()) {
                return Err(Error::from(E::OutOfOrder {
                    designator: unit.designator(),
                    expected: TIME_DESIGNATORS,
                    position,
                }));
            }
            self.pos += 1;
            last = Some(unit);

            let overflow = || E::Overflow { position };
            let integer = parse::i64(number.integer.as_bytes())
                .map_err(|_| overflow())?;
            let mut nanos = i128::from(integer) * unit.nanos();
            if let Some(fraction) = number.fraction {
                if fraction.len() > 9 {
                    return Err(Error::from(E::FractionTooLong {
                        position: number.start,
                    }));
                }
                let fraction = i128::from(parse::fraction(fraction.as_bytes())?);
                nanos += fraction * unit.nanos() / i128::from(NANOS_PER_SECOND);
                fractional_at = Some(number.start);
            }
            total = total.checked_add(nanos).ok_or_else(overflow)?;
            if total > max {
                return Err(Error::from(overflow()));
            }
        }
        if last.is_none() {
            return Err(Error::from(E::EmptyTime { position: self.pos }));
        }
        Ok(total)
    }

    /// Parses digits with an optional fraction, leaving the parser on the
    /// byte after the number.
    fn parse_number(&mut self) -> Result<Number<'i>, Error> {
        let start = self.pos;
        let (integer, _) =
            parse::split_while(self.rest(), usize::MAX, |b| b.is_ascii_digit());
        if integer.is_empty() {
            return Err(Error::from(E::ExpectedNumber {
                found: self.found(),
                position: self.pos,
            }));
        }
        self.pos += integer.len();
        if !matches!(self.peek(), Some(b'.' | b',')) {
            return Ok(Number { integer, fraction: None, start });
        }
        self.pos += 1;
        let (fraction, _) =
            parse::split_while(self.rest(), usize::MAX, |b| b.is_ascii_digit());
        if fraction.is_empty() {
            return Err(Error::from(E::ExpectedNumber {
                found: self.found(),
                position: self.pos,
            }));
        }
        self.pos += fraction.len();
        Ok(Number { integer, fraction: Some(fraction), start })
    }

    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn found(&self) -> Option<char> {
        parse::first(self.rest())
    }
}

impl<'i> Number<'i> {
    fn to_f64(&self) -> Result<f64, Error> {
        let value = match self.fraction {
            None => self.integer.parse::<f64>(),
            Some(fraction) => {
                alloc::format!("{}.{}", self.integer, fraction).parse::<f64>()
            }
        };
        // Only ASCII digits reach this point.
        value.map_err(|_| Error::from(E::ExpectedNumber {
            found: parse::first(self.integer),
            position: self.start,
        }))
    }
}

/// Prints periods, extents and combinations of both as ISO 8601 durations.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DurationPrinter {
    _priv: (),
}

impl DurationPrinter {
    pub(crate) fn new() -> DurationPrinter {
        DurationPrinter { _priv: () }
    }

    /// Prints a time-only duration. Zero is `PT0S`.
    pub(crate) fn print_extent<W: Write>(
        &self,
        extent: Extent,
        mut wtr: W,
    ) -> Result<(), Error> {
        if extent.is_zero() {
            return wtr.write_str("PT0S");
        }
        if extent.is_negative() {
            wtr.write_str("-")?;
        }
        wtr.write_str("PT")?;
        self.print_time_units(extent.as_nanos().abs(), "", &mut wtr)
    }

    /// Prints a calendar-only duration. Zero is `P0D`.
    pub(crate) fn print_period<W: Write>(
        &self,
        period: &Period,
        wtr: W,
    ) -> Result<(), Error> {
        self.print_duration(period, Extent::ZERO, wtr)
    }

    /// Prints both parts. When every component is zero or negative, a
    /// single leading `-` is used. Otherwise, each component carries its
    /// own sign.
    pub(crate) fn print_duration<W: Write>(
        &self,
        period: &Period,
        extent: Extent,
        mut wtr: W,
    ) -> Result<(), Error> {
        if period.is_zero() && extent.is_zero() {
            return wtr.write_str("P0D");
        }
        let period =
            if period.mixes_weeks() { period.normalize_weeks() } else { *period };
        let components = [
            (period.get_years(), 'Y'),
            (period.get_months(), 'M'),
            (period.get_weeks(), 'W'),
            (period.get_days(), 'D'),
        ];
        // Both parts are known not to be zero at this point.
        let negative = components.iter().all(|&(n, _)| n <= 0.0)
            && (extent.is_zero() || extent.is_negative());
        if negative {
            wtr.write_str("-")?;
        }
        wtr.write_str("P")?;
        for (n, designator) in components {
            if n == 0.0 {
                continue;
            }
            let n = if negative { -n } else { n };
            wtr.write_str(&alloc::format!("{n}"))?;
            wtr.write_char(designator)?;
        }
        if !extent.is_zero() {
            wtr.write_str("T")?;
            let sign = if extent.is_negative() && !negative { "-" } else { "" };
            self.print_time_units(extent.as_nanos().abs(), sign, &mut wtr)?;
        }
        Ok(())
    }

    /// Prints exactly the chosen designators, folding coarser units into
    /// the first and finer units into the fraction of the last.
    pub(crate) fn print_designated<W: Write>(
        &self,
        extent: Extent,
        designators: &Designators,
        mut wtr: W,
    ) -> Result<(), Error> {
        if designators.is_empty() {
            return self.print_extent(extent, wtr);
        }
        if extent.is_negative() {
            wtr.write_str("-")?;
        }
        wtr.write_str("PT")?;
        let mut remaining = extent.as_nanos().abs();
        let mut units = designators.units().peekable();
        while let Some(unit) = units.next() {
            let size = unit.nanos();
            let whole = remaining / size;
            remaining %= size;
            self.print_wide(whole, &mut wtr)?;
            if units.peek().is_none() && remaining != 0 {
                let nanos = remaining * i128::from(NANOS_PER_SECOND) / size;
                // Always less than one second's worth of nanoseconds.
                let digits =
                    FractionalFormatter::new().format(nanos as i32);
                if !digits.is_empty() {
                    wtr.write_str(".")?;
                    wtr.write_str(digits.as_str())?;
                }
            }
            wtr.write_char(unit.designator())?;
        }
        Ok(())
    }

    /// Prints the run of units from the first non-zero one to the last.
    /// `nanos` must be positive.
    fn print_time_units<W: Write>(
        &self,
        nanos: i128,
        sign: &str,
        mut wtr: W,
    ) -> Result<(), Error> {
        let hour = TimeUnit::Hour.nanos();
        let minute = TimeUnit::Minute.nanos();
        let second = TimeUnit::Second.nanos();
        let hours = nanos / hour;
        let minutes = nanos % hour / minute;
        let seconds = nanos % minute / second;
        let subsec = (nanos % second) as i32;

        let nonzero = [hours != 0, minutes != 0, seconds != 0 || subsec != 0];
        let first = nonzero.iter().position(|&b| b).unwrap_or(2);
        let last = nonzero.iter().rposition(|&b| b).unwrap_or(2);
        for index in first..=last {
            wtr.write_str(sign)?;
            match index {
                0 => {
                    self.print_wide(hours, &mut wtr)?;
                    wtr.write_str("H")?;
                }
                1 => {
                    self.print_wide(minutes, &mut wtr)?;
                    wtr.write_str("M")?;
                }
                _ => {
                    self.print_wide(seconds, &mut wtr)?;
                    if subsec != 0 {
                        wtr.write_str(".")?;
                        wtr.write_fraction(&FractionalFormatter::new(), subsec)?;
                    }
                    wtr.write_str("S")?;
                }
            }
        }
        Ok(())
    }

    /// Prints a non-negative count, which may exceed `i64` when the
    /// duration is an extent measured in small units.
    fn print_wide<W: Write>(&self, n: i128, mut wtr: W) -> Result<(), Error> {
        match i64::try_from(n) {
            Ok(n) => wtr.write_int(&DecimalFormatter::new(), n),
            Err(_) => wtr.write_str(&alloc::format!("{n}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use crate::Duration;

    use super::*;

    fn print(period: &Period, extent: Extent) -> String {
        let mut buf = String::new();
        DurationPrinter::new().print_duration(period, extent, &mut buf).unwrap();
        buf
    }

    fn designated(extent: Extent, designators: Designators) -> String {
        let mut buf = String::new();
        DurationPrinter::new()
            .print_designated(extent, &designators, &mut buf)
            .unwrap();
        buf
    }

    #[test]
    fn print_combined() {
        let period = Period::new().years(3).months(6).days(4);
        let extent = Extent::from_secs(5_405);
        assert_eq!(print(&period, extent), "P3Y6M4DT1H30M5S");
        assert_eq!(print(&period, Extent::ZERO), "P3Y6M4D");
        assert_eq!(print(&Period::ZERO, extent), "PT1H30M5S");
        assert_eq!(print(&period.negate(), -extent), "-P3Y6M4DT1H30M5S");
        assert_eq!(print(&period, -extent), "P3Y6M4DT-1H-30M-5S");
        assert_eq!(print(&Period::ZERO, Extent::from_secs(3_600)), "PT1H");
        assert_eq!(print(&Period::ZERO, Extent::from_secs(5)), "PT5S");
        assert_eq!(print(&Period::ZERO, Extent::from_nanos(1)), "PT0.000000001S");
    }

    #[test]
    fn print_exclusive() {
        let extent = Extent::from_millis(4_530_600);
        let hm = Designators::new().hours(true).minutes(true);
        assert_eq!(designated(extent, hm), "PT1H15.51M");
        let h = Designators::new().hours(true);
        assert_eq!(designated(extent, h), "PT1.2585H");
        let hs = Designators::new().hours(true).seconds(true);
        assert_eq!(designated(extent, hs), "PT1H930.6S");
        let all = hs.minutes(true);
        assert_eq!(designated(Extent::from_secs(300), all), "PT0H5M0S");
        assert_eq!(designated(-extent, hm), "-PT1H15.51M");
        assert_eq!(designated(extent, Designators::new()), "PT1H15M30.6S");
        // Folding truncates past nanosecond precision.
        let third = Extent::from_secs(20);
        let m = Designators::new().minutes(true);
        assert_eq!(designated(third, m), "PT0.333333333M");
    }

    #[test]
    fn parse_ok() {
        let parsed = parse_parts("P3Y6M4DT1M5S").unwrap();
        assert_eq!(parsed.period, Period::new().years(3).months(6).days(4));
        assert_eq!(parsed.extent, Extent::from_secs(65));
        assert!(parsed.has_time);

        let parsed = parse_parts("-pt1h0.5m").unwrap();
        assert_eq!(parsed.extent, -Extent::from_secs(3_630));
        assert!(parsed.period.is_zero());

        let parsed = parse_parts("P1.5Y").unwrap();
        assert_eq!(parsed.period.get_years(), 1.5);
        assert!(!parsed.has_time);

        let parsed = parse_parts("PT0.000000001S").unwrap();
        assert_eq!(parsed.extent, Extent::from_nanos(1));
    }

    #[test]
    fn parse_errors() {
        let err = |input: &str| parse_parts(input).unwrap_err().to_string();

        insta::assert_snapshot!(
            err("1Y"),
            @"unexpected character '1' at position 0, expected `P` to begin a duration",
        );
        insta::assert_snapshot!(
            err("P"),
            @"expected at least one duration component at position 1",
        );
        insta::assert_snapshot!(
            err("P1YT"),
            @"expected at least one of H, M or S after `T` at position 4",
        );
        insta::assert_snapshot!(
            err("P1D1Y"),
            @"designator 'Y' at position 4 is repeated or out of order, expected one of Y, M, W or D",
        );
        insta::assert_snapshot!(
            err("PT1S1M"),
            @"designator 'M' at position 5 is repeated or out of order, expected one of H, M or S",
        );
        insta::assert_snapshot!(
            err("P1Y2W"),
            @"week designator at position 4 cannot be combined with years, months or days",
        );
        insta::assert_snapshot!(
            err("PT1.5H2M"),
            @"found component at position 6 after a fractional time component, which must be the last one",
        );
        insta::assert_snapshot!(
            err("PT0.1234567891S"),
            @"fraction at position 2 has more than 9 digits of precision",
        );
        insta::assert_snapshot!(
            err("P1.D"),
            @"unexpected character 'D' at position 3, expected a number",
        );
        insta::assert_snapshot!(
            err("P1Y x"),
            @"unexpected character ' ' at position 3 after the end of the duration",
        );
        insta::assert_snapshot!(
            err("PT1"),
            @"expected one of H, M or S at position 3, but reached end of input",
        );
        insta::assert_snapshot!(
            err("PT9223372036854775807H"),
            @"duration component ending at position 21 overflows the range of a duration",
        );
    }

    #[test]
    fn overflow_is_distinct() {
        let err = parse_parts("PT9223372036854775807H").unwrap_err();
        assert!(err.is_duration_overflow());
        assert!(!err.is_syntax());
        let err = parse_parts("PT1X").unwrap_err();
        assert!(err.is_syntax());
        assert!(!err.is_duration_overflow());
    }

    quickcheck::quickcheck! {
        fn prop_print_parse_roundtrip(d: Duration, years: i16, days: i16) -> bool {
            let period = Period::new().years(years).days(days);
            let extent = d.to_extent();
            let mut buf = String::new();
            DurationPrinter::new().print_duration(&period, extent, &mut buf).unwrap();
            let mixed = (years > 0 || days > 0) && d.is_negative()
                || (years < 0 || days < 0) && !d.is_negative() && !d.is_zero()
                || years.signum() * days.signum() < 0;
            if mixed {
                // Components with different signs print but do not parse.
                return true;
            }
            let parsed = parse_parts(&buf).unwrap();
            parsed.period == period && parsed.extent == extent
        }
    }
}
