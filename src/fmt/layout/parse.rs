use crate::{
    civil::{Era, Weekday},
    error::{fmt::layout::Error as E, Error, ErrorContext},
    fmt::layout::{
        Directive, Fields, Item, Kind, Layout, Meridiem, MONTH_NAMES,
    },
    tz::Offset,
    util::{
        itime::{YEAR_MAX, YEAR_MIN},
        parse,
    },
};

pub(super) struct Parser<'l, 'i, 'f> {
    pub(super) layout: &'l Layout,
    pub(super) input: &'i str,
    pub(super) pos: usize,
    pub(super) fields: &'f mut Fields,
}

impl<'l, 'i, 'f> Parser<'l, 'i, 'f> {
    pub(super) fn parse(&mut self) -> Result<(), Error> {
        let layout = self.layout;
        for (i, item) in layout.items.iter().enumerate() {
            match *item {
                Item::Literal(ref range) => {
                    self.parse_literal(&layout.source[range.clone()])?
                }
                Item::Directive(ref directive) => {
                    let position = self.pos;
                    let abutting = matches!(
                        layout.items.get(i + 1),
                        Some(Item::Directive(_))
                    );
                    self.parse_directive(directive, abutting).with_context(
                        || E::Specifier {
                            sequence: directive.sequence(layout).into(),
                            position,
                        },
                    )?;
                }
            }
        }
        if !self.rest().is_empty() {
            return Err(Error::from(E::UnconsumedInput {
                remaining: self.rest().into(),
                position: self.pos,
            }));
        }
        Ok(())
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), Error> {
        for expected in literal.chars() {
            match parse::first(self.rest()) {
                None => {
                    return Err(Error::from(E::LiteralEndOfInput {
                        expected,
                        position: self.pos,
                    }))
                }
                Some(found) if found == expected => {
                    self.pos += found.len_utf8();
                }
                Some(_) => {
                    return Err(Error::from(E::LiteralMismatch {
                        expected,
                        remaining: self.rest().into(),
                        position: self.pos,
                    }))
                }
            }
        }
        Ok(())
    }

    fn parse_directive(
        &mut self,
        directive: &Directive,
        abutting: bool,
    ) -> Result<(), Error> {
        let max = directive.max_digits(abutting);
        match directive.kind {
            Kind::Percent => self.parse_literal("%")?,
            Kind::Year => {
                let year = self.signed_digits(max)?;
                self.fields.year =
                    Some(ranged("year", year, YEAR_MIN, YEAR_MAX)?);
            }
            Kind::Year2 => {
                let yy = self.digits(max)?;
                self.fields.year2 =
                    Some(ranged("two-digit year", yy, 0, 99)?);
            }
            Kind::Century => {
                let century = self.signed_digits(max)?;
                let (min, max) = (YEAR_MIN / 100, YEAR_MAX / 100);
                self.fields.century =
                    Some(ranged("century", century, min, max)?);
            }
            Kind::DayOfYear => {
                let day = self.digits(max)?;
                self.fields.day_of_year =
                    Some(ranged("day of year", day, 1, 366)?);
            }
            Kind::Month => {
                let month = self.digits(max)?;
                self.fields.month = Some(ranged("month", month, 1, 12)?);
            }
            Kind::MonthName => self.parse_month_name(9, |name| name)?,
            Kind::MonthAbbrev => self.parse_month_name(3, |name| &name[..3])?,
            Kind::Day => {
                let day = self.digits(max)?;
                self.fields.day = Some(ranged("day", day, 1, 31)?);
            }
            Kind::WeekdayIso => {
                let n = self.digits(max)?;
                let weekday = Weekday::from_monday_one_offset(ranged(
                    "weekday", n, 1, 7,
                )?)?;
                self.fields.weekday = Some(weekday);
            }
            Kind::WeekdayName => self.parse_weekday_name(9, Weekday::name)?,
            Kind::WeekdayAbbrev => {
                self.parse_weekday_name(3, Weekday::abbreviation)?
            }
            Kind::IsoWeekYear => {
                let year = self.signed_digits(max)?;
                self.fields.iso_week_year =
                    Some(ranged("ISO week year", year, YEAR_MIN, YEAR_MAX)?);
            }
            Kind::IsoWeek => {
                let week = self.digits(max)?;
                self.fields.iso_week = Some(ranged("ISO week", week, 1, 53)?);
            }
            Kind::MeridiemLower | Kind::MeridiemUpper => {
                let name = self.name(2);
                let meridiem = if name.eq_ignore_ascii_case("am") {
                    Meridiem::AM
                } else if name.eq_ignore_ascii_case("pm") {
                    Meridiem::PM
                } else {
                    return Err(unknown("meridiem designator", name));
                };
                self.fields.meridiem = Some(meridiem);
            }
            Kind::Hour12 => {
                let hour = self.digits(max)?;
                self.fields.hour12 = Some(ranged("hour", hour, 0, 99)?);
            }
            Kind::Hour => {
                let hour = self.digits(max)?;
                self.fields.hour = Some(ranged("hour", hour, 0, 99)?);
            }
            Kind::Minute => {
                let minute = self.digits(max)?;
                self.fields.minute = Some(ranged("minute", minute, 0, 59)?);
            }
            Kind::Second => {
                let second = self.digits(max)?;
                self.fields.second = Some(ranged("second", second, 0, 59)?);
            }
            Kind::Fraction => self.parse_fraction()?,
            Kind::FractionDot => {
                if matches!(self.rest().as_bytes().first(), Some(b'.' | b',')) {
                    self.pos += 1;
                    self.parse_fraction()?;
                }
            }
            Kind::Offset => self.fields.offset = Some(self.parse_offset(false)?),
            Kind::OffsetColon => {
                self.fields.offset = Some(self.parse_offset(true)?)
            }
            Kind::EraName => self.fields.era = Some(self.parse_era()?),
            Kind::EraYear => {
                let year = self.digits(max)?;
                self.fields.era_year =
                    Some(ranged("era year", year, 1, i64::from(i32::MAX))?);
            }
            Kind::EraYearFull => {
                let year = self.digits(max)?;
                self.fields.era_year =
                    Some(ranged("era year", year, 1, i64::from(i32::MAX))?);
                self.parse_literal(" ")?;
                self.fields.era = Some(self.parse_era()?);
            }
        }
        Ok(())
    }

    fn parse_month_name(
        &mut self,
        max: usize,
        render: impl Fn(&'static str) -> &'static str,
    ) -> Result<(), Error> {
        let name = self.name(max);
        let index = MONTH_NAMES
            .iter()
            .position(|&month| render(month).eq_ignore_ascii_case(name))
            .ok_or_else(|| unknown("month name", name))?;
        // At most 11.
        self.fields.month = Some(index as i8 + 1);
        Ok(())
    }

    fn parse_weekday_name(
        &mut self,
        max: usize,
        render: impl Fn(Weekday) -> &'static str,
    ) -> Result<(), Error> {
        let name = self.name(max);
        let weekday = Weekday::all()
            .find(|&weekday| render(weekday).eq_ignore_ascii_case(name))
            .ok_or_else(|| unknown("weekday name", name))?;
        self.fields.weekday = Some(weekday);
        Ok(())
    }

    fn parse_era(&mut self) -> Result<Era, Error> {
        let name = self.name(3);
        if name.eq_ignore_ascii_case("BCE") {
            Ok(Era::BCE)
        } else if name.eq_ignore_ascii_case("CE") {
            Ok(Era::CE)
        } else {
            Err(unknown("era", name))
        }
    }

    /// Parses 1 to 9 digits after the decimal mark.
    fn parse_fraction(&mut self) -> Result<(), Error> {
        let (digits, _) =
            parse::split_while(self.rest(), 9, |b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(Error::from(E::ExpectedDigits {
                found: parse::first(self.rest()),
            }));
        }
        self.fields.subsec = Some(parse::fraction(digits.as_bytes())?);
        self.pos += digits.len();
        Ok(())
    }

    fn parse_offset(&mut self, colon: bool) -> Result<Offset, Error> {
        let sign = match self.rest().as_bytes().first() {
            Some(b'Z' | b'z') => {
                self.pos += 1;
                return Ok(Offset::UTC);
            }
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => {
                return Err(Error::from(E::ExpectedOffsetSign {
                    found: parse::first(self.rest()),
                }))
            }
        };
        self.pos += 1;
        let hours = self.two_digits()?;
        let minutes = if colon {
            match parse::first(self.rest()) {
                Some(':') => {
                    self.pos += 1;
                    self.two_digits()?
                }
                found => return Err(Error::from(E::ExpectedColon { found })),
            }
        } else if self.rest().bytes().take(2).filter(u8::is_ascii_digit).count()
            == 2
        {
            self.two_digits()?
        } else {
            0
        };
        if minutes > 59 {
            return Err(Error::range("offset minutes", minutes, 0, 59));
        }
        Offset::from_minutes(sign * (hours * 60 + minutes))
    }

    /// Parses exactly two digits.
    fn two_digits(&mut self) -> Result<i16, Error> {
        let (digits, rest) =
            parse::split_while(self.rest(), 2, |b| b.is_ascii_digit());
        if digits.len() != 2 {
            return Err(Error::from(E::ExpectedDigits {
                found: parse::first(rest),
            }));
        }
        let n = parse::i64(digits.as_bytes())?;
        self.pos += 2;
        // At most 99.
        Ok(n as i16)
    }

    /// Parses 1 to `max` digits.
    fn digits(&mut self, max: usize) -> Result<i64, Error> {
        let (digits, _) =
            parse::split_while(self.rest(), max, |b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(Error::from(E::ExpectedDigits {
                found: parse::first(self.rest()),
            }));
        }
        let n = parse::i64(digits.as_bytes())?;
        self.pos += digits.len();
        Ok(n)
    }

    /// Parses an optional sign followed by 1 to `max` digits.
    fn signed_digits(&mut self, max: usize) -> Result<i64, Error> {
        let sign = match self.rest().as_bytes().first() {
            Some(b'-') => -1,
            Some(b'+') => 1,
            _ => return self.digits(max),
        };
        self.pos += 1;
        Ok(sign * self.digits(max)?)
    }

    /// Consumes up to `max` ASCII letters.
    fn name(&mut self, max: usize) -> &'i str {
        let (name, _) =
            parse::split_while(self.rest(), max, |b| b.is_ascii_alphabetic());
        self.pos += name.len();
        name
    }

    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }
}

fn unknown(what: &'static str, found: &str) -> Error {
    Error::from(E::UnknownName { what, found: found.into() })
}

/// Checks that `n` is in `min..=max` and converts it.
fn ranged<T: TryFrom<i64>>(
    what: &'static str,
    n: i64,
    min: impl Into<i64>,
    max: impl Into<i64>,
) -> Result<T, Error> {
    let (min, max) = (min.into(), max.into());
    if n < min || n > max {
        return Err(Error::range(what, n, min, max));
    }
    T::try_from(n).map_err(|_| Error::range(what, n, min, max))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{
        civil::{date, time},
        fmt::layout::parse,
    };

    use super::*;

    fn err(layout: &str, input: &str) -> Error {
        parse(layout, input).unwrap_err()
    }

    #[test]
    fn syntax_errors() {
        insta::assert_snapshot!(
            err("%Y-%m-%d", "2024/07/14"),
            @r###"cannot parse "/07/14" at position 4: expected literal '-'"###,
        );
        insta::assert_snapshot!(
            err("%Y-%m-%d", "2024-07"),
            @"cannot parse input at position 7: expected literal '-', but reached end of input",
        );
        insta::assert_snapshot!(
            err("%Y-%m-%d", "2024-07-14x"),
            @r###"extra text "x" at position 10 remains after parsing the entire layout"###,
        );
        insta::assert_snapshot!(
            err("%Y-%m-%d", "2024-xx-14"),
            @"failed to parse input for `%m` at position 5: expected at least one digit, but found 'x'",
        );
        insta::assert_snapshot!(
            err("%b %d", "Jux 14"),
            @r###"failed to parse input for `%b` at position 0: unrecognized month name "Jux""###,
        );
        insta::assert_snapshot!(
            err("%H:%M%Ez", "10:00+0530"),
            @"failed to parse input for `%Ez` at position 5: expected `:` between offset hours and minutes, but found '3'",
        );
        insta::assert_snapshot!(
            err("%H:%M %z", "10:00 0530"),
            @"failed to parse input for `%z` at position 6: expected `+`, `-` or `Z` to begin a UTC offset, but found '0'",
        );

        assert!(err("%Y-%m-%d", "2024/07/14").is_literal_mismatch());
        assert!(err("%Y-%m-%d", "2024-07").is_literal_mismatch());
        assert!(err("%Y-%m-%d", "2024-07-14x").is_unconsumed_input());
        assert!(err("%Y-%m-%d", "2024-xx-14").is_syntax());
        assert!(!err("%Y-%m-%d", "2024-07-14x").is_literal_mismatch());
    }

    #[test]
    fn range_errors() {
        insta::assert_snapshot!(
            err("%Y-%m-%d", "2024-13-01"),
            @"failed to parse input for `%m` at position 5: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            err("%H:%M", "10:60"),
            @"failed to parse input for `%M` at position 3: parameter 'minute' with value 60 is not in the required range of 0..=59",
        );
        insta::assert_snapshot!(
            err("%z", "+0575"),
            @"failed to parse input for `%z` at position 0: parameter 'offset minutes' with value 75 is not in the required range of 0..=59",
        );
        assert!(err("%Y-%m-%d", "2024-13-01").is_range());
    }

    #[test]
    fn names_ignore_case() {
        let got = parse("%A %d %B %Y", "sunday 14 JULY 2024").unwrap();
        assert_eq!(got.to_date().unwrap(), date(2024, 7, 14));
        let got = parse("%a %d %b %Y", "SUN 14 jul 2024").unwrap();
        assert_eq!(got.to_date().unwrap(), date(2024, 7, 14));
        let got = parse("%I%P", "4pm").unwrap();
        assert_eq!(got.to_time().unwrap(), time(16, 0, 0, 0));
    }

    #[test]
    fn widths() {
        // Years take up to seven digits, but only four (or the given
        // width) when another directive follows immediately.
        let got = parse("%Y", "12345").unwrap();
        assert_eq!(got.to_date().unwrap(), date(12345, 1, 1));
        let got = parse("%Y-%m", "5874898-06").unwrap();
        assert_eq!(got.to_date().unwrap(), date(5874898, 6, 1));
        let got = parse("%Y%m%d", "20240714").unwrap();
        assert_eq!(got.to_date().unwrap(), date(2024, 7, 14));
        assert!(parse("%Y%m", "2024011").unwrap_err().is_unconsumed_input());
        let got = parse("%5Y%m", "1234501").unwrap();
        assert_eq!(got.to_date().unwrap(), date(12345, 1, 1));
        let got = parse("%G-W%V-%u", "12345-W02-1").unwrap();
        assert_eq!(got.to_date().unwrap().iso_week(), (12345, 2));
        let got = parse("%Y", "-0043").unwrap();
        assert_eq!(got.to_date().unwrap(), date(-43, 1, 1));
        // Padding is optional when parsing.
        let got = parse("%Y-%m-%d", "2024-7-4").unwrap();
        assert_eq!(got.to_date().unwrap(), date(2024, 7, 4));
        let got = parse("%H%M", "0930").unwrap();
        assert_eq!(got.to_time().unwrap(), time(9, 30, 0, 0));
    }

    #[test]
    fn fractions_and_offsets() {
        let got = parse("%S.%f", "05.123").unwrap();
        assert_eq!(got.to_time().unwrap(), time(0, 0, 5, 123_000_000));
        let got = parse("%S%Ef", "05").unwrap();
        assert_eq!(got.to_time().unwrap(), time(0, 0, 5, 0));
        assert!(parse("%S%Ef", "05.").is_err());

        let offset = |layout, input| parse(layout, input).unwrap().to_offset().unwrap();
        assert_eq!(offset("%z", "Z"), Offset::UTC);
        assert_eq!(offset("%z", "+05"), Offset::constant(5, 0));
        assert_eq!(offset("%z", "-0930"), Offset::constant(-9, 30));
        assert_eq!(offset("%Ez", "+05:30"), Offset::constant(5, 30));
        assert_eq!(offset("%Ez", "-00:30"), Offset::from_minutes(-30).unwrap());
        assert_eq!(offset("%Ez", "z"), Offset::UTC);
    }

    #[test]
    fn percent() {
        let got = parse("%Y%%", "2024%").unwrap();
        assert_eq!(got.to_date().unwrap(), date(2024, 1, 1));
        assert!(parse("%Y%%", "2024").is_err());
    }

    #[test]
    fn error_positions_follow_input() {
        let e = err("%d %B %Y", "14 July 20x4");
        assert_eq!(
            e.to_string(),
            "extra text \"x4\" at position 10 remains after parsing the entire layout",
        );
    }
}
