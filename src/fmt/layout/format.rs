use crate::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    error::Error,
    fmt::{
        layout::{
            month_abbreviation, month_name, Directive, Item, Kind, Layout,
            Meridiem, Needs, Pieces,
        },
        util::{DecimalFormatter, FractionalFormatter},
        Write, WriteExt,
    },
    tz::Offset,
    OffsetDateTime,
};

pub(super) struct Formatter<'l, W> {
    pub(super) layout: &'l Layout,
    pub(super) pieces: Pieces,
    pub(super) wtr: W,
}

impl<'l, W: Write> Formatter<'l, W> {
    pub(super) fn format(&mut self) -> Result<(), Error> {
        let layout = self.layout;
        for item in layout.items.iter() {
            match *item {
                Item::Literal(ref range) => {
                    self.wtr.write_str(&layout.source[range.clone()])?
                }
                Item::Directive(ref directive) => {
                    self.format_directive(directive)?
                }
            }
        }
        Ok(())
    }

    fn format_directive(&mut self, directive: &Directive) -> Result<(), Error> {
        let int = DecimalFormatter::new().padding(directive.width());
        match directive.kind {
            Kind::Percent => self.wtr.write_str("%"),
            Kind::Year => {
                let year = self.date(directive).year();
                self.wtr.write_int(&int, year)
            }
            Kind::Year2 => {
                let year = self.date(directive).year();
                self.wtr.write_int(&int, year.rem_euclid(100))
            }
            Kind::Century => {
                let year = self.date(directive).year();
                self.wtr.write_int(&int, year.div_euclid(100))
            }
            Kind::DayOfYear => {
                let day = self.date(directive).day_of_year();
                self.wtr.write_int(&int, day)
            }
            Kind::Month => {
                let month = self.date(directive).month();
                self.wtr.write_int(&int, month)
            }
            Kind::MonthName => {
                let month = self.date(directive).month();
                self.wtr.write_str(month_name(month))
            }
            Kind::MonthAbbrev => {
                let month = self.date(directive).month();
                self.wtr.write_str(month_abbreviation(month))
            }
            Kind::Day => {
                let day = self.date(directive).day();
                self.wtr.write_int(&int, day)
            }
            Kind::WeekdayIso => {
                let weekday = self.date(directive).weekday();
                self.wtr.write_int(&int, weekday.to_monday_one_offset())
            }
            Kind::WeekdayName => {
                let weekday = self.date(directive).weekday();
                self.wtr.write_str(weekday.name())
            }
            Kind::WeekdayAbbrev => {
                let weekday = self.date(directive).weekday();
                self.wtr.write_str(weekday.abbreviation())
            }
            Kind::IsoWeekYear => {
                let (year, _) = self.date(directive).iso_week();
                self.wtr.write_int(&int, year)
            }
            Kind::IsoWeek => {
                let (_, week) = self.date(directive).iso_week();
                self.wtr.write_int(&int, week)
            }
            Kind::MeridiemLower => {
                let hour = self.time(directive).hour();
                self.wtr.write_str(match Meridiem::from_hour(hour) {
                    Meridiem::AM => "am",
                    Meridiem::PM => "pm",
                })
            }
            Kind::MeridiemUpper => {
                let hour = self.time(directive).hour();
                self.wtr.write_str(match Meridiem::from_hour(hour) {
                    Meridiem::AM => "AM",
                    Meridiem::PM => "PM",
                })
            }
            Kind::Hour12 => {
                let hour = self.time(directive).hour() % 12;
                self.wtr.write_int(&int, if hour == 0 { 12 } else { hour })
            }
            Kind::Hour => {
                let hour = self.time(directive).business_hour();
                self.wtr.write_int(&int, hour)
            }
            Kind::Minute => {
                let minute = self.time(directive).minute();
                self.wtr.write_int(&int, minute)
            }
            Kind::Second => {
                let second = self.time(directive).second();
                self.wtr.write_int(&int, second)
            }
            Kind::Fraction => {
                let nanos = self.time(directive).subsec_nanosecond();
                let fraction = FractionalFormatter::new()
                    .precision(directive.precision)
                    .format(nanos);
                if fraction.is_empty() && directive.precision.is_none() {
                    self.wtr.write_str("0")
                } else {
                    self.wtr.write_str(fraction.as_str())
                }
            }
            Kind::FractionDot => {
                let nanos = self.time(directive).subsec_nanosecond();
                let fraction = FractionalFormatter::new()
                    .precision(directive.precision)
                    .format(nanos);
                if fraction.is_empty() {
                    return Ok(());
                }
                self.wtr.write_str(".")?;
                self.wtr.write_str(fraction.as_str())
            }
            Kind::Offset => {
                let offset = self.offset(directive);
                write_offset(offset, false, &mut self.wtr)
            }
            Kind::OffsetColon => {
                let offset = self.offset(directive);
                if offset.is_utc() {
                    return self.wtr.write_str("Z");
                }
                write_offset(offset, true, &mut self.wtr)
            }
            Kind::EraName => {
                let (_, era) = self.date(directive).era_year();
                self.wtr.write_str(era.name())
            }
            Kind::EraYear => {
                let (year, _) = self.date(directive).era_year();
                self.wtr.write_int(&int, year)
            }
            Kind::EraYearFull => {
                let (year, era) = self.date(directive).era_year();
                self.wtr.write_int(&int, year)?;
                self.wtr.write_str(" ")?;
                self.wtr.write_str(era.name())
            }
        }
    }

    fn date(&self, directive: &Directive) -> LocalDate {
        match self.pieces.date {
            Some(date) => date,
            None => self.missing(directive),
        }
    }

    fn time(&self, directive: &Directive) -> LocalTime {
        match self.pieces.time {
            Some(time) => time,
            None => self.missing(directive),
        }
    }

    fn offset(&self, directive: &Directive) -> Offset {
        match self.pieces.offset {
            Some(offset) => offset,
            None => self.missing(directive),
        }
    }

    /// Using a layout with a value that lacks one of its fields is a bug in
    /// the caller, not bad input.
    fn missing(&self, directive: &Directive) -> ! {
        let what = match directive.kind.needs() {
            Needs::Date => "a date",
            Needs::Time => "a time of day",
            Needs::Offset => "a UTC offset",
            Needs::Nothing => unreachable!("`%%` needs no value"),
        };
        panic!(
            "layout specifier `{}` at position {} requires {what}, \
             but the value being formatted does not have one",
            directive.sequence(self.layout),
            directive.start,
        )
    }
}

/// Writes `+hhmm` or `+hh:mm`.
fn write_offset<W: Write>(
    offset: Offset,
    colon: bool,
    mut wtr: W,
) -> Result<(), Error> {
    let two = DecimalFormatter::new().padding(2);
    let (hours, minutes) = offset.parts();
    wtr.write_str(if offset.is_negative() { "-" } else { "+" })?;
    wtr.write_int(&two, hours)?;
    if colon {
        wtr.write_str(":")?;
    }
    wtr.write_int(&two, minutes)
}

/// Prints values in the extended ISO 8601 layouts without tokenizing a
/// layout first. This is what every `Display` impl uses.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct IsoPrinter {
    _priv: (),
}

impl IsoPrinter {
    pub(crate) fn new() -> IsoPrinter {
        IsoPrinter { _priv: () }
    }

    pub(crate) fn print_date<W: Write>(
        &self,
        date: LocalDate,
        mut wtr: W,
    ) -> Result<(), Error> {
        let year = DecimalFormatter::new().padding(4);
        let two = DecimalFormatter::new().padding(2);
        wtr.write_int(&year, date.year())?;
        wtr.write_str("-")?;
        wtr.write_int(&two, date.month())?;
        wtr.write_str("-")?;
        wtr.write_int(&two, date.day())
    }

    pub(crate) fn print_time<W: Write>(
        &self,
        time: LocalTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        let two = DecimalFormatter::new().padding(2);
        wtr.write_int(&two, time.business_hour())?;
        wtr.write_str(":")?;
        wtr.write_int(&two, time.minute())?;
        wtr.write_str(":")?;
        wtr.write_int(&two, time.second())?;
        let nanos = time.subsec_nanosecond();
        if nanos != 0 {
            wtr.write_str(".")?;
            wtr.write_fraction(&FractionalFormatter::new(), nanos)?;
        }
        Ok(())
    }

    pub(crate) fn print_datetime<W: Write>(
        &self,
        dt: LocalDateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_date(dt.date(), &mut wtr)?;
        wtr.write_str("T")?;
        self.print_time(dt.time(), &mut wtr)
    }

    pub(crate) fn print_offset_datetime<W: Write>(
        &self,
        odt: OffsetDateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_datetime(odt.datetime(), &mut wtr)?;
        let offset = odt.offset();
        if offset.is_utc() {
            wtr.write_str("Z")
        } else {
            write_offset(offset, true, wtr)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::{
        civil::{date, datetime, time},
        fmt::layout::{format, KITCHEN, RFC1123},
    };

    use super::*;

    #[test]
    fn dates() {
        let d = date(2024, 7, 4);
        assert_eq!(format("%Y-%m-%d", d).unwrap(), "2024-07-04");
        assert_eq!(format("%-m/%-d/%y", d).unwrap(), "7/4/24");
        assert_eq!(format("%C|%j|%u|%G-W%V", d).unwrap(), "20|186|4|2024-W27");
        assert_eq!(format("%a %A %b %B", d).unwrap(), "Thu Thursday Jul July");
        assert_eq!(format("%6Y", d).unwrap(), "002024");
        assert_eq!(format("%Y", date(-43, 3, 15)).unwrap(), "-0043");
        assert_eq!(format("%EY", date(-43, 3, 15)).unwrap(), "44 BCE");
        assert_eq!(format("%Ey %EC", d).unwrap(), "2024 CE");
        assert_eq!(format("%G-W%V-%u", date(2021, 1, 1)).unwrap(), "2020-W53-5");
        assert_eq!(format("100%%", d).unwrap(), "100%");
    }

    #[test]
    fn times() {
        let t = time(16, 4, 5, 120_000_000);
        assert_eq!(format("%H:%M:%S", t).unwrap(), "16:04:05");
        assert_eq!(format("%I:%M %p|%P", t).unwrap(), "04:04 PM|pm");
        assert_eq!(format(KITCHEN, t).unwrap(), "4:04PM");
        assert_eq!(format(KITCHEN, time(0, 30, 0, 0)).unwrap(), "12:30AM");
        assert_eq!(format("%f|%3f|%6f", t).unwrap(), "12|120|120000");
        assert_eq!(format("%S%Ef", t).unwrap(), "05.12");
        assert_eq!(format("%S%Ef|%f", time(0, 0, 5, 0)).unwrap(), "05|0");
        assert_eq!(format("%S%E3f", time(0, 0, 5, 0)).unwrap(), "05.000");
        // Business hours print as they are, and the 12-hour clock uses the
        // normalized reading.
        let t = time(25, 0, 0, 0);
        assert_eq!(format("%H|%I %p", t).unwrap(), "25|01 AM");
    }

    #[test]
    fn offsets() {
        let dt = datetime(2024, 7, 14, 16, 24, 0, 0);
        let odt = dt.to_offset(Offset::constant(-4, 0));
        assert_eq!(format(RFC1123, odt).unwrap(), "Sun, 14 Jul 2024 16:24:00 -0400");
        assert_eq!(format("%Ez", odt).unwrap(), "-04:00");
        let odt = dt.to_offset(Offset::UTC);
        assert_eq!(format("%z|%Ez", odt).unwrap(), "+0000|Z");
        let odt = dt.to_offset(Offset::from_minutes(-30).unwrap());
        assert_eq!(format("%z", odt).unwrap(), "-0030");
    }

    #[test]
    #[should_panic(expected = "layout specifier `%H` at position 3 requires a time of day")]
    fn missing_time_panics() {
        let _ = format("%Y-%H", date(2024, 1, 1));
    }

    #[test]
    fn iso_printer() {
        let mut buf = String::new();
        let odt = datetime(2007, 5, 20, 12, 30, 15, 0)
            .to_offset(Offset::constant(2, 30));
        IsoPrinter::new().print_offset_datetime(odt, &mut buf).unwrap();
        assert_eq!(buf, "2007-05-20T12:30:15+02:30");

        let mut buf = String::new();
        IsoPrinter::new().print_time(time(99, 59, 59, 999_999_999), &mut buf).unwrap();
        assert_eq!(buf, "99:59:59.999999999");
    }
}
