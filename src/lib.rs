/*!
Tempora is a library of proleptic Gregorian dates, times of day, fixed
offset datetimes and durations, with an explicit-layout formatter and an
ISO 8601 duration and interval codec.

# Overview

The civil types live in [`civil`]:

* [`LocalDate`](civil::LocalDate) is a date between `-4713-11-24` and
`5874898-06-03`. It knows its weekday, day of year and ISO week.
* [`LocalTime`](civil::LocalTime) is a time of day with nanosecond
precision whose hour may run up to `99`. Hours past `23` are "business
hours" such as `25:00` for 1 AM the following day.
* [`LocalDateTime`](civil::LocalDateTime) pairs the two and normalizes
business hours into the date.

[`OffsetDateTime`] attaches a fixed UTC [`Offset`](tz::Offset) to a
datetime. There is no time zone database: anything that needs one goes
through an [`OffsetProvider`](tz::OffsetProvider).

Elapsed time comes in three flavors:

* [`Duration`] is an exact signed count of nanoseconds, good for about
±292 years. It is what you add to a time of day.
* [`Extent`] is an exact signed span of seconds and nanoseconds, wide
enough to cover the distance between any two supported datetimes.
* [`Period`] is a calendar quantity of years, months, weeks and days,
whose length depends on where it is applied.

An [`Interval`] is an ISO 8601 time interval made of two of its start,
end and duration, with an optional repetition count.

# Example

```
use tempora::{civil::{date, LocalDate}, Period};

let d = date(2020, 3, 18).checked_add_days(20)?;
assert_eq!(d, date(2020, 4, 7));
assert_eq!(date(2021, 1, 1).iso_week(), (2020, 53));

let d = LocalDate::strptime("%d.%m.%Y", "14.07.2024")?;
assert_eq!(d.strftime("%A, %B %-d, %Y")?, "Sunday, July 14, 2024");

let p: Period = "P3Y6M4D".parse()?;
assert_eq!(p.to_string(), "P3Y6M4D");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Errors

Every fallible routine returns [`Error`]. Most routines also come in a
`can_*` flavor that only reports whether the operation would succeed, and
constructors come in a `const` flavor (such as
[`LocalDate::constant`](civil::LocalDate::constant)) that panics instead.

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
[`Error`] and provides [`SystemClock`].
* **logging** - Emits `log` records when parsing tries several layouts
and when a parse is configured with a non-default century rule.
* **serde** - Implements `Serialize` and `Deserialize` for every value
type, using the same strings as their `Display` and `FromStr` impls.
* **perf-inline** (enabled by default) - Uses `#[inline(always)]` on a
few hot routines.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations)]

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("tempora currently not supported on non-{32,64}");

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and the layout engine allocate.
extern crate alloc;

#[cfg(feature = "std")]
pub use crate::clock::SystemClock;
pub use crate::{
    clock::{Clock, FixedClock},
    duration::Duration,
    error::Error,
    extent::Extent,
    interval::{Interval, Repeat},
    offset_datetime::OffsetDateTime,
    period::Period,
};

#[macro_use]
mod logging;

pub mod civil;
mod clock;
mod duration;
mod error;
mod extent;
pub mod fmt;
mod interval;
mod offset_datetime;
mod period;
pub mod tz;
mod util;
