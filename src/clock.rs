use crate::{error::Error, Extent};

/// A source of the current instant.
///
/// The instant is reported as the exact [`Extent`] elapsed since
/// `1970-01-01T00:00:00Z`. This crate never reads a clock on its own; the
/// only consumer is [`OffsetDateTime::now_with`](crate::OffsetDateTime::now_with).
///
/// # Example
///
/// ```
/// use tempora::{Extent, FixedClock, OffsetDateTime};
///
/// let clock = FixedClock::new(Extent::from_secs(86_400));
/// let now = OffsetDateTime::now_with(&clock)?;
/// assert_eq!(now.to_string(), "1970-01-02T00:00:00Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Clock {
    /// Returns the extent elapsed since the Unix epoch.
    fn now(&self) -> Result<Extent, Error>;
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
    #[inline]
    fn now(&self) -> Result<Extent, Error> {
        (**self).now()
    }
}

/// A clock backed by `std::time::SystemTime`.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Result<Extent, Error> {
        let now = std::time::SystemTime::now();
        let extent = match now.duration_since(std::time::SystemTime::UNIX_EPOCH)
        {
            Ok(duration) => Extent::try_from(duration)?,
            Err(err) => -Extent::try_from(err.duration())?,
        };
        trace!("read system clock: {extent}");
        Ok(extent)
    }
}

/// A clock that always reports the same instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedClock {
    since_epoch: Extent,
}

impl FixedClock {
    /// Creates a clock that always reports `since_epoch`.
    pub fn new(since_epoch: Extent) -> FixedClock {
        FixedClock { since_epoch }
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> Result<Extent, Error> {
        Ok(self.since_epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed() {
        let clock = FixedClock::new(Extent::from_secs(-1));
        assert_eq!(clock.now().unwrap(), Extent::from_secs(-1));
        assert_eq!((&clock).now().unwrap(), Extent::from_secs(-1));
    }

    #[cfg(feature = "std")]
    #[test]
    fn system() {
        let _ = env_logger::try_init();

        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now().unwrap() > Extent::from_secs(1_577_836_800));
    }
}
