//! Blocking millisecond delay on top of a hardware timer.

use embedded_hal::{blocking::delay::DelayMs, timer::CountDown};
use fugit::{ExtU32, MillisDurationU32};
use nb::block;
use void::ResultVoidExt;

/// Adapts a [`CountDown`] timer with millisecond ticks into [`DelayMs`].
pub struct CountDownDelay<T> {
    timer: T,
}

impl<T: CountDown<Time = MillisDurationU32>> CountDownDelay<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn release(self) -> T {
        self.timer
    }
}

impl<T: CountDown<Time = MillisDurationU32>> DelayMs<u32> for CountDownDelay<T> {
    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }

        self.timer.start(ms.millis());
        block!(self.timer.wait()).void_unwrap();
    }
}

#[cfg(test)]
mod tests {
    use void::Void;

    use super::*;

    /// Expires after a fixed number of polls
    #[derive(Default)]
    struct PolledTimer {
        started: Option<MillisDurationU32>,
        remaining: u32,
        polls: u32,
    }

    impl CountDown for PolledTimer {
        type Time = MillisDurationU32;

        fn start<C>(&mut self, count: C)
        where
            C: Into<Self::Time>,
        {
            self.started = Some(count.into());
            self.remaining = 3;
        }

        fn wait(&mut self) -> nb::Result<(), Void> {
            self.polls += 1;
            if self.remaining == 0 {
                Ok(())
            } else {
                self.remaining -= 1;
                Err(nb::Error::WouldBlock)
            }
        }
    }

    #[test]
    fn blocks_until_expired() {
        let mut delay = CountDownDelay::new(PolledTimer::default());
        delay.delay_ms(785);

        let timer = delay.release();
        assert_eq!(timer.started, Some(785.millis()));
        assert_eq!(timer.polls, 4);
    }

    #[test]
    fn zero_does_not_start() {
        let mut delay = CountDownDelay::new(PolledTimer::default());
        delay.delay_ms(0);

        let timer = delay.release();
        assert_eq!(timer.started, None);
        assert_eq!(timer.polls, 0);
    }
}
