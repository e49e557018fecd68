//! Event provider abstraction layer.

pub mod mock;

/// Time-of-day snapshot delivered by the clock service.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeOfDay {
    /// Hour 0..=23.
    pub hour: u8,
    /// Minute 0..=59.
    pub minute: u8,
    /// Short weekday label, already localized by the provider.
    pub weekday_name: &'static str,
    /// Day of month 1..=31.
    pub day_of_month: u8,
}

/// Discrete gesture events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GestureEvent {
    Tap,
}

/// Wall clock delivering a tick at least once per minute.
pub trait ClockService {
    type Error;

    /// Reads the current time, used once at startup.
    fn current(&mut self) -> Result<TimeOfDay, Self::Error>;

    /// Polls for tick events since the last call.
    fn poll_tick(&mut self) -> Result<Option<TimeOfDay>, Self::Error>;
}

/// Link state source.
pub trait ConnectivityService {
    type Error;

    /// Reads the current link state, used once at startup.
    fn peek(&mut self) -> Result<bool, Self::Error>;

    /// Polls for link state change notifications.
    fn poll_change(&mut self) -> Result<Option<bool>, Self::Error>;
}

/// Polled gesture provider.
pub trait GestureService {
    type Error;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error>;
}

/// One-shot timer service.
///
/// Cancelling a handle is safe at any time and suppresses its expiry.
pub trait TimerService {
    type Handle: Copy + Eq;
    type Error;

    /// Arms a timer that expires once after `delay_ms`.
    fn schedule_once(&mut self, delay_ms: u32) -> Result<Self::Handle, Self::Error>;

    /// Cancels a previously armed timer.
    fn cancel(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;

    /// Polls for expired timers.
    fn poll_expired(&mut self) -> Result<Option<Self::Handle>, Self::Error>;
}
