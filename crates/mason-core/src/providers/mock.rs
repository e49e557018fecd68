use core::convert::Infallible;

use super::{
    ClockService, ConnectivityService, GestureEvent, GestureService, TimeOfDay, TimerService,
};

/// No-hardware clock stuck at midnight, used during bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockClock;

impl ClockService for MockClock {
    type Error = Infallible;

    fn current(&mut self) -> Result<TimeOfDay, Self::Error> {
        Ok(TimeOfDay {
            hour: 0,
            minute: 0,
            weekday_name: "MON",
            day_of_month: 1,
        })
    }

    fn poll_tick(&mut self) -> Result<Option<TimeOfDay>, Self::Error> {
        Ok(None)
    }
}

/// No-hardware link source reporting disconnected.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockConnectivity;

impl ConnectivityService for MockConnectivity {
    type Error = Infallible;

    fn peek(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn poll_change(&mut self) -> Result<Option<bool>, Self::Error> {
        Ok(None)
    }
}

/// No-hardware gesture source producing no events.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockGestures;

impl GestureService for MockGestures {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        Ok(None)
    }
}

/// Timer service that hands out handles but never expires them.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockTimers {
    next_handle: u32,
}

impl TimerService for MockTimers {
    type Handle = u32;
    type Error = Infallible;

    fn schedule_once(&mut self, _delay_ms: u32) -> Result<Self::Handle, Self::Error> {
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn cancel(&mut self, _handle: Self::Handle) -> Result<(), Self::Error> {
        Ok(())
    }

    fn poll_expired(&mut self) -> Result<Option<Self::Handle>, Self::Error> {
        Ok(None)
    }
}
