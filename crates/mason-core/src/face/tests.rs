use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use ls013b7dh05::FrameBuffer;

use super::*;
use crate::{
    providers::mock::{MockClock, MockConnectivity, MockGestures, MockTimers},
    settings::SettingsStore,
};

/// Shared event queue a test can feed between ticks.
struct Feed<T>(Rc<RefCell<VecDeque<T>>>);

impl<T> Feed<T> {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(VecDeque::new())))
    }

    fn push(&self, item: T) {
        self.0.borrow_mut().push_back(item);
    }

    fn pop(&self) -> Option<T> {
        self.0.borrow_mut().pop_front()
    }
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

struct ScriptedClock {
    initial: TimeOfDay,
    ticks: Feed<TimeOfDay>,
}

impl ClockService for ScriptedClock {
    type Error = ();

    fn current(&mut self) -> Result<TimeOfDay, Self::Error> {
        Ok(self.initial)
    }

    fn poll_tick(&mut self) -> Result<Option<TimeOfDay>, Self::Error> {
        Ok(self.ticks.pop())
    }
}

struct ScriptedConnectivity {
    initial: bool,
    changes: Feed<bool>,
}

impl ConnectivityService for ScriptedConnectivity {
    type Error = ();

    fn peek(&mut self) -> Result<bool, Self::Error> {
        Ok(self.initial)
    }

    fn poll_change(&mut self) -> Result<Option<bool>, Self::Error> {
        Ok(self.changes.pop())
    }
}

struct ScriptedGestures {
    events: Feed<GestureEvent>,
}

impl GestureService for ScriptedGestures {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        Ok(self.events.pop())
    }
}

#[derive(Default)]
struct TimerBox {
    next_handle: u32,
    armed: Vec<u32>,
    due: VecDeque<u32>,
    cancelled: Vec<u32>,
    scheduled_total: u32,
}

/// Timer service double; the test decides when handles expire.
#[derive(Clone, Default)]
struct SharedTimers(Rc<RefCell<TimerBox>>);

impl SharedTimers {
    fn expire_oldest(&self) {
        let mut inner = self.0.borrow_mut();
        if !inner.armed.is_empty() {
            let handle = inner.armed.remove(0);
            inner.due.push_back(handle);
        }
    }

    fn expire_raw(&self, handle: u32) {
        self.0.borrow_mut().due.push_back(handle);
    }

    fn armed_count(&self) -> usize {
        self.0.borrow().armed.len()
    }

    fn scheduled_total(&self) -> u32 {
        self.0.borrow().scheduled_total
    }

    fn cancelled_count(&self) -> usize {
        self.0.borrow().cancelled.len()
    }
}

impl TimerService for SharedTimers {
    type Handle = u32;
    type Error = ();

    fn schedule_once(&mut self, _delay_ms: u32) -> Result<Self::Handle, Self::Error> {
        let mut inner = self.0.borrow_mut();
        inner.next_handle += 1;
        let handle = inner.next_handle;
        inner.armed.push(handle);
        inner.scheduled_total += 1;
        Ok(handle)
    }

    fn cancel(&mut self, handle: Self::Handle) -> Result<(), Self::Error> {
        let mut inner = self.0.borrow_mut();
        inner.armed.retain(|&armed| armed != handle);
        inner.cancelled.push(handle);
        Ok(())
    }

    fn poll_expired(&mut self) -> Result<Option<Self::Handle>, Self::Error> {
        Ok(self.0.borrow_mut().due.pop_front())
    }
}

type TestFace = Watchface<ScriptedClock, ScriptedConnectivity, ScriptedGestures, SharedTimers>;

struct Rig {
    face: TestFace,
    ticks: Feed<TimeOfDay>,
    link: Feed<bool>,
    taps: Feed<GestureEvent>,
    timers: SharedTimers,
}

fn time(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay {
        hour,
        minute,
        weekday_name: "WED",
        day_of_month: 5,
    }
}

fn rig(initial: TimeOfDay, connected: bool) -> Rig {
    let ticks = Feed::new();
    let link = Feed::new();
    let taps = Feed::new();
    let timers = SharedTimers::default();

    let face = Watchface::new(
        ScriptedClock {
            initial,
            ticks: ticks.clone(),
        },
        ScriptedConnectivity {
            initial: connected,
            changes: link.clone(),
        },
        ScriptedGestures {
            events: taps.clone(),
        },
        timers.clone(),
        FaceConfig::default(),
    );

    Rig {
        face,
        ticks,
        link,
        taps,
        timers,
    }
}

fn rendered(face: &TestFace) -> FrameBuffer {
    let mut frame = FrameBuffer::new();
    face.render(&mut frame).unwrap();
    frame
}

fn on(frame: &FrameBuffer, x: i32, y: i32) -> bool {
    frame.pixel(x as usize, y as usize) == Some(true)
}

#[test]
fn initial_state_comes_from_providers() {
    let mut rig = rig(time(9, 41), true);

    assert_eq!(
        rig.face.state(),
        ClockState {
            hour: 9,
            minute: 41,
            bluetooth_connected: true,
        }
    );
    assert_eq!(rig.face.date_label(), "WED 05");
    assert!(!rig.face.markers_visible());

    // Startup changes coalesce into one render request.
    assert_eq!(rig.face.tick(), TickResult::RenderRequested);
    assert_eq!(rig.face.tick(), TickResult::NoRender);
}

#[test]
fn minute_tick_updates_time_and_date() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.ticks.push(TimeOfDay {
        hour: 9,
        minute: 42,
        weekday_name: "WED",
        day_of_month: 5,
    });

    assert_eq!(rig.face.tick(), TickResult::RenderRequested);
    assert_eq!(rig.face.state().minute, 42);
    assert_eq!(rig.face.date_label(), "WED 05");
    assert_eq!(rig.face.tick(), TickResult::NoRender);
}

#[test]
fn repeated_link_reports_coalesce() {
    let mut rig = rig(time(9, 41), true);
    let _ = rig.face.tick();

    rig.link.push(true);
    assert_eq!(rig.face.tick(), TickResult::NoRender);

    rig.link.push(false);
    assert_eq!(rig.face.tick(), TickResult::RenderRequested);
    assert!(!rig.face.state().bluetooth_connected);
}

#[test]
fn tap_shows_markers_and_arms_one_timer() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    rig.taps.push(GestureEvent::Tap);

    assert_eq!(rig.face.tick(), TickResult::RenderRequested);
    assert!(rig.face.markers_visible());
    assert_eq!(rig.timers.scheduled_total(), 1);
    assert_eq!(rig.timers.armed_count(), 1);
}

#[test]
fn tap_while_visible_does_not_rearm() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    assert_eq!(rig.face.tick(), TickResult::NoRender);
    assert!(rig.face.markers_visible());
    assert_eq!(rig.timers.scheduled_total(), 1);
    assert_eq!(rig.timers.armed_count(), 1);
}

#[test]
fn expiry_hides_markers() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    let _ = rig.face.tick();

    rig.timers.expire_oldest();
    assert_eq!(rig.face.tick(), TickResult::RenderRequested);
    assert!(!rig.face.markers_visible());
    assert_eq!(rig.timers.armed_count(), 0);
}

#[test]
fn stale_expiry_is_ignored() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    let _ = rig.face.tick();

    rig.timers.expire_raw(99);
    assert_eq!(rig.face.tick(), TickResult::NoRender);
    assert!(rig.face.markers_visible());
}

#[test]
fn shutdown_cancels_the_armed_timer() {
    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.taps.push(GestureEvent::Tap);
    let _ = rig.face.tick();

    rig.face.shutdown();
    assert!(!rig.face.markers_visible());
    assert_eq!(rig.timers.armed_count(), 0);
    assert_eq!(rig.timers.cancelled_count(), 1);
}

#[test]
fn hand_angle_table() {
    assert_eq!(hour_hand_angle(0, 0), 0);
    assert_eq!(hour_hand_angle(3, 0), 90);
    assert_eq!(hour_hand_angle(6, 0), 180);
    assert_eq!(hour_hand_angle(9, 0), 270);
    assert_eq!(hour_hand_angle(12, 0), 0);
    assert_eq!(hour_hand_angle(23, 59), 359);

    assert_eq!(minute_hand_angle(0), 0);
    assert_eq!(minute_hand_angle(15), 90);
    assert_eq!(minute_hand_angle(45), 270);
    assert_eq!(minute_hand_angle(59), 354);
}

#[test]
fn minute_pie_covers_the_elapsed_sector() {
    let rig = rig(time(0, 30), false);
    let frame = rendered(&rig.face);

    // Half past: the pie spans 12 through 6 o'clock, and no further.
    assert!(on(&frame, 112, 74));
    assert!(!on(&frame, 32, 74));
}

#[test]
fn late_minute_pie_wraps_past_the_seam() {
    let rig = rig(time(0, 45), false);
    let frame = rendered(&rig.face);

    assert!(on(&frame, 112, 74));
    assert!(on(&frame, 32, 74));
    assert!(!on(&frame, 42, 44));
}

#[test]
fn pm_pointer_dot_is_punched() {
    let radians = 60.0_f32 * PI / 180.0;
    let dot_x = 72 + (sinf(radians) * 63.0) as i32;
    let dot_y = 74 - (cosf(radians) * 63.0) as i32;

    let morning = rig(time(2, 0), false);
    assert!(on(&rendered(&morning.face), dot_x, dot_y));

    let afternoon = rig(time(14, 0), false);
    let frame = rendered(&afternoon.face);
    assert!(!on(&frame, dot_x, dot_y));
    assert!(on(&frame, dot_x + 5, dot_y));
}

#[test]
fn markers_render_only_while_visible() {
    let mut rig = rig(time(0, 0), false);
    let _ = rig.face.tick();

    // 3 o'clock marker dot center.
    assert!(!on(&rendered(&rig.face), 134, 74));

    rig.taps.push(GestureEvent::Tap);
    let _ = rig.face.tick();
    assert!(on(&rendered(&rig.face), 134, 74));
}

#[test]
fn link_glyph_switches_shape() {
    let connected = rig(time(0, 0), true);
    let disconnected = rig(time(0, 0), false);

    // The square's corner is outside the circle glyph.
    assert!(!on(&rendered(&connected.face), 77, 79));
    assert!(on(&rendered(&disconnected.face), 77, 79));
}

#[test]
fn inversion_swaps_polarity() {
    let mut rig = rig(time(0, 30), false);
    let _ = rig.face.tick();

    rig.face.apply_settings(PersistedSettings { inverted: true });
    assert_eq!(rig.face.tick(), TickResult::RenderRequested);

    let frame = rendered(&rig.face);
    assert!(on(&frame, 0, 0));
    assert!(!on(&frame, 112, 74));

    // Re-applying the same settings is not a change.
    rig.face.apply_settings(PersistedSettings { inverted: true });
    assert_eq!(rig.face.tick(), TickResult::NoRender);
}

#[test]
fn date_text_lands_in_the_label_band() {
    let rig = rig(time(9, 41), false);
    let frame = rendered(&rig.face);

    let band_has_ink = (141..168).any(|y| (0..144).any(|x| on(&frame, x, y)));
    assert!(band_has_ink);
}

#[test]
fn mock_providers_boot_to_midnight() {
    let mut face = Watchface::new(
        MockClock,
        MockConnectivity,
        MockGestures,
        MockTimers::default(),
        FaceConfig::default(),
    );

    assert_eq!(face.tick(), TickResult::RenderRequested);
    assert_eq!(
        face.state(),
        ClockState {
            hour: 0,
            minute: 0,
            bluetooth_connected: false,
        }
    );
    assert_eq!(face.date_label(), "MON 01");
    assert!(!face.markers_visible());
}

struct MemoryStore {
    slot: Option<PersistedSettings>,
}

impl SettingsStore for MemoryStore {
    type Error = ();

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        Ok(self.slot)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.slot = Some(*settings);
        Ok(())
    }
}

#[test]
fn settings_round_trip_through_a_store() {
    let mut store = MemoryStore { slot: None };
    assert_eq!(store.load(), Ok(None));

    let mut rig = rig(time(9, 41), false);
    let _ = rig.face.tick();

    rig.face.apply_settings(PersistedSettings { inverted: true });
    assert_eq!(rig.face.tick(), TickResult::RenderRequested);

    store.save(&rig.face.settings()).unwrap();
    assert_eq!(
        store.load(),
        Ok(Some(PersistedSettings { inverted: true }))
    );
}
