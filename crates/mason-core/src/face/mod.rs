//! Watchface state machine and face composition.

use core::f32::consts::PI;
use core::fmt::Write as _;

use embedded_graphics::{
    Drawable, Pixel,
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::{MonoTextStyle, ascii::FONT_10X20},
    pixelcolor::BinaryColor,
    primitives::{Circle, Primitive, PrimitiveStyle, Rectangle},
    text::{Alignment, Text},
};
use libm::{cosf, sinf};
use log::{debug, warn};

use crate::{
    arc::ArcSector,
    providers::{
        ClockService, ConnectivityService, GestureEvent, GestureService, TimeOfDay, TimerService,
    },
    settings::PersistedSettings,
};

const DATE_LABEL_BYTES: usize = 16;

/// Outcome of one cooperative tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Face geometry, in panel pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceConfig {
    pub center: Point,
    /// Hour ring outer radius.
    pub outer_radius: i32,
    /// Hour ring thickness.
    pub outer_thickness: i32,
    /// Minute pie radius.
    pub inner_radius: i32,
    /// Hour pointer dot radius.
    pub dot_radius: i32,
    /// Baseline anchor of the centered date label.
    pub date_anchor: Point,
    /// How long tapped-in hour markers stay up.
    pub marker_timeout_ms: u32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            center: Point::new(72, 74),
            outer_radius: 65,
            outer_thickness: 4,
            inner_radius: 55,
            dot_radius: 6,
            date_anchor: Point::new(72, 157),
            marker_timeout_ms: 3_000,
        }
    }
}

/// Ink/paper polarity of the face.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct FaceStyle {
    pub inverted: bool,
}

impl FaceStyle {
    fn ink(self) -> BinaryColor {
        if self.inverted {
            BinaryColor::Off
        } else {
            BinaryColor::On
        }
    }

    fn paper(self) -> BinaryColor {
        if self.inverted {
            BinaryColor::On
        } else {
            BinaryColor::Off
        }
    }
}

/// Time and link state mirrored from the providers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct ClockState {
    pub hour: u8,
    pub minute: u8,
    pub bluetooth_connected: bool,
}

/// Minute hand angle, clockwise degrees from 12 o'clock (0..=354, step 6).
pub fn minute_hand_angle(minute: u8) -> i32 {
    360 * minute as i32 / 60
}

/// Hour hand angle, clockwise degrees from 12 o'clock (continuous, 0..=359).
pub fn hour_hand_angle(hour: u8, minute: u8) -> i32 {
    360 * ((hour as i32 % 12) * 60 + minute as i32) / 720
}

/// Analog watchface over four injected providers.
///
/// Handlers only mutate state and set the dirty flag; [`Watchface::render`]
/// consumes the latest state in a single pass.
pub struct Watchface<CL, BT, GS, TM>
where
    CL: ClockService,
    BT: ConnectivityService,
    GS: GestureService,
    TM: TimerService,
{
    clock: CL,
    connectivity: BT,
    gestures: GS,
    timers: TM,
    config: FaceConfig,
    style: FaceStyle,
    state: ClockState,
    date_label: heapless::String<DATE_LABEL_BYTES>,
    /// `Some` while the tapped-in hour markers are shown; at most one timer
    /// is ever outstanding.
    marker_timer: Option<TM::Handle>,
    pending_redraw: bool,
}

include!("runtime.rs");
include!("view.rs");

#[cfg(test)]
mod tests;
