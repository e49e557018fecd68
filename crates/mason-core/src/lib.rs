#![cfg_attr(not(test), no_std)]

//! Analog watchface core: arc-sector rasterization and face composition.

pub mod angle;
pub mod arc;
pub mod face;
pub mod providers;
pub mod settings;

pub use arc::ArcSector;
pub use face::{
    ClockState, FaceConfig, FaceStyle, TickResult, Watchface, hour_hand_angle, minute_hand_angle,
};
