//! Pixel rasterization of annular arc sectors.
//!
//! A sector is scan-converted over its bounding square: a squared-radius test
//! picks the annulus, and two half-plane tests anchored at the start and end
//! rays pick the angular range. No per-pixel angle is ever computed.

use embedded_graphics::{Pixel, draw_target::DrawTarget, geometry::Point, pixelcolor::BinaryColor};

use crate::angle::Boundary;

/// An annular arc sector, swept clockwise from `start_deg` to `end_deg`.
///
/// Degrees count from the positive x axis towards positive y. An end angle
/// that normalizes to 0 closes the full circle; a start angle never does.
/// Sweeps that would cross the 0°/360° seam must be split by the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArcSector {
    pub center: Point,
    pub outer_radius: i32,
    pub thickness: i32,
    pub start_deg: i32,
    pub end_deg: i32,
}

impl ArcSector {
    pub const fn new(
        center: Point,
        outer_radius: i32,
        thickness: i32,
        start_deg: i32,
        end_deg: i32,
    ) -> Self {
        Self {
            center,
            outer_radius,
            thickness,
            start_deg,
            end_deg,
        }
    }

    /// Paints the sector onto `target`.
    ///
    /// A non-positive radius paints nothing and an oversized thickness is
    /// clamped to the radius. Cost is O(radius²) regardless of arc length.
    pub fn draw<D>(&self, color: BinaryColor, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let radius = self.outer_radius;
        if radius <= 0 {
            return Ok(());
        }

        let thickness = self.thickness.clamp(0, radius);
        let inner_sq = (radius - thickness) * (radius - thickness);
        let outer_sq = radius * radius;

        let start = Boundary::start(self.start_deg);
        let end = Boundary::end(self.end_deg);
        let start_at_zero = matches!(start, Boundary::Ray { degrees: 0, .. });

        let center = self.center;
        let pixels = (-radius..=radius).flat_map(move |y| {
            (-radius..=radius).filter_map(move |x| {
                let dist_sq = x * x + y * y;
                if dist_sq < inner_sq || dist_sq >= outer_sq {
                    return None;
                }

                let inside = on_swept_side(x, y, start, SweepSide::From, start_at_zero)
                    && on_swept_side(x, y, end, SweepSide::To, start_at_zero);

                inside.then(|| Pixel(Point::new(center.x + x, center.y + y), color))
            })
        });

        target.draw_iter(pixels)
    }
}

/// Which boundary of the sweep a half-plane test belongs to.
#[derive(Clone, Copy, Debug)]
enum SweepSide {
    /// The boundary the sweep leaves from.
    From,
    /// The boundary the sweep runs up to.
    To,
}

/// Half-plane test: is the pixel offset `(x, y)` on the swept side of
/// `boundary`?
///
/// The clauses split on the boundary ray's half of the circle and the sign of
/// `y`; the `y == 0` row is decided by dedicated tie-breaks, where the
/// positive-x clause keys on `start_at_zero` for both sides of the sweep.
fn on_swept_side(x: i32, y: i32, boundary: Boundary, side: SweepSide, start_at_zero: bool) -> bool {
    let Boundary::Ray { degrees, slope } = boundary else {
        // An end boundary that wrapped the whole way around: everything is
        // swept except the exclusions on the y == 0 row.
        return y != 0 || x < 0 || (start_at_zero && x > 0);
    };

    let xf = x as f32;
    let edge = y as f32 * slope;

    match side {
        SweepSide::From => {
            (y > 0 && degrees < 180 && xf <= edge)
                || (y < 0 && degrees > 180 && xf >= edge)
                || (y < 0 && degrees <= 180)
                || (y == 0 && degrees <= 180 && x < 0)
                || (y == 0 && start_at_zero && x > 0)
        }
        SweepSide::To => {
            (y > 0 && degrees < 180 && xf >= edge)
                || (y < 0 && degrees > 180 && xf <= edge)
                || (y > 0 && degrees >= 180)
                || (y == 0 && degrees >= 180 && x < 0)
                || (y == 0 && start_at_zero && x > 0)
        }
    }
}
