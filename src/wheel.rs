//! Geometry for drawing the wheel as SVG.
//!
//! Sector `i` spans `[i * slice, (i + 1) * slice)` degrees measured clockwise
//! from 12 o'clock, where the pointer sits. The whole disc is rotated
//! clockwise by CSS, so after a rotation of `r` degrees the pointer reads the
//! disc at `360 - r`. That mirror is why [`crate::resolve_winner_index`]
//! reverses the raw sector number.

use crate::config::{FULL_TURN_DEG, LABEL_RADIUS_RATIO};

const FULL_TURN: f64 = FULL_TURN_DEG as f64;

/// Cumulative rotation after a spin of `angle` degrees.
///
/// The previous rotation is rounded up to a whole turn first, so the disc
/// always moves forward and `result % 360 == angle % 360`.
pub fn next_rotation(previous: u64, angle: u32) -> u64 {
    let turn = u64::from(FULL_TURN_DEG);
    previous.div_ceil(turn) * turn + u64::from(angle)
}

fn point_at(deg: f64, radius: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (radius * rad.sin(), -radius * rad.cos())
}

/// SVG path for sector `index` of `count`, centred on the origin.
///
/// A single option fills the whole disc, which an arc path cannot express;
/// callers draw a circle instead when this returns `None`.
pub fn sector_path(index: usize, count: usize, radius: f64) -> Option<String> {
    if count < 2 || index >= count {
        return None;
    }
    let slice = FULL_TURN / count as f64;
    let start = slice * index as f64;
    let (x1, y1) = point_at(start, radius);
    let (x2, y2) = point_at(start + slice, radius);
    let large_arc = u8::from(slice > 180.0);
    Some(format!(
        "M 0 0 L {:.3} {:.3} A {r} {r} 0 {} 1 {:.3} {:.3} Z",
        x1,
        y1,
        large_arc,
        x2,
        y2,
        r = radius
    ))
}

/// Where to put the label of sector `index`: `(x, y, rotation_deg)`.
///
/// Labels sit on the sector's bisector and read outwards from the hub.
pub fn label_anchor(index: usize, count: usize, radius: f64) -> (f64, f64, f64) {
    let slice = FULL_TURN / count.max(1) as f64;
    let mid = slice * index as f64 + slice / 2.0;
    let (x, y) = point_at(mid, radius * LABEL_RADIUS_RATIO);
    (x, y, mid - 90.0)
}

/// Sector sitting under the pointer after the disc turned `rotation` degrees.
pub fn sector_under_pointer(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let slice = FULL_TURN / count as f64;
    let facing = (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    Some(((facing / slice).floor() as usize).min(count - 1))
}

/// Alternating sector fill classes.
pub fn sector_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        "sector sector-even"
    } else {
        "sector sector-odd"
    }
}
