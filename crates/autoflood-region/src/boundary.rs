//! Outer boundary of a mask
//!
//! The outer boundary is the set of pixels that are not in the mask but
//! touch it under the chosen connectivity. Only pixels of the mask's own
//! array are considered, so a mask reaching the array edge has no boundary
//! beyond it.

use crate::conncomp::ConnectivityType;
use autoflood_core::Mask;

const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighbour offsets for a connectivity
fn neighbor_offsets(connectivity: ConnectivityType) -> &'static [(i32, i32)] {
    match connectivity {
        ConnectivityType::FourWay => &FOUR_WAY,
        ConnectivityType::EightWay => &EIGHT_WAY,
    }
}

/// Pixels outside `mask` with at least one neighbour inside it.
///
/// # Examples
///
/// ```
/// use autoflood_core::Mask;
/// use autoflood_region::{ConnectivityType, outer_boundary};
///
/// let mask = Mask::from_fn(3, 3, |x, y| x == 1 && y == 1);
/// let ring = outer_boundary(&mask, ConnectivityType::FourWay);
/// assert_eq!(ring.count(), 4);
/// assert!(!ring.is_set(0, 0));
/// ```
pub fn outer_boundary(mask: &Mask, connectivity: ConnectivityType) -> Mask {
    let (w, h) = mask.dimensions();
    let offsets = neighbor_offsets(connectivity);
    Mask::from_fn(w, h, |x, y| {
        !mask.is_set(x, y)
            && offsets.iter().any(|&(dx, dy)| {
                let (nx, ny) = (x as i64 + dx as i64, y as i64 + dy as i64);
                nx >= 0 && ny >= 0 && mask.is_set(nx as u32, ny as u32)
            })
    })
}
