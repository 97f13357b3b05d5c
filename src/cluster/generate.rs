use super::point::{Point, PointList};
use rand::Rng;

pub const DEFAULT_PLANE_SIZE: u16 = 10000;
pub const DEFAULT_SPREAD: u16 = 100;
pub const DEFAULT_INITIAL_OBSERVATIONS: u16 = 20;
pub const DEFAULT_TOTAL_OBSERVATIONS: u16 = 40000;

/// Settings of the synthetic observation generator
///
/// `initial` points are scattered uniformly over the plane; every further
/// point is a random existing point moved by at most `spread` on each axis,
/// which grows blobs around the initial ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub width: u16,
    pub height: u16,
    pub spread: u16,
    pub initial: u16,
    pub total: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLANE_SIZE,
            height: DEFAULT_PLANE_SIZE,
            spread: DEFAULT_SPREAD,
            initial: DEFAULT_INITIAL_OBSERVATIONS,
            total: u32::from(DEFAULT_TOTAL_OBSERVATIONS),
        }
    }
}

/// Generates `config.total` observations
///
/// Grown points are not clamped to the plane.
pub fn generate_observations(config: &GeneratorConfig, rng: &mut impl Rng) -> PointList {
    let total = config.total as usize;
    let mut points = PointList::with_capacity(total);

    if total == 0 {
        return points;
    }

    let initial = usize::from(config.initial).clamp(1, total);

    for _ in 0..initial {
        points.push(Point::new(
            rng.random_range(0..=i32::from(config.width)),
            rng.random_range(0..=i32::from(config.height)),
        ));
    }

    let spread = i32::from(config.spread);
    while points.len() < total {
        let origin = points[rng.random_range(0..points.len())];
        let offset = Point::new(
            rng.random_range(-spread..=spread),
            rng.random_range(-spread..=spread),
        );
        points.push(origin + offset);
    }

    points
}
