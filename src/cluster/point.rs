//! Package cluster partitions 2-D integer observations into K clusters

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Point is a planar observation with integer coordinates
///
/// Ordering is lexicographic: by `x` first, then by `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns squared Euclidean distance between two points
    ///
    /// Saturates at `u64::MAX` instead of overflowing for extreme coordinates.
    pub fn sq_dist(&self, b: &Point) -> u64 {
        let dx = (i64::from(self.x) - i64::from(b.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(b.y)).unsigned_abs();

        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Returns true Euclidean distance between two points
    pub fn dist(&self, b: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(b.x);
        let dy = f64::from(self.y) - f64::from(b.y);

        dx.hypot(dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Componentwise integer division, truncating toward zero
impl Div<i32> for Point {
    type Output = Point;

    fn div(self, rhs: i32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Returns the componentwise integer mean of the points at `indices`
///
/// Sums are accumulated in `i64` and divided with truncation toward zero.
/// An empty index list yields the origin.
pub fn mean_of(points: &[Point], indices: &[usize]) -> Point {
    let mut sum_x: i64 = 0;
    let mut sum_y: i64 = 0;

    for &i in indices {
        sum_x += i64::from(points[i].x);
        sum_y += i64::from(points[i].y);
    }

    let n = indices.len().max(1) as i64;

    // Mean of i32 values always fits back into i32
    Point::new((sum_x / n) as i32, (sum_y / n) as i32)
}
