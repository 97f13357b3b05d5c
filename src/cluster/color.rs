use std::fmt;

/// Color tag attached to a cluster for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the palette color for the cluster at `index`, cycling through
    /// [`VISUALLY_DISTINCT_COLORS`]
    pub fn for_cluster(index: usize) -> Self {
        VISUALLY_DISTINCT_COLORS[index % VISUALLY_DISTINCT_COLORS.len()]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

/// Formats as `#rrggbb`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 20 colors that stay distinguishable next to each other
///
/// Taken from: <https://sashamaps.net/docs/resources/20-colors/>
pub const VISUALLY_DISTINCT_COLORS: [Color; 20] = [
    Color::rgb(230, 25, 75),
    Color::rgb(60, 180, 75),
    Color::rgb(255, 225, 25),
    Color::rgb(0, 130, 200),
    Color::rgb(245, 130, 48),
    Color::rgb(145, 30, 180),
    Color::rgb(70, 240, 240),
    Color::rgb(240, 50, 230),
    Color::rgb(210, 245, 60),
    Color::rgb(250, 190, 212),
    Color::rgb(0, 128, 128),
    Color::rgb(220, 190, 255),
    Color::rgb(170, 110, 40),
    Color::rgb(255, 250, 200),
    Color::rgb(128, 0, 0),
    Color::rgb(170, 255, 195),
    Color::rgb(128, 128, 0),
    Color::rgb(255, 215, 180),
    Color::rgb(0, 0, 128),
    Color::rgb(128, 128, 128),
];
