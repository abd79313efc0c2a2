//! The closed set of console font sizes.

/// Console font size in pixels.
///
/// `Unknown` is the sentinel returned by lookups that match nothing and
/// carries no usable size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSize {
    /// No matching size.
    Unknown,
    /// 20px.
    Big,
    /// 16px.
    Medium,
    /// 12px.
    #[default]
    Small,
}

impl FontSize {
    /// Every variant, in lookup order.
    pub const ALL: [Self; 4] = [Self::Unknown, Self::Big, Self::Medium, Self::Small];

    /// Size in pixels (`-1` for `Unknown`).
    pub const fn value(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Big => 20,
            Self::Medium => 16,
            Self::Small => 12,
        }
    }

    /// Pixel size for a usable font, `None` for `Unknown`.
    pub const fn pixels(self) -> Option<u32> {
        match self {
            Self::Unknown => None,
            Self::Big => Some(20),
            Self::Medium => Some(16),
            Self::Small => Some(12),
        }
    }

    /// Find the variant whose value is `size`, or `default` when none matches.
    pub fn from_value(size: i32, default: Self) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.value() == size)
            .unwrap_or(default)
    }
}
