//! Closed subtype sets and the tolerant subtype lookup.

use serde::{Deserialize, Serialize};

use crate::geometry::{Compass, Edge};
use crate::sweep::Spokes;

/// A closed set of subtype names. The first listed variant is the fallback
/// for unknown or missing subtypes.
pub trait Subtype: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    /// Look up `requested`; fall back to the first listed variant.
    fn resolve(effect: &str, requested: Option<&str>) -> Self {
        if let Some(name) = requested {
            if let Some(found) = Self::ALL.iter().find(|s| s.as_str() == name) {
                return *found;
            }
            log::warn!(
                "{effect}: unknown subtype '{name}', using '{}'",
                Self::ALL[0].as_str()
            );
        }
        Self::ALL[0]
    }
}

macro_rules! subtype_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl Subtype for $ty {
            const ALL: &'static [Self] = &[$(<$ty>::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(<$ty>::$variant => $name),+
                }
            }
        }
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum InOut {
    In,
    Out,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CheckerDirection {
    Across,
    Downward,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Split {
    HorizontalIn,
    VerticalIn,
    HorizontalOut,
    VerticalOut,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Diagonal {
    LeftToBottom,
    RightToTop,
    LeftToTop,
    RightToBottom,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stretch {
    Across,
    FromLeft,
    FromTop,
    FromRight,
    FromBottom,
}

subtype_names!(Compass {
    TopLeft => "from-top-left",
    Top => "from-top",
    TopRight => "from-top-right",
    Left => "from-left",
    Right => "from-right",
    BottomLeft => "from-bottom-left",
    Bottom => "from-bottom",
    BottomRight => "from-bottom-right",
});

subtype_names!(Edge {
    Top => "from-top",
    Left => "from-left",
    Right => "from-right",
    Bottom => "from-bottom",
});

subtype_names!(Orientation {
    Vertical => "vertical",
    Horizontal => "horizontal",
});

subtype_names!(InOut {
    In => "in",
    Out => "out",
});

subtype_names!(CheckerDirection {
    Across => "across",
    Downward => "downward",
});

subtype_names!(Split {
    HorizontalIn => "horizontal-in",
    VerticalIn => "vertical-in",
    HorizontalOut => "horizontal-out",
    VerticalOut => "vertical-out",
});

subtype_names!(Diagonal {
    LeftToBottom => "left-to-bottom",
    RightToTop => "right-to-top",
    LeftToTop => "left-to-top",
    RightToBottom => "right-to-bottom",
});

subtype_names!(Spokes {
    One => "1",
    Two => "2",
    Three => "3",
    Four => "4",
    Eight => "8",
});

subtype_names!(Stretch {
    Across => "across",
    FromLeft => "from-left",
    FromTop => "from-top",
    FromRight => "from-right",
    FromBottom => "from-bottom",
});

impl Edge {
    pub fn as_compass(self) -> Compass {
        match self {
            Edge::Top => Compass::Top,
            Edge::Left => Compass::Left,
            Edge::Right => Compass::Right,
            Edge::Bottom => Compass::Bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subtype_resolves() {
        assert_eq!(Compass::resolve("fly-in", Some("from-left")), Compass::Left);
        assert_eq!(Spokes::resolve("wheel", Some("8")), Spokes::Eight);
    }

    #[test]
    fn unknown_or_missing_subtype_falls_back_to_first() {
        assert_eq!(Compass::resolve("fly-in", Some("sideways")), Compass::TopLeft);
        assert_eq!(Orientation::resolve("random-bars", None), Orientation::Vertical);
        assert_eq!(Split::resolve("split", Some("")), Split::HorizontalIn);
    }

    #[test]
    fn names_follow_declaration_order() {
        assert_eq!(Edge::names(), vec!["from-top", "from-left", "from-right", "from-bottom"]);
        assert_eq!(Spokes::names(), vec!["1", "2", "3", "4", "8"]);
    }
}
