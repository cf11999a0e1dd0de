//! Render hints for drawing a layout.
//!
//! The renderer lays zones out around a centre field on a unit canvas. These
//! helpers hold the fixed coordinates so every front end draws a venue the
//! same way.

use crate::types::{SportType, ZonePosition};
use serde::Serialize;

/// Normalised canvas anchor of a zone plus the rotation of its label
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    /// Horizontal position, 0 = left edge, 1 = right edge
    pub x: f64,
    /// Vertical position, 0 = top edge, 1 = bottom edge
    pub y: f64,
    /// Clockwise label rotation in degrees
    pub rotation_deg: f64,
}

impl Anchor {
    const fn at(x: f64, y: f64, rotation_deg: f64) -> Self {
        Self { x, y, rotation_deg }
    }
}

impl ZonePosition {
    /// Where a zone in this position is drawn
    #[must_use]
    pub const fn anchor(self) -> Anchor {
        match self {
            Self::Top => Anchor::at(0.5, 0.0, 0.0),
            Self::Bottom => Anchor::at(0.5, 1.0, 180.0),
            Self::Left => Anchor::at(0.0, 0.5, -90.0),
            Self::Right => Anchor::at(1.0, 0.5, 90.0),
            Self::TopLeft => Anchor::at(0.15, 0.15, -45.0),
            Self::TopRight => Anchor::at(0.85, 0.15, 45.0),
            Self::BottomLeft => Anchor::at(0.15, 0.85, -135.0),
            Self::BottomRight => Anchor::at(0.85, 0.85, 135.0),
            Self::Center => Anchor::at(0.5, 0.5, 0.0),
        }
    }
}

/// Outline of the centre field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    /// Round ground
    Circle,
    /// Pitch
    Rectangle,
    /// Indoor court
    Court,
    /// Performance stage
    Stage,
}

/// Centre field drawn underneath the zones
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Outline
    pub shape: FieldShape,
    /// Width in canvas pixels
    pub width: u32,
    /// Height in canvas pixels
    pub height: u32,
    /// Text printed on the field
    pub label: Option<&'static str>,
}

impl SportType {
    /// The centre field for this sport
    #[must_use]
    pub const fn field(self) -> FieldSpec {
        match self {
            Self::Cricket => FieldSpec {
                shape: FieldShape::Circle,
                width: 650,
                height: 650,
                label: Some("OVAL"),
            },
            Self::Football => FieldSpec {
                shape: FieldShape::Rectangle,
                width: 850,
                height: 550,
                label: Some("PITCH"),
            },
            Self::Music => FieldSpec {
                shape: FieldShape::Stage,
                width: 450,
                height: 280,
                label: None,
            },
            Self::Basketball | Self::Default => FieldSpec {
                shape: FieldShape::Court,
                width: 450,
                height: 280,
                label: Some("COURT"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_anchors_face_the_field() {
        assert_eq!(ZonePosition::Top.anchor(), Anchor::at(0.5, 0.0, 0.0));
        assert_eq!(ZonePosition::Bottom.anchor().rotation_deg, 180.0);
        assert_eq!(ZonePosition::Left.anchor().rotation_deg, -90.0);
        assert_eq!(ZonePosition::Right.anchor().x, 1.0);
    }

    #[test]
    fn diagonal_anchors_sit_inside_the_canvas() {
        for position in [
            ZonePosition::TopLeft,
            ZonePosition::TopRight,
            ZonePosition::BottomLeft,
            ZonePosition::BottomRight,
        ] {
            let anchor = position.anchor();
            assert!((0.0..=1.0).contains(&anchor.x));
            assert!((0.0..=1.0).contains(&anchor.y));
            assert!((anchor.rotation_deg.abs() - 45.0) % 90.0 == 0.0);
        }
    }

    #[test]
    fn fields_per_sport() {
        assert_eq!(SportType::Cricket.field().shape, FieldShape::Circle);
        assert_eq!(SportType::Football.field().label, Some("PITCH"));
        assert_eq!(SportType::Music.field().label, None);
        assert_eq!(SportType::Default.field(), SportType::Basketball.field());
    }
}
