//! Shape records handed over by the document reader: walls as thick line segments and
//! circular or elliptical regions marking the start and goal.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::fmt;

/// A point in the continuous coordinate space of the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    pub const fn new(x: f64, y: f64) -> ScenePoint {
        ScenePoint { x, y }
    }
    pub fn distance_squared(&self, other: &ScenePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl fmt::Display for ScenePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A wall from `(x1, y1)` to `(x2, y2)`. Any point within `thickness` of the segment collides
/// with it, so `thickness` acts as a perpendicular half-width.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub thickness: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) -> Segment {
        Segment {
            x1,
            y1,
            x2,
            y2,
            thickness,
        }
    }

    /// Closest point on the segment to `p`. The projection parameter is clamped to `[0, 1]`;
    /// a zero-length segment always yields its first endpoint.
    pub fn closest_point(&self, p: &ScenePoint) -> ScenePoint {
        let a = p.x - self.x1;
        let b = p.y - self.y1;
        let c = self.x2 - self.x1;
        let d = self.y2 - self.y1;
        let len_sq = c * c + d * d;
        let param = if len_sq != 0.0 {
            (a * c + b * d) / len_sq
        } else {
            -1.0
        };
        if param < 0.0 {
            ScenePoint::new(self.x1, self.y1)
        } else if param > 1.0 {
            ScenePoint::new(self.x2, self.y2)
        } else {
            ScenePoint::new(self.x1 + param * c, self.y1 + param * d)
        }
    }

    pub fn distance_squared(&self, p: &ScenePoint) -> f64 {
        p.distance_squared(&self.closest_point(p))
    }

    /// Inclusive: a point at exactly `thickness` from the segment is blocked.
    pub fn blocks(&self, p: &ScenePoint) -> bool {
        self.distance_squared(p) <= self.thickness * self.thickness
    }
}

/// What a region marks in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegionLabel {
    Start,
    Goal,
    None,
}

/// A circle (`rx == ry`) or ellipse centered on `(cx, cy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub label: RegionLabel,
}

impl Region {
    pub fn circle(cx: f64, cy: f64, r: f64, label: RegionLabel) -> Region {
        Region {
            cx,
            cy,
            rx: r,
            ry: r,
            label,
        }
    }
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, label: RegionLabel) -> Region {
        Region {
            cx,
            cy,
            rx,
            ry,
            label,
        }
    }
    pub fn center(&self) -> ScenePoint {
        ScenePoint::new(self.cx, self.cy)
    }
    /// Ellipses are tested as circles with the mean of both radii.
    pub fn radius(&self) -> f64 {
        if self.rx == self.ry {
            self.rx
        } else {
            (self.rx + self.ry) / 2.0
        }
    }
    pub fn contains(&self, p: &ScenePoint) -> bool {
        let r = self.radius();
        p.distance_squared(&self.center()) <= r * r
    }
}

/// A single shape record as produced by the external document reader.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeDescriptor {
    Segment(Segment),
    Region(Region),
}

impl ShapeDescriptor {
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            ShapeDescriptor::Segment(s) => Some(s),
            ShapeDescriptor::Region(_) => None,
        }
    }
    pub fn as_region(&self) -> Option<&Region> {
        match self {
            ShapeDescriptor::Region(r) => Some(r),
            ShapeDescriptor::Segment(_) => None,
        }
    }
}

impl From<Segment> for ShapeDescriptor {
    fn from(segment: Segment) -> Self {
        ShapeDescriptor::Segment(segment)
    }
}

impl From<Region> for ShapeDescriptor {
    fn from(region: Region) -> Self {
        ShapeDescriptor::Region(region)
    }
}
