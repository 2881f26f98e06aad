use crate::error::Error;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of points in every generated coordinate sequence.
pub const POINT_COUNT: usize = 100;
/// Points per side of the square pattern (4 sides x 25 = 100).
pub const POINTS_PER_SIDE: usize = 25;

/// A 2D point on the pattern path, both coordinates in [-1, 1].
pub type Point = (f64, f64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Circle,
    Wave,
    Square,
}

impl PatternKind {
    /// Human-facing name shown in the UI header.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Circle => "Circle Breathing (Hold Breath)",
            PatternKind::Wave => "Wave Breathing (Inhale/Exhale)",
            PatternKind::Square => "Square Breathing (Box Breathing)",
        }
    }

    /// One-line technique description shown below the chart.
    pub fn guide(&self) -> &'static str {
        match self {
            PatternKind::Circle => {
                "Hold breath technique. Follow the dot around the circle."
            }
            PatternKind::Wave => {
                "Basic inhale/exhale technique. Follow the dot up (inhale) and down (exhale)."
            }
            PatternKind::Square => {
                "Box breathing technique. Follow the dot around the square: inhale, hold, exhale, hold."
            }
        }
    }
}

/// An ordered, fixed-length path traced once per breathing cycle.
///
/// Index 0 is the path start and the last index the path end; the two
/// may coincide. Regenerated on configuration changes, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSequence {
    points: Vec<Point>,
}

impl CoordinateSequence {
    fn new(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Point> {
        self.points.get(idx).copied()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// A breathing pattern: a shape plus the configured cycle duration.
///
/// Immutable once constructed. `duration_secs` is validated here but
/// does not affect geometry for any current shape; it is kept on the
/// pattern so duration-dependent shapes stay possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    duration_secs: f64,
}

impl Pattern {
    pub fn new(kind: PatternKind, duration_secs: f64) -> Result<Self, Error> {
        if duration_secs <= 0.0 {
            return Err(Error::NonPositiveDuration(duration_secs));
        }
        Ok(Self {
            kind,
            duration_secs,
        })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Generate the full coordinate sequence for one cycle of this shape.
    /// Deterministic: equal inputs yield bit-identical output.
    pub fn coordinates(&self) -> CoordinateSequence {
        match self.kind {
            PatternKind::Circle => circle_coordinates(),
            PatternKind::Wave => wave_coordinates(),
            PatternKind::Square => square_coordinates(),
        }
    }

    /// Start/end marker positions. These can differ from the literal
    /// first/last generated points: circle and square override them to
    /// their exact corner/bottom positions.
    pub fn anchors(&self) -> (Point, Point) {
        match self.kind {
            PatternKind::Circle => ((0.0, -1.0), (0.0, -1.0)),
            PatternKind::Square => ((-1.0, -1.0), (-1.0, -1.0)),
            PatternKind::Wave => {
                let seq = self.coordinates();
                (seq.first(), seq.last())
            }
        }
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
/// The final value is pinned to `end` exactly so sequence endpoints do
/// not drift with accumulated floating-point error.
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    debug_assert!(count > 1);
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(move |i| {
        if i == count - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Unit circle sampled from the bottom (-pi/2) going counterclockwise.
fn circle_coordinates() -> CoordinateSequence {
    let points = linspace(-PI / 2.0, 3.0 * PI / 2.0, POINT_COUNT)
        .map(|t| (t.cos(), t.sin()))
        .collect();
    CoordinateSequence::new(points)
}

/// One sine period, x scaled linearly onto [-1, 1].
fn wave_coordinates() -> CoordinateSequence {
    let points = linspace(0.0, 2.0 * PI, POINT_COUNT)
        .map(|t| (t / (2.0 * PI) * 2.0 - 1.0, t.sin()))
        .collect();
    CoordinateSequence::new(points)
}

/// Square traced bottom-left -> bottom-right -> top-right -> top-left
/// -> back toward bottom-left, 25 points per side.
fn square_coordinates() -> CoordinateSequence {
    let bottom = linspace(-1.0, 1.0, POINTS_PER_SIDE).map(|x| (x, -1.0));
    let right = linspace(-1.0, 1.0, POINTS_PER_SIDE).map(|y| (1.0, y));
    let top = linspace(1.0, -1.0, POINTS_PER_SIDE).map(|x| (x, 1.0));
    let left = linspace(1.0, -1.0, POINTS_PER_SIDE).map(|y| (-1.0, y));

    let points = bottom.chain(right).chain(top).chain(left).collect();
    CoordinateSequence::new(points)
}
