//! Chaining cell segments into polylines for drawing.
//!
//! The extraction pass itself never links segments; this is an optional
//! post-processing step for renderers that prefer long strokes.

use serde::Serialize;

use crate::embedding::Position;
use crate::segment::Segment;

/// Default endpoint matching tolerance, in drawing units.
pub const DEFAULT_TOLERANCE: f32 = 1e-3;

/// A connected contour line at one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline<P> {
    pub level_index: usize,
    pub level: f32,
    /// Vertices in drawing order. A closed ring does not repeat its first
    /// vertex.
    pub points: Vec<P>,
    pub closed: bool,
}

impl<P: Position> Polyline<P> {
    /// Total length including the closing edge of a ring.
    pub fn length(&self) -> f32 {
        let mut length: f32 = self
            .points
            .windows(2)
            .map(|w| w[0].distance_sq(w[1]).sqrt())
            .sum();
        if self.closed {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                length += last.distance_sq(*first).sqrt();
            }
        }
        length
    }
}

/// Chain segments that share endpoints (within `tolerance`) into polylines.
///
/// Segments are only joined with others of the same level. Output follows
/// the order in which each level first appears, and within a level the order
/// of each chain's first segment.
pub fn connect_segments<P: Position>(segments: &[Segment<P>], tolerance: f32) -> Vec<Polyline<P>> {
    let tol_sq = tolerance * tolerance;
    let mut polylines = Vec::new();
    let mut used = vec![false; segments.len()];

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;

        let start = &segments[start_idx];
        let level_index = start.level_index;
        let mut points = vec![start.p0, start.p1];

        // Grow the tail, then the head.
        for at_tail in [true, false] {
            loop {
                let anchor = if at_tail {
                    points[points.len() - 1]
                } else {
                    points[0]
                };
                let next = segments.iter().enumerate().find_map(|(i, seg)| {
                    if used[i] || seg.level_index != level_index {
                        return None;
                    }
                    if seg.p0.distance_sq(anchor) <= tol_sq {
                        Some((i, seg.p1))
                    } else if seg.p1.distance_sq(anchor) <= tol_sq {
                        Some((i, seg.p0))
                    } else {
                        None
                    }
                });

                let Some((i, point)) = next else {
                    break;
                };
                used[i] = true;
                if at_tail {
                    points.push(point);
                } else {
                    points.insert(0, point);
                }
            }
        }

        let closed = points.len() > 3 && points[0].distance_sq(points[points.len() - 1]) <= tol_sq;
        if closed {
            points.pop();
        }

        polylines.push(Polyline {
            level_index,
            level: start.level,
            points,
            closed,
        });
    }

    polylines
}

/// Chaikin corner cutting. Open polylines keep their endpoints.
pub fn smooth_polyline<P: Position>(polyline: &Polyline<P>, passes: u32) -> Polyline<P> {
    if passes == 0 || polyline.points.len() < 3 {
        return polyline.clone();
    }

    let mut points = polyline.points.clone();

    for _ in 0..passes {
        let n = points.len();
        let edge_count = if polyline.closed { n } else { n - 1 };
        let mut next = Vec::with_capacity(edge_count * 2 + 2);

        if !polyline.closed {
            next.push(points[0]);
        }
        for i in 0..edge_count {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            next.push(p1.lerp(p2, 0.25));
            next.push(p1.lerp(p2, 0.75));
        }
        if !polyline.closed {
            next.push(points[n - 1]);
        }

        points = next;
    }

    Polyline {
        level_index: polyline.level_index,
        level: polyline.level,
        points,
        closed: polyline.closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Edge;
    use crate::embedding::Point2;

    fn seg(level_index: usize, a: (f32, f32), b: (f32, f32)) -> Segment<Point2> {
        Segment {
            level_index,
            level: level_index as f32,
            cell: (0, 0),
            edges: (Edge::Left, Edge::Right),
            p0: Point2::new(a.0, a.1),
            p1: Point2::new(b.0, b.1),
        }
    }

    #[test]
    fn test_connect_open_chain_both_directions() {
        let segments = vec![
            seg(0, (1.0, 0.0), (2.0, 0.0)),
            seg(0, (2.0, 0.0), (3.0, 0.0)),
            seg(0, (1.0, 0.0), (0.0, 0.0)),
        ];
        let lines = connect_segments(&segments, DEFAULT_TOLERANCE);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points.len(), 4);
        assert!(!lines[0].closed);
        assert_eq!(lines[0].points[0], Point2::new(0.0, 0.0));
        assert_eq!(lines[0].points[3], Point2::new(3.0, 0.0));
    }

    #[test]
    fn test_connect_closed_ring() {
        let segments = vec![
            seg(0, (0.0, 0.0), (1.0, 0.0)),
            seg(0, (1.0, 1.0), (1.0, 0.0)),
            seg(0, (1.0, 1.0), (0.0, 1.0)),
            seg(0, (0.0, 1.0), (0.0, 0.0)),
        ];
        let lines = connect_segments(&segments, DEFAULT_TOLERANCE);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 4);
        assert!((lines[0].length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_connect_keeps_levels_apart() {
        let segments = vec![seg(0, (0.0, 0.0), (1.0, 0.0)), seg(1, (1.0, 0.0), (2.0, 0.0))];
        let lines = connect_segments(&segments, DEFAULT_TOLERANCE);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].level_index, 1);
    }

    #[test]
    fn test_smooth_open_keeps_endpoints() {
        let line = Polyline {
            level_index: 0,
            level: 0.0,
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)],
            closed: false,
        };
        let smoothed = smooth_polyline(&line, 2);
        assert_eq!(smoothed.points.first(), line.points.first());
        assert_eq!(smoothed.points.last(), line.points.last());
        assert!(smoothed.points.len() > line.points.len());
    }

    #[test]
    fn test_smooth_zero_passes_is_identity() {
        let line = Polyline {
            level_index: 0,
            level: 0.0,
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)],
            closed: true,
        };
        assert_eq!(smooth_polyline(&line, 0), line);
        assert_eq!(smooth_polyline(&line, 1).points.len(), 6);
    }
}
