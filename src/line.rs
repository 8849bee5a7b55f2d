//! Real-valued line rasterisation.

use crate::geometry::Point;
use crate::path::Path;

/// Bresenham-variant line between two real-valued points, advancing the
/// minor axis by `step` fractions of a cell at a time. The error
/// accumulator advances by the line's slope; once it exceeds 0.5 the minor
/// axis steps and the accumulator is decremented by 1. Both endpoints are
/// included.
pub fn rasterize_line(p1: Point, p2: Point, step: f64) -> Path {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    let mut path = Path::new();

    if dx == 0.0 && dy == 0.0 {
        path.push_back(p1);
        return path;
    }

    if dx.abs() >= dy.abs() {
        let slope = dy / dx;
        let sx = if dx >= 0.0 { step } else { -step };
        let mut x = p1.x;
        let mut y = p1.y;
        let mut err = 0.0;
        let steps = (dx.abs() / step).round() as i64;
        path.push_back(Point::new(x, y));
        for _ in 0..steps {
            x += sx;
            err += slope.abs() * step;
            while err > 0.5 {
                y += if dy >= 0.0 { step } else { -step };
                err -= 1.0;
            }
            path.push_back(Point::new(x, y));
        }
    } else {
        let slope = dx / dy;
        let sy = if dy >= 0.0 { step } else { -step };
        let mut x = p1.x;
        let mut y = p1.y;
        let mut err = 0.0;
        let steps = (dy.abs() / step).round() as i64;
        path.push_back(Point::new(x, y));
        for _ in 0..steps {
            y += sy;
            err += slope.abs() * step;
            while err > 0.5 {
                x += if dx >= 0.0 { step } else { -step };
                err -= 1.0;
            }
            path.push_back(Point::new(x, y));
        }
    }

    path
}
