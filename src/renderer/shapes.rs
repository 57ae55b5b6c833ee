//! Shape generation for 2D primitives
//!
//! Everything is a quad (two triangles); corner rounding happens in the
//! fragment shader.

use glam::Vec2;

use super::vertex::Vertex;
use crate::colors::Rgba;

const CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// Axis-aligned quad around `center`
pub fn quad(out: &mut Vec<Vertex>, center: Vec2, half: Vec2, color: Rgba, roundness: f32) {
    if half.x <= 0.0 || half.y <= 0.0 || color[3] <= 0.0 {
        return;
    }
    out.extend(CORNERS.iter().map(|&[lx, ly]| {
        Vertex::shaped(
            center.x + lx * half.x,
            center.y + ly * half.y,
            color,
            [lx, ly],
            roundness,
        )
    }));
}

/// Square-cornered rectangle between two corners
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: Rgba) {
    let center = (min + max) * 0.5;
    let half = (max - min).abs() * 0.5;
    quad(out, center, half, color, 0.0);
}

pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Rgba) {
    quad(out, center, Vec2::splat(radius), color, 1.0);
}

/// Straight band of `width` from `a` to `b` (axis-aligned segments only)
pub fn bar(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: Rgba) {
    let half_w = width * 0.5;
    let min = a.min(b) - Vec2::splat(half_w);
    let max = a.max(b) + Vec2::splat(half_w);
    rect(out, min, max, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_emits_two_triangles() {
        let mut out = Vec::new();
        quad(&mut out, Vec2::new(10.0, 5.0), Vec2::new(2.0, 1.0), [1.0; 4], 0.5);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [8.0, 4.0]);
        assert_eq!(out[2].position, [12.0, 6.0]);
        assert!(out.iter().all(|v| v.roundness == 0.5));
    }

    #[test]
    fn test_degenerate_shapes_are_skipped() {
        let mut out = Vec::new();
        quad(&mut out, Vec2::ZERO, Vec2::new(0.0, 1.0), [1.0; 4], 0.0);
        circle(&mut out, Vec2::ZERO, 3.0, [1.0, 1.0, 1.0, 0.0]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_bar_covers_both_ends() {
        let mut out = Vec::new();
        bar(&mut out, Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), 2.0, [1.0; 4]);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 11.0);
    }
}
