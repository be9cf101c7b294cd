//! Hard-edged rasterization onto an RGBA buffer.
//!
//! A pixel belongs to a primitive when its center lies inside the primitive's
//! stroked outline. There is no antialiasing, so the same input always yields
//! the same bytes.

use std::ops::Range;

use egui::{Color32, Pos2, Rect, pos2};
use image::{Rgba, RgbaImage};

/// Thinnest stroke that still covers the pixel under it
const MIN_HALF_WIDTH: f32 = 0.5;

pub(crate) fn half_width(line_width: f32) -> f32 {
    (line_width * 0.5).max(MIN_HALF_WIDTH)
}

pub(crate) fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

/// Pixel indices touched by `[min, max]` along one axis, clamped to `0..limit`.
fn pixel_span(min: f32, max: f32, limit: u32) -> Range<u32> {
    if !(min.is_finite() && max.is_finite()) || max < 0.0 {
        return 0..0;
    }
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil().max(0.0) as u32).min(limit);
    start.min(end)..end
}

#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Source-over compositing of `src` onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let alpha = src[3] as u16;
    if alpha == 255 {
        *dst = src;
        return;
    }
    if alpha == 0 {
        return;
    }
    for channel in 0..3 {
        dst[channel] = blend_channel(src[channel], dst[channel], alpha);
    }
    dst[3] = blend_channel(255, dst[3], alpha);
}

/// Paint every pixel inside `bounds` whose center satisfies `inside`.
fn stamp(image: &mut RgbaImage, bounds: Rect, color: Rgba<u8>, inside: impl Fn(Pos2) -> bool) {
    let xs = pixel_span(bounds.min.x, bounds.max.x, image.width());
    let ys = pixel_span(bounds.min.y, bounds.max.y, image.height());
    for y in ys {
        for x in xs.clone() {
            let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
            if inside(center) {
                blend(image.get_pixel_mut(x, y), color);
            }
        }
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Overwrite every pixel touched by `region` with `color`, without blending.
pub(crate) fn fill_region(image: &mut RgbaImage, region: Rect, color: Rgba<u8>) {
    let xs = pixel_span(region.min.x, region.max.x, image.width());
    let ys = pixel_span(region.min.y, region.max.y, image.height());
    for y in ys {
        for x in xs.clone() {
            image.put_pixel(x, y, color);
        }
    }
}

/// Round-capped segment.
pub(crate) fn segment(image: &mut RgbaImage, from: Pos2, to: Pos2, half: f32, color: Rgba<u8>) {
    let bounds = Rect::from_two_pos(from, to).expand(half);
    stamp(image, bounds, color, |p| distance_to_segment(p, from, to) <= half);
}

/// Rectangle outline with square (mitered) corners.
pub(crate) fn rectangle_outline(image: &mut RgbaImage, rect: Rect, half: f32, color: Rgba<u8>) {
    let outer = rect.expand(half);
    let inner = rect.shrink(half);
    stamp(image, outer, color, |p| {
        let in_hole = p.x > inner.min.x && p.x < inner.max.x && p.y > inner.min.y && p.y < inner.max.y;
        outer.contains(p) && !in_hole
    });
}

/// Circle outline.
pub(crate) fn ring(image: &mut RgbaImage, center: Pos2, radius: f32, half: f32, color: Rgba<u8>) {
    let bounds = Rect::from_center_size(center, egui::Vec2::splat((radius + half) * 2.0));
    stamp(image, bounds, color, |p| (p.distance(center) - radius).abs() <= half);
}

/// Closed polygon outline with round joins.
pub(crate) fn closed_outline(image: &mut RgbaImage, vertices: &[Pos2], half: f32, color: Rgba<u8>) {
    if vertices.is_empty() {
        return;
    }
    let bounds = Rect::from_points(vertices).expand(half);
    stamp(image, bounds, color, |p| {
        vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .any(|(a, b)| distance_to_segment(p, *a, *b) <= half)
    });
}
