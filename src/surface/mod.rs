use std::io::Cursor;
use std::sync::Arc;

use egui::{Color32, ColorImage, Pos2, Rect};
use image::{ImageFormat, RgbaImage};

use crate::error::{SketchError, SketchResult};
use crate::style::Style;
use crate::tools::shapes::Shape;

mod raster;

/// Immutable copy of the whole pixel buffer at one instant.
///
/// Cloning a snapshot shares the pixels; only [`Surface::snapshot`] copies them.
#[derive(Clone)]
pub struct Snapshot {
    pixels: Arc<RgbaImage>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// True when both snapshots share the same allocation
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.pixels == *other.pixels
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// The raster canvas everything is drawn onto
pub struct Surface {
    pixels: RgbaImage,
    background: Color32,
    // Bumped on every mutation so the UI knows when to re-upload the texture
    revision: u64,
}

impl Surface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, raster::to_rgba(background)),
            background,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Color32::from_rgba_unmultiplied(r, g, b, a)
        })
    }

    /// Draw a round-capped segment. Freehand and eraser strokes are chains of these.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &Style) {
        let half = raster::half_width(style.line_width);
        raster::segment(&mut self.pixels, from, to, half, raster::to_rgba(style.stroke_color));
        self.touch();
    }

    /// Draw the outline of `shape`. Shapes are never filled.
    pub fn stroke_shape(&mut self, shape: &Shape, style: &Style) {
        let half = raster::half_width(style.line_width);
        let color = raster::to_rgba(style.stroke_color);
        match *shape {
            Shape::Segment { from, to } => raster::segment(&mut self.pixels, from, to, half, color),
            Shape::Rectangle(rect) => raster::rectangle_outline(&mut self.pixels, rect, half, color),
            Shape::Circle { center, radius } => {
                raster::ring(&mut self.pixels, center, radius, half, color)
            }
            Shape::Triangle(vertices) => {
                raster::closed_outline(&mut self.pixels, &vertices, half, color)
            }
        }
        self.touch();
    }

    /// Reset to the background color, either everything or just `region`.
    ///
    /// A region must come from the shape as it is now (see [`Shape::bounds`]);
    /// a stale box leaves the parts of the shape outside it on screen.
    pub fn clear(&mut self, region: Option<Rect>) {
        let background = raster::to_rgba(self.background);
        match region {
            Some(region) => raster::fill_region(&mut self.pixels, region, background),
            None => self.pixels.pixels_mut().for_each(|p| *p = background),
        }
        self.touch();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: Arc::new(self.pixels.clone()),
        }
    }

    /// Overwrite the buffer with the contents of `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.pixels.clone_from(&snapshot.pixels);
        self.touch();
    }

    /// True when the buffer is byte-identical to `snapshot`.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.pixels == *snapshot.pixels
    }

    /// Encode the current buffer as PNG.
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        if self.is_empty() {
            log::warn!("Refusing to export an empty {}x{} surface", self.width(), self.height());
            return Err(SketchError::EmptySurface);
        }
        let mut bytes = Vec::new();
        self.pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        log::debug!(
            "Encoded {}x{} surface as PNG ({} bytes)",
            self.width(),
            self.height(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Copy the buffer into an egui image for display
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::shapes;
    use egui::pos2;

    fn surface() -> Surface {
        Surface::new(64, 48, Color32::WHITE)
    }

    fn count(surface: &Surface, color: Color32) -> usize {
        let mut n = 0;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_new_surface_is_background() {
        let surface = surface();
        assert_eq!(count(&surface, Color32::WHITE), 64 * 48);
        assert_eq!(surface.pixel(64, 0), None);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut surface = surface();
        let blank = surface.snapshot();
        surface.stroke_segment(pos2(5.0, 5.0), pos2(40.0, 30.0), &Style::default());
        assert!(!surface.matches(&blank));

        let drawn = surface.snapshot();
        surface.restore(&blank);
        assert!(surface.matches(&blank));
        surface.restore(&drawn);
        assert!(surface.matches(&drawn));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_drawing() {
        let mut surface = surface();
        let before = surface.snapshot();
        let copy = before.clone();
        surface.stroke_shape(&shapes::circle(pos2(30.0, 20.0), 10.0), &Style::default());
        assert!(before.ptr_eq(&copy));
        assert_eq!(before, Surface::new(64, 48, Color32::WHITE).snapshot());
    }

    #[test]
    fn test_clear_region_only_touches_region() {
        let mut surface = surface();
        let style = Style::new(Color32::RED, 2.0);
        let circle = shapes::circle(pos2(16.0, 16.0), 6.0);
        surface.stroke_shape(&circle, &style);
        surface.stroke_segment(pos2(50.0, 5.0), pos2(50.0, 40.0), &style);

        surface.clear(Some(circle.bounds(style.line_width)));
        // The circle is gone but the far segment survives
        assert_eq!(surface.pixel(22, 16), Some(Color32::WHITE));
        assert_eq!(surface.pixel(50, 20), Some(Color32::RED));

        surface.clear(None);
        assert_eq!(count(&surface, Color32::WHITE), 64 * 48);
    }

    #[test]
    fn test_revision_advances_on_mutation() {
        let mut surface = surface();
        let start = surface.revision();
        surface.clear(None);
        assert!(surface.revision() > start);
        let after_clear = surface.revision();
        let _ = surface.snapshot();
        assert_eq!(surface.revision(), after_clear);
    }

    #[test]
    fn test_empty_surface_export_fails() {
        let surface = Surface::new(0, 0, Color32::WHITE);
        assert!(matches!(surface.encode_png(), Err(SketchError::EmptySurface)));
    }
}
