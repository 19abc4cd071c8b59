//! Pointer-highlight overlay
//!
//! Draws a stroked circle (outline only) centered at the click position,
//! translated from global screen coordinates into the pixel buffer's local
//! space. When the translated center falls outside the buffer the overlay is
//! skipped silently: the click may have landed outside the selected capture
//! target's extent, which is not an error.

use image::RgbImage;

use crate::config::PointerStyle;
use crate::model::{CapturePoint, Region};

/// Draws the click marker onto a captured region
///
/// `region` is the global-coordinate rectangle the buffer was grabbed from;
/// the marker center is `click - region origin`. The ring is clipped at the
/// buffer edges, so a marker near a border draws partially.
pub fn draw_pointer_marker(
    image: &mut RgbImage,
    region: Region,
    click: CapturePoint,
    style: &PointerStyle,
) {
    if !style.enabled {
        return;
    }

    let local_x = click.x - region.left;
    let local_y = click.y - region.top;

    let (width, height) = image.dimensions();
    if local_x < 0 || local_y < 0 || local_x >= width as i32 || local_y >= height as i32 {
        tracing::debug!(
            local_x,
            local_y,
            "Click position is outside the captured region, skipping marker"
        );
        return;
    }

    let radius = style.radius as f32;
    let half_stroke = (style.stroke.max(1) as f32) / 2.0;
    let outer = radius + half_stroke;
    let inner = (radius - half_stroke).max(0.0);
    let reach = outer.ceil() as i32;

    let color = image::Rgb(style.color);

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let px = local_x + dx;
            let py = local_y + dy;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                continue;
            }
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if dist >= inner && dist <= outer {
                image.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> PointerStyle {
        PointerStyle {
            enabled: true,
            radius: 10,
            stroke: 3,
            color: [255, 0, 0],
        }
    }

    fn black_image(width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }

    fn marked_pixels(image: &RgbImage) -> usize {
        image.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn test_marker_draws_ring_not_disc() {
        let mut img = black_image(100, 100);
        let region = Region::new(0, 0, 100, 100);
        draw_pointer_marker(&mut img, region, CapturePoint::new(50, 50), &style());

        assert!(marked_pixels(&img) > 0);
        // The center stays untouched (outline only, no fill)
        assert_eq!(img.get_pixel(50, 50).0, [0, 0, 0]);
        // A pixel on the ring at the configured radius is painted
        assert_eq!(img.get_pixel(60, 50).0, [255, 0, 0]);
    }

    #[test]
    fn test_marker_translates_global_coordinates() {
        let mut img = black_image(100, 100);
        // Buffer grabbed from a monitor at (1920, 0)
        let region = Region::new(1920, 0, 100, 100);
        draw_pointer_marker(&mut img, region, CapturePoint::new(1970, 50), &style());

        assert_eq!(img.get_pixel(60, 50).0, [255, 0, 0]);
    }

    #[test]
    fn test_marker_outside_buffer_is_skipped() {
        let mut img = black_image(100, 100);
        let region = Region::new(0, 0, 100, 100);
        draw_pointer_marker(&mut img, region, CapturePoint::new(500, 500), &style());
        assert_eq!(marked_pixels(&img), 0);

        draw_pointer_marker(&mut img, region, CapturePoint::new(-5, 50), &style());
        assert_eq!(marked_pixels(&img), 0);
    }

    #[test]
    fn test_marker_near_edge_is_clipped() {
        let mut img = black_image(100, 100);
        let region = Region::new(0, 0, 100, 100);
        // Center inside, ring partially off the left edge
        draw_pointer_marker(&mut img, region, CapturePoint::new(2, 50), &style());
        assert!(marked_pixels(&img) > 0);
    }

    #[test]
    fn test_disabled_style_draws_nothing() {
        let mut img = black_image(100, 100);
        let region = Region::new(0, 0, 100, 100);
        let disabled = PointerStyle {
            enabled: false,
            ..style()
        };
        draw_pointer_marker(&mut img, region, CapturePoint::new(50, 50), &disabled);
        assert_eq!(marked_pixels(&img), 0);
    }

    #[test]
    fn test_marker_uses_configured_color() {
        let mut img = black_image(100, 100);
        let region = Region::new(0, 0, 100, 100);
        let green = PointerStyle {
            color: [0, 200, 0],
            ..style()
        };
        draw_pointer_marker(&mut img, region, CapturePoint::new(50, 50), &green);
        assert_eq!(img.get_pixel(60, 50).0, [0, 200, 0]);
    }
}
