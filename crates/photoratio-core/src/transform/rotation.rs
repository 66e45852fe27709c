//! Drawing the source onto the rotated-bounding-box raster.
//!
//! Each destination pixel is inverse-mapped into the source. The forward
//! transform is composed in the same order a 2D canvas receives its calls:
//!
//! 1. translate the raster center to the origin
//! 2. rotate by the angle (clockwise in the y-down image plane)
//! 3. mirror on the flipped axes
//! 4. translate the source center to the origin and draw
//!
//! so for a destination point `d` the source point is
//!
//! ```text
//! p = F * R(-θ) * (d - raster_center) + source_center
//! ```
//!
//! Samples are taken at pixel centers. Points that fall outside the source
//! rectangle keep the fill color the raster was initialized with, and
//! translucent source pixels are composited over it.

use crate::color::Color;
use crate::decode::SourceImage;

use super::geometry::{rotated_bounds, rotation_sin_cos, FlipState};
use super::raster::Raster;

/// Interpolation filter for rotated sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - matches the browser canvas preview.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation - sharper, slower.
    Lanczos3,
}

/// Premultiplied RGB plus coverage, accumulated while sampling.
#[derive(Debug, Clone, Copy, Default)]
struct Sample {
    rgb: [f64; 3],
    alpha: f64,
}

impl Sample {
    fn add(&mut self, px: [u8; 4], weight: f64) {
        let a = px[3] as f64 / 255.0 * weight;
        self.rgb[0] += px[0] as f64 * a;
        self.rgb[1] += px[1] as f64 * a;
        self.rgb[2] += px[2] as f64 * a;
        self.alpha += a;
    }

    fn scaled(self, factor: f64) -> Self {
        Sample {
            rgb: [
                self.rgb[0] * factor,
                self.rgb[1] * factor,
                self.rgb[2] * factor,
            ],
            alpha: self.alpha * factor,
        }
    }

    /// Source-over composite onto an opaque background.
    fn over(self, background: [u8; 3]) -> [u8; 3] {
        let coverage = self.alpha.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for i in 0..3 {
            let v = self.rgb[i] + background[i] as f64 * (1.0 - coverage);
            out[i] = v.clamp(0.0, 255.0).round() as u8;
        }
        out
    }
}

/// Render `source` rotated by `angle_degrees` and mirrored by `flip` onto a
/// new raster sized to the rotated bounding box.
///
/// The raster is filled with `fill` before drawing, so corners uncovered by
/// a non-quadrant rotation come out as the fill color.
///
/// # Example
///
/// ```ignore
/// use photoratio_core::transform::{rotate_onto_canvas, FlipState, InterpolationFilter};
///
/// let rotated = rotate_onto_canvas(&source, 15.0, FlipState::NONE, Color::WHITE, InterpolationFilter::Bilinear);
/// ```
pub fn rotate_onto_canvas(
    source: &SourceImage,
    angle_degrees: f64,
    flip: FlipState,
    fill: Color,
    filter: InterpolationFilter,
) -> Raster {
    let (src_w, src_h) = (source.width() as f64, source.height() as f64);
    let (bounds_w, bounds_h) = rotated_bounds(src_w, src_h, angle_degrees);
    let dst_w = (bounds_w.round() as u32).max(1);
    let dst_h = (bounds_h.round() as u32).max(1);

    let (sin, cos) = rotation_sin_cos(angle_degrees);
    let (scale_x, scale_y) = flip.scale();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = bounds_w / 2.0;
    let dst_cy = bounds_h / 2.0;

    tracing::debug!(
        src_width = source.width(),
        src_height = source.height(),
        dst_width = dst_w,
        dst_height = dst_h,
        angle = angle_degrees,
        flip_h = flip.horizontal,
        flip_v = flip.vertical,
        filter = ?filter,
        "Rotating source onto canvas"
    );

    let background = fill.to_rgb();
    let mut output = Raster::filled(dst_w, dst_h, fill);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            // Inverse rotation, then inverse flip (a flip is its own inverse)
            let rx = (dx * cos + dy * sin) * scale_x;
            let ry = (dy * cos - dx * sin) * scale_y;

            let src_x = rx + src_cx;
            let src_y = ry + src_cy;

            let sample = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(source, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(source, src_x, src_y),
            };

            if let Some(sample) = sample {
                output.put(dst_x, dst_y, sample.over(background));
            }
        }
    }

    output
}

#[inline]
fn inside(source: &SourceImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < source.width() as f64 && y < source.height() as f64
}

/// Sample a point using bilinear interpolation of the 4 nearest pixel
/// centers. Neighbors past the edge are clamped to the edge pixel.
fn sample_bilinear(source: &SourceImage, x: f64, y: f64) -> Option<Sample> {
    if !inside(source, x, y) {
        return None;
    }

    let max_x = source.width() as i64 - 1;
    let max_y = source.height() as i64 - 1;

    // Pixel centers sit at half-integer coordinates
    let u = x - 0.5;
    let v = y - 0.5;
    let x0 = u.floor() as i64;
    let y0 = v.floor() as i64;
    let fx = u - x0 as f64;
    let fy = v - y0 as f64;

    let cx = |px: i64| px.clamp(0, max_x) as u32;
    let cy = |py: i64| py.clamp(0, max_y) as u32;

    let mut sample = Sample::default();
    sample.add(source.pixel(cx(x0), cy(y0)), (1.0 - fx) * (1.0 - fy));
    sample.add(source.pixel(cx(x0 + 1), cy(y0)), fx * (1.0 - fy));
    sample.add(source.pixel(cx(x0), cy(y0 + 1)), (1.0 - fx) * fy);
    sample.add(source.pixel(cx(x0 + 1), cy(y0 + 1)), fx * fy);

    Some(sample)
}

/// Sample a point using Lanczos3 interpolation over a 6x6 neighborhood.
/// Falls back to bilinear within the kernel radius of the edge.
fn sample_lanczos3(source: &SourceImage, x: f64, y: f64) -> Option<Sample> {
    let (w, h) = (source.width() as i64, source.height() as i64);
    let u = x - 0.5;
    let v = y - 0.5;

    if u < 2.0 || u >= (w - 3) as f64 || v < 2.0 || v >= (h - 3) as f64 {
        return sample_bilinear(source, x, y);
    }

    let x0 = u.floor() as i64;
    let y0 = v.floor() as i64;

    let mut sample = Sample::default();
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        let py = y0 + ky;
        let wy = lanczos_weight(v - py as f64, 3.0);
        for kx in -2..=3 {
            let px = x0 + kx;
            let weight = lanczos_weight(u - px as f64, 3.0) * wy;
            sample.add(source.pixel(px as u32, py as u32), weight);
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(source, x, y);
    }
    Some(sample.scaled(1.0 / weight_sum))
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque image where every pixel encodes its own position.
    fn test_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 77, 255]);
            }
        }
        SourceImage::new(width, height, pixels).unwrap()
    }

    fn rotate(img: &SourceImage, angle: f64, flip: FlipState) -> Raster {
        rotate_onto_canvas(img, angle, flip, Color::WHITE, InterpolationFilter::Bilinear)
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(20, 10);
        let result = rotate(&img, 0.0, FlipState::NONE);

        assert_eq!((result.width, result.height), (20, 10));
        for y in 0..10 {
            for x in 0..20 {
                let p = img.pixel(x, y);
                assert_eq!(result.get(x, y), [p[0], p[1], p[2]]);
            }
        }
    }

    #[test]
    fn test_90_degree_rotation_is_clockwise() {
        let img = test_image(4, 2);
        let result = rotate(&img, 90.0, FlipState::NONE);

        assert_eq!((result.width, result.height), (2, 4));
        // Top-left of the source lands at the top-right after a clockwise turn
        assert_eq!(result.get(1, 0), [0, 0, 77]);
        // Bottom-left of the source lands at the top-left
        assert_eq!(result.get(0, 0), [0, 1, 77]);
        // Top-right of the source lands at the bottom-right
        assert_eq!(result.get(1, 3), [3, 0, 77]);
    }

    #[test]
    fn test_180_degree_rotation() {
        let img = test_image(3, 3);
        let result = rotate(&img, 180.0, FlipState::NONE);
        assert_eq!(result.get(0, 0), [2, 2, 77]);
        assert_eq!(result.get(2, 2), [0, 0, 77]);
    }

    #[test]
    fn test_horizontal_flip() {
        let img = test_image(5, 2);
        let result = rotate(&img, 0.0, FlipState::new(true, false));
        assert_eq!(result.get(0, 0), [4, 0, 77]);
        assert_eq!(result.get(4, 1), [0, 1, 77]);
    }

    #[test]
    fn test_vertical_flip() {
        let img = test_image(2, 5);
        let result = rotate(&img, 0.0, FlipState::new(false, true));
        assert_eq!(result.get(0, 0), [0, 4, 77]);
    }

    #[test]
    fn test_flip_mirrors_source_frame_before_rotation() {
        // Mirrored left-right in its own frame, then turned clockwise
        let img = test_image(4, 2);
        let result = rotate(&img, 90.0, FlipState::new(true, false));
        assert_eq!((result.width, result.height), (2, 4));
        assert_eq!(result.get(0, 0), [3, 1, 77]);
        assert_eq!(result.get(1, 0), [3, 0, 77]);
        assert_eq!(result.get(0, 3), [0, 1, 77]);
    }

    #[test]
    fn test_rotation_corners_use_fill() {
        let img = test_image(50, 50);
        let result = rotate_onto_canvas(
            &img,
            45.0,
            FlipState::NONE,
            Color::rgb(1, 2, 3),
            InterpolationFilter::Bilinear,
        );
        assert!(result.width > 50);
        assert_eq!(result.get(0, 0), [1, 2, 3]);
        assert_eq!(result.get(result.width - 1, result.height - 1), [1, 2, 3]);
    }

    #[test]
    fn test_translucent_source_composites_over_fill() {
        let img = SourceImage::new(1, 1, vec![0, 0, 0, 0]).unwrap();
        let result = rotate_onto_canvas(
            &img,
            0.0,
            FlipState::NONE,
            Color::rgb(200, 100, 50),
            InterpolationFilter::Bilinear,
        );
        assert_eq!(result.get(0, 0), [200, 100, 50]);

        let img = SourceImage::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        let result = rotate_onto_canvas(
            &img,
            0.0,
            FlipState::NONE,
            Color::WHITE,
            InterpolationFilter::Bilinear,
        );
        assert_eq!(result.get(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_bilinear_vs_lanczos_dimensions() {
        let img = test_image(50, 50);
        let bilinear = rotate_onto_canvas(
            &img,
            15.0,
            FlipState::NONE,
            Color::WHITE,
            InterpolationFilter::Bilinear,
        );
        let lanczos = rotate_onto_canvas(
            &img,
            15.0,
            FlipState::NONE,
            Color::WHITE,
            InterpolationFilter::Lanczos3,
        );
        assert_eq!(bilinear.width, lanczos.width);
        assert_eq!(bilinear.height, lanczos.height);
    }

    #[test]
    fn test_lanczos_identity_at_pixel_centers() {
        let img = test_image(12, 12);
        let result = rotate_onto_canvas(
            &img,
            0.0,
            FlipState::NONE,
            Color::WHITE,
            InterpolationFilter::Lanczos3,
        );
        for (x, y) in [(0, 0), (5, 6), (11, 11)] {
            let p = img.pixel(x, y);
            assert_eq!(result.get(x, y), [p[0], p[1], p[2]]);
        }
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = SourceImage::new(1, 1, vec![128, 128, 128, 255]).unwrap();
        let result = rotate(&img, 45.0, FlipState::NONE);
        assert!(result.width >= 1);
        assert!(result.height >= 1);
    }

    #[test]
    fn test_lanczos_weight_at_zero() {
        assert!((lanczos_weight(0.0, 3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_at_boundary() {
        assert!(lanczos_weight(3.0, 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_symmetry() {
        assert!((lanczos_weight(1.5, 3.0) - lanczos_weight(-1.5, 3.0)).abs() < 1e-10);
    }
}
