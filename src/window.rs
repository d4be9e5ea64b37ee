use nalgebra as na;

/// Axis-aligned crop region in frame pixel coordinates, recomputed every
/// frame from the predicted center. Bounds always satisfy
/// 1 <= left < right <= width - 1 and 1 <= upper < lower <= height - 1,
/// even when the center lies outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub left: u32,
    pub upper: u32,
    pub right: u32,
    pub lower: u32,
}

impl SearchWindow {
    pub fn around(center: na::Point2<f32>, width: u32, height: u32, half_extent: f32) -> Self {
        let (left, right) = span(center.x, half_extent, width);
        let (upper, lower) = span(center.y, half_extent, height);

        Self {
            left,
            upper,
            right,
            lower,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.lower - self.upper
    }
}

// An off-frame center pins the window to a thin sliver at the nearest border
// instead of letting it collapse; the detector sees a valid region and
// reports nothing there.
fn span(center: f32, half_extent: f32, dim: u32) -> (u32, u32) {
    let edge = (dim - 1) as f32;
    let lo = (center - half_extent).round().clamp(1.0, edge - 1.0) as u32;
    let hi = (center + half_extent).round().clamp((lo + 1) as f32, edge) as u32;

    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra as na;

    #[test]
    fn window_inside_frame() {
        let w = SearchWindow::around(na::Point2::new(500.0, 400.0), 1920, 1080, 150.0);
        assert_eq!(
            w,
            SearchWindow {
                left: 350,
                upper: 250,
                right: 650,
                lower: 550
            }
        );
    }

    #[test]
    fn clamps_near_origin() {
        let w = SearchWindow::around(na::Point2::new(10.0, 10.0), 1920, 1080, 150.0);
        assert_eq!(
            w,
            SearchWindow {
                left: 1,
                upper: 1,
                right: 160,
                lower: 160
            }
        );
    }

    #[test]
    fn clamps_at_far_edge() {
        let w = SearchWindow::around(na::Point2::new(1900.0, 1070.0), 1920, 1080, 150.0);
        assert_eq!(
            w,
            SearchWindow {
                left: 1750,
                upper: 920,
                right: 1919,
                lower: 1079
            }
        );
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        let w = SearchWindow::around(na::Point2::new(100.4, 100.6), 1920, 1080, 50.0);
        assert_eq!(w.left, 50);
        assert_eq!(w.right, 150);
        assert_eq!(w.upper, 51);
        assert_eq!(w.lower, 151);
    }

    #[test]
    fn off_frame_centers_stay_valid() {
        for center in [
            na::Point2::new(-5000.0, -5000.0),
            na::Point2::new(5000.0, 5000.0),
            na::Point2::new(-5000.0, 540.0),
            na::Point2::new(960.0, 5000.0),
        ] {
            let w = SearchWindow::around(center, 1920, 1080, 150.0);
            assert!(w.left >= 1 && w.left < w.right && w.right <= 1919, "{:?}", w);
            assert!(w.upper >= 1 && w.upper < w.lower && w.lower <= 1079, "{:?}", w);
        }
    }
}
