use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// A candidate match: box corners, class score and class label. The oracle
/// produces these in crop-local coordinates; the adapter re-expresses them in
/// global frame coordinates before anything else sees them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BBox<Ltrb>,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    pub fn new(bbox: BBox<Ltrb>, confidence: f32, class: i32) -> Self {
        Self {
            bbox,
            confidence,
            class,
        }
    }

    pub fn iou(&self, other: &Detection) -> f32 {
        let b1_area = (self.bbox.width() + 1.) * (self.bbox.height() + 1.);
        let b2_area = (other.bbox.width() + 1.) * (other.bbox.height() + 1.);

        let i_xmin = self.bbox.left().max(other.bbox.left());
        let i_xmax = self.bbox.right().min(other.bbox.right());
        let i_ymin = self.bbox.top().max(other.bbox.top());
        let i_ymax = self.bbox.bottom().min(other.bbox.bottom());
        let i_area = (i_xmax - i_xmin + 1.).max(0.) * (i_ymax - i_ymin + 1.).max(0.);

        (i_area) / (b1_area + b2_area - i_area)
    }

    #[inline(always)]
    pub fn center(&self) -> na::Point2<f32> {
        self.bbox.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = Detection::new(BBox::ltrb(10.0, 10.0, 30.0, 30.0), 0.9, 1);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = Detection::new(BBox::ltrb(0.0, 0.0, 10.0, 10.0), 0.9, 1);
        let b = Detection::new(BBox::ltrb(100.0, 100.0, 110.0, 110.0), 0.8, 1);
        assert_eq!(a.iou(&b), 0.0);
    }
}
