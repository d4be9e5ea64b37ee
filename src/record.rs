use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// Persisted per-frame output: the chosen box as corner + size, with the
/// 1-pixel coordinate offset convention applied and values rounded to whole
/// pixels. Append-only, one record per processed frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRecord {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TrackRecord {
    pub fn from_bbox(bbox: &BBox<Ltrb>) -> Self {
        let shifted = bbox.offset(1.0, 1.0).as_ltwh();

        Self {
            x: shifted.left().round() as i32,
            y: shifted.top().round() as i32,
            width: shifted.width().round() as i32,
            height: shifted.height().round() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_one_pixel_offset_and_rounds() {
        let rec = TrackRecord::from_bbox(&BBox::ltrb(10.2, 20.7, 30.2, 40.7));

        assert_eq!(
            rec,
            TrackRecord {
                x: 11,
                y: 22,
                width: 20,
                height: 20
            }
        );
    }
}
