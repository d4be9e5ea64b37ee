use std::cmp::Ordering;

use crate::detection::Detection;
use crate::error::Error;
use crate::frame::Frame;
use crate::window::SearchWindow;

use ndarray::prelude::*;

/// Black-box detection model: given an image region, return candidate boxes
/// with scores in region-local coordinates. Model loading, device placement
/// and parameters are the implementor's concern.
pub trait Oracle {
    fn infer(&self, region: ArrayView3<'_, f32>) -> Result<Vec<Detection>, Error>;
}

pub struct DetectorConfig {
    /// Detections scoring at or below this are dropped (0.0 in silent mode,
    /// a small positive value when visualizing).
    pub score_threshold: f32,
    pub iou_threshold: f32,
    /// Cap across all classes, highest scores win.
    pub max_detections: usize,
    pub num_classes: usize,
}

impl DetectorConfig {
    pub fn new(score_threshold: f32, num_classes: usize) -> Self {
        Self {
            score_threshold,
            iou_threshold: 0.3,
            max_detections: 1,
            num_classes,
        }
    }
}

pub struct WindowDetector<O> {
    oracle: O,
    config: DetectorConfig,
}

impl<O: Oracle> WindowDetector<O> {
    pub fn new(oracle: O, config: DetectorConfig) -> Self {
        Self { oracle, config }
    }

    /// Crops the frame to the window, runs the oracle, and returns surviving
    /// detections in global frame coordinates. An empty vec, never an error,
    /// when nothing clears the threshold.
    pub fn detect(&self, frame: &Frame, window: &SearchWindow) -> Result<Vec<Detection>, Error> {
        let crop = frame.crop(window);
        let proposals = self.oracle.infer(crop.view())?;

        // The bounding boxes grouped by class index.
        let mut bboxes: Vec<Vec<Detection>> =
            (0..self.config.num_classes).map(|_| vec![]).collect();

        for mut det in proposals {
            if det.confidence > self.config.score_threshold
                && det.class >= 0
                && (det.class as usize) < self.config.num_classes
            {
                det.bbox = det.bbox.offset(window.left as f32, window.upper as f32);
                bboxes[det.class as usize].push(det);
            }
        }

        let mut results = Vec::new();

        for mut dets in bboxes.into_iter() {
            if dets.is_empty() {
                continue;
            }

            if dets.len() == 1 {
                results.append(&mut dets);
                continue;
            }

            let indices = self.non_maximum_suppression(&mut dets);

            results.extend(dets.drain(..).enumerate().filter_map(|(idx, item)| {
                if indices.contains(&(idx as i32)) {
                    Some(item)
                } else {
                    None
                }
            }));
        }

        // Stable sort so equal scores keep the oracle's return order.
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(self.config.max_detections);

        Ok(results)
    }

    fn non_maximum_suppression(&self, dets: &mut [Detection]) -> Vec<i32> {
        dets.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        let mut retain: Vec<_> = (0..dets.len() as i32).collect();
        for idx in 0..dets.len() - 1 {
            if retain[idx] != -1 {
                for r in retain[idx + 1..].iter_mut() {
                    if *r != -1 {
                        let iou = dets[idx].iou(&dets[*r as usize]);
                        if iou > self.config.iou_threshold {
                            *r = -1;
                        }
                    }
                }
            }
        }

        retain.retain(|&x| x > -1);
        retain
    }
}
