use crate::bbox::{BBox, Ltrb};
use crate::detection::Detection;
use crate::detector::{DetectorConfig, Oracle, WindowDetector};
use crate::error::Error;
use crate::filter::{KalmanFilter, TrackState};
use crate::frame::{Frame, FrameSource};
use crate::record::TrackRecord;
use crate::sink::RecordWriter;
use crate::window::SearchWindow;

const HALF_EXTENT: f32 = 150.0;
const PROCESS_NOISE: f32 = 0.1;
const MEASUREMENT_NOISE: f32 = 1e-4;

pub struct TrackerConfig {
    /// Initial box of the tracked object; frame 0 centers its search window
    /// here instead of on the (still zero) filter prediction.
    pub seed: BBox<Ltrb>,
    pub half_extent: f32,
    pub process_noise: f32,
    pub measurement_noise: f32,
}

impl TrackerConfig {
    pub fn new(seed: BBox<Ltrb>) -> Self {
        Self {
            seed,
            half_extent: HALF_EXTENT,
            process_noise: PROCESS_NOISE,
            measurement_noise: MEASUREMENT_NOISE,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let s = &self.seed;
        let finite = s.left().is_finite()
            && s.top().is_finite()
            && s.right().is_finite()
            && s.bottom().is_finite();

        if !finite || s.left() >= s.right() || s.top() >= s.bottom() {
            return Err(Error::Config(format!("invalid seed box: {:?}", s)));
        }

        if !(self.half_extent > 0.0) {
            return Err(Error::Config(format!(
                "half extent must be positive, got {}",
                self.half_extent
            )));
        }

        if !(self.process_noise > 0.0) || !(self.measurement_noise > 0.0) {
            return Err(Error::Config(
                "noise covariances must be strictly positive".into(),
            ));
        }

        Ok(())
    }
}

/// Outcome of one frame: the record to persist, and whether the frame coasted
/// on the prediction because the window produced no detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub record: TrackRecord,
    pub coasted: bool,
}

/// Single-object tracking driver: per frame it predicts, windows the frame
/// around the prediction, detects inside the window, corrects with the best
/// detection's center, and emits a record. Frame i's posterior feeds frame
/// i+1's prediction, so frames must arrive strictly in order.
pub struct Tracker<O> {
    filter: KalmanFilter<f32>,
    state: TrackState<f32>,
    detector: WindowDetector<O>,
    seed: BBox<Ltrb>,
    half_extent: f32,
    last_size: (f32, f32),
    frames_done: usize,
}

impl<O: Oracle> Tracker<O> {
    pub fn new(oracle: O, detector: DetectorConfig, config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        let last_size = (config.seed.width(), config.seed.height());

        Ok(Self {
            filter: KalmanFilter::new(config.process_noise, config.measurement_noise),
            state: TrackState::zero(),
            detector: WindowDetector::new(oracle, detector),
            seed: config.seed,
            half_extent: config.half_extent,
            last_size,
            frames_done: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> &TrackState<f32> {
        &self.state
    }

    #[inline]
    pub fn frames_done(&self) -> usize {
        self.frames_done
    }

    pub fn step(&mut self, frame: &Frame) -> Result<Step, Error> {
        if frame.width() < 3 || frame.height() < 3 {
            return Err(Error::Config(format!(
                "frame {}x{} too small to window",
                frame.width(),
                frame.height()
            )));
        }

        let predicted = self.filter.predict(&self.state);

        let center = if self.frames_done == 0 {
            self.seed.center()
        } else {
            predicted.position()
        };

        let window = SearchWindow::around(center, frame.width(), frame.height(), self.half_extent);
        let detections = self.detector.detect(frame, &window)?;

        // Highest score across all classes wins; ties keep detector order.
        let mut chosen: Option<Detection> = None;
        for det in detections {
            let better = chosen
                .as_ref()
                .map_or(true, |best| det.confidence > best.confidence);

            if better {
                chosen = Some(det);
            }
        }

        let step = match chosen {
            Some(det) => {
                let measurement = det.center().coords;
                self.state = self.filter.correct(&predicted, measurement)?;
                self.last_size = (det.bbox.width(), det.bbox.height());

                Step {
                    record: TrackRecord::from_bbox(&det.bbox),
                    coasted: false,
                }
            }
            None => {
                // No measurement for this frame: the prediction stands in for
                // the posterior, and the record is synthesized around the
                // window center with the last accepted box size.
                self.state = predicted;

                let (w, h) = self.last_size;
                let held = BBox::xywh(center.x, center.y, w, h).as_ltrb();

                Step {
                    record: TrackRecord::from_bbox(&held),
                    coasted: true,
                }
            }
        };

        self.frames_done += 1;
        Ok(step)
    }

    /// Processes the whole sequence in order, writing one record per frame.
    /// Aborts on the first error; records written so far remain valid.
    pub fn run<S, W>(&mut self, source: &mut S, sink: &mut RecordWriter<W>) -> Result<(), Error>
    where
        S: FrameSource,
        W: std::io::Write,
    {
        if source.is_empty() {
            return Err(Error::Config("frame source is empty".into()));
        }

        for index in 0..source.len() {
            let frame = source.frame_at(index)?;
            let step = self.step(&frame)?;
            sink.write(&step.record)?;
        }

        Ok(())
    }
}
