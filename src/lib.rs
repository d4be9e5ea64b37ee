pub mod bbox;
pub mod detection;
pub mod detector;
pub mod error;
pub mod filter;
pub mod frame;
pub mod record;
pub mod sink;
pub mod tracker;
pub mod window;

pub use detection::Detection;
pub use detector::Oracle;
pub use error::Error;
pub use frame::{Frame, FrameSource};
pub use record::TrackRecord;
pub use tracker::Tracker;
