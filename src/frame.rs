use ndarray::prelude::*;

use crate::error::Error;
use crate::window::SearchWindow;

/// An indexed image in a sequence. Pixels are laid out [channel, height,
/// width]; the buffer is immutable once read.
pub struct Frame {
    pub index: usize,
    pub pixels: Array3<f32>,
}

impl Frame {
    pub fn new(index: usize, pixels: Array3<f32>) -> Self {
        Self { index, pixels }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.shape()[2] as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.shape()[1] as u32
    }

    pub fn crop(&self, window: &SearchWindow) -> Array3<f32> {
        self.pixels
            .slice(s![
                ..,
                window.upper as usize..window.lower as usize,
                window.left as usize..window.right as usize
            ])
            .to_owned()
    }
}

/// Frame decode collaborator. Failures surface as [`Error::Io`] and abort the
/// sequence, so record/frame indices never drift apart.
pub trait FrameSource {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn frame_at(&mut self, index: usize) -> Result<Frame, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_takes_window_extent() {
        let frame = Frame::new(0, Array3::zeros((3, 100, 200)));
        let window = SearchWindow {
            left: 10,
            upper: 20,
            right: 110,
            lower: 90,
        };

        let crop = frame.crop(&window);
        assert_eq!(crop.shape(), &[3, 70, 100]);
    }
}
