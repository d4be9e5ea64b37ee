use std::io::Write;

use crate::error::Error;
use crate::record::TrackRecord;

/// Writes one `"<x> <y> <width> <height>"` line per record. The caller opens
/// the underlying writer once at sequence start and takes it back with
/// [`RecordWriter::finish`] after the last frame.
pub struct RecordWriter<W: Write> {
    out: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, record: &TrackRecord) -> Result<(), Error> {
        writeln!(
            self.out,
            "{} {} {} {}",
            record.x, record.y, record.width, record.height
        )?;

        Ok(())
    }

    pub fn finish(mut self) -> Result<W, Error> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_space_separated_lines() {
        let mut sink = RecordWriter::new(Vec::new());
        sink.write(&TrackRecord {
            x: 11,
            y: 22,
            width: 20,
            height: 20,
        })
        .unwrap();
        sink.write(&TrackRecord {
            x: 12,
            y: 23,
            width: 20,
            height: 19,
        })
        .unwrap();

        let out = sink.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "11 22 20 20\n12 23 20 19\n");
    }
}
