//! Replay source: recorded detection streams as JSON Lines.
//!
//! One JSON object per line, one line per frame:
//!
//! ```json
//! {"width":640,"height":480,"detections":[{"track_id":5,"bbox":[100.0,100.0,200.0,200.0],"score":0.9,"class_id":32}]}
//! ```
//!
//! `track_id` may be omitted for detections the upstream tracker lost.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::detector::{DetectionSource, FrameDetections};
use crate::slots::{Detection, FrameSize, Rect};

/// One recorded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub width: u32,
    pub height: u32,
    pub detections: Vec<ReplayDetection>,
}

/// One recorded detection, bbox in TLBR pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayDetection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u32>,
    pub bbox: [f32; 4],
    pub score: f32,
    pub class_id: u32,
}

impl From<ReplayDetection> for Detection {
    fn from(d: ReplayDetection) -> Self {
        let [x1, y1, x2, y2] = d.bbox;
        Detection::new(Rect::from_tlbr(x1, y1, x2, y2), d.score, d.class_id, d.track_id)
    }
}

/// Errors from the replay source.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay read error: {0}")]
    Io(#[from] io::Error),
    #[error("replay parse error at line {line}: {source}")]
    Parse {
        line: u64,
        source: serde_json::Error,
    },
}

/// Reads frames lazily from any buffered reader; blank lines are skipped,
/// end of input ends the stream.
pub struct ReplaySource<R> {
    reader: R,
    line: u64,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ReplayError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> DetectionSource for ReplaySource<R> {
    type Error = ReplayError;

    fn next_frame(&mut self) -> Result<Option<FrameDetections>, ReplayError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if buf.trim().is_empty() {
                continue;
            }
            let frame: ReplayFrame =
                serde_json::from_str(&buf).map_err(|source| ReplayError::Parse {
                    line: self.line,
                    source,
                })?;
            return Ok(Some(FrameDetections {
                size: FrameSize::new(frame.width, frame.height),
                detections: frame.detections.into_iter().map(Detection::from).collect(),
            }));
        }
    }
}
