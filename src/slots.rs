mod assignment;
mod detection;
mod engine;
mod filter;
mod rect;
mod router;
mod state;

pub use assignment::SlotMap;
pub use detection::Detection;
pub use engine::SlotEngine;
pub use filter::{Emission, FilterConfig, FrameSize, OutputFilter};
pub use rect::Rect;
pub use router::{FrameOutput, SlotRouter};
pub use state::{SENTINEL, SlotState};
