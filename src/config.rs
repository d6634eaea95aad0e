//! Class vocabulary and startup configuration checks.

use thiserror::Error;

/// Fatal configuration problems, reported before the frame loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no matching classes for {requested:?}; examples: {examples}")]
    NoMatchingClasses {
        requested: String,
        /// A few valid names, to point the operator somewhere useful
        examples: String,
    },
}

/// The detector's class vocabulary: an ordered list of names whose indices
/// are the `class_id` values detections carry.
#[derive(Debug, Clone)]
pub struct ClassVocabulary {
    names: Vec<String>,
}

impl ClassVocabulary {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// The 80-class COCO vocabulary used by the stock detector models.
    pub fn coco() -> Self {
        Self::new(COCO_NAMES.iter().map(|n| n.to_string()).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name_of(&self, class_id: u32) -> Option<&str> {
        self.names.get(class_id as usize).map(String::as_str)
    }

    /// Case-insensitive name lookup.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        let wanted = name.trim().to_lowercase();
        self.names
            .iter()
            .position(|n| n.to_lowercase() == wanted)
            .map(|i| i as u32)
    }

    /// Resolve a comma-separated class list to ids. Unknown names are
    /// skipped; zero matches is fatal.
    pub fn resolve(&self, requested: &str) -> Result<Vec<u32>, ConfigError> {
        let ids: Vec<u32> = requested
            .split(',')
            .filter(|c| !c.trim().is_empty())
            .filter_map(|c| self.id_of(c))
            .collect();

        if ids.is_empty() {
            let examples = self
                .names
                .iter()
                .take(10)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigError::NoMatchingClasses {
                requested: requested.to_string(),
                examples,
            });
        }
        Ok(ids)
    }
}

const COCO_NAMES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];
