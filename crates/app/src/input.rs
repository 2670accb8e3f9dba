use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use zrapor_core::{BoundingBox, Point, Token};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid token stream: {0}")]
    Json(#[from] serde_json::Error),
}

/// One detection as serialized on the recognizer side: the text, an optional
/// 4-point box (clockwise from top-left, image pixels), and a confidence.
#[derive(Debug, Deserialize)]
struct RawDetection {
    text: String,
    #[serde(rename = "box", default)]
    bbox: Option<[[f32; 2]; 4]>,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// Read one receipt's token stream from a JSON file. Detections without a
/// box stay in the stream — they still feed full-text extraction.
pub fn read_tokens(path: &Path) -> Result<Vec<Token>, InputError> {
    let text = std::fs::read_to_string(path)?;
    let raw: Vec<RawDetection> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .map(|d| {
            let bbox = d
                .bbox
                .map(|corners| BoundingBox::new(corners.map(|[x, y]| Point::new(x, y))));
            Token::new(d.text, bbox, d.confidence)
        })
        .collect())
}
