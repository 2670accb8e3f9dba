use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// One recognized text fragment as handed over by the OCR collaborator.
///
/// `bbox` is `None` when the recognizer returned no geometry or a malformed
/// box — such tokens still contribute to full-text extraction but are
/// invisible to spatial search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub bbox: Option<BoundingBox>,
    /// Recognizer confidence in [0, 1].
    pub confidence: f32,
}

impl Token {
    pub fn new(text: impl Into<String>, bbox: Option<BoundingBox>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bbox: match bbox {
                Some(b) if !b.is_degenerate() => Some(b),
                _ => None,
            },
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Whether the token carries usable geometry.
    pub fn has_layout(&self) -> bool {
        self.bbox.is_some()
    }
}

/// Drop tokens that carry nothing to extract: empty text after trimming, or a
/// detection below the confidence floor. Runs once, before any grouping or
/// field search.
pub fn validate_tokens(tokens: &[Token], min_confidence: f32) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| !t.text.trim().is_empty())
        .filter(|t| t.confidence >= min_confidence)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Token::new("x", None, 1.7).confidence, 1.0);
        assert_eq!(Token::new("x", None, -0.2).confidence, 0.0);
    }

    #[test]
    fn degenerate_box_is_discarded_at_construction() {
        let t = Token::new("x", Some(BoundingBox::from_ltrb(5.0, 5.0, 5.0, 9.0)), 0.9);
        assert!(!t.has_layout());
    }

    #[test]
    fn validate_drops_empty_and_low_confidence() {
        let tokens = vec![
            Token::new("TOPLAM", None, 0.95),
            Token::new("   ", None, 0.99),
            Token::new("ghost", None, 0.1),
        ];
        let kept = validate_tokens(&tokens, 0.4);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "TOPLAM");
    }

    #[test]
    fn validate_empty_stream_yields_empty() {
        assert!(validate_tokens(&[], 0.4).is_empty());
    }
}
