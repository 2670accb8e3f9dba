use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::lines::DEFAULT_LINE_TOLERANCE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Character fixes for digit misreads plus printer-specific substring patches.
/// All applied after upper-casing, so the table only needs uppercase entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionTable {
    /// Single-character substitutions for glyphs commonly misread as letters.
    pub char_fixes: Vec<(char, char)>,
    /// Fixed substring patches for known glyph corruption.
    pub patches: Vec<(String, String)>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self {
            char_fixes: vec![
                ('O', '0'),
                ('S', '5'),
                ('I', '1'),
                ('L', '1'),
                ('Z', '2'),
                ('B', '8'),
            ],
            // "370" printed by worn thermal heads reads as "3/0".
            patches: vec![("3/0".to_string(), "370".to_string())],
        }
    }
}

impl CorrectionTable {
    pub fn fix_char(&self, c: char) -> char {
        self.char_fixes
            .iter()
            .find(|(from, _)| *from == c)
            .map(|(_, to)| *to)
            .unwrap_or(c)
    }
}

/// Label vocabulary, uppercase. Turkish receipts are inconsistent about
/// dotted-İ, so each keyword appears in both spellings where it matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldKeywords {
    pub total: Vec<String>,
    pub cash: Vec<String>,
    pub card: Vec<String>,
    /// A card anchor is void when its line also mentions one of these
    /// (meal-card vendors share the "KART" wording).
    pub card_exclude: Vec<String>,
    pub vat: Vec<String>,
    pub tax_base: Vec<String>,
    /// A line carrying any of these is never a source of daily figures:
    /// cumulative/lifetime counters and tax-registration numbers.
    pub disqualify: Vec<String>,
    /// Labels the sequence number follows.
    pub sequence: Vec<String>,
}

impl Default for FieldKeywords {
    fn default() -> Self {
        Self {
            total: vec!["TOPLAM".into()],
            cash: vec!["NAKİT".into(), "NAKIT".into()],
            card: vec!["KREDİ".into(), "KREDI".into(), "KART".into()],
            card_exclude: vec![
                "YEMEK".into(),
                "SODEXO".into(),
                "MULTINET".into(),
                "TİCKET".into(),
                "TICKET".into(),
            ],
            vat: vec!["KDV".into()],
            tax_base: vec!["MATRAH".into()],
            disqualify: vec![
                "KÜMÜLATİF".into(),
                "KUMULATIF".into(),
                "KÜMÜLE".into(),
                "KUMULE".into(),
                "VKN".into(),
                "TCKN".into(),
                "SİCİL".into(),
                "SICIL".into(),
                "MERSİS".into(),
                "MERSIS".into(),
                "EKÜ".into(),
                "EKU".into(),
            ],
            sequence: vec![
                "Z NO".into(),
                "Z-NO".into(),
                "ZNO".into(),
                "Z SAYISI".into(),
                "RAPOR NO".into(),
            ],
        }
    }
}

/// Every tunable of the extraction engine. Shipped defaults are carried by
/// `Default`; a TOML file may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Vertical band within which tokens share a printed line, in pixels at
    /// native resolution. Scale proportionally if the image was resized
    /// before recognition.
    pub line_tolerance: f32,
    /// How many lines after a label match to scan in line mode — the value
    /// sometimes wraps onto the next printed line.
    pub lookahead_lines: usize,
    /// Integer values below this are item counts, not amounts, unless the
    /// source text carries an explicit `*` marker.
    pub min_amount: f64,
    /// Plausible single-day ceiling. Anything above it is a lifetime counter.
    pub max_daily_total: f64,
    /// Detections below this confidence are dropped before extraction.
    pub min_token_confidence: f32,
    pub corrections: CorrectionTable,
    pub keywords: FieldKeywords,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            lookahead_lines: 3,
            min_amount: 50.0,
            max_daily_total: 5_000_000.0,
            min_token_confidence: 0.4,
            corrections: CorrectionTable::default(),
            keywords: FieldKeywords::default(),
        }
    }
}

impl ExtractConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
