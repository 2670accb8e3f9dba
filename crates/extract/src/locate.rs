use tracing::debug;

use zrapor_core::{TaxBases, Token, VatRate};

use crate::config::ExtractConfig;
use crate::lines::Line;
use crate::normalize::normalize_amount;
use crate::text::{is_date_like, rate_percent};

/// What anchors a field and what rules it out.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'a> {
    pub name: &'a str,
    /// Label keywords, uppercase.
    pub keywords: &'a [String],
    /// An anchor is void when its line also matches one of these.
    pub exclude: &'a [String],
    /// A line matching one of these is never a source, label or not.
    pub disqualify: &'a [String],
}

/// A numeric value tied to the fragment it was read from. Lives only while
/// the locator weighs candidates for one field.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub value: f64,
    pub source_text: String,
}

pub struct FieldLocator<'a> {
    config: &'a ExtractConfig,
}

impl<'a> FieldLocator<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self { config }
    }

    /// Best candidate for one field. Coordinate search when the stream
    /// carries geometry, line search otherwise — same contract either way.
    pub fn locate(
        &self,
        tokens: &[Token],
        lines: &[Line],
        spec: &FieldSpec,
    ) -> Option<Candidate> {
        if tokens.iter().any(Token::has_layout) {
            self.locate_by_coordinates(tokens, spec)
        } else {
            self.locate_by_lines(lines, spec)
        }
    }

    /// For every anchor token matching a label: collect the tokens sharing
    /// its vertical band, reject the anchor if the assembled line text is
    /// disqualified, then take the nearest plausible value to its right.
    /// A line may hold several numbers (a rate next to an amount) — nearest
    /// wins, not largest. Across anchors the maximum valid candidate wins,
    /// since duplicate labels are more common than conflicting true values.
    fn locate_by_coordinates(&self, tokens: &[Token], spec: &FieldSpec) -> Option<Candidate> {
        let tol = self.config.line_tolerance;
        let mut best: Option<Candidate> = None;

        for anchor in tokens {
            let Some(abox) = anchor.bbox else { continue };
            if !matches_any(&anchor.text.to_uppercase(), spec.keywords) {
                continue;
            }

            let band: Vec<&Token> = tokens
                .iter()
                .filter(|t| !std::ptr::eq(*t, anchor))
                .filter(|t| {
                    t.bbox
                        .map(|b| (b.vertical_center() - abox.vertical_center()).abs() < tol)
                        .unwrap_or(false)
                })
                .collect();

            let line_text = std::iter::once(&anchor.text)
                .chain(band.iter().map(|t| &t.text))
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join(" ");
            if matches_any(&line_text, spec.disqualify) {
                debug!(field = spec.name, line = %line_text, "line disqualified");
                continue;
            }
            if matches_any(&line_text, spec.exclude) {
                continue;
            }

            // Right-hand neighbors, nearest first.
            let mut rhs: Vec<(&Token, f32)> = band
                .iter()
                .filter_map(|t| {
                    let b = t.bbox?;
                    (b.left() >= abox.right()).then(|| (*t, b.left() - abox.right()))
                })
                .collect();
            rhs.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            let mut found = false;
            for (token, _) in rhs {
                let value = normalize_amount(&token.text, &self.config.corrections);
                if self.plausible(value, &token.text) {
                    debug!(field = spec.name, value, source = %token.text, "candidate");
                    consider(&mut best, value, &token.text);
                    found = true;
                    break;
                }
            }

            // Some recognizers merge label and value into one fragment
            // ("NAKİT: 812,50") — fall back to the anchor's own text.
            if !found {
                for chunk in anchor.text.split_whitespace() {
                    if let Some(value) = self.harvest_chunk(chunk) {
                        consider(&mut best, value, chunk);
                    }
                }
            }
        }
        best
    }

    /// For every matched grouped line: harvest numeric chunks from it and up
    /// to `lookahead_lines` following lines (the value may wrap), largest
    /// plausible chunk wins.
    fn locate_by_lines(&self, lines: &[Line], spec: &FieldSpec) -> Option<Candidate> {
        let uppers: Vec<String> = lines.iter().map(|l| l.text().to_uppercase()).collect();
        let mut best: Option<Candidate> = None;

        for (i, upper) in uppers.iter().enumerate() {
            if !matches_any(upper, spec.keywords) {
                continue;
            }
            if matches_any(upper, spec.disqualify) || matches_any(upper, spec.exclude) {
                continue;
            }
            let end = (i + 1 + self.config.lookahead_lines).min(lines.len());
            for j in i..end {
                // A wrapped-value line can itself be a cumulative row.
                if j > i && matches_any(&uppers[j], spec.disqualify) {
                    continue;
                }
                for chunk in lines[j].text().split_whitespace() {
                    if let Some(value) = self.harvest_chunk(chunk) {
                        consider(&mut best, value, chunk);
                    }
                }
            }
        }
        best
    }

    /// One pass over the lines for the VAT-bracket table: a line mentioning a
    /// tax-base keyword plus a `%` rate marker feeds that bracket. Duplicate
    /// rows keep the larger value, never the sum.
    pub fn locate_tax_bases(&self, lines: &[Line]) -> TaxBases {
        let kw = &self.config.keywords;
        let mut bases = TaxBases::default();

        for line in lines {
            let upper = line.text().to_uppercase();
            if matches_any(&upper, &kw.disqualify) {
                continue;
            }
            if !matches_any(&upper, &kw.tax_base) {
                continue;
            }
            let Some(rate) = rate_percent(&upper).and_then(VatRate::from_percent) else {
                continue;
            };
            let best = line
                .text()
                .split_whitespace()
                .filter_map(|chunk| self.harvest_chunk(chunk))
                .fold(0.0f64, f64::max);
            if best > bases.get(rate) {
                bases.set(rate, best);
            }
        }
        bases
    }

    /// Chunk → plausible amount. Date- and time-shaped chunks are never
    /// amounts even though their digits would parse.
    fn harvest_chunk(&self, chunk: &str) -> Option<f64> {
        if is_date_like(chunk) || chunk.contains(':') {
            return None;
        }
        let value = normalize_amount(chunk, &self.config.corrections);
        self.plausible(value, chunk).then_some(value)
    }

    /// The sentinel zero, count-like small integers without a `*` marker, and
    /// lifetime-counter magnitudes are all rejected.
    fn plausible(&self, value: f64, source: &str) -> bool {
        if value <= 0.0 || value > self.config.max_daily_total {
            return false;
        }
        let integral = value.fract() == 0.0;
        if integral && value < self.config.min_amount && !source.contains('*') {
            return false;
        }
        true
    }
}

fn matches_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

fn consider(best: &mut Option<Candidate>, value: f64, source: &str) {
    let better = best.as_ref().map(|b| value > b.value).unwrap_or(true);
    if better {
        *best = Some(Candidate {
            value,
            source_text: source.to_string(),
        });
    }
}
