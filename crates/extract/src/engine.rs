use regex::Regex;
use tracing::debug;

use zrapor_core::{validate_tokens, Token, ZReport};

use crate::assemble::assemble;
use crate::config::ExtractConfig;
use crate::lines::{group_lines, stream_lines, Line};
use crate::locate::{FieldLocator, FieldSpec};
use crate::reconcile::{reconcile, RawFields};
use crate::text;

const NO_EXCLUDE: &[String] = &[];

/// The extraction pipeline: one token stream in, one reconciled record out.
///
/// Stateless across invocations — the only thing shared between images is the
/// read-only configuration, so a batch can run one extraction per task with
/// no coordination.
pub struct ZReportExtractor {
    config: ExtractConfig,
    sequence_re: Option<Regex>,
}

impl ZReportExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        let sequence_re = text::build_sequence_regex(&config.keywords.sequence);
        Self { config, sequence_re }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractConfig::default())
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Raw tokens → grouped lines → located fields → reconciled record.
    /// Always returns a record; illegible input degrades to the all-default
    /// `Fail` record rather than an error.
    pub fn extract(&self, source_file: &str, tokens: &[Token]) -> ZReport {
        let tokens = validate_tokens(tokens, self.config.min_token_confidence);
        if tokens.is_empty() {
            debug!(source_file, "no usable tokens");
            return ZReport::empty(source_file);
        }

        let has_layout = tokens.iter().any(Token::has_layout);
        let lines = if has_layout {
            group_lines(&tokens, self.config.line_tolerance)
        } else {
            stream_lines(&tokens)
        };

        // Tokens with malformed boxes are invisible to spatial search but
        // still feed the full-text fields.
        let mut text_parts: Vec<String> = lines.iter().map(Line::text).collect();
        if has_layout {
            text_parts.extend(
                tokens
                    .iter()
                    .filter(|t| !t.has_layout())
                    .map(|t| t.text.clone()),
            );
        }
        let full_text = text_parts.join("\n").to_uppercase();

        let locator = FieldLocator::new(&self.config);
        let kw = &self.config.keywords;
        let field = |name: &str, keywords: &[String], exclude: &[String]| -> f64 {
            locator
                .locate(
                    &tokens,
                    &lines,
                    &FieldSpec {
                        name,
                        keywords,
                        exclude,
                        disqualify: &kw.disqualify,
                    },
                )
                .map(|c| c.value)
                .unwrap_or(0.0)
        };

        let raw = RawFields {
            total: field("total", &kw.total, NO_EXCLUDE),
            cash: field("cash", &kw.cash, NO_EXCLUDE),
            card: field("card", &kw.card, &kw.card_exclude),
            vat: field("vat", &kw.vat, NO_EXCLUDE),
            tax_bases: locator.locate_tax_bases(&lines),
        };
        let reconciled = reconcile(raw, self.config.max_daily_total);

        assemble(
            source_file,
            text::extract_date(&full_text),
            text::extract_sequence(&full_text, self.sequence_re.as_ref()),
            reconciled,
        )
    }
}
