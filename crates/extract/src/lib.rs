pub mod assemble;
pub mod config;
pub mod engine;
pub mod lines;
pub mod locate;
pub mod normalize;
pub mod reconcile;
pub mod text;

pub use assemble::assemble;
pub use config::{ConfigError, CorrectionTable, ExtractConfig, FieldKeywords};
pub use engine::ZReportExtractor;
pub use lines::{group_lines, stream_lines, Line, DEFAULT_LINE_TOLERANCE};
pub use locate::{Candidate, FieldLocator, FieldSpec};
pub use normalize::{digits_only, normalize_amount};
pub use reconcile::{reconcile, RawFields, ReconciledFields};
