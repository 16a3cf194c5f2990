pub mod category;
pub mod error;
pub mod field;
pub mod issue;
pub mod options;
pub mod record;
pub mod source;

pub use category::{DevelopmentCategory, PopulationCategory};
pub use error::{PipelineError, Result};
pub use field::{CanonicalField, Metric};
pub use issue::{IssueKind, IssueLog, PipelineIssue};
pub use options::{MAX_YEAR, MIN_YEAR, PipelineOptions};
pub use record::{CanonicalRecord, MergedRecord, RecordKey};
pub use source::SourceKind;
