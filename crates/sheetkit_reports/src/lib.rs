//! `sheetkit_reports`:
//! report builders on top of [`sheetkit_xlsx`].
//!
//! - `period`      : reporting-period day headings
//! - `curtailment` : overtime curtailment report
//! - `work`        : scheduled-work report with pre-generated value queues
pub mod curtailment;
pub mod period;
pub mod work;

pub use curtailment::CurtailmentReport;
pub use period::{SpecReportPeriod, derive_report_period};
pub use work::{WorkReport, generate_distinct_run_values};
