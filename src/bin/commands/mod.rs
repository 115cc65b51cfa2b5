pub mod report_cmd;

pub use report_cmd::{cmd_report, ReportOptions};
