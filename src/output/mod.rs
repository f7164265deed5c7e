pub mod export;
pub mod formatter;
pub mod report;

pub use export::{export_csv, export_filename, read_csv, write_csv, CsvRow};
pub use formatter::{save_report_to_file, OutputFormatter, ReportGenerator};
pub use report::Report;
