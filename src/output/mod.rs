//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::progress::Spinner;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::report::AnalysisReport;

/// Which part of a report an action asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Installed dependencies
    Dependencies,
    /// Whether the module has been built
    Status,
    /// Resolved toolchains and their versions
    Toolchains,
}

/// Trait for different output formatters
pub trait Formatter {
    /// Render `view` of the report
    fn format(&self, report: &AnalysisReport, view: ReportView) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &AnalysisReport, view: ReportView) -> Result<String> {
        Ok(match view {
            ReportView::Dependencies => formatters::dependencies_text(report, self.use_colors, self.quiet),
            ReportView::Status => formatters::status_text(report, self.use_colors),
            ReportView::Toolchains => formatters::toolchains_text(report, self.use_colors),
        })
    }
}

/// JSON formatter; every view serializes the whole report
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport, _view: ReportView) -> Result<String> {
        formatters::report_json(report, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &AnalysisReport, view: ReportView) -> Result<String> {
        match view {
            ReportView::Dependencies => formatters::dependencies_csv(report),
            ReportView::Status => formatters::status_csv(report),
            ReportView::Toolchains => formatters::toolchains_csv(report),
        }
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: &OutputFormat, use_colors: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
