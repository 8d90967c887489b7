//! Rendering of reports as text, JSON and CSV

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

use crate::error::{BuildError, Result};
use crate::models::report::AnalysisReport;

fn paint(style: Style, text: &str, use_colors: bool) -> String {
    if use_colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn header(report: &AnalysisReport, use_colors: bool) -> String {
    format!(
        "{} {}\n",
        paint(Blue.bold(), &report.module, use_colors),
        paint(Style::new().dimmed(), &report.path.display().to_string(), use_colors)
    )
}

/// Dependency listing; quiet mode prints bare locators only
pub fn dependencies_text(report: &AnalysisReport, use_colors: bool, quiet: bool) -> String {
    if quiet {
        return report
            .dependencies
            .iter()
            .map(|dep| format!("{}+{}${}\n", dep.fetcher, dep.package, dep.revision))
            .collect();
    }

    let mut output = header(report, use_colors);

    if !report.built {
        output.push_str(&format!(
            "  {}\n",
            paint(Yellow.normal(), "not built; listing whatever is installed", use_colors)
        ));
    }

    if report.dependencies.is_empty() {
        output.push_str("  No installed dependencies found\n");
        return output;
    }

    let width = report
        .dependencies
        .iter()
        .map(|dep| dep.package.len())
        .max()
        .unwrap_or(0);

    for dep in &report.dependencies {
        output.push_str(&format!(
            "  {:<width$}  {}  {}\n",
            dep.package,
            paint(Green.normal(), &dep.revision, use_colors),
            paint(Style::new().dimmed(), &dep.fetcher, use_colors),
            width = width
        ));
    }

    output.push_str(&format!("\n{} dependencies\n", report.dependency_count()));
    output
}

pub fn status_text(report: &AnalysisReport, use_colors: bool) -> String {
    let state = if report.built {
        paint(Green.bold(), "built", use_colors)
    } else {
        paint(Red.bold(), "not built", use_colors)
    };
    format!("{}  {}\n", header(report, use_colors).trim_end(), state)
}

pub fn toolchains_text(report: &AnalysisReport, use_colors: bool) -> String {
    let mut output = String::new();
    for toolchain in &report.toolchains {
        output.push_str(&format!(
            "{:<5} {:<10} {}\n",
            toolchain.kind.to_string(),
            paint(Green.normal(), toolchain.version.as_deref().unwrap_or("unknown"), use_colors),
            paint(Style::new().dimmed(), &toolchain.command, use_colors)
        ));
    }
    if output.is_empty() {
        output.push_str("No toolchains resolved\n");
    }
    output
}

pub fn report_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    let mut json = rendered.map_err(|source| BuildError::JsonSerialize { source })?;
    json.push('\n');
    Ok(json)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| BuildError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|source| BuildError::CsvSerialize { source })
}

pub fn dependencies_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["fetcher", "package", "revision", "locator"])?;
    for dep in &report.dependencies {
        let locator = format!("{}+{}${}", dep.fetcher, dep.package, dep.revision);
        writer.write_record([dep.fetcher.as_str(), &dep.package, &dep.revision, &locator])?;
    }
    finish_csv(writer)
}

pub fn status_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["module", "path", "built"])?;
    writer.write_record([
        report.module.as_str(),
        &report.path.display().to_string(),
        if report.built { "true" } else { "false" },
    ])?;
    finish_csv(writer)
}

pub fn toolchains_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["tool", "command", "version"])?;
    for toolchain in &report.toolchains {
        writer.write_record([
            toolchain.kind.to_string().as_str(),
            &toolchain.command,
            toolchain.version.as_deref().unwrap_or(""),
        ])?;
    }
    finish_csv(writer)
}
