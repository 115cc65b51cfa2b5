//! Rendering of aggregated tables for the console and as exported artifacts.
//!
//! Exported artifacts always begin with a two-line banner in the target
//! format's comment syntax marking the file as generated.

use crate::aggregate::Table;
use crate::error::{ReportError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const BANNER_LINES: [&str; 2] = [
    "This file is auto-generated by benchlog. Do not edit.",
    "Re-run the benchlog report command to regenerate it.",
];

/// Export dialect for the report artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// LaTeX booktabs `tabular`
    #[default]
    Latex,
    /// Comma-separated values
    Csv,
    /// Markdown pipe table
    Markdown,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Latex => "tex",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }

    fn comment(&self, text: &str) -> String {
        match self {
            ExportFormat::Latex => format!("% {}", text),
            ExportFormat::Csv => format!("# {}", text),
            ExportFormat::Markdown => format!("<!-- {} -->", text),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "latex" | "tex" => Ok(Self::Latex),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(ReportError::Format(format!(
                "Invalid format '{}', expected: latex, csv, or markdown",
                s
            ))),
        }
    }
}

/// Header labels plus one cell per column per row. `None` marks a missing value.
struct Grid {
    headers: Vec<&'static str>,
    rows: Vec<Vec<Option<String>>>,
}

fn grid(table: &Table) -> Grid {
    match table {
        Table::Prover(rows) => {
            let with_init = rows.iter().any(|r| r.mean_init_secs.is_some());
            let mut headers = vec!["File Size (KiB)"];
            if with_init {
                headers.push("Initialization Time (s)");
            }
            headers.extend(["FK20 Time (s)", "Mining Time (s)", "Freshness period"]);

            let rows = rows
                .iter()
                .map(|r| {
                    let mut cells = vec![Some(r.size_kib.to_string())];
                    if with_init {
                        cells.push(r.mean_init_secs.map(|v| format!("{:.6}", v)));
                    }
                    cells.push(Some(format!("{:.6}", r.mean_fk20_secs)));
                    cells.push(Some(format!("{:.6}", r.mean_mining_secs)));
                    cells.push(Some(r.freshness.clone()));
                    cells
                })
                .collect();
            Grid { headers, rows }
        }
        Table::Verifier(rows) => Grid {
            headers: vec!["File Size (KiB)", "Verification Time (ms)"],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        Some(r.size_kib.to_string()),
                        Some(format!("{:.3}", r.mean_verification_ms)),
                    ]
                })
                .collect(),
        },
    }
}

fn cell_or<'a>(cell: &'a Option<String>, missing: &'a str) -> &'a str {
    cell.as_deref().unwrap_or(missing)
}

/// Human-readable summary table.
pub fn render_console(table: &Table) -> String {
    let grid = grid(table);
    let mut widths: Vec<usize> = grid.headers.iter().map(|h| h.len()).collect();
    for row in &grid.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell_or(cell, "-").chars().count());
        }
    }

    let rule = "=".repeat(60);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str("BENCHMARK RESULTS SUMMARY\n");
    out.push_str(&rule);
    out.push('\n');

    let header: Vec<String> = grid
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:>w$}", h, w = w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in &grid.rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell_or(cell, "-"), w = w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_latex(grid: &Grid, out: &mut String) -> Result<()> {
    let align: String = std::iter::once('l')
        .chain(std::iter::repeat('r').take(grid.headers.len().saturating_sub(1)))
        .collect();
    writeln!(out, "\\begin{{tabular}}{{{}}}", align)?;
    writeln!(out, "\\toprule")?;
    let header: Vec<String> = grid.headers.iter().map(|h| escape_latex(h)).collect();
    writeln!(out, "{} \\\\", header.join(" & "))?;
    writeln!(out, "\\midrule")?;
    for row in &grid.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_latex(cell_or(c, "--"))).collect();
        writeln!(out, "{} \\\\", cells.join(" & "))?;
    }
    writeln!(out, "\\bottomrule")?;
    writeln!(out, "\\end{{tabular}}")?;
    Ok(())
}

fn render_csv(grid: &Grid, out: &mut String) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&grid.headers)?;
    for row in &grid.rows {
        writer.write_record(row.iter().map(|c| cell_or(c, "")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Format(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| ReportError::Format(e.to_string()))?;
    out.push_str(&text);
    Ok(())
}

fn render_markdown(grid: &Grid, out: &mut String) -> Result<()> {
    writeln!(out, "| {} |", grid.headers.join(" | "))?;
    let separators: Vec<&str> = grid.headers.iter().map(|_| "---:").collect();
    writeln!(out, "|{}|", separators.join("|"))?;
    for row in &grid.rows {
        let cells: Vec<&str> = row.iter().map(|c| cell_or(c, "-")).collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

/// Artifact text for `format`, banner included.
pub fn render_export(table: &Table, format: ExportFormat) -> Result<String> {
    let grid = grid(table);
    let mut out = String::new();
    for line in BANNER_LINES {
        writeln!(out, "{}", format.comment(line))?;
    }

    match format {
        ExportFormat::Latex => render_latex(&grid, &mut out)?,
        ExportFormat::Csv => render_csv(&grid, &mut out)?,
        ExportFormat::Markdown => render_markdown(&grid, &mut out)?,
    }
    Ok(out)
}

/// Render and write the artifact to `path`, creating parent directories.
pub fn write_report(path: &Path, table: &Table, format: ExportFormat) -> Result<()> {
    let text = render_export(table, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ProverRow, VerifierRow};

    fn prover_table(init: Option<f64>) -> Table {
        Table::Prover(vec![ProverRow {
            size_kib: 512,
            samples: 3,
            mean_init_secs: init,
            mean_fk20_secs: 2.0,
            mean_mining_secs: 5.5,
            freshness_secs: 1_100_000.0,
            freshness: "12d 17h".to_string(),
        }])
    }

    fn verifier_table() -> Table {
        Table::Verifier(vec![
            VerifierRow {
                size_kib: 128,
                samples: 2,
                mean_verification_ms: 4.0,
            },
            VerifierRow {
                size_kib: 512,
                samples: 2,
                mean_verification_ms: 11.865,
            },
        ])
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("latex".parse::<ExportFormat>().unwrap(), ExportFormat::Latex);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("html".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_banner_is_two_comment_lines() {
        for format in [ExportFormat::Latex, ExportFormat::Csv, ExportFormat::Markdown] {
            let text = render_export(&verifier_table(), format).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            assert!(lines[0].contains("auto-generated"), "{:?}", format);
            assert!(lines[0].contains("Do not edit"), "{:?}", format);
            assert_eq!(lines[0], format.comment(BANNER_LINES[0]));
            assert_eq!(lines[1], format.comment(BANNER_LINES[1]));
        }
    }

    #[test]
    fn test_prover_columns() {
        let console = render_console(&prover_table(None));
        assert!(console.contains("BENCHMARK RESULTS SUMMARY"));
        assert!(console.contains("FK20 Time (s)"));
        assert!(console.contains("Mining Time (s)"));
        assert!(console.contains("Freshness period"));
        assert!(console.contains("12d 17h"));
        assert!(!console.contains("Initialization"));

        let console = render_console(&prover_table(Some(1.25)));
        assert!(console.contains("Initialization Time (s)"));
        assert!(console.contains("1.250000"));
    }

    #[test]
    fn test_verifier_columns() {
        let console = render_console(&verifier_table());
        assert!(console.contains("Verification Time (ms)"));
        assert!(console.contains("11.865"));
        assert!(!console.contains("FK20"));
    }

    #[test]
    fn test_latex_export() {
        let text = render_export(&verifier_table(), ExportFormat::Latex).unwrap();
        assert!(text.contains("\\begin{tabular}{lr}"));
        assert!(text.contains("128 & 4.000 \\\\"));
        assert!(text.contains("512 & 11.865 \\\\"));
        assert!(text.trim_end().ends_with("\\end{tabular}"));
    }

    #[test]
    fn test_csv_export() {
        let text = render_export(&prover_table(None), ExportFormat::Csv).unwrap();
        let body: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(
            body[0],
            "File Size (KiB),FK20 Time (s),Mining Time (s),Freshness period"
        );
        assert_eq!(body[1], "512,2.000000,5.500000,12d 17h");
    }

    #[test]
    fn test_markdown_export() {
        let text = render_export(&verifier_table(), ExportFormat::Markdown).unwrap();
        assert!(text.contains("| File Size (KiB) | Verification Time (ms) |"));
        assert!(text.contains("|---:|---:|"));
        assert!(text.contains("| 512 | 11.865 |"));
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("50% & more_"), "50\\% \\& more\\_");
    }

    #[test]
    fn test_write_report_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("results.tex");
        write_report(&path, &verifier_table(), ExportFormat::Latex).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("% This file is auto-generated"));
    }
}
