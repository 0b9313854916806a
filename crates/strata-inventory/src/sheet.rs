//! Shared CSV reading for the inventory, cross reference and relationship sheets.

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::de::DeserializeOwned;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, InventoryError},
    span::Span,
};

const BOM: char = '\u{feff}';

/// A deserialized row with its location in the source.
#[derive(Debug)]
pub(crate) struct Row<T> {
    pub value: T,
    pub line: u64,
    pub span: Span,
}

/// Reads every data row of `source` into `T`.
///
/// The header row must contain each of `required`; a missing column is
/// reported with `missing_code`. Unreadable rows are reported individually
/// and the whole sheet fails if any row failed.
pub(crate) fn read_rows<T: DeserializeOwned>(
    source: &str,
    required: &[&str],
    missing_code: ErrorCode,
) -> Result<Vec<Row<T>>, InventoryError> {
    let body = source.strip_prefix(BOM).unwrap_or(source);
    let offset = source.len() - body.len();
    let header_span = Span::line_at(body, 0).offset_by(offset);

    if body.trim().is_empty() {
        return Err(Diagnostic::error("input contains no header row")
            .with_code(ErrorCode::E003)
            .with_help(format!("the first line must name the columns: {}", required.join(", ")))
            .into());
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(body.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            return Err(Diagnostic::error(format!("cannot read header row: {err}"))
                .with_code(ErrorCode::E002)
                .with_label(header_span, "header row")
                .into());
        }
    };

    let mut collector = DiagnosticCollector::new();
    for column in missing_columns(&headers, required) {
        collector.emit(
            Diagnostic::error(format!("missing required column `{column}`"))
                .with_code(missing_code)
                .with_label(header_span, "header row")
                .with_help(format!("required columns are {}", required.join(", "))),
        );
    }
    if collector.has_errors() {
        return collector.finish().map(|_| Vec::new());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let (line, span) = locate(body, offset, record.position());
                match record.deserialize::<T>(Some(&headers)) {
                    Ok(value) => rows.push(Row { value, line, span }),
                    Err(err) => collector.emit(
                        Diagnostic::error(format!("invalid row on line {line}: {err}"))
                            .with_code(ErrorCode::E100)
                            .with_label(span, "this row")
                            .with_secondary_label(header_span, "columns declared here"),
                    ),
                }
            }
            Err(err) => {
                let (line, span) = locate(body, offset, err.position());
                let code = match err.kind() {
                    ErrorKind::UnequalLengths { .. } => ErrorCode::E101,
                    _ => ErrorCode::E100,
                };
                collector.emit(
                    Diagnostic::error(format!("unreadable row on line {line}: {err}"))
                        .with_code(code)
                        .with_label(span, "this row")
                        .with_secondary_label(header_span, "columns declared here"),
                );
            }
        }
    }

    collector.finish()?;
    debug!(rows = rows.len(); "Sheet read");
    Ok(rows)
}

fn missing_columns<'a>(headers: &StringRecord, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect()
}

fn locate(body: &str, offset: usize, position: Option<&csv::Position>) -> (u64, Span) {
    match position {
        Some(position) => {
            let start = usize::try_from(position.byte()).unwrap_or(body.len());
            (position.line(), Span::line_at(body, start).offset_by(offset))
        }
        None => (0, Span::default()),
    }
}
