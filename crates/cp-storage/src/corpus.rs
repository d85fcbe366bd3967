//! CSV corpus with a `complaint,priority` header.
//!
//! Extra columns are ignored. A label outside {High, Medium, Low} fails the
//! whole read with [`CpError::InvalidLabel`]; labels are never coerced.

use cp_core::{ComplaintRecord, CpError, Priority, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CorpusRow {
    complaint: String,
    priority: String,
}

#[derive(Debug, Serialize)]
struct CorpusRowOut<'a> {
    complaint: &'a str,
    priority: &'a str,
}

fn csv_err(e: csv::Error) -> CpError {
    CpError::Corpus(e.to_string())
}

/// Read records from any CSV source. Rows are numbered from 1, header excluded.
pub fn read_corpus_from<R: Read>(reader: R) -> Result<Vec<ComplaintRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<CorpusRow>().enumerate() {
        let row = row.map_err(csv_err)?;
        let priority = Priority::from_label(&row.priority)
            .ok_or_else(|| CpError::InvalidLabel { row: i + 1, label: row.priority.clone() })?;
        records.push(ComplaintRecord::new(row.complaint, priority));
    }
    Ok(records)
}

pub fn read_corpus(path: &Path) -> Result<Vec<ComplaintRecord>> {
    let file = File::open(path)?;
    let records = read_corpus_from(file)?;
    info!(path = %path.display(), rows = records.len(), "corpus loaded");
    Ok(records)
}

pub fn write_corpus_to<W: Write>(writer: W, records: &[ComplaintRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in records {
        wtr.serialize(CorpusRowOut { complaint: &r.text, priority: r.priority.as_str() })
            .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_corpus(path: &Path, records: &[ComplaintRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_corpus_to(file, records)?;
    info!(path = %path.display(), rows = records.len(), "corpus written");
    Ok(())
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Append `records` to an existing corpus without rewriting it.
///
/// Existing rows, labels and extra columns stay byte-for-byte; new rows leave
/// the extra columns empty. A missing or empty file is created with the
/// `complaint,priority` header.
pub fn append_corpus(path: &Path, records: &[ComplaintRecord]) -> Result<()> {
    let has_content = match std::fs::metadata(path) {
        Ok(meta) => meta.len() > 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };
    if !has_content {
        return write_corpus(path, records);
    }

    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CpError::Corpus(format!("{}: no `{name}` column", path.display())))
    };
    let (text_col, label_col) = (column("complaint")?, column("priority")?);

    let newline = ends_with_newline(path)?;
    let mut file = OpenOptions::new().append(true).open(path)?;
    if !newline {
        file.write_all(b"\n")?;
    }
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    for r in records {
        let mut row = vec![""; headers.len()];
        row[text_col] = r.text.as_str();
        row[label_col] = r.priority.as_str();
        wtr.write_record(&row).map_err(csv_err)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = records.len(), "corpus appended");
    Ok(())
}
