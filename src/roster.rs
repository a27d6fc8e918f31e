use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, info, trace, warn};

use crate::config::{Config, BANNER};
use crate::error::{Result, RosterError};

/// Data record, looks up a field's value by its header name
///
/// Values are kept as raw text, nothing is parsed. Columns past the end of the header are
/// dropped, a row shorter than the header just lacks the trailing names, and when a header
/// repeats the last column wins.
#[derive(Debug)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// raw_record: vector of (header, value)
    pub fn new(raw_record: Vec<(&str, &str)>) -> Self {
        let fields = raw_record
            .into_iter()
            .map(|(header, value)| (header.into(), value.into()))
            .collect();
        Record { fields }
    }

    /// Pairs a csv row with the header row
    pub fn from_csv(headers: &StringRecord, raw: &StringRecord) -> Self {
        Record::new(headers.iter().zip(raw.iter()).collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// The three columns a roster line shows, borrowed from a `Record`
#[derive(Debug, PartialEq, Eq)]
pub struct Student<'a> {
    pub name: &'a str,
    pub age: &'a str,
    pub grade: &'a str,
}

impl<'a> Student<'a> {
    /// `line` is the record's line in the input, used only for the error
    pub fn from_record(record: &'a Record, line: u64) -> Result<Self> {
        Ok(Student {
            name: required(record, "name", line)?,
            age: required(record, "age", line)?,
            grade: required(record, "grade", line)?,
        })
    }
}

fn required<'a>(record: &'a Record, field: &'static str, line: u64) -> Result<&'a str> {
    record
        .get(field)
        .ok_or(RosterError::MissingField { field, line })
}

impl fmt::Display for Student<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Age: {}, Grade: {}",
            self.name, self.age, self.grade
        )
    }
}

/// Wraps any byte source in a csv reader that expects a header row.
///
/// Ragged rows are let through so that a short row shows up as a missing field
/// instead of a length mismatch.
pub fn reader_from<R: io::Read>(source: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

pub fn open_reader(path: &Path) -> Result<Reader<File>> {
    let file = File::open(path).map_err(|source| RosterError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "opened roster");
    Ok(reader_from(file))
}

/// Opens the configured file and prints it to `out`.
///
/// The file is opened before anything is written, so a missing file produces no output.
/// Returns the number of records printed.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<usize> {
    let mut rdr = open_reader(&config.input)?;
    print_roster(&mut rdr, out)
}

/// Prints the banner, then one line per record in input order.
///
/// Stops at the first error. Whatever was written before it is flushed to `out` either way.
pub fn print_roster<R: io::Read, W: Write>(rdr: &mut Reader<R>, out: &mut W) -> Result<usize> {
    let outcome = print_rows(rdr, out);
    out.flush()?;
    outcome
}

fn print_rows<R: io::Read, W: Write>(rdr: &mut Reader<R>, out: &mut W) -> Result<usize> {
    writeln!(out, "{}\n", BANNER)?;

    let headers = rdr.headers()?.clone();
    debug!(?headers, "read header row");

    let mut printed = 0;
    for e in rdr.records() {
        let raw = e?;
        let line = raw.position().map_or(0, |pos| pos.line());
        let record = Record::from_csv(&headers, &raw);
        let student = Student::from_record(&record, line).map_err(|err| {
            warn!(%err, "stopping at incomplete record");
            err
        })?;
        trace!(line, "printing record");
        writeln!(out, "{}", student)?;
        printed += 1;
    }

    info!(printed, "finished reading student data");
    Ok(printed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(data: &str) -> (Result<usize>, String) {
        let mut rdr = reader_from(data.as_bytes());
        let mut out = Vec::new();
        let outcome = print_roster(&mut rdr, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn formats_single_student() {
        let record = Record::new(vec![("name", "Alice"), ("age", "12"), ("grade", "7")]);
        let student = Student::from_record(&record, 2).unwrap();
        assert_eq!(student.to_string(), "Name: Alice, Age: 12, Grade: 7");
    }

    #[test]
    fn prints_banner_then_rows_in_order() {
        let (outcome, out) = print("name,age,grade\nAlice,12,7\nBob,13,8\nCara,11,6\n");
        assert_eq!(outcome.unwrap(), 3);
        assert_eq!(
            out,
            "reading student data.....\n\n\
             Name: Alice, Age: 12, Grade: 7\n\
             Name: Bob, Age: 13, Grade: 8\n\
             Name: Cara, Age: 11, Grade: 6\n"
        );
    }

    #[test]
    fn header_only_prints_banner() {
        let (outcome, out) = print("name,age,grade\n");
        assert_eq!(outcome.unwrap(), 0);
        assert_eq!(out, "reading student data.....\n\n");
    }

    #[test]
    fn extra_and_reordered_columns_are_ignored() {
        let (outcome, out) = print("grade,id,name,age\n7,x1,Alice,12\n");
        assert_eq!(outcome.unwrap(), 1);
        assert!(out.ends_with("Name: Alice, Age: 12, Grade: 7\n"));
    }

    #[test]
    fn empty_value_prints_as_empty() {
        let (outcome, out) = print("name,age,grade\nDan,,5\n");
        assert_eq!(outcome.unwrap(), 1);
        assert!(out.ends_with("Name: Dan, Age: , Grade: 5\n"));
    }

    #[test]
    fn short_row_stops_after_earlier_rows() {
        let (outcome, out) = print("name,age,grade\nAlice,12,7\nBob\nCara,11,6\n");
        match outcome {
            Err(RosterError::MissingField { field, line }) => {
                assert_eq!(field, "age");
                assert_eq!(line, 3);
            }
            other => panic!("expected missing field, got {:?}", other),
        }
        assert_eq!(
            out,
            "reading student data.....\n\nName: Alice, Age: 12, Grade: 7\n"
        );
    }

    #[test]
    fn header_without_column_fails_on_first_row() {
        let (outcome, out) = print("name,grade\nAlice,7\n");
        assert!(matches!(
            outcome,
            Err(RosterError::MissingField { field: "age", .. })
        ));
        assert_eq!(out, "reading student data.....\n\n");
    }

    #[test]
    fn repeated_header_keeps_last_column() {
        let record = Record::new(vec![("name", "first"), ("name", "second")]);
        assert_eq!(record.get("name"), Some("second"));
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let mut rdr = reader_from(&b"name,age,grade\nAl\xffce,12,7\n"[..]);
        let mut out = Vec::new();
        let outcome = print_roster(&mut rdr, &mut out);
        assert!(matches!(outcome, Err(RosterError::Csv(_))));
    }
}
