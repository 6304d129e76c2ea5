//! Evaluation log store - flat CSV file of past predictions
//!
//! One header row followed by one row per prediction, in the order the
//! predictions were made. A missing file is a normal first-run state and
//! reads as an empty log.
//!
//! `append` is read-modify-write: the whole file is read, the record is
//! pushed and the file is rewritten. Writers inside this process are
//! serialised by a mutex and the rewrite goes through a temporary file that
//! is renamed into place. Separate processes sharing the same file are NOT
//! coordinated: concurrent appends race and the last writer wins, silently
//! dropping the other record.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::SalaryError;
use crate::types::EvaluationRecord;

pub struct EvaluationLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EvaluationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in append order; empty when the file does not exist yet
    pub fn load_all(&self) -> Result<Vec<EvaluationRecord>, SalaryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No evaluation log at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SalaryError::Persistence {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        self.parse(&content)
    }

    /// Append one record and rewrite the whole file
    pub fn append(&self, record: &EvaluationRecord) -> Result<(), SalaryError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut records = self.load_all()?;
        records.push(record.clone());
        self.write_all(&records)?;

        debug!(
            "Appended evaluation record #{} to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn write_all(&self, records: &[EvaluationRecord]) -> Result<(), SalaryError> {
        let persistence = |source| SalaryError::Persistence {
            path: self.path.clone(),
            source,
        };

        let mut content = String::with_capacity(128 * (records.len() + 1));
        content.push_str(&EvaluationRecord::COLUMNS.join(","));
        content.push('\n');
        for record in records {
            let row = [
                record.age.to_string(),
                record.gender.to_string(),
                record.education_level.to_string(),
                record.job_title.clone(),
                record.years_experience.to_string(),
                record.predicted_salary.to_string(),
                record.actual_salary.to_string(),
                record.error.to_string(),
                record.absolute_error.to_string(),
            ];
            let fields: Vec<String> = row.iter().map(|f| quote_field(f)).collect();
            content.push_str(&fields.join(","));
            content.push('\n');
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence)?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "evaluation.csv".to_string());
        let tmp = self.path.with_file_name(format!(".{}.tmp", file_name));

        fs::write(&tmp, content).map_err(persistence)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            warn!("Failed to replace {}: {}", self.path.display(), e);
            return Err(persistence(e));
        }
        Ok(())
    }

    fn parse(&self, content: &str) -> Result<Vec<EvaluationRecord>, SalaryError> {
        let malformed = |line: usize, reason: String| SalaryError::MalformedLog {
            path: self.path.clone(),
            line,
            reason,
        };

        let rows = split_rows(content).map_err(|(line, reason)| malformed(line, reason))?;
        let mut rows = rows.into_iter();

        let Some((_, header)) = rows.next() else {
            return Ok(Vec::new());
        };
        if header.iter().map(String::as_str).ne(EvaluationRecord::COLUMNS) {
            return Err(malformed(1, format!("unexpected header {:?}", header)));
        }

        rows.map(|(line, fields)| parse_record(&fields).map_err(|reason| malformed(line, reason)))
            .collect()
    }
}

fn parse_record(fields: &[String]) -> Result<EvaluationRecord, String> {
    if fields.len() != EvaluationRecord::COLUMNS.len() {
        return Err(format!(
            "expected {} fields, found {}",
            EvaluationRecord::COLUMNS.len(),
            fields.len()
        ));
    }

    Ok(EvaluationRecord {
        age: parse_whole(&fields[0], "Age")?,
        gender: fields[1].parse().map_err(|e| format!("{}", e))?,
        education_level: fields[2].parse().map_err(|e| format!("{}", e))?,
        job_title: fields[3].clone(),
        years_experience: parse_whole(&fields[4], "Years of Experience")?,
        predicted_salary: parse_number(&fields[5], "Predicted Salary")?,
        actual_salary: parse_number(&fields[6], "Actual Salary")?,
        error: parse_number(&fields[7], "Error")?,
        absolute_error: parse_number(&fields[8], "Absolute Error")?,
    })
}

fn parse_number(field: &str, column: &str) -> Result<f64, String> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{} '{}' is not a number", column, field))
}

/// Whole numbers may have been written as "30" or "30.0"
fn parse_whole(field: &str, column: &str) -> Result<u32, String> {
    if let Ok(v) = field.trim().parse::<u32>() {
        return Ok(v);
    }
    let v = parse_number(field, column)?;
    if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) {
        Ok(v as u32)
    } else {
        Err(format!("{} '{}' is not a whole number", column, field))
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV text into rows of fields, tagging each row with its starting line.
///
/// Quoted fields may contain commas, doubled quotes and newlines. Blank lines
/// are skipped.
fn split_rows(content: &str) -> Result<Vec<(usize, Vec<String>)>, (usize, String)> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    rows.push((row_start, std::mem::take(&mut fields)));
                }
                fields.clear();
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err((row_start, "unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push((row_start, fields));
    }
    Ok(rows)
}
