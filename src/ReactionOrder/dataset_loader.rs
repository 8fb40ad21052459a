//! # Dataset Loader
//!
//! Turns uploaded bytes into the time and absorbance vectors.
//!
//! ## Algorithm
//! 1) decode text (lossy UTF-8), drop BOM
//! 2) detect the delimiter on the first lines: tab, semicolon, comma, then runs of whitespace.
//!    The first candidate which splits every sampled record into the same number (>=2) of fields wins.
//! 3) read records with the csv crate: quoted fields, `\r\n` and blank lines are handled there
//! 4) first row is a header if its first two cells are not numbers (see [`HeaderPolicy`])
//! 5) columns 1 and 2 are time and absorbance, other columns are ignored
//! 6) validation: at least 2 rows, all values finite, all absorbances > 0
//!
//! Decimal commas ("0,25") are accepted when the field has no dot.

use crate::ReactionOrder::order_errors::KineticsError;
use crate::settings::{AnalysisSettings, HeaderPolicy};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use serde::Serialize;

/// number of lines used to sniff the delimiter
const SNIFF_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Delimiter {
    Tab,
    Semicolon,
    Comma,
    Whitespace,
    Other(char),
}

impl Delimiter {
    pub fn from_char(c: char) -> Self {
        match c {
            '\t' => Delimiter::Tab,
            ';' => Delimiter::Semicolon,
            ',' => Delimiter::Comma,
            ' ' => Delimiter::Whitespace,
            other => Delimiter::Other(other),
        }
    }

    /// separator byte for the csv reader
    fn byte(&self) -> Result<u8, KineticsError> {
        match self {
            Delimiter::Tab => Ok(b'\t'),
            Delimiter::Semicolon => Ok(b';'),
            Delimiter::Comma => Ok(b','),
            Delimiter::Whitespace => Ok(b' '),
            Delimiter::Other(c) if c.is_ascii() => Ok(*c as u8),
            Delimiter::Other(c) => Err(KineticsError::Format(format!(
                "delimiter '{}' is not a single ASCII character",
                c
            ))),
        }
    }

    /// Reads non-blank records with their line numbers.
    /// Runs of spaces and tabs are collapsed first for the whitespace delimiter.
    pub fn read_records(&self, text: &str) -> Result<Vec<(usize, StringRecord)>, KineticsError> {
        let collapsed;
        let text = if *self == Delimiter::Whitespace {
            collapsed = text
                .lines()
                .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            collapsed.as_str()
        } else {
            text
        };
        let mut reader = ReaderBuilder::new()
            .delimiter(self.byte()?)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            records.push((line, record));
        }
        Ok(records)
    }

    fn candidates() -> [Delimiter; 4] {
        [
            Delimiter::Tab,
            Delimiter::Semicolon,
            Delimiter::Comma,
            Delimiter::Whitespace,
        ]
    }

    /// Detects the delimiter on a sample of lines.
    pub fn sniff(sample: &[&str]) -> Delimiter {
        let text = sample.join("\n");
        let mut first_counts = Vec::new();
        for candidate in Delimiter::candidates() {
            let Ok(records) = candidate.read_records(&text) else {
                continue;
            };
            let counts: Vec<usize> = records.iter().map(|(_, r)| r.len()).collect();
            if let Some(&first) = counts.first() {
                if first >= 2 && counts.iter().all(|&c| c == first) {
                    return candidate;
                }
                first_counts.push((candidate, first));
            }
        }
        // no consistent candidate: take the one giving most fields on the first line
        first_counts
            .into_iter()
            .filter(|(_, n)| *n >= 2)
            .max_by_key(|(_, n)| *n)
            .map(|(d, _)| d)
            .unwrap_or(Delimiter::Comma)
    }
}

/// one data row with the number of the line in the file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataRow {
    pub line: usize,
    pub time: f64,
    pub absorbance: f64,
}

/// parsed file before validation of values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDataset {
    pub header: Option<Vec<String>>,
    pub rows: Vec<DataRow>,
    pub delimiter: Delimiter,
}

/// time and absorbance of equal length N >= 2, all A > 0
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedSeries {
    pub t: Vec<f64>,
    pub A: Vec<f64>,
}

fn parse_number(field: &str) -> Option<f64> {
    match field.parse::<f64>() {
        Ok(x) => Some(x),
        Err(_) if field.contains(',') && !field.contains('.') => {
            field.replace(',', ".").parse::<f64>().ok()
        }
        Err(_) => None,
    }
}

impl RawDataset {
    /// parse text with default settings
    pub fn parse(text: &str) -> Result<Self, KineticsError> {
        Self::parse_with_settings(text, &AnalysisSettings::default())
    }

    pub fn from_bytes(bytes: &[u8], settings: &AnalysisSettings) -> Result<Self, KineticsError> {
        let text = String::from_utf8_lossy(bytes);
        Self::parse_with_settings(&text, settings)
    }

    pub fn parse_with_settings(
        text: &str,
        settings: &AnalysisSettings,
    ) -> Result<Self, KineticsError> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(KineticsError::Format("the file is empty".to_string()));
        }

        let delimiter = match settings.delimiter {
            Some(c) => Delimiter::from_char(c),
            None => {
                let sample: Vec<&str> = text
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .take(SNIFF_LINES)
                    .collect();
                Delimiter::sniff(&sample)
            }
        };

        let records = delimiter.read_records(text)?;
        let Some((_, first_record)) = records.first() else {
            return Err(KineticsError::Format("the file is empty".to_string()));
        };
        if first_record.len() < 2 {
            return Err(KineticsError::Format(format!(
                "found {} column(s), at least 2 columns (time, absorbance) are required; check the delimiter",
                first_record.len()
            )));
        }

        let has_header = match settings.header {
            HeaderPolicy::Present => true,
            HeaderPolicy::Absent => false,
            HeaderPolicy::Auto => first_record
                .iter()
                .take(2)
                .any(|f| parse_number(f).is_none()),
        };
        let header = if has_header {
            Some(first_record.iter().map(|f| f.to_string()).collect())
        } else {
            None
        };
        let data_records = if has_header { &records[1..] } else { &records[..] };

        let mut rows = Vec::with_capacity(data_records.len());
        for (line, record) in data_records {
            if record.len() < 2 {
                return Err(KineticsError::Format(format!(
                    "line {} has {} column(s), expected at least 2",
                    line,
                    record.len()
                )));
            }
            if record.len() > 2 {
                debug!("line {}: columns beyond the second are ignored", line);
            }
            let time = parse_number(&record[0]).ok_or_else(|| {
                KineticsError::Format(format!("line {}: time '{}' is not a number", line, &record[0]))
            })?;
            let absorbance = parse_number(&record[1]).ok_or_else(|| {
                KineticsError::Format(format!(
                    "line {}: absorbance '{}' is not a number",
                    line, &record[1]
                ))
            })?;
            rows.push(DataRow {
                line: *line,
                time,
                absorbance,
            });
        }

        if rows.len() < 2 {
            return Err(KineticsError::Format(format!(
                "found {} data row(s), at least 2 points are required to fit a line",
                rows.len()
            )));
        }
        info!(
            "dataset parsed: delimiter {:?}, header: {}, {} data rows",
            delimiter,
            has_header,
            rows.len()
        );
        Ok(Self {
            header,
            rows,
            delimiter,
        })
    }

    /// Checks the value domain and produces the series for fitting.
    pub fn validate(&self) -> Result<ValidatedSeries, KineticsError> {
        self.validate_with_settings(&AnalysisSettings::default())
    }

    #[allow(non_snake_case)]
    pub fn validate_with_settings(
        &self,
        settings: &AnalysisSettings,
    ) -> Result<ValidatedSeries, KineticsError> {
        let mut t = Vec::with_capacity(self.rows.len());
        let mut A = Vec::with_capacity(self.rows.len());
        let mut unsorted_reported = false;
        for (i, row) in self.rows.iter().enumerate() {
            if !row.time.is_finite() {
                return Err(KineticsError::Domain {
                    line: row.line,
                    value: row.time,
                    reason: "time must be a finite number".to_string(),
                });
            }
            if !row.absorbance.is_finite() {
                return Err(KineticsError::Domain {
                    line: row.line,
                    value: row.absorbance,
                    reason: "absorbance must be a finite number".to_string(),
                });
            }
            if row.absorbance <= 0.0 {
                return Err(KineticsError::Domain {
                    line: row.line,
                    value: row.absorbance,
                    reason: "absorbance must be > 0".to_string(),
                });
            }
            if i > 0 && row.time < self.rows[i - 1].time {
                if settings.require_monotonic_time {
                    return Err(KineticsError::Domain {
                        line: row.line,
                        value: row.time,
                        reason: "time must not decrease".to_string(),
                    });
                } else if !unsorted_reported {
                    warn!("time column is not sorted (line {})", row.line);
                    unsorted_reported = true;
                }
            }
            t.push(row.time);
            A.push(row.absorbance);
        }
        Ok(ValidatedSeries { t, A })
    }
}

impl ValidatedSeries {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Parses and validates bytes in one call.
pub fn load_series(
    bytes: &[u8],
    settings: &AnalysisSettings,
) -> Result<ValidatedSeries, KineticsError> {
    RawDataset::from_bytes(bytes, settings)?.validate_with_settings(settings)
}
