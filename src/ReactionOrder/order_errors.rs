use thiserror::Error;

/// Errors that can occur during the determination of the reaction order.
/// Every variant is terminal for the current run: no partial results are produced.
#[derive(Error, Debug)]
pub enum KineticsError {
    /// structurally invalid input: wrong column count, empty file, too few rows, non-numeric cells
    #[error("Format error: {0}")]
    Format(String),

    /// value outside of its physical domain, e.g. non-positive absorbance
    #[error("Domain error at line {line}: {reason} (value = {value})")]
    Domain { line: usize, value: f64, reason: String },

    /// the straight line cannot be fitted because all time values are identical
    #[error("Degenerate fit for {order}: time column has zero variance")]
    DegenerateFit { order: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl KineticsError {
    /// short name of the error kind, suitable for messages shown to the user
    pub fn kind(&self) -> &'static str {
        match self {
            KineticsError::Format(_) | KineticsError::Csv(_) => "FormatError",
            KineticsError::Domain { .. } => "DomainError",
            KineticsError::DegenerateFit { .. } => "DegenerateFitError",
            KineticsError::Io(_) => "IoError",
            KineticsError::Settings(_) => "SettingsError",
        }
    }

    /// guidance for the user on how to fix the input
    pub fn guidance(&self) -> &'static str {
        match self {
            KineticsError::Format(_) | KineticsError::Csv(_) => {
                "The file must contain at least two columns (time, absorbance) and at least two data rows. Check the delimiter."
            }
            KineticsError::Domain { .. } => {
                "Absorbance values must be finite and strictly positive (> 0) because ln A and 1/A are used."
            }
            KineticsError::DegenerateFit { .. } => {
                "The time column must contain at least two different values."
            }
            KineticsError::Io(_) => "Check that the file exists and is readable.",
            KineticsError::Settings(_) => "Check the JSON syntax of the settings file.",
        }
    }
}
