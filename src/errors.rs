use std::fmt;
use std::path::PathBuf;

/// Main error type for the Pokedex catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Error loading the static summary file
    SummaryData(SummaryDataError),
    /// Error aggregating a detail view
    Detail(DetailError),
}

/// Errors loading the pre-built summary file. These are the only failures
/// in the system treated as fatal: without the summary list the grid has
/// nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryDataError {
    /// The summary file could not be read
    Unreadable { path: PathBuf, details: String },
    /// The summary file is not a valid JSON array of summary records
    Malformed(String),
    /// The summary file parsed but contains no records
    Empty(PathBuf),
}

/// Errors aggregating a detail view. Only the primary entity fetch is a
/// hard error; every other sub-fetch degrades to a fallback section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    /// The primary entity record could not be fetched
    PokemonUnavailable(u32),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::SummaryData(err) => write!(f, "Summary data error: {}", err),
            CatalogError::Detail(err) => write!(f, "Detail error: {}", err),
        }
    }
}

impl fmt::Display for SummaryDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryDataError::Unreadable { path, details } => write!(
                f,
                "Could not read summary file {}: {}. Run the generate-summary tool to build it.",
                path.display(),
                details
            ),
            SummaryDataError::Malformed(details) => {
                write!(f, "Summary file is not valid summary JSON: {}", details)
            }
            SummaryDataError::Empty(path) => write!(
                f,
                "Summary file {} contains no records. Re-run the generate-summary tool.",
                path.display()
            ),
        }
    }
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailError::PokemonUnavailable(id) => write!(
                f,
                "Could not load details for #{}. Check your connection and try again.",
                id
            ),
        }
    }
}

impl std::error::Error for CatalogError {}
impl std::error::Error for SummaryDataError {}
impl std::error::Error for DetailError {}

impl From<SummaryDataError> for CatalogError {
    fn from(err: SummaryDataError) -> Self {
        CatalogError::SummaryData(err)
    }
}

impl From<DetailError> for CatalogError {
    fn from(err: DetailError) -> Self {
        CatalogError::Detail(err)
    }
}

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using SummaryDataError
pub type SummaryDataResult<T> = Result<T, SummaryDataError>;

/// Type alias for Results using DetailError
pub type DetailResult<T> = Result<T, DetailError>;
