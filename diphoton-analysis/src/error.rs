use crate::hdf5_handlers::Hdf5Error;
use hgam_common::EventField;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) type AnalysisResult<T> = Result<T, AnalysisError>;

/// Every failure the analysis can report. All of them are fatal.
#[derive(Debug, Error)]
pub(crate) enum AnalysisError {
    #[error("cannot open output file \"{}\": {source}", path.display())]
    OutputOpen { path: PathBuf, source: hdf5::Error },
    #[error("cannot open input file \"{}\": {source}", path.display())]
    InputOpen { path: PathBuf, source: hdf5::Error },
    #[error("cannot get collection \"{name}\" from \"{}\"", path.display())]
    MissingCollection { name: String, path: PathBuf },
    #[error("malformed collection \"{collection}\": {reason}")]
    MalformedCollection {
        collection: String,
        reason: MalformedReason,
    },
    #[error(transparent)]
    Hdf5(#[from] Hdf5Error),
}

#[derive(Debug, Error)]
pub(crate) enum MalformedReason {
    #[error("field \"{0}\" is missing")]
    MissingField(EventField),
    #[error("field \"{field}\" has {found} entries, expected {expected}")]
    FieldLength {
        field: EventField,
        expected: usize,
        found: usize,
    },
    #[error("field \"{field}\" has shape {found:?}, expected {expected}")]
    FieldShape {
        field: EventField,
        expected: String,
        found: Vec<usize>,
    },
}
