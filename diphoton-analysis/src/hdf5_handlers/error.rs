use hdf5::{Attribute, Dataset, Group};
use std::error::Error;
use thiserror::Error;

pub(crate) type Hdf5Result<T> = Result<T, Hdf5Error>;

const NO_HDF5_PATH_SET: &str = "[No HDF5 Path Set]";

#[derive(Debug, Error)]
pub(crate) enum Hdf5Error {
    #[error("HDF5 Error: {error} at {0}", hdf5_path.as_deref().unwrap_or(NO_HDF5_PATH_SET))]
    HDF5 {
        error: hdf5::Error,
        hdf5_path: Option<String>,
    },
    #[error("HDF5String Error: {error} at {0}", hdf5_path.as_deref().unwrap_or(NO_HDF5_PATH_SET))]
    HDF5String {
        error: hdf5::types::StringError,
        hdf5_path: Option<String>,
    },
}

impl Hdf5Error {
    fn with_hdf5_path(self, path: String) -> Self {
        match self {
            Self::HDF5 {
                error,
                hdf5_path: None,
            } => Self::HDF5 {
                error,
                hdf5_path: Some(path),
            },
            Self::HDF5String {
                error,
                hdf5_path: None,
            } => Self::HDF5String {
                error,
                hdf5_path: Some(path),
            },
            other => other,
        }
    }

    #[cfg(test)]
    pub(crate) fn hdf5_path(&self) -> Option<&str> {
        match self {
            Self::HDF5 { hdf5_path, .. } | Self::HDF5String { hdf5_path, .. } => {
                hdf5_path.as_deref()
            }
        }
    }
}

impl From<hdf5::Error> for Hdf5Error {
    fn from(error: hdf5::Error) -> Self {
        Hdf5Error::HDF5 {
            error,
            hdf5_path: None,
        }
    }
}

impl From<hdf5::types::StringError> for Hdf5Error {
    fn from(error: hdf5::types::StringError) -> Self {
        Hdf5Error::HDF5String {
            error,
            hdf5_path: None,
        }
    }
}

/// Used to allow errors which can be converted to [Hdf5Error]s to be
/// appended with hdf5 paths
pub(crate) trait ConvertResult<T, E>
where
    E: Error + Into<Hdf5Error>,
{
    fn err_group(self, group: &Group) -> Hdf5Result<T>;
    fn err_dataset(self, dataset: &Dataset) -> Hdf5Result<T>;
    fn err_attribute(self, attribute: &Attribute) -> Hdf5Result<T>;
}

impl<T, E> ConvertResult<T, E> for Result<T, E>
where
    E: Error + Into<Hdf5Error>,
{
    fn err_group(self, group: &Group) -> Hdf5Result<T> {
        self.map_err(|e| e.into().with_hdf5_path(group.name()))
    }

    fn err_dataset(self, dataset: &Dataset) -> Hdf5Result<T> {
        self.map_err(|e| e.into().with_hdf5_path(dataset.name()))
    }

    fn err_attribute(self, attribute: &Attribute) -> Hdf5Result<T> {
        self.map_err(|e| e.into().with_hdf5_path(attribute.name()))
    }
}
