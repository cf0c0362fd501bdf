//! Defines traits which extend the hdf5 types [Group] and [Dataset], so that
//! reading record collections and writing histograms attach the hdf5 path of
//! the offending object to every error.
mod dataset;
mod error;
mod group;

pub(crate) use error::{ConvertResult, Hdf5Error, Hdf5Result};
use hdf5::{Attribute, Dataset, Group, H5Type};
use ndarray::{Array1, Array2};
use std::ops::Range;

/// Provides methods to attach attributes to an hdf5 object.
pub(crate) trait HasAttributesExt {
    /// Creates a new string-typed attribute, with name and contents as specified.
    /// # Error Modes
    /// Implementations should propagate any hdf5 errors and call the
    /// appropriate `ConvertResult::err_xxx(self)` to set the error's `hdf5_path` field.
    fn add_constant_string_attribute(&self, attr: &str, value: &str) -> Hdf5Result<Attribute>;

    /// Creates a new scalar attribute of type `T`, with name and contents as specified.
    fn add_constant_scalar_attribute<T: H5Type>(&self, attr: &str, value: &T)
    -> Hdf5Result<Attribute>;
}

/// Provides methods to be called on the hdf5 [Group] type.
pub(crate) trait GroupExt {
    /// Creates a new subgroup of this group.
    fn add_new_group(&self, name: &str) -> Hdf5Result<Group>;

    /// Creates a new one-dimensional dataset in this group, holding the contents of `values`.
    fn create_constant_slice_dataset<T: H5Type>(
        &self,
        name: &str,
        values: &[T],
    ) -> Hdf5Result<Dataset>;

    /// Returns the dataset in this group matching the given name.
    /// # Error Modes
    /// Propagates errors from [Group::dataset], in particular if the dataset does not exist.
    fn get_dataset(&self, name: &str) -> Hdf5Result<Dataset>;

    /// Returns the subgroup in this group matching the given name.
    /// # Error Modes
    /// Propagates errors from [Group::group], in particular if the subgroup does not exist.
    fn get_group(&self, name: &str) -> Hdf5Result<Group>;
}

/// Provides methods to be called on the hdf5 [Dataset] type.
pub(crate) trait DatasetExt {
    /// Reads the whole of a one-dimensional dataset.
    fn read_all_1d<T: H5Type>(&self) -> Hdf5Result<Array1<T>>;

    /// Reads the elements of a one-dimensional dataset within `range`.
    /// An empty range yields an empty array without touching the file.
    fn read_range_1d<T: H5Type>(&self, range: Range<usize>) -> Hdf5Result<Array1<T>>;

    /// Reads the rows in `rows` and the first `columns` columns of a two-dimensional dataset.
    /// Both extents must be non-empty.
    fn read_rows_2d<T: H5Type>(&self, rows: Range<usize>, columns: usize)
    -> Hdf5Result<Array2<T>>;
}
