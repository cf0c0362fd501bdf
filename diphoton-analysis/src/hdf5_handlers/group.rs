//! This module implements the [GroupExt] and [HasAttributesExt] traits for
//! the hdf5 [Group] type.
use super::{
    GroupExt, HasAttributesExt,
    error::{ConvertResult, Hdf5Result},
};
use hdf5::{Attribute, Dataset, Group, H5Type, types::VarLenUnicode};

impl HasAttributesExt for Group {
    fn add_constant_string_attribute(&self, attr: &str, value: &str) -> Hdf5Result<Attribute> {
        let attr = self
            .new_attr::<VarLenUnicode>()
            .create(attr)
            .err_group(self)?;
        attr.write_scalar(&value.parse::<VarLenUnicode>().err_group(self)?)
            .err_attribute(&attr)?;
        Ok(attr)
    }

    fn add_constant_scalar_attribute<T: H5Type>(
        &self,
        attr: &str,
        value: &T,
    ) -> Hdf5Result<Attribute> {
        let attr = self.new_attr::<T>().create(attr).err_group(self)?;
        attr.write_scalar(value).err_attribute(&attr)?;
        Ok(attr)
    }
}

impl GroupExt for Group {
    #[tracing::instrument(skip_all, level = "trace", err(level = "warn"))]
    fn add_new_group(&self, name: &str) -> Hdf5Result<Group> {
        self.create_group(name).err_group(self)
    }

    /// Empty slices create an empty dataset and skip the write.
    #[tracing::instrument(skip_all, level = "trace", err(level = "warn"))]
    fn create_constant_slice_dataset<T: H5Type>(
        &self,
        name: &str,
        values: &[T],
    ) -> Hdf5Result<Dataset> {
        let dataset = self
            .new_dataset::<T>()
            .shape(values.len())
            .create(name)
            .err_group(self)?;
        if !values.is_empty() {
            dataset.write_raw(values).err_dataset(&dataset)?;
        }
        Ok(dataset)
    }

    #[tracing::instrument(skip_all, level = "trace", err(level = "warn"))]
    fn get_dataset(&self, name: &str) -> Hdf5Result<Dataset> {
        self.dataset(name).err_group(self)
    }

    #[tracing::instrument(skip_all, level = "trace", err(level = "warn"))]
    fn get_group(&self, name: &str) -> Hdf5Result<Group> {
        self.group(name).err_group(self)
    }
}
