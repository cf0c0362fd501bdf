use super::{
    DatasetExt,
    error::{ConvertResult, Hdf5Result},
};
use hdf5::{Dataset, H5Type};
use ndarray::{Array1, Array2, s};
use std::ops::Range;

impl DatasetExt for Dataset {
    fn read_all_1d<T: H5Type>(&self) -> Hdf5Result<Array1<T>> {
        if self.size() == 0 {
            return Ok(Array1::from_vec(Vec::new()));
        }
        self.read_1d::<T>().err_dataset(self)
    }

    fn read_range_1d<T: H5Type>(&self, range: Range<usize>) -> Hdf5Result<Array1<T>> {
        if range.is_empty() {
            return Ok(Array1::from_vec(Vec::new()));
        }
        self.read_slice_1d::<T, _>(s![range]).err_dataset(self)
    }

    fn read_rows_2d<T: H5Type>(
        &self,
        rows: Range<usize>,
        columns: usize,
    ) -> Hdf5Result<Array2<T>> {
        self.read_slice_2d::<T, _>(s![rows, 0..columns])
            .err_dataset(self)
    }
}
