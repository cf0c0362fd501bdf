use hgam_common::{CollectionWriter, EventRecord, PhysicsObject};
use std::{
    env::temp_dir,
    fs,
    path::{Path, PathBuf},
};

// Removes the file when the test is over, whether it passed or not
pub(crate) struct TempPath(PathBuf);

impl TempPath {
    //  Each test needs its own file, so they can run in parallel
    pub(crate) fn new(test_name: &str) -> Self {
        let mut path = temp_dir();
        path.push(format!("temp_diphoton_analysis_{test_name}.h5"));
        let _ = fs::remove_file(&path);
        Self(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

/// Writes `records` as the collection `name` of a new file at `path`.
pub(crate) fn write_collection(path: &Path, name: &str, records: &[EventRecord]) {
    let file = hdf5::File::create(path).unwrap();
    let mut writer = CollectionWriter::create(&file, name).unwrap();
    writer.append(records).unwrap();
    drop(writer);
    file.close().unwrap();
}

/// Two photons at rest, so their invariant mass is exactly `mass`.
pub(crate) fn photons_at_rest(mass: f32) -> [PhysicsObject; 2] {
    [
        PhysicsObject::new(0.0, 0.0, 0.0, mass / 2.0),
        PhysicsObject::new(0.0, 0.0, 0.0, mass / 2.0),
    ]
}

pub(crate) fn jets_with_pt(pts: &[f32]) -> Vec<PhysicsObject> {
    pts.iter()
        .enumerate()
        .map(|(i, &pt)| PhysicsObject::new(pt, 0.5 * i as f32, 1.0, 10.0))
        .collect()
}

pub(crate) fn record(mass: f32, jet_pts: &[f32]) -> EventRecord {
    EventRecord::new(photons_at_rest(mass), jets_with_pt(jet_pts))
}
