//! Shared helpers for unit tests.

use crate::data::{DataLoader, Dataset};
use std::path::PathBuf;

/// Small West Java style dataset: 3 years, an extra numeric column.
pub const SAMPLE_CSV: &str = "\
id,nama_kabupaten_kota,tahun,jumlah_penderita_dm,satuan
1,KABUPATEN BOGOR,2018,60000,ORANG
2,KABUPATEN BOGOR,2019,75000,ORANG
3,KOTA BANDUNG,2019,50000,ORANG
4,KOTA BANJAR,2019,10000,ORANG
5,KOTA CIREBON,2019,10001,ORANG
6,KOTA BANDUNG,2020,52000,ORANG
";

/// Fresh, empty directory under the system temp dir, unique per test name.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dm-dashboard-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write `contents` to `<scratch>/data.csv` and return the file path.
pub fn write_csv(name: &str, contents: &str) -> PathBuf {
    let path = scratch_dir(name).join("data.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn load_dataset(name: &str, contents: &str) -> Dataset {
    DataLoader::load_csv(&write_csv(name, contents)).unwrap()
}
