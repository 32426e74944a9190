use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode::Options;
use tempfile::NamedTempFile;

use crate::error::Result;

/// Writes through a temporary file in the same directory and renames it over
/// `path` once `write` succeeds, so readers never see a half written file
pub fn write_atomic<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
{
    let path = path.as_ref();
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

pub fn save_to_disk<T: Serialize, TPath: AsRef<Path>>(data: &T, path: TPath) -> Result<()> {
    let options = bincode::DefaultOptions::new();
    let options = options.with_no_limit();
    write_atomic(path, |writer| {
        options.serialize_into(writer, data)?;
        Ok(())
    })
}

pub fn load_from_disk<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let options = bincode::DefaultOptions::new();
    let options = options.with_no_limit();
    Ok(options.deserialize_from(reader)?)
}
