use std::{fs, path::Path};

use crate::{domain::reservation::Reservation, errors::Result, utils::fs::write_atomic};

/// Writes the rows to disk atomically by staging to a temporary file.
pub fn save_reservations(rows: &[Reservation], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    write_atomic(path, &json)
}

/// Loads a snapshot; a missing file is an empty collection.
pub fn load_reservations(path: &Path) -> Result<Vec<Reservation>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
