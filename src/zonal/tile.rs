//! Raster tile references

use std::path::Path;

/// A raster tile submitted to a zonal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    /// Path handed to the raster opener
    pub path: String,
    /// Short name used to qualify column names
    pub label: String,
}

impl TileRef {
    /// Reference a tile, labelled by its file stem
    pub fn new(path: &str) -> Self {
        let label = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| path.to_string());

        TileRef {
            path: path.to_string(),
            label,
        }
    }

    /// Reference a tile with an explicit label
    pub fn with_label(path: &str, label: &str) -> Self {
        TileRef {
            path: path.to_string(),
            label: label.to_string(),
        }
    }

    /// Column name for one statistic of one band of this tile
    pub fn column_name(&self, statistic: &str, band_index: usize) -> String {
        format!("{}_band_{}_{}", statistic, band_index, self.label)
    }
}

impl From<&str> for TileRef {
    fn from(path: &str) -> Self {
        TileRef::new(path)
    }
}
