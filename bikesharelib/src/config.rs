//! City → data file mapping.

use std::path::{Path, PathBuf};

use crate::options::City;

/// Immutable table of where each city's trip log lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTable {
    /// Directory the file names are resolved against
    pub data_dir: PathBuf,
    files: Vec<(City, String)>,
}

impl Default for CityTable {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            files: vec![
                (City::Chicago, "chicago.csv".to_string()),
                (City::NewYorkCity, "new_york_city.csv".to_string()),
                (City::Washington, "washington.csv".to_string()),
            ],
        }
    }
}

impl CityTable {
    /// Standard file names in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: resolve files against `dir`
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// File name for a city
    pub fn file_name(&self, city: City) -> Option<&str> {
        self.files
            .iter()
            .find(|(c, _)| *c == city)
            .map(|(_, name)| name.as_str())
    }

    /// Full path of a city's data file.
    pub fn path_for(&self, city: City) -> PathBuf {
        let name = self
            .file_name(city)
            .map(Path::new)
            .unwrap_or_else(|| Path::new(city.name()));
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_files() {
        let table = CityTable::new();
        assert_eq!(table.file_name(City::Chicago), Some("chicago.csv"));
        assert_eq!(
            table.file_name(City::NewYorkCity),
            Some("new_york_city.csv")
        );
        assert_eq!(table.file_name(City::Washington), Some("washington.csv"));
    }

    #[test]
    fn test_path_for_uses_data_dir() {
        let table = CityTable::new().data_dir("/srv/bikeshare");
        assert_eq!(
            table.path_for(City::Washington),
            PathBuf::from("/srv/bikeshare/washington.csv")
        );
    }
}
