use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::output::Snapshot;

/// List the `.xml` files directly inside a directory, sorted by name
pub fn find_catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("The provided directory is not a valid directory: {:?}", dir);
    }

    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?
    {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if path.is_file() && is_xml {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read the newline-delimited list of image filenames available on disk
pub fn load_image_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read image list: {:?}", path))?;
    Ok(parse_image_list(&content))
}

pub fn parse_image_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read manually resolved local actor ids
///
/// Expected format:
/// ```json
/// {"1234": "Q5598", "5678": "Q41264"}
/// ```
pub fn load_overrides(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read override file: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse override file")
}

/// Read a snapshot written by the normalization stage
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to open snapshot: {:?}", path))?;
    serde_json::from_reader(std::io::BufReader::new(file)).context("Failed to parse snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_list() {
        let images = parse_image_list("a.tif\n\n  b.tif  \n");
        assert_eq!(images, vec!["a.tif".to_string(), "b.tif".to_string()]);
    }

    #[test]
    fn test_find_catalog_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.xml"), "<a/>").unwrap();
        std::fs::write(dir.path().join("a.XML"), "<a/>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = find_catalog_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.XML".to_string(), "b.xml".to_string()]);
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r#"{"1234": "Q5598"}"#).unwrap();

        let overrides = load_overrides(&path).unwrap();
        assert_eq!(overrides.get("1234").map(String::as_str), Some("Q5598"));
    }

    #[test]
    fn test_missing_directory() {
        assert!(find_catalog_files(Path::new("/definitely/not/here")).is_err());
    }
}
