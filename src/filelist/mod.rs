//! Which archives make up each named in-game item.
//!
//! Built from the spreadsheets of a file list directory (`Player/NGS/*.csv`,
//! `Player/Classic/*.csv`, ...). Nothing here is persisted; the groups are
//! re-read on every run.

pub mod category;
pub mod lists;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use ptree::item::StringItem;
use ptree::TreeBuilder;
use serde::Serialize;

use crate::object_info::{ModelPart, ObjectType};

pub use category::ItemCategory;
use lists::{PlayerList, MAG_LISTS, PLAYER_LISTS};

/// Directories searched for an archive hash, in order.
const SEARCH_DIRS: [&str; 4] = ["win32", "win32_na", "win32reboot", "win32reboot_na"];

const NOT_FOUND: &str = "(Not found)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    HighQuality,
    NormalQuality,
    Replacement,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::HighQuality => "High Quality",
            Variant::NormalQuality => "Normal Quality",
            Variant::Replacement => "Replacement",
        }
    }
}

/// A named item and the archives of each of its variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroup {
    pub category: ItemCategory,
    pub name: String,
    pub object_type: Option<ObjectType>,
    pub object_id: u32,
    pub part: Option<ModelPart>,
    pub files: BTreeMap<Variant, Vec<String>>,
}

impl FileGroup {
    pub fn new(category: ItemCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            object_type: None,
            object_id: 0,
            part: None,
            files: BTreeMap::new(),
        }
    }

    pub fn variants(&self) -> Vec<Variant> {
        self.files.keys().copied().collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileListError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed spreadsheet {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

/// Every file group under `root`, one spreadsheet at a time.
///
/// Unreadable spreadsheets and malformed rows are logged and skipped.
pub fn file_groups(root: &Path) -> impl Iterator<Item = FileGroup> + '_ {
    let players = PLAYER_LISTS.iter().flat_map(move |(dir, lists)| {
        lists
            .iter()
            .flat_map(move |list| read_or_log(read_player_list(root, dir, list)))
    });

    let mags = MAG_LISTS.iter().flat_map(move |(category, file)| {
        read_or_log(read_mag_list(&root.join("Player").join(file), *category))
    });

    players.chain(mags)
}

fn read_or_log(result: Result<Vec<FileGroup>, FileListError>) -> Vec<FileGroup> {
    result.unwrap_or_else(|e| {
        log::warn!("{}", e);
        vec![]
    })
}

/// Groups whose name contains `text`, ignoring case.
pub fn search<'a, I>(groups: I, text: &'a str) -> impl Iterator<Item = FileGroup> + 'a
where
    I: IntoIterator<Item = FileGroup>,
    I::IntoIter: 'a,
{
    let needle = text.to_lowercase();
    groups
        .into_iter()
        .filter(move |g| g.name.to_lowercase().contains(&needle))
}

/// Location of an archive under `pso2_bin/data`.
pub fn find_ice_file(data_dir: &Path, hash: &str) -> Option<PathBuf> {
    SEARCH_DIRS
        .iter()
        .map(|dir| data_dir.join(dir).join(hash))
        .find(|path| path.is_file())
}

/// Category / item / variant / file tree of `groups`.
pub fn build_tree<'a>(groups: impl IntoIterator<Item = &'a FileGroup>) -> StringItem {
    let mut by_category: BTreeMap<ItemCategory, Vec<&FileGroup>> = BTreeMap::new();
    for group in groups {
        by_category.entry(group.category).or_default().push(group);
    }

    let mut tree = TreeBuilder::new("file groups".to_string());
    for (category, groups) in by_category {
        tree.begin_child(category.label().to_string());
        for group in groups {
            tree.begin_child(group.name.clone());
            for (variant, files) in &group.files {
                tree.begin_child(variant.label().to_string());
                for file in files {
                    tree.add_empty_child(file.clone());
                }
                tree.end_child();
            }
            tree.end_child();
        }
        tree.end_child();
    }
    tree.build()
}

// ============================================================================
// Spreadsheet reading
// ============================================================================

/// Read a spreadsheet as text. A UTF-8 BOM is dropped and invalid bytes are
/// replaced.
fn read_text(path: &Path) -> Result<String, FileListError> {
    let bytes = std::fs::read(path).map_err(|source| FileListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let text: &str = &text;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

fn read_player_list(
    root: &Path,
    dir: &str,
    list: &PlayerList,
) -> Result<Vec<FileGroup>, FileListError> {
    let path = root.join(dir).join(list.file);
    let text = read_text(&path)?;
    let csv_error = |source| FileListError::Csv {
        path: path.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows: HashMap<u32, HashMap<String, String>> = HashMap::new();
    let mut groups = vec![];

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{}: {}", path.display(), e);
                continue;
            }
        };

        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.trim().to_string(), v.to_string()))
            .collect();

        match parse_player_row(&mut rows, list, row) {
            Ok(Some(group)) => groups.push(group),
            Ok(None) => {}
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    }

    Ok(groups)
}

fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> Option<&'a str> {
    row.get(column).map(|v| v.as_str()).filter(|v| !v.is_empty())
}

fn parse_player_row(
    rows: &mut HashMap<u32, HashMap<String, String>>,
    list: &PlayerList,
    row: HashMap<String, String>,
) -> Result<Option<FileGroup>, String> {
    let id_text = cell(&row, "Id").unwrap_or("0");
    let object_id: u32 = id_text
        .trim()
        .parse()
        .map_err(|_| format!("invalid id \"{}\"", id_text))?;

    let adjusted_id = cell(&row, "Adjusted Id")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(object_id);

    let name = match (cell(&row, "English Name"), cell(&row, "Japanese Name")) {
        (Some(en), _) => en.to_string(),
        (None, Some(jp)) => format!("{} ({})", jp, object_id),
        (None, None) => format!("Unnamed {}", object_id),
    };

    let mut group = FileGroup::new(list.category, name);
    group.object_type = list.object_type;
    group.object_id = object_id;
    group.part = list.part;

    {
        let base = if adjusted_id != object_id {
            rows.get(&adjusted_id)
        } else {
            None
        };
        let get_file = |column: &str| -> Option<String> {
            cell(&row, column)
                .or_else(|| base.and_then(|b| cell(b, column)))
                .map(str::to_string)
        };

        let common = [get_file("Material Anim"), get_file("Material Anim Ex")];

        let variants = [
            (Variant::HighQuality, "High Quality", "HQ Hand Textures", "HQ Linked Inner"),
            (Variant::NormalQuality, "Normal Quality", "Hand Textures", "Linked Inner"),
            (Variant::Replacement, "Normal Quality RP", "Hand Textures", "Linked Inner"),
        ];

        for (variant, model_column, hands_column, inner_column) in variants {
            let Some(model) = cell(&row, model_column) else {
                continue;
            };

            let files = common
                .iter()
                .cloned()
                .chain([get_file(hands_column), get_file(inner_column)])
                .flatten()
                .chain([model.to_string()])
                .collect();

            group.files.insert(variant, files);
        }
    }

    rows.insert(object_id, row);

    Ok(if group.files.is_empty() { None } else { Some(group) })
}

fn read_mag_list(path: &Path, category: ItemCategory) -> Result<Vec<FileGroup>, FileListError> {
    let text = read_text(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut groups = vec![];

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{}: {}", path.display(), e);
                continue;
            }
        };

        if record.iter().last() == Some(NOT_FOUND) {
            continue;
        }

        let (Some(name), Some(file)) = (record.get(1), record.get(3)) else {
            continue;
        };

        let mut group = FileGroup::new(category, name);
        group
            .files
            .insert(Variant::NormalQuality, vec![file.to_string()]);
        groups.push(group);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> HashMap<String, String> {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ngs_basewear() -> &'static PlayerList {
        lists::NGS_PLAYER_LISTS
            .iter()
            .find(|l| l.file == "MaleNGSBasewear.csv")
            .unwrap()
    }

    #[test]
    fn row_variants_and_inheritance() {
        let mut rows = HashMap::new();
        let list = ngs_basewear();

        let base = parse_player_row(
            &mut rows,
            list,
            row(&[
                ("Id", "100010"),
                ("Adjusted Id", "100010"),
                ("English Name", "Base"),
                ("Material Anim", "anim"),
                ("High Quality", "hq"),
                ("Normal Quality", "nq"),
            ]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(base.variants(), vec![Variant::HighQuality, Variant::NormalQuality]);
        assert_eq!(base.files[&Variant::HighQuality], vec!["anim", "hq"]);

        let variant = parse_player_row(
            &mut rows,
            list,
            row(&[
                ("Id", "100011"),
                ("Adjusted Id", "100010"),
                ("Japanese Name", "ベース"),
                ("Normal Quality RP", "rp"),
            ]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(variant.name, "ベース (100011)");
        assert_eq!(variant.files[&Variant::Replacement], vec!["anim", "rp"]);
    }

    #[test]
    fn rows_without_files_are_dropped() {
        let mut rows = HashMap::new();
        let group = parse_player_row(&mut rows, ngs_basewear(), row(&[("Id", "7")])).unwrap();
        assert!(group.is_none());

        assert!(parse_player_row(&mut rows, ngs_basewear(), row(&[("Id", "x")])).is_err());
    }

    #[test]
    fn unnamed_rows() {
        let mut rows = HashMap::new();
        let group = parse_player_row(
            &mut rows,
            ngs_basewear(),
            row(&[("Id", "5"), ("Normal Quality", "nq")]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(group.name, "Unnamed 5");
    }

    #[test]
    fn search_ignores_case() {
        let groups = vec![
            FileGroup::new(ItemCategory::Accessory, "Cat Ears"),
            FileGroup::new(ItemCategory::Accessory, "Horns"),
        ];
        let found: Vec<_> = search(groups, "EARS").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cat Ears");
    }

    #[test]
    fn finds_ice_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_ice_file(dir.path(), "abcd"), None);

        std::fs::create_dir_all(dir.path().join("win32reboot/ab")).unwrap();
        std::fs::write(dir.path().join("win32reboot/ab/cd"), b"").unwrap();
        assert_eq!(
            find_ice_file(dir.path(), "ab/cd"),
            Some(dir.path().join("win32reboot/ab/cd"))
        );
    }
}
