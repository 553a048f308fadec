use std::fmt;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Archive name prefix of classic character parts.
pub const CLASSIC_START: &str = "character/making/pl_";
/// Archive name prefix of NGS character parts.
pub const REBOOT_START: &str = "character/making_reboot/pl_";
/// Archive name prefix of high quality NGS character parts.
pub const REBOOT_EX_START: &str = "character/making_reboot_ex/pl_";

/// Directories searched for an archive, in order. The second field selects
/// the `xx/yyyy...` layout of the reboot directories.
const DATA_DIRS: [(&str, bool); 4] = [
    ("win32", false),
    ("win32reboot", true),
    ("win32_na", false),
    ("win32reboot_na", true),
];

pub fn md5_hex(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Archive name prefix for an object id.
pub fn start_for(id: u32) -> &'static str {
    if ids::is_ngs(id) {
        REBOOT_START
    } else {
        CLASSIC_START
    }
}

/// Logical name of a game archive. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CmxFileName(pub String);

impl CmxFileName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `{start}{tag}_{id:05}.ice`
    pub fn for_object(id: u32, tag: &str, file_id: u32) -> Self {
        Self(format!("{}{}_{:05}.ice", start_for(id), tag, file_id))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hash(&self) -> String {
        md5_hex(&self.0)
    }

    pub fn reboot_hash(&self) -> String {
        let hash = self.hash();
        format!("{}/{}", &hash[..2], &hash[2..])
    }

    /// High quality variant of an NGS archive, unset for anything else.
    pub fn ex(&self) -> CmxFileName {
        match self.0.strip_prefix(REBOOT_START) {
            Some(rest) => CmxFileName(format!(
                "{}{}",
                REBOOT_EX_START,
                rest.replace(".ice", "_ex.ice")
            )),
            None => CmxFileName::default(),
        }
    }

    /// First existing copy of the archive under `pso2_bin/data`.
    pub fn path(&self, data_dir: &Path) -> Option<PathBuf> {
        if self.is_empty() {
            return None;
        }
        find_archive(data_dir, &self.hash())
    }

    pub fn exists(&self, data_dir: &Path) -> bool {
        self.path(data_dir).is_some()
    }
}

/// Look up an archive by its hashed name in every data directory.
pub fn find_archive(data_dir: &Path, hash: &str) -> Option<PathBuf> {
    let reboot = match (hash.get(..2), hash.get(2..)) {
        (Some(dir), Some(rest)) if !rest.is_empty() => format!("{dir}/{rest}"),
        _ => hash.to_string(),
    };

    DATA_DIRS
        .iter()
        .map(|(dir, nested)| {
            let name = if *nested { &reboot } else { hash };
            data_dir.join(dir).join(name)
        })
        .find(|p| p.is_file())
}

impl fmt::Display for CmxFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CmxFileName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names() {
        assert_eq!(
            CmxFileName::for_object(100010, "bw", 100010).name(),
            "character/making_reboot/pl_bw_100010.ice"
        );
        assert_eq!(
            CmxFileName::for_object(20001, "bd", 20001).name(),
            "character/making/pl_bd_20001.ice"
        );
        assert_eq!(
            CmxFileName::for_object(1, "ac", 7).name(),
            "character/making/pl_ac_00007.ice"
        );
    }

    #[test]
    fn hashes() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");

        let name = CmxFileName::new("abc");
        assert_eq!(name.hash(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(name.reboot_hash(), "90/0150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn ex_variant() {
        let ngs = CmxFileName::for_object(100010, "bw", 100010);
        assert_eq!(
            ngs.ex().name(),
            "character/making_reboot_ex/pl_bw_100010_ex.ice"
        );
        assert!(CmxFileName::for_object(20001, "bd", 20001).ex().is_empty());
        assert!(CmxFileName::default().ex().is_empty());
    }

    #[test]
    fn finds_archive_in_data_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let name = CmxFileName::new("abc");
        assert_eq!(name.path(dir.path()), None);

        let reboot = dir.path().join("win32reboot_na/90");
        std::fs::create_dir_all(&reboot).unwrap();
        std::fs::write(reboot.join("0150983cd24fb0d6963f7d28e17f72"), b"").unwrap();
        assert_eq!(
            name.path(dir.path()),
            Some(reboot.join("0150983cd24fb0d6963f7d28e17f72"))
        );

        let classic = dir.path().join("win32");
        std::fs::create_dir_all(&classic).unwrap();
        std::fs::write(classic.join(name.hash()), b"").unwrap();
        assert_eq!(name.path(dir.path()), Some(classic.join(name.hash())));

        assert_eq!(CmxFileName::default().path(dir.path()), None);
    }

    #[test]
    fn non_ascii_hash_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_archive(dir.path(), "aé12"), None);
        assert_eq!(find_archive(dir.path(), "é"), None);
        assert_eq!(find_archive(dir.path(), "ab"), None);
    }
}
