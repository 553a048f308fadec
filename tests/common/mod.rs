// Common test utilities and helpers
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use pso2_tools_lib::cmx::CmxData;
use pso2_tools_lib::material::{Material, MaterialIdentity};

/// A small character-making dump covering body, part and accessory records
pub fn sample_cmx() -> CmxData {
    CmxData::from_json(
        r#"{
            "objects": {
                "accessory": {
                    "300000": {"nodeAttach": ["head"], "effectName": "eff_glow"}
                },
                "basewear": {
                    "100010": {
                        "body": {"linkedInnerId": 100010, "soundId": 5},
                        "colorMapping": [3, 4, 0, 0]
                    },
                    "100011": {}
                },
                "costume": {"20001": {}, "40001": {}},
                "innerwear": {"100010": {"texStrings": ["iw_d", "iw_n"]}},
                "hair": {
                    "100001": {"hairColors": [1179665, 0]},
                    "100002": {}
                },
                "ear": {"100002": {"colorMapping": [13, 0, 0, 0]}}
            },
            "idLinks": {"basewear": {"100011": {"fileId": 100010}}},
            "partsText": {
                "categoryNames": ["basewear", "hair"],
                "text": [
                    [[{"name": "No100010", "str": "ベース"}], [{"name": "No100010", "str": "Base Suit"}]],
                    [[{"name": "No100001", "str": "髪"}], []]
                ]
            },
            "accessoryText": {
                "categoryNames": ["decoy"],
                "text": [[[], [{"name": "No300000", "str": "Halo"}]]]
            }
        }"#,
    )
    .expect("sample dump parses")
}

/// Build a material from an encoded name and its declared textures
pub fn material(name: &str, textures: &[&str]) -> Material {
    Material {
        identity: MaterialIdentity::decode(name).expect("test material name is valid"),
        textures: textures.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

/// Write a spreadsheet under a file list root, creating its directory
pub fn write_sheet(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create sheet directory");
    }
    fs::write(&path, content).expect("Failed to write sheet");
}
