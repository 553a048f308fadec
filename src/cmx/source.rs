//! Character-making data extracted from the game client.
//!
//! Extraction itself is done by an external tool. [`CmxData`] reads the JSON
//! dump it writes:
//!
//! ```json
//! {
//!   "objects": { "basewear": { "100010": { "texStrings": [..], "body": {..} } } },
//!   "idLinks": { "basewear": { "100011": { "fileId": 100010 } } },
//!   "partsText": { "categoryNames": [..], "text": [..] },
//!   "accessoryText": { .. },
//!   "faceVariationScript": "..."
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::names::NameText;
use super::CatalogError;

/// One dictionary of the character-making index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmxDict {
    Accessory,
    Costume,
    Basewear,
    Outerwear,
    CastArm,
    CastLeg,
    Innerwear,
    BodyPaint,
    Sticker,
    Skin,
    Face,
    FaceTexture,
    FacePaint,
    Eye,
    Eyebrow,
    Eyelash,
    Ear,
    Teeth,
    Horn,
    Hair,
}

impl CmxDict {
    pub const ALL: [CmxDict; 20] = [
        CmxDict::Accessory,
        CmxDict::Costume,
        CmxDict::Basewear,
        CmxDict::Outerwear,
        CmxDict::CastArm,
        CmxDict::CastLeg,
        CmxDict::Innerwear,
        CmxDict::BodyPaint,
        CmxDict::Sticker,
        CmxDict::Skin,
        CmxDict::Face,
        CmxDict::FaceTexture,
        CmxDict::FacePaint,
        CmxDict::Eye,
        CmxDict::Eyebrow,
        CmxDict::Eyelash,
        CmxDict::Ear,
        CmxDict::Teeth,
        CmxDict::Horn,
        CmxDict::Hair,
    ];
}

/// Body fields. Negative values mean unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBody {
    #[serde(default = "unset")]
    pub head_id: i64,
    #[serde(default = "unset")]
    pub sound_id: i64,
    #[serde(default = "unset")]
    pub linked_inner_id: i64,
    #[serde(default = "unset")]
    pub linked_outer_id: i64,
    #[serde(default = "unset_f64")]
    pub leg_length: f64,
}

fn unset() -> i64 {
    -1
}

fn unset_f64() -> f64 {
    -1.0
}

/// A raw record of any dictionary. Fields a dictionary does not use are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCmxObject {
    #[serde(default)]
    pub tex_strings: Vec<String>,
    #[serde(default)]
    pub node_attach: Vec<String>,
    #[serde(default)]
    pub effect_name: String,
    #[serde(default)]
    pub body: Option<RawBody>,
    /// Mask channel color indices, red to alpha.
    #[serde(default)]
    pub color_mapping: Option<[i64; 4]>,
    /// Packed red/green and blue/alpha hair color indices.
    #[serde(default)]
    pub hair_colors: Option<[i64; 2]>,
}

impl RawCmxObject {
    /// Texture string `index` (1-based), empty when absent.
    pub fn tex(&self, index: usize) -> String {
        index
            .checked_sub(1)
            .and_then(|i| self.tex_strings.get(i))
            .cloned()
            .unwrap_or_default()
    }

    pub fn node(&self, index: usize) -> String {
        index
            .checked_sub(1)
            .and_then(|i| self.node_attach.get(i))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdLink {
    pub file_id: u32,
}

/// Read access to extracted character-making data.
pub trait CmxSource {
    fn objects(&self, dict: CmxDict) -> Result<&BTreeMap<u32, RawCmxObject>, CatalogError>;

    /// File id of an item that shares another item's model.
    fn id_link(&self, dict: CmxDict, id: u32) -> Option<u32>;

    fn parts_text(&self) -> &NameText;

    fn accessory_text(&self) -> &NameText;

    /// Contents of `face_variation.cmp.lua`, if it was extracted.
    fn face_variation_script(&self) -> Option<&str>;
}

/// JSON dump of the character-making index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmxData {
    #[serde(default)]
    pub objects: BTreeMap<CmxDict, BTreeMap<u32, RawCmxObject>>,
    #[serde(default)]
    pub id_links: BTreeMap<CmxDict, BTreeMap<u32, IdLink>>,
    #[serde(default)]
    pub parts_text: NameText,
    #[serde(default)]
    pub accessory_text: NameText,
    #[serde(default)]
    pub face_variation_script: Option<String>,
}

impl CmxData {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|e| CatalogError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let data = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(data)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }
}

fn empty_objects() -> &'static BTreeMap<u32, RawCmxObject> {
    static EMPTY: OnceLock<BTreeMap<u32, RawCmxObject>> = OnceLock::new();
    EMPTY.get_or_init(BTreeMap::new)
}

impl CmxSource for CmxData {
    fn objects(&self, dict: CmxDict) -> Result<&BTreeMap<u32, RawCmxObject>, CatalogError> {
        Ok(self.objects.get(&dict).unwrap_or_else(|| empty_objects()))
    }

    fn id_link(&self, dict: CmxDict, id: u32) -> Option<u32> {
        self.id_links.get(&dict)?.get(&id).map(|l| l.file_id)
    }

    fn parts_text(&self) -> &NameText {
        &self.parts_text
    }

    fn accessory_text(&self) -> &NameText {
        &self.accessory_text
    }

    fn face_variation_script(&self) -> Option<&str> {
        self.face_variation_script.as_deref()
    }
}
