//! File-name classifier for game assets.
//!
//! Every asset name encodes its category, object type, id, body part,
//! texture role and level of detail, e.g. `pl_rbd_100001_bw_d.dds`. Parsing
//! is total: tokens that are not recognized are left as `None`.

pub mod kinds;

use std::path::Path;

use serde::Serialize;

use crate::ids::BodyType;

pub use kinds::{ModelPart, ObjectCategory, ObjectType, TextureRole};

const LOD_L1: &str = "_l1";
const LOD_L2: &str = "_l2";
const LOD_L3: &str = "_l3";
const TEXTURE_EXTENSIONS: [&str; 2] = [".dds", ".png"];

/// Archives holding the base NGS body for each body type.
const NGS_T1_BASE_BODY_ICE: &str = "195fac68420e7a08fb37ae36403a419b";
const NGS_T2_BASE_BODY_ICE: &str = "be23da464641f6ea102f4366095fa5eb";

/// Horizontal UV remap applied to cast parts sharing one texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UvMapping {
    pub from_u_min: f32,
    pub from_u_max: f32,
    pub to_u_min: f32,
    pub to_u_max: f32,
}

pub const CAST_ARMS_UV_MAPPING: UvMapping = UvMapping {
    from_u_min: 0.0,
    from_u_max: 1.0 / 3.0,
    to_u_min: 0.0,
    to_u_max: 2.0 / 3.0,
};

pub const CAST_BODY_UV_MAPPING: UvMapping = UvMapping {
    from_u_min: 1.0 / 3.0,
    from_u_max: 2.0 / 3.0,
    to_u_min: 0.0,
    to_u_max: 2.0 / 3.0,
};

pub const CAST_LEGS_UV_MAPPING: UvMapping = UvMapping {
    from_u_min: 2.0 / 3.0,
    from_u_max: 1.0,
    to_u_min: 0.0,
    to_u_max: 2.0 / 3.0,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectInfo {
    pub name: String,
    pub extension: String,
    pub category: Option<ObjectCategory>,
    pub object_type: Option<ObjectType>,
    pub object_id: Option<u32>,
    pub part: Option<ModelPart>,
    pub texture: Option<TextureRole>,
    pub level_of_detail: u8,
}

impl ObjectInfo {
    /// Classify a file name or path. Only the final path component is read.
    pub fn from_file_name(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (category, rest) = stem.split_once('_').unwrap_or((stem.as_str(), ""));

        let mut info = ObjectInfo {
            name,
            extension,
            category: ObjectCategory::from_code(category),
            ..Default::default()
        };

        match info.category {
            Some(ObjectCategory::Mag) | Some(ObjectCategory::Weapon) => info.parse_weapon(rest),
            Some(ObjectCategory::Object) => info.parse_object(rest),
            Some(ObjectCategory::Player) => info.parse_player(rest),
            _ => {}
        }

        info
    }

    fn is_texture_file(&self) -> bool {
        TEXTURE_EXTENSIONS
            .iter()
            .any(|ext| self.extension.eq_ignore_ascii_case(ext))
    }

    // ..._####_####[_lod].ext or ..._####_####_###_texture.ext
    fn parse_object(&mut self, rest: &str) {
        let (rest, lod) = partition_lod(rest);
        self.level_of_detail = lod;

        if self.is_texture_file() {
            let texture = rest.rsplit_once('_').map(|(_, t)| t).unwrap_or(rest);
            self.texture = TextureRole::from_code(texture);
        }
    }

    // ..._type_id_...
    fn parse_player(&mut self, rest: &str) {
        let (object_type, rest) = rest.split_once('_').unwrap_or((rest, ""));
        let (object_id, rest) = rest.split_once('_').unwrap_or((rest, ""));

        self.object_type = ObjectType::from_code(object_type);
        self.object_id = object_id.parse().ok();

        if self.is_ngs() {
            // part[_texture][_lod]
            let (rest, lod) = partition_lod(rest);
            self.level_of_detail = lod;

            let part = if self.is_texture_file() {
                let (part, texture) = rest.rsplit_once('_').unwrap_or(("", rest));
                self.texture = TextureRole::from_code(texture);
                part
            } else {
                rest
            };

            self.part = ModelPart::from_code(part);
        } else {
            // texture_part_part, with x / xx_xx placeholders
            let (texture, part) = rest.split_once('_').unwrap_or((rest, ""));

            if texture != "x" {
                self.texture = TextureRole::from_code(texture);
            }
            if part != "xx_xx" {
                self.part = ModelPart::from_code(part);
            }
        }
    }

    // ...[_r]_##_##_##_##_##_r[_texture].ext
    fn parse_weapon(&mut self, rest: &str) {
        if rest.starts_with(ObjectType::Ngs.code()) {
            self.object_type = Some(ObjectType::Ngs);
        }

        if self.is_texture_file() {
            let texture = rest.rsplit_once('_').map(|(_, t)| t).unwrap_or(rest);
            self.texture = TextureRole::from_code(texture);
        }
    }

    pub fn id(&self) -> u32 {
        self.object_id.unwrap_or(0)
    }

    pub fn body_type(&self) -> BodyType {
        match self.object_id {
            Some(id) => BodyType::from_id(id),
            None => BodyType::Genderless,
        }
    }

    /// Archive containing the NGS base body matching this object's body type.
    pub fn base_body_ice(&self) -> Option<&'static str> {
        match self.body_type() {
            BodyType::NgsMale => Some(NGS_T1_BASE_BODY_ICE),
            BodyType::NgsFemale => Some(NGS_T2_BASE_BODY_ICE),
            _ => None,
        }
    }

    pub fn is_ngs(&self) -> bool {
        self.object_type.map(|t| t.is_ngs()).unwrap_or(false)
    }

    fn is_player(&self) -> bool {
        self.category == Some(ObjectCategory::Player)
    }

    fn is_player_type(&self, types: &[ObjectType]) -> bool {
        self.is_player() && self.object_type.map(|t| types.contains(&t)).unwrap_or(false)
    }

    fn part_is(&self, f: impl Fn(&ModelPart) -> bool) -> bool {
        self.part.as_ref().map(f).unwrap_or(false)
    }

    pub fn is_body_object(&self) -> bool {
        self.is_player_type(&[
            ObjectType::Body,
            ObjectType::BodyPaint,
            ObjectType::NgsBody,
            ObjectType::NgsBodyPaint,
        ])
    }

    pub fn is_basewear(&self) -> bool {
        self.is_player() && self.part_is(ModelPart::is_basewear)
    }

    pub fn is_outerwear(&self) -> bool {
        self.is_player() && self.part_is(ModelPart::is_outerwear)
    }

    pub fn is_innerwear(&self) -> bool {
        self.is_player() && self.part_is(ModelPart::is_innerwear)
    }

    pub fn is_cast_part(&self) -> bool {
        self.is_body_object() && self.part_is(ModelPart::is_cast)
    }

    pub fn is_hair(&self) -> bool {
        self.is_player_type(&[ObjectType::Hair, ObjectType::NgsHair])
    }

    pub fn is_head(&self) -> bool {
        self.is_player_type(&[
            ObjectType::Ear,
            ObjectType::Head,
            ObjectType::NgsEar,
            ObjectType::NgsHead,
        ])
    }

    pub fn is_eye(&self) -> bool {
        self.is_player_type(&[ObjectType::Eye, ObjectType::NgsEye])
    }

    pub fn is_eyebrow(&self) -> bool {
        self.is_player_type(&[ObjectType::Eyebrow, ObjectType::NgsEyebrow])
    }

    pub fn is_eyelash(&self) -> bool {
        self.is_player_type(&[ObjectType::Eyelashes, ObjectType::NgsEyelashes])
    }

    pub fn use_costume_colors(&self) -> bool {
        self.is_body_object() && !self.part_is(ModelPart::is_cast)
    }

    pub fn use_skin_colors(&self) -> bool {
        self.is_body_object() || self.is_head()
    }

    pub fn use_cast_colors(&self) -> bool {
        self.is_cast_part()
    }

    pub fn use_hair_colors(&self) -> bool {
        self.is_hair()
    }

    pub fn use_eye_colors(&self) -> bool {
        self.is_eye()
    }

    pub fn use_eyebrow_colors(&self) -> bool {
        self.is_eyebrow()
    }

    pub fn use_eyelash_colors(&self) -> bool {
        self.is_eyelash()
    }

    pub fn uv_mapping(&self) -> Option<UvMapping> {
        let part = self.part?;
        if part.is_cast_arms() {
            Some(CAST_ARMS_UV_MAPPING)
        } else if part.is_cast_body() {
            Some(CAST_BODY_UV_MAPPING)
        } else if part.is_cast_legs() {
            Some(CAST_LEGS_UV_MAPPING)
        } else {
            None
        }
    }

    /// Human readable kind of object, empty when unknown.
    pub fn description(&self) -> String {
        let tag = if self.is_ngs() { " (NGS)" } else { "" };

        match self.category {
            Some(ObjectCategory::Effect) => return "Effect".to_string(),
            Some(ObjectCategory::Enemy) => return format!("Enemy{tag}"),
            Some(ObjectCategory::Mag) => return format!("Mag{tag}"),
            Some(ObjectCategory::Weapon) => return format!("Weapon{tag}"),
            Some(ObjectCategory::Ui) => return "UI".to_string(),
            _ => {}
        }

        let Some(object_type) = self.object_type else {
            return String::new();
        };

        let base = match object_type {
            ObjectType::Accessory | ObjectType::NgsAccessory => "Accessory",
            ObjectType::BodyPaint | ObjectType::NgsBodyPaint => "Body Paint",
            ObjectType::Ear | ObjectType::NgsEar => "Ears",
            ObjectType::Eye | ObjectType::NgsEye => "Eyes",
            ObjectType::Eyebrow | ObjectType::NgsEyebrow => "Eyebrows",
            ObjectType::Eyelashes | ObjectType::NgsEyelashes => "Eyelashes",
            ObjectType::Hair | ObjectType::NgsHair => "Hair",
            ObjectType::Head | ObjectType::NgsHead => "Head",
            ObjectType::FacePaint | ObjectType::NgsFacePaint => "Face Paint",
            ObjectType::NgsHorn => "Horns",
            ObjectType::NgsTeeth => "Teeth",
            ObjectType::Sticker => "Sticker",
            ObjectType::Body | ObjectType::NgsBody => {
                return self
                    .part
                    .map(|p| p.description().to_string())
                    .unwrap_or_default();
            }
            ObjectType::Ngs => return String::new(),
        };

        format!("{base}{tag}")
    }
}

/// Strip a level-of-detail suffix.
///
/// `_l3` maps to 1, not 3.
fn partition_lod(text: &str) -> (&str, u8) {
    if let Some(rest) = text.strip_suffix(LOD_L1) {
        return (rest, 1);
    }
    if let Some(rest) = text.strip_suffix(LOD_L2) {
        return (rest, 2);
    }
    if let Some(rest) = text.strip_suffix(LOD_L3) {
        return (rest, 1);
    }
    (text, 0)
}

pub fn classify(file_name: &str) -> ObjectInfo {
    ObjectInfo::from_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngs_basewear_model() {
        let info = classify("pl_rbd_100001_bw.aqp");
        assert_eq!(info.category, Some(ObjectCategory::Player));
        assert_eq!(info.object_type, Some(ObjectType::NgsBody));
        assert_eq!(info.object_id, Some(100001));
        assert_eq!(info.part, Some(ModelPart::NgsBasewear));
        assert_eq!(info.extension, ".aqp");
        assert!(info.is_ngs());
        assert!(info.is_basewear());
        assert!(info.use_costume_colors());
        assert_eq!(info.body_type(), BodyType::NgsMale);
        assert_eq!(info.base_body_ice(), Some(NGS_T1_BASE_BODY_ICE));
        assert_eq!(info.description(), "Basewear (NGS)");
    }

    #[test]
    fn classic_body_model() {
        let info = classify("pl_bd_020001_00_00_bw.aqp");
        assert_eq!(info.object_type, Some(ObjectType::Body));
        assert_eq!(info.object_id, Some(20001));
        assert_eq!(info.body_type(), BodyType::Male);
        assert!(!info.is_ngs());
        assert_eq!(info.base_body_ice(), None);
    }

    #[test]
    fn classic_texture_and_part() {
        let info = classify("pl_bd_45000_d_mc_rm.dds");
        assert_eq!(info.texture, Some(TextureRole::Diffuse));
        assert_eq!(info.part, Some(ModelPart::MaleCastArms));
        assert!(info.is_cast_part());
        assert!(info.use_cast_colors());
        assert!(!info.use_costume_colors());
        assert_eq!(info.uv_mapping(), Some(CAST_ARMS_UV_MAPPING));

        let placeholder = classify("pl_hr_01000_x_xx_xx.aqp");
        assert_eq!(placeholder.texture, None);
        assert_eq!(placeholder.part, None);
        assert!(placeholder.is_hair());
    }

    #[test]
    fn ngs_texture_with_lod() {
        let info = classify("pl_rbd_300001_lg_n.dds");
        assert_eq!(info.part, Some(ModelPart::NgsCastLegs));
        assert_eq!(info.texture, Some(TextureRole::Normal));
        assert_eq!(info.uv_mapping(), Some(CAST_LEGS_UV_MAPPING));

        let lod = classify("pl_rbd_100010_bw_l2.aqp");
        assert_eq!(lod.level_of_detail, 2);
        assert_eq!(lod.part, Some(ModelPart::NgsBasewear));

        let hair = classify("pl_rhr_100010.aqp");
        assert_eq!(hair.part, None);
        assert!(hair.use_hair_colors());
        assert_eq!(hair.description(), "Hair (NGS)");
    }

    #[test]
    fn lod_suffixes() {
        assert_eq!(partition_lod("a_l1"), ("a", 1));
        assert_eq!(partition_lod("a_l2"), ("a", 2));
        assert_eq!(partition_lod("a_l3"), ("a", 1));
        assert_eq!(partition_lod("a"), ("a", 0));
    }

    #[test]
    fn weapons_and_objects() {
        let weapon = classify("wp_r_01_02_03_04_05_r_d.dds");
        assert_eq!(weapon.category, Some(ObjectCategory::Weapon));
        assert_eq!(weapon.object_type, Some(ObjectType::Ngs));
        assert_eq!(weapon.texture, Some(TextureRole::Diffuse));
        assert_eq!(weapon.description(), "Weapon (NGS)");

        let object = classify("ob_1000_0001_l1.aqp");
        assert_eq!(object.level_of_detail, 1);
        assert_eq!(object.description(), "");
    }

    #[test]
    fn garbage_never_fails() {
        for name in ["", "_", "pl", "pl_", "pl_rbd", "zz_yy_xx.png", "pl_rbd_abc_zz.dds"] {
            let info = classify(name);
            assert_eq!(info.part, None, "{name}");
        }
        assert_eq!(classify("pl_rbd_abc_bw.aqp").object_id, None);
    }
}
