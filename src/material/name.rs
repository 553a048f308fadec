//! Material name codec.
//!
//! Exported models carry their material identity in the interchange-format
//! material name:
//!
//! `(shader0,shader1){blend_type}[special_type]name@two_sided@alpha_cutoff`
//!
//! The host editor may append `.001` or `(1)` to duplicate names; that
//! suffix is stripped before parsing.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORMAT_HELP: &str = "\
Name must be of the format:

(shader0,shader1){blend_type}[special_type]name@two_sided@clip_threshold

(shader0,shader1) -- shader names, e.g. (1100p,1100)
{blend_type}      -- {opaque}, {blendalpha}, {hollow}, or {add}
[special_type]    -- (optional) [rbd], [rbd_sk], etc...
name              -- the PSO2 material name
@two_sided        -- (optional) 0 = backface culling, 1 = no backface culling
@clip_threshold   -- (optional) alpha clip threshold (0-255)";

/// Malformed material name. The message includes the expected grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid material name \"{name}\".\n{}", FORMAT_HELP)]
pub struct FormatError {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendType {
    #[default]
    Opaque,
    BlendAlpha,
    Hollow,
    Add,
}

impl BlendType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "opaque" => Some(BlendType::Opaque),
            "blendalpha" => Some(BlendType::BlendAlpha),
            "hollow" => Some(BlendType::Hollow),
            "add" => Some(BlendType::Add),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BlendType::Opaque => "opaque",
            BlendType::BlendAlpha => "blendalpha",
            BlendType::Hollow => "hollow",
            BlendType::Add => "add",
        }
    }

    /// Blend types rendered with alpha.
    pub fn uses_alpha(&self) -> bool {
        !matches!(self, BlendType::Opaque)
    }
}

impl fmt::Display for BlendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialIdentity {
    pub shaders: Vec<String>,
    pub blend_type: BlendType,
    #[serde(default)]
    pub special_type: String,
    pub name: String,
    #[serde(default)]
    pub two_sided: u8,
    #[serde(default)]
    pub alpha_cutoff: u8,
}

fn material_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\((?P<shaders>[\w,]+)\)\{(?P<blend_type>\w+)\}(?:\[(?P<special_type>\w+)\])?(?P<name>[^@]*)(?:@(?P<two_sided>\d+))?(?:@(?P<alpha_cutoff>\d+))?$",
        )
        .expect("material name pattern is valid")
    })
}

fn duplicate_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\.\d{3}|\(\d+\))$").expect("suffix pattern is valid"))
}

impl MaterialIdentity {
    pub fn decode(text: &str) -> Result<Self, FormatError> {
        let error = || FormatError {
            name: text.to_string(),
        };

        let trimmed = duplicate_suffix_regex().replace(text, "");
        let caps = material_regex().captures(&trimmed).ok_or_else(error)?;

        let blend_type = BlendType::from_code(&caps["blend_type"]).ok_or_else(error)?;

        let number = |group: &str| -> Result<u8, FormatError> {
            match caps.name(group) {
                Some(m) => m.as_str().parse::<u8>().map_err(|_| error()),
                None => Ok(0),
            }
        };

        let two_sided = number("two_sided")?;
        if two_sided > 2 {
            return Err(error());
        }

        Ok(Self {
            shaders: caps["shaders"].split(',').map(str::to_string).collect(),
            blend_type,
            special_type: caps
                .name("special_type")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            name: caps["name"].to_string(),
            two_sided,
            alpha_cutoff: number("alpha_cutoff")?,
        })
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// All fields equal. Names compare case-insensitively.
    pub fn is_strict_match(&self, other: &MaterialIdentity) -> bool {
        self.is_loose_match(other)
            && self.two_sided == other.two_sided
            && self.alpha_cutoff == other.alpha_cutoff
    }

    /// Equal ignoring `two_sided` and `alpha_cutoff`.
    pub fn is_loose_match(&self, other: &MaterialIdentity) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.blend_type == other.blend_type
            && self.special_type == other.special_type
            && self.shaders == other.shaders
    }
}

impl fmt::Display for MaterialIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){{{}}}", self.shaders.join(","), self.blend_type)?;
        if !self.special_type.is_empty() {
            write!(f, "[{}]", self.special_type)?;
        }
        write!(f, "{}@{}@{}", self.name, self.two_sided, self.alpha_cutoff)
    }
}

impl std::str::FromStr for MaterialIdentity {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// Anything carrying a material identity.
pub trait HasIdentity {
    fn identity(&self) -> &MaterialIdentity;
}

impl HasIdentity for MaterialIdentity {
    fn identity(&self) -> &MaterialIdentity {
        self
    }
}

/// Find the candidate matching an encoded name: first strict match, then
/// first loose match. Malformed names are logged and match nothing.
pub fn find_best_match<'a, T: HasIdentity>(name: &str, candidates: &'a [T]) -> Option<&'a T> {
    let wanted = match MaterialIdentity::decode(name) {
        Ok(identity) => identity,
        Err(e) => {
            log::warn!("{}", e);
            return None;
        }
    };

    candidates
        .iter()
        .find(|c| wanted.is_strict_match(c.identity()))
        .or_else(|| candidates.iter().find(|c| wanted.is_loose_match(c.identity())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, two_sided: u8, alpha_cutoff: u8) -> MaterialIdentity {
        MaterialIdentity {
            shaders: vec!["1100p".to_string(), "1100".to_string()],
            blend_type: BlendType::Opaque,
            special_type: "rbd_sk".to_string(),
            name: name.to_string(),
            two_sided,
            alpha_cutoff,
        }
    }

    #[test]
    fn decode_full_name() {
        let m = MaterialIdentity::decode("(1100p,1100){opaque}[rbd_sk]pl_body_base@1@0").unwrap();
        assert_eq!(m, identity("pl_body_base", 1, 0));
    }

    #[test]
    fn decode_defaults_and_duplicate_suffix() {
        let m = MaterialIdentity::decode("(0100p,0100){blendalpha}hair.001").unwrap();
        assert_eq!(m.name, "hair");
        assert_eq!(m.special_type, "");
        assert_eq!(m.two_sided, 0);
        assert_eq!(m.alpha_cutoff, 0);
        assert_eq!(m.blend_type, BlendType::BlendAlpha);

        let m = MaterialIdentity::decode("(1100p,1100){hollow}[rhr]hair@0@128(2)").unwrap();
        assert_eq!(m.alpha_cutoff, 128);
        assert_eq!(m.name, "hair");
    }

    #[test]
    fn decode_rejects_bad_names() {
        for name in [
            "pl_body_base",
            "(1100p,1100)pl_body_base",
            "(1100p,1100){glow}pl_body_base",
            "(1100p,1100){opaque}x@7",
            "(1100p,1100){opaque}x@1@300",
        ] {
            assert!(MaterialIdentity::decode(name).is_err(), "{name}");
        }
    }

    #[test]
    fn round_trip() {
        let cases = [
            identity("pl_body_base", 1, 0),
            identity("Some Name", 2, 255),
            MaterialIdentity {
                shaders: vec!["1103p".into(), "1103".into(), "extra".into()],
                blend_type: BlendType::Add,
                special_type: String::new(),
                name: String::new(),
                two_sided: 0,
                alpha_cutoff: 7,
            },
        ];
        for m in cases {
            assert_eq!(MaterialIdentity::decode(&m.encode()).unwrap(), m);
        }
    }

    #[test]
    fn match_rules() {
        let a = identity("pl_body_base", 1, 0);
        let b = identity("PL_BODY_BASE", 0, 64);
        let c = identity("pl_body_base", 1, 0);

        assert!(a.is_strict_match(&c));
        assert!(a.is_loose_match(&c));
        assert!(!a.is_strict_match(&b));
        assert!(a.is_loose_match(&b) && b.is_loose_match(&a));
        assert!(a.is_loose_match(&a));
    }

    #[test]
    fn best_match_prefers_strict() {
        let candidates = vec![identity("pl_body_base", 0, 0), identity("pl_body_base", 1, 0)];

        let found = find_best_match("(1100p,1100){opaque}[rbd_sk]pl_body_base@1@0", &candidates);
        assert_eq!(found, Some(&candidates[1]));

        let loose = find_best_match("(1100p,1100){opaque}[rbd_sk]pl_body_base@2@9", &candidates);
        assert_eq!(loose, Some(&candidates[0]));

        assert_eq!(find_best_match("not a material", &candidates), None);
    }

    #[test]
    fn format_error_message() {
        let err = MaterialIdentity::decode("bogus").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r###"
        Invalid material name "bogus".
        Name must be of the format:

        (shader0,shader1){blend_type}[special_type]name@two_sided@clip_threshold

        (shader0,shader1) -- shader names, e.g. (1100p,1100)
        {blend_type}      -- {opaque}, {blendalpha}, {hollow}, or {add}
        [special_type]    -- (optional) [rbd], [rbd_sk], etc...
        name              -- the PSO2 material name
        @two_sided        -- (optional) 0 = backface culling, 1 = no backface culling
        @clip_threshold   -- (optional) alpha clip threshold (0-255)
        "###);
    }
}
