//! Texture sets and candidate image pools.

use serde::Serialize;

use crate::object_info::{ObjectInfo, TextureRole};

/// Image handles for one material, one slot per texture role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextureSet {
    pub alpha: Option<String>,
    pub diffuse: Option<String>,
    pub layer: Option<String>,
    pub mask: Option<String>,
    pub multi: Option<String>,
    pub normal: Option<String>,
    pub env: Option<String>,
    pub texture_c: Option<String>,
    pub texture_g: Option<String>,
    pub texture_k: Option<String>,
    pub texture_o: Option<String>,
    pub texture_p: Option<String>,
}

impl TextureSet {
    pub fn slot(&self, role: TextureRole) -> &Option<String> {
        match role {
            TextureRole::Alpha => &self.alpha,
            TextureRole::Diffuse => &self.diffuse,
            TextureRole::Layer => &self.layer,
            TextureRole::Mask => &self.mask,
            TextureRole::Multi => &self.multi,
            TextureRole::Normal => &self.normal,
            TextureRole::Env => &self.env,
            TextureRole::UnknownC => &self.texture_c,
            TextureRole::UnknownG => &self.texture_g,
            TextureRole::UnknownK => &self.texture_k,
            TextureRole::UnknownO => &self.texture_o,
            TextureRole::UnknownP => &self.texture_p,
        }
    }

    pub fn slot_mut(&mut self, role: TextureRole) -> &mut Option<String> {
        match role {
            TextureRole::Alpha => &mut self.alpha,
            TextureRole::Diffuse => &mut self.diffuse,
            TextureRole::Layer => &mut self.layer,
            TextureRole::Mask => &mut self.mask,
            TextureRole::Multi => &mut self.multi,
            TextureRole::Normal => &mut self.normal,
            TextureRole::Env => &mut self.env,
            TextureRole::UnknownC => &mut self.texture_c,
            TextureRole::UnknownG => &mut self.texture_g,
            TextureRole::UnknownK => &mut self.texture_k,
            TextureRole::UnknownO => &mut self.texture_o,
            TextureRole::UnknownP => &mut self.texture_p,
        }
    }

    /// Fill an empty slot. An already filled slot is left untouched.
    pub fn set_if_empty(&mut self, role: TextureRole, image: Option<String>) {
        let slot = self.slot_mut(role);
        if slot.is_none() {
            *slot = image;
        }
    }

    /// Left-biased union: each slot keeps `self` unless it is empty.
    pub fn merge(mut self, other: TextureSet) -> TextureSet {
        const ROLES: [TextureRole; 12] = [
            TextureRole::Alpha,
            TextureRole::Diffuse,
            TextureRole::Layer,
            TextureRole::Mask,
            TextureRole::Multi,
            TextureRole::Normal,
            TextureRole::Env,
            TextureRole::UnknownC,
            TextureRole::UnknownG,
            TextureRole::UnknownK,
            TextureRole::UnknownO,
            TextureRole::UnknownP,
        ];

        for role in ROLES {
            self.set_if_empty(role, other.slot(role).clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == TextureSet::default()
    }
}

/// All textures a material's shader can read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialTextureBundle {
    pub default: TextureSet,
    pub inner: TextureSet,
    pub skin_0: TextureSet,
    pub skin_1: TextureSet,
    pub decal: TextureSet,
}

#[derive(Debug, Clone)]
struct PoolImage {
    name: String,
    stem: String,
    parts: Vec<String>,
}

impl PoolImage {
    fn new(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let stem = match lower.rsplit_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => lower,
        };
        let parts = stem.split('_').map(str::to_string).collect();
        Self {
            name: name.to_string(),
            stem,
            parts,
        }
    }

    fn has_parts(&self, parts: &[&str]) -> bool {
        parts
            .iter()
            .all(|p| self.parts.iter().any(|own| own.eq_ignore_ascii_case(p)))
    }
}

/// Candidate images, matched by the underscore-separated parts of their
/// names. Part order does not matter.
#[derive(Debug, Clone, Default)]
pub struct TexturePool {
    images: Vec<PoolImage>,
}

impl TexturePool {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            images: names.into_iter().map(|n| PoolImage::new(n.as_ref())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// First image, in pool order, containing every part.
    pub fn find(&self, parts: &[&str]) -> Option<String> {
        self.images
            .iter()
            .find(|img| img.has_parts(parts))
            .map(|img| img.name.clone())
    }

    /// Every image containing every part, sorted by name.
    pub fn find_all(&self, parts: &[&str]) -> Vec<String> {
        let mut found = self
            .images
            .iter()
            .filter(|img| img.has_parts(parts))
            .map(|img| img.name.clone())
            .collect::<Vec<_>>();
        found.sort();
        found
    }

    /// Image whose name without extension equals `stem`.
    pub fn find_stem(&self, stem: &str) -> Option<String> {
        self.images
            .iter()
            .find(|img| img.stem.eq_ignore_ascii_case(stem))
            .map(|img| img.name.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Colorspace {
    #[serde(rename = "sRGB")]
    Srgb,
    #[serde(rename = "Non-Color")]
    NonColor,
}

/// Diffuse images hold color; everything else is raw data.
pub fn texture_colorspace(name: &str) -> Colorspace {
    match ObjectInfo::from_file_name(name).texture {
        Some(TextureRole::Diffuse) => Colorspace::Srgb,
        _ => Colorspace::NonColor,
    }
}
