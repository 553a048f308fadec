//! Texture resolution for exported materials.
//!
//! A material declares the textures it was exported with using canonical
//! names such as `pl_body_base_diffuse.dds`. Each name is parsed once into a
//! [`CanonicalTexture`] and then matched against the images that were
//! actually loaded for the model.

use crate::object_info::{ModelPart, ObjectInfo, ObjectType, TextureRole};

use super::textures::{MaterialTextureBundle, TexturePool, TextureSet};
use super::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFamily {
    BodyBase,
    BodySkin,
    BodyInner,
    BodyDecal,
    CastArm,
    CastBody,
    CastLeg,
    ClassicBody,
    Face,
    Eye,
    Hair,
    Ear,
    Dental,
    Eyebrow,
    Eyelash,
    Horn,
    Accessory,
}

impl TextureFamily {
    pub fn from_code(code: &str) -> Option<Self> {
        let family = match code {
            "body_base" => TextureFamily::BodyBase,
            "body_skin" => TextureFamily::BodySkin,
            "body_inner" => TextureFamily::BodyInner,
            "body_decal" => TextureFamily::BodyDecal,
            "cast_arm" => TextureFamily::CastArm,
            "cast_body" => TextureFamily::CastBody,
            "cast_leg" => TextureFamily::CastLeg,
            "classic_body" => TextureFamily::ClassicBody,
            "face" => TextureFamily::Face,
            "eye" => TextureFamily::Eye,
            "hair" => TextureFamily::Hair,
            "ear" => TextureFamily::Ear,
            "dental" => TextureFamily::Dental,
            "eyebrow" => TextureFamily::Eyebrow,
            "eyelash" => TextureFamily::Eyelash,
            "horn" => TextureFamily::Horn,
            "accessory" => TextureFamily::Accessory,
            _ => return None,
        };
        Some(family)
    }
}

/// Channel named by a canonical texture. `Subnormal` has no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalRole {
    Diffuse,
    Multi,
    Normal,
    Mask,
    Alpha,
    Layer,
    Env,
    Subnormal,
}

impl CanonicalRole {
    pub fn from_code(code: &str) -> Option<Self> {
        let role = match code {
            "diffuse" => CanonicalRole::Diffuse,
            "multi" => CanonicalRole::Multi,
            "normal" => CanonicalRole::Normal,
            "mask" => CanonicalRole::Mask,
            "alpha" => CanonicalRole::Alpha,
            "layer" => CanonicalRole::Layer,
            "env" => CanonicalRole::Env,
            "subnormal" => CanonicalRole::Subnormal,
            _ => return None,
        };
        Some(role)
    }

    pub fn texture_role(&self) -> Option<TextureRole> {
        match self {
            CanonicalRole::Diffuse => Some(TextureRole::Diffuse),
            CanonicalRole::Multi => Some(TextureRole::Multi),
            CanonicalRole::Normal => Some(TextureRole::Normal),
            CanonicalRole::Mask => Some(TextureRole::Mask),
            CanonicalRole::Alpha => Some(TextureRole::Alpha),
            CanonicalRole::Layer => Some(TextureRole::Layer),
            CanonicalRole::Env => Some(TextureRole::Env),
            CanonicalRole::Subnormal => None,
        }
    }
}

/// A parsed `pl_{family}_{role}.dds` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalTexture {
    pub family: TextureFamily,
    pub role: CanonicalRole,
}

impl CanonicalTexture {
    pub fn parse(file_name: &str) -> Option<Self> {
        let lower = file_name.to_ascii_lowercase();
        let stem = lower.strip_suffix(".dds").unwrap_or(&lower);
        let (family, role) = stem.strip_prefix("pl_")?.rsplit_once('_')?;

        Some(Self {
            family: TextureFamily::from_code(family)?,
            role: CanonicalRole::from_code(role)?,
        })
    }
}

/// Candidate images available to a material.
///
/// `pool` holds the images of the material's own model. `inner` and `skin`
/// hold the linked innerwear and skin images. `extra` holds images from
/// other objects already in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Pools<'a> {
    pub pool: &'a TexturePool,
    pub inner: &'a TexturePool,
    pub skin: &'a TexturePool,
    pub extra: &'a TexturePool,
}

/// Assign the images a material reads to each of its texture slots.
///
/// Missing images leave their slot empty; this never fails.
pub fn resolve(
    material: &Material,
    pool: &TexturePool,
    inner_pool: &TexturePool,
    skin_pool: &TexturePool,
    extra_pool: &TexturePool,
) -> MaterialTextureBundle {
    let pools = Pools {
        pool,
        inner: inner_pool,
        skin: skin_pool,
        extra: extra_pool,
    };

    let mut bundle = MaterialTextureBundle::default();
    for texture in &material.textures {
        match CanonicalTexture::parse(texture) {
            Some(canonical) => resolve_canonical(&mut bundle, canonical, &pools),
            None => resolve_unknown(&mut bundle, texture, &pools),
        }
    }
    bundle
}

fn resolve_canonical(bundle: &mut MaterialTextureBundle, texture: CanonicalTexture, pools: &Pools) {
    let Some(role) = texture.role.texture_role() else {
        return;
    };
    let code = role.code();

    let (target, image) = match texture.family {
        TextureFamily::BodyBase => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rbd", "bw"], &["rbd", "ow"]], code),
        ),
        TextureFamily::CastArm => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rbd", "rm"], &["rbd", "bd"], &["rbd", "lg"]], code),
        ),
        TextureFamily::CastBody => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rbd", "bd"], &["rbd", "rm"], &["rbd", "lg"]], code),
        ),
        TextureFamily::CastLeg => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rbd", "lg"], &["rbd", "rm"], &["rbd", "bd"]], code),
        ),
        TextureFamily::ClassicBody => (&mut bundle.default, first_match(pools.pool, &[&["bd"]], code)),
        TextureFamily::Face => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rhd"], &["hd"]], code),
        ),
        TextureFamily::Hair => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rhr"], &["hr"]], code),
        ),
        TextureFamily::Ear => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rea"], &["ea"]], code),
        ),
        TextureFamily::Dental => (&mut bundle.default, first_match(pools.pool, &[&["rdt"]], code)),
        TextureFamily::Horn => (&mut bundle.default, first_match(pools.pool, &[&["rhn"]], code)),
        TextureFamily::Accessory => (
            &mut bundle.default,
            first_match(pools.pool, &[&["rah"], &["rac"], &["ah"]], code),
        ),
        TextureFamily::Eye => (
            &mut bundle.default,
            own_then_extra(pools, &[&["rey"], &["ey"]], code),
        ),
        TextureFamily::Eyebrow => (
            &mut bundle.default,
            own_then_extra(pools, &[&["reb"], &["eb"]], code),
        ),
        TextureFamily::Eyelash => (
            &mut bundle.default,
            own_then_extra(pools, &[&["res"], &["es"]], code),
        ),
        TextureFamily::BodyInner => (
            &mut bundle.inner,
            first_match(pools.inner, &[&["rbd", "iw"]], code)
                .or_else(|| first_match(pools.extra, &[&["rbd", "iw"]], code)),
        ),
        TextureFamily::BodyDecal => (
            &mut bundle.decal,
            first_match(pools.extra, &[&["rba"], &["ba"], &["bp"]], code),
        ),
        TextureFamily::BodySkin => {
            // Skin variants are ordered by name: the first is variant 0.
            let mut skins = pools.skin.find_all(&["rbd", "sk", code]).into_iter();
            bundle.skin_0.set_if_empty(role, skins.next());
            bundle.skin_1.set_if_empty(role, skins.next());
            return;
        }
    };

    target.set_if_empty(role, image);
}

fn first_match(pool: &TexturePool, alternatives: &[&[&str]], role: &str) -> Option<String> {
    alternatives.iter().find_map(|parts| {
        let mut query = parts.to_vec();
        query.push(role);
        pool.find(&query)
    })
}

fn own_then_extra(pools: &Pools, alternatives: &[&[&str]], role: &str) -> Option<String> {
    first_match(pools.pool, alternatives, role).or_else(|| first_match(pools.extra, alternatives, role))
}

fn resolve_unknown(bundle: &mut MaterialTextureBundle, texture: &str, pools: &Pools) {
    let info = ObjectInfo::from_file_name(texture);
    let Some(role) = info.texture else {
        log::debug!("Unrecognized texture {}", texture);
        return;
    };

    let stem = texture.rsplit_once('.').map(|(s, _)| s).unwrap_or(texture);
    let image = pools
        .pool
        .find_stem(stem)
        .or_else(|| pools.extra.find_stem(stem))
        .or_else(|| classic_cast_sibling(&info, stem, pools.pool));

    target_set(bundle, &info).set_if_empty(role, image);
}

fn target_set<'a>(bundle: &'a mut MaterialTextureBundle, info: &ObjectInfo) -> &'a mut TextureSet {
    let is_decal = matches!(
        info.object_type,
        Some(ObjectType::BodyPaint | ObjectType::NgsBodyPaint | ObjectType::Sticker)
    );

    if info.is_innerwear() {
        &mut bundle.inner
    } else if is_decal {
        &mut bundle.decal
    } else {
        &mut bundle.default
    }
}

/// Classic cast pieces often share one texture set. Try the same name with
/// the other piece tokens, own piece first.
fn classic_cast_sibling(info: &ObjectInfo, stem: &str, pool: &TexturePool) -> Option<String> {
    let part = info.part.filter(|p| p.is_cast() && !is_ngs_part(p))?;
    let (prefix, own) = stem.rsplit_once('_')?;

    std::iter::once(own)
        .chain(["tr", "rm", "lg"].into_iter().filter(|piece| *piece != own))
        .find_map(|piece| pool.find_stem(&format!("{prefix}_{piece}")))
        .inspect(|found| log::debug!("Using {} for {:?} texture {}", found, part, stem))
}

fn is_ngs_part(part: &ModelPart) -> bool {
    matches!(
        part,
        ModelPart::NgsCastArms | ModelPart::NgsCastBody | ModelPart::NgsCastLegs
    )
}
