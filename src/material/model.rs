use super::canonical::resolve;
use super::shader::ShaderFamily;
use super::textures::{MaterialTextureBundle, TexturePool};
use super::Material;

/// The materials and images of one imported model.
#[derive(Debug, Clone, Default)]
pub struct ModelMaterials {
    pub materials: Vec<Material>,
    /// Images shipped with the model, including its linked innerwear.
    pub textures: TexturePool,
    /// Skin images from the scene or the default skin archive.
    pub skin_textures: TexturePool,
    /// Images of other objects the model's shaders read.
    pub extra_textures: TexturePool,
}

impl ModelMaterials {
    pub fn new(materials: Vec<Material>, textures: TexturePool) -> Self {
        Self {
            materials,
            textures,
            ..Default::default()
        }
    }

    fn has_family(&self, family: ShaderFamily) -> bool {
        self.materials.iter().any(|m| m.shader_family() == family)
    }

    pub fn has_skin_material(&self) -> bool {
        self.has_family(ShaderFamily::NgsSkin)
            || self
                .materials
                .iter()
                .any(|m| m.identity.special_type.ends_with("_sk"))
    }

    pub fn has_eye_material(&self) -> bool {
        self.has_family(ShaderFamily::NgsEye)
    }

    pub fn has_eyebrow_material(&self) -> bool {
        self.has_family(ShaderFamily::NgsEyebrow)
    }

    pub fn has_eyelash_material(&self) -> bool {
        self.has_family(ShaderFamily::NgsEyelash)
    }

    pub fn has_classic_default_material(&self) -> bool {
        self.has_family(ShaderFamily::Classic)
    }

    /// The model carries its own innerwear images.
    pub fn has_linked_inner_textures(&self) -> bool {
        self.textures.find(&["rbd", "iw"]).is_some()
    }

    /// Part queries for the skin images the model needs, if any.
    pub fn skin_query(&self) -> Option<&'static [&'static str]> {
        self.has_skin_material().then_some(&["rbd", "sk"][..])
    }

    /// Part queries for images of other scene objects the model reads.
    pub fn extra_queries(&self) -> Vec<&'static [&'static str]> {
        let mut queries: Vec<&'static [&'static str]> = vec![];

        if self.has_skin_material() && !self.has_linked_inner_textures() {
            queries.push(&["rbd", "iw"]);
        }
        if self.has_eye_material() {
            queries.push(&["rey"]);
        }
        if self.has_eyebrow_material() {
            queries.push(&["reb"]);
        }
        if self.has_eyelash_material() {
            queries.push(&["res"]);
        }
        if self.has_classic_default_material() {
            queries.push(&["bd", "iw"]);
        }
        queries
    }

    pub fn get_textures(&self, material: &Material) -> MaterialTextureBundle {
        resolve(
            material,
            &self.textures,
            &self.textures,
            &self.skin_textures,
            &self.extra_textures,
        )
    }
}
