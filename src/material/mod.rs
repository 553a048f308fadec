//! Material identity, shading parameters and texture resolution.

pub mod canonical;
pub mod model;
pub mod name;
pub mod shader;
pub mod textures;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use canonical::{resolve, CanonicalTexture, TextureFamily};
pub use model::ModelMaterials;
pub use name::{find_best_match, BlendType, FormatError, HasIdentity, MaterialIdentity};
pub use shader::{BlendMethod, RenderSettings, ShaderFamily};
pub use textures::{texture_colorspace, Colorspace, MaterialTextureBundle, TexturePool, TextureSet};

/// One material of an exported model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(flatten)]
    pub identity: MaterialIdentity,

    /// Declared texture file names, in shader slot order.
    #[serde(default)]
    pub textures: Vec<String>,
    /// UV set used by each entry of `textures`.
    #[serde(default)]
    pub tex_uv_sets: Vec<i32>,

    #[serde(default)]
    pub diffuse_rgba: [f32; 4],
    #[serde(default)]
    pub unk_rgba_0: [f32; 4],
    #[serde(default)]
    pub specular_rgba: [f32; 4],
    #[serde(default)]
    pub unk_rgba_1: [f32; 4],
    #[serde(default)]
    pub spec_level: f32,
    #[serde(default)]
    pub unk_float_0: f32,
    #[serde(default)]
    pub unk_float_1: f32,
    #[serde(default)]
    pub unk_int_0: i32,
    #[serde(default)]
    pub unk_int_1: i32,
    #[serde(default)]
    pub src_alpha: i32,
    #[serde(default)]
    pub dest_alpha: i32,
}

impl Material {
    pub fn shader_family(&self) -> ShaderFamily {
        ShaderFamily::from_identity(&self.identity)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings::from_identity(&self.identity)
    }

    /// Encoded name used in the interchange file.
    pub fn fbx_name(&self) -> String {
        self.identity.encode()
    }
}

impl HasIdentity for Material {
    fn identity(&self) -> &MaterialIdentity {
        &self.identity
    }
}

/// Material list sidecar written next to an exported model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AqpInfo {
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl AqpInfo {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let info = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(info)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Material whose identity matches a material name from the interchange file.
    pub fn get_fbx_material(&self, name: &str) -> Option<&Material> {
        find_best_match(name, &self.materials)
    }
}
