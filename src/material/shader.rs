use serde::Serialize;

use super::name::MaterialIdentity;

/// Shader family, selected by the vertex shader id (second shader name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderFamily {
    Classic,
    NgsDefault,
    NgsHornTeeth,
    NgsSkin,
    NgsHair,
    NgsEye,
    NgsEyeTear,
    NgsEyelash,
    NgsEyebrow,
    NgsEar,
}

impl ShaderFamily {
    pub fn from_identity(identity: &MaterialIdentity) -> Self {
        let id = identity
            .shaders
            .get(1)
            .and_then(|s| s.parse::<u32>().ok());

        match id {
            Some(id) if id < 1000 => ShaderFamily::Classic,
            Some(1101) => ShaderFamily::NgsHornTeeth,
            Some(1102) => ShaderFamily::NgsSkin,
            Some(1103) => ShaderFamily::NgsHair,
            Some(1104) => ShaderFamily::NgsEye,
            Some(1105) => ShaderFamily::NgsEyeTear,
            Some(1107) => ShaderFamily::NgsEyelash,
            Some(1108) => ShaderFamily::NgsEyebrow,
            Some(1109) => ShaderFamily::NgsEar,
            _ => ShaderFamily::NgsDefault,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum BlendMethod {
    Opaque,
    Blend,
    Clip { threshold: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSettings {
    pub blend_method: BlendMethod,
    pub backface_culling: bool,
    pub show_transparent_back: bool,
}

impl RenderSettings {
    pub fn from_identity(identity: &MaterialIdentity) -> Self {
        let blend_method = if identity.blend_type.uses_alpha() {
            if identity.alpha_cutoff > 0 {
                BlendMethod::Clip {
                    threshold: identity.alpha_cutoff as f32 / 256.0,
                }
            } else {
                BlendMethod::Blend
            }
        } else {
            BlendMethod::Opaque
        };

        // 2 fixes z-fighting on opaque meshes but hides parts of alpha ones.
        let backface_culling = match identity.two_sided {
            0 => true,
            1 => false,
            _ => blend_method == BlendMethod::Opaque,
        };

        Self {
            blend_method,
            backface_culling,
            show_transparent_back: blend_method != BlendMethod::Blend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(text: &str) -> MaterialIdentity {
        MaterialIdentity::decode(text).unwrap()
    }

    #[test]
    fn family_from_vertex_shader() {
        assert_eq!(
            ShaderFamily::from_identity(&identity("(1102p,1102){opaque}skin@0@0")),
            ShaderFamily::NgsSkin
        );
        assert_eq!(
            ShaderFamily::from_identity(&identity("(0100p,0100){opaque}old@0@0")),
            ShaderFamily::Classic
        );
        assert_eq!(
            ShaderFamily::from_identity(&identity("(1110p,1110){opaque}x@0@0")),
            ShaderFamily::NgsDefault
        );
        assert_eq!(
            ShaderFamily::from_identity(&identity("(single){opaque}x@0@0")),
            ShaderFamily::NgsDefault
        );
    }

    #[test]
    fn render_settings() {
        let clip = RenderSettings::from_identity(&identity("(1103p,1103){hollow}hair@2@128"));
        assert_eq!(clip.blend_method, BlendMethod::Clip { threshold: 0.5 });
        assert!(!clip.backface_culling);

        let blend = RenderSettings::from_identity(&identity("(1103p,1103){blendalpha}hair@0@0"));
        assert_eq!(blend.blend_method, BlendMethod::Blend);
        assert!(blend.backface_culling);
        assert!(!blend.show_transparent_back);

        let opaque = RenderSettings::from_identity(&identity("(1100p,1100){opaque}body@2@0"));
        assert_eq!(opaque.blend_method, BlendMethod::Opaque);
        assert!(opaque.backface_culling);

        let two_sided = RenderSettings::from_identity(&identity("(1100p,1100){opaque}body@1@0"));
        assert!(!two_sided.backface_culling);
    }
}
