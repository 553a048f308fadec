// Material sidecar to resolved texture slots, the way an importer drives it

use pso2_tools_lib::material::{
    find_best_match, AqpInfo, BlendType, MaterialIdentity, MaterialTextureBundle, ModelMaterials,
    ShaderFamily, TexturePool,
};

#[path = "common/mod.rs"]
mod common;

const SIDECAR: &str = r#"{
    "materials": [
        {
            "shaders": ["1100p", "1100"],
            "blend_type": "opaque",
            "special_type": "rbd",
            "name": "pl_body_base",
            "textures": ["pl_body_base_diffuse.dds", "pl_body_base_normal.dds", "pl_body_base_mask.dds"]
        },
        {
            "shaders": ["1102p", "1102"],
            "blend_type": "opaque",
            "special_type": "rbd_sk",
            "name": "pl_body_skin",
            "two_sided": 1,
            "textures": ["pl_body_skin_diffuse.dds", "pl_body_inner_diffuse.dds", "mystery.dds"]
        },
        {
            "shaders": ["1104p", "1104"],
            "blend_type": "blendalpha",
            "special_type": "rey",
            "name": "pl_eye",
            "textures": ["pl_eye_diffuse.dds"]
        }
    ]
}"#;

fn model() -> ModelMaterials {
    let info = AqpInfo::from_json(SIDECAR).unwrap();
    let mut model = ModelMaterials::new(
        info.materials,
        TexturePool::new([
            "pl_rbd_100010_bw_d.dds",
            "pl_rbd_100010_bw_n.dds",
            "pl_rbd_100010_iw_d.dds",
        ]),
    );
    model.skin_textures = TexturePool::new(["pl_rbd_100000_sk_d_1.dds", "pl_rbd_100000_sk_d_0.dds"]);
    model.extra_textures = TexturePool::new(["pl_rey_100000_d.dds"]);
    model
}

#[test]
fn sidecar_materials_resolve() {
    let model = model();
    let info = AqpInfo::from_json(SIDECAR).unwrap();

    // Names come back from the host editor with a duplicate suffix.
    let base = info
        .get_fbx_material("(1100p,1100){opaque}[rbd]pl_body_base@0@0.001")
        .unwrap();
    let bundle = model.get_textures(base);
    assert_eq!(bundle.default.diffuse.as_deref(), Some("pl_rbd_100010_bw_d.dds"));
    assert_eq!(bundle.default.normal.as_deref(), Some("pl_rbd_100010_bw_n.dds"));
    assert_eq!(bundle.default.mask, None);

    let skin = &model.materials[1];
    assert_eq!(skin.shader_family(), ShaderFamily::NgsSkin);
    let bundle = model.get_textures(skin);
    assert_eq!(bundle.skin_0.diffuse.as_deref(), Some("pl_rbd_100000_sk_d_0.dds"));
    assert_eq!(bundle.skin_1.diffuse.as_deref(), Some("pl_rbd_100000_sk_d_1.dds"));
    assert_eq!(bundle.inner.diffuse.as_deref(), Some("pl_rbd_100010_iw_d.dds"));
    assert!(bundle.default.is_empty());

    let eye = &model.materials[2];
    assert_eq!(eye.identity.blend_type, BlendType::BlendAlpha);
    let bundle = model.get_textures(eye);
    assert_eq!(bundle.default.diffuse.as_deref(), Some("pl_rey_100000_d.dds"));
}

#[test]
fn extra_images_follow_material_families() {
    let model = model();
    assert!(model.has_linked_inner_textures());
    assert_eq!(model.skin_query(), Some(&["rbd", "sk"][..]));
    assert_eq!(model.extra_queries(), vec![&["rey"][..]]);
}

#[test]
fn empty_pools_leave_every_slot_empty() {
    let model = ModelMaterials::new(
        vec![common::material(
            "(1100p,1100){opaque}[rbd]pl_body_base@0@0",
            &["pl_body_base_diffuse.dds", "pl_body_skin_diffuse.dds"],
        )],
        TexturePool::default(),
    );

    let bundle = model.get_textures(&model.materials[0]);
    assert_eq!(bundle, MaterialTextureBundle::default());
}

#[test]
fn encoded_names_round_trip() {
    let names = [
        "(1100p,1100){opaque}[rbd_sk]pl_body_base@1@0",
        "(0100p,0100){blendalpha}pl_hair@0@128",
        "(1103p,1103){hollow}[rhr]pl_hair_ngs@2@64",
        "(2000p){add}fx@0@0",
    ];

    for name in names {
        let identity = MaterialIdentity::decode(name).unwrap();
        assert_eq!(identity.encode(), name);
        assert_eq!(MaterialIdentity::decode(&identity.encode()).unwrap(), identity);
    }

    // Missing suffixes default to zero and are written back out.
    let short = MaterialIdentity::decode("(1100p,1100){opaque}pl_body_base").unwrap();
    assert_eq!(short.encode(), "(1100p,1100){opaque}pl_body_base@0@0");
}

#[test]
fn best_match_prefers_strict() {
    let candidates = [
        MaterialIdentity::decode("(1100p,1100){opaque}[rbd]pl_body_base@1@0").unwrap(),
        MaterialIdentity::decode("(1100p,1100){opaque}[rbd]pl_body_base@0@0").unwrap(),
    ];

    let strict = find_best_match("(1100p,1100){opaque}[rbd]PL_BODY_BASE@0@0", &candidates);
    assert_eq!(strict, Some(&candidates[1]));

    let loose = find_best_match("(1100p,1100){opaque}[rbd]pl_body_base@2@9", &candidates);
    assert_eq!(loose, Some(&candidates[0]));

    for a in &candidates {
        for b in &candidates {
            if a.is_strict_match(b) {
                assert!(a.is_loose_match(b));
            }
            assert_eq!(a.is_loose_match(b), b.is_loose_match(a));
        }
    }

    assert_eq!(find_best_match("not a material", &candidates), None);
}
