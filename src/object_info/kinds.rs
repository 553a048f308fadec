use serde::Serialize;

/// First token of a game file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCategory {
    Effect,
    Enemy,
    Mag,
    Object,
    Player,
    Weapon,
    Ui,
}

impl ObjectCategory {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "eff" => Some(ObjectCategory::Effect),
            "en" => Some(ObjectCategory::Enemy),
            "mg" => Some(ObjectCategory::Mag),
            "ob" => Some(ObjectCategory::Object),
            "pl" => Some(ObjectCategory::Player),
            "wp" => Some(ObjectCategory::Weapon),
            "ui" => Some(ObjectCategory::Ui),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ObjectCategory::Effect => "eff",
            ObjectCategory::Enemy => "en",
            ObjectCategory::Mag => "mg",
            ObjectCategory::Object => "ob",
            ObjectCategory::Player => "pl",
            ObjectCategory::Weapon => "wp",
            ObjectCategory::Ui => "ui",
        }
    }
}

/// Player object type. NGS types carry an `r` prefix; the bare `r` marks
/// NGS weapons and mags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Accessory,
    Body,
    BodyPaint,
    Ear,
    Eye,
    Eyebrow,
    Eyelashes,
    Hair,
    Head,
    FacePaint,
    Sticker,

    Ngs,
    NgsAccessory,
    NgsBody,
    NgsBodyPaint,
    NgsEar,
    NgsEye,
    NgsEyebrow,
    NgsEyelashes,
    NgsFacePaint,
    NgsHair,
    NgsHead,
    NgsHorn,
    NgsTeeth,
}

impl ObjectType {
    pub fn from_code(code: &str) -> Option<Self> {
        let t = match code {
            "ah" => ObjectType::Accessory,
            "bd" => ObjectType::Body,
            "ba" => ObjectType::BodyPaint,
            "ea" => ObjectType::Ear,
            "ey" => ObjectType::Eye,
            "eb" => ObjectType::Eyebrow,
            "es" => ObjectType::Eyelashes,
            "hr" => ObjectType::Hair,
            "hd" => ObjectType::Head,
            "hs" => ObjectType::FacePaint,
            "bp" => ObjectType::Sticker,
            "r" => ObjectType::Ngs,
            "rah" => ObjectType::NgsAccessory,
            "rbd" => ObjectType::NgsBody,
            "rba" => ObjectType::NgsBodyPaint,
            "rea" => ObjectType::NgsEar,
            "rey" => ObjectType::NgsEye,
            "reb" => ObjectType::NgsEyebrow,
            "res" => ObjectType::NgsEyelashes,
            "rfp" => ObjectType::NgsFacePaint,
            "rhr" => ObjectType::NgsHair,
            "rhd" => ObjectType::NgsHead,
            "rhn" => ObjectType::NgsHorn,
            "rdt" => ObjectType::NgsTeeth,
            _ => return None,
        };
        Some(t)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ObjectType::Accessory => "ah",
            ObjectType::Body => "bd",
            ObjectType::BodyPaint => "ba",
            ObjectType::Ear => "ea",
            ObjectType::Eye => "ey",
            ObjectType::Eyebrow => "eb",
            ObjectType::Eyelashes => "es",
            ObjectType::Hair => "hr",
            ObjectType::Head => "hd",
            ObjectType::FacePaint => "hs",
            ObjectType::Sticker => "bp",
            ObjectType::Ngs => "r",
            ObjectType::NgsAccessory => "rah",
            ObjectType::NgsBody => "rbd",
            ObjectType::NgsBodyPaint => "rba",
            ObjectType::NgsEar => "rea",
            ObjectType::NgsEye => "rey",
            ObjectType::NgsEyebrow => "reb",
            ObjectType::NgsEyelashes => "res",
            ObjectType::NgsFacePaint => "rfp",
            ObjectType::NgsHair => "rhr",
            ObjectType::NgsHead => "rhd",
            ObjectType::NgsHorn => "rhn",
            ObjectType::NgsTeeth => "rdt",
        }
    }

    pub fn is_ngs(&self) -> bool {
        self.code().starts_with('r')
    }
}

/// Body region / gender suffix of a player model.
///
/// Classic parts are two tokens (`fl_bw`), NGS parts are one (`bw`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPart {
    FemaleAny,
    FemaleBasewear,
    FemaleInnerwear,
    FemaleOuterwear,
    FemaleCostume,
    FemaleFace,
    UnknownFd,
    MaleAny,
    MaleBasewear,
    MaleInnerwear,
    MaleOuterwear,
    MaleCostume,
    MaleFace,
    UnknownMa,
    UnknownMd,
    FemaleCastAny,
    FemaleCastArms,
    FemaleCastBody,
    FemaleCastLegs,
    FemaleCastHead,
    MaleCastAny,
    MaleCastArms,
    MaleCastBody,
    MaleCastLegs,
    MaleCastHead,
    UnknownUu,

    NgsSkin,
    NgsBasewear,
    NgsInnerwear,
    NgsOuterwear,
    NgsCastArms,
    NgsCastBody,
    NgsCastLegs,
}

impl ModelPart {
    pub fn from_code(code: &str) -> Option<Self> {
        let p = match code {
            "fm_xx" => ModelPart::FemaleAny,
            "fl_bw" => ModelPart::FemaleBasewear,
            "fl_iw" => ModelPart::FemaleInnerwear,
            "fl_ow" => ModelPart::FemaleOuterwear,
            "fu_xx" => ModelPart::FemaleCostume,
            "fm_nh" => ModelPart::FemaleFace,
            "fd_xx" => ModelPart::UnknownFd,
            "ml_xx" => ModelPart::MaleAny,
            "ml_bw" => ModelPart::MaleBasewear,
            "ml_iw" => ModelPart::MaleInnerwear,
            "ml_ow" => ModelPart::MaleOuterwear,
            "mu_xx" => ModelPart::MaleCostume,
            "mh_nh" => ModelPart::MaleFace,
            "ma_xx" => ModelPart::UnknownMa,
            "md_xx" => ModelPart::UnknownMd,
            "fc_xx" => ModelPart::FemaleCastAny,
            "fc_rm" => ModelPart::FemaleCastArms,
            "fc_tr" => ModelPart::FemaleCastBody,
            "fc_lg" => ModelPart::FemaleCastLegs,
            "fc_nh" => ModelPart::FemaleCastHead,
            "mc_xx" => ModelPart::MaleCastAny,
            "mc_rm" => ModelPart::MaleCastArms,
            "mc_tr" => ModelPart::MaleCastBody,
            "mc_lg" => ModelPart::MaleCastLegs,
            "mc_nh" => ModelPart::MaleCastHead,
            "uu_xx" => ModelPart::UnknownUu,
            "sk" => ModelPart::NgsSkin,
            "bw" => ModelPart::NgsBasewear,
            "iw" => ModelPart::NgsInnerwear,
            "ow" => ModelPart::NgsOuterwear,
            "rm" => ModelPart::NgsCastArms,
            "bd" => ModelPart::NgsCastBody,
            "lg" => ModelPart::NgsCastLegs,
            _ => return None,
        };
        Some(p)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ModelPart::FemaleAny => "fm_xx",
            ModelPart::FemaleBasewear => "fl_bw",
            ModelPart::FemaleInnerwear => "fl_iw",
            ModelPart::FemaleOuterwear => "fl_ow",
            ModelPart::FemaleCostume => "fu_xx",
            ModelPart::FemaleFace => "fm_nh",
            ModelPart::UnknownFd => "fd_xx",
            ModelPart::MaleAny => "ml_xx",
            ModelPart::MaleBasewear => "ml_bw",
            ModelPart::MaleInnerwear => "ml_iw",
            ModelPart::MaleOuterwear => "ml_ow",
            ModelPart::MaleCostume => "mu_xx",
            ModelPart::MaleFace => "mh_nh",
            ModelPart::UnknownMa => "ma_xx",
            ModelPart::UnknownMd => "md_xx",
            ModelPart::FemaleCastAny => "fc_xx",
            ModelPart::FemaleCastArms => "fc_rm",
            ModelPart::FemaleCastBody => "fc_tr",
            ModelPart::FemaleCastLegs => "fc_lg",
            ModelPart::FemaleCastHead => "fc_nh",
            ModelPart::MaleCastAny => "mc_xx",
            ModelPart::MaleCastArms => "mc_rm",
            ModelPart::MaleCastBody => "mc_tr",
            ModelPart::MaleCastLegs => "mc_lg",
            ModelPart::MaleCastHead => "mc_nh",
            ModelPart::UnknownUu => "uu_xx",
            ModelPart::NgsSkin => "sk",
            ModelPart::NgsBasewear => "bw",
            ModelPart::NgsInnerwear => "iw",
            ModelPart::NgsOuterwear => "ow",
            ModelPart::NgsCastArms => "rm",
            ModelPart::NgsCastBody => "bd",
            ModelPart::NgsCastLegs => "lg",
        }
    }

    pub fn is_basewear(&self) -> bool {
        matches!(
            self,
            ModelPart::NgsBasewear | ModelPart::MaleBasewear | ModelPart::FemaleBasewear
        )
    }

    pub fn is_outerwear(&self) -> bool {
        matches!(
            self,
            ModelPart::NgsOuterwear | ModelPart::MaleOuterwear | ModelPart::FemaleOuterwear
        )
    }

    pub fn is_innerwear(&self) -> bool {
        matches!(
            self,
            ModelPart::NgsInnerwear | ModelPart::MaleInnerwear | ModelPart::FemaleInnerwear
        )
    }

    pub fn is_cast_arms(&self) -> bool {
        matches!(
            self,
            ModelPart::FemaleCastArms | ModelPart::MaleCastArms | ModelPart::NgsCastArms
        )
    }

    pub fn is_cast_body(&self) -> bool {
        matches!(
            self,
            ModelPart::FemaleCastBody | ModelPart::MaleCastBody | ModelPart::NgsCastBody
        )
    }

    pub fn is_cast_legs(&self) -> bool {
        matches!(
            self,
            ModelPart::FemaleCastLegs | ModelPart::MaleCastLegs | ModelPart::NgsCastLegs
        )
    }

    pub fn is_cast(&self) -> bool {
        self.is_cast_arms()
            || self.is_cast_body()
            || self.is_cast_legs()
            || matches!(self, ModelPart::FemaleCastAny | ModelPart::MaleCastAny)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelPart::FemaleBasewear => "Female Basewear",
            ModelPart::FemaleInnerwear => "Female Innerwear",
            ModelPart::FemaleOuterwear => "Female Outerwear",
            ModelPart::FemaleCostume => "Female Costume",
            ModelPart::FemaleFace => "Female Face",
            ModelPart::MaleBasewear => "Male Basewear",
            ModelPart::MaleInnerwear => "Male Innerwear",
            ModelPart::MaleOuterwear => "Male Outerwear",
            ModelPart::MaleCostume => "Male Costume",
            ModelPart::MaleFace => "Male Face",
            ModelPart::FemaleCastArms => "Female Cast Arms",
            ModelPart::FemaleCastBody => "Female Cast Body",
            ModelPart::FemaleCastLegs => "Female Cast Legs",
            ModelPart::FemaleCastHead => "Female Cast Head",
            ModelPart::MaleCastArms => "Male Cast Arms",
            ModelPart::MaleCastBody => "Male Cast Body",
            ModelPart::MaleCastLegs => "Male Cast Legs",
            ModelPart::MaleCastHead => "Male Cast Head",
            ModelPart::NgsSkin => "Skin (NGS)",
            ModelPart::NgsBasewear => "Basewear (NGS)",
            ModelPart::NgsInnerwear => "Innerwear (NGS)",
            ModelPart::NgsOuterwear => "Outerwear (NGS)",
            ModelPart::NgsCastArms => "Cast Arms (NGS)",
            ModelPart::NgsCastBody => "Cast Body (NGS)",
            ModelPart::NgsCastLegs => "Cast Legs (NGS)",
            _ => "",
        }
    }
}

/// Single-letter texture role suffix (`_d`, `_n`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureRole {
    Alpha,
    Diffuse,
    Layer,
    Mask,
    Normal,
    Multi,
    Env,
    UnknownC,
    UnknownG,
    UnknownK,
    UnknownO,
    UnknownP,
}

impl TextureRole {
    pub fn from_code(code: &str) -> Option<Self> {
        let r = match code {
            "a" => TextureRole::Alpha,
            "d" => TextureRole::Diffuse,
            "l" => TextureRole::Layer,
            "m" => TextureRole::Mask,
            "n" => TextureRole::Normal,
            "s" => TextureRole::Multi,
            "v" => TextureRole::Env,
            "c" => TextureRole::UnknownC,
            "g" => TextureRole::UnknownG,
            "k" => TextureRole::UnknownK,
            "o" => TextureRole::UnknownO,
            "p" => TextureRole::UnknownP,
            _ => return None,
        };
        Some(r)
    }

    pub fn code(&self) -> &'static str {
        match self {
            TextureRole::Alpha => "a",
            TextureRole::Diffuse => "d",
            TextureRole::Layer => "l",
            TextureRole::Mask => "m",
            TextureRole::Normal => "n",
            TextureRole::Multi => "s",
            TextureRole::Env => "v",
            TextureRole::UnknownC => "c",
            TextureRole::UnknownG => "g",
            TextureRole::UnknownK => "k",
            TextureRole::UnknownO => "o",
            TextureRole::UnknownP => "p",
        }
    }
}
