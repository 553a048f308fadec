//! Character color destinations and per-texture channel mappings.

pub mod channels;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use channels::ColorChannelTable;

pub type Rgba = [f32; 4];

pub const GRAY: Rgba = [0.5, 0.5, 0.5, 1.0];
pub const DEFAULT_MAIN_SKIN: Rgba = [0.8, 0.42, 0.30, 1.0];
pub const DEFAULT_SUB_SKIN: Rgba = [1.0, 0.02, 0.02, 1.0];
pub const DEFAULT_HAIR_1: Rgba = [1.0, 0.49, 0.14, 1.0];
pub const DEFAULT_HAIR_2: Rgba = [1.0, 0.82, 0.67, 1.0];
pub const DEFAULT_EYE: Rgba = [0.0, 0.85, 0.85, 1.0];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color index {0}")]
    InvalidIndex(i64),
    #[error("invalid color mapping \"{0}\"")]
    InvalidMapping(String),
}

/// A user-configurable color slot in the character creator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum ColorId {
    #[default]
    Unused = 0,
    Outer1 = 1,
    Outer2 = 2,
    Base1 = 3,
    Base2 = 4,
    Inner1 = 5,
    Inner2 = 6,
    Cast1 = 7,
    Cast2 = 8,
    Cast3 = 9,
    Cast4 = 10,
    MainSkin = 11,
    SubSkin = 12,
    RightEye = 13,
    LeftEye = 14,
    Eyebrow = 15,
    Eyelash = 16,
    Hair1 = 17,
    Hair2 = 18,
}

impl ColorId {
    pub const ALL: [ColorId; 19] = [
        ColorId::Unused,
        ColorId::Outer1,
        ColorId::Outer2,
        ColorId::Base1,
        ColorId::Base2,
        ColorId::Inner1,
        ColorId::Inner2,
        ColorId::Cast1,
        ColorId::Cast2,
        ColorId::Cast3,
        ColorId::Cast4,
        ColorId::MainSkin,
        ColorId::SubSkin,
        ColorId::RightEye,
        ColorId::LeftEye,
        ColorId::Eyebrow,
        ColorId::Eyelash,
        ColorId::Hair1,
        ColorId::Hair2,
    ];

    /// Property key, display label and default color of the slot.
    pub fn channel(&self) -> Option<ColorChannel> {
        let (prop, name, default) = match self {
            ColorId::Unused => return None,
            ColorId::Outer1 => ("outer_color_1", "Outerwear 1", GRAY),
            ColorId::Outer2 => ("outer_color_2", "Outerwear 2", GRAY),
            ColorId::Base1 => ("base_color_1", "Basewear 1", GRAY),
            ColorId::Base2 => ("base_color_2", "Basewear 2", GRAY),
            ColorId::Inner1 => ("inner_color_1", "Innerwear 1", GRAY),
            ColorId::Inner2 => ("inner_color_2", "Innerwear 2", GRAY),
            ColorId::Cast1 => ("cast_color_1", "Cast 1", GRAY),
            ColorId::Cast2 => ("cast_color_2", "Cast 2", GRAY),
            ColorId::Cast3 => ("cast_color_3", "Cast 3", GRAY),
            ColorId::Cast4 => ("cast_color_4", "Cast 4", GRAY),
            ColorId::MainSkin => ("main_skin_color", "Main Skin", DEFAULT_MAIN_SKIN),
            ColorId::SubSkin => ("sub_skin_color", "Sub Skin", DEFAULT_SUB_SKIN),
            ColorId::RightEye => ("right_eye_color", "Right Eye", DEFAULT_EYE),
            ColorId::LeftEye => ("left_eye_color", "Left Eye", DEFAULT_EYE),
            ColorId::Eyebrow => ("eyebrow_color", "Eyebrow", DEFAULT_HAIR_1),
            ColorId::Eyelash => ("eyelash_color", "Eyelash", DEFAULT_HAIR_1),
            ColorId::Hair1 => ("hair_color_1", "Hair 1", DEFAULT_HAIR_1),
            ColorId::Hair2 => ("hair_color_2", "Hair 2", DEFAULT_HAIR_2),
        };
        Some(ColorChannel {
            prop,
            name,
            default,
        })
    }
}

impl TryFrom<i64> for ColorId {
    type Error = ColorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| ColorId::ALL.get(i).copied())
            .ok_or(ColorError::InvalidIndex(value))
    }
}

impl From<ColorId> for i64 {
    fn from(value: ColorId) -> Self {
        value as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorChannel {
    pub prop: &'static str,
    pub name: &'static str,
    pub default: Rgba,
}

/// Which color slot tints each channel of a mask texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMapping {
    pub red: ColorId,
    pub green: ColorId,
    pub blue: ColorId,
    pub alpha: ColorId,
}

impl ColorMapping {
    pub fn from_indices(indices: [i64; 4]) -> Result<Self, ColorError> {
        Ok(Self {
            red: ColorId::try_from(indices[0])?,
            green: ColorId::try_from(indices[1])?,
            blue: ColorId::try_from(indices[2])?,
            alpha: ColorId::try_from(indices[3])?,
        })
    }

    /// Two packed 32-bit values, each holding one channel per 16-bit half.
    pub fn from_packed(red_green: i64, blue_alpha: i64) -> Result<Self, ColorError> {
        let (red, green) = split_int32(red_green);
        let (blue, alpha) = split_int32(blue_alpha);
        Self::from_indices([red, green, blue, alpha])
    }

    pub fn used_colors(&self) -> BTreeSet<ColorId> {
        [self.red, self.green, self.blue, self.alpha]
            .into_iter()
            .filter(|c| *c != ColorId::Unused)
            .collect()
    }

    /// Parse the `r;g;b;a` column encoding.
    pub fn decode(text: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidMapping(text.to_string());

        let values = text
            .split(';')
            .map(|v| v.trim().parse::<i64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let indices: [i64; 4] = values.try_into().map_err(|_| invalid())?;
        Self::from_indices(indices)
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.red as i64, self.green as i64, self.blue as i64, self.alpha as i64
        )
    }
}

fn split_int32(value: i64) -> (i64, i64) {
    let value = value as u32;
    ((value & 0xFFFF) as i64, (value >> 16) as i64)
}
