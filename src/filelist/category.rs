use serde::Serialize;

/// Browser category of a file group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    NgsOutfit,
    NgsCastPart,
    NgsHeadPart,
    NgsBodyPaint,
    NgsMag,
    NgsOther,

    ClassicOutfit,
    ClassicCastPart,
    ClassicHeadPart,
    ClassicBodyPaint,
    ClassicMag,
    ClassicOther,

    Accessory,
    Sticker,
    Room,
    MySpace,

    NgsEnemies,
    ClassicEnemies,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 18] = [
        ItemCategory::NgsOutfit,
        ItemCategory::NgsCastPart,
        ItemCategory::NgsHeadPart,
        ItemCategory::NgsBodyPaint,
        ItemCategory::NgsMag,
        ItemCategory::NgsOther,
        ItemCategory::ClassicOutfit,
        ItemCategory::ClassicCastPart,
        ItemCategory::ClassicHeadPart,
        ItemCategory::ClassicBodyPaint,
        ItemCategory::ClassicMag,
        ItemCategory::ClassicOther,
        ItemCategory::Accessory,
        ItemCategory::Sticker,
        ItemCategory::Room,
        ItemCategory::MySpace,
        ItemCategory::NgsEnemies,
        ItemCategory::ClassicEnemies,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ItemCategory::NgsOutfit => "NGS_OUTFIT",
            ItemCategory::NgsCastPart => "NGS_CAST",
            ItemCategory::NgsHeadPart => "NGS_HEAD",
            ItemCategory::NgsBodyPaint => "NGS_PAINT",
            ItemCategory::NgsMag => "NGS_MAG",
            ItemCategory::NgsOther => "NGS_OTHER",
            ItemCategory::ClassicOutfit => "CLASSIC_OUTFIT",
            ItemCategory::ClassicCastPart => "CLASSIC_CAST",
            ItemCategory::ClassicHeadPart => "CLASSIC_HEAD",
            ItemCategory::ClassicBodyPaint => "CLASSIC_PAINT",
            ItemCategory::ClassicMag => "CLASSIC_MAG",
            ItemCategory::ClassicOther => "CLASSIC_OTHER",
            ItemCategory::Accessory => "ACCESSORY",
            ItemCategory::Sticker => "STICKER",
            ItemCategory::Room => "ROOM",
            ItemCategory::MySpace => "MY_SPACE",
            ItemCategory::NgsEnemies => "NGS_ENEMY",
            ItemCategory::ClassicEnemies => "CLASSIC_ENEMY",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ItemCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::NgsOutfit => "Outfit (NGS)",
            ItemCategory::NgsCastPart => "Cast Part (NGS)",
            ItemCategory::NgsHeadPart => "Head Part (NGS)",
            ItemCategory::NgsBodyPaint => "Body Paint (NGS)",
            ItemCategory::NgsMag => "Mag (NGS)",
            ItemCategory::NgsOther => "Other (NGS)",
            ItemCategory::ClassicOutfit => "Outfit (Classic)",
            ItemCategory::ClassicCastPart => "Cast Part (Classic)",
            ItemCategory::ClassicHeadPart => "Head Part (Classic)",
            ItemCategory::ClassicBodyPaint => "Body Paint (Classic)",
            ItemCategory::ClassicMag => "Mag (Classic)",
            ItemCategory::ClassicOther => "Other (Classic)",
            ItemCategory::Accessory => "Accessory",
            ItemCategory::Sticker => "Sticker",
            ItemCategory::Room => "Room (Classic)",
            ItemCategory::MySpace => "My Space (NGS)",
            ItemCategory::NgsEnemies => "Enemy (NGS)",
            ItemCategory::ClassicEnemies => "Enemy (Classic)",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        for category in ItemCategory::ALL {
            assert_eq!(ItemCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(ItemCategory::from_code("ngs_paint"), Some(ItemCategory::NgsBodyPaint));
        assert_eq!(ItemCategory::from_code("MOTION"), None);
        assert_eq!(ItemCategory::MySpace.to_string(), "My Space (NGS)");
    }
}
