use serde::{Deserialize, Serialize};

/// Interface languages offered by the region switcher. Selecting one does not translate content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
}

impl Language {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::English,
            Self::Hindi,
            Self::Tamil,
            Self::Gujarati,
            Self::Telugu,
            Self::Bengali,
            Self::Marathi,
            Self::Kannada,
            Self::Malayalam,
            Self::Punjabi,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Tamil => "ta",
            Self::Gujarati => "gu",
            Self::Telugu => "te",
            Self::Bengali => "bn",
            Self::Marathi => "mr",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
        }
    }

    /// Name of the language written in its own script.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी",
            Self::Tamil => "தமிழ்",
            Self::Gujarati => "ગુજરાતી",
            Self::Telugu => "తెలుగు",
            Self::Bengali => "বাংলা",
            Self::Marathi => "मराठी",
            Self::Kannada => "ಕನ್ನಡ",
            Self::Malayalam => "മലയാളം",
            Self::Punjabi => "ਪੰਜਾਬੀ",
        }
    }

    pub const fn region_label(self) -> &'static str {
        match self {
            Self::English => "India",
            Self::Hindi | Self::Marathi => "भारत",
            Self::Tamil => "இந்தியா",
            Self::Gujarati => "ભારત",
            Self::Telugu => "భారతదేశం",
            Self::Bengali => "ভারত",
            Self::Kannada => "ಭಾರತ",
            Self::Malayalam => "ഇന്ത്യ",
            Self::Punjabi => "ਭਾਰਤ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ordered()
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code))
    }

    pub fn view(self) -> LanguageView {
        LanguageView {
            code: self.code(),
            name: self.native_name(),
            region: self.region_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub code: &'static str,
    pub name: &'static str,
    pub region: &'static str,
}
