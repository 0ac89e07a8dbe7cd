use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SafarError;

/// Response language requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Fixed strings a caller shows in place of model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMessage {
    ChatWelcome,
    /// Shown as an errored bubble when the assistant is unreachable.
    ChatError,
    /// Shown when the assistant answered with no text.
    ChatOffline,
    ItineraryFailed,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn fallback(self, message: FallbackMessage) -> &'static str {
        use FallbackMessage::*;
        match (self, message) {
            (Language::En, ChatWelcome) => {
                "Hello! I'm Safar, your AI travel assistant. Where are you dreaming of going next?"
            }
            (Language::En, ChatError) => {
                "Sorry, I encountered a temporary error connecting to the AI service."
            }
            (Language::En, ChatOffline) => "I couldn't generate a response. Please try again.",
            (Language::En, ItineraryFailed) => {
                "Failed to generate itinerary. Please check your connection and API limits."
            }
            (Language::Ar, ChatWelcome) => {
                "أهلاً! أنا سفر، مساعدك السياحي الذكي. ما هي وجهتك القادمة؟"
            }
            (Language::Ar, ChatError) => {
                "عذراً، واجهت خطأ مؤقتاً في الاتصال بخدمة الذكاء الاصطناعي."
            }
            (Language::Ar, ChatOffline) => "لم أتمكن من إنشاء رد. يرجى المحاولة مرة أخرى.",
            (Language::Ar, ItineraryFailed) => {
                "تعذر إنشاء مسار الرحلة. يرجى التحقق من الاتصال وحدود الاستخدام."
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SafarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            other => Err(SafarError::InvalidRequest(format!(
                "unsupported language `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("AR".parse::<Language>().unwrap(), Language::Ar);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn only_arabic_is_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn fallbacks_differ_per_language() {
        for message in [
            FallbackMessage::ChatWelcome,
            FallbackMessage::ChatError,
            FallbackMessage::ChatOffline,
            FallbackMessage::ItineraryFailed,
        ] {
            assert_ne!(
                Language::En.fallback(message),
                Language::Ar.fallback(message)
            );
        }
    }
}
