//! Supported languages and the localized strings the gateway synthesizes
//! itself (welcome turns, chat fallbacks, default advice prompts). All other
//! UI text lives with the host application.

use std::fmt;
use std::str::FromStr;

use crate::client::GatewayError;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Es,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Ru];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ru => "ru",
        }
    }

    /// English name of the language, used to pin the provider's output
    /// language inside persona instructions.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Ru => "Russian",
        }
    }

    /// Prompt substituted when an advice request carries an image but no text.
    pub fn default_advice_prompt(&self) -> &'static str {
        match self {
            Language::En => "Suggest a modern haircut",
            Language::Es => "Sugiere un corte moderno",
            Language::Ru => "Предложите современную стрижку",
        }
    }

    /// The synthesized opening turn of a chat session.
    pub fn chat_welcome(&self) -> &'static str {
        match self {
            Language::En => "Hello! How can I help you today at The G-Burg Cut?",
            Language::Es => "¡Hola! ¿En qué puedo ayudarte hoy en The G-Burg Cut?",
            Language::Ru => "Привет! Чем я могу помочь вам сегодня в The G-Burg Cut?",
        }
    }

    /// Canned reply appended when a chat turn fails; chat never surfaces
    /// hard errors.
    pub fn chat_fallback(&self) -> &'static str {
        match self {
            Language::En => "Sorry, something went wrong. Try again.",
            Language::Es => "Lo siento, algo salió mal. Inténtalo de nuevo.",
            Language::Ru => "Извините, произошла ошибка. Попробуйте еще раз.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == s)
            .ok_or_else(|| GatewayError::InvalidInput(format!("unsupported language: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn unsupported_code_is_rejected() {
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn english_is_the_default() {
        assert_eq!(Language::default(), Language::En);
    }
}
