use crate::config::Locale;

/// User-facing messages that are returned in the configured locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    MissingCredentials,
    AccountExists,
    ServerError,
    InvalidCredentials,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Message::MissingCredentials, Locale::En) => "Email and password are required",
            (Message::MissingCredentials, Locale::Fr) => "Email et mot de passe requis",
            (Message::AccountExists, Locale::En) => "An account already exists with this email",
            (Message::AccountExists, Locale::Fr) => "Un compte existe déjà avec cet email",
            (Message::ServerError, Locale::En) => "Server error",
            (Message::ServerError, Locale::Fr) => "Erreur serveur",
            (Message::InvalidCredentials, Locale::En) => "Invalid email or password",
            (Message::InvalidCredentials, Locale::Fr) => "Email ou mot de passe incorrect",
        }
    }
}
