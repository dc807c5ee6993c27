//! Transient notifications shown by the shells.

use backend::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast: title, description and styling variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Notice for a failed auth call.
    ///
    /// Credential rejections carry the backend's message under `title`.
    /// Anything else is logged and replaced with `generic`.
    pub fn from_auth_error(title: &str, err: &BackendError, generic: &str) -> Self {
        if err.is_credential() {
            Self::error(title, err.to_string())
        } else {
            tracing::error!(error = %err, "unexpected auth failure");
            Self::error("Erro", generic)
        }
    }

    /// Shown by actions that are not available yet.
    pub fn in_development() -> Self {
        Self::info("Em desenvolvimento", "Esta funcionalidade estará disponível em breve.")
    }
}
