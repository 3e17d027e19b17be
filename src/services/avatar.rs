// src/services/avatar.rs

//! Avatar URL resolution.
//!
//! A member shows a gravatar only when avatars are allowed both globally and
//! by the member; everyone else gets the fallback image.

use sha2::{Digest, Sha256};
use url::form_urlencoded;

use crate::models::{AvatarConfig, Grade, MemberName};
use crate::services::normalize::to_boolean;

/// Background and font colors of a generated placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarColors {
    pub background: &'static str,
    pub font: &'static str,
}

const STUDENT_MEMBER_COLORS: AvatarColors = AvatarColors {
    background: "000050",
    font: "FFFFFF",
};
const GRADUATE_STUDENT_MEMBER_COLORS: AvatarColors = AvatarColors {
    background: "000050",
    font: "FFFFFF",
};
const DEFAULT_COLORS: AvatarColors = AvatarColors {
    background: "000050",
    font: "FFFFFF",
};

/// Placeholder colors for a grade.
pub fn avatar_colors(grade: Grade) -> AvatarColors {
    match grade {
        Grade::StudentMember => STUDENT_MEMBER_COLORS,
        Grade::GraduateStudentMember => GRADUATE_STUDENT_MEMBER_COLORS,
        Grade::Other => DEFAULT_COLORS,
    }
}

/// Image used when a gravatar is not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackAvatar {
    /// Placeholder generated from the member name, served from this base URL
    Generated { base_url: String },
    /// The same static image for everyone
    Static(String),
}

/// Resolves the avatar URL of each member.
#[derive(Debug, Clone)]
pub struct AvatarResolver {
    allow_global: bool,
    gravatar_url: String,
    fallback: FallbackAvatar,
    hash_email: bool,
}

impl AvatarResolver {
    pub fn new(
        allow_global: bool,
        gravatar_url: impl Into<String>,
        fallback: FallbackAvatar,
        hash_email: bool,
    ) -> Self {
        Self {
            allow_global,
            gravatar_url: gravatar_url.into(),
            fallback,
            hash_email,
        }
    }

    /// Build a resolver from the `[avatar]` configuration section.
    pub fn from_config(config: &AvatarConfig) -> Self {
        let fallback = match &config.fallback_url {
            Some(url) => FallbackAvatar::Static(url.clone()),
            None => FallbackAvatar::Generated {
                base_url: config.placeholder_url.clone(),
            },
        };
        Self::new(
            to_boolean(config.allow_global.as_deref()),
            config.gravatar_url.clone(),
            fallback,
            config.hash_email,
        )
    }

    pub fn allow_global(&self) -> bool {
        self.allow_global
    }

    /// Resolve the avatar for one member.
    pub fn resolve(&self, allow_user: bool, email: &str, name: &MemberName, grade: Grade) -> String {
        if !self.allow_global || !allow_user {
            return self.fallback(name, grade);
        }
        self.gravatar(email)
    }

    /// Gravatar URL for an email.
    ///
    /// The email is appended verbatim unless `hash_email` is set, in which
    /// case the trimmed, lower-cased address is SHA-256 hashed first.
    pub fn gravatar(&self, email: &str) -> String {
        if self.hash_email {
            let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
            format!("{}{}", self.gravatar_url, hex::encode(digest))
        } else {
            format!("{}{}", self.gravatar_url, email)
        }
    }

    pub fn fallback(&self, name: &MemberName, grade: Grade) -> String {
        match &self.fallback {
            FallbackAvatar::Static(url) => url.clone(),
            FallbackAvatar::Generated { base_url } => placeholder_url(base_url, name, grade),
        }
    }
}

/// Generated placeholder showing the member's initials.
pub fn placeholder_url(base_url: &str, name: &MemberName, grade: Grade) -> String {
    let colors = avatar_colors(grade);
    format!(
        "{}?background={}&color={}&name={}+{}&size=128",
        base_url,
        colors.background,
        colors.font,
        encode(&name.first),
        encode(&name.last)
    )
}

fn encode(part: &str) -> String {
    form_urlencoded::byte_serialize(part.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVATAR: &str = "https://www.gravatar.com/avatar/";
    const PLACEHOLDER: &str = "https://eu.ui-avatars.com/api/";

    fn alice() -> MemberName {
        MemberName {
            first: "Alice".to_string(),
            last: "Smith".to_string(),
            ..MemberName::default()
        }
    }

    fn generated(allow_global: bool) -> AvatarResolver {
        AvatarResolver::new(
            allow_global,
            GRAVATAR,
            FallbackAvatar::Generated {
                base_url: PLACEHOLDER.to_string(),
            },
            false,
        )
    }

    #[test]
    fn global_off_always_falls_back() {
        let resolver = generated(false);
        let expected = "https://eu.ui-avatars.com/api/?background=000050&color=FFFFFF&name=Alice+Smith&size=128";
        for allow_user in [true, false] {
            assert_eq!(
                resolver.resolve(allow_user, "alice@x.com", &alice(), Grade::StudentMember),
                expected
            );
        }
    }

    #[test]
    fn user_off_falls_back() {
        let resolver = generated(true);
        let url = resolver.resolve(false, "alice@x.com", &alice(), Grade::Other);
        assert!(url.starts_with(PLACEHOLDER));
    }

    #[test]
    fn both_on_appends_raw_email() {
        let resolver = generated(true);
        assert_eq!(
            resolver.resolve(true, "alice@x.com", &alice(), Grade::StudentMember),
            "https://www.gravatar.com/avatar/alice@x.com"
        );
    }

    #[test]
    fn static_fallback() {
        let resolver = AvatarResolver::new(
            false,
            GRAVATAR,
            FallbackAvatar::Static("img/member.png".to_string()),
            false,
        );
        assert_eq!(
            resolver.resolve(true, "alice@x.com", &alice(), Grade::Other),
            "img/member.png"
        );
    }

    #[test]
    fn hashed_email() {
        let resolver = AvatarResolver::new(
            true,
            GRAVATAR,
            FallbackAvatar::Static(String::new()),
            true,
        );
        assert_eq!(
            resolver.gravatar(" ABC "),
            "https://www.gravatar.com/avatar/ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn placeholder_encodes_name_parts() {
        let name = MemberName {
            first: "Mary ann".to_string(),
            last: "O'brien".to_string(),
            ..MemberName::default()
        };
        assert_eq!(
            placeholder_url(PLACEHOLDER, &name, Grade::Other),
            "https://eu.ui-avatars.com/api/?background=000050&color=FFFFFF&name=Mary+ann+O%27brien&size=128"
        );
    }

    #[test]
    fn from_config_coerces_global_flag() {
        let mut config = AvatarConfig::default();
        assert!(!AvatarResolver::from_config(&config).allow_global());

        config.allow_global = Some("1".to_string());
        assert!(AvatarResolver::from_config(&config).allow_global());

        config.allow_global = None;
        assert!(!AvatarResolver::from_config(&config).allow_global());
    }
}
