use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

const SITE_FILE: &str = "site.json";

static GLOBAL_SITE: LazyLock<Result<SiteConfig, SiteError>> = LazyLock::new(load);

#[derive(Embed)]
#[folder = "content"]
pub struct Content;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub source: Option<String>,
}

/// Shown in place of a project image that fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/image/placeholder.svg";

impl Project {
    pub fn image_src(&self, failed: bool) -> &str {
        if failed {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u64,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Where and how contact-form messages are delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub recipient: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromeSettings {
    pub nav_threshold_px: u32,
    pub top_button_threshold_px: u32,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            nav_threshold_px: 50,
            top_button_threshold_px: 300,
        }
    }
}

/// Everything that differs between one portfolio and the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub initials: String,
    pub tagline: String,
    pub bio: Vec<String>,
    pub phrases: Vec<String>,
    /// Section ids in page order, used for navigation.
    pub sections: Vec<String>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub stats: Vec<Stat>,
    pub socials: Vec<SocialLink>,
    pub contact: ContactSettings,
    #[serde(default)]
    pub chrome: ChromeSettings,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    #[error("site content file {0} not found")]
    NotFound(&'static str),
    #[error("couldn't parse site content: {0}")]
    ParseError(String),
    #[error("site content is invalid: {0}")]
    Invalid(String),
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| SiteError::ParseError(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if self.name.trim().is_empty() {
            return Err(SiteError::Invalid("name is empty".into()));
        }
        if self.phrases.is_empty() {
            return Err(SiteError::Invalid("no typing phrases".into()));
        }
        if let Some(index) = self.phrases.iter().position(|p| p.is_empty()) {
            return Err(SiteError::Invalid(format!("phrase {index} is empty")));
        }
        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(SiteError::Invalid(format!(
                "skill {} has level {} above 100",
                skill.name, skill.level
            )));
        }
        if self.contact.endpoint.trim().is_empty() {
            return Err(SiteError::Invalid("contact endpoint is empty".into()));
        }
        Ok(())
    }

    /// Label shown in the navigation for a section id.
    pub fn section_label(id: &str) -> String {
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

fn load() -> Result<SiteConfig, SiteError> {
    let file = Content::get(SITE_FILE).ok_or(SiteError::NotFound(SITE_FILE))?;
    let json = String::from_utf8(file.data.into())
        .map_err(|err| SiteError::ParseError(err.to_string()))?;
    SiteConfig::from_json(&json)
}

/// The embedded site content, parsed once.
pub fn config() -> Result<&'static SiteConfig, SiteError> {
    GLOBAL_SITE.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "name": "Jane Doe",
            "initials": "JD",
            "tagline": "Developer",
            "bio": [],
            "phrases": ["Hello"],
            "sections": ["hero"],
            "skills": [{ "name": "Rust", "level": 80 }],
            "projects": [],
            "stats": [{ "label": "Projects", "value": 3 }],
            "socials": [],
            "contact": {
                "endpoint": "https://example.com/send",
                "service_id": "s",
                "template_id": "t",
                "public_key": "k",
                "recipient": "Jane"
            }
        })
    }

    #[test]
    fn test_embedded_content_loads() {
        let config = config().expect("embedded site.json should be valid");
        assert!(!config.name.is_empty());
        assert!(!config.phrases.is_empty());
        assert!(config.sections.iter().any(|s| s == "contact"));
        assert!(config.skills.iter().all(|s| s.level <= 100));
    }

    #[test]
    fn test_local_images_ship_in_public() {
        let public = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public");
        let config = config().expect("embedded site.json should be valid");
        let local = config
            .projects
            .iter()
            .map(|p| p.image.as_str())
            .chain([PLACEHOLDER_IMAGE])
            .filter(|src| src.starts_with('/'));
        for src in local {
            assert!(
                public.join(src.trim_start_matches('/')).is_file(),
                "missing {src}"
            );
        }
    }

    #[test]
    fn test_failed_image_falls_back_to_placeholder() {
        let config = config().expect("embedded site.json should be valid");
        let project = &config.projects[0];
        assert_eq!(project.image_src(false), project.image);
        assert_eq!(project.image_src(true), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config = SiteConfig::from_json(&minimal().to_string()).unwrap();
        assert_eq!(config.chrome, ChromeSettings::default());
        assert_eq!(config.stats[0].suffix, "");
    }

    #[test]
    fn test_rejects_invalid_content() {
        let mut value = minimal();
        value["phrases"] = serde_json::json!([]);
        assert!(matches!(
            SiteConfig::from_json(&value.to_string()),
            Err(SiteError::Invalid(_))
        ));

        let mut value = minimal();
        value["skills"][0]["level"] = serde_json::json!(120);
        assert!(matches!(
            SiteConfig::from_json(&value.to_string()),
            Err(SiteError::Invalid(_))
        ));

        let mut value = minimal();
        value["name"] = serde_json::json!("  ");
        assert!(matches!(
            SiteConfig::from_json(&value.to_string()),
            Err(SiteError::Invalid(_))
        ));

        assert!(matches!(
            SiteConfig::from_json("{ not json"),
            Err(SiteError::ParseError(_))
        ));
    }

    #[test]
    fn test_section_label() {
        assert_eq!(SiteConfig::section_label("projects"), "Projects");
        assert_eq!(SiteConfig::section_label(""), "");
    }
}
