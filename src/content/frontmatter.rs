//! Front-matter parsing

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that accepts any scalar and keeps it as a string
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ScalarString)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a docs page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string", default)]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string", default)]
    pub description: Option<String>,
    pub sidebar_position: Option<f64>,
    #[serde(deserialize_with = "scalar_string", default)]
    pub sidebar_label: Option<String>,
    pub slug: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body) with the body trimmed
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // TOML front-matter (+++)
        if content.starts_with("+++") {
            return Self::parse_toml(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let Some((block, remaining)) = split_block(content, "---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading thematic break followed by prose is not front-matter
        if !looks_like_yaml(block) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(block)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;

        Ok((fm, remaining))
    }

    fn parse_toml(content: &str) -> Result<(Self, &str)> {
        let Some((block, remaining)) = split_block(content, "+++") else {
            return Ok((FrontMatter::default(), content));
        };

        let fm: FrontMatter = toml::from_str(block)
            .map_err(|e| anyhow!("Failed to parse TOML front-matter: {}", e))?;

        Ok((fm, remaining))
    }
}

/// Split `content` (starting with `fence`) into the fenced block and the rest
fn split_block<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = &content[fence.len()..];
    let rest = rest.trim_start_matches(['\n', '\r']);

    let closing = format!("\n{}", fence);
    let end_pos = rest.find(&closing)?;
    let block = &rest[..end_pos];
    let remaining = rest[end_pos + closing.len()..].trim();

    Some((block, remaining))
}

/// At least one line must look like a `key: value` pair
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }

        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };

        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");

        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Get started
description: "Create your first Pod"
sidebar_position: 2
---

import Tabs from '@theme/Tabs';

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Get started"));
        assert_eq!(fm.description.as_deref(), Some("Create your first Pod"));
        assert_eq!(fm.sidebar_position, Some(2.0));
        assert!(body.starts_with("import Tabs"));
        assert!(body.ends_with("This is the content."));
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = "+++\ntitle = \"Overview\"\nsidebar_position = 1\n+++\nBody\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Overview"));
        assert_eq!(fm.sidebar_position, Some(1.0));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_numeric_title_is_kept_as_string() {
        let content = "---\ntitle: 2024\n---\nBody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("2024"));
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let content = "---\ntitle: Tabs\nhide_table_of_contents: true\n---\nBody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("hide_table_of_contents"),
            Some(&serde_yaml::Value::Bool(true))
        );
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("\n# Heading\n\nText\n").unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, "# Heading\n\nText");
    }

    #[test]
    fn test_unclosed_frontmatter_is_content() {
        let content = "---\ntitle: Broken\n\nText";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some text with a list:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("Some text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "---\nSee https://example.com/path\n---\nMore content.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("https://example.com"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }
}
