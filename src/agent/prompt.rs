use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;

use super::persona::Persona;
use crate::llm::{ContentPart, ImageUrl};
use crate::skin::SkinType;

const DEFAULT_QUESTION: &str = "Please provide general skincare advice.";
const IMAGE_DETAIL: &str = "high";
const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// A user photo, checked to be PNG or JPEG by its magic bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl ImageInput {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let kind = infer::get(&bytes).context("Unrecognized image data")?;
        let mime_type = ACCEPTED_MIME_TYPES
            .into_iter()
            .find(|accepted| *accepted == kind.mime_type())
            .with_context(|| {
                format!("Unsupported image type {}; use PNG or JPEG", kind.mime_type())
            })?;
        Ok(Self { bytes, mime_type })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system_text: String,
    pub user_turn: Vec<ContentPart>,
}

pub fn build(
    persona: Persona,
    question: &str,
    image: Option<&ImageInput>,
    skin_type: SkinType,
) -> Prompt {
    let system_text = format!("{} User has {} skin type.", persona.instructions(), skin_type);

    let text = if question.is_empty() {
        DEFAULT_QUESTION.to_string()
    } else {
        question.to_string()
    };
    let mut user_turn = vec![ContentPart::Text { text }];

    if let Some(image) = image {
        user_turn.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.data_url(),
                detail: IMAGE_DETAIL.to_string(),
            },
        });
    }

    Prompt {
        system_text,
        user_turn,
    }
}
