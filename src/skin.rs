use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Oily,
    Combination,
    #[default]
    Normal,
    Dry,
    Sensitive,
}

impl SkinType {
    pub fn as_str(self) -> &'static str {
        match self {
            SkinType::Oily => "oily",
            SkinType::Combination => "combination",
            SkinType::Normal => "normal",
            SkinType::Dry => "dry",
            SkinType::Sensitive => "sensitive",
        }
    }

    /// Capitalized form used in report headings ("Oily", "Dry", ...).
    pub fn title(self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(SkinType::Combination.title(), "Combination");
        assert_eq!(SkinType::Oily.to_string(), "oily");
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(SkinType::default(), SkinType::Normal);
    }
}
