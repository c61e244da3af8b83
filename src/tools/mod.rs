pub mod research;
pub mod tables;

use serde::Serialize;
use tracing::info;

use crate::skin::SkinType;

pub use research::ResearchClient;
pub use tables::LookupTable;

/// Deterministic augmentations appended after the model's answer. Declaration
/// order is the order outputs are merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Herbal,
    Home,
    Exercise,
    Dermatologist,
    Research,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Herbal => "herbal",
            ToolKind::Home => "home",
            ToolKind::Exercise => "exercise",
            ToolKind::Dermatologist => "dermatologist",
            ToolKind::Research => "research",
        }
    }

    /// The static table behind this tool, if it has one.
    pub fn table(self) -> Option<&'static LookupTable> {
        match self {
            ToolKind::Herbal => Some(&tables::HERBAL),
            ToolKind::Home => Some(&tables::HOME),
            ToolKind::Exercise => Some(&tables::EXERCISE),
            ToolKind::Dermatologist => Some(&tables::DERMATOLOGIST),
            ToolKind::Research => None,
        }
    }
}

#[cfg(test)]
impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Herbal,
        ToolKind::Home,
        ToolKind::Exercise,
        ToolKind::Dermatologist,
        ToolKind::Research,
    ];
}

pub struct Toolbox {
    research: ResearchClient,
}

impl Toolbox {
    pub fn new(research: ResearchClient) -> Self {
        Self { research }
    }

    pub async fn lookup(&self, kind: ToolKind, subject: &str, skin_type: SkinType) -> String {
        match kind.table() {
            Some(table) => table.lookup(subject, skin_type),
            None => {
                let outcome = self.research.search(subject).await;
                info!(outcome = outcome.label(), "research lookup finished");
                outcome.render()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_research_lacks_a_table() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.table().is_none(), kind == ToolKind::Research);
        }
    }

    #[test]
    fn test_all_is_sorted_in_merge_order() {
        let mut sorted = ToolKind::ALL;
        sorted.sort();
        assert_eq!(sorted, ToolKind::ALL);
    }

    #[tokio::test]
    async fn test_toolbox_static_lookup_needs_no_network() {
        let toolbox = Toolbox::new(ResearchClient::new("http://127.0.0.1:9"));
        let text = toolbox
            .lookup(ToolKind::Home, "sunburn after the beach", SkinType::Normal)
            .await;
        assert!(text.contains("Cool milk compress"));
    }
}
