use tracing::debug;

use super::persona::Persona;
use crate::skin::SkinType;
use crate::tools::{ToolKind, Toolbox};

#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub text: String,
    pub tools_fired: Vec<ToolKind>,
}

/// Tools that fire for this persona and question, in merge order. Nothing
/// fires for an empty question; whitespace still counts as a question.
pub fn triggered_tools(persona: Persona, question: &str) -> Vec<ToolKind> {
    if question.is_empty() {
        return Vec::new();
    }
    let mut tools = persona.tools().to_vec();
    tools.sort();
    tools
}

pub struct Merger {
    toolbox: Toolbox,
}

impl Merger {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }

    pub async fn merge(
        &self,
        persona: Persona,
        raw_model_text: &str,
        question: &str,
        skin_type: SkinType,
    ) -> Merged {
        let tools_fired = triggered_tools(persona, question);
        let mut sections = vec![raw_model_text.to_string()];
        for kind in &tools_fired {
            debug!(tool = kind.as_str(), "running lookup tool");
            sections.push(self.toolbox.lookup(*kind, question, skin_type).await);
        }

        Merged {
            text: sections.join("\n\n"),
            tools_fired,
        }
    }
}
