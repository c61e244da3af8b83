use crate::agent::AnalysisResult;

/// The last successful analysis of one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    last: Option<AnalysisResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, result: AnalysisResult) {
        self.last = Some(result);
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Persona;
    use crate::skin::SkinType;

    fn result(persona: Persona, text: &str) -> AnalysisResult {
        AnalysisResult {
            persona,
            skin_type: SkinType::Dry,
            question: "acne".into(),
            merged_response: text.into(),
            model: "gpt-4o-mini".into(),
        }
    }

    #[test]
    fn test_empty_until_first_store() {
        assert!(Session::new().current().is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let mut session = Session::new();
        session.store(result(Persona::HerbalSpecialist, "first"));
        session.store(result(Persona::ResearchAssistant, "second"));

        let current = session.current().unwrap();
        assert_eq!(current.persona, Persona::ResearchAssistant);
        assert_eq!(current.merged_response, "second");
    }
}
