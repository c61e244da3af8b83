use serde::Serialize;

use crate::tools::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[value(name = "vision")]
    VisionExpert,
    #[value(name = "herbal")]
    HerbalSpecialist,
    #[value(name = "home")]
    HomeRemedyExpert,
    #[value(name = "exercise")]
    ExerciseWellness,
    #[value(name = "dermatologist")]
    DermatologistAi,
    #[value(name = "research")]
    ResearchAssistant,
}

impl Persona {
    pub const ALL: [Persona; 6] = [
        Persona::VisionExpert,
        Persona::HerbalSpecialist,
        Persona::HomeRemedyExpert,
        Persona::ExerciseWellness,
        Persona::DermatologistAi,
        Persona::ResearchAssistant,
    ];

    /// Short name shown when choosing a persona and on reports.
    pub fn label(self) -> &'static str {
        match self {
            Persona::VisionExpert => "Vision Expert",
            Persona::HerbalSpecialist => "Herbal Specialist",
            Persona::HomeRemedyExpert => "Home Remedy Expert",
            Persona::ExerciseWellness => "Exercise & Wellness",
            Persona::DermatologistAi => "Dermatologist AI",
            Persona::ResearchAssistant => "Research Assistant",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Persona::VisionExpert => "Vision Skincare Expert",
            Persona::HerbalSpecialist => "Herbal Skincare Specialist",
            Persona::HomeRemedyExpert => "Home Remedy Expert",
            Persona::ExerciseWellness => "Exercise & Wellness Coach",
            Persona::DermatologistAi => "Dermatologist AI Advisor",
            Persona::ResearchAssistant => "Research Assistant",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Persona::VisionExpert => "You are a professional skincare consultant. Analyze the uploaded image and provide detailed, safe skincare advice. Focus on identifying visible skin conditions and recommend appropriate treatments. Always advise consulting a dermatologist for serious conditions.",
            Persona::HerbalSpecialist => "You are an expert in natural and herbal skincare remedies. Provide safe, natural, plant-based solutions for skin concerns. Focus on herbs, essential oils, and natural ingredients. Always mention patch testing for new ingredients.",
            Persona::HomeRemedyExpert => "You specialize in home-based skincare solutions using common household items. Provide practical, accessible remedies that people can easily make at home. Focus on kitchen ingredients and DIY treatments.",
            Persona::ExerciseWellness => "You focus on how physical activity, stress management, and lifestyle factors affect skin health. Provide exercise recommendations and wellness tips that improve skin from the inside out.",
            Persona::DermatologistAi => "You provide professional dermatological insights and advice. Focus on evidence-based recommendations, product suggestions, and when to seek professional medical help. Never provide medical diagnoses.",
            Persona::ResearchAssistant => "You help find and summarize relevant dermatological research and scientific studies. Provide evidence-based information and cite scientific findings when possible.",
        }
    }

    /// Lookup tools appended to this persona's answers, in merge order.
    pub fn tools(self) -> &'static [ToolKind] {
        match self {
            Persona::VisionExpert => &[],
            Persona::HerbalSpecialist => &[ToolKind::Herbal],
            Persona::HomeRemedyExpert => &[ToolKind::Home],
            Persona::ExerciseWellness => &[ToolKind::Exercise],
            Persona::DermatologistAi => &[ToolKind::Dermatologist],
            Persona::ResearchAssistant => &[ToolKind::Research],
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_tool_lists_are_in_merge_order() {
        for persona in Persona::ALL {
            let tools = persona.tools();
            assert!(tools.windows(2).all(|w| w[0] < w[1]), "{persona}");
        }
    }

    #[test]
    fn test_tools_agree_with_display_names() {
        // The explicit tool list must cover exactly the tool names that appear
        // in the persona's display name.
        for persona in Persona::ALL {
            let name = persona.display_name().to_lowercase();
            let by_name: Vec<ToolKind> = ToolKind::ALL
                .into_iter()
                .filter(|kind| name.contains(kind.as_str()))
                .collect();
            assert_eq!(persona.tools(), by_name.as_slice(), "{persona}");
        }
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(
            Persona::from_str("dermatologist", true).unwrap(),
            Persona::DermatologistAi
        );
        assert_eq!(
            Persona::from_str("Vision", true).unwrap(),
            Persona::VisionExpert
        );
        assert!(Persona::from_str("astrologer", true).is_err());
    }
}
