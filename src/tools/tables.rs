use crate::skin::SkinType;

/// What a keyword resolves to: one text for everyone, or a per-skin-type list
/// where `None` is the "all" wildcard.
#[derive(Debug, Clone, Copy)]
pub enum Remedy {
    Text(&'static str),
    BySkinType(&'static [(Option<SkinType>, &'static str)]),
}

impl Remedy {
    fn for_skin(&self, skin_type: SkinType) -> Option<&'static str> {
        match self {
            Remedy::Text(text) => Some(*text),
            Remedy::BySkinType(variants) => variants
                .iter()
                .find(|(skin, _)| *skin == Some(skin_type))
                .or_else(|| variants.iter().find(|(skin, _)| skin.is_none()))
                .map(|(_, text)| *text),
        }
    }
}

#[derive(Debug)]
pub struct LookupTable {
    /// Heading placed before a keyed remedy; `{}` is replaced by the keyword.
    heading: Option<&'static str>,
    entries: &'static [(&'static str, Remedy)],
    fallback: &'static str,
}

impl LookupTable {
    /// Keywords are matched in table order, case-insensitively, as substrings
    /// of `subject`. A skin-keyed entry with neither the requested type nor a
    /// wildcard is skipped.
    pub fn lookup(&self, subject: &str, skin_type: SkinType) -> String {
        let subject = subject.to_lowercase();
        for (keyword, remedy) in self.entries {
            if !subject.contains(keyword) {
                continue;
            }
            if let Some(text) = remedy.for_skin(skin_type) {
                return match self.heading {
                    Some(heading) => format!("{}\n{}", heading.replace("{}", keyword), text),
                    None => text.to_string(),
                };
            }
        }
        self.fallback.to_string()
    }
}

#[cfg(test)]
impl LookupTable {
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(keyword, _)| *keyword)
    }
}

pub static HERBAL: LookupTable = LookupTable {
    heading: Some("**Herbal Remedies for {}:**"),
    entries: &[
        (
            "acne",
            Remedy::BySkinType(&[
                (
                    Some(SkinType::Oily),
                    "Tea tree oil (diluted), neem paste, turmeric mask, green tea toner",
                ),
                (
                    Some(SkinType::Dry),
                    "Honey mask, aloe vera gel, chamomile tea compress, rose water",
                ),
                (
                    Some(SkinType::Sensitive),
                    "Calendula cream, oatmeal mask, cucumber slices, mild aloe vera",
                ),
                (
                    Some(SkinType::Combination),
                    "Clay mask on T-zone, honey on dry areas, witch hazel toner",
                ),
                (
                    Some(SkinType::Normal),
                    "Tea tree oil (diluted), honey mask, green tea toner",
                ),
            ]),
        ),
        (
            "dryness",
            Remedy::BySkinType(&[(
                None,
                "Coconut oil, shea butter, avocado mask, hyaluronic acid serum, ceramide cream",
            )]),
        ),
        (
            "redness",
            Remedy::BySkinType(&[(
                None,
                "Aloe vera gel, chamomile compress, green tea ice cubes, licorice root extract",
            )]),
        ),
        (
            "aging",
            Remedy::BySkinType(&[(
                None,
                "Rosehip oil, vitamin C serum, retinol alternatives (bakuchiol), peptide creams",
            )]),
        ),
        (
            "dark spot",
            Remedy::BySkinType(&[(
                None,
                "Vitamin C, kojic acid, arbutin, licorice extract, lemon juice (diluted)",
            )]),
        ),
    ],
    fallback: "**General Herbal Care:** Aloe vera, honey masks, green tea, and gentle plant-based cleansers are universally beneficial.",
};

pub static HOME: LookupTable = LookupTable {
    heading: None,
    entries: &[
        ("acne", Remedy::Text("**Home Remedies:** Ice cubes for inflammation, honey mask (20min), oatmeal scrub, steam facial with hot water")),
        ("dryness", Remedy::Text("**Home Remedies:** Milk compress, honey-yogurt mask, olive oil massage, cucumber slices")),
        ("oily skin", Remedy::Text("**Home Remedies:** Clay mask, egg white mask, tomato slices, lemon-honey toner (diluted)")),
        ("dark circle", Remedy::Text("**Home Remedies:** Cold tea bags, cucumber slices, cold spoon compress, potato slices")),
        ("sunburn", Remedy::Text("**Home Remedies:** Cool milk compress, aloe vera, cold shower, avoid further sun exposure")),
    ],
    fallback: "**General Home Care:** Keep skin clean, use lukewarm water, moisturize regularly, and protect from sun.",
};

pub static EXERCISE: LookupTable = LookupTable {
    heading: None,
    entries: &[
        ("acne", Remedy::Text("**Exercises for Acne:** Face yoga, lymphatic drainage massage, cardiovascular exercises (shower immediately after), avoid touching face during workouts")),
        ("aging", Remedy::Text("**Anti-Aging Exercises:** Facial yoga, neck stretches, scalp massage, resistance training to boost collagen")),
        ("circulation", Remedy::Text("**For Better Circulation:** Cardio exercises, inverted poses (legs up wall), face massage, deep breathing exercises")),
        ("stress", Remedy::Text("**Stress-Relief for Skin:** Yoga, meditation, walking in nature, progressive muscle relaxation")),
    ],
    fallback: "**General Skin Exercises:** Regular cardio improves circulation, facial massage boosts lymphatic drainage, and stress-reduction activities help overall skin health.",
};

pub static DERMATOLOGIST: LookupTable = LookupTable {
    heading: None,
    entries: &[
        ("acne", Remedy::Text("**Professional Insight:** Consider salicylic acid or benzoyl peroxide products. Avoid over-washing. If severe, consult dermatologist for prescription options.")),
        ("eczema", Remedy::Text("**Professional Insight:** Maintain skin barrier with ceramide-based moisturizers. Identify and avoid triggers. Consider seeing dermatologist for severe cases.")),
        ("psoriasis", Remedy::Text("**Professional Insight:** This appears to be a chronic condition requiring professional treatment. Please consult a dermatologist for proper diagnosis and treatment plan.")),
        ("rosacea", Remedy::Text("**Professional Insight:** Avoid known triggers (spicy food, alcohol, extreme temperatures). Use gentle, fragrance-free products. Dermatologist consultation recommended.")),
        ("melanoma", Remedy::Text("**URGENT:** Any suspicious moles or changing spots should be examined by a dermatologist immediately. Use ABCDE rule: Asymmetry, Border, Color, Diameter, Evolution.")),
    ],
    fallback: "**General Professional Advice:** Maintain consistent skincare routine, use sunscreen daily, and consult dermatologist for persistent or concerning skin issues.",
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SKIN_TYPES: [SkinType; 5] = [
        SkinType::Oily,
        SkinType::Combination,
        SkinType::Normal,
        SkinType::Dry,
        SkinType::Sensitive,
    ];

    #[test]
    fn test_herbal_acne_depends_on_skin_type() {
        let oily = HERBAL.lookup("I have acne", SkinType::Oily);
        assert!(oily.contains("Tea tree oil"));
        assert!(oily.starts_with("**Herbal Remedies for acne:**"));

        let dry = HERBAL.lookup("I have acne", SkinType::Dry);
        assert!(dry.contains("Honey mask"));
    }

    #[test]
    fn test_herbal_unknown_condition_falls_back() {
        let text = HERBAL.lookup("mystery condition", SkinType::Oily);
        assert_eq!(text, HERBAL.fallback());
    }

    #[test]
    fn test_wildcard_entry_serves_every_skin_type() {
        for skin in ALL_SKIN_TYPES {
            assert!(HERBAL
                .lookup("Redness around my nose", skin)
                .contains("licorice root extract"));
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(DERMATOLOGIST
            .lookup("Worried about MELANOMA", SkinType::Normal)
            .starts_with("**URGENT:**"));
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        // "aging" and "stress" both match; "aging" is listed first.
        let text = EXERCISE.lookup("stress is aging me", SkinType::Normal);
        assert!(text.contains("Anti-Aging Exercises"));
    }

    #[test]
    fn test_multi_word_keywords_match_natural_text() {
        assert!(HOME
            .lookup("I get dark circles under my eyes", SkinType::Dry)
            .contains("Cold tea bags"));
        assert!(HERBAL
            .lookup("dark spots on my cheeks", SkinType::Dry)
            .contains("kojic acid"));
    }

    #[test]
    fn test_every_table_returns_text_for_any_subject() {
        let subjects = ["", "acne", "nothing relevant", "ECZEMA flare", "sunburn"];
        for table in [&HERBAL, &HOME, &EXERCISE, &DERMATOLOGIST] {
            for subject in subjects {
                for skin in ALL_SKIN_TYPES {
                    assert!(!table.lookup(subject, skin).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for table in [&HERBAL, &HOME, &EXERCISE, &DERMATOLOGIST] {
            for keyword in table.keywords() {
                assert_eq!(keyword, keyword.to_lowercase());
            }
        }
    }
}
