use crate::models::Category;

/// Keyword sets in priority order. The first category with a keyword
/// contained in the lowercased query wins; anything else is `General`.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Iep,
        &["iep", "accommodation", "goal", "special education", "disability"],
    ),
    (
        Category::Mechatronics,
        &["mechatronics", "robot", "automation", "engineering", "project"],
    ),
    (Category::Presentation, &["presentation", "powerpoint", "slides"]),
];

pub fn classify(query: &str) -> Category {
    let lower = query.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_documented_examples() {
        assert_eq!(classify("What accommodations help with ADHD?"), Category::Iep);
        assert_eq!(classify("Design a robot arm project"), Category::Mechatronics);
        assert_eq!(
            classify("Build me slides for the board meeting"),
            Category::Presentation
        );
        assert_eq!(classify("What's the weather?"), Category::General);
    }

    #[test]
    fn empty_query_is_general() {
        assert_eq!(classify(""), Category::General);
        assert_eq!(classify("   "), Category::General);
    }

    #[test]
    fn iep_keywords_take_precedence_over_mechatronics() {
        for iep in ["iep", "accommodation", "goal", "special education", "disability"] {
            for mech in ["mechatronics", "robot", "automation", "engineering", "project"] {
                let query = format!("{mech} lesson with {iep} support");
                assert_eq!(classify(&query), Category::Iep, "query: {query}");
            }
        }
    }

    #[test]
    fn mechatronics_takes_precedence_over_presentation() {
        assert_eq!(
            classify("Slides about our automation cell"),
            Category::Mechatronics
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify("SPECIAL EDUCATION funding"), Category::Iep);
        assert_eq!(classify("PowerPoint tips"), Category::Presentation);
    }

    #[test]
    fn keyword_table_is_ordered_by_priority() {
        let order: Vec<Category> = CATEGORY_KEYWORDS.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![Category::Iep, Category::Mechatronics, Category::Presentation]
        );
    }

    #[test]
    fn non_ascii_input_is_total() {
        assert_eq!(classify("¿Qué tiempo hace? 🤖"), Category::General);
    }
}
