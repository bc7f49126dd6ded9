//! Canned document prompts, each paired with the category whose preamble it
//! runs under.

use std::collections::BTreeMap;

use crate::models::{
    Category, CourseLevel, PresentationKind, ProjectComplexity, RosterSummary, StudentRecord,
};

pub struct DocumentPrompt {
    pub text: String,
    pub category: Category,
}

impl DocumentPrompt {
    fn new(text: String, category: Category) -> Self {
        Self { text, category }
    }
}

pub fn iep_template() -> DocumentPrompt {
    DocumentPrompt::new(
        "Create a complete, IDEA-compliant IEP template including:

1. Student Information & Present Levels
2. Measurable Annual Goals with Benchmarks
3. Special Education Services Matrix
4. Accommodation & Modification Strategies
5. Assessment Participation Guidelines
6. Transition Services Planning
7. Progress Monitoring Schedule
8. Team Meeting Documentation

Include specific examples and implementation guidance for each section."
            .to_string(),
        Category::Iep,
    )
}

pub fn smart_goals() -> DocumentPrompt {
    DocumentPrompt::new(
        "Generate 5 example SMART IEP goals for different areas:
1. Reading comprehension
2. Mathematics problem-solving
3. Social communication
4. Fine motor skills
5. Executive functioning

Include baseline data, target criteria, measurement methods, and timeline for each goal."
            .to_string(),
        Category::Iep,
    )
}

pub fn curriculum(level: CourseLevel) -> DocumentPrompt {
    DocumentPrompt::new(
        format!(
            "Design a comprehensive {} mechatronics curriculum including:

1. Course overview and learning objectives
2. 16-week detailed syllabus breakdown
3. Hands-on lab activities and projects
4. Assessment strategies and rubrics
5. Equipment and software requirements
6. Industry partnerships and guest speakers
7. Accommodation strategies for diverse learners
8. Career pathway alignment
9. Certification preparation
10. Professional development recommendations

Make it practical for immediate implementation.",
            level.label()
        ),
        Category::Mechatronics,
    )
}

pub fn project_ideas(complexity: ProjectComplexity) -> DocumentPrompt {
    DocumentPrompt::new(
        format!(
            "Generate 5 detailed {} mechatronics project ideas including:

For each project:
- Project overview and learning objectives
- Materials list with costs
- Step-by-step implementation guide
- Skills developed and assessed
- Real-world applications
- Modification strategies for different ability levels
- Extension activities for advanced students
- Industry connections and career relevance

Focus on hands-on, engaging projects that build both technical and soft skills.",
            complexity.label()
        ),
        Category::Mechatronics,
    )
}

pub fn presentation(kind: PresentationKind) -> DocumentPrompt {
    DocumentPrompt::new(
        format!(
            "Create a comprehensive {} presentation with:

1. Complete slide-by-slide breakdown (8-12 slides)
2. Detailed talking points for each slide
3. Visual suggestions and data presentation ideas
4. Engagement strategies and interactive elements
5. Q&A preparation and anticipated questions
6. Follow-up action items and next steps
7. Professional formatting recommendations
8. Handout and resource suggestions

Make it presentation-ready for professional audiences.",
            kind.label()
        ),
        Category::Presentation,
    )
}

pub fn program_analysis(
    summary: &RosterSummary,
    students: &BTreeMap<String, StudentRecord>,
) -> anyhow::Result<DocumentPrompt> {
    let details = serde_json::to_string_pretty(students)?;

    Ok(DocumentPrompt::new(
        format!(
            "Analyze this special education mechatronics program data:

- Total Students: {}
- Average Progress: {:.1}/10
- High Performers (7+): {}
- Student Details: {}

Provide comprehensive analysis including:
1. Program effectiveness assessment
2. Individual student recommendations
3. Curriculum adjustments needed
4. Accommodation strategy improvements
5. Professional development priorities
6. Family engagement strategies
7. Transition planning considerations
8. Data collection improvements

Make recommendations actionable and specific.",
            summary.total_students, summary.avg_progress, summary.high_performers, details
        ),
        Category::Iep,
    ))
}

pub fn pd_plan() -> DocumentPrompt {
    DocumentPrompt::new(
        "Create a professional development plan for special education teachers working in technical/vocational programs:

1. Core competency areas to develop
2. Recommended training programs and certifications
3. Conference and workshop suggestions
4. Online learning resources
5. Networking opportunities
6. Implementation timeline (6-month plan)
7. Progress monitoring strategies
8. Budget considerations and funding sources

Focus on both special education expertise and technical skills."
            .to_string(),
        Category::General,
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{DisabilityCategory, ProgressScore};

    #[test]
    fn parameterised_prompts_embed_labels() {
        assert!(curriculum(CourseLevel::Introductory)
            .text
            .contains("comprehensive Introductory (High School) mechatronics curriculum"));
        assert!(project_ideas(ProjectComplexity::Advanced)
            .text
            .starts_with("Generate 5 detailed Advanced mechatronics project ideas"));
        assert!(presentation(PresentationKind::GrantFundingProposal)
            .text
            .starts_with("Create a comprehensive Grant Funding Proposal presentation"));
    }

    #[test]
    fn prompts_route_to_expected_categories() {
        assert_eq!(iep_template().category, Category::Iep);
        assert_eq!(smart_goals().category, Category::Iep);
        assert_eq!(curriculum(CourseLevel::AssociateDegree).category, Category::Mechatronics);
        assert_eq!(project_ideas(ProjectComplexity::Beginner).category, Category::Mechatronics);
        assert_eq!(presentation(PresentationKind::ParentConference).category, Category::Presentation);
        assert_eq!(pd_plan().category, Category::General);
    }

    #[test]
    fn program_analysis_embeds_summary_and_roster_json() {
        let mut students = BTreeMap::new();
        students.insert(
            "Avery Lee".to_string(),
            StudentRecord {
                name: "Avery Lee".to_string(),
                disability: DisabilityCategory::LearningDisability,
                goals: "Read 90 wpm".to_string(),
                progress: ProgressScore::new(8).unwrap(),
                accommodations: "Extended time".to_string(),
                notes: "Strong in lab".to_string(),
                last_update: NaiveDate::from_ymd_opt(2026, 2, 2)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            },
        );
        let summary = RosterSummary {
            total_students: 1,
            avg_progress: 8.0,
            high_performers: 1,
        };

        let prompt = program_analysis(&summary, &students).unwrap();

        assert_eq!(prompt.category, Category::Iep);
        assert!(prompt.text.contains("- Total Students: 1"));
        assert!(prompt.text.contains("- Average Progress: 8.0/10"));
        assert!(prompt.text.contains("- High Performers (7+): 1"));
        assert!(prompt.text.contains("\"Avery Lee\": {"));
        assert!(prompt.text.contains("\"disability\": \"Learning Disability\""));
        assert!(prompt.text.contains("\"progress\": 8"));
        assert!(prompt.text.contains("\"last_update\": \"2026-02-02 09:30\""));
        assert!(!prompt.text.contains("\"name\""));
    }
}
