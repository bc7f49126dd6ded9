use std::fmt;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Iep,
    Mechatronics,
    Presentation,
    General,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Iep => "iep",
            Category::Mechatronics => "mechatronics",
            Category::Presentation => "presentation",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DisabilityCategory {
    Autism,
    #[serde(rename = "Learning Disability")]
    LearningDisability,
    #[serde(rename = "Intellectual Disability")]
    IntellectualDisability,
    #[serde(rename = "ADHD")]
    Adhd,
    #[serde(rename = "Other Health Impairment")]
    OtherHealthImpairment,
    #[serde(rename = "Multiple Disabilities")]
    MultipleDisabilities,
    Other,
}

impl DisabilityCategory {
    pub fn label(self) -> &'static str {
        match self {
            DisabilityCategory::Autism => "Autism",
            DisabilityCategory::LearningDisability => "Learning Disability",
            DisabilityCategory::IntellectualDisability => "Intellectual Disability",
            DisabilityCategory::Adhd => "ADHD",
            DisabilityCategory::OtherHealthImpairment => "Other Health Impairment",
            DisabilityCategory::MultipleDisabilities => "Multiple Disabilities",
            DisabilityCategory::Other => "Other",
        }
    }
}

/// Overall progress rating on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ProgressScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("progress must be between 1 and 10, got {0}")]
pub struct ProgressOutOfRange(pub i64);

impl ProgressScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: ProgressScore = ProgressScore(5);
    pub const HIGH_PERFORMER: ProgressScore = ProgressScore(7);

    pub fn new(value: i64) -> Result<Self, ProgressOutOfRange> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ProgressOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ProgressScore {
    type Error = ProgressOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProgressScore> for u8 {
    fn from(score: ProgressScore) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    #[serde(skip)]
    pub name: String,
    pub disability: DisabilityCategory,
    pub goals: String,
    pub progress: ProgressScore,
    pub accommodations: String,
    pub notes: String,
    #[serde(serialize_with = "serialize_minute")]
    pub last_update: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresentationKind {
    IepTeamMeeting,
    ParentConference,
    ProgramOverview,
    StudentProgressReport,
    CurriculumProposal,
    ProfessionalDevelopmentWorkshop,
    IndustryPartnershipPitch,
    GrantFundingProposal,
}

impl PresentationKind {
    pub fn label(self) -> &'static str {
        match self {
            PresentationKind::IepTeamMeeting => "IEP Team Meeting",
            PresentationKind::ParentConference => "Parent Conference",
            PresentationKind::ProgramOverview => "Program Overview for Administration",
            PresentationKind::StudentProgressReport => "Student Progress Report",
            PresentationKind::CurriculumProposal => "Curriculum Proposal",
            PresentationKind::ProfessionalDevelopmentWorkshop => {
                "Professional Development Workshop"
            }
            PresentationKind::IndustryPartnershipPitch => "Industry Partnership Pitch",
            PresentationKind::GrantFundingProposal => "Grant Funding Proposal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub id: String,
    pub kind: PresentationKind,
    pub content: String,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CourseLevel {
    Introductory,
    CertificateProgram,
    AssociateDegree,
    IndustryTraining,
}

impl CourseLevel {
    pub fn label(self) -> &'static str {
        match self {
            CourseLevel::Introductory => "Introductory (High School)",
            CourseLevel::CertificateProgram => "Certificate Program",
            CourseLevel::AssociateDegree => "Associate Degree",
            CourseLevel::IndustryTraining => "Industry Training",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectComplexity {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProjectComplexity {
    pub fn label(self) -> &'static str {
        match self {
            ProjectComplexity::Beginner => "Beginner",
            ProjectComplexity::Intermediate => "Intermediate",
            ProjectComplexity::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    pub total_students: usize,
    pub avg_progress: f64,
    pub high_performers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub messages: usize,
    pub students: usize,
    pub presentations: usize,
}

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn serialize_minute<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}
