use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::models::{
    ChatMessage, DisabilityCategory, Presentation, PresentationKind, ProgressScore,
    RosterSummary, SessionStats, StudentRecord,
};

pub const GREETING: &str = "👋 Hello! I'm your professional AI assistant for IEP planning and mechatronics education. I can help with detailed curriculum planning, comprehensive IEP development, professional presentations, and student success strategies. What would you like to work on today?";

/// Everything one interactive session owns. Dropped with the session.
#[derive(Debug, Default)]
pub struct Session {
    pub history: ChatHistory,
    pub roster: Roster,
    pub library: PresentationLibrary,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            messages: self.history.len(),
            students: self.roster.len(),
            presentations: self.library.len(),
        }
    }
}

/// Append-only chat transcript.
#[derive(Debug)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }
}

impl ChatHistory {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[derive(Debug, Default)]
pub struct Roster {
    students: BTreeMap<String, StudentRecord>,
}

impl Roster {
    /// Last write wins; the previous record for the name is replaced whole.
    pub fn save(&mut self, record: StudentRecord) -> Option<StudentRecord> {
        self.students.insert(record.name.clone(), record)
    }

    pub fn students(&self) -> &BTreeMap<String, StudentRecord> {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn summary(&self) -> Option<RosterSummary> {
        if self.students.is_empty() {
            return None;
        }

        let total_students = self.students.len();
        let total_progress: u32 = self
            .students
            .values()
            .map(|s| u32::from(s.progress.value()))
            .sum();
        let high_performers = self
            .students
            .values()
            .filter(|s| s.progress >= ProgressScore::HIGH_PERFORMER)
            .count();

        Some(RosterSummary {
            total_students,
            avg_progress: total_progress as f64 / total_students as f64,
            high_performers,
        })
    }

    /// Loads `name,disability,goals,progress,accommodations,notes` rows.
    /// Stamps every imported record with `now`. Every row is validated
    /// before any is saved; a bad row leaves the roster unchanged. Returns
    /// the number of rows loaded.
    pub fn import_csv<R: Read>(&mut self, reader: R, now: NaiveDateTime) -> anyhow::Result<usize> {
        #[derive(Deserialize)]
        struct CsvRow {
            name: String,
            disability: DisabilityCategory,
            #[serde(default)]
            goals: String,
            progress: ProgressScore,
            #[serde(default)]
            accommodations: String,
            #[serde(default)]
            notes: String,
        }

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.with_context(|| format!("invalid roster row {}", index + 1))?;
            if row.name.is_empty() {
                anyhow::bail!("roster row {} has no student name", index + 1);
            }

            records.push(StudentRecord {
                name: row.name,
                disability: row.disability,
                goals: row.goals,
                progress: row.progress,
                accommodations: row.accommodations,
                notes: row.notes,
                last_update: now,
            });
        }

        let imported = records.len();
        for record in records {
            self.save(record);
        }

        Ok(imported)
    }
}

/// Append-only; ids are `<type>_<YYYYmmdd_HHMM>` with a numeric suffix when
/// the same type is generated twice within a minute.
#[derive(Debug, Default)]
pub struct PresentationLibrary {
    presentations: Vec<Presentation>,
}

impl PresentationLibrary {
    pub fn add(
        &mut self,
        kind: PresentationKind,
        content: String,
        created: NaiveDateTime,
    ) -> &Presentation {
        let base = format!("{}_{}", kind.label(), created.format("%Y%m%d_%H%M"));
        let mut id = base.clone();
        let mut suffix = 2;
        while self.get(&id).is_some() {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        self.presentations.push(Presentation {
            id,
            kind,
            content,
            created,
        });
        &self.presentations[self.presentations.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&Presentation> {
        self.presentations.iter().find(|p| p.id == id)
    }

    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    pub fn len(&self) -> usize {
        self.presentations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presentations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Role;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn student(name: &str, progress: i64) -> StudentRecord {
        StudentRecord {
            name: name.to_string(),
            disability: DisabilityCategory::Autism,
            goals: "Follow a 3-step lab procedure".to_string(),
            progress: ProgressScore::new(progress).unwrap(),
            accommodations: "Visual schedule".to_string(),
            notes: "".to_string(),
            last_update: at(9, 0),
        }
    }

    #[test]
    fn new_session_starts_with_greeting() {
        let session = Session::new();
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history.messages()[0].role, Role::Assistant);
        assert_eq!(
            session.stats(),
            SessionStats {
                messages: 1,
                students: 0,
                presentations: 0
            }
        );
    }

    #[test]
    fn saving_same_name_overwrites_record() {
        let mut roster = Roster::default();
        assert!(roster.save(student("Jules Moreno", 4)).is_none());

        let mut update = student("Jules Moreno", 6);
        update.notes = "Improved focus".to_string();
        let previous = roster.save(update).unwrap();

        assert_eq!(previous.progress.value(), 4);
        assert_eq!(roster.len(), 1);
        let current = roster.students().get("Jules Moreno").unwrap();
        assert_eq!(current.progress.value(), 6);
        assert_eq!(current.notes, "Improved focus");
    }

    #[test]
    fn summary_counts_high_performers() {
        let mut roster = Roster::default();
        assert!(roster.summary().is_none());

        roster.save(student("Avery Lee", 7));
        roster.save(student("Jules Moreno", 4));
        roster.save(student("Kiara Patel", 10));

        let summary = roster.summary().unwrap();
        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.high_performers, 2);
        assert!((summary.avg_progress - 7.0).abs() < 0.001);
    }

    #[test]
    fn progress_outside_range_is_rejected() {
        assert!(ProgressScore::new(0).is_err());
        assert!(ProgressScore::new(11).is_err());
        assert_eq!(ProgressScore::new(1).unwrap().value(), 1);
        assert_eq!(ProgressScore::new(10).unwrap().value(), 10);
    }

    #[test]
    fn imports_roster_csv() {
        let data = "\
name,disability,goals,progress,accommodations,notes
Avery Lee,Learning Disability,Read 90 wpm,8,Extended time,Strong in lab
Jules Moreno,ADHD,Stay on task 20 min,3,Movement breaks,
Avery Lee,Learning Disability,Read 100 wpm,9,Extended time,Updated
";
        let mut roster = Roster::default();

        let imported = roster.import_csv(data.as_bytes(), at(10, 15)).unwrap();

        assert_eq!(imported, 3);
        assert_eq!(roster.len(), 2);
        let avery = roster.students().get("Avery Lee").unwrap();
        assert_eq!(avery.progress.value(), 9);
        assert_eq!(avery.goals, "Read 100 wpm");
        assert_eq!(avery.last_update, at(10, 15));
        assert_eq!(
            roster.students().get("Jules Moreno").unwrap().disability,
            DisabilityCategory::Adhd
        );
    }

    #[test]
    fn import_rejects_out_of_range_progress() {
        let data = "name,disability,goals,progress,accommodations,notes\nKiara Patel,Autism,,12,,\n";
        let mut roster = Roster::default();

        let err = roster.import_csv(data.as_bytes(), at(10, 15)).unwrap_err();

        assert!(err.to_string().contains("row 1"));
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn bad_row_leaves_roster_unchanged() {
        let data = "\
name,disability,goals,progress,accommodations,notes
Avery Lee,Autism,,8,,
Kiara Patel,Autism,,12,,
";
        let mut roster = Roster::default();
        roster.save(student("Jules Moreno", 4));

        let err = roster.import_csv(data.as_bytes(), at(10, 15)).unwrap_err();

        assert!(err.to_string().contains("row 2"));
        assert_eq!(roster.len(), 1);
        assert!(roster.students().get("Avery Lee").is_none());

        let mut empty = Roster::default();
        assert!(empty.import_csv(data.as_bytes(), at(10, 15)).is_err());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn library_ids_stay_unique_within_a_minute() {
        let mut library = PresentationLibrary::default();

        let first = library
            .add(PresentationKind::ParentConference, "A".to_string(), at(14, 5))
            .id
            .clone();
        let second = library
            .add(PresentationKind::ParentConference, "B".to_string(), at(14, 5))
            .id
            .clone();
        let third = library
            .add(PresentationKind::ParentConference, "C".to_string(), at(14, 5))
            .id
            .clone();

        assert_eq!(first, "Parent Conference_20260202_1405");
        assert_eq!(second, "Parent Conference_20260202_1405-2");
        assert_eq!(third, "Parent Conference_20260202_1405-3");
        assert_eq!(library.len(), 3);
        assert_eq!(library.get(&first).unwrap().content, "A");
    }
}
