use std::fmt::Write;

use crate::models::{ChatMessage, Presentation, Role, SessionStats, StudentRecord, TIMESTAMP_FORMAT};
use crate::session::{PresentationLibrary, Roster};

const PREVIEW_CHARS: usize = 500;

pub fn preview(content: &str) -> String {
    let mut output: String = content.chars().take(PREVIEW_CHARS).collect();
    output.push_str("...");
    output
}

pub fn build_roster(roster: &Roster) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Current Students");

    let Some(summary) = roster.summary() else {
        let _ = writeln!(output, "No students tracked in this session.");
        return output;
    };

    let _ = writeln!(output, "- Total Students: {}", summary.total_students);
    let _ = writeln!(output, "- Avg Progress: {:.1}/10", summary.avg_progress);
    let _ = writeln!(output, "- High Performers: {}", summary.high_performers);

    for record in roster.students().values() {
        let _ = writeln!(output);
        write_student(&mut output, record);
    }

    output
}

fn write_student(output: &mut String, record: &StudentRecord) {
    let _ = writeln!(
        output,
        "### {} - Progress: {}/10",
        record.name,
        record.progress.value()
    );
    let _ = writeln!(output, "**Disability:** {}", record.disability.label());
    let _ = writeln!(output, "**Goals:** {}", record.goals);
    let _ = writeln!(output, "**Accommodations:** {}", record.accommodations);
    let _ = writeln!(output, "**Notes:** {}", record.notes);
    let _ = writeln!(
        output,
        "**Last Updated:** {}",
        record.last_update.format(TIMESTAMP_FORMAT)
    );
}

pub fn build_library(library: &PresentationLibrary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Presentation Library");

    if library.is_empty() {
        let _ = writeln!(output, "No presentations created in this session.");
        return output;
    }

    for presentation in library.presentations() {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "### {} - {} (id: {})",
            presentation.kind.label(),
            presentation.created.format(TIMESTAMP_FORMAT),
            presentation.id
        );
        let _ = writeln!(output, "{}", preview(&presentation.content));
    }

    output
}

pub fn build_presentation(presentation: &Presentation) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "### Full Presentation Content:");
    let _ = writeln!(output, "{}", presentation.content);
    output
}

pub fn build_transcript(messages: &[ChatMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let speaker = match message.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        let _ = writeln!(output, "**{}:** {}", speaker, message.content);
        let _ = writeln!(output);
    }
    output
}

pub fn build_stats(stats: &SessionStats, model: &str, connected: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Session Stats");
    let _ = writeln!(output, "- Messages: {}", stats.messages);
    let _ = writeln!(output, "- Students Tracked: {}", stats.students);
    let _ = writeln!(output, "- Presentations Created: {}", stats.presentations);
    let _ = writeln!(output, "- AI Model: {}", model);
    let _ = writeln!(
        output,
        "- Status: {}",
        if connected { "API key configured" } else { "offline answers only" }
    );
    output
}
