//! Interactive session: plain lines go to the chat handler, slash commands
//! drive the document tools and the roster.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use tracing::warn;

use crate::assistant::Assistant;
use crate::llm::CompletionClient;
use crate::models::{
    CourseLevel, DisabilityCategory, PresentationKind, ProgressScore, ProjectComplexity,
    StudentRecord,
};
use crate::report;
use crate::session::{Session, GREETING};

const HELP: &str = "\
Type a question to chat, or use a command:
  /iep-template                 comprehensive IEP template
  /smart-goals                  example SMART IEP goals
  /curriculum [level]           mechatronics course curriculum
  /projects [complexity]        mechatronics project ideas
  /presentation [kind]          create and save a presentation
  /library                      list saved presentations
  /show <id>                    show a full presentation
  /student                      add or update a student
  /import <csv>                 load students from a CSV file
  /students                     roster and progress metrics
  /analysis                     program analysis over the roster
  /pd-plan                      professional development plan
  /history                      chat transcript
  /stats                        session stats
  /help                         this message
  /quit                         end the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Chat(String),
    IepTemplate,
    SmartGoals,
    Curriculum(CourseLevel),
    Projects(ProjectComplexity),
    Presentation(PresentationKind),
    Library,
    Show(String),
    Student,
    Import(PathBuf),
    Students,
    Analysis,
    PdPlan,
    History,
    Stats,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "iep-template" => Command::IepTemplate,
        "smart-goals" => Command::SmartGoals,
        "curriculum" => Command::Curriculum(choice(arg, CourseLevel::Introductory)?),
        "projects" => Command::Projects(choice(arg, ProjectComplexity::Beginner)?),
        "presentation" => Command::Presentation(choice(arg, PresentationKind::IepTeamMeeting)?),
        "library" => Command::Library,
        "show" if !arg.is_empty() => Command::Show(arg.to_string()),
        "show" => anyhow::bail!("usage: /show <id>"),
        "student" => Command::Student,
        "import" if !arg.is_empty() => Command::Import(PathBuf::from(arg)),
        "import" => anyhow::bail!("usage: /import <csv>"),
        "students" => Command::Students,
        "analysis" => Command::Analysis,
        "pd-plan" => Command::PdPlan,
        "history" => Command::History,
        "stats" => Command::Stats,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => anyhow::bail!("unknown command /{} (try /help)", other),
    };

    Ok(command)
}

fn choice<T: ValueEnum>(arg: &str, default: T) -> anyhow::Result<T> {
    if arg.is_empty() {
        return Ok(default);
    }
    T::from_str(arg, true).map_err(|_| anyhow!("'{}' is not one of: {}", arg, choices::<T>()))
}

fn choices<T: ValueEnum>() -> String {
    T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct Repl<'a, C> {
    pub assistant: &'a Assistant<C>,
    pub model: String,
    pub online: bool,
}

impl<C: CompletionClient> Repl<'_, C> {
    pub async fn run<R: BufRead, W: Write>(
        &self,
        session: &mut Session,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        writeln!(output, "{}", GREETING)?;
        writeln!(output, "(type /help for commands)")?;

        loop {
            write!(output, "\n> ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            if let Err(e) = self.execute(command, session, input, output).await {
                warn!(error = %e, "command failed");
                writeln!(output, "Error: {:#}", e)?;
            }
        }

        Ok(())
    }

    async fn execute<R: BufRead, W: Write>(
        &self,
        command: Command,
        session: &mut Session,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        let assistant = self.assistant;

        match command {
            Command::Empty | Command::Quit => {}
            Command::Chat(prompt) => {
                let reply = assistant.chat(session, &prompt).await;
                writeln!(output, "{}", reply)?;
            }
            Command::IepTemplate => {
                writeln!(output, "### Complete IEP Template")?;
                writeln!(output, "{}", assistant.iep_template().await)?;
            }
            Command::SmartGoals => {
                writeln!(output, "### SMART IEP Goals Examples")?;
                writeln!(output, "{}", assistant.smart_goals().await)?;
            }
            Command::Curriculum(level) => {
                writeln!(output, "### Complete Curriculum Design ({})", level.label())?;
                writeln!(output, "{}", assistant.curriculum(level).await)?;
            }
            Command::Projects(complexity) => {
                writeln!(output, "### Detailed Project Ideas ({})", complexity.label())?;
                writeln!(output, "{}", assistant.project_ideas(complexity).await)?;
            }
            Command::Presentation(kind) => {
                let presentation = assistant.create_presentation(session, kind).await;
                writeln!(output, "### Professional Presentation")?;
                writeln!(output, "{}", presentation.content)?;
                writeln!(output, "Presentation saved to your library as '{}'.", presentation.id)?;
            }
            Command::Library => {
                write!(output, "{}", report::build_library(&session.library))?;
            }
            Command::Show(id) => match session.library.get(&id) {
                Some(presentation) => {
                    write!(output, "{}", report::build_presentation(presentation))?
                }
                None => writeln!(output, "No presentation with id '{}'.", id)?,
            },
            Command::Student => {
                if let Some(record) = read_student(input, output, Local::now().naive_local())? {
                    let name = record.name.clone();
                    assistant.save_student(session, record);
                    writeln!(output, "Data saved for {}!", name)?;
                }
            }
            Command::Import(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                let imported = session
                    .roster
                    .import_csv(file, Local::now().naive_local())?;
                writeln!(output, "Imported {} students from {}.", imported, path.display())?;
            }
            Command::Students => {
                write!(output, "{}", report::build_roster(&session.roster))?;
            }
            Command::Analysis => match assistant.program_analysis(session).await? {
                Some(analysis) => {
                    writeln!(output, "### Comprehensive Program Analysis")?;
                    writeln!(output, "{}", analysis)?;
                }
                None => writeln!(output, "Add at least one student before running an analysis.")?,
            },
            Command::PdPlan => {
                writeln!(output, "### Professional Development Plan")?;
                writeln!(output, "{}", assistant.pd_plan().await)?;
            }
            Command::History => {
                write!(output, "{}", report::build_transcript(session.history.messages()))?;
            }
            Command::Stats => {
                let stats = session.stats();
                write!(output, "{}", report::build_stats(&stats, &self.model, self.online))?;
            }
            Command::Help => writeln!(output, "{}", HELP)?,
        }

        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;
    let line = read_line(input)?.context("input ended while entering student data")?;
    Ok(line.trim().to_string())
}

/// Prompts for each field. An empty name cancels the entry.
fn read_student<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    now: NaiveDateTime,
) -> anyhow::Result<Option<StudentRecord>> {
    let name = ask_field(input, output, "Student Name")?;
    if name.is_empty() {
        writeln!(output, "No name given; nothing saved.")?;
        return Ok(None);
    }

    let disability_label = format!(
        "Primary Disability [{}] (default autism)",
        choices::<DisabilityCategory>()
    );
    let disability = choice(
        &ask_field(input, output, &disability_label)?,
        DisabilityCategory::Autism,
    )?;
    let goals = ask_field(input, output, "Current IEP Goals")?;

    let progress_label = format!(
        "Overall Progress ({}-{}, default {})",
        ProgressScore::MIN,
        ProgressScore::MAX,
        ProgressScore::DEFAULT.value()
    );
    let progress_raw = ask_field(input, output, &progress_label)?;
    let progress = if progress_raw.is_empty() {
        ProgressScore::DEFAULT
    } else {
        let value: i64 = progress_raw
            .parse()
            .with_context(|| format!("'{}' is not a whole number", progress_raw))?;
        ProgressScore::new(value)?
    };

    let accommodations = ask_field(input, output, "Current Accommodations")?;
    let notes = ask_field(input, output, "Progress Notes")?;

    Ok(Some(StudentRecord {
        name,
        disability,
        goals,
        progress,
        accommodations,
        notes,
        last_update: now,
    }))
}
