use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::classify::classify;
use crate::generator::ResponseGenerator;
use crate::llm::CompletionClient;
use crate::models::{
    ChatMessage, CourseLevel, Presentation, PresentationKind, ProjectComplexity, StudentRecord,
};
use crate::prompts::{self, DocumentPrompt};
use crate::session::Session;

/// One handler per user action. Handlers that touch state take the session
/// explicitly; nothing here is shared between sessions.
pub struct Assistant<C> {
    generator: ResponseGenerator<C>,
}

impl<C: CompletionClient> Assistant<C> {
    pub fn new(generator: ResponseGenerator<C>) -> Self {
        Self { generator }
    }

    #[cfg(test)]
    pub fn generator(&self) -> &ResponseGenerator<C> {
        &self.generator
    }

    pub async fn ask(&self, question: &str) -> String {
        let category = classify(question);
        info!(%category, "answering question");
        self.generator.generate(question, category).await
    }

    pub async fn chat(&self, session: &mut Session, prompt: &str) -> String {
        session.history.push(ChatMessage::user(prompt));
        let reply = self.ask(prompt).await;
        session.history.push(ChatMessage::assistant(reply.clone()));
        reply
    }

    async fn document(&self, prompt: DocumentPrompt) -> String {
        self.generator.generate(&prompt.text, prompt.category).await
    }

    pub async fn iep_template(&self) -> String {
        self.document(prompts::iep_template()).await
    }

    pub async fn smart_goals(&self) -> String {
        self.document(prompts::smart_goals()).await
    }

    pub async fn curriculum(&self, level: CourseLevel) -> String {
        self.document(prompts::curriculum(level)).await
    }

    pub async fn project_ideas(&self, complexity: ProjectComplexity) -> String {
        self.document(prompts::project_ideas(complexity)).await
    }

    pub async fn pd_plan(&self) -> String {
        self.document(prompts::pd_plan()).await
    }

    pub async fn create_presentation<'s>(
        &self,
        session: &'s mut Session,
        kind: PresentationKind,
    ) -> &'s Presentation {
        self.create_presentation_at(session, kind, Local::now().naive_local())
            .await
    }

    async fn create_presentation_at<'s>(
        &self,
        session: &'s mut Session,
        kind: PresentationKind,
        created: NaiveDateTime,
    ) -> &'s Presentation {
        let content = self.document(prompts::presentation(kind)).await;
        let presentation = session.library.add(kind, content, created);
        info!(id = %presentation.id, "presentation saved to library");
        presentation
    }

    pub fn save_student(&self, session: &mut Session, record: StudentRecord) {
        let name = record.name.clone();
        let replaced = session.roster.save(record).is_some();
        info!(student = %name, replaced, "student record saved");
    }

    /// `None` until at least one student is on the roster.
    pub async fn program_analysis(&self, session: &Session) -> anyhow::Result<Option<String>> {
        let Some(summary) = session.roster.summary() else {
            return Ok(None);
        };
        let prompt = prompts::program_analysis(&summary, session.roster.students())?;
        Ok(Some(self.document(prompt).await))
    }
}
