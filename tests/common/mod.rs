// tests/common/mod.rs
//
// Shared test doubles: an in-memory QuizStore (the real store is an external
// collaborator), scripted providers, and a small PDF fixture builder.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use quizforge::config::Config;
use quizforge::error::AppError;
use quizforge::jobs::{JobContext, Scheduler};
use quizforge::lifecycle::QuizStatus;
use quizforge::models::creator::{Creator, Role};
use quizforge::models::question::{Question, QuestionDraft};
use quizforge::models::quiz::Quiz;
use quizforge::providers::{Provider, ProviderChain, ProviderError};
use quizforge::store::{NewQuiz, QuizStore};

// --- In-memory store ---

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    quizzes: HashMap<i64, Quiz>,
    questions: Vec<Question>,
    next_quiz_id: i64,
    next_question_id: i64,
}

impl MemoryStore {
    pub fn quiz_count(&self) -> usize {
        self.inner.lock().unwrap().quizzes.len()
    }

    pub fn question_count(&self) -> usize {
        self.inner.lock().unwrap().questions.len()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_quiz(&self, new: NewQuiz) -> Result<Quiz, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_quiz_id += 1;
        let quiz = Quiz {
            id: inner.next_quiz_id,
            creator_id: new.creator_id,
            title: new.title,
            topic: new.topic,
            description: new.description,
            difficulty: new.difficulty,
            status: new.status,
            created_at: Some(chrono::Utc::now()),
        };
        inner.quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn quiz_by_id(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        Ok(self.inner.lock().unwrap().quizzes.get(&id).cloned())
    }

    async fn set_quiz_status(&self, id: i64, status: QuizStatus) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.quizzes.get_mut(&id) {
            Some(quiz) => {
                quiz.status = status;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("quiz {} not found", id))),
        }
    }

    async fn insert_question(
        &self,
        quiz_id: i64,
        draft: &QuestionDraft,
        ai_generated: bool,
    ) -> Result<Question, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_question_id += 1;
        let question = Question {
            id: inner.next_question_id,
            quiz_id,
            text: draft.text.clone(),
            option_a: draft.option_a.clone(),
            option_b: draft.option_b.clone(),
            option_c: draft.option_c.clone(),
            option_d: draft.option_d.clone(),
            correct_option: draft.correct_option,
            explanation: draft.explanation.clone(),
            ai_generated,
            created_at: Some(chrono::Utc::now()),
        };
        inner.questions.push(question.clone());
        Ok(question)
    }

    async fn questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn quizzes_by_creator(&self, creator_id: i64) -> Result<Vec<Quiz>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut quizzes: Vec<Quiz> = inner
            .quizzes
            .values()
            .filter(|q| q.creator_id == creator_id)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(quizzes)
    }

    async fn recent_by_status(
        &self,
        status: QuizStatus,
        limit: i64,
    ) -> Result<Vec<Quiz>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut quizzes: Vec<Quiz> = inner
            .quizzes
            .values()
            .filter(|q| q.status == status)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| b.id.cmp(&a.id));
        quizzes.truncate(limit as usize);
        Ok(quizzes)
    }
}

// --- Scripted providers ---

/// Always answers with the same canned text.
pub struct StaticProvider(pub String);

#[async_trait]
impl Provider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn generate(
        &self,
        _system: &str,
        _user: &str,
        _model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Always fails, standing in for a primary provider that is down.
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(
        &self,
        _system: &str,
        _user: &str,
        _model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Api("scripted failure".to_string()))
    }
}

/// Panics mid-call; exercises the scheduler's panic containment.
pub struct PanickingProvider;

#[async_trait]
impl Provider for PanickingProvider {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn generate(
        &self,
        _system: &str,
        _user: &str,
        _model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        panic!("scripted panic");
    }
}

// --- Builders ---

pub fn teacher(id: i64) -> Creator {
    Creator {
        id,
        role: Role::Teacher,
    }
}

pub fn student(id: i64) -> Creator {
    Creator {
        id,
        role: Role::Student,
    }
}

pub fn test_config(uploads_root: &Path) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        uploads_root: uploads_root.to_string_lossy().into_owned(),
        gemini_api_key: None,
        gemini_model: "gemini-1.5-flash".to_string(),
        provider_timeout_secs: 5,
        ollama_host: "http://localhost:11434".to_string(),
        ollama_model: "mistral".to_string(),
        use_ollama_fallback: false,
        generation_workers: 2,
        default_question_count: 5,
        rebuild_question_count: 10,
        rust_log: "error".to_string(),
        log_dir: None,
    }
}

pub fn job_context(store: &Arc<MemoryStore>, providers: Vec<Arc<dyn Provider>>) -> JobContext {
    let store: Arc<dyn QuizStore> = store.clone();
    JobContext::new(store, Arc::new(ProviderChain::new(providers)))
}

pub fn start_scheduler(store: &Arc<MemoryStore>, providers: Vec<Arc<dyn Provider>>) -> Scheduler {
    Scheduler::start(job_context(store, providers), 2)
}

/// Model output that parses into two valid questions.
pub fn valid_questions_json() -> String {
    r#"[
        {"text":"What is 2+2?","option_a":"3","option_b":"4","option_c":"5","option_d":"6",
         "correct_option":"b","explanation":"Basic arithmetic."},
        {"text":"Capital of France?","option_a":"Paris","option_b":"Rome","option_c":"Berlin","option_d":"Madrid",
         "correct_option":"a","explanation":""}
    ]"#
    .to_string()
}

/// Poll the store until the quiz leaves `generating` (or give up).
pub async fn wait_for_terminal(store: &Arc<MemoryStore>, quiz_id: i64) -> QuizStatus {
    for _ in 0..200 {
        let status = store
            .quiz_by_id(quiz_id)
            .await
            .unwrap()
            .expect("quiz disappeared while waiting")
            .status;
        if status != QuizStatus::Generating {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("quiz {} never reached a terminal status", quiz_id);
}

/// Write a minimal one-page PDF containing `text`.
pub fn write_sample_pdf(path: &Path, text: &str) {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 36.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// An uploaded file wrapping a valid sample PDF.
pub fn pdf_upload(name: &str, text: &str) -> quizforge::staging::UploadedFile {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_sample_pdf(&path, text);
    quizforge::staging::UploadedFile {
        name: name.to_string(),
        data: std::fs::read(&path).unwrap(),
    }
}
