//! The fallback-guarded assistant facade.
//!
//! Every operation here is infallible from the caller's point of view: a
//! failed request or an unparseable answer is logged and replaced by a fixed
//! user-facing fallback.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ChatMessage, ChatRole, ContractDocument, Contractor, DocumentAnalysis, RiskPrediction, Task,
    TaskAnalysis, WritingKind,
};

use super::prompts;
use super::request::{AiRequest, Attachment, Content, ModelTier, Part, Role};
use super::service::AiService;

/// Reply used when the model answers chat with empty text.
pub const EMPTY_CHAT_REPLY: &str =
    "Извините, я не смог сформировать ответ. Попробуйте перефразировать вопрос.";

/// Reply used when a chat request fails.
pub const CHAT_ERROR_REPLY: &str = "Произошла техническая ошибка при анализе данных. Проверьте размер файлов и тип (поддерживаются изображения и PDF).";

/// Report used when the pass audit fails.
pub const PASS_AUDIT_ERROR_REPLY: &str = "Ошибка при анализе пропусков.";

/// Text used when a writing suggestion fails.
pub const WRITING_ERROR_REPLY: &str = "Не удалось получить подсказку.";

/// Dashboard-facing AI operations over an [`AiService`].
#[derive(Clone)]
pub struct Assistant {
    service: Arc<dyn AiService>,
    chat_temperature: f32,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("chat_temperature", &self.chat_temperature)
            .finish_non_exhaustive()
    }
}

impl Assistant {
    /// Creates an assistant over the given service.
    pub fn new(service: Arc<dyn AiService>, chat_temperature: f32) -> Self {
        Self {
            service,
            chat_temperature,
        }
    }

    /// Answers a chat prompt in the context of the conversation so far.
    ///
    /// History is sent as text only; attachments ride on the current turn.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        attachments: &[Attachment],
    ) -> String {
        let request = self.chat_request(history, prompt, attachments);

        match self.service.generate(&request).await {
            Ok(reply) if reply.trim().is_empty() => EMPTY_CHAT_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                CHAT_ERROR_REPLY.to_string()
            }
        }
    }

    fn chat_request(&self, history: &[ChatMessage], prompt: &str, attachments: &[Attachment]) -> AiRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|message| {
                let text = if message.text.is_empty() && message.is_file {
                    prompts::FILE_PLACEHOLDER.to_string()
                } else {
                    message.text.clone()
                };
                Content {
                    role: match message.role {
                        ChatRole::User => Role::User,
                        ChatRole::Assistant => Role::Model,
                    },
                    parts: vec![Part::Text(text)],
                }
            })
            .collect();

        let prompt = if prompt.is_empty() {
            prompts::ATTACHMENTS_ONLY_PROMPT
        } else {
            prompt
        };
        let mut parts = vec![Part::Text(prompt.to_string())];
        parts.extend(attachments.iter().cloned().map(Part::Inline));
        contents.push(Content {
            role: Role::User,
            parts,
        });

        AiRequest {
            tier: ModelTier::Fast,
            system_instruction: Some(prompts::CHAT_SYSTEM_INSTRUCTION.to_string()),
            contents,
            temperature: Some(self.chat_temperature),
            response_schema: None,
        }
    }

    /// Predicts whether a contractor will deliver on schedule.
    pub async fn project_prediction(&self, contractor: &Contractor) -> RiskPrediction {
        let request = AiRequest::prompt(ModelTier::Pro, prompts::project_prediction(contractor))
            .with_schema(prompts::project_prediction_schema());

        self.generate_json(&request).await.unwrap_or_else(|e| {
            warn!(contractor_id = %contractor.id, error = %e, "Project prediction failed");
            RiskPrediction::unavailable()
        })
    }

    /// Writes a free-text audit of a contractor's access passes as of `today`.
    pub async fn pass_security_audit(&self, contractor: &Contractor, today: NaiveDate) -> String {
        let request = AiRequest::prompt(
            ModelTier::Fast,
            prompts::pass_security_audit(contractor, today),
        );

        match self.service.generate(&request).await {
            Ok(report) => report.trim().to_string(),
            Err(e) => {
                warn!(contractor_id = %contractor.id, error = %e, "Pass audit failed");
                PASS_AUDIT_ERROR_REPLY.to_string()
            }
        }
    }

    /// Audits a contract document against the contractor's project state.
    pub async fn document_analysis(
        &self,
        doc: &ContractDocument,
        contractor: &Contractor,
    ) -> DocumentAnalysis {
        let request = AiRequest::prompt(ModelTier::Pro, prompts::document_analysis(doc, contractor))
            .with_schema(prompts::document_analysis_schema());

        self.generate_json(&request).await.unwrap_or_else(|e| {
            warn!(document_id = %doc.id, error = %e, "Document analysis failed");
            DocumentAnalysis::unavailable()
        })
    }

    /// Suggests or improves a task description or comment.
    pub async fn writing_suggestion(&self, kind: WritingKind, context: &str, current_text: &str) -> String {
        let request = AiRequest::prompt(
            ModelTier::Fast,
            prompts::writing_suggestion(kind, context, current_text),
        );

        match self.service.generate(&request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "Writing suggestion failed");
                WRITING_ERROR_REPLY.to_string()
            }
        }
    }

    /// Reviews a task against the other tasks in the system.
    pub async fn task_analysis(&self, task: &Task, all_tasks: &[Task]) -> TaskAnalysis {
        let request = AiRequest::prompt(ModelTier::Pro, prompts::task_analysis(task, all_tasks))
            .with_schema(prompts::task_analysis_schema());

        self.generate_json(&request).await.unwrap_or_else(|e| {
            warn!(task_id = %task.id, error = %e, "Task analysis failed");
            TaskAnalysis::unavailable()
        })
    }

    async fn generate_json<T: DeserializeOwned>(&self, request: &AiRequest) -> EngineResult<T> {
        let text = self.service.generate(request).await?;
        parse_json_answer(&text)
    }
}

/// Parses a structured answer, tolerating surrounding whitespace and a
/// Markdown code fence.
fn parse_json_answer<T: DeserializeOwned>(text: &str) -> EngineResult<T> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let value: Value = serde_json::from_str(body).map_err(|e| EngineError::AiResponseParse {
        message: e.to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| EngineError::AiResponseParse {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Complexity, RiskStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns scripted answers and records every request.
    struct MockService {
        answer: Result<String, String>,
        requests: Mutex<Vec<AiRequest>>,
    }

    impl MockService {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: Err("connection refused".to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> AiRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl AiService for MockService {
        async fn generate(&self, request: &AiRequest) -> EngineResult<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.answer
                .clone()
                .map_err(|message| EngineError::AiRequest { message })
        }
    }

    fn assistant(service: Arc<MockService>) -> Assistant {
        Assistant::new(service, 0.7)
    }

    fn contractor() -> Contractor {
        serde_json::from_value(serde_json::json!({
            "id": "c_001",
            "name": "ООО СтройМонтаж",
            "object": "Выпарная станция №2",
            "progress": 45
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_chat_maps_history_and_attachments() {
        let service = MockService::answering("Это схема выпарной станции.");
        let assistant = assistant(service.clone());

        let history = vec![
            ChatMessage::user("Привет"),
            ChatMessage::assistant("Здравствуйте!"),
            ChatMessage {
                role: ChatRole::User,
                text: String::new(),
                is_file: true,
            },
        ];
        let attachment = Attachment::from_bytes("image/png", b"png");

        let reply = assistant.chat(&history, "", &[attachment.clone()]).await;
        assert_eq!(reply, "Это схема выпарной станции.");

        let request = service.last_request();
        assert_eq!(request.tier, ModelTier::Fast);
        assert_eq!(request.temperature, Some(0.7));
        assert!(request.system_instruction.is_some());
        assert_eq!(request.contents.len(), 4);
        assert_eq!(request.contents[1].role, Role::Model);
        assert_eq!(request.contents[2].parts, vec![Part::Text("[Файл]".into())]);
        assert_eq!(
            request.contents[3].parts,
            vec![
                Part::Text("Проанализируй прикрепленные файлы".into()),
                Part::Inline(attachment)
            ]
        );
    }

    #[tokio::test]
    async fn test_chat_empty_reply_uses_fallback() {
        let assistant = assistant(MockService::answering("   "));
        assert_eq!(assistant.chat(&[], "Вопрос", &[]).await, EMPTY_CHAT_REPLY);
    }

    #[tokio::test]
    async fn test_chat_error_uses_fallback() {
        let assistant = assistant(MockService::failing());
        assert_eq!(assistant.chat(&[], "Вопрос", &[]).await, CHAT_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_prediction_parses_fenced_json() {
        let answer = "```json\n{\"status\":\"DELAYED\",\"predictionText\":\"Отставание\",\"delayDays\":12,\"fineRecommendation\":\"100000\",\"fineReason\":\"Срыв сроков\"}\n```";
        let service = MockService::answering(answer);
        let prediction = assistant(service.clone())
            .project_prediction(&contractor())
            .await;

        assert_eq!(prediction.status, RiskStatus::Delayed);
        assert_eq!(prediction.delay_days, 12.0);
        let request = service.last_request();
        assert_eq!(request.tier, ModelTier::Pro);
        assert!(request.expects_json());
    }

    #[tokio::test]
    async fn test_prediction_failure_uses_fallback() {
        let prediction = assistant(MockService::failing())
            .project_prediction(&contractor())
            .await;
        assert_eq!(prediction, RiskPrediction::unavailable());
    }

    #[tokio::test]
    async fn test_malformed_json_uses_fallback() {
        let analysis = assistant(MockService::answering("not json"))
            .task_analysis(
                &Task {
                    id: "t1".into(),
                    title: "Замена насоса".into(),
                    description: String::new(),
                },
                &[],
            )
            .await;
        assert_eq!(analysis, TaskAnalysis::unavailable());
    }

    #[tokio::test]
    async fn test_task_analysis_parses_answer() {
        let answer = r#"{"improvements":"Указать модель насоса","duplicates":["Ремонт насоса"],"estimatedHours":6.5,"complexity":"HIGH"}"#;
        let analysis = assistant(MockService::answering(answer))
            .task_analysis(
                &Task {
                    id: "t1".into(),
                    title: "Замена насоса".into(),
                    description: String::new(),
                },
                &[],
            )
            .await;
        assert_eq!(analysis.complexity, Complexity::High);
        assert_eq!(analysis.duplicates, vec!["Ремонт насоса".to_string()]);
    }

    #[tokio::test]
    async fn test_document_analysis_failure_uses_fallback() {
        let doc = ContractDocument {
            id: "d_1".into(),
            name: "Акт КС-2".into(),
            doc_type: "Акт".into(),
            date: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
        };
        let analysis = assistant(MockService::failing())
            .document_analysis(&doc, &contractor())
            .await;
        assert_eq!(analysis, DocumentAnalysis::unavailable());
    }

    #[tokio::test]
    async fn test_text_operations_trim_or_fall_back() {
        let today = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();

        let ok = assistant(MockService::answering("  Отчет  \n"));
        assert_eq!(ok.pass_security_audit(&contractor(), today).await, "Отчет");
        assert_eq!(
            ok.writing_suggestion(WritingKind::Comment, "Замена насоса", "").await,
            "Отчет"
        );

        let failing = assistant(MockService::failing());
        assert_eq!(
            failing.pass_security_audit(&contractor(), today).await,
            PASS_AUDIT_ERROR_REPLY
        );
        assert_eq!(
            failing
                .writing_suggestion(WritingKind::Description, "Замена насоса", "")
                .await,
            WRITING_ERROR_REPLY
        );
    }

    #[test]
    fn test_parse_json_answer_plain_and_fenced() {
        let plain: Value = parse_json_answer(" {\"a\": 1} ").unwrap();
        let fenced: Value = parse_json_answer("```\n{\"a\": 1}\n```").unwrap();
        assert_eq!(plain, fenced);
        assert!(matches!(
            parse_json_answer::<Value>("```json"),
            Err(EngineError::AiResponseParse { .. })
        ));
    }
}
