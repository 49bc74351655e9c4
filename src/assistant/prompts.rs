//! Prompt texts and response schemas for the assistant operations.
//!
//! Schemas use the uppercase type names the generative API expects
//! (`OBJECT`, `STRING`, `NUMBER`, `ARRAY`).

use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::models::{ContractDocument, Contractor, Task, WritingKind};

/// System instruction for the plant-wide chat assistant.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "\
Вы — корпоративный ИИ-ассистент сотрудников целлюлозного завода ООО «РК-ГРАНД».
Помогайте сотрудникам с рабочими вопросами.

Область компетенций:
1. Технология варки целлюлозы и эксплуатация выпарных станций.
2. Промышленная безопасность и охрана труда на химическом производстве.
3. Инженерные расчеты и управление проектами модернизации.
4. Подготовка официальных документов, актов и отчетов.
5. Общие вопросы сотрудников: кадры, график работы, внутренние правила.
6. Разбор присланных изображений, схем, графиков и документов.

Отвечайте профессионально, точно и кратко.
Если прислан файл, разберите его содержимое и отвечайте с опорой на него.
Если нужных данных завода у вас нет, подскажите, в какой отдел обратиться: технический, кадровый или ИТ.";

/// Prompt used when the user sends attachments without text.
pub const ATTACHMENTS_ONLY_PROMPT: &str = "Проанализируй прикрепленные файлы";

/// History placeholder for a file message that carried no text.
pub const FILE_PLACEHOLDER: &str = "[Файл]";

/// Days ahead of `today` within which a pass counts as expiring soon.
pub const PASS_EXPIRY_WARNING_DAYS: u32 = 7;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Contractor delivery-risk prompt.
pub fn project_prediction(contractor: &Contractor) -> String {
    let advance_amount = contractor
        .advance
        .amount
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "0".to_string());

    format!(
        "Evaluate the delivery risk of a contractor working at the RK-GRAND pulp mill.\n\
         Contractor: {name}\n\
         Project: {object}\n\
         Progress: {progress}%\n\
         Advance paid: {paid}\n\
         Advance amount: {advance_amount}\n\
         Documents on file: {documents}\n\
         Workers on site: {workers}\n\
         Vehicles on site: {vehicles}\n\n\
         Predict whether the project will finish on schedule, taking typical industrial \
         construction delays into account. If a delay is likely, recommend a fine and \
         explain the reason. Answer in JSON.",
        name = contractor.name,
        object = contractor.object,
        progress = contractor.progress,
        paid = yes_no(contractor.advance.paid),
        documents = contractor.documents.len(),
        workers = contractor.workers.len(),
        vehicles = contractor.transport.len(),
    )
}

/// Schema for [`crate::models::RiskPrediction`].
pub fn project_prediction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "status": { "type": "STRING", "description": "ON_TIME, DELAYED or RISK" },
            "predictionText": { "type": "STRING" },
            "delayDays": { "type": "NUMBER" },
            "fineRecommendation": { "type": "STRING" },
            "fineReason": { "type": "STRING" }
        },
        "required": ["status", "predictionText", "delayDays", "fineRecommendation", "fineReason"]
    })
}

/// Access-pass audit prompt, evaluated against `today`.
pub fn pass_security_audit(contractor: &Contractor, today: NaiveDate) -> String {
    let workers = contractor
        .workers
        .iter()
        .map(|w| format!("{} (Pass: {}, Exp: {})", w.full_name, w.pass_number, w.expiry_date))
        .collect::<Vec<_>>()
        .join("; ");
    let transport = contractor
        .transport
        .iter()
        .map(|v| format!("{} {} (Exp: {})", v.model, v.plate, v.pass_expiry))
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "You audit site access at the RK-GRAND pulp mill. Today is {today}.\n\n\
         Review the access passes of contractor \"{name}\":\n\
         Workers: [{workers}]\n\
         Transport: [{transport}]\n\n\
         1. List every expired pass (EXP) and every pass expiring within the next \
         {PASS_EXPIRY_WARNING_DAYS} days (SOON).\n\
         2. Assess how refusing entry to these people or vehicles would affect the project.\n\
         3. Recommend immediate actions, for example \"Deny entry to [Name] from [Date]\" \
         or \"Urgent renewal for [Plate]\".\n\n\
         Write a short professional report in Russian and highlight critical names and plates.",
        today = today.format("%Y-%m-%d"),
        name = contractor.name,
    )
}

/// Document audit prompt.
pub fn document_analysis(doc: &ContractDocument, contractor: &Contractor) -> String {
    format!(
        "Act as a document auditor for the RK-GRAND pulp mill. Review the document \
         metadata against the project state.\n\
         Document: {doc_name} (Type: {doc_type}, Date: {date})\n\
         Contractor: {name}\n\
         Project: {object}\n\
         Progress: {progress}%\n\
         Advance paid: {paid}\n\n\
         1. Extract the key date and total amount, if any.\n\
         2. Assign a processing status such as \"Verified\", \"Signature Required\" or \"Disputed\".\n\
         3. Point out one or two discrepancies with the project state.\n\
         4. Summarize the findings in one sentence.\n\n\
         Answer strictly with a JSON object matching the schema.",
        doc_name = doc.name,
        doc_type = doc.doc_type,
        date = doc.date,
        name = contractor.name,
        object = contractor.object,
        progress = contractor.progress,
        paid = contractor.advance.paid,
    )
}

/// Schema for [`crate::models::DocumentAnalysis`].
pub fn document_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "extractedDate": { "type": "STRING" },
            "extractedAmount": { "type": "STRING" },
            "status": { "type": "STRING" },
            "discrepancies": { "type": "ARRAY", "items": { "type": "STRING" } },
            "summary": { "type": "STRING" }
        },
        "required": ["extractedDate", "extractedAmount", "status", "discrepancies", "summary"]
    })
}

/// Drafting-help prompt for task descriptions and comments.
pub fn writing_suggestion(kind: WritingKind, context: &str, current_text: &str) -> String {
    let goal = match kind {
        WritingKind::Description => "write a clear task description",
        WritingKind::Comment => "write a professional comment",
    };

    format!(
        "You assist users of the RK-GRAND pulp mill management system. Help the user {goal}.\n\n\
         Context (task title or discussion so far): \"{context}\"\n\
         Current draft: \"{current_text}\"\n\n\
         - If the draft is empty, propose a professional opening based on the context.\n\
         - Otherwise improve the draft or finish the thought.\n\
         - Stay concise, formal and relevant to an industrial pulp mill.\n\
         - Reply with the suggested text only."
    )
}

/// Task review prompt; `all_tasks` may include `task` itself.
pub fn task_analysis(task: &Task, all_tasks: &[Task]) -> String {
    let others = all_tasks
        .iter()
        .filter(|t| t.id != task.id)
        .map(|t| t.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "As an industrial project manager at the RK-GRAND pulp mill, review this task:\n\
         Title: \"{title}\"\n\
         Description: \"{description}\"\n\n\
         Other tasks in the system: [{others}]\n\n\
         1. Suggest two or three concrete improvements that make the description actionable for plant workers.\n\
         2. List existing tasks that duplicate or closely resemble it.\n\
         3. Estimate the effort in hours.\n\
         4. Rate the complexity as LOW, MEDIUM or HIGH.\n\n\
         Answer strictly with a JSON object matching the schema.",
        title = task.title,
        description = task.description,
    )
}

/// Schema for [`crate::models::TaskAnalysis`].
pub fn task_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "improvements": { "type": "STRING", "description": "Suggested improvements to the description" },
            "duplicates": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Titles of similar tasks"
            },
            "estimatedHours": { "type": "NUMBER", "description": "Estimated effort in hours" },
            "complexity": { "type": "STRING", "description": "LOW, MEDIUM or HIGH" }
        },
        "required": ["improvements", "duplicates", "estimatedHours", "complexity"]
    })
}
