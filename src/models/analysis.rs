//! Structured answers returned by the AI assistant.
//!
//! Each type mirrors one JSON response schema requested from the model.
//! Field names follow the camelCase wire format the schemas declare.

use serde::{Deserialize, Serialize};

/// Project delivery outlook for a contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    /// Expected to finish on time.
    OnTime,
    /// Expected to finish late.
    Delayed,
    /// Outcome uncertain.
    Risk,
}

/// Contractor delivery prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPrediction {
    /// The predicted outlook.
    pub status: RiskStatus,
    /// Free-text explanation.
    pub prediction_text: String,
    /// Expected delay in days.
    pub delay_days: f64,
    /// Recommended fine, as free text.
    pub fine_recommendation: String,
    /// Justification for the fine.
    pub fine_reason: String,
}

impl RiskPrediction {
    /// The answer shown when no prediction could be obtained.
    pub fn unavailable() -> Self {
        Self {
            status: RiskStatus::Risk,
            prediction_text: "Не удалось получить прогноз от ИИ. Проверьте подключение.".to_string(),
            delay_days: 0.0,
            fine_recommendation: "N/A".to_string(),
            fine_reason: "N/A".to_string(),
        }
    }
}

/// Metadata scan of a contract document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    /// The key date found in the document.
    pub extracted_date: String,
    /// The total amount found in the document.
    pub extracted_amount: String,
    /// Processing status (e.g., "Verified", "Signature Required").
    pub status: String,
    /// Discrepancies with the project state.
    pub discrepancies: Vec<String>,
    /// One-sentence summary.
    pub summary: String,
}

impl DocumentAnalysis {
    /// The answer shown when the document could not be analysed.
    pub fn unavailable() -> Self {
        Self {
            extracted_date: "N/A".to_string(),
            extracted_amount: "N/A".to_string(),
            status: "Не проверен".to_string(),
            discrepancies: Vec::new(),
            summary: "Не удалось выполнить анализ документа.".to_string(),
        }
    }
}

/// Estimated task complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Complexity {
    /// Low complexity.
    Low,
    /// Medium complexity.
    Medium,
    /// High complexity.
    High,
}

/// Review of a task description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    /// Suggested improvements to the description.
    pub improvements: String,
    /// Titles of similar existing tasks.
    pub duplicates: Vec<String>,
    /// Estimated completion time in hours.
    pub estimated_hours: f64,
    /// Estimated complexity.
    pub complexity: Complexity,
}

impl TaskAnalysis {
    /// The answer shown when the task could not be analysed.
    pub fn unavailable() -> Self {
        Self {
            improvements: "Не удалось получить анализ задачи.".to_string(),
            duplicates: Vec::new(),
            estimated_hours: 0.0,
            complexity: Complexity::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_risk_prediction_from_model_json() {
        let json = r#"{
            "status": "DELAYED",
            "predictionText": "Отставание от графика монтажа",
            "delayDays": 14,
            "fineRecommendation": "0.1% в день",
            "fineReason": "Нарушение сроков"
        }"#;

        let prediction: RiskPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.status, RiskStatus::Delayed);
        assert_eq!(prediction.delay_days, 14.0);
    }

    #[test]
    fn test_deserialize_task_analysis() {
        let json = r#"{
            "improvements": "Указать номер насоса",
            "duplicates": ["Ремонт насоса Н-3"],
            "estimatedHours": 6.5,
            "complexity": "HIGH"
        }"#;

        let analysis: TaskAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.complexity, Complexity::High);
        assert_eq!(analysis.duplicates, vec!["Ремонт насоса Н-3"]);
    }

    #[test]
    fn test_document_analysis_requires_all_fields() {
        let json = r#"{"extractedDate": "2023-11-01", "status": "Verified"}"#;
        let result: Result<DocumentAnalysis, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_unavailable_prediction_is_risk() {
        let fallback = RiskPrediction::unavailable();
        assert_eq!(fallback.status, RiskStatus::Risk);
        assert_eq!(fallback.fine_reason, "N/A");
    }
}
