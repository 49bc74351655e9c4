//! The batch export state machine.
//!
//! `Idle → Running → Succeeded → Idle`. A run is started only from `Idle`
//! and only with a non-empty selection. Each employee is announced as
//! `Running` before its document is generated. After the last employee the
//! workflow reports `Succeeded` and returns to `Idle` once the success
//! display duration has elapsed.
//!
//! Failing items do not abort the run; they are collected in the
//! [`ExportReport`]. Cancellation is checked between items only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::timesheet::IndividualTimesheet;

use super::generator::{GeneratedDocument, SheetGenerator};

/// How long `Succeeded` stays visible before the workflow returns to `Idle`.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(4);

/// Observable state of the export workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportProgress {
    /// No export is running.
    Idle,
    /// A document is being generated.
    Running {
        /// Full name of the employee being processed.
        current: String,
        /// Zero-based position of the employee in the run.
        index: usize,
        /// Number of employees in the run.
        total: usize,
    },
    /// The run finished.
    Succeeded {
        /// Number of employees in the run.
        count: usize,
        /// Number of employees whose document failed.
        failed: usize,
    },
    /// The run was cancelled between items.
    Cancelled {
        /// Number of employees processed before cancellation.
        processed: usize,
    },
}

impl ExportProgress {
    /// Returns true while no run is active or being displayed.
    pub fn is_idle(&self) -> bool {
        matches!(self, ExportProgress::Idle)
    }

    fn is_finished(&self) -> bool {
        matches!(
            self,
            ExportProgress::Succeeded { .. } | ExportProgress::Cancelled { .. }
        )
    }
}

/// One employee whose document could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's full name.
    pub full_name: String,
    /// Why generation failed.
    pub message: String,
}

/// The outcome of one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Identifier of the run, used in logs.
    pub run_id: Uuid,
    /// Number of employees selected for the run.
    pub requested: usize,
    /// Documents generated successfully, in roster order.
    pub documents: Vec<GeneratedDocument>,
    /// Employees whose document failed, in roster order.
    pub failures: Vec<ExportFailure>,
    /// Whether the run stopped early on request.
    pub cancelled: bool,
}

impl ExportReport {
    /// Returns the number of employees processed (successfully or not).
    pub fn processed(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}

struct WorkflowInner {
    progress: watch::Sender<ExportProgress>,
    generator: Arc<dyn SheetGenerator>,
    success_display: Duration,
    cancel_requested: AtomicBool,
}

/// Runs batch exports one at a time.
///
/// Cloning is cheap; clones share the same state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use timesheet_engine::export::{ExportWorkflow, SimulatedGenerator, DEFAULT_SUCCESS_DISPLAY};
///
/// # async fn demo(sheets: Vec<timesheet_engine::timesheet::IndividualTimesheet>) {
/// let workflow = ExportWorkflow::new(Arc::new(SimulatedGenerator::default()), DEFAULT_SUCCESS_DISPLAY);
/// let mut progress = workflow.subscribe();
///
/// tokio::spawn(async move {
///     while progress.changed().await.is_ok() {
///         println!("{:?}", *progress.borrow());
///     }
/// });
///
/// let report = workflow.run(sheets).await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct ExportWorkflow {
    inner: Arc<WorkflowInner>,
}

impl std::fmt::Debug for ExportWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportWorkflow")
            .field("progress", &*self.inner.progress.borrow())
            .field("success_display", &self.inner.success_display)
            .finish()
    }
}

impl ExportWorkflow {
    /// Creates an idle workflow using the given generator.
    pub fn new(generator: Arc<dyn SheetGenerator>, success_display: Duration) -> Self {
        let (progress, _) = watch::channel(ExportProgress::Idle);
        Self {
            inner: Arc::new(WorkflowInner {
                progress,
                generator,
                success_display,
                cancel_requested: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the current state.
    pub fn progress(&self) -> ExportProgress {
        self.inner.progress.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ExportProgress> {
        self.inner.progress.subscribe()
    }

    /// Claims the workflow for a run over the given sheets.
    ///
    /// Returns `Ok(None)` without changing state when `sheets` is empty, and
    /// `ExportInProgress` when the workflow is not `Idle`. On success the
    /// first employee has already been announced as `Running`; the caller
    /// drives the run with [`ExportRun::execute`].
    pub fn start(&self, sheets: Vec<IndividualTimesheet>) -> EngineResult<Option<ExportRun>> {
        let Some(first) = sheets.first() else {
            return Ok(None);
        };

        let total = sheets.len();
        let current = first.employee.full_name.clone();
        let cancel_requested = &self.inner.cancel_requested;
        let claimed = self.inner.progress.send_if_modified(|state| {
            if !state.is_idle() {
                return false;
            }
            cancel_requested.store(false, Ordering::SeqCst);
            *state = ExportProgress::Running {
                current,
                index: 0,
                total,
            };
            true
        });

        if !claimed {
            warn!("Export rejected, workflow is busy");
            return Err(EngineError::ExportInProgress);
        }

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, employees = total, "Export started");

        Ok(Some(ExportRun {
            workflow: self.clone(),
            sheets,
            run_id,
            finished: false,
        }))
    }

    /// Starts and drives a run to completion.
    ///
    /// Returns `Ok(None)` for an empty selection.
    pub async fn run(&self, sheets: Vec<IndividualTimesheet>) -> EngineResult<Option<ExportReport>> {
        match self.start(sheets)? {
            Some(run) => Ok(Some(run.execute().await)),
            None => Ok(None),
        }
    }

    /// Asks a running export to stop before its next item.
    ///
    /// Returns false if no run is active.
    pub fn cancel(&self) -> bool {
        let progress = self.inner.progress.borrow();
        if matches!(*progress, ExportProgress::Running { .. }) {
            self.inner.cancel_requested.store(true, Ordering::SeqCst);
            info!("Export cancellation requested");
            true
        } else {
            false
        }
    }

    fn publish(&self, state: ExportProgress) {
        self.inner.progress.send_replace(state);
    }

    /// Returns to `Idle` after the display duration, unless something else
    /// already moved the state on.
    fn schedule_dismiss(&self) {
        let workflow = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(workflow.inner.success_display).await;
            workflow.inner.progress.send_if_modified(|state| {
                if state.is_finished() {
                    *state = ExportProgress::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}

/// A claimed export run.
///
/// Dropping a run before [`ExportRun::execute`] completes releases the
/// workflow back to `Idle`.
pub struct ExportRun {
    workflow: ExportWorkflow,
    sheets: Vec<IndividualTimesheet>,
    run_id: Uuid,
    finished: bool,
}

impl ExportRun {
    /// Returns the run identifier.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the number of employees in the run.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true if the run has no employees.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Generates every document in order and reports the outcome.
    pub async fn execute(mut self) -> ExportReport {
        let started = Instant::now();
        let sheets = std::mem::take(&mut self.sheets);
        let total = sheets.len();
        let inner = Arc::clone(&self.workflow.inner);

        let mut report = ExportReport {
            run_id: self.run_id,
            requested: total,
            documents: Vec::with_capacity(total),
            failures: Vec::new(),
            cancelled: false,
        };

        for (index, sheet) in sheets.iter().enumerate() {
            if inner.cancel_requested.load(Ordering::SeqCst) {
                report.cancelled = true;
                break;
            }

            if index > 0 {
                self.workflow.publish(ExportProgress::Running {
                    current: sheet.employee.full_name.clone(),
                    index,
                    total,
                });
            }

            info!(
                run_id = %self.run_id,
                employee_id = %sheet.employee.id,
                index,
                total,
                "Generating timesheet"
            );

            match inner.generator.generate(sheet).await {
                Ok(document) => report.documents.push(document),
                Err(err) => {
                    warn!(
                        run_id = %self.run_id,
                        employee_id = %sheet.employee.id,
                        error = %err,
                        "Timesheet generation failed"
                    );
                    report.failures.push(ExportFailure {
                        employee_id: sheet.employee.id.clone(),
                        full_name: sheet.employee.full_name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let final_state = if report.cancelled {
            ExportProgress::Cancelled {
                processed: report.processed(),
            }
        } else {
            ExportProgress::Succeeded {
                count: total,
                failed: report.failures.len(),
            }
        };

        info!(
            run_id = %self.run_id,
            generated = report.documents.len(),
            failed = report.failures.len(),
            cancelled = report.cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
            "Export finished"
        );

        self.workflow.publish(final_state);
        self.finished = true;
        self.workflow.schedule_dismiss();

        report
    }
}

impl Drop for ExportRun {
    fn drop(&mut self) {
        if !self.finished {
            warn!(run_id = %self.run_id, "Export run abandoned");
            self.workflow.publish(ExportProgress::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SimulatedGenerator;
    use crate::models::{AttendanceStatus, Employee, TimesheetPeriod};
    use crate::timesheet::EmployeeTotal;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn sheet(id: &str, name: &str) -> IndividualTimesheet {
        let statuses = vec![AttendanceStatus::Work; 30];
        IndividualTimesheet {
            employee: Employee::new(id, name, "Оператор"),
            period: TimesheetPeriod::new(2023, 11).unwrap(),
            totals: EmployeeTotal::from_statuses(id, statuses.clone()),
            statuses,
        }
    }

    fn abc() -> Vec<IndividualTimesheet> {
        vec![sheet("a", "Anna"), sheet("b", "Boris"), sheet("c", "Clara")]
    }

    fn simulated() -> ExportWorkflow {
        ExportWorkflow::new(
            Arc::new(SimulatedGenerator::new(Duration::from_millis(800))),
            DEFAULT_SUCCESS_DISPLAY,
        )
    }

    /// Records call order and fails for chosen ids.
    struct ScriptedGenerator {
        calls: Mutex<Vec<String>>,
        fail_for: Vec<String>,
    }

    impl ScriptedGenerator {
        fn failing(ids: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: ids.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl SheetGenerator for ScriptedGenerator {
        async fn generate(&self, sheet: &IndividualTimesheet) -> EngineResult<GeneratedDocument> {
            self.calls.lock().unwrap().push(sheet.employee.id.clone());
            if self.fail_for.contains(&sheet.employee.id) {
                return Err(EngineError::DocumentGeneration {
                    employee_id: sheet.employee.id.clone(),
                    message: "renderer crashed".to_string(),
                });
            }
            Ok(GeneratedDocument {
                employee_id: sheet.employee.id.clone(),
                file_name: format!("{}.pdf", sheet.employee.id),
                path: None,
            })
        }
    }

    async fn collect_until_finished(mut rx: watch::Receiver<ExportProgress>) -> Vec<ExportProgress> {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            let done = state.is_finished();
            seen.push(state);
            if done {
                break;
            }
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_announces_each_employee_in_order() {
        let workflow = simulated();
        let collector = tokio::spawn(collect_until_finished(workflow.subscribe()));

        let report = workflow.run(abc()).await.unwrap().unwrap();
        let seen = collector.await.unwrap();

        assert_eq!(
            seen,
            vec![
                ExportProgress::Running { current: "Anna".into(), index: 0, total: 3 },
                ExportProgress::Running { current: "Boris".into(), index: 1, total: 3 },
                ExportProgress::Running { current: "Clara".into(), index: 2, total: 3 },
                ExportProgress::Succeeded { count: 3, failed: 0 },
            ]
        );
        assert_eq!(report.requested, 3);
        assert_eq!(report.documents.len(), 3);
        assert!(report.failures.is_empty());
        assert!(!report.cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_item_takes_the_configured_latency() {
        let workflow = simulated();
        let start = tokio::time::Instant::now();
        workflow.run(abc()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_selection_is_a_no_op() {
        let workflow = simulated();
        let result = workflow.run(Vec::new()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(workflow.progress(), ExportProgress::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_while_running_is_rejected() {
        let workflow = simulated();
        let run = workflow.start(abc()).unwrap().unwrap();

        assert!(matches!(
            workflow.start(abc()),
            Err(EngineError::ExportInProgress)
        ));

        run.execute().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_auto_dismisses_to_idle() {
        let workflow = simulated();
        workflow.run(abc()).await.unwrap();
        assert_eq!(
            workflow.progress(),
            ExportProgress::Succeeded { count: 3, failed: 0 }
        );

        // Still displaying the success notification.
        assert!(matches!(
            workflow.start(abc()),
            Err(EngineError::ExportInProgress)
        ));

        tokio::time::sleep(DEFAULT_SUCCESS_DISPLAY + Duration::from_millis(10)).await;
        assert_eq!(workflow.progress(), ExportProgress::Idle);
        assert!(workflow.start(abc()).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_collected_and_run_continues() {
        let generator = Arc::new(ScriptedGenerator::failing(&["b"]));
        let workflow = ExportWorkflow::new(generator.clone(), DEFAULT_SUCCESS_DISPLAY);

        let report = workflow.run(abc()).await.unwrap().unwrap();

        assert_eq!(*generator.calls.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].employee_id, "b");
        assert!(report.failures[0].message.contains("renderer crashed"));
        assert_eq!(
            workflow.progress(),
            ExportProgress::Succeeded { count: 3, failed: 1 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_between_items() {
        let workflow = simulated();
        let run = workflow.start(abc()).unwrap().unwrap();
        let handle = tokio::spawn(run.execute());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(workflow.cancel());

        let report = handle.await.unwrap();
        assert!(report.cancelled);
        // The item in flight when cancel arrived still completes.
        assert_eq!(report.documents.len(), 1);
        assert_eq!(workflow.progress(), ExportProgress::Cancelled { processed: 1 });

        tokio::time::sleep(DEFAULT_SUCCESS_DISPLAY + Duration::from_millis(10)).await;
        assert_eq!(workflow.progress(), ExportProgress::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_without_run_returns_false() {
        let workflow = simulated();
        assert!(!workflow.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_run_releases_workflow() {
        let workflow = simulated();
        let run = workflow.start(abc()).unwrap().unwrap();
        assert_eq!(run.len(), 3);
        drop(run);
        assert_eq!(workflow.progress(), ExportProgress::Idle);
    }

    #[test]
    fn test_progress_serialization_is_tagged() {
        let json = serde_json::to_value(ExportProgress::Running {
            current: "Anna".into(),
            index: 0,
            total: 2,
        })
        .unwrap();
        assert_eq!(json["state"], "running");
        assert_eq!(json["current"], "Anna");

        let idle = serde_json::to_value(ExportProgress::Idle).unwrap();
        assert_eq!(idle["state"], "idle");
    }
}
