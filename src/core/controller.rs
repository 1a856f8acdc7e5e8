use crate::core::state::{DashboardState, FailureReason, UploadEvent, UploadPhase};
use crate::core::{AnalysisReport, AnalysisService, SelectedFile};
use crate::utils::error::Result;
use chrono::Utc;

/// 一次上傳請求的憑證，持有送出當下的檔案快照
#[derive(Debug, Clone)]
pub struct UploadTicket {
    upload_id: u64,
    file: SelectedFile,
}

impl UploadTicket {
    pub fn upload_id(&self) -> u64 {
        self.upload_id
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 沒有選取檔案或已有上傳進行中，未送出任何請求
    Skipped,
    Succeeded { upload_id: u64 },
    Failed { upload_id: u64, reason: FailureReason },
    /// 完成通知與目前進行中的上傳不符
    Discarded { upload_id: u64 },
}

pub struct UploadController<A: AnalysisService> {
    service: A,
    state: DashboardState,
    next_upload_id: u64,
}

impl<A: AnalysisService> UploadController<A> {
    pub fn new(service: A) -> Self {
        Self {
            service,
            state: DashboardState::default(),
            next_upload_id: 1,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn transition(&mut self, event: UploadEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// 覆蓋目前選取的檔案；進行中的上傳不受影響
    pub fn select_file(&mut self, file: SelectedFile) {
        tracing::debug!("Selected file {} ({} bytes)", file.name(), file.len());
        self.transition(UploadEvent::FileSelected(file));
    }

    /// 同步進入 InFlight 並取得檔案快照
    pub fn begin_submit(&mut self) -> Option<UploadTicket> {
        if self.state.is_in_flight() {
            tracing::debug!("Upload already in flight, ignoring submit");
            return None;
        }
        let file = self.state.selection()?.clone();

        let upload_id = self.next_upload_id;
        self.next_upload_id += 1;
        self.transition(UploadEvent::UploadStarted { upload_id });

        tracing::info!("📤 Uploading {} (upload #{})", file.name(), upload_id);
        Some(UploadTicket { upload_id, file })
    }

    pub fn finish(&mut self, ticket: UploadTicket, outcome: Result<AnalysisReport>) -> SubmitOutcome {
        let upload_id = ticket.upload_id;
        let current = match self.state.phase() {
            UploadPhase::InFlight { upload_id: id, .. } => Some(*id),
            _ => None,
        };
        if current != Some(upload_id) {
            tracing::warn!(
                "Discarding completion of upload #{} (in flight: {:?})",
                upload_id,
                current
            );
            return SubmitOutcome::Discarded { upload_id };
        }

        match outcome {
            Ok(report) => {
                tracing::info!(
                    "✅ Upload #{} analyzed: {} suppliers, {} outliers, {} actions, {} insights",
                    upload_id,
                    report.top_suppliers.len(),
                    report.outliers.len(),
                    report.actions.len(),
                    report.dynamic_insights.len()
                );
                self.transition(UploadEvent::UploadSucceeded {
                    upload_id,
                    report,
                    completed_at: Utc::now(),
                });
                SubmitOutcome::Succeeded { upload_id }
            }
            Err(e) => {
                tracing::error!(
                    "❌ Upload failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                let reason = FailureReason::from_error(&e);
                self.transition(UploadEvent::UploadFailed {
                    upload_id,
                    reason: reason.clone(),
                });
                SubmitOutcome::Failed { upload_id, reason }
            }
        }
    }

    /// 上傳目前選取的檔案並在完成後更新結果集合
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(ticket) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        let outcome = self.service.analyze(ticket.file()).await;
        self.finish(ticket, outcome)
    }
}
