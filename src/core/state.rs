use crate::domain::model::{AnalysisReport, ResultSets, SelectedFile};
use crate::utils::error::CopilotError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Status { code: u16 },
    Decode,
    Other,
}

/// 上傳失敗原因，可直接顯示給使用者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReason {
    pub fn from_error(err: &CopilotError) -> Self {
        let kind = match err {
            CopilotError::TransportError(_) => FailureKind::Transport,
            CopilotError::ServiceStatusError { status } => FailureKind::Status { code: *status },
            CopilotError::DecodeError { .. } | CopilotError::SerializationError(_) => {
                FailureKind::Decode
            }
            _ => FailureKind::Other,
        };
        Self {
            kind,
            message: err.user_friendly_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    InFlight {
        upload_id: u64,
        file_name: String,
    },
    Succeeded {
        upload_id: u64,
        file_name: String,
        completed_at: DateTime<Utc>,
    },
    Failed {
        upload_id: u64,
        file_name: String,
        reason: FailureReason,
    },
}

impl UploadPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadPhase::InFlight { .. })
    }
}

#[derive(Debug, Clone)]
pub enum UploadEvent {
    FileSelected(SelectedFile),
    UploadStarted {
        upload_id: u64,
    },
    UploadSucceeded {
        upload_id: u64,
        report: AnalysisReport,
        completed_at: DateTime<Utc>,
    },
    UploadFailed {
        upload_id: u64,
        reason: FailureReason,
    },
}

/// 儀表板完整狀態。每次轉換都產生新的狀態值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    selection: Option<SelectedFile>,
    phase: UploadPhase,
    results: ResultSets,
}

impl DashboardState {
    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn results(&self) -> &ResultSets {
        &self.results
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// 有選取檔案且沒有進行中的上傳時才能觸發
    pub fn trigger_enabled(&self) -> bool {
        self.selection.is_some() && !self.is_in_flight()
    }

    fn in_flight_file(&self, upload_id: u64) -> Option<String> {
        match &self.phase {
            UploadPhase::InFlight {
                upload_id: current,
                file_name,
            } if *current == upload_id => Some(file_name.clone()),
            _ => None,
        }
    }

    pub fn apply(self, event: UploadEvent) -> Self {
        match event {
            UploadEvent::FileSelected(file) => Self {
                selection: Some(file),
                ..self
            },
            UploadEvent::UploadStarted { upload_id } => {
                if !self.trigger_enabled() {
                    return self;
                }
                let file_name = self
                    .selection
                    .as_ref()
                    .map(|f| f.name().to_string())
                    .unwrap_or_default();
                Self {
                    phase: UploadPhase::InFlight {
                        upload_id,
                        file_name,
                    },
                    ..self
                }
            }
            UploadEvent::UploadSucceeded {
                upload_id,
                report,
                completed_at,
            } => match self.in_flight_file(upload_id) {
                Some(file_name) => Self {
                    phase: UploadPhase::Succeeded {
                        upload_id,
                        file_name,
                        completed_at,
                    },
                    results: ResultSets::from(report),
                    ..self
                },
                None => self,
            },
            UploadEvent::UploadFailed { upload_id, reason } => {
                match self.in_flight_file(upload_id) {
                    Some(file_name) => Self {
                        phase: UploadPhase::Failed {
                            upload_id,
                            file_name,
                            reason,
                        },
                        ..self
                    },
                    None => self,
                }
            }
        }
    }
}
