use crate::core::{AnalysisReport, AnalysisService, ConfigProvider, SelectedFile};
use crate::utils::error::{CopilotError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// 上傳表單中唯一欄位的名稱
pub const FILE_FIELD: &str = "file";

pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// 依回應結構解碼；缺少必要集合時回傳 DecodeError
pub fn decode_report(body: &str) -> Result<AnalysisReport> {
    serde_json::from_str(body).map_err(|e| CopilotError::DecodeError {
        message: e.to_string(),
    })
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisReport> {
        let part = Part::bytes(file.bytes().to_vec()).file_name(file.name().to_string());
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(
            "Making upload request to: {} ({} bytes)",
            self.endpoint,
            file.len()
        );
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Analysis response status: {}", status);

        // 錯誤回應的內容不解析
        if !status.is_success() {
            return Err(CopilotError::ServiceStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_report(&body)
    }
}
