use crate::domain::model::{AnalysisReport, SelectedFile};
use crate::utils::error::Result;
use crate::utils::format::Locale;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn locale(&self) -> Locale;
}

/// 外部分析服務：上傳檔案並取回分析結果
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisReport>;
}
