use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 使用者選取、尚未上傳的檔案。內容以共享方式持有，進行中的請求擁有自己的快照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// 以路徑最後一段作為檔名
    pub fn from_path_bytes(path: &str, bytes: Vec<u8>) -> Self {
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        Self::new(name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 分析服務回傳的數值欄位，可能是 JSON 數字或數字字串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberLike(pub serde_json::Value);

impl NumberLike {
    /// 可解析的有限數值；其他一律視為 `None`
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match &self.0 {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// 原樣顯示，不做分位格式化
    pub fn display_raw(&self) -> String {
        match &self.0 {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    format!("{}", v as i64)
                }
                _ => n.to_string(),
            },
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl From<f64> for NumberLike {
    fn from(value: f64) -> Self {
        Self(serde_json::json!(value))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopSupplier {
    #[serde(rename = "Supplier Name", default)]
    pub supplier_name: Option<String>,
    #[serde(rename = "Potential Savings", default)]
    pub potential_savings: Option<NumberLike>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outlier {
    #[serde(rename = "Item Name", default)]
    pub item_name: Option<String>,
    #[serde(rename = "Supplier Name", default)]
    pub supplier_name: Option<String>,
    #[serde(rename = "CY vs PY WAP USD (Fiscal)", default)]
    pub price_change: Option<NumberLike>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub action_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub savings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DynamicInsight {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub insight_text: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
}

/// 分析服務成功回應。前三個集合為必要欄位，`dynamic_insights` 缺漏時視為空。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub top_suppliers: Vec<TopSupplier>,
    pub outliers: Vec<Outlier>,
    pub actions: Vec<Action>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dynamic_insights: Vec<DynamicInsight>,
}

/// `null` 與缺漏同樣視為空集合
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 文字欄位也接受數字或布林值，轉成顯示用字串
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(NumberLike(other).display_raw()),
    })
}

/// 四個結果集合，只能整批替換
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultSets {
    pub top_suppliers: Vec<TopSupplier>,
    pub outliers: Vec<Outlier>,
    pub actions: Vec<Action>,
    pub dynamic_insights: Vec<DynamicInsight>,
}

impl ResultSets {
    pub fn is_empty(&self) -> bool {
        self.top_suppliers.is_empty()
            && self.outliers.is_empty()
            && self.actions.is_empty()
            && self.dynamic_insights.is_empty()
    }
}

impl From<AnalysisReport> for ResultSets {
    fn from(report: AnalysisReport) -> Self {
        Self {
            top_suppliers: report.top_suppliers,
            outliers: report.outliers,
            actions: report.actions,
            dynamic_insights: report.dynamic_insights,
        }
    }
}
