use crate::core::state::{DashboardState, UploadPhase};
use crate::domain::model::{Action, DynamicInsight, Outlier, ResultSets, TopSupplier};
use crate::utils::format::NumberFormat;
use serde::Serialize;
use std::fmt;

const UPLOAD_LABEL: &str = "Upload and Analyze";
const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    TopSuppliers,
    Outliers,
    Actions,
    DynamicInsights,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::TopSuppliers => "🏆 Top Suppliers",
            SectionKind::Outliers => "📉 Pricing Outliers",
            SectionKind::Actions => "💡 Recommended Actions",
            SectionKind::DynamicInsights => "🤖 AI-Generated Insights",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionItem {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<SectionItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardView {
    pub sections: Vec<Section>,
}

impl DashboardView {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: String,
}

/// 上傳區塊加上結果區塊
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardScreen {
    pub selected_file: Option<String>,
    pub trigger: TriggerView,
    pub status: Option<String>,
    pub results: DashboardView,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn supplier_line(item: &TopSupplier, fmt: &NumberFormat) -> SectionItem {
    let savings = item
        .potential_savings
        .as_ref()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    SectionItem {
        lines: vec![format!(
            "{}: ${}",
            text(&item.supplier_name),
            fmt.format(savings)
        )],
    }
}

fn outlier_line(item: &Outlier) -> SectionItem {
    let change = item
        .price_change
        .as_ref()
        .map(|v| v.display_raw())
        .unwrap_or_default();
    SectionItem {
        lines: vec![format!(
            "{} ({}): ${}",
            text(&item.item_name),
            text(&item.supplier_name),
            change
        )],
    }
}

fn action_line(action: &Action) -> SectionItem {
    let target = non_empty(&action.supplier)
        .or_else(|| non_empty(&action.note))
        .unwrap_or("");
    let mut line = format!("{}: {}", text(&action.action_type), target);
    if let Some(savings) = non_empty(&action.savings) {
        line.push_str(&format!(" - {}", savings));
    }
    SectionItem { lines: vec![line] }
}

fn insight_lines(insight: &DynamicInsight) -> SectionItem {
    SectionItem {
        lines: vec![
            text(&insight.item).to_string(),
            text(&insight.insight_text).to_string(),
            format!("📌 {}", text(&insight.recommended_action)),
        ],
    }
}

fn section<T>(kind: SectionKind, items: &[T], project: impl Fn(&T) -> SectionItem) -> Option<Section> {
    if items.is_empty() {
        return None;
    }
    Some(Section {
        kind,
        title: kind.title().to_string(),
        items: items.iter().map(project).collect(),
    })
}

/// 只輸出非空集合的區塊，項目順序與服務回傳一致
pub fn render_results(results: &ResultSets, fmt: &NumberFormat) -> DashboardView {
    let sections = [
        section(SectionKind::TopSuppliers, &results.top_suppliers, |s| {
            supplier_line(s, fmt)
        }),
        section(SectionKind::Outliers, &results.outliers, outlier_line),
        section(SectionKind::Actions, &results.actions, action_line),
        section(
            SectionKind::DynamicInsights,
            &results.dynamic_insights,
            insight_lines,
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    DashboardView { sections }
}

pub fn render_dashboard(state: &DashboardState, fmt: &NumberFormat) -> DashboardScreen {
    let label = if state.is_in_flight() {
        PROCESSING_LABEL
    } else {
        UPLOAD_LABEL
    };

    let status = match state.phase() {
        UploadPhase::Idle => None,
        UploadPhase::InFlight { file_name, .. } => Some(format!("⏳ Analyzing {}", file_name)),
        UploadPhase::Succeeded {
            file_name,
            completed_at,
            ..
        } => Some(format!(
            "✅ Analyzed {} at {}",
            file_name,
            completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        UploadPhase::Failed {
            file_name, reason, ..
        } => Some(format!("❌ Upload of {} failed: {}", file_name, reason.message)),
    };

    DashboardScreen {
        selected_file: state.selection().map(|f| f.name().to_string()),
        trigger: TriggerView {
            enabled: state.trigger_enabled(),
            label: label.to_string(),
        },
        status,
        results: render_results(state.results(), fmt),
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            for item in &section.items {
                let mut lines = item.lines.iter();
                if let Some(first) = lines.next() {
                    writeln!(f, "  • {}", first)?;
                }
                for line in lines {
                    writeln!(f, "    {}", line)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for DashboardScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Upload Spend File")?;
        writeln!(
            f,
            "File: {}",
            self.selected_file.as_deref().unwrap_or("(none selected)")
        )?;
        let state = if self.trigger.enabled { "" } else { " (disabled)" };
        writeln!(f, "[{}]{}", self.trigger.label, state)?;
        if let Some(status) = &self.status {
            writeln!(f, "{}", status)?;
        }
        if !self.results.sections.is_empty() {
            writeln!(f)?;
            write!(f, "{}", self.results)?;
        }
        Ok(())
    }
}
