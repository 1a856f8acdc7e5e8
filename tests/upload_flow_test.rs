use anyhow::Result;
use httpmock::prelude::*;
use maven_copilot::core::renderer::SectionKind;
use maven_copilot::core::selection::load_selection;
use maven_copilot::core::state::{FailureKind, UploadPhase};
use maven_copilot::core::{AnalysisReport, ResultSets};
use maven_copilot::utils::format::{Locale, NumberFormat};
use maven_copilot::{
    render_dashboard, HttpAnalysisClient, LocalStorage, SubmitOutcome, UploadController,
};
use tempfile::TempDir;

fn write_spend_file(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

fn storage() -> LocalStorage {
    LocalStorage::new(".".to_string())
}

#[tokio::test]
async fn test_upload_renders_top_suppliers_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "Supplier Name,Spend\nAcme,1200\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/upload/")
            .body_contains("name=\"file\"")
            .body_contains("filename=\"spend.csv\"");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "top_suppliers": [{"Supplier Name": "Acme", "Potential Savings": 1200}],
                "outliers": [],
                "actions": [],
                "dynamic_insights": []
            }));
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &path).await?);
    let outcome = controller.submit().await;

    api_mock.assert();
    assert_eq!(outcome, SubmitOutcome::Succeeded { upload_id: 1 });

    let screen = render_dashboard(controller.state(), &NumberFormat::new(Locale::EnUs));
    assert!(screen.trigger.enabled);
    assert_eq!(screen.results.sections.len(), 1);
    let suppliers = screen.results.section(SectionKind::TopSuppliers).unwrap();
    assert_eq!(suppliers.items[0].lines, vec!["Acme: $1,200"]);
    Ok(())
}

#[tokio::test]
async fn test_no_file_selected_makes_no_request() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/");
        then.status(200);
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    let screen = render_dashboard(controller.state(), &NumberFormat::default());
    assert!(!screen.trigger.enabled);

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Skipped);
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_transport_error_keeps_previous_results() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "a,b\n")?;

    let previous: AnalysisReport = serde_json::from_value(serde_json::json!({
        "top_suppliers": [{"Supplier Name": "Acme", "Potential Savings": "500"}],
        "outliers": [{"Item Name": "Bolts", "Supplier Name": "Acme", "CY vs PY WAP USD (Fiscal)": 0.42}],
        "actions": [{"type": "Consolidate", "note": "Merge bolt vendors", "savings": "$3k"}]
    }))?;

    let mut controller =
        UploadController::new(HttpAnalysisClient::new("http://127.0.0.1:1/upload/"));
    controller.select_file(load_selection(&storage(), &path).await?);

    // 先以一次成功的週期填入結果
    let ticket = controller.begin_submit().unwrap();
    controller.finish(ticket, Ok(previous.clone()));
    let before = controller.state().results().clone();
    assert_eq!(before, ResultSets::from(previous));

    let outcome = controller.submit().await;

    match outcome {
        SubmitOutcome::Failed { reason, .. } => assert_eq!(reason.kind, FailureKind::Transport),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(controller.state().results(), &before);
    assert!(controller.state().trigger_enabled());

    let screen = render_dashboard(controller.state(), &NumberFormat::default());
    assert_eq!(screen.trigger.label, "Upload and Analyze");
    assert!(screen.status.unwrap().starts_with("❌ Upload of spend.csv failed"));
    assert_eq!(screen.results.sections.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_dynamic_insights_renders_no_section() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "x\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/");
        then.status(200).json_body(serde_json::json!({
            "top_suppliers": [],
            "outliers": [],
            "actions": [{"type": "Review", "supplier": "Globex"}]
        }));
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &path).await?);
    controller.submit().await;

    api_mock.assert();
    let screen = render_dashboard(controller.state(), &NumberFormat::default());
    assert!(screen.results.section(SectionKind::DynamicInsights).is_none());
    assert_eq!(
        screen.results.section(SectionKind::Actions).unwrap().items[0].lines,
        vec!["Review: Globex"]
    );
    Ok(())
}

#[tokio::test]
async fn test_sequential_uploads_overwrite_results() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let first = write_spend_file(&temp_dir, "q1.csv", "quarter,1\n")?;
    let second = write_spend_file(&temp_dir, "q2.csv", "quarter,2\n")?;

    let server = MockServer::start();
    let q1_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/").body_contains("quarter,1");
        then.status(200).json_body(serde_json::json!({
            "top_suppliers": [
                {"Supplier Name": "Acme", "Potential Savings": 1000},
                {"Supplier Name": "Globex", "Potential Savings": 2000}
            ],
            "outliers": [{"Item Name": "Bolts", "Supplier Name": "Acme", "CY vs PY WAP USD (Fiscal)": 1.5}],
            "actions": [],
            "dynamic_insights": [{"item": "Bolts", "insight_text": "Up", "recommended_action": "Rebid"}]
        }));
    });
    let q2_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/").body_contains("quarter,2");
        then.status(200).json_body(serde_json::json!({
            "top_suppliers": [{"Supplier Name": "Initech", "Potential Savings": 3000}],
            "outliers": [],
            "actions": []
        }));
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &first).await?);
    controller.submit().await;
    controller.select_file(load_selection(&storage(), &second).await?);
    controller.submit().await;

    q1_mock.assert();
    q2_mock.assert();

    let results = controller.state().results();
    assert_eq!(results.top_suppliers.len(), 1);
    assert_eq!(results.top_suppliers[0].supplier_name.as_deref(), Some("Initech"));
    assert!(results.outliers.is_empty());
    assert!(results.dynamic_insights.is_empty());
    assert!(matches!(
        controller.state().phase(),
        UploadPhase::Succeeded { upload_id: 2, .. }
    ));

    let view = render_dashboard(controller.state(), &NumberFormat::new(Locale::DeDe)).results;
    assert_eq!(view.sections.len(), 1);
    assert_eq!(view.sections[0].items[0].lines, vec!["Initech: $3.000"]);
    Ok(())
}

#[tokio::test]
async fn test_missing_required_collection_is_a_decode_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "x\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/upload/");
        then.status(200).json_body(serde_json::json!({"top_suppliers": []}));
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &path).await?);
    let outcome = controller.submit().await;

    match outcome {
        SubmitOutcome::Failed { reason, .. } => assert_eq!(reason.kind, FailureKind::Decode),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(controller.state().results().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "x\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/");
        then.status(422).body("Unsupported file");
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &path).await?);
    let outcome = controller.submit().await;

    api_mock.assert();
    match outcome {
        SubmitOutcome::Failed { reason, .. } => {
            assert_eq!(reason.kind, FailureKind::Status { code: 422 })
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_null_dynamic_insights_keeps_other_results() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_spend_file(&temp_dir, "spend.csv", "x\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/");
        then.status(200).json_body(serde_json::json!({
            "top_suppliers": [{"Supplier Name": "Acme", "Potential Savings": 5}],
            "outliers": [],
            "actions": [{"type": "Renegotiate", "supplier": "Acme", "savings": 5000}],
            "dynamic_insights": null
        }));
    });

    let mut controller = UploadController::new(HttpAnalysisClient::new(server.url("/upload/")));
    controller.select_file(load_selection(&storage(), &path).await?);
    let outcome = controller.submit().await;

    api_mock.assert();
    assert_eq!(outcome, SubmitOutcome::Succeeded { upload_id: 1 });

    let screen = render_dashboard(controller.state(), &NumberFormat::default());
    assert!(screen.results.section(SectionKind::DynamicInsights).is_none());
    assert_eq!(
        screen.results.section(SectionKind::TopSuppliers).unwrap().items[0].lines,
        vec!["Acme: $5"]
    );
    assert_eq!(
        screen.results.section(SectionKind::Actions).unwrap().items[0].lines,
        vec!["Renegotiate: Acme - 5000"]
    );
    Ok(())
}
