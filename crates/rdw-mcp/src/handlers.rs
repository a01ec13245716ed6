//! MCP Tool Handlers
//!
//! Routes a tool call to a single dataset lookup or the bodywork fan-out and
//! renders the outcome as tool text. Three outcomes are kept apart:
//!
//! - rows found: indented JSON
//! - lookup succeeded with zero rows: a Dutch "not found" sentence
//! - lookup failed: an error, which the server turns into an `isError` result

use rdw_core::{DatasetSource, Kenteken, Record, fetch_bodywork};
use serde::Deserialize;
use serde_json::Value;

use crate::tools::{Render, ToolCatalog, ToolKind, ToolResult, ToolSpec};
use crate::{Error, Result};

/// Text returned for a tool name that is not in the catalog
pub const TOOL_NOT_FOUND: &str = "tool niet gevonden";

/// Arguments shared by every tool
#[derive(Debug, Deserialize)]
struct KentekenArgs {
    kenteken: String,
}

impl KentekenArgs {
    fn parse(arguments: Value) -> Result<Self> {
        serde_json::from_value(arguments)
            .map_err(|_| Error::InvalidArgument("Kenteken is verplicht".to_string()))
    }
}

/// Handle a tool call by dispatching to the appropriate lookup
///
/// Unknown tools are answered with [`TOOL_NOT_FOUND`] text rather than an
/// error so that every call gets a uniform textual reply.
pub async fn handle_tool_call(
    source: &dyn DatasetSource,
    catalog: &ToolCatalog,
    tool_name: &str,
    arguments: Value,
) -> Result<ToolResult> {
    let Some(spec) = catalog.get(tool_name) else {
        tracing::warn!(tool = %tool_name, "Unknown tool requested");
        return Ok(ToolResult::text(TOOL_NOT_FOUND));
    };

    let args = KentekenArgs::parse(arguments)?;
    let kenteken = Kenteken::normalize(&args.kenteken);
    tracing::info!(tool = %spec.name, %kenteken, "Handling tool call");

    let text = match spec.kind {
        ToolKind::Single { dataset, render } => {
            let rows = source.fetch(dataset, &kenteken).await?;
            render_rows(spec, &kenteken, rows, render)?
        }
        ToolKind::Composite => handle_bodywork(source, spec, &kenteken).await?,
    };

    Ok(ToolResult::text(text))
}

fn render_rows(
    spec: &ToolSpec,
    kenteken: &Kenteken,
    mut rows: Vec<Record>,
    render: Render,
) -> Result<String> {
    if rows.is_empty() {
        return Ok(spec.not_found_message(kenteken));
    }

    let text = match render {
        Render::FirstRecord => serde_json::to_string_pretty(&rows.swap_remove(0))?,
        Render::AllRecords => serde_json::to_string_pretty(&rows)?,
    };
    Ok(text)
}

async fn handle_bodywork(
    source: &dyn DatasetSource,
    spec: &ToolSpec,
    kenteken: &Kenteken,
) -> Result<String> {
    let combined = fetch_bodywork(source, kenteken).await;

    if combined.all_failed() {
        let messages = combined
            .failures()
            .into_iter()
            .map(|(dataset, err)| format!("{}: {}", dataset, err))
            .collect();
        return Err(Error::AllFetchesFailed(messages));
    }
    if combined.is_empty() {
        return Ok(spec.not_found_message(kenteken));
    }

    Ok(serde_json::to_string_pretty(&combined.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rdw_core::Dataset;
    use rdw_test_utils::{Canned, CannedSource};
    use rstest::rstest;
    use serde_json::json;

    async fn call(source: &CannedSource, tool: &str, kenteken: &str) -> Result<ToolResult> {
        handle_tool_call(
            source,
            &ToolCatalog::new(true),
            tool,
            json!({ "kenteken": kenteken }),
        )
        .await
    }

    fn text(result: &ToolResult) -> &str {
        result.first_text().unwrap()
    }

    #[tokio::test]
    async fn test_info_renders_first_record_only() {
        let source = CannedSource::new().with_rows(
            Dataset::Info,
            json!([{"merk": "TOYOTA"}, {"merk": "IGNORED"}]),
        );

        let result = call(&source, "get_vehicle_info", "41-tdk-8").await.unwrap();
        assert!(!result.is_error());
        assert_eq!(text(&result), "{\n  \"merk\": \"TOYOTA\"\n}");
    }

    #[tokio::test]
    async fn test_axles_renders_full_array() {
        let rows = json!([
            {"as_nummer": "1", "wettelijk_toegestane_maximum_aslast": "7100"},
            {"as_nummer": "2", "wettelijk_toegestane_maximum_aslast": "11500"}
        ]);
        let source = CannedSource::new().with_rows(Dataset::Axles, rows.clone());

        let result = call(&source, "get_vehicle_axles", "BB943Z").await.unwrap();
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(parsed, rows);
        assert_eq!(text(&result), serde_json::to_string_pretty(&rows).unwrap());
    }

    #[rstest]
    #[case("get_vehicle_info", "Geen voertuig gevonden voor kenteken: 41TDK8")]
    #[case("get_vehicle_fuel", "Geen brandstofgegevens gevonden voor kenteken: 41TDK8")]
    #[case("get_vehicle_odometer", "Geen tellerstandgegevens gevonden voor kenteken: 41TDK8")]
    #[case("get_vehicle_class", "Geen voertuigklasse gevonden voor kenteken: 41TDK8")]
    #[tokio::test]
    async fn test_empty_dataset_renders_not_found(#[case] tool: &str, #[case] expected: &str) {
        let source = CannedSource::new();
        let result = call(&source, tool, "41-TDK-8").await.unwrap();
        assert!(!result.is_error());
        assert_eq!(text(&result), expected);
    }

    #[tokio::test]
    async fn test_kenteken_is_normalized_before_fetch() {
        let source = CannedSource::new();
        call(&source, "get_vehicle_tracks", " ab-12 cd ").await.unwrap();
        assert_eq!(source.calls(), vec![(Dataset::Tracks, "AB12CD".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let source = CannedSource::new();
        let result = call(&source, "does_not_exist", "41TDK8").await.unwrap();
        assert_eq!(text(&result), TOOL_NOT_FOUND);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_split_tool_unknown_in_default_catalog() {
        let source = CannedSource::new();
        let result = handle_tool_call(
            &source,
            &ToolCatalog::default(),
            "get_vehicle_class",
            json!({"kenteken": "41TDK8"}),
        )
        .await
        .unwrap();
        assert_eq!(text(&result), TOOL_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_kenteken() {
        let source = CannedSource::new();
        let result = handle_tool_call(
            &source,
            &ToolCatalog::default(),
            "get_vehicle_info",
            json!({}),
        )
        .await;
        match result {
            Err(Error::InvalidArgument(message)) => assert_eq!(message, "Kenteken is verplicht"),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_not_not_found() {
        let source = CannedSource::new().with(Dataset::Info, Canned::Status(503));
        let result = call(&source, "get_vehicle_info", "41TDK8").await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert_eq!(
            err.to_string(),
            "Fout bij het ophalen van RDW-gegevens: RDW API gaf status 503"
        );
    }

    #[tokio::test]
    async fn test_bodywork_one_field_populated() {
        let source = CannedSource::new().with_rows(
            Dataset::BodyworkSpecific,
            json!([{"carrosserie_voertuig_nummer_code_volgnummer": "1"}]),
        );

        let result = call(&source, "get_vehicle_bodywork", "41-TDK-8").await.unwrap();
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(
            parsed,
            json!({
                "kenteken": "41TDK8",
                "bodywork": [],
                "bodywork_specific": [{"carrosserie_voertuig_nummer_code_volgnummer": "1"}],
                "vehicle_class": []
            })
        );
        assert_eq!(source.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_bodywork_all_empty() {
        let source = CannedSource::new();
        let result = call(&source, "get_vehicle_bodywork", "41TDK8").await.unwrap();
        assert_eq!(
            text(&result),
            "Geen carrosseriegegevens gevonden voor kenteken: 41TDK8"
        );
    }

    #[tokio::test]
    async fn test_bodywork_partial_failure_reports_errors() {
        let source = CannedSource::new()
            .with(Dataset::VehicleClass, Canned::Unreachable)
            .with_rows(Dataset::Bodywork, json!([{"carrosserietype": "AB"}]));

        let result = call(&source, "get_vehicle_bodywork", "41TDK8").await.unwrap();
        assert!(!result.is_error());
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(parsed["vehicle_class"], json!([]));
        assert_eq!(
            parsed["errors"]["vehicle_class"],
            "verbinding met RDW mislukt: connection refused"
        );
    }

    #[tokio::test]
    async fn test_bodywork_partial_failure_without_rows_is_not_not_found() {
        // One failure plus two empty datasets: unknown, not "nothing there"
        let source = CannedSource::new().with(Dataset::Bodywork, Canned::Status(500));

        let result = call(&source, "get_vehicle_bodywork", "41TDK8").await.unwrap();
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert!(parsed["errors"]["bodywork"].is_string());
    }

    #[tokio::test]
    async fn test_bodywork_all_failed() {
        let source = CannedSource::new()
            .with(Dataset::Bodywork, Canned::Status(500))
            .with(Dataset::BodyworkSpecific, Canned::Status(500))
            .with(Dataset::VehicleClass, Canned::Status(500));

        let err = call(&source, "get_vehicle_bodywork", "41TDK8")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AllFetchesFailed(ref messages) if messages.len() == 3));
        assert!(err.to_string().contains("bodywork_specific: RDW API gaf status 500"));
    }
}
