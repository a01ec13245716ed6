//! MCP Tool catalog
//!
//! Every tool takes a single `kenteken` argument and is backed by either one
//! RDW dataset or, for bodywork, the concurrent fan-out over three.
//!
//! # Tools
//!
//! - `get_vehicle_info` - general registration data (first record)
//! - `get_vehicle_odometer` - odometer judgement (first record)
//! - `get_vehicle_fuel` - fuel and emission rows
//! - `get_vehicle_axles` - one row per axle
//! - `get_vehicle_remarks` - registration remarks
//! - `get_vehicle_subcategory` - vehicle subcategory
//! - `get_vehicle_tracks` - caterpillar tracks
//! - `get_vehicle_bodywork` - bodywork, bodywork specifics and vehicle class combined
//!
//! With `split_bodywork` enabled, `get_vehicle_bodywork_specific` and
//! `get_vehicle_class` are also exposed on their own.

use rdw_core::{Dataset, Kenteken};
use serde::{Deserialize, Serialize};

/// How rows of a single dataset are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Dataset is keyed uniquely per kenteken; show the one record
    FirstRecord,
    /// Dataset may hold several rows per kenteken; show them all
    AllRecords,
}

/// What a tool does when called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Single { dataset: Dataset, render: Render },
    /// Fan-out over the bodywork datasets
    Composite,
}

/// Static description of one tool
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
    /// Shown when the lookup succeeds with zero rows; `{kenteken}` is replaced
    not_found: &'static str,
    /// Only listed when bodywork datasets are exposed individually
    split_only: bool,
}

impl ToolSpec {
    /// The "nothing found" sentence for `kenteken`
    pub fn not_found_message(&self, kenteken: &Kenteken) -> String {
        self.not_found.replace("{kenteken}", kenteken.as_str())
    }
}

const fn single(dataset: Dataset, render: Render) -> ToolKind {
    ToolKind::Single { dataset, render }
}

static TOOLS: [ToolSpec; 10] = [
    ToolSpec {
        name: "get_vehicle_info",
        description: "Haal uitgebreide technische en administratieve informatie op over een Nederlands voertuig (auto, motor, vrachtwagen) via de RDW Open Data API. Gebruik deze tool voor vragen over merk, model, APK-vervaldatum, motorinhoud en milieu-info. Output is in het Nederlands.",
        kind: single(Dataset::Info, Render::FirstRecord),
        not_found: "Geen voertuig gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_odometer",
        description: "Haal het tellerstandoordeel op van een Nederlands voertuig (logisch, onlogisch, geen oordeel) inclusief toelichting en het jaar van de laatste tellerstandregistratie.",
        kind: single(Dataset::Odometer, Render::FirstRecord),
        not_found: "Geen tellerstandgegevens gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_fuel",
        description: "Haal brandstof- en emissiegegevens op van een Nederlands voertuig: brandstofsoort, verbruik, CO2-uitstoot en emissieklasse. Hybride voertuigen hebben meerdere regels.",
        kind: single(Dataset::Fuel, Render::AllRecords),
        not_found: "Geen brandstofgegevens gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_axles",
        description: "Haal specifieke informatie op over de assen van een Nederlands voertuig (vooral voor vrachtwagens/aanhangers). Bevat details over aslast en aangedreven assen. Output is in het Nederlands.",
        kind: single(Dataset::Axles, Render::AllRecords),
        not_found: "Geen as-informatie gevonden voor kenteken: {kenteken}. Let op: lichte personenauto's hebben vaak geen vermelding in deze dataset.",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_remarks",
        description: "Haal de opmerkingen op die bij de registratie van een Nederlands voertuig zijn vastgelegd.",
        kind: single(Dataset::Remarks, Render::AllRecords),
        not_found: "Geen opmerkingen gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_subcategory",
        description: "Haal de subcategorie op van een Nederlands voertuig, zoals vastgelegd door de RDW.",
        kind: single(Dataset::Subcategory, Render::AllRecords),
        not_found: "Geen subcategorie gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_tracks",
        description: "Haal gegevens op over de rupsbanden van een Nederlands voertuig (landbouw- en werkvoertuigen).",
        kind: single(Dataset::Tracks, Render::AllRecords),
        not_found: "Geen rupsbandgegevens gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_bodywork",
        description: "Haal carrosseriegegevens op van een Nederlands voertuig: carrosserietype, carrosseriespecificatie en voertuigklasse in één antwoord.",
        kind: ToolKind::Composite,
        not_found: "Geen carrosseriegegevens gevonden voor kenteken: {kenteken}",
        split_only: false,
    },
    ToolSpec {
        name: "get_vehicle_bodywork_specific",
        description: "Haal de specifieke carrosseriegegevens op van een Nederlands voertuig.",
        kind: single(Dataset::BodyworkSpecific, Render::AllRecords),
        not_found: "Geen specifieke carrosseriegegevens gevonden voor kenteken: {kenteken}",
        split_only: true,
    },
    ToolSpec {
        name: "get_vehicle_class",
        description: "Haal de voertuigklasse op van een Nederlands voertuig.",
        kind: single(Dataset::VehicleClass, Render::AllRecords),
        not_found: "Geen voertuigklasse gevonden voor kenteken: {kenteken}",
        split_only: true,
    },
];

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// Text of the first content block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// The set of tools a server instance exposes
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<&'static ToolSpec>,
}

impl ToolCatalog {
    /// Eight tools, or ten with `split_bodywork`
    pub fn new(split_bodywork: bool) -> Self {
        let tools = TOOLS
            .iter()
            .filter(|spec| split_bodywork || !spec.split_only)
            .collect();
        Self { tools }
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&'static ToolSpec> {
        self.tools.iter().copied().find(|spec| spec.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions as returned by `list_tools`
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|spec| ToolDefinition {
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                input_schema: kenteken_schema(),
            })
            .collect()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new(false)
    }
}

fn kenteken_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "kenteken": {
                "type": "string",
                "description": "Het Nederlandse kenteken (bijv. '41TDK8' of '41-TDK-8'). Tekens worden automatisch genormaliseerd."
            }
        },
        "required": ["kenteken"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_catalog_has_eight_tools() {
        let catalog = ToolCatalog::default();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.get("get_vehicle_bodywork").is_some());
        assert!(catalog.get("get_vehicle_class").is_none());
        assert!(catalog.get("get_vehicle_bodywork_specific").is_none());
    }

    #[test]
    fn test_split_catalog_has_ten_tools() {
        let catalog = ToolCatalog::new(true);
        assert_eq!(catalog.len(), 10);
        assert!(catalog.get("get_vehicle_class").is_some());
    }

    #[test]
    fn test_exactly_one_composite_tool() {
        let composites: Vec<&str> = TOOLS
            .iter()
            .filter(|spec| spec.kind == ToolKind::Composite)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(composites, vec!["get_vehicle_bodywork"]);
    }

    #[test]
    fn test_tool_names_unique() {
        let mut names: Vec<&str> = TOOLS.iter().map(|spec| spec.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[rstest]
    #[case("get_vehicle_info", Render::FirstRecord)]
    #[case("get_vehicle_odometer", Render::FirstRecord)]
    #[case("get_vehicle_fuel", Render::AllRecords)]
    #[case("get_vehicle_axles", Render::AllRecords)]
    #[case("get_vehicle_tracks", Render::AllRecords)]
    fn test_render_mode(#[case] name: &str, #[case] expected: Render) {
        let spec = ToolCatalog::default().get(name).unwrap();
        match spec.kind {
            ToolKind::Single { render, .. } => assert_eq!(render, expected),
            ToolKind::Composite => panic!("{name} should be a single-dataset tool"),
        }
    }

    #[test]
    fn test_definitions_require_kenteken() {
        for definition in ToolCatalog::new(true).definitions() {
            assert_eq!(definition.input_schema["required"][0], "kenteken");
            assert_eq!(
                definition.input_schema["properties"]["kenteken"]["type"],
                "string"
            );
            assert!(!definition.description.is_empty());
        }
    }

    #[test]
    fn test_not_found_message_echoes_kenteken() {
        let spec = ToolCatalog::default().get("get_vehicle_axles").unwrap();
        let message = spec.not_found_message(&Kenteken::normalize("bb-943-z"));
        assert!(message.starts_with("Geen as-informatie gevonden voor kenteken: BB943Z."));
    }

    #[test]
    fn test_tool_result_serializes_is_error_camel_case() {
        let json = serde_json::to_value(ToolResult::error("kapot")).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "kapot");

        let json = serde_json::to_value(ToolResult::text("ok")).unwrap();
        assert!(json.get("isError").is_none());
    }
}
