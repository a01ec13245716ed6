//! Composite bodywork lookup
//!
//! Bodywork information is spread over three RDW datasets. They are queried
//! concurrently and joined into one [`CombinedResult`] that keeps the
//! outcome of each dataset separately, so a failed sub-lookup is never
//! mistaken for "no rows".

use serde_json::{Map, Value, json};

use crate::dataset::Dataset;
use crate::error::FetchError;
use crate::fetch::{DatasetSource, Record};
use crate::kenteken::Kenteken;

/// Datasets combined by [`fetch_bodywork`], in output order
pub const BODYWORK_DATASETS: [Dataset; 3] = [
    Dataset::Bodywork,
    Dataset::BodyworkSpecific,
    Dataset::VehicleClass,
];

/// Outcome of one sub-lookup
pub type FieldOutcome = std::result::Result<Vec<Record>, FetchError>;

/// Joined result of the three bodywork datasets
#[derive(Debug)]
pub struct CombinedResult {
    pub kenteken: Kenteken,
    pub bodywork: FieldOutcome,
    pub bodywork_specific: FieldOutcome,
    pub vehicle_class: FieldOutcome,
}

impl CombinedResult {
    fn fields(&self) -> [(Dataset, &FieldOutcome); 3] {
        [
            (Dataset::Bodywork, &self.bodywork),
            (Dataset::BodyworkSpecific, &self.bodywork_specific),
            (Dataset::VehicleClass, &self.vehicle_class),
        ]
    }

    /// All three lookups succeeded and returned no rows
    pub fn is_empty(&self) -> bool {
        self.fields()
            .iter()
            .all(|(_, outcome)| matches!(outcome, Ok(rows) if rows.is_empty()))
    }

    /// Every lookup failed; there is nothing to show
    pub fn all_failed(&self) -> bool {
        self.fields().iter().all(|(_, outcome)| outcome.is_err())
    }

    /// Failed lookups with their errors
    pub fn failures(&self) -> Vec<(Dataset, &FetchError)> {
        self.fields()
            .into_iter()
            .filter_map(|(dataset, outcome)| outcome.as_ref().err().map(|e| (dataset, e)))
            .collect()
    }

    /// Render as one JSON object keyed by dataset name.
    ///
    /// Failed fields are rendered as empty arrays and listed under `errors`.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("kenteken".to_string(), json!(self.kenteken.as_str()));

        for (dataset, outcome) in self.fields() {
            let rows = match outcome {
                Ok(rows) => rows.iter().cloned().map(Value::Object).collect(),
                Err(_) => Vec::new(),
            };
            object.insert(dataset.key().to_string(), Value::Array(rows));
        }

        let failures = self.failures();
        if !failures.is_empty() {
            let errors: Map<String, Value> = failures
                .into_iter()
                .map(|(dataset, err)| (dataset.key().to_string(), json!(err.to_string())))
                .collect();
            object.insert("errors".to_string(), Value::Object(errors));
        }

        Value::Object(object)
    }
}

/// Query the three bodywork datasets concurrently and join the results.
///
/// All three lookups run to completion; a failure in one does not cancel
/// the others.
pub async fn fetch_bodywork<S>(source: &S, kenteken: &Kenteken) -> CombinedResult
where
    S: DatasetSource + ?Sized,
{
    let [bodywork, specific, class] = BODYWORK_DATASETS;
    let (bodywork, bodywork_specific, vehicle_class) = tokio::join!(
        source.fetch(bodywork, kenteken),
        source.fetch(specific, kenteken),
        source.fetch(class, kenteken),
    );

    let combined = CombinedResult {
        kenteken: kenteken.clone(),
        bodywork,
        bodywork_specific,
        vehicle_class,
    };

    for (dataset, err) in combined.failures() {
        tracing::warn!(%dataset, %kenteken, error = %err, "Bodywork sub-lookup failed");
    }

    combined
}
