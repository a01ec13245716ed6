//! RDW dataset registry
//!
//! Maps each logical dataset to the Socrata resource that serves it. The
//! registry is built once at startup and is read-only afterwards.

use std::fmt;

/// Default RDW open-data resource root
pub const DEFAULT_BASE_URL: &str = "https://opendata.rdw.nl/resource";

/// Logical datasets exposed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Info,
    Odometer,
    Fuel,
    Axles,
    Remarks,
    Subcategory,
    Tracks,
    Bodywork,
    BodyworkSpecific,
    VehicleClass,
}

impl Dataset {
    /// Every dataset, in catalog order
    pub const ALL: [Dataset; 10] = [
        Dataset::Info,
        Dataset::Odometer,
        Dataset::Fuel,
        Dataset::Axles,
        Dataset::Remarks,
        Dataset::Subcategory,
        Dataset::Tracks,
        Dataset::Bodywork,
        Dataset::BodyworkSpecific,
        Dataset::VehicleClass,
    ];

    /// Stable snake_case key, also used as field name in combined results
    pub fn key(self) -> &'static str {
        match self {
            Dataset::Info => "info",
            Dataset::Odometer => "odometer",
            Dataset::Fuel => "fuel",
            Dataset::Axles => "axles",
            Dataset::Remarks => "remarks",
            Dataset::Subcategory => "subcategory",
            Dataset::Tracks => "tracks",
            Dataset::Bodywork => "bodywork",
            Dataset::BodyworkSpecific => "bodywork_specific",
            Dataset::VehicleClass => "vehicle_class",
        }
    }

    /// Socrata resource id on opendata.rdw.nl
    fn resource_id(self) -> &'static str {
        match self {
            Dataset::Info | Dataset::Odometer => "m9d7-ebf2",
            Dataset::Fuel => "8ys7-d773",
            Dataset::Axles => "3huj-srit",
            Dataset::Remarks => "sgfe-77wx",
            Dataset::Subcategory => "2ba7-embk",
            Dataset::Tracks => "3xwf-ince",
            Dataset::Bodywork => "vezc-m2t6",
            Dataset::BodyworkSpecific => "jhie-znh9",
            Dataset::VehicleClass => "kmfi-hrps",
        }
    }

    /// Column projection, for datasets that share a resource with another
    fn select(self) -> Option<&'static str> {
        match self {
            Dataset::Odometer => Some(
                "kenteken,tellerstandoordeel,code_toelichting_tellerstandoordeel,\
                 jaar_laatste_registratie_tellerstand",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single queryable RDW resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub dataset: Dataset,
    pub url: String,
    pub select: Option<&'static str>,
}

impl Endpoint {
    /// Query parameters for a lookup of `kenteken`
    pub fn query<'a>(&self, kenteken: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![("kenteken", kenteken)];
        if let Some(select) = self.select {
            query.push(("$select", select));
        }
        query
    }
}

/// Fixed mapping from [`Dataset`] to [`Endpoint`]
#[derive(Debug, Clone)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
}

impl Registry {
    /// Build endpoints for every dataset under `base_url`.
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let endpoints = Dataset::ALL
            .iter()
            .map(|&dataset| Endpoint {
                dataset,
                url: format!("{}/{}.json", base, dataset.resource_id()),
                select: dataset.select(),
            })
            .collect();
        Self { endpoints }
    }

    /// Endpoint serving `dataset`
    pub fn endpoint(&self, dataset: Dataset) -> &Endpoint {
        // Built from Dataset::ALL in order, so the index always exists.
        &self.endpoints[dataset as usize]
    }

    /// All endpoints in catalog order
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dataset_has_an_endpoint() {
        let registry = Registry::default();
        assert_eq!(registry.endpoints().len(), Dataset::ALL.len());
        for dataset in Dataset::ALL {
            assert_eq!(registry.endpoint(dataset).dataset, dataset);
        }
    }

    #[test]
    fn test_info_url() {
        let registry = Registry::default();
        assert_eq!(
            registry.endpoint(Dataset::Info).url,
            "https://opendata.rdw.nl/resource/m9d7-ebf2.json"
        );
        assert_eq!(
            registry.endpoint(Dataset::Axles).url,
            "https://opendata.rdw.nl/resource/3huj-srit.json"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let registry = Registry::new("http://localhost:8080/resource/");
        assert_eq!(
            registry.endpoint(Dataset::Bodywork).url,
            "http://localhost:8080/resource/vezc-m2t6.json"
        );
    }

    #[test]
    fn test_query_includes_select_for_odometer() {
        let registry = Registry::default();
        let query = registry.endpoint(Dataset::Odometer).query("41TDK8");
        assert_eq!(query[0], ("kenteken", "41TDK8"));
        assert_eq!(query.len(), 2);
        assert_eq!(query[1].0, "$select");
        assert!(query[1].1.contains("tellerstandoordeel"));

        let query = registry.endpoint(Dataset::Fuel).query("41TDK8");
        assert_eq!(query, vec![("kenteken", "41TDK8")]);
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = Dataset::ALL.iter().map(|d| d.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Dataset::ALL.len());
    }
}
