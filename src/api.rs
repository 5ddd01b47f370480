//! HTTP client for the knowledge-base API.
//!
//! Every endpoint is a GET returning JSON. Failures are logged by the caller
//! and rendered as a static localized message; there are no retries.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::components::knowledge_graph::{GraphData, GraphFilter};

/// Convenience alias for fallible API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Everything that can go wrong talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never completed.
	#[error("request failed: {0}")]
	Network(String),
	/// The server answered with a non-2xx status.
	#[error("unexpected status {0}")]
	Status(u16),
	/// The body did not match the expected shape.
	#[error("malformed response: {0}")]
	Decode(String),
	/// The server completed the request but reported a logical failure.
	#[error("{0}")]
	Server(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
			other => ApiError::Network(other.to_string()),
		}
	}
}

/// One ranked name/count entry from the usage endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NamedValue {
	/// Display name of the material.
	pub name: String,
	/// Non-negative usage count.
	pub value: f64,
}

/// One material inside a cluster, positioned in the projected 2D space.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClusterPoint {
	/// First projected component.
	pub x: f64,
	/// Second projected component.
	pub y: f64,
	/// How often the material appears across prescriptions.
	pub usage_frequency: f64,
	/// Material display name.
	pub name: String,
}

/// A server-computed grouping of materials sharing property/flavor traits.
#[derive(Clone, Debug, Deserialize)]
pub struct Cluster {
	/// Zero-based cluster ordinal.
	pub cluster_id: u32,
	/// Dominant property descriptor for the cluster.
	pub common_properties: String,
	/// Dominant flavor descriptor for the cluster.
	pub common_flavors: String,
	/// Member materials.
	#[serde(default)]
	pub materials: Vec<ClusterPoint>,
}

#[derive(Debug, Deserialize)]
struct ClustersResponse {
	success: bool,
	message: Option<String>,
	#[serde(default)]
	clusters: Vec<Cluster>,
}

/// Reference to an efficacy category by name.
#[derive(Clone, Debug, Deserialize)]
pub struct CategoryRef {
	/// Category display name.
	pub name: String,
}

/// A material as listed inside a prescription detail.
#[derive(Clone, Debug, Deserialize)]
pub struct MaterialDetail {
	/// Material display name.
	pub name: String,
	/// Property classification, when recorded.
	pub property: Option<String>,
	/// Flavor classification, when recorded.
	pub flavor: Option<String>,
	/// Meridian classification, when recorded.
	pub meridian: Option<String>,
}

/// Full detail for one prescription.
#[derive(Clone, Debug, Deserialize)]
pub struct PrescriptionDetail {
	/// Prescription display name.
	pub name: String,
	/// Free-text description.
	pub description: Option<String>,
	/// Free-text efficacy summary.
	pub efficacy: Option<String>,
	/// Assigned efficacy categories.
	#[serde(default)]
	pub efficacy_categories: Vec<CategoryRef>,
	/// Component materials.
	#[serde(default)]
	pub materials: Vec<MaterialDetail>,
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	Ok(response.json::<T>().await?)
}

/// Ranked material usage list, descending by count.
pub async fn fetch_material_usage() -> Result<Vec<NamedValue>> {
	get_json("/api/material-usage").await
}

fn clusters_from_response(body: ClustersResponse) -> Result<Vec<Cluster>> {
	if !body.success {
		let message = body
			.message
			.unwrap_or_else(|| "Unable to generate clusters".to_owned());
		return Err(ApiError::Server(message));
	}
	Ok(body.clusters)
}

/// Server-computed material clusters. A `success: false` body is surfaced as
/// [`ApiError::Server`] carrying the server-supplied message.
pub async fn fetch_material_clusters() -> Result<Vec<Cluster>> {
	clusters_from_response(get_json("/api/material-clusters").await?)
}

/// URL of the graph endpoint for an optional material/prescription filter.
pub fn graph_url(filter: Option<GraphFilter>) -> String {
	match filter {
		Some(filter) => format!("/api/knowledge-graph{}", filter.query()),
		None => "/api/knowledge-graph".to_owned(),
	}
}

/// Node/link payload for the knowledge graph view.
pub async fn fetch_knowledge_graph(filter: Option<GraphFilter>) -> Result<GraphData> {
	get_json(&graph_url(filter)).await
}

/// Detail for a single prescription by identifier.
pub async fn fetch_prescription(id: u64) -> Result<PrescriptionDetail> {
	get_json(&format!("/api/prescription/{id}")).await
}

/// Last-request-wins guard for fetches that share one render target.
///
/// A component takes a token before sending; a completion whose token is no
/// longer current belongs to a superseded initialization and must be dropped.
#[derive(Clone, Default)]
pub struct RequestSeq {
	current: Rc<Cell<u64>>,
}

impl RequestSeq {
	/// Start a new request generation, invalidating all earlier tokens.
	pub fn begin(&self) -> u64 {
		let token = self.current.get() + 1;
		self.current.set(token);
		token
	}

	/// Whether `token` still identifies the newest request.
	pub fn is_current(&self, token: u64) -> bool {
		self.current.get() == token
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn usage_entries_parse() {
		let body = r#"[{"name": "甘草", "value": 120}, {"name": "人参", "value": 88}]"#;
		let entries: Vec<NamedValue> = serde_json::from_str(body).unwrap();
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].name, "甘草");
		assert_eq!(entries[0].value, 120.0);
	}

	#[test]
	fn cluster_response_success_yields_clusters() {
		let body = r#"{
			"success": true,
			"clusters": [{
				"cluster_id": 0,
				"common_properties": "warm",
				"common_flavors": "sweet",
				"materials": [{"x": 1.5, "y": -0.5, "usage_frequency": 12, "name": "甘草"}]
			}]
		}"#;
		let parsed: ClustersResponse = serde_json::from_str(body).unwrap();
		let clusters = clusters_from_response(parsed).unwrap();
		assert_eq!(clusters.len(), 1);
		assert_eq!(clusters[0].materials[0].name, "甘草");
	}

	#[test]
	fn cluster_response_failure_surfaces_server_message() {
		let body = r#"{"success": false, "message": "not enough materials"}"#;
		let parsed: ClustersResponse = serde_json::from_str(body).unwrap();
		match clusters_from_response(parsed) {
			Err(ApiError::Server(message)) => assert_eq!(message, "not enough materials"),
			other => panic!("expected server error, got {other:?}"),
		}
	}

	#[test]
	fn cluster_response_failure_without_message_gets_default() {
		let body = r#"{"success": false}"#;
		let parsed: ClustersResponse = serde_json::from_str(body).unwrap();
		match clusters_from_response(parsed) {
			Err(ApiError::Server(message)) => assert_eq!(message, "Unable to generate clusters"),
			other => panic!("expected server error, got {other:?}"),
		}
	}

	#[test]
	fn prescription_detail_tolerates_missing_lists() {
		let body = r#"{"name": "四君子汤"}"#;
		let detail: PrescriptionDetail = serde_json::from_str(body).unwrap();
		assert!(detail.materials.is_empty());
		assert!(detail.efficacy_categories.is_empty());
	}

	#[test]
	fn graph_url_carries_the_filter() {
		assert_eq!(graph_url(None), "/api/knowledge-graph");
		assert_eq!(
			graph_url(Some(GraphFilter::Material(42))),
			"/api/knowledge-graph?material_id=42"
		);
		assert_eq!(
			graph_url(Some(GraphFilter::Prescription(7))),
			"/api/knowledge-graph?prescription_id=7"
		);
	}

	#[test]
	fn request_seq_invalidates_stale_tokens() {
		let seq = RequestSeq::default();
		let first = seq.begin();
		assert!(seq.is_current(first));
		let second = seq.begin();
		assert!(!seq.is_current(first));
		assert!(seq.is_current(second));
	}
}
