//! Wire types and visual encoding for the knowledge graph.

use serde::Deserialize;

use crate::i18n::tr;

/// Entity class of a graph node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A medicinal material.
	Material,
	/// A prescription composed of materials.
	Prescription,
	/// Anything the server may add later.
	#[default]
	#[serde(other)]
	Other,
}

impl NodeKind {
	/// Fill color for the node circle.
	pub fn color(self) -> &'static str {
		match self {
			NodeKind::Material => "#5470c6",
			NodeKind::Prescription => "#91cc75",
			NodeKind::Other => "#909399",
		}
	}

	/// Circle radius in world units. Prescriptions are drawn larger.
	pub fn radius(self) -> f64 {
		match self {
			NodeKind::Material => 10.0,
			_ => 15.0,
		}
	}
}

/// Relationship class of a graph edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	/// Prescription-contains-material.
	Contains,
	/// Materials that reinforce each other.
	Synergistic,
	/// Materials that counteract each other.
	Antagonistic,
	/// Any other relationship.
	#[default]
	#[serde(other)]
	Other,
}

impl LinkKind {
	/// Stroke color for the edge line.
	pub fn color(self) -> &'static str {
		match self {
			LinkKind::Contains => "#909399",
			LinkKind::Synergistic => "#67c23a",
			LinkKind::Antagonistic => "#f56c6c",
			LinkKind::Other => "#e6a23c",
		}
	}
}

/// A node as delivered by the graph endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Stable identifier links refer to.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Entity class.
	#[serde(rename = "type", default)]
	pub kind: NodeKind,
	/// Property classification (materials only).
	#[serde(default)]
	pub property: Option<String>,
	/// Flavor classification (materials only).
	#[serde(default)]
	pub flavor: Option<String>,
	/// Meridian classification (materials only).
	#[serde(default)]
	pub meridian: Option<String>,
	/// Efficacy text (prescriptions only).
	#[serde(default)]
	pub efficacy: Option<String>,
}

impl GraphNode {
	/// Multi-line hover text describing the node.
	pub fn tooltip(&self) -> String {
		let na = tr("not_available");
		match self.kind {
			NodeKind::Material => format!(
				"{}\n{}: {}\n{}: {}\n{}: {}",
				self.name,
				tr("property_label"),
				self.property.as_deref().unwrap_or(&na),
				tr("flavor_label"),
				self.flavor.as_deref().unwrap_or(&na),
				tr("meridian_label"),
				self.meridian.as_deref().unwrap_or(&na),
			),
			_ => format!(
				"{}\n{}: {}",
				self.name,
				tr("efficacy_label"),
				self.efficacy.as_deref().unwrap_or(&na),
			),
		}
	}
}

/// An edge as delivered by the graph endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relationship class.
	#[serde(rename = "type", default)]
	pub kind: LinkKind,
}

/// Full graph payload.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// All edges. Edges referencing unknown node ids are dropped on load.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

/// Restricts the graph to the neighborhood of one entity. The two variants
/// are mutually exclusive by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFilter {
	/// Only nodes related to this material.
	Material(u64),
	/// Only nodes related to this prescription.
	Prescription(u64),
}

impl GraphFilter {
	/// Query-string suffix for the graph API endpoint.
	pub fn query(self) -> String {
		match self {
			GraphFilter::Material(id) => format!("?material_id={id}"),
			GraphFilter::Prescription(id) => format!("?prescription_id={id}"),
		}
	}

	/// Page URL that applies this filter via full navigation.
	pub fn page_url(self) -> String {
		format!("/knowledge-graph{}", self.query())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn graph_payload_parses_with_typed_tags() {
		let body = r#"{
			"nodes": [
				{"id": "m1", "name": "甘草", "type": "material", "property": "warm"},
				{"id": "p1", "name": "四君子汤", "type": "prescription", "efficacy": "tonify qi"},
				{"id": "x1", "name": "mystery", "type": "herbarium"}
			],
			"links": [
				{"source": "p1", "target": "m1", "type": "contains"},
				{"source": "m1", "target": "x1", "type": "rumored"}
			]
		}"#;
		let data: GraphData = serde_json::from_str(body).unwrap();
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.nodes[0].kind, NodeKind::Material);
		assert_eq!(data.nodes[1].kind, NodeKind::Prescription);
		assert_eq!(data.nodes[2].kind, NodeKind::Other);
		assert_eq!(data.links[0].kind, LinkKind::Contains);
		assert_eq!(data.links[1].kind, LinkKind::Other);
	}

	#[test]
	fn empty_payload_parses_to_empty_vecs() {
		let data: GraphData = serde_json::from_str(r#"{"nodes": [], "links": []}"#).unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}

	#[test]
	fn material_filter_url_excludes_prescription_param() {
		let url = GraphFilter::Material(42).page_url();
		assert!(url.contains("material_id=42"));
		assert!(!url.contains("prescription_id"));
	}

	#[test]
	fn prescription_filter_url_excludes_material_param() {
		let url = GraphFilter::Prescription(42).page_url();
		assert!(url.contains("prescription_id=42"));
		assert!(!url.contains("material_id"));
	}

	#[test]
	fn node_visuals_keyed_by_kind() {
		assert_eq!(NodeKind::Material.color(), "#5470c6");
		assert_eq!(NodeKind::Prescription.color(), "#91cc75");
		assert_eq!(NodeKind::Other.color(), "#909399");
		assert!(NodeKind::Prescription.radius() > NodeKind::Material.radius());
	}

	#[test]
	fn link_colors_have_a_fallback() {
		assert_eq!(LinkKind::Contains.color(), "#909399");
		assert_eq!(LinkKind::Synergistic.color(), "#67c23a");
		assert_eq!(LinkKind::Antagonistic.color(), "#f56c6c");
		assert_eq!(LinkKind::Other.color(), "#e6a23c");
	}
}
