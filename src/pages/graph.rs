//! Knowledge graph page.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::knowledge_graph::{GraphFilter, KnowledgeGraphCanvas, reset_graph};

/// Resolve the active filter from the page's query parameters. A material
/// filter takes precedence when both are present; unparseable ids mean no
/// filter.
pub fn filter_from_query(material: Option<&str>, prescription: Option<&str>) -> Option<GraphFilter> {
	if let Some(id) = material.and_then(|raw| raw.parse().ok()) {
		return Some(GraphFilter::Material(id));
	}
	prescription
		.and_then(|raw| raw.parse().ok())
		.map(GraphFilter::Prescription)
}

/// Full-width knowledge graph with a reset control that navigates back to
/// the unfiltered view.
#[component]
pub fn KnowledgeGraphPage() -> impl IntoView {
	let query = use_query_map();
	let filter = filter_from_query(
		query.get_untracked().get("material_id").as_deref(),
		query.get_untracked().get("prescription_id").as_deref(),
	);
	let filtered = filter.is_some();

	view! {
		<div class="knowledge-graph-page">
			<div class="graph-toolbar">
				<h1>"Knowledge Graph"</h1>
				<Show when=move || filtered>
					<button class="reset-button" on:click=move |_| reset_graph()>
						"Show Full Graph"
					</button>
				</Show>
			</div>
			<KnowledgeGraphCanvas filter=filter />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn material_filter_wins_over_prescription() {
		assert_eq!(
			filter_from_query(Some("42"), Some("7")),
			Some(GraphFilter::Material(42))
		);
	}

	#[test]
	fn prescription_filter_applies_alone() {
		assert_eq!(
			filter_from_query(None, Some("7")),
			Some(GraphFilter::Prescription(7))
		);
	}

	#[test]
	fn bad_or_absent_ids_mean_no_filter() {
		assert_eq!(filter_from_query(None, None), None);
		assert_eq!(filter_from_query(Some("abc"), None), None);
		assert_eq!(filter_from_query(Some(""), Some("x")), None);
	}
}
