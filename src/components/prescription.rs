//! Prescription detail panel.
//!
//! Loads one prescription by id and renders its summary and material grid,
//! with localized placeholders for every field the record may omit.

use leptos::prelude::*;
use log::error;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, MaterialDetail, PrescriptionDetail, RequestSeq};
use crate::i18n::tr;

/// What the panel is currently showing.
#[derive(Clone)]
enum LoadState {
	Pending,
	Ready(PrescriptionDetail),
	Failed,
}

/// Description text with its localized fallback applied.
fn description_text(detail: &PrescriptionDetail) -> String {
	detail
		.description
		.clone()
		.filter(|text| !text.is_empty())
		.unwrap_or_else(|| tr("no_description"))
}

/// Efficacy text with its localized fallback applied.
fn efficacy_text(detail: &PrescriptionDetail) -> String {
	detail
		.efficacy
		.clone()
		.filter(|text| !text.is_empty())
		.unwrap_or_else(|| tr("not_available"))
}

/// The three classification lines shown under each material name. Absent
/// classifications render as the localized not-available marker.
fn material_lines(material: &MaterialDetail) -> Vec<String> {
	let field = |value: &Option<String>| {
		value
			.clone()
			.filter(|text| !text.is_empty())
			.unwrap_or_else(|| tr("not_available"))
	};
	vec![
		format!("{}: {}", tr("property_label"), field(&material.property)),
		format!("{}: {}", tr("flavor_label"), field(&material.flavor)),
		format!("{}: {}", tr("meridian_label"), field(&material.meridian)),
	]
}

/// Detail view for one prescription: spinner while loading, then the summary
/// and material grid, or a localized error alert when the fetch fails.
#[component]
pub fn PrescriptionDetails(
	/// Identifier of the prescription to show.
	id: u64,
) -> impl IntoView {
	let (state, set_state) = signal(LoadState::Pending);
	let seq = RequestSeq::default();

	Effect::new(move |_| {
		let seq = seq.clone();
		let token = seq.begin();
		set_state.set(LoadState::Pending);
		spawn_local(async move {
			let result = api::fetch_prescription(id).await;
			if !seq.is_current(token) {
				return;
			}
			match result {
				Ok(detail) => set_state.set(LoadState::Ready(detail)),
				Err(err) => {
					error!("error fetching prescription {id}: {err}");
					set_state.set(LoadState::Failed);
				}
			}
		});
	});

	view! {
		<div class="prescription-details">
			{move || match state.get() {
				LoadState::Pending => view! {
					<div class="loading-spinner">{tr("loading")}</div>
				}
				.into_any(),
				LoadState::Failed => view! {
					<div class="alert alert-danger">{tr("load_error")}</div>
				}
				.into_any(),
				LoadState::Ready(detail) => {
					view! {
						<div class="prescription-summary">
							<h3>{detail.name.clone()}</h3>
							<p>{description_text(&detail)}</p>
							<p>
								<strong>{format!("{}: ", tr("efficacy_label"))}</strong>
								{efficacy_text(&detail)}
							</p>
							<p class="category-badges">
								<strong>{format!("{}: ", tr("categories_label"))}</strong>
								{if detail.efficacy_categories.is_empty() {
									view! { <span>{tr("none_specified")}</span> }.into_any()
								} else {
									detail
										.efficacy_categories
										.iter()
										.map(|category| {
											view! {
												<span class="badge">{category.name.clone()}</span>
											}
										})
										.collect_view()
										.into_any()
								}}
							</p>
						</div>
						<h4>{tr("medicinal_materials_heading")}</h4>
						{if detail.materials.is_empty() {
							view! { <p class="no-materials">{tr("no_materials")}</p> }.into_any()
						} else {
							view! {
								<div class="materials-grid">
									{detail
										.materials
										.iter()
										.map(|material| {
											view! {
												<div class="material-card">
													<strong>{material.name.clone()}</strong>
													{material_lines(material)
														.into_iter()
														.map(|line| view! { <div>{line}</div> })
														.collect_view()}
												</div>
											}
										})
										.collect_view()}
								</div>
							}
							.into_any()
						}}
					}
					.into_any()
				}
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn detail(description: Option<&str>, efficacy: Option<&str>) -> PrescriptionDetail {
		serde_json::from_str(&format!(
			r#"{{"name": "四君子汤", "description": {}, "efficacy": {}}}"#,
			description.map_or("null".to_owned(), |d| format!("\"{d}\"")),
			efficacy.map_or("null".to_owned(), |e| format!("\"{e}\"")),
		))
		.unwrap()
	}

	#[test]
	fn missing_description_gets_placeholder() {
		assert_eq!(description_text(&detail(None, None)), "No description available.");
		assert_eq!(description_text(&detail(Some(""), None)), "No description available.");
		assert_eq!(description_text(&detail(Some("tonifies qi"), None)), "tonifies qi");
	}

	#[test]
	fn missing_efficacy_gets_not_available() {
		assert_eq!(efficacy_text(&detail(None, None)), "N/A");
		assert_eq!(efficacy_text(&detail(None, Some("invigorates"))), "invigorates");
	}

	#[test]
	fn material_lines_label_each_classification() {
		let material: MaterialDetail = serde_json::from_str(
			r#"{"name": "人参", "property": "warm", "flavor": null, "meridian": "spleen"}"#,
		)
		.unwrap();
		let lines = material_lines(&material);
		assert_eq!(lines[0], "Property: warm");
		assert_eq!(lines[1], "Flavor: N/A");
		assert_eq!(lines[2], "Meridian: spleen");
	}
}
