//! Prescription search, creation, and import page.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::forms::{SearchableSelect, SelectMode, SelectOption, UploadForm};
use crate::components::prescription::PrescriptionDetails;

/// Prescription id requested via the `view_prescription` query parameter.
pub fn viewed_prescription(raw: Option<&str>) -> Option<u64> {
	raw.and_then(|value| value.parse().ok())
}

/// Option lists rendered into the page by the server. Until that wiring
/// lands, these mirror the shape of the real catalogs.
fn material_options() -> Vec<SelectOption> {
	["甘草", "当归", "人参", "白术", "茯苓", "黄芪", "陈皮", "白芍"]
		.into_iter()
		.map(SelectOption::plain)
		.collect()
}

fn category_options() -> Vec<SelectOption> {
	["补气", "补血", "清热", "祛湿", "理气", "活血"]
		.into_iter()
		.map(SelectOption::plain)
		.collect()
}

fn import_type_options() -> Vec<SelectOption> {
	vec![
		SelectOption {
			value: "materials".into(),
			label: "Medicinal Materials".into(),
		},
		SelectOption {
			value: "prescriptions".into(),
			label: "Prescriptions".into(),
		},
	]
}

/// Search filters, the creation form, the data import form, and the detail
/// panel for whichever prescription the query string asks to view.
#[component]
pub fn Prescriptions() -> impl IntoView {
	let query = use_query_map();
	let viewed = viewed_prescription(query.get_untracked().get("view_prescription").as_deref());

	let materials = Signal::derive(material_options);
	let categories = Signal::derive(category_options);

	let (search_material, set_search_material) = signal(Vec::<String>::new());
	let (search_category, set_search_category) = signal(Vec::<String>::new());
	let (form_materials, set_form_materials) = signal(Vec::<String>::new());
	let (form_categories, set_form_categories) = signal(Vec::<String>::new());
	let (base_materials, set_base_materials) = signal(Vec::<String>::new());

	view! {
		<div class="prescriptions-page">
			<section class="search-filters">
				<h2>"Search"</h2>
				<SearchableSelect
					options=materials
					mode=SelectMode::Single
					placeholder_key="select_a_medicinal_material"
					on_change=move |values| set_search_material.set(values)
				/>
				<SearchableSelect
					options=categories
					mode=SelectMode::Single
					placeholder_key="select_an_efficacy_category"
					on_change=move |values| set_search_category.set(values)
				/>
				<p class="active-filters">
					{move || {
						let mut active = search_material.get();
						active.extend(search_category.get());
						active.join(" · ")
					}}
				</p>
			</section>

			<section class="prescription-form">
				<h2>"New Prescription"</h2>
				<SearchableSelect
					options=materials
					mode=SelectMode::Multiple
					placeholder_key="select_medicinal_materials"
					on_change=move |values| set_form_materials.set(values)
				/>
				<SearchableSelect
					options=categories
					mode=SelectMode::Tags
					placeholder_key="enter_efficacy_categories"
					on_change=move |values| set_form_categories.set(values)
				/>
				<SearchableSelect
					options=materials
					mode=SelectMode::Multiple
					placeholder_key="select_base_materials"
					on_change=move |values| set_base_materials.set(values)
				/>
				<p class="form-summary">
					{move || {
						format!(
							"{} materials, {} categories, {} base",
							form_materials.get().len(),
							form_categories.get().len(),
							base_materials.get().len(),
						)
					}}
				</p>
			</section>

			<section class="data-import">
				<h2>"Import Data"</h2>
				<UploadForm import_types=import_type_options() />
			</section>

			{viewed
				.map(|id| {
					view! {
						<section class="prescription-detail">
							<PrescriptionDetails id=id />
						</section>
					}
				})}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn view_param_parses_to_id() {
		assert_eq!(viewed_prescription(Some("17")), Some(17));
	}

	#[test]
	fn missing_or_garbled_view_param_shows_nothing() {
		assert_eq!(viewed_prescription(None), None);
		assert_eq!(viewed_prescription(Some("")), None);
		assert_eq!(viewed_prescription(Some("seventeen")), None);
	}
}
