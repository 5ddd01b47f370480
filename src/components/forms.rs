//! Form widgets: searchable selects and upload validation.
//!
//! These replace the original select-enhancement glue with owned components.
//! Selection logic and upload gating are plain functions so they stay
//! testable without a DOM.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::i18n::tr;

/// One selectable entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
	/// Submitted value.
	pub value: String,
	/// Displayed label.
	pub label: String,
}

impl SelectOption {
	/// Option whose value and label coincide.
	pub fn plain(text: impl Into<String>) -> Self {
		let text = text.into();
		Self {
			value: text.clone(),
			label: text,
		}
	}
}

/// Selection behavior of a [`SearchableSelect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectMode {
	/// At most one value (search filters).
	Single,
	/// Any number of values (material lists).
	Multiple,
	/// Multiple values plus free-text entries (efficacy categories).
	Tags,
}

/// Case-insensitive substring filter over the option labels.
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
	if query.is_empty() {
		return options.to_vec();
	}
	let needle = query.to_lowercase();
	options
		.iter()
		.filter(|option| option.label.to_lowercase().contains(&needle))
		.cloned()
		.collect()
}

/// Split free-tag input on commas, dropping empty fragments.
pub fn split_tags(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|tag| !tag.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Apply one click to the selection. Single mode replaces; the other modes
/// toggle membership.
pub fn toggle_selection(mut selected: Vec<String>, value: &str, mode: SelectMode) -> Vec<String> {
	match mode {
		SelectMode::Single => vec![value.to_owned()],
		SelectMode::Multiple | SelectMode::Tags => {
			if let Some(pos) = selected.iter().position(|v| v == value) {
				selected.remove(pos);
			} else {
				selected.push(value.to_owned());
			}
			selected
		}
	}
}

/// The import submit control is enabled only when a file is chosen and an
/// import type is selected. No content or size validation happens here.
pub fn upload_ready(has_file: bool, import_type: &str) -> bool {
	has_file && !import_type.is_empty()
}

/// A select enhanced with a search box; multi-select and free-tag entry
/// depending on `mode`.
#[component]
pub fn SearchableSelect(
	#[prop(into)] options: Signal<Vec<SelectOption>>,
	mode: SelectMode,
	/// Translation key for the placeholder text.
	placeholder_key: &'static str,
	#[prop(into)] on_change: Callback<Vec<String>>,
) -> impl IntoView {
	let (query, set_query) = signal(String::new());
	let (selected, set_selected) = signal(Vec::<String>::new());
	let (open, set_open) = signal(false);

	let pick = move |value: String| {
		let next = toggle_selection(selected.get_untracked(), &value, mode);
		set_selected.set(next.clone());
		on_change.run(next);
		if mode == SelectMode::Single {
			set_open.set(false);
		}
		set_query.set(String::new());
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if mode != SelectMode::Tags {
			return;
		}
		if ev.key() == "Enter" || ev.key() == "," {
			ev.prevent_default();
			let mut next = selected.get_untracked();
			for tag in split_tags(&query.get_untracked()) {
				if !next.contains(&tag) {
					next.push(tag);
				}
			}
			set_selected.set(next.clone());
			on_change.run(next);
			set_query.set(String::new());
		}
	};

	let remove_chip = move |value: String| {
		let mut next = selected.get_untracked();
		next.retain(|v| v != &value);
		set_selected.set(next.clone());
		on_change.run(next);
	};

	view! {
		<div class="searchable-select" style="position: relative;">
			<div class="selected-chips">
				<For
					each=move || selected.get()
					key=|value| value.clone()
					children=move |value: String| {
						let chip = value.clone();
						view! {
							<span class="chip" on:click=move |_: MouseEvent| remove_chip(chip.clone())>
								{value.clone()}
								" ×"
							</span>
						}
					}
				/>
			</div>
			<input
				type="text"
				prop:value=move || query.get()
				placeholder=tr(placeholder_key)
				on:input=move |ev| {
					set_query.set(event_target_value(&ev));
					set_open.set(true);
				}
				on:focus=move |_| set_open.set(true)
				on:keydown=on_keydown
			/>
			<Show when=move || open.get()>
				<ul class="select-dropdown">
					<For
						each=move || filter_options(&options.get(), &query.get())
						key=|option| option.value.clone()
						children=move |option: SelectOption| {
							let value = option.value.clone();
							view! {
								<li
									class="select-option"
									class:is-selected=move || {
										selected.get().contains(&value)
									}
									on:mousedown=move |_: MouseEvent| pick(option.value.clone())
								>
									{option.label.clone()}
								</li>
							}
						}
					/>
				</ul>
			</Show>
		</div>
	}
}

/// Data-import form: a file picker plus an import-type select, with the
/// submit control gated on both being set.
#[component]
pub fn UploadForm(
	/// Import types offered by the server.
	import_types: Vec<SelectOption>,
	/// Form target.
	#[prop(default = "/import")]
	action: &'static str,
) -> impl IntoView {
	let (has_file, set_has_file) = signal(false);
	let (import_type, set_import_type) = signal(String::new());

	let on_file_change = move |ev: web_sys::Event| {
		let chosen = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
			.and_then(|input| input.files())
			.map(|files| files.length() > 0)
			.unwrap_or(false);
		set_has_file.set(chosen);
	};

	view! {
		<form action=action method="post" enctype="multipart/form-data" class="upload-form">
			<input type="file" name="file" id="file" on:change=on_file_change />
			<select
				name="import_type"
				id="import_type"
				on:change=move |ev| set_import_type.set(event_target_value(&ev))
			>
				<option value="">"--"</option>
				{import_types
					.into_iter()
					.map(|option| {
						view! { <option value=option.value.clone()>{option.label.clone()}</option> }
					})
					.collect_view()}
			</select>
			<button
				type="submit"
				id="upload_btn"
				disabled=move || !upload_ready(has_file.get(), &import_type.get())
			>
				"Import"
			</button>
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options(labels: &[&str]) -> Vec<SelectOption> {
		labels.iter().map(|l| SelectOption::plain(*l)).collect()
	}

	#[test]
	fn filtering_is_case_insensitive_substring() {
		let opts = options(&["Ginseng", "Licorice", "Ginger"]);
		let hits = filter_options(&opts, "gin");
		assert_eq!(hits.len(), 2);
		assert!(filter_options(&opts, "").len() == 3);
		assert!(filter_options(&opts, "zzz").is_empty());
	}

	#[test]
	fn tags_split_on_commas_and_trim() {
		assert_eq!(split_tags("tonify, clear heat ,, "), vec!["tonify", "clear heat"]);
		assert!(split_tags("  ").is_empty());
	}

	#[test]
	fn single_mode_replaces_the_selection() {
		let selected = toggle_selection(vec!["a".into()], "b", SelectMode::Single);
		assert_eq!(selected, vec!["b"]);
	}

	#[test]
	fn multiple_mode_toggles_membership() {
		let selected = toggle_selection(vec![], "a", SelectMode::Multiple);
		let selected = toggle_selection(selected, "b", SelectMode::Multiple);
		assert_eq!(selected, vec!["a", "b"]);
		let selected = toggle_selection(selected, "a", SelectMode::Multiple);
		assert_eq!(selected, vec!["b"]);
	}

	#[test]
	fn upload_needs_both_file_and_type() {
		assert!(!upload_ready(false, ""));
		assert!(!upload_ready(true, ""));
		assert!(!upload_ready(false, "materials"));
		assert!(upload_ready(true, "materials"));
	}
}
