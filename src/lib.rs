//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod api;
pub mod i18n;
pub mod theme;

pub mod components;
mod pages;

// Top-Level pages
use crate::pages::graph::KnowledgeGraphPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::prescriptions::Prescriptions;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the dashboard, the graph and prescription
/// pages, and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Materia Knowledge Browser" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="main-nav">
				<a href="/">"Dashboard"</a>
				<a href="/knowledge-graph">"Knowledge Graph"</a>
				<a href="/prescriptions">"Prescriptions"</a>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/knowledge-graph") view=KnowledgeGraphPage />
				<Route path=path!("/prescriptions") view=Prescriptions />
			</Routes>
		</Router>
	}
}
