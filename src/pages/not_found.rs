use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"404: Page Not Found"</h1>
			<p>
				<a href="/">"Back to the dashboard"</a>
			</p>
		</div>
	}
}
