//! Trunk entry point: mount the app into the document body.

// The package's dependency table serves the library target.
#![allow(unused_crate_dependencies)]

use materia_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
