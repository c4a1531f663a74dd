// dependencies are used by the library half of the crate
#![allow(unused_crate_dependencies)]

use evolution_tree_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App)
}
