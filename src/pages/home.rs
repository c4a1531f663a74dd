use leptos::callback::Callback;
use leptos::prelude::*;

use crate::components::evolution_tree::config::LayoutConfig;
use crate::components::evolution_tree::{
	DetailPanel, EvolutionTreeCanvas, Selection, TreeConfig, load_lines,
};

/// Evolution lines bundled with the app.
const LINES_JSON: &str = include_str!("../../data/lines.json");

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let selection = RwSignal::new(None::<Selection>);
	let on_select = Callback::new(move |sel: Selection| selection.set(Some(sel)));

	let lines = load_lines(LINES_JSON)
		.inspect_err(|e| log::error!("{e}"))
		.map(|lines| {
			log::info!("loaded {} evolution lines", lines.len());
			lines
				.into_iter()
				.map(|line| {
					let config = TreeConfig {
						layout: LayoutConfig {
							revisit: line.revisit,
							..Default::default()
						},
						..Default::default()
					};
					view! {
						<section class="evolution-line">
							<h2>{line.name}</h2>
							<EvolutionTreeCanvas
								entities=Signal::stored(line.monsters)
								on_select=on_select
								config=config
							/>
						</section>
					}
				})
				.collect_view()
		});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="evolution-page">
				<h1>"Monster Evolutions"</h1>
				<p class="subtitle">"Drag to pan. Scroll to zoom. Click a monster for details."</p>
				{lines}
			</div>
			<DetailPanel selection=selection />
		</ErrorBoundary>
	}
}
