use std::sync::Arc;

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::index::GraphIndex;
use super::state::Selection;
use super::types::{Entity, StatValue};

fn stat_text(value: &Option<StatValue>) -> String {
	value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Known names out of `names`, in order.
fn linked_names(names: &[String], lookup: &GraphIndex) -> Vec<String> {
	names.iter().filter(|n| lookup.contains(n)).cloned().collect()
}

#[component]
fn EntityLinks(
	names: Vec<String>,
	lookup: Arc<GraphIndex>,
	selection: RwSignal<Option<Selection>>,
) -> impl IntoView {
	names
		.into_iter()
		.map(|name| {
			let (label, lookup) = (name.clone(), lookup.clone());
			view! {
				<button
					class="link"
					on:click=move |_: MouseEvent| {
						selection
							.set(
								Some(Selection {
									name: name.clone(),
									lookup: lookup.clone(),
								}),
							)
					}
				>
					{label}
				</button>
			}
		})
		.collect_view()
}

#[component]
fn InfoField(label: &'static str, value: Option<String>) -> impl IntoView {
	view! {
		<div class="field">
			<span class="field-label">{label}</span>
			<span class="field-value">{value.unwrap_or_default()}</span>
		</div>
	}
}

/// Modal with the details of the selected entity.
#[component]
pub fn DetailPanel(
	selection: RwSignal<Option<Selection>>,
	#[prop(default = "images/monsters/".into(), into)] image_base: String,
) -> impl IntoView {
	let close = move |_: MouseEvent| selection.set(None);

	move || {
		let sel = selection.get()?;
		let entity: Entity = sel.entity()?.clone();
		let lookup = sel.lookup;
		let stats = entity.stats.clone().unwrap_or_default();
		let previous = linked_names(&entity.previous, &lookup);
		let next = linked_names(&entity.next, &lookup);
		let image = format!("{}{}", image_base, entity.image_or_placeholder());

		Some(view! {
			<div class="modal open" on:click=close>
				<div class="modal-content" on:click=|ev: MouseEvent| ev.stop_propagation()>
					<button class="close-modal" on:click=close>
						"×"
					</button>
					<h2 class="monster-title">{entity.name.clone()}</h2>
					<img class="modal-img" src=image alt=entity.name.clone() />
					<InfoField label="Attribute" value=entity.attribute.clone() />
					<InfoField label="Color" value=entity.color.clone() />
					<InfoField label="Stage" value=entity.stage.clone() />
					<InfoField label="Evolution" value=entity.evolution_condition.clone() />
					<div class="field">
						<span class="field-label">"Previous"</span>
						<EntityLinks names=previous lookup=lookup.clone() selection=selection />
					</div>
					<div class="field">
						<span class="field-label">"Next"</span>
						<EntityLinks names=next lookup=lookup.clone() selection=selection />
					</div>
					<div class="stats">
						<InfoField label="Cost" value=Some(stat_text(&stats.cost)) />
						<InfoField label="Cooldown" value=Some(stat_text(&stats.cooldown)) />
						<InfoField label="Critical" value=Some(stat_text(&stats.critical)) />
						<InfoField label="Attack" value=Some(stat_text(&stats.attack)) />
						<InfoField label="Speed" value=Some(stat_text(&stats.speed)) />
					</div>
				</div>
			</div>
		})
	}
}
