use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent};

use super::config::TreeConfig;
use super::layout::Position;
use super::state::{EvolutionTreeState, Selection};
use super::types::Entity;
use super::viewport::ElementSize;

/// Element-relative pointer position and rendered element size.
fn pointer(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (Position, ElementSize) {
	let rect = canvas.get_bounding_client_rect();
	(
		Position {
			x: ev.client_x() as f64 - rect.left(),
			y: ev.client_y() as f64 - rect.top(),
		},
		ElementSize {
			width: canvas.client_width() as f64,
			height: canvas.client_height() as f64,
		},
	)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	// the leptos prelude shadows `style()` with its own attribute setter
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

#[component]
pub fn EvolutionTreeCanvas(
	#[prop(into)] entities: Signal<Vec<Entity>>,
	#[prop(into)] on_select: Callback<Selection>,
	#[prop(optional)] config: TreeConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<EvolutionTreeState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let release_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, release_cb_init) =
		(state.clone(), animate.clone(), release_cb.clone());

	Effect::new(move |_| {
		let entities = entities.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			log::error!("no window available");
			return;
		};
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					log::error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				log::error!("canvas has no 2d context");
				return;
			}
		};

		let tree = EvolutionTreeState::new(entities, &config);
		canvas.set_width(tree.scene.canvas_width as u32);
		canvas.set_height(tree.scene.canvas_height as u32);
		set_cursor(&canvas, tree.viewport.cursor());
		let first_render = state_init.borrow().is_none();
		*state_init.borrow_mut() = Some(tree);

		if !first_render {
			return;
		}

		// releasing the button anywhere ends a pan
		let (state_release, canvas_release) = (state_init.clone(), canvas.clone());
		*release_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_release.borrow_mut() {
				s.viewport.release();
				set_cursor(&canvas_release, s.viewport.cursor());
			}
		}));
		if let Some(ref cb) = *release_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.paint(&ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (at, _) = pointer(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.viewport.press(ev.button(), at) {
				set_cursor(&canvas, s.viewport.cursor());
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (at, element) = pointer(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.viewport.move_to(at, element);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (at, element) = pointer(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.viewport.wheel(ev.delta_y(), at, element);
		}
	};

	let state_cl = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (at, element) = pointer(&canvas, &ev);
		// release the borrow before handing the selection out
		let selection = state_cl
			.borrow()
			.as_ref()
			.and_then(|s| s.select_at(at, element));
		if let Some(selection) = selection {
			on_select.run(selection);
		}
	};

	let state_rs = state.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rs.borrow_mut() {
			s.viewport.reset();
		}
	};

	view! {
		<div class="evolution-tree">
			<button class="reset-view" on:click=on_reset>
				"Reset view"
			</button>
			<canvas
				node_ref=canvas_ref
				class="evolution-tree-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:wheel=on_wheel
				on:click=on_click
				style="display: block; width: 100%; cursor: grab;"
			/>
		</div>
	}
}
