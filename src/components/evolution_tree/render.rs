use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{
	BACKGROUND, EDGE_STROKE, EDGE_WIDTH, IMAGE_PLACEHOLDER_FILL, LABEL_FILL, LABEL_FONT, NODE_FILL,
	NODE_STROKE, NodeBox, Rect, Scene,
};
use super::types::Diagnostic;
use super::viewport::{ElementSize, Viewport};

/// Node images keyed by href, loaded lazily on first draw.
#[derive(Default)]
pub struct ImageCache {
	images: HashMap<String, HtmlImageElement>,
	failed: Rc<RefCell<HashSet<String>>>,
}

impl ImageCache {
	fn get(&mut self, href: &str) -> Option<&HtmlImageElement> {
		if self.failed.borrow().contains(href) {
			return None;
		}
		if !self.images.contains_key(href) {
			let img = HtmlImageElement::new().ok()?;
			let (failed, key) = (self.failed.clone(), href.to_owned());
			let on_error = Closure::<dyn FnMut()>::new(move || {
				if failed.borrow_mut().insert(key.clone()) {
					Diagnostic::AssetLoad { href: key.clone() }.report();
				}
			});
			img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
			on_error.forget();
			img.set_src(href);
			self.images.insert(href.to_owned(), img);
		}
		self.images
			.get(href)
			.filter(|img| img.complete() && img.natural_width() > 0)
	}
}

/// Paint the scene through the window described by `view`.
pub fn render(
	scene: &Scene,
	view: &Viewport,
	images: &mut ImageCache,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	let fit = view.fit(ElementSize { width, height });
	let k = fit.pixels_per_unit;
	let _ = ctx.set_transform(k, 0.0, 0.0, k, fit.offset_x - view.x * k, fit.offset_y - view.y * k);
	draw_connectors(scene, ctx);
	for node in &scene.nodes {
		draw_node(node, images, ctx);
	}
}

fn draw_connectors(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_STROKE);
	ctx.set_line_width(EDGE_WIDTH);
	for connector in &scene.connectors {
		let [start, rest @ ..] = &connector.points;
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		for p in rest {
			ctx.line_to(p.x, p.y);
		}
		ctx.stroke();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) {
	let (x, y, w, h) = (r.x, r.y, r.width, r.height);
	let radius = radius.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + radius, y);
	ctx.line_to(x + w - radius, y);
	let _ = ctx.arc(x + w - radius, y + radius, radius, -PI / 2.0, 0.0);
	ctx.line_to(x + w, y + h - radius);
	let _ = ctx.arc(x + w - radius, y + h - radius, radius, 0.0, PI / 2.0);
	ctx.line_to(x + radius, y + h);
	let _ = ctx.arc(x + radius, y + h - radius, radius, PI / 2.0, PI);
	ctx.line_to(x, y + radius);
	let _ = ctx.arc(x + radius, y + radius, radius, PI, 1.5 * PI);
	ctx.close_path();
}

fn draw_node(node: &NodeBox, images: &mut ImageCache, ctx: &CanvasRenderingContext2d) {
	rounded_rect(ctx, &node.frame, node.corner_radius);
	ctx.set_fill_style_str(NODE_FILL);
	ctx.fill();
	ctx.set_stroke_style_str(NODE_STROKE);
	ctx.set_line_width(1.0);
	ctx.stroke();

	let region = &node.image;
	match images.get(&node.image_href) {
		Some(img) => {
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				img,
				region.x,
				region.y,
				region.width,
				region.height,
			);
		}
		None => {
			ctx.set_fill_style_str(IMAGE_PLACEHOLDER_FILL);
			ctx.fill_rect(region.x, region.y, region.width, region.height);
		}
	}

	ctx.set_fill_style_str(LABEL_FILL);
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&node.label.text, node.label.anchor.x, node.label.anchor.y);
}
