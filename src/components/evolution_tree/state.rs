use std::sync::Arc;

use web_sys::CanvasRenderingContext2d;

use super::config::TreeConfig;
use super::index::GraphIndex;
use super::layout::{Position, layout};
use super::render::{self, ImageCache};
use super::scene::{Scene, build_scene};
use super::types::Entity;
use super::viewport::{ElementSize, ViewportController};

/// A node was activated: its name plus the lookup it came from.
#[derive(Clone, Debug)]
pub struct Selection {
	pub name: String,
	pub lookup: Arc<GraphIndex>,
}

impl Selection {
	pub fn entity(&self) -> Option<&Entity> {
		self.lookup.get(&self.name)
	}
}

/// Everything one rendered tree view owns.
pub struct EvolutionTreeState {
	pub index: Arc<GraphIndex>,
	pub scene: Scene,
	pub viewport: ViewportController,
	pub images: ImageCache,
}

impl EvolutionTreeState {
	pub fn new(entities: Vec<Entity>, config: &TreeConfig) -> Self {
		let index = Arc::new(GraphIndex::new(entities));
		let placed = layout(&index, &config.layout);
		let scene = build_scene(&index, &placed, &config.layout, &config.scene);
		log::info!(
			"built scene: {} nodes, {} connectors, {}x{}",
			scene.nodes.len(),
			scene.connectors.len(),
			scene.canvas_width,
			scene.canvas_height
		);
		let viewport = ViewportController::new(scene.view_width, scene.view_height, config.viewport);
		Self {
			index,
			scene,
			viewport,
			images: ImageCache::default(),
		}
	}

	/// Resolve a click at a screen point into a selection. A click that ends
	/// a drag selects nothing.
	pub fn select_at(&self, at: Position, element: ElementSize) -> Option<Selection> {
		if !self.viewport.is_click() {
			return None;
		}
		let point = self.viewport.screen_to_scene(at, element);
		let node = self.scene.node_at(point)?;
		log::debug!("selected {}", node.name);
		Some(Selection {
			name: node.name.clone(),
			lookup: Arc::clone(&self.index),
		})
	}

	pub fn paint(&mut self, ctx: &CanvasRenderingContext2d) {
		let view = self.viewport.view();
		render::render(
			&self.scene,
			&view,
			&mut self.images,
			ctx,
			self.scene.canvas_width,
			self.scene.canvas_height,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::super::index::tests::entity;
	use super::super::viewport::PRIMARY_BUTTON;
	use super::*;

	fn state() -> EvolutionTreeState {
		EvolutionTreeState::new(
			vec![
				entity("A", &[], &["B", "C"]),
				entity("B", &["A"], &["D"]),
				entity("C", &["A"], &[]),
				entity("D", &["B"], &[]),
			],
			&TreeConfig::default(),
		)
	}

	// element drawn at the same size as the initial window
	const ELEMENT: ElementSize = ElementSize {
		width: 1200.0,
		height: 600.0,
	};

	#[test]
	fn click_on_node_selects_it_with_full_lookup() {
		let mut s = state();
		let at = Position { x: 240.0, y: 200.0 };
		s.viewport.press(PRIMARY_BUTTON, at);
		s.viewport.release();

		let sel = s.select_at(at, ELEMENT).unwrap();
		assert_eq!(sel.name, "C");
		assert_eq!(sel.lookup.len(), 4);
		assert_eq!(sel.entity().map(|e| e.name.as_str()), Some("C"));
	}

	#[test]
	fn click_on_background_selects_nothing() {
		let s = state();
		assert!(s.select_at(Position { x: 5.0, y: 5.0 }, ELEMENT).is_none());
	}

	#[test]
	fn drag_release_does_not_select() {
		let mut s = state();
		s.viewport.press(PRIMARY_BUTTON, Position { x: 240.0, y: 260.0 });
		s.viewport.move_to(Position { x: 240.0, y: 200.0 }, ELEMENT);
		s.viewport.release();
		assert!(s.select_at(Position { x: 240.0, y: 200.0 }, ELEMENT).is_none());
	}

	#[test]
	fn selection_uses_panned_view() {
		let mut s = state();
		s.viewport.press(PRIMARY_BUTTON, Position { x: 400.0, y: 400.0 });
		s.viewport.move_to(Position { x: 600.0, y: 400.0 }, ELEMENT);
		s.viewport.release();
		// a following short press is a click again
		s.viewport.press(PRIMARY_BUTTON, Position { x: 440.0, y: 200.0 });
		s.viewport.release();

		// content moved 200 px right, so C now sits under x = 440
		let sel = s.select_at(Position { x: 440.0, y: 200.0 }, ELEMENT).unwrap();
		assert_eq!(sel.name, "C");
	}

	#[test]
	fn small_tree_is_drawn_without_stretching() {
		let s = EvolutionTreeState::new(
			vec![entity("A", &[], &["B"]), entity("B", &["A"], &[])],
			&TreeConfig::default(),
		);
		// canvas floors and view floors have different aspect ratios
		let canvas = ElementSize {
			width: s.scene.canvas_width,
			height: s.scene.canvas_height,
		};
		assert_ne!(
			s.scene.canvas_width / s.scene.canvas_height,
			s.scene.view_width / s.scene.view_height
		);

		let frame = s.scene.nodes[0].frame;
		let top_left = s.viewport.scene_to_screen(Position { x: frame.x, y: frame.y }, canvas);
		let bottom_right = s.viewport.scene_to_screen(
			Position {
				x: frame.x + frame.width,
				y: frame.y + frame.height,
			},
			canvas,
		);
		let (w, h) = (bottom_right.x - top_left.x, bottom_right.y - top_left.y);
		assert!((w - h).abs() < 1e-9, "{w}x{h}");

		// clicking the middle of the drawn box still selects it
		let middle = Position {
			x: (top_left.x + bottom_right.x) / 2.0,
			y: (top_left.y + bottom_right.y) / 2.0,
		};
		assert_eq!(s.select_at(middle, canvas).map(|sel| sel.name), Some("A".into()));
	}
}
