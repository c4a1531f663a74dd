//! Drawable primitives for a laid-out evolution graph.

use super::config::{LayoutConfig, SceneConfig};
use super::index::GraphIndex;
use super::layout::{Layout, Position};
use super::types::Diagnostic;

pub const BACKGROUND: &str = "#11141d";
pub const EDGE_STROKE: &str = "#394254";
pub const EDGE_WIDTH: f64 = 1.5;
pub const NODE_FILL: &str = "#1a1f2e";
pub const NODE_STROKE: &str = "#6ea8fe";
pub const IMAGE_PLACEHOLDER_FILL: &str = "#252b3b";
pub const LABEL_FILL: &str = "#ffffff";
pub const LABEL_FONT: &str = "14px sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn contains(&self, p: Position) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}
}

/// Orthogonal elbow from a parent's right edge into a child's left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
	pub from: String,
	pub to: String,
	pub points: [Position; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
	pub text: String,
	/// Center of the baseline.
	pub anchor: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub name: String,
	pub frame: Rect,
	pub corner_radius: f64,
	pub image: Rect,
	pub image_href: String,
	pub label: Label,
}

/// Everything needed to paint one graph, in scene coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub connectors: Vec<Connector>,
	pub nodes: Vec<NodeBox>,
	/// Backing size of the drawing surface.
	pub canvas_width: f64,
	pub canvas_height: f64,
	/// Size of the initial visible window.
	pub view_width: f64,
	pub view_height: f64,
}

impl Scene {
	/// Topmost node under a scene-space point.
	pub fn node_at(&self, p: Position) -> Option<&NodeBox> {
		self.nodes.iter().rev().find(|node| node.frame.contains(p))
	}
}

fn connector(from: &str, to: &str, parent: Position, child: Position, grid: &LayoutConfig) -> Connector {
	let (px, py) = (parent.x + grid.node_width, parent.y + grid.node_height / 2.0);
	let (cx, cy) = (child.x, child.y + grid.node_height / 2.0);
	let mid = (px + cx) / 2.0;
	Connector {
		from: from.to_owned(),
		to: to.to_owned(),
		points: [
			Position { x: px, y: py },
			Position { x: mid, y: py },
			Position { x: mid, y: cy },
			Position { x: cx, y: cy },
		],
	}
}

/// Turn positions and edges into connectors, node boxes and scene bounds.
pub fn build_scene(index: &GraphIndex, layout: &Layout, grid: &LayoutConfig, config: &SceneConfig) -> Scene {
	let mut connectors = Vec::new();
	for entity in index.entities() {
		for child in index.children(&entity.name) {
			match (layout.position(&entity.name), layout.position(child)) {
				(Some(p), Some(c)) => connectors.push(connector(&entity.name, child, p, c, grid)),
				_ => Diagnostic::MissingReference {
					from: entity.name.clone(),
					to: child.to_owned(),
				}
				.report(),
			}
		}
	}

	let (w, h, inset) = (grid.node_width, grid.node_height, config.image_inset);
	let nodes: Vec<NodeBox> = index
		.entities()
		.iter()
		.filter_map(|entity| {
			let pos = layout.position(&entity.name)?;
			Some(NodeBox {
				name: entity.name.clone(),
				frame: Rect {
					x: pos.x,
					y: pos.y,
					width: w,
					height: h,
				},
				corner_radius: config.corner_radius,
				image: Rect {
					x: pos.x + inset,
					y: pos.y + inset,
					width: w - 2.0 * inset,
					height: h - inset - config.label_band,
				},
				image_href: format!("{}{}", config.image_base, entity.image_or_placeholder()),
				label: Label {
					text: entity.name.clone(),
					anchor: Position {
						x: pos.x + w / 2.0,
						y: pos.y + h - config.label_offset,
					},
				},
			})
		})
		.collect();

	let (max_x, max_y) = nodes.iter().fold((0.0_f64, 0.0_f64), |(mx, my), node| {
		(
			mx.max(node.frame.x + w + grid.padding),
			my.max(node.frame.y + h + grid.padding),
		)
	});

	Scene {
		connectors,
		nodes,
		canvas_width: max_x.max(config.min_canvas_width),
		canvas_height: max_y.max(config.min_canvas_height),
		view_width: max_x.max(config.min_view_width),
		view_height: max_y.max(config.min_view_height),
	}
}
