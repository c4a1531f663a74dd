use serde::Deserialize;

/// How the layout treats a node reached through more than one parent.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevisitPolicy {
	/// Lay the node out again on every incoming path; the last visit wins.
	#[default]
	Overwrite,
	/// Lay the node out once, on first discovery.
	FirstDiscovery,
}

/// Grid the layout places nodes on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	pub node_width: f64,
	pub node_height: f64,
	pub horizontal_gap: f64,
	pub vertical_gap: f64,
	pub padding: f64,
	/// Extra rows between independent trees.
	pub root_separation: f64,
	pub revisit: RevisitPolicy,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 120.0,
			node_height: 120.0,
			horizontal_gap: 200.0,
			vertical_gap: 130.0,
			padding: 30.0,
			root_separation: 1.5,
			revisit: RevisitPolicy::default(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
	pub min_canvas_width: f64,
	pub min_canvas_height: f64,
	pub min_view_width: f64,
	pub min_view_height: f64,
	pub corner_radius: f64,
	pub image_inset: f64,
	/// Space below the image reserved for the label.
	pub label_band: f64,
	/// Distance of the label baseline above the box bottom.
	pub label_offset: f64,
	pub image_base: String,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			min_canvas_width: 1600.0,
			min_canvas_height: 900.0,
			min_view_width: 1200.0,
			min_view_height: 600.0,
			corner_radius: 10.0,
			image_inset: 12.0,
			label_band: 32.0,
			label_offset: 22.0,
			image_base: "images/monsters/".into(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	pub zoom_factor: f64,
	pub min_scale: f64,
	pub max_scale: f64,
	/// Pointer travel in screen pixels above which a press counts as a drag.
	pub click_slop: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			zoom_factor: 1.1,
			min_scale: 0.2,
			max_scale: 4.0,
			click_slop: 4.0,
		}
	}
}

/// Everything a tree view can be tuned with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeConfig {
	pub layout: LayoutConfig,
	pub scene: SceneConfig,
	pub viewport: ViewportConfig,
}
