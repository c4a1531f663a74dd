//! Pan and zoom over a scene.
//!
//! The controller keeps a window (origin and size, in scene units) that is
//! fitted into the canvas element with one uniform scale and centred along the
//! axis with room to spare. Screen points are element-relative CSS pixels;
//! converting between the two only needs the element's rendered size.

use super::config::ViewportConfig;
use super::layout::Position;

/// Rendered size of the canvas element in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSize {
	pub width: f64,
	pub height: f64,
}

/// Visible window over the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	/// Window size relative to the initial window.
	pub scale: f64,
}

/// How a window maps onto an element: one scale for both axes plus the
/// letterbox offset of the window's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
	pub pixels_per_unit: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Viewport {
	pub fn fit(&self, element: ElementSize) -> Fit {
		let ppu = (element.width / self.width).min(element.height / self.height);
		let ppu = if ppu.is_finite() && ppu > 0.0 { ppu } else { 1.0 };
		Fit {
			pixels_per_unit: ppu,
			offset_x: (element.width - self.width * ppu) / 2.0,
			offset_y: (element.height - self.height * ppu) / 2.0,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerMode {
	#[default]
	Idle,
	Panning {
		last: Position,
		travel: f64,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	In,
	Out,
}

impl ZoomDirection {
	/// Scrolling up zooms in; a zero delta carries no direction.
	pub fn from_wheel(delta_y: f64) -> Option<Self> {
		if delta_y < 0.0 {
			Some(Self::In)
		} else if delta_y > 0.0 {
			Some(Self::Out)
		} else {
			None
		}
	}
}

pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Clone, Debug)]
pub struct ViewportController {
	config: ViewportConfig,
	initial: Viewport,
	view: Viewport,
	mode: PointerMode,
	last_gesture_was_drag: bool,
}

impl ViewportController {
	pub fn new(width: f64, height: f64, config: ViewportConfig) -> Self {
		let initial = Viewport {
			x: 0.0,
			y: 0.0,
			width,
			height,
			scale: 1.0,
		};
		Self {
			config,
			initial,
			view: initial,
			mode: PointerMode::Idle,
			last_gesture_was_drag: false,
		}
	}

	pub fn view(&self) -> Viewport {
		self.view
	}

	#[cfg(test)]
	pub fn mode(&self) -> PointerMode {
		self.mode
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.mode, PointerMode::Panning { .. })
	}

	/// CSS cursor matching the current mode.
	pub fn cursor(&self) -> &'static str {
		if self.is_panning() { "grabbing" } else { "grab" }
	}

	/// Start panning on a primary-button press. Returns whether a pan began.
	pub fn press(&mut self, button: i16, at: Position) -> bool {
		if button != PRIMARY_BUTTON {
			return false;
		}
		self.mode = PointerMode::Panning {
			last: at,
			travel: 0.0,
		};
		true
	}

	/// Drag the window so the content follows the pointer.
	pub fn move_to(&mut self, at: Position, element: ElementSize) {
		let PointerMode::Panning { last, travel } = self.mode else {
			return;
		};
		let ppu = self.view.fit(element).pixels_per_unit;
		let (dx, dy) = (at.x - last.x, at.y - last.y);
		self.view.x -= dx / ppu;
		self.view.y -= dy / ppu;
		self.mode = PointerMode::Panning {
			last: at,
			travel: travel + dx.hypot(dy),
		};
	}

	/// End any pan; valid from every mode.
	pub fn release(&mut self) {
		if let PointerMode::Panning { travel, .. } = self.mode {
			self.last_gesture_was_drag = travel > self.config.click_slop;
		}
		self.mode = PointerMode::Idle;
	}

	/// Whether a click that follows the last release should count as a click
	/// rather than the end of a drag.
	pub fn is_click(&self) -> bool {
		!self.last_gesture_was_drag
	}

	/// Zoom one notch around `at`, keeping the scene point under it fixed.
	pub fn zoom(&mut self, direction: ZoomDirection, at: Position, element: ElementSize) {
		let factor = self.config.zoom_factor;
		let wanted = match direction {
			ZoomDirection::In => self.view.scale / factor,
			ZoomDirection::Out => self.view.scale * factor,
		};
		let scale = wanted.clamp(self.config.min_scale, self.config.max_scale);
		let ratio = scale / self.view.scale;

		let anchor = self.screen_to_scene(at, element);
		self.view.x = anchor.x - (anchor.x - self.view.x) * ratio;
		self.view.y = anchor.y - (anchor.y - self.view.y) * ratio;
		self.view.width *= ratio;
		self.view.height *= ratio;
		self.view.scale = scale;
	}

	/// Zoom from a raw wheel delta; a zero delta is ignored.
	pub fn wheel(&mut self, delta_y: f64, at: Position, element: ElementSize) {
		if let Some(direction) = ZoomDirection::from_wheel(delta_y) {
			self.zoom(direction, at, element);
		}
	}

	pub fn reset(&mut self) {
		self.view = self.initial;
		self.mode = PointerMode::Idle;
		self.last_gesture_was_drag = false;
	}

	pub fn screen_to_scene(&self, at: Position, element: ElementSize) -> Position {
		let fit = self.view.fit(element);
		Position {
			x: self.view.x + (at.x - fit.offset_x) / fit.pixels_per_unit,
			y: self.view.y + (at.y - fit.offset_y) / fit.pixels_per_unit,
		}
	}

	#[cfg(test)]
	pub fn scene_to_screen(&self, p: Position, element: ElementSize) -> Position {
		let fit = self.view.fit(element);
		Position {
			x: (p.x - self.view.x) * fit.pixels_per_unit + fit.offset_x,
			y: (p.y - self.view.y) * fit.pixels_per_unit + fit.offset_y,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ELEMENT: ElementSize = ElementSize {
		width: 800.0,
		height: 400.0,
	};

	fn controller() -> ViewportController {
		ViewportController::new(1600.0, 800.0, ViewportConfig::default())
	}

	fn pt(x: f64, y: f64) -> Position {
		Position { x, y }
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9 * a.abs().max(b.abs()).max(1.0)
	}

	#[test]
	fn press_only_pans_with_primary_button() {
		let mut vp = controller();
		assert!(!vp.press(2, pt(10.0, 10.0)));
		assert_eq!(vp.mode(), PointerMode::Idle);
		assert_eq!(vp.cursor(), "grab");

		assert!(vp.press(PRIMARY_BUTTON, pt(10.0, 10.0)));
		assert!(vp.is_panning());
		assert_eq!(vp.cursor(), "grabbing");

		vp.release();
		assert_eq!(vp.mode(), PointerMode::Idle);
	}

	#[test]
	fn moving_while_idle_does_nothing() {
		let mut vp = controller();
		vp.move_to(pt(300.0, 300.0), ELEMENT);
		assert_eq!(vp.view(), controller().view());
	}

	#[test]
	fn content_follows_pointer_in_scene_units() {
		let mut vp = controller();
		vp.press(PRIMARY_BUTTON, pt(100.0, 100.0));
		vp.move_to(pt(110.0, 95.0), ELEMENT);

		// two scene units per pixel on both axes
		assert_eq!((vp.view().x, vp.view().y), (-20.0, 10.0));
	}

	#[test]
	fn pan_there_and_back_restores_origin() {
		let mut vp = controller();
		vp.press(PRIMARY_BUTTON, pt(100.0, 100.0));
		vp.move_to(pt(137.0, 58.0), ELEMENT);
		vp.move_to(pt(100.0, 100.0), ELEMENT);
		vp.release();

		assert_eq!((vp.view().x, vp.view().y), (0.0, 0.0));
		assert!(!vp.is_click());
	}

	#[test]
	fn short_press_is_a_click() {
		let mut vp = controller();
		vp.press(PRIMARY_BUTTON, pt(100.0, 100.0));
		vp.move_to(pt(101.0, 101.0), ELEMENT);
		vp.release();
		assert!(vp.is_click());
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut vp = controller();
		let at = pt(200.0, 300.0);
		let before = vp.screen_to_scene(at, ELEMENT);

		vp.zoom(ZoomDirection::In, at, ELEMENT);
		let after = vp.screen_to_scene(at, ELEMENT);
		assert!(close(before.x, after.x) && close(before.y, after.y));
		assert!(close(vp.view().scale, 1.0 / 1.1));
		assert!(close(vp.view().width, 1600.0 / 1.1));

		let screen = vp.scene_to_screen(before, ELEMENT);
		assert!(close(screen.x, at.x) && close(screen.y, at.y));
	}

	#[test]
	fn zoom_in_then_out_round_trips() {
		let mut vp = controller();
		let start = vp.view();
		for _ in 0..5 {
			vp.wheel(-120.0, pt(420.0, 130.0), ELEMENT);
		}
		for _ in 0..5 {
			vp.wheel(120.0, pt(420.0, 130.0), ELEMENT);
		}
		let end = vp.view();
		assert!(close(end.scale, start.scale));
		assert!(close(end.x, start.x) && close(end.y, start.y));
		assert!(close(end.width, start.width));
	}

	#[test]
	fn scale_is_clamped() {
		let mut vp = controller();
		for _ in 0..100 {
			vp.zoom(ZoomDirection::In, pt(0.0, 0.0), ELEMENT);
			assert!(vp.view().scale >= 0.2);
		}
		assert_eq!(vp.view().scale, 0.2);

		for _ in 0..100 {
			vp.zoom(ZoomDirection::Out, pt(0.0, 0.0), ELEMENT);
			assert!(vp.view().scale <= 4.0);
		}
		assert_eq!(vp.view().scale, 4.0);
		assert!(close(vp.view().width, 1600.0 * 4.0));
	}

	#[test]
	fn zero_wheel_delta_is_ignored() {
		let mut vp = controller();
		vp.wheel(0.0, pt(10.0, 10.0), ELEMENT);
		assert_eq!(vp.view(), controller().view());
	}

	#[test]
	fn zoom_does_not_change_mode() {
		let mut vp = controller();
		vp.press(PRIMARY_BUTTON, pt(5.0, 5.0));
		vp.wheel(-1.0, pt(5.0, 5.0), ELEMENT);
		assert!(vp.is_panning());
	}

	#[test]
	fn wide_element_letterboxes_with_one_scale() {
		let vp = ViewportController::new(1200.0, 600.0, ViewportConfig::default());
		let element = ElementSize {
			width: 1600.0,
			height: 900.0,
		};
		let fit = vp.view().fit(element);
		assert!(close(fit.pixels_per_unit, 4.0 / 3.0));
		assert!(close(fit.offset_x, 0.0));
		assert!(close(fit.offset_y, 50.0));

		// a square node stays square on screen
		let top_left = vp.scene_to_screen(pt(30.0, 30.0), element);
		let bottom_right = vp.scene_to_screen(pt(150.0, 150.0), element);
		assert!(close(
			bottom_right.x - top_left.x,
			bottom_right.y - top_left.y
		));
		assert!(close(top_left.y, 50.0 + 40.0));
	}

	#[test]
	fn letterboxed_zoom_keeps_anchor_fixed() {
		let mut vp = ViewportController::new(1200.0, 600.0, ViewportConfig::default());
		let element = ElementSize {
			width: 1600.0,
			height: 900.0,
		};
		let at = pt(700.0, 30.0);
		let before = vp.screen_to_scene(at, element);
		vp.wheel(120.0, at, element);
		vp.wheel(120.0, at, element);
		let after = vp.screen_to_scene(at, element);
		assert!(close(before.x, after.x) && close(before.y, after.y));
	}

	#[test]
	fn reset_restores_initial_window() {
		let mut vp = controller();
		vp.press(PRIMARY_BUTTON, pt(0.0, 0.0));
		vp.move_to(pt(50.0, 50.0), ELEMENT);
		vp.wheel(-1.0, pt(300.0, 200.0), ELEMENT);
		vp.reset();
		assert_eq!(vp.view(), controller().view());
		assert_eq!(vp.mode(), PointerMode::Idle);
	}
}
