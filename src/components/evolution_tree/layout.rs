//! Grid layout for evolution forests.
//!
//! Depth decides the column. Rows are handed out by a single cursor that
//! advances once per leaf in depth-first, first-child-first order, and every
//! internal node shares the row of its first child so primary evolution
//! chains come out as straight lines.

use std::collections::HashMap;

use super::config::{LayoutConfig, RevisitPolicy};
use super::index::GraphIndex;
use super::types::Diagnostic;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// Result of one layout pass.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	positions: HashMap<String, Position>,
	depths: HashMap<String, usize>,
	/// Cursor value after the last root, in rows.
	pub rows: f64,
}

impl Layout {
	pub fn position(&self, name: &str) -> Option<Position> {
		self.positions.get(name).copied()
	}

	/// Depth of the visit that produced the final position.
	#[cfg(test)]
	pub fn depth(&self, name: &str) -> Option<usize> {
		self.depths.get(name).copied()
	}

	#[cfg(test)]
	pub fn positions(&self) -> impl Iterator<Item = (&str, Position)> {
		self.positions.iter().map(|(name, pos)| (name.as_str(), *pos))
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}
}

struct Walk<'a> {
	index: &'a GraphIndex,
	config: &'a LayoutConfig,
	path: Vec<&'a str>,
	out: Layout,
}

impl<'a> Walk<'a> {
	fn column(&self, depth: usize) -> f64 {
		self.config.padding + depth as f64 * self.config.horizontal_gap
	}

	fn row(&self, cursor: f64) -> f64 {
		self.config.padding + cursor * self.config.vertical_gap
	}

	fn children(&self, name: &'a str) -> Vec<&'a str> {
		self.index
			.children(name)
			.filter(|child| {
				if self.path.contains(child) {
					Diagnostic::CycleSkipped {
						from: name.to_owned(),
						to: (*child).to_owned(),
					}
					.report();
					return false;
				}
				match self.config.revisit {
					RevisitPolicy::Overwrite => true,
					RevisitPolicy::FirstDiscovery => !self.out.positions.contains_key(*child),
				}
			})
			.collect()
	}

	fn place(&mut self, name: &'a str, depth: usize, cursor: &mut f64) -> Position {
		if self.config.revisit == RevisitPolicy::FirstDiscovery {
			if let Some(pos) = self.out.position(name) {
				return pos;
			}
		}
		self.path.push(name);
		let kids = self.children(name);

		let y = match kids.split_first() {
			None => {
				let y = self.row(*cursor);
				*cursor += 1.0;
				y
			}
			Some((first, rest)) => {
				let y = self.place(*first, depth + 1, cursor).y;
				for &kid in rest {
					self.place(kid, depth + 1, cursor);
				}
				y
			}
		};
		self.path.pop();

		let pos = Position {
			x: self.column(depth),
			y,
		};
		self.out.positions.insert(name.to_owned(), pos);
		self.out.depths.insert(name.to_owned(), depth);
		pos
	}
}

/// Assign a position to every entity reachable from a root.
pub fn layout(index: &GraphIndex, config: &LayoutConfig) -> Layout {
	let mut walk = Walk {
		index,
		config,
		path: Vec::new(),
		out: Layout::default(),
	};
	let mut cursor = 0.0;

	for root in index.roots() {
		if config.revisit == RevisitPolicy::FirstDiscovery && walk.out.positions.contains_key(root) {
			continue;
		}
		walk.place(root, 0, &mut cursor);
		cursor += config.root_separation;
	}

	walk.out.rows = cursor;
	log::debug!(
		"laid out {} of {} entities over {} rows",
		walk.out.len(),
		index.len(),
		walk.out.rows
	);
	walk.out
}
