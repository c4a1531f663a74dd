use std::collections::HashMap;

use super::types::{Diagnostic, Entity};

/// Lookup structures over a flat entity list.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
	entities: Vec<Entity>,
	by_name: HashMap<String, usize>,
	roots: Vec<String>,
}

impl GraphIndex {
	pub fn new(entities: Vec<Entity>) -> Self {
		let by_name: HashMap<String, usize> = entities
			.iter()
			.enumerate()
			.map(|(i, e)| (e.name.clone(), i))
			.collect();
		let roots = entities
			.iter()
			.filter(|e| e.is_root())
			.map(|e| e.name.clone())
			.collect();

		for entity in &entities {
			for child in &entity.next {
				if !by_name.contains_key(child) {
					Diagnostic::MissingReference {
						from: entity.name.clone(),
						to: child.clone(),
					}
					.report();
				}
			}
		}

		Self {
			entities,
			by_name,
			roots,
		}
	}

	pub fn get(&self, name: &str) -> Option<&Entity> {
		self.by_name.get(name).map(|&i| &self.entities[i])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Entities in input order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// Root names in input order.
	pub fn roots(&self) -> &[String] {
		&self.roots
	}

	/// Raw outgoing names of `name`, empty for unknown entities.
	pub fn next_of(&self, name: &str) -> &[String] {
		self.get(name).map(|e| e.next.as_slice()).unwrap_or(&[])
	}

	/// Outgoing names that resolve to known entities, order preserved.
	pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
		self.next_of(name)
			.iter()
			.map(String::as_str)
			.filter(move |child| self.contains(child))
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}
}
