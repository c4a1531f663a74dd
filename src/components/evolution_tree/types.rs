use std::fmt;

use serde::Deserialize;

use super::config::RevisitPolicy;

/// Image shown when an entity has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";

/// A single stat value; data files mix numbers and display strings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StatValue {
	Number(f64),
	Text(String),
}

impl fmt::Display for StatValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Stats {
	pub cost: Option<StatValue>,
	pub cooldown: Option<StatValue>,
	pub critical: Option<StatValue>,
	pub attack: Option<StatValue>,
	pub speed: Option<StatValue>,
}

/// One monster in an evolution graph.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
	pub name: String,
	#[serde(default)]
	pub image: Option<String>,
	#[serde(default)]
	pub attribute: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub stage: Option<String>,
	#[serde(default)]
	pub evolution_condition: Option<String>,
	#[serde(default)]
	pub previous: Vec<String>,
	#[serde(default)]
	pub next: Vec<String>,
	#[serde(default)]
	pub stats: Option<Stats>,
}

impl Entity {
	/// Image file name, falling back to the placeholder.
	pub fn image_or_placeholder(&self) -> &str {
		self.image
			.as_deref()
			.filter(|s| !s.is_empty())
			.unwrap_or(PLACEHOLDER_IMAGE)
	}

	pub fn is_root(&self) -> bool {
		self.previous.is_empty()
	}
}

/// A named group of entities rendered as one graph view.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EvolutionLine {
	pub name: String,
	/// Layout rule for monsters with several predecessors.
	#[serde(default)]
	pub revisit: RevisitPolicy,
	pub monsters: Vec<Entity>,
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
	#[error("failed to parse evolution data: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a JSON array of evolution lines.
pub fn load_lines(json: &str) -> Result<Vec<EvolutionLine>, DataError> {
	Ok(serde_json::from_str(json)?)
}

/// Non-fatal problems found while building or drawing a graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
	MissingReference { from: String, to: String },
	CycleSkipped { from: String, to: String },
	AssetLoad { href: String },
}

impl Diagnostic {
	pub fn report(&self) {
		log::warn!("{self}");
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingReference { from, to } => {
				write!(f, "missing reference: {from} -> {to}")
			}
			Self::CycleSkipped { from, to } => {
				write!(f, "skipping edge back into current path: {from} -> {to}")
			}
			Self::AssetLoad { href } => write!(f, "failed to load image: {href}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_camel_case_fields_and_defaults() {
		let lines = load_lines(
			r#"[{"name": "Fire", "monsters": [
				{"name": "Emberling", "next": ["Blazehound"], "evolutionCondition": "Lv. 20",
				 "stats": {"cost": 3, "speed": "fast"}},
				{"name": "Blazehound", "previous": ["Emberling"], "image": "blaze.png"}
			]}]"#,
		)
		.unwrap();

		let monsters = &lines[0].monsters;
		assert_eq!(lines[0].name, "Fire");
		assert_eq!(monsters[0].evolution_condition.as_deref(), Some("Lv. 20"));
		assert!(monsters[0].is_root());
		assert!(!monsters[1].is_root());
		assert_eq!(monsters[0].image_or_placeholder(), PLACEHOLDER_IMAGE);
		assert_eq!(monsters[1].image_or_placeholder(), "blaze.png");

		let stats = monsters[0].stats.as_ref().unwrap();
		assert_eq!(stats.cost.as_ref().unwrap().to_string(), "3");
		assert_eq!(stats.speed, Some(StatValue::Text("fast".into())));
		assert_eq!(stats.attack, None);
	}

	#[test]
	fn revisit_policy_defaults_to_overwrite() {
		let lines = load_lines(
			r#"[{"name": "Fire", "monsters": []},
				{"name": "Tide", "revisit": "firstDiscovery", "monsters": []}]"#,
		)
		.unwrap();
		assert_eq!(lines[0].revisit, RevisitPolicy::Overwrite);
		assert_eq!(lines[1].revisit, RevisitPolicy::FirstDiscovery);
	}

	#[test]
	fn missing_name_is_a_parse_error() {
		let err = load_lines(r#"[{"name": "Fire", "monsters": [{"next": []}]}]"#).unwrap_err();
		assert!(err.to_string().contains("failed to parse"));
	}
}
