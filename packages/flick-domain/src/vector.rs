//! Canonical vector handling.
//!
//! Embedding services answer with a plain array, an object keyed by component index, or the array
//! serialized as text. [`RawEmbedding::decode`] names those shapes once at the service boundary and
//! [`normalize`] flattens them into the canonical `Vec<f32>`. Anything unrecoverable degrades to an
//! empty vector, which callers must refuse to persist.

use serde_json::{Map, Value};

const SAMPLE_LEN: usize = 5;

/// Shapes an embedding service may answer with.
#[derive(Debug, PartialEq)]
pub enum RawEmbedding<'a> {
	Sequence(&'a [Value]),
	Mapping(&'a Map<String, Value>),
	Serialized(&'a str),
	Unexpected(&'static str),
}
impl<'a> RawEmbedding<'a> {
	pub fn decode(raw: &'a Value) -> Self {
		match raw {
			Value::Array(items) => Self::Sequence(items),
			Value::Object(map) => Self::Mapping(map),
			Value::String(text) => Self::Serialized(text),
			Value::Null => Self::Unexpected("null"),
			Value::Bool(_) => Self::Unexpected("boolean"),
			Value::Number(_) => Self::Unexpected("number"),
		}
	}
}

/// Flattens any supported embedding shape into its ordered components.
///
/// Never fails. Unparseable text and unexpected shapes are logged and yield an empty vector.
pub fn normalize(raw: &Value) -> Vec<f32> {
	match RawEmbedding::decode(raw) {
		RawEmbedding::Sequence(items) => numbers(items.iter()).unwrap_or_else(|| {
			tracing::error!("Embedding sequence contains non-numeric components.");

			Vec::new()
		}),
		RawEmbedding::Mapping(map) => mapping_values(map).unwrap_or_else(|| {
			tracing::error!("Embedding mapping contains non-numeric components.");

			Vec::new()
		}),
		RawEmbedding::Serialized(text) => match serde_json::from_str::<Value>(text) {
			Ok(parsed) => normalize(&parsed),
			Err(err) => {
				tracing::error!(error = %err, "Failed to parse embedding string.");

				Vec::new()
			},
		},
		RawEmbedding::Unexpected(kind) => {
			tracing::error!(kind, "Unexpected embedding type.");

			Vec::new()
		},
	}
}

/// Renders a canonical vector as a pgvector literal, `[v1,v2,...]`.
pub fn format_vector_text(vec: &[f32]) -> String {
	let mut out = String::from("[");

	for (idx, value) in vec.iter().enumerate() {
		if idx > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

/// Normalizes then renders. An empty result renders as `[]`; check the length before storing.
pub fn format_embedding(raw: &Value) -> String {
	format_vector_text(&normalize(raw))
}

/// Short preview for logs: the first few components and the dimensionality.
pub fn sample(vec: &[f32]) -> String {
	let head = vec.iter().take(SAMPLE_LEN).map(f32::to_string).collect::<Vec<_>>().join(", ");

	format!("[{head}...] ({} dimensions)", vec.len())
}

fn numbers<'a>(items: impl Iterator<Item = &'a Value>) -> Option<Vec<f32>> {
	items.map(|value| value.as_f64().map(|number| number as f32)).collect()
}

// Index-like keys ("0", "1", ..., "10") are ordered numerically; other keys keep document order.
fn mapping_values(map: &Map<String, Value>) -> Option<Vec<f32>> {
	let mut indexed = Vec::with_capacity(map.len());

	for (key, value) in map {
		match key.parse::<usize>() {
			Ok(index) => indexed.push((index, value)),
			Err(_) => return numbers(map.values()),
		}
	}

	indexed.sort_by_key(|(index, _)| *index);

	numbers(indexed.into_iter().map(|(_, value)| value))
}
