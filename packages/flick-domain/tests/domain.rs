use serde_json::json;

use flick_domain::{
	query,
	relevance::{Candidate, Detail, RelevancePolicy},
	vector,
};

fn candidate(id: i64, relevance: f32) -> Candidate {
	Candidate { id, overview: format!("Overview {id}"), relevance }
}

#[test]
fn normalize_returns_sequences_unchanged() {
	let raw = json!([0.25, -0.5, 1.0]);

	assert_eq!(vector::normalize(&raw), vec![0.25, -0.5, 1.0]);
}

#[test]
fn normalize_takes_mapping_values_in_order() {
	let raw = json!({ "0": 0.25, "1": -0.5, "2": 1.0 });

	assert_eq!(vector::normalize(&raw), vec![0.25, -0.5, 1.0]);
}

#[test]
fn normalize_parses_serialized_sequences() {
	let raw = json!("[0.25,-0.5,1]");

	assert_eq!(vector::normalize(&raw), vec![0.25, -0.5, 1.0]);
}

#[test]
fn all_supported_shapes_agree() {
	let shapes = [json!([0.5, 0.75]), json!({ "0": 0.5, "1": 0.75 }), json!("[0.5, 0.75]")];

	for shape in &shapes {
		assert_eq!(vector::normalize(shape), vec![0.5, 0.75], "shape {shape}");
	}
}

#[test]
fn invalid_serialized_text_degrades_to_empty() {
	assert!(vector::normalize(&json!("[0.5, oops")).is_empty());
}

#[test]
fn unexpected_shapes_degrade_to_empty() {
	for raw in [json!(null), json!(true), json!(3.5), json!([1.0, "x"]), json!({ "0": [1.0] })] {
		assert!(vector::normalize(&raw).is_empty(), "shape {raw}");
	}
}

#[test]
fn format_renders_comma_joined_literal() {
	let raw = json!([0.5, -1.0, 2.25]);

	assert_eq!(vector::format_embedding(&raw), "[0.5,-1,2.25]");
}

#[test]
fn format_of_empty_vector_is_empty_brackets() {
	assert_eq!(vector::format_vector_text(&[]), "[]");
	assert_eq!(vector::format_embedding(&json!("not json")), "[]");
}

#[test]
fn formatted_literal_round_trips_through_normalize() {
	let literal = vector::format_vector_text(&[0.125, 0.5]);

	assert_eq!(vector::normalize(&json!(literal)), vec![0.125, 0.5]);
}

#[test]
fn sample_shows_head_and_dimensions() {
	let vec = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

	assert_eq!(vector::sample(&vec), "[1, 2, 3, 4, 5...] (6 dimensions)");
}

#[test]
fn clean_strips_lead_in_and_punctuation() {
	assert_eq!(query::clean("Can you tell me about Inception?"), "Inception");
}

#[test]
fn clean_handles_every_lead_in_phrase() {
	assert_eq!(query::clean("What do you know about time travel movies?"), "time travel movies");
	assert_eq!(query::clean("Information on Blade Runner."), "Blade Runner");
	assert_eq!(query::clean("details about Alien, Aliens"), "Alien Aliens");
}

#[test]
fn clean_is_total_over_empty_and_punctuation_only_input() {
	assert_eq!(query::clean(""), "");
	assert_eq!(query::clean("?.,"), "");
}

#[test]
fn threshold_boundary_is_inclusive() {
	let policy = RelevancePolicy::default();

	assert_eq!(policy.classify(0.5), Detail::Full);
	assert_eq!(policy.classify(0.2), Detail::Omitted);
	assert_eq!(policy.classify(0.499), Detail::Omitted);
}

#[test]
fn full_detail_keeps_order_and_drops_weak_candidates() {
	let policy = RelevancePolicy::new(0.5);
	let candidates = [candidate(1, 0.9), candidate(2, 0.2), candidate(3, 0.5)];
	let kept = policy.full_detail(&candidates);

	assert_eq!(kept.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
}
