pub mod query;
pub mod relevance;
pub mod vector;
