use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::GraphError;

/// Node name -> neighbor names, iterated in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyList(IndexMap<String, Vec<String>>);

impl AdjacencyList {
	/// Parse a JSON object of name -> array of names.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(text)?)
	}

	/// The graph shown before anything has been fetched.
	pub fn sample() -> Self {
		[
			("foo", &["bar", "baz"][..]),
			("bar", &["foo"][..]),
			("baz", &["foo"][..]),
		]
		.into_iter()
		.collect()
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no keys.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Whether `name` is a key.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Position of key `name` in iteration order.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.0.get_index_of(name)
	}

	/// Keys in iteration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Every (key, neighbor) pair, keys in order, neighbors in listed order.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0
			.iter()
			.flat_map(|(key, ns)| ns.iter().map(move |n| (key.as_str(), n.as_str())))
	}

	/// Set the neighbors of `name`, appending it if new.
	pub fn insert(&mut self, name: impl Into<String>, neighbors: Vec<String>) {
		self.0.insert(name.into(), neighbors);
	}
}

impl<'a> FromIterator<(&'a str, &'a [&'a str])> for AdjacencyList {
	fn from_iter<I: IntoIterator<Item = (&'a str, &'a [&'a str])>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, ns)| (k.to_owned(), ns.iter().map(|n| (*n).to_owned()).collect()))
				.collect(),
		)
	}
}
