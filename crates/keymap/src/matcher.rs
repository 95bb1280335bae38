//! A trie-based matcher for sequences of key-chords (`Node`s).
//!
//! Patterns can include:
//!
//! 1. **Exact keys** — matches a specific input key (`Key::Char('a')`, `Key::F(1)`).
//! 2. **Character groups** — matches keys falling into categories like `@digit` or `@any`,
//!    provided modifiers match exactly.
//!
//! Matching priority: exact match, then group match, then `@any` wildcard.
//! This ensures more specific bindings win over broader ones.

use std::collections::HashMap;

use wf_keymap_parser::{CharGroup, Key, Node};

/// Result of looking up a key-chord sequence in the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<T> {
	/// The sequence matches a binding exactly.
	Complete(T),
	/// The sequence is a prefix of one or more bindings.
	Partial {
		/// An intermediate value if this prefix is itself a complete binding
		/// ("sticky" behavior, e.g. `g` alone doing something while `g g`
		/// does something else).
		has_value: Option<T>,
	},
	/// The sequence doesn't match anything.
	None,
}

/// Classification of a continuation at a given prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
	/// Pressing this key completes a binding; no further keys possible.
	Leaf,
	/// Pressing this key reveals more options underneath.
	Branch,
}

#[derive(Debug, Clone)]
struct Trie<T> {
	value: Option<T>,
	exact: HashMap<Node, Trie<T>>,
	groups: Vec<(Node, Trie<T>)>,
}

impl<T> Trie<T> {
	fn new() -> Self {
		Self {
			value: None,
			exact: HashMap::new(),
			groups: Vec::new(),
		}
	}
}

/// A pattern matcher mapping key-chord sequences to values.
#[derive(Debug, Clone)]
pub struct Matcher<T> {
	root: Trie<T>,
}

impl<T> Default for Matcher<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> FromIterator<(Vec<Node>, T)> for Matcher<T> {
	fn from_iter<I: IntoIterator<Item = (Vec<Node>, T)>>(iter: I) -> Self {
		let mut matcher = Matcher::new();
		for (pattern, value) in iter {
			matcher.add(pattern, value);
		}
		matcher
	}
}

impl<T> Matcher<T> {
	/// Creates a new, empty matcher.
	pub fn new() -> Self {
		Self { root: Trie::new() }
	}

	/// Adds a key-chord sequence and its bound value, replacing any prior
	/// binding for the same exact sequence.
	pub fn add(&mut self, pattern: Vec<Node>, value: T) {
		let mut node = &mut self.root;

		for input_node in pattern {
			node = match input_node.key {
				Key::Group(_) => {
					if let Some(pos) = node.groups.iter().position(|(n, _)| n == &input_node) {
						&mut node.groups[pos].1
					} else {
						node.groups.push((input_node, Trie::new()));
						&mut node.groups.last_mut().unwrap().1
					}
				}
				_ => node.exact.entry(input_node).or_insert_with(Trie::new),
			};
		}

		node.value = Some(value);
	}

	/// Removes the binding for an exact key-chord sequence, if any.
	///
	/// Returns `true` if a binding was present and removed. Leaves any
	/// sub-bindings below the removed node untouched.
	pub fn remove(&mut self, pattern: &[Node]) -> bool
	where
		T: Clone,
	{
		fn remove_rec<T>(node: &mut Trie<T>, pattern: &[Node]) -> bool {
			if pattern.is_empty() {
				return node.value.take().is_some();
			}
			let head = &pattern[0];
			match head.key {
				Key::Group(_) => {
					if let Some(pos) = node.groups.iter().position(|(n, _)| n == head) {
						remove_rec(&mut node.groups[pos].1, &pattern[1..])
					} else {
						false
					}
				}
				_ => node
					.exact
					.get_mut(head)
					.map(|child| remove_rec(child, &pattern[1..]))
					.unwrap_or(false),
			}
		}
		remove_rec(&mut self.root, pattern)
	}

	/// Looks up a key-chord sequence, returning detailed match information.
	pub fn lookup(&self, nodes: &[Node]) -> MatchResult<T>
	where
		T: Copy,
	{
		lookup_with_info(&self.root, nodes, 0)
	}

	/// Returns `true` if any binding exists that starts with this prefix.
	pub fn has_prefix(&self, nodes: &[Node]) -> bool
	where
		T: Copy,
	{
		!matches!(self.lookup(nodes), MatchResult::None)
	}

	/// Returns continuations at a prefix, classified as leaf or branch.
	///
	/// Used for which-key style displays showing available next keys.
	pub fn continuations_with_kind(&self, prefix: &[Node]) -> Vec<(Node, Option<T>, ContinuationKind)>
	where
		T: Copy,
	{
		let Some(trie) = navigate_to(&self.root, prefix, 0) else {
			return Vec::new();
		};

		let classify = |child: &Trie<T>| {
			if !child.exact.is_empty() || !child.groups.is_empty() {
				ContinuationKind::Branch
			} else {
				ContinuationKind::Leaf
			}
		};

		trie.exact
			.iter()
			.map(|(k, v)| (*k, v.value, classify(v)))
			.chain(trie.groups.iter().map(|(k, v)| (*k, v.value, classify(v))))
			.collect()
	}
}

fn navigate_to<'a, T>(node: &'a Trie<T>, nodes: &[Node], pos: usize) -> Option<&'a Trie<T>> {
	if pos == nodes.len() {
		return Some(node);
	}

	let input_node = &nodes[pos];

	if let Some(child) = node.exact.get(input_node) {
		return navigate_to(child, nodes, pos + 1);
	}

	if let Key::Char(ch) = input_node.key {
		for (n, child) in &node.groups {
			if let Key::Group(group) = n.key {
				if n.modifiers == input_node.modifiers && group.matches(ch) {
					return navigate_to(child, nodes, pos + 1);
				}
			}
		}
	}

	for (n, child) in &node.groups {
		if matches!(n.key, Key::Group(CharGroup::Any)) {
			return navigate_to(child, nodes, pos + 1);
		}
	}

	None
}

/// Looks up a key-chord sequence with detailed match information.
///
/// Priority order: exact match, group match with identical modifiers,
/// `@any`-group wildcard match.
fn lookup_with_info<T: Copy>(node: &Trie<T>, nodes: &[Node], pos: usize) -> MatchResult<T> {
	if pos == nodes.len() {
		let has_children = !node.exact.is_empty() || !node.groups.is_empty();
		return if has_children {
			MatchResult::Partial { has_value: node.value }
		} else if let Some(val) = node.value {
			MatchResult::Complete(val)
		} else {
			MatchResult::None
		};
	}

	let input_node = &nodes[pos];

	if let Some(child) = node.exact.get(input_node) {
		let result = lookup_with_info(child, nodes, pos + 1);
		if !matches!(result, MatchResult::None) {
			return result;
		}
	}

	if let Key::Char(ch) = input_node.key {
		for (n, child) in &node.groups {
			if let Key::Group(group) = n.key {
				if n.modifiers == input_node.modifiers && group.matches(ch) {
					let result = lookup_with_info(child, nodes, pos + 1);
					if !matches!(result, MatchResult::None) {
						return result;
					}
				}
			}
		}
	}

	for (n, child) in &node.groups {
		if matches!(n.key, Key::Group(CharGroup::Any)) {
			let result = lookup_with_info(child, nodes, pos + 1);
			if !matches!(result, MatchResult::None) {
				return result;
			}
		}
	}

	MatchResult::None
}
