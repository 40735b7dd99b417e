//! Chain state identifiers.

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque identifier for a position of the chain.
///
/// States must be comparable so that iteration and error reports are
/// deterministic, and hashable so that graphs can index their vertices.
/// Anything `Clone + Ord + Hash + Debug` qualifies: integers, strings,
/// tuples of states, enums.
pub trait State: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> State for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_types_are_states() {
        fn assert_state<T: State>() {}
        assert_state::<u32>();
        assert_state::<i64>();
        assert_state::<char>();
        assert_state::<&str>();
        assert_state::<String>();
        assert_state::<(u8, u8)>();
        assert_state::<(String, String)>();
    }
}
