use crate::Map;
use itertools::Either;
use std::mem;

/// Child transitions of an automaton node.
#[derive(Clone, Debug)]
pub(crate) enum CharMap<V> {
    // All keys are lowercase ASCII letters.
    Common([Option<V>; 26]),
    // Some keys are digits, spaces or non-ASCII.
    Rare(Map<char, V>),
}

impl<V: Copy> CharMap<V> {
    pub fn new() -> Self {
        Self::Common([None; 26])
    }

    fn to_common_idx(key: char) -> Option<usize> {
        key.is_ascii_lowercase()
            .then(|| key as usize - 'a' as usize)
    }

    fn from_common_idx(idx: usize) -> char {
        (idx as u8 + b'a') as char
    }

    pub fn insert(&mut self, key: char, value: V) {
        let common_idx = Self::to_common_idx(key);

        if common_idx.is_none() {
            if let Self::Common(arr) = self {
                let mut map = Map::default();

                for (idx, value) in arr.iter_mut().enumerate() {
                    if let Some(value) = mem::take(value) {
                        map.insert(Self::from_common_idx(idx), value);
                    }
                }

                *self = Self::Rare(map);
            }
        }

        match (self, common_idx) {
            (Self::Common(arr), Some(idx)) => arr[idx] = Some(value),
            (Self::Common(_), None) => unreachable!("converted to rare above"),
            (Self::Rare(map), _) => {
                map.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: char) -> Option<V> {
        match self {
            Self::Common(arr) => Self::to_common_idx(key).and_then(|k| arr[k]),
            Self::Rare(map) => map.get(&key).copied(),
        }
    }

    /// Iterates transitions. Order is unspecified for rare maps.
    pub fn iter(&self) -> impl Iterator<Item = (char, V)> + '_ {
        match self {
            Self::Common(arr) => Either::Left(
                arr.iter()
                    .enumerate()
                    .filter_map(|(idx, v)| v.map(|v| (Self::from_common_idx(idx), v))),
            ),
            Self::Rare(map) => Either::Right(map.iter().map(|(&k, &v)| (k, v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CharMap;

    #[test]
    fn common_to_rare() {
        let mut map = CharMap::new();
        map.insert('a', 1usize);
        map.insert('z', 26);
        assert!(matches!(map, CharMap::Common(_)));
        assert_eq!(map.get('a'), Some(1));
        assert_eq!(map.get('b'), None);

        map.insert('4', 4);
        assert!(matches!(map, CharMap::Rare(_)));
        assert_eq!(map.get('a'), Some(1));
        assert_eq!(map.get('z'), Some(26));
        assert_eq!(map.get('4'), Some(4));

        let mut all: Vec<_> = map.iter().collect();
        all.sort();
        assert_eq!(all, vec![('4', 4), ('a', 1), ('z', 26)]);
    }

    #[test]
    fn empty() {
        let map = CharMap::<usize>::new();
        assert_eq!(map.iter().count(), 0);
    }
}
