use log::debug;

use std::collections::{btree_map, BTreeMap, BTreeSet, HashMap};

use crate::config::*;

/// Gives access to the precomputed tokens of each record.
pub trait TokenLookup {
    fn tokens(&self, id: RecordId) -> Option<&[String]>;
}

impl TokenLookup for HashMap<RecordId, Vec<String>> {
    fn tokens(&self, id: RecordId) -> Option<&[String]> {
        self.get(&id).map(|v| v.as_slice())
    }
}

impl TokenLookup for [NormalizedResponse] {
    fn tokens(&self, id: RecordId) -> Option<&[String]> {
        self.get(id.0).map(|n| n.clean_tokens.as_slice())
    }
}

/// Number of occurrences of each term over a set of records.
///
/// Terms are kept in lexical order, so two tables built from the same
/// records are identical, whatever the order the records came in.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct TermFrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl TermFrequencyTable {
    pub fn new() -> TermFrequencyTable {
        TermFrequencyTable::default()
    }

    pub fn add(&mut self, term: &str, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(term.to_string()).or_insert(0) += count;
    }

    pub fn get(&self, term: &str) -> u64 {
        self.counts.get(term).cloned().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of token occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    pub fn merge(&mut self, other: &TermFrequencyTable) {
        for (term, count) in other.iter() {
            self.add(term, *count);
        }
    }

    /// The terms from the most to the least frequent. Ties are broken alphabetically.
    pub fn ranked(&self) -> Vec<TermCount> {
        let mut res: Vec<TermCount> = self
            .counts
            .iter()
            .map(|(term, count)| TermCount {
                term: term.clone(),
                count: *count,
            })
            .collect();
        // The map is already sorted by term and the sort is stable.
        res.sort_by_key(|tc| std::cmp::Reverse(tc.count));
        res
    }

    pub fn top(&self, n: usize) -> Vec<TermCount> {
        let mut res = self.ranked();
        res.truncate(n);
        res
    }
}

impl<'a> IntoIterator for &'a TermFrequencyTable {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Counts the tokens of the selected records.
///
/// Every record is counted once, even if it is listed several times.
/// A record without tokens in the lookup contributes nothing.
pub fn aggregate<I, L>(selected: I, lookup: &L) -> TermFrequencyTable
where
    I: IntoIterator<Item = RecordId>,
    L: TokenLookup + ?Sized,
{
    let ids: BTreeSet<RecordId> = selected.into_iter().collect();
    let mut table = TermFrequencyTable::new();
    let mut missing: usize = 0;
    for id in ids.iter() {
        match lookup.tokens(*id) {
            Some(tokens) => {
                for t in tokens {
                    table.add(t, 1);
                }
            }
            None => {
                missing += 1;
            }
        }
    }
    if missing > 0 {
        debug!("aggregate: {} selected records have no tokens", missing);
    }
    debug!(
        "aggregate: {} records, {} distinct terms, {} occurrences",
        ids.len(),
        table.len(),
        table.total()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(docs: &[&[&str]]) -> HashMap<RecordId, Vec<String>> {
        docs.iter()
            .enumerate()
            .map(|(idx, toks)| {
                (
                    RecordId(idx),
                    toks.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn counts_occurrences_not_records() {
        let idx = index(&[&["great", "great", "food"], &["great"]]);
        let t = aggregate([RecordId(0), RecordId(1)], &idx);
        assert_eq!(t.get("great"), 3);
        assert_eq!(t.get("food"), 1);
        assert_eq!(t.get("absent"), 0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.total(), 4);
    }

    #[test]
    fn empty_selection_and_empty_records() {
        let idx = index(&[&[], &[]]);
        assert!(aggregate(Vec::<RecordId>::new(), &idx).is_empty());
        assert!(aggregate([RecordId(0), RecordId(1)], &idx).is_empty());
    }

    #[test]
    fn missing_lookup_counts_zero() {
        let idx = index(&[&["talks"]]);
        let t = aggregate([RecordId(0), RecordId(7)], &idx);
        assert_eq!(t.total(), 1);
    }

    #[test]
    fn duplicate_ids_are_counted_once() {
        let idx = index(&[&["talks"]]);
        let t = aggregate([RecordId(0), RecordId(0)], &idx);
        assert_eq!(t.get("talks"), 1);
    }

    #[test]
    fn order_independent() {
        let idx = index(&[&["a1", "b1"], &["b1", "c1"], &["c1", "c1", "d1"]]);
        let forward = aggregate([RecordId(0), RecordId(1), RecordId(2)], &idx);
        let backward = aggregate([RecordId(2), RecordId(0), RecordId(1)], &idx);
        assert_eq!(forward, backward);
        assert_eq!(forward.ranked(), backward.ranked());
    }

    #[test]
    fn additive_over_disjoint_sets() {
        let idx = index(&[&["aaa", "bbb"], &["bbb"], &["ccc", "aaa"], &["bbb", "bbb"]]);
        let a = aggregate([RecordId(0), RecordId(3)], &idx);
        let b = aggregate([RecordId(1), RecordId(2)], &idx);
        let all = aggregate((0..4).map(RecordId), &idx);
        let mut merged = a.clone();
        merged.merge(&b);
        assert_eq!(merged, all);
        for (term, count) in &all {
            assert_eq!(*count, a.get(term) + b.get(term));
        }
    }

    #[test]
    fn ranking() {
        let idx = index(&[&["pear", "apple", "fig", "pear", "apple", "kiwi", "pear"]]);
        let t = aggregate([RecordId(0)], &idx);
        let ranked: Vec<(String, u64)> = t
            .ranked()
            .into_iter()
            .map(|tc| (tc.term, tc.count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("pear".to_string(), 3),
                ("apple".to_string(), 2),
                ("fig".to_string(), 1),
                ("kiwi".to_string(), 1),
            ]
        );
        assert_eq!(t.top(1)[0].term, "pear");
        assert_eq!(t.top(10).len(), 4);
    }

    #[test]
    fn lookup_over_normalized_slice() {
        let docs = vec![
            NormalizedResponse {
                display_text: "Great food".to_string(),
                clean_tokens: vec!["great".to_string(), "food".to_string()],
            },
            NormalizedResponse::default(),
        ];
        let t = aggregate([RecordId(0), RecordId(1), RecordId(2)], docs.as_slice());
        assert_eq!(t.total(), 2);
    }
}
