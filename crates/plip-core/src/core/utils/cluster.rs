use std::collections::HashMap;
use std::hash::Hash;

/// Disjoint-set forest over arbitrary hashable elements.
///
/// Elements are registered on first sight and keep that registration order,
/// which is what [`UnionFind::clusters`] reports back.
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    index: HashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<T> Default for UnionFind<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            elements: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> UnionFind<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn insert(&mut self, element: T) -> usize {
        if let Some(&i) = self.index.get(&element) {
            return i;
        }
        let i = self.elements.len();
        self.index.insert(element.clone(), i);
        self.elements.push(element);
        self.parent.push(i);
        self.rank.push(0);
        i
    }

    fn find_root(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    pub fn find(&mut self, element: &T) -> Option<usize> {
        let i = *self.index.get(element)?;
        Some(self.find_root(i))
    }

    pub fn union(&mut self, a: T, b: T) {
        let ia = self.insert(a);
        let ib = self.insert(b);
        let ra = self.find_root(ia);
        let rb = self.find_root(ib);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn connected(&mut self, a: &T, b: &T) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// Connected components, ordered by the first-registered member of each.
    pub fn clusters(&mut self) -> Vec<Vec<T>> {
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut clusters: Vec<Vec<T>> = Vec::new();
        for i in 0..self.elements.len() {
            let root = self.find_root(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[slot].push(self.elements[i].clone());
        }
        clusters
    }
}

/// Groups pairs that share any element into connected components.
pub fn cluster_pairs<T: Eq + Hash + Clone>(pairs: &[(T, T)]) -> Vec<Vec<T>> {
    let mut forest = UnionFind::new();
    for (a, b) in pairs {
        forest.union(a.clone(), b.clone());
    }
    forest.clusters()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_pairs_stay_separate() {
        let clusters = cluster_pairs(&[(1, 2), (3, 4)]);
        assert_eq!(clusters, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn pairs_sharing_an_element_are_merged() {
        let clusters = cluster_pairs(&[(1, 2), (3, 4), (2, 3), (5, 6)]);
        assert_eq!(clusters, vec![vec![1, 2, 3, 4], vec![5, 6]]);
    }

    #[test]
    fn merging_late_bridges_keeps_first_appearance_order() {
        let clusters = cluster_pairs(&[("c", "d"), ("a", "b"), ("b", "c")]);
        assert_eq!(clusters, vec![vec!["c", "d", "a", "b"]]);
    }

    #[test]
    fn self_pairs_and_repeats_are_harmless() {
        let clusters = cluster_pairs(&[(7, 7), (7, 8), (8, 7)]);
        assert_eq!(clusters, vec![vec![7, 8]]);
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        let clusters: Vec<Vec<u32>> = cluster_pairs(&[]);
        assert!(clusters.is_empty());
    }

    #[test]
    fn union_find_reports_connectivity() {
        let mut forest = UnionFind::new();
        forest.union('a', 'b');
        forest.union('c', 'd');
        assert!(forest.connected(&'a', &'b'));
        assert!(!forest.connected(&'a', &'c'));
        forest.union('b', 'd');
        assert!(forest.connected(&'a', &'c'));
        assert!(!forest.connected(&'a', &'z'));
        assert_eq!(forest.len(), 4);
        assert!(forest.find(&'z').is_none());
    }
}
