//! Disjoint-set forest over dense `u32` indices.

use ena::unify::{InPlaceUnificationTable, UnifyKey};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
struct IntKey(u32);

impl UnifyKey for IntKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> IntKey {
        IntKey(u)
    }
    fn tag() -> &'static str {
        "IntKey"
    }
}

/// Union-find over the indices `0..len`.
pub(crate) struct UnionFind {
    table: InPlaceUnificationTable<IntKey>,
    len: usize,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        let mut table = InPlaceUnificationTable::new();
        for _ in 0..len {
            let _ = table.new_key(());
        }
        UnionFind { table, len }
    }

    pub fn union(&mut self, a: u32, b: u32) {
        self.table.union(IntKey(a), IntKey(b));
    }

    pub fn find(&mut self, a: u32) -> u32 {
        self.table.find(IntKey(a)).0
    }

    /// Labels every index with the rank of its class, classes being ranked by their smallest
    /// member. Returns the labels and the number of classes.
    pub fn labels(&mut self) -> (Vec<u32>, usize) {
        let len = self.len;
        let mut root_label = vec![u32::MAX; len];
        let mut labels = Vec::with_capacity(len);
        let mut num_classes = 0;

        for i in 0..len as u32 {
            let root = self.find(i) as usize;
            if root_label[root] == u32::MAX {
                root_label[root] = num_classes as u32;
                num_classes += 1;
            }
            labels.push(root_label[root]);
        }

        (labels, num_classes)
    }
}

#[cfg(test)]
mod test {
    use super::UnionFind;

    #[test]
    fn labels_follow_first_member_order() {
        let mut uf = UnionFind::new(5);
        uf.union(3, 1);
        uf.union(4, 2);
        uf.union(2, 3);
        assert_eq!(uf.labels(), (vec![0, 1, 1, 1, 1], 2));
    }
}
