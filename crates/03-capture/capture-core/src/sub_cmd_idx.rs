use smallvec::SmallVec;

/// Identifies a command, or a nested sub-command within it, by a
/// lexicographically ordered path: `[5]` is the sixth top-level command,
/// `[5, 2]` is the third sub-command nested inside it.
///
/// Ordering is derived lexicographically over the path components, the same
/// rule `SmallVec`'s `Ord` impl gives a slice: shorter prefixes sort before
/// their own extensions, matching replay order (a command's sub-commands are
/// all sequenced strictly after the command that contains them, but before
/// whatever top-level command follows it).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubCmdIdx(pub SmallVec<[u64; 4]>);

impl SubCmdIdx {
    pub fn root(index: u64) -> Self {
        SubCmdIdx(SmallVec::from_slice(&[index]))
    }

    pub fn nested(&self, index: u64) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        SubCmdIdx(path)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Top-level command index this path descends from.
    pub fn root_index(&self) -> Option<u64> {
        self.0.first().copied()
    }

    /// `true` if `self` names a nested sub-command of `other` (strictly
    /// longer and sharing `other`'s full prefix).
    pub fn is_nested_in(&self, other: &SubCmdIdx) -> bool {
        self.0.len() > other.0.len() && self.0[..other.0.len()] == other.0[..]
    }
}

impl From<u64> for SubCmdIdx {
    fn from(index: u64) -> Self {
        SubCmdIdx::root(index)
    }
}
