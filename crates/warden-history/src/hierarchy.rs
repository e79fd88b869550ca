//! Parent links between building kinds.
//!
//! Decoder lookup walks from a building's own kind towards
//! [`KindHierarchy::ROOT`]. The links live here as plain data so a registry can
//! be built against a custom hierarchy without touching [`BuildingKind`].

use std::collections::BTreeMap;

use warden_types::BuildingKind;

/// Maps each building kind to its parent kind.
///
/// Kinds without an explicit parent hang directly off [`KindHierarchy::ROOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindHierarchy {
    parents: BTreeMap<BuildingKind, BuildingKind>,
}

impl KindHierarchy {
    /// The generic base capability every building shares.
    pub const ROOT: BuildingKind = BuildingKind::Building;

    /// A hierarchy where every kind is a direct child of the root.
    pub const fn flat() -> Self {
        Self {
            parents: BTreeMap::new(),
        }
    }

    /// The hierarchy of the built-in building kinds.
    pub fn builtin() -> Self {
        let mut hierarchy = Self::flat();
        hierarchy
            .set_parent(BuildingKind::BufferedItemBridge, BuildingKind::ItemBridge)
            .set_parent(BuildingKind::PayloadDriver, BuildingKind::PayloadBlock)
            .set_parent(BuildingKind::UnitBlock, BuildingKind::PayloadBlock)
            .set_parent(BuildingKind::UnitFactory, BuildingKind::UnitBlock)
            .set_parent(BuildingKind::Reconstructor, BuildingKind::UnitBlock);
        hierarchy
    }

    /// Declare `parent` as the parent of `kind`. The root's parent cannot be
    /// set.
    pub fn set_parent(&mut self, kind: BuildingKind, parent: BuildingKind) -> &mut Self {
        if kind != Self::ROOT {
            self.parents.insert(kind, parent);
        }
        self
    }

    /// The parent of `kind`, or `None` for the root.
    pub fn parent(&self, kind: BuildingKind) -> Option<BuildingKind> {
        if kind == Self::ROOT {
            return None;
        }
        Some(self.parents.get(&kind).copied().unwrap_or(Self::ROOT))
    }

    /// Walk from `kind` (inclusive) towards the root, most specific first.
    ///
    /// The walk is bounded by the number of known kinds, so a cyclic custom
    /// hierarchy ends instead of looping.
    pub fn ancestry(&self, kind: BuildingKind) -> Ancestry<'_> {
        Ancestry {
            hierarchy: self,
            next: Some(kind),
            remaining: BuildingKind::ALL.len(),
        }
    }
}

impl Default for KindHierarchy {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Iterator returned by [`KindHierarchy::ancestry`].
#[derive(Debug, Clone)]
pub struct Ancestry<'a> {
    hierarchy: &'a KindHierarchy,
    next: Option<BuildingKind>,
    remaining: usize,
}

impl Iterator for Ancestry<'_> {
    type Item = BuildingKind;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining = self.remaining.saturating_sub(1);
        self.next = self.hierarchy.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_factory_walks_through_payload_block() {
        let hierarchy = KindHierarchy::builtin();
        let chain: Vec<_> = hierarchy.ancestry(BuildingKind::UnitFactory).collect();
        assert_eq!(
            chain,
            vec![
                BuildingKind::UnitFactory,
                BuildingKind::UnitBlock,
                BuildingKind::PayloadBlock,
                BuildingKind::Building,
            ]
        );
    }

    #[test]
    fn unlisted_kind_hangs_off_root() {
        let hierarchy = KindHierarchy::builtin();
        assert_eq!(hierarchy.parent(BuildingKind::Message), Some(BuildingKind::Building));
        let chain: Vec<_> = hierarchy.ancestry(BuildingKind::Message).collect();
        assert_eq!(chain, vec![BuildingKind::Message, BuildingKind::Building]);
    }

    #[test]
    fn root_has_no_parent() {
        let mut hierarchy = KindHierarchy::flat();
        hierarchy.set_parent(BuildingKind::Building, BuildingKind::Light);
        assert_eq!(hierarchy.parent(BuildingKind::Building), None);
        assert_eq!(hierarchy.ancestry(BuildingKind::Building).count(), 1);
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let mut hierarchy = KindHierarchy::flat();
        hierarchy
            .set_parent(BuildingKind::Light, BuildingKind::Message)
            .set_parent(BuildingKind::Message, BuildingKind::Light);
        let steps = hierarchy.ancestry(BuildingKind::Light).count();
        assert_eq!(steps, BuildingKind::ALL.len());
    }
}
