use crate::detection::PenetrationRecord;
use crate::mesh::NodeId;
use crate::utils::hashmap::{Entry, HashMap};

/// Exclusive owner of the penetration records, keyed by slave node.
///
/// The invariant maintained here is that no two records for the same node
/// ever coexist: [`PenetrationStore::upsert`] destroys any previous record
/// for the node before taking ownership of the new one. Other components only
/// see borrowed records for the duration of one detection pass.
#[derive(Clone, Debug, Default)]
pub struct PenetrationStore {
    records: HashMap<NodeId, PenetrationRecord>,
}

impl PenetrationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record of the node `node`, if it is currently tracked.
    pub fn get(&self, node: NodeId) -> Option<&PenetrationRecord> {
        self.records.get(&node)
    }

    /// Mutable access to the record of the node `node`.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut PenetrationRecord> {
        self.records.get_mut(&node)
    }

    /// Is the node `node` currently tracked?
    pub fn contains(&self, node: NodeId) -> bool {
        self.records.contains_key(&node)
    }

    /// Inserts `record`, replacing (and destroying) any previous record of
    /// the same node.
    pub fn upsert(&mut self, record: PenetrationRecord) {
        match self.records.entry(record.node) {
            Entry::Occupied(mut occupied) => {
                *occupied.get_mut() = record;
            }
            Entry::Vacant(vacant) => {
                let _ = vacant.insert(record);
            }
        }
    }

    /// Removes and returns the record of the node `node`, if any.
    pub fn remove(&mut self, node: NodeId) -> Option<PenetrationRecord> {
        self.records.remove(&node)
    }

    /// The number of tracked nodes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is no node currently tracked?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all records.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PenetrationRecord)> {
        self.records.iter().map(|(node, rec)| (*node, rec))
    }

    /// Destroys every record.
    pub fn clear(&mut self) {
        self.records.clear()
    }
}
