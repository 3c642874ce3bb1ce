//! Socket compatibility rules with construction-time validation

use std::collections::{BTreeMap, HashMap};

use crate::algorithm::bitset::TileBitset;
use crate::io::error::ConfigurationError;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{SocketLabel, TileCatalog};

/// Socket label to the labels allowed to face it, as written in configuration
pub type ConnectionRules = BTreeMap<SocketLabel, Vec<SocketLabel>>;

/// Validated, symmetric socket compatibility relation
///
/// Labels are interned to dense socket ids in label order so that each
/// compatibility row is a [`TileBitset`] over socket ids.
#[derive(Clone, Debug)]
pub struct ConnectionTable {
    labels: Vec<SocketLabel>,
    ids: HashMap<SocketLabel, usize>,
    allowed: Vec<TileBitset>,
}

impl ConnectionTable {
    /// Validate `rules` against every label the catalog uses
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if:
    /// - A variant uses a label that is not a key of `rules`
    /// - A rule lists a label that is not a key of `rules`
    /// - The relation is not symmetric
    pub fn new(rules: &ConnectionRules, catalog: &TileCatalog) -> Result<Self, ConfigurationError> {
        for (variant, tile) in catalog.variants().iter().enumerate() {
            for direction in Direction::ALL {
                let socket = tile.socket(direction);
                if !rules.contains_key(socket) {
                    return Err(ConfigurationError::MissingSocket {
                        socket: socket.clone(),
                        variant,
                    });
                }
            }
        }

        for (socket, targets) in rules {
            for target in targets {
                let Some(reverse) = rules.get(target) else {
                    return Err(ConfigurationError::UnknownSocket {
                        socket: socket.clone(),
                        target: target.clone(),
                    });
                };
                if !reverse.contains(socket) {
                    return Err(ConfigurationError::AsymmetricRule {
                        socket: socket.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        let labels: Vec<SocketLabel> = rules.keys().cloned().collect();
        let ids: HashMap<SocketLabel, usize> = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();
        let allowed = rules
            .values()
            .map(|targets| {
                TileBitset::from_indices(
                    targets.iter().filter_map(|target| ids.get(target).copied()),
                    labels.len(),
                )
            })
            .collect();

        Ok(Self {
            labels,
            ids,
            allowed,
        })
    }

    /// Number of distinct socket labels
    pub fn socket_count(&self) -> usize {
        self.labels.len()
    }

    /// Dense id assigned to a label
    pub fn id_of(&self, label: &SocketLabel) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Label for a dense id
    pub fn label_of(&self, id: usize) -> Option<&SocketLabel> {
        self.labels.get(id)
    }

    /// Socket ids allowed to face the given socket id
    pub fn allowed(&self, id: usize) -> Option<&TileBitset> {
        self.allowed.get(id)
    }

    /// Whether two labels may face each other
    pub fn compatible(&self, a: &SocketLabel, b: &SocketLabel) -> bool {
        match (self.id_of(a), self.id_of(b)) {
            (Some(a), Some(b)) => self.allowed(a).is_some_and(|row| row.contains(b)),
            _ => false,
        }
    }

    /// Union of the compatibility rows of every socket id in `exposed`
    pub fn allowed_union(&self, exposed: &TileBitset) -> TileBitset {
        let mut union = TileBitset::new(self.socket_count());
        for id in exposed.iter() {
            if let Some(row) = self.allowed(id) {
                union.union_with(row);
            }
        }
        union
    }
}
