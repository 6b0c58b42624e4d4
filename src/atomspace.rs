//! The atom space collaborator behind the REST resources.
//!
//! Handlers only ever talk to the [`AtomSpace`] trait. [`MemoryAtomSpace`] is
//! the in-process implementation used by the server binary and the tests: a
//! keeper that deduplicates nodes by `(type, name)` and links by
//! `(type, outgoing)`, with an incoming lookup so links can be found from the
//! atoms they point at.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

// used to keep the one-to-one mapping between atom keys and their handles
use bimap::BiMap;
use tracing::debug;

use crate::construct::{
    Atom, AtomType, AttentionValue, Handle, HandleGenerator, HandleHasher, Lookup, TruthValue,
};
use crate::error::{AtomSpaceError, Result};

pub trait AtomSpace: Send + Sync {
    /// Fetch a copy of the atom, or `NotFound`.
    fn get(&self, handle: Handle) -> Result<Atom>;
    fn contains(&self, handle: Handle) -> Result<bool>;
    /// Add a node, returning the existing handle if `(atom_type, name)` is already kept.
    /// A given truth value replaces the kept one.
    fn add_node(&self, atom_type: AtomType, name: &str, tv: Option<TruthValue>) -> Result<Handle>;
    /// Add a link over existing atoms, returning the existing handle if
    /// `(atom_type, outgoing)` is already kept. A given truth value replaces the kept one.
    fn add_link(
        &self,
        atom_type: AtomType,
        outgoing: &[Handle],
        tv: Option<TruthValue>,
    ) -> Result<Handle>;
    fn set_tv(&self, handle: Handle, tv: TruthValue) -> Result<()>;
    /// Replace the given attention value components, leaving `None` ones untouched.
    fn set_av(
        &self,
        handle: Handle,
        sti: Option<i16>,
        lti: Option<i16>,
        vlti: Option<bool>,
    ) -> Result<()>;
    /// Remove an atom. Returns false if it is absent, or if it still has
    /// incoming links and `recursive` is not set. A recursive removal takes
    /// the incoming links (and theirs) with it.
    fn remove(&self, handle: Handle, recursive: bool) -> Result<bool>;
    /// All atoms passing the filter, in handle order.
    fn find(&self, filter: &AtomFilter) -> Result<Vec<Atom>>;
    fn len(&self) -> Result<usize>;
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Conditions an atom must meet to be listed. Unset conditions always pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomFilter {
    pub atom_type: Option<AtomType>,
    pub name: Option<String>,
    pub sti_min: Option<i16>,
    pub sti_max: Option<i16>,
    pub tv_strength_min: Option<f64>,
    pub tv_confidence_min: Option<f64>,
    pub tv_count_min: Option<f64>,
}

impl AtomFilter {
    pub fn matches(&self, atom: &Atom) -> bool {
        let tv = atom.tv();
        let av = atom.av();
        self.atom_type.is_none_or(|t| t == atom.atom_type())
            && self.name.as_deref().is_none_or(|n| n == atom.name())
            && self.sti_min.is_none_or(|min| av.sti() >= min)
            && self.sti_max.is_none_or(|max| av.sti() <= max)
            && self.tv_strength_min.is_none_or(|min| tv.strength() >= min)
            && self.tv_confidence_min.is_none_or(|min| tv.confidence() >= min)
            && self.tv_count_min.is_none_or(|min| tv.count() >= min)
    }
}

// ------------- AtomKeeper -------------
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
enum AtomKey {
    Node(AtomType, String),
    Link(AtomType, Vec<Handle>),
}

#[derive(Debug, Default)]
struct Values {
    tv: TruthValue,
    av: AttentionValue,
}

#[derive(Debug)]
struct AtomKeeper {
    generator: HandleGenerator,
    kept: BiMap<AtomKey, Handle>,
    values: HashMap<Handle, Values, HandleHasher>,
    incoming: Lookup<Handle, Handle, HandleHasher>,
}

impl AtomKeeper {
    fn new() -> Self {
        Self {
            generator: HandleGenerator::new(),
            kept: BiMap::new(),
            values: HashMap::default(),
            incoming: Lookup::new(),
        }
    }
    fn keep(&mut self, key: AtomKey, tv: Option<TruthValue>) -> Handle {
        if let Some(&handle) = self.kept.get_by_left(&key) {
            if let (Some(tv), Some(values)) = (tv, self.values.get_mut(&handle)) {
                values.tv = tv;
            }
            return handle;
        }
        let handle = self.generator.generate();
        if let AtomKey::Link(_, outgoing) = &key {
            for target in outgoing {
                self.incoming.insert(*target, handle);
            }
        }
        self.kept.insert(key, handle);
        self.values.insert(
            handle,
            Values {
                tv: tv.unwrap_or_default(),
                av: AttentionValue::default(),
            },
        );
        handle
    }
    fn values_mut(&mut self, handle: Handle) -> Result<&mut Values> {
        self.values
            .get_mut(&handle)
            .ok_or(AtomSpaceError::NotFound { handle })
    }
    fn incoming_of(&self, handle: Handle) -> Vec<Handle> {
        let mut incoming: Vec<Handle> = self
            .incoming
            .lookup(&handle)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        incoming.sort_unstable();
        incoming
    }
    fn snapshot(&self, handle: Handle) -> Option<Atom> {
        let key = self.kept.get_by_right(&handle)?;
        let values = self.values.get(&handle)?;
        let (atom_type, name, outgoing) = match key {
            AtomKey::Node(t, name) => (*t, name.clone(), Vec::new()),
            AtomKey::Link(t, outgoing) => (*t, String::new(), outgoing.clone()),
        };
        Some(Atom::new(
            handle,
            atom_type,
            name,
            outgoing,
            self.incoming_of(handle),
            values.tv,
            values.av,
        ))
    }
    fn remove(&mut self, handle: Handle, recursive: bool) -> bool {
        if !self.values.contains_key(&handle) {
            return false;
        }
        let incoming = self.incoming_of(handle);
        if !incoming.is_empty() {
            if !recursive {
                return false;
            }
            for link in incoming {
                // an earlier link in this loop may already have taken this one along
                self.remove(link, true);
            }
        }
        if let Some((AtomKey::Link(_, outgoing), _)) = self.kept.remove_by_right(&handle) {
            for target in outgoing {
                self.incoming.remove(&target, &handle);
            }
        }
        self.incoming.remove_key(&handle);
        self.values.remove(&handle);
        true
    }
}

// ------------- MemoryAtomSpace -------------
pub struct MemoryAtomSpace {
    keeper: Mutex<AtomKeeper>,
}

impl MemoryAtomSpace {
    pub fn new() -> Self {
        Self {
            keeper: Mutex::new(AtomKeeper::new()),
        }
    }
    fn keeper(&self) -> Result<MutexGuard<'_, AtomKeeper>> {
        Ok(self.keeper.lock()?)
    }
}

impl Default for MemoryAtomSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomSpace for MemoryAtomSpace {
    fn get(&self, handle: Handle) -> Result<Atom> {
        self.keeper()?
            .snapshot(handle)
            .ok_or(AtomSpaceError::NotFound { handle })
    }
    fn contains(&self, handle: Handle) -> Result<bool> {
        Ok(self.keeper()?.values.contains_key(&handle))
    }
    fn add_node(&self, atom_type: AtomType, name: &str, tv: Option<TruthValue>) -> Result<Handle> {
        if !atom_type.is_node() {
            return Err(AtomSpaceError::bad_request(format!(
                "Invalid request: {atom_type} is not a node type"
            )));
        }
        let handle = self
            .keeper()?
            .keep(AtomKey::Node(atom_type, name.to_owned()), tv);
        debug!(handle, %atom_type, atom_name = name, "node kept");
        Ok(handle)
    }
    fn add_link(
        &self,
        atom_type: AtomType,
        outgoing: &[Handle],
        tv: Option<TruthValue>,
    ) -> Result<Handle> {
        if !atom_type.is_link() {
            return Err(AtomSpaceError::bad_request(format!(
                "Invalid request: {atom_type} is not a link type"
            )));
        }
        let mut keeper = self.keeper()?;
        if let Some(missing) = outgoing.iter().find(|h| !keeper.values.contains_key(*h)) {
            return Err(AtomSpaceError::bad_request(format!(
                "Invalid request: outgoing handle {missing} not found"
            )));
        }
        let handle = keeper.keep(AtomKey::Link(atom_type, outgoing.to_vec()), tv);
        debug!(handle, %atom_type, arity = outgoing.len(), "link kept");
        Ok(handle)
    }
    fn set_tv(&self, handle: Handle, tv: TruthValue) -> Result<()> {
        self.keeper()?.values_mut(handle)?.tv = tv;
        Ok(())
    }
    fn set_av(
        &self,
        handle: Handle,
        sti: Option<i16>,
        lti: Option<i16>,
        vlti: Option<bool>,
    ) -> Result<()> {
        let mut keeper = self.keeper()?;
        let values = keeper.values_mut(handle)?;
        values.av = values.av.merged(sti, lti, vlti);
        Ok(())
    }
    fn remove(&self, handle: Handle, recursive: bool) -> Result<bool> {
        Ok(self.keeper()?.remove(handle, recursive))
    }
    fn find(&self, filter: &AtomFilter) -> Result<Vec<Atom>> {
        let keeper = self.keeper()?;
        let mut handles: Vec<Handle> = keeper.values.keys().copied().collect();
        handles.sort_unstable();
        Ok(handles
            .into_iter()
            .filter_map(|h| keeper.snapshot(h))
            .filter(|atom| filter.matches(atom))
            .collect())
    }
    fn len(&self) -> Result<usize> {
        Ok(self.keeper()?.values.len())
    }
}
