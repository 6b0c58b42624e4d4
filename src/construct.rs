// other keepers use HashSet or HashMap
use core::hash::{BuildHasher, BuildHasherDefault};
use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AtomSpaceError;

// ------------- Handle -------------
pub type Handle = u64;

pub type HandleHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: Handle = 0;

/// Issues handles in increasing order. Handles are never reused, so a client
/// holding a stale handle gets a "not found" rather than some other atom.
#[derive(Debug)]
pub struct HandleGenerator {
    lower_bound: Handle,
}

impl HandleGenerator {
    pub fn new() -> Self {
        Self { lower_bound: GENESIS }
    }
    pub fn generate(&mut self) -> Handle {
        self.lower_bound += 1;
        self.lower_bound
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- AtomType -------------
macro_rules! atom_types {
    (
        nodes = [ $($node:ident),+ $(,)? ]
        links = [ $($link:ident),+ $(,)? ]
    ) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub enum AtomType {
            $($node,)+
            $($link,)+
        }
        impl AtomType {
            /// Every type, nodes first, in declaration order.
            pub const ALL: &'static [AtomType] = &[
                $(AtomType::$node,)+
                $(AtomType::$link,)+
            ];
            pub fn name(&self) -> &'static str {
                match self {
                    $(AtomType::$node => stringify!($node),)+
                    $(AtomType::$link => stringify!($link),)+
                }
            }
            pub fn is_node(&self) -> bool {
                matches!(self, $(AtomType::$node)|+)
            }
            pub fn is_link(&self) -> bool {
                !self.is_node()
            }
        }
    };
}

atom_types! {
    nodes = [
        Node,
        ConceptNode,
        PredicateNode,
        NumberNode,
        VariableNode,
        SchemaNode,
        GroundedSchemaNode,
        TypeNode,
        WordNode,
    ]
    links = [
        Link,
        ListLink,
        SetLink,
        MemberLink,
        InheritanceLink,
        SimilarityLink,
        EvaluationLink,
        ExecutionLink,
        ExecutionOutputLink,
        ImplicationLink,
        AndLink,
        OrLink,
        NotLink,
        ContextLink,
    ]
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for AtomType {
    type Err = AtomSpaceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AtomType::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| {
                AtomSpaceError::bad_request(format!("Invalid request: unknown atom type '{s}'"))
            })
    }
}
impl Serialize for AtomType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
impl<'de> Deserialize<'de> for AtomType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ------------- TruthValue -------------
/// Personality parameter turning an observation count into a confidence.
pub const DEFAULT_K: f64 = 800.0;

/// A simple truth value: how strongly something holds, and on how much
/// evidence. Confidence is derived from the count and never stored.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TruthValue {
    strength: f64,
    count: f64,
}

impl TruthValue {
    pub fn new(strength: f64, count: f64) -> Self {
        Self { strength, count }
    }
    pub fn strength(&self) -> f64 {
        self.strength
    }
    pub fn count(&self) -> f64 {
        self.count
    }
    pub fn confidence(&self) -> f64 {
        self.count / (self.count + DEFAULT_K)
    }
}
impl Default for TruthValue {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}
impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}, {}>", self.strength, self.count)
    }
}

// ------------- AttentionValue -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct AttentionValue {
    sti: i16,
    lti: i16,
    vlti: bool,
}

impl AttentionValue {
    pub fn new(sti: i16, lti: i16, vlti: bool) -> Self {
        Self { sti, lti, vlti }
    }
    pub fn sti(&self) -> i16 {
        self.sti
    }
    pub fn lti(&self) -> i16 {
        self.lti
    }
    pub fn vlti(&self) -> bool {
        self.vlti
    }
    /// Returns a copy where only the given components are replaced.
    pub fn merged(&self, sti: Option<i16>, lti: Option<i16>, vlti: Option<bool>) -> Self {
        Self {
            sti: sti.unwrap_or(self.sti),
            lti: lti.unwrap_or(self.lti),
            vlti: vlti.unwrap_or(self.vlti),
        }
    }
}

// ------------- Atom -------------
/// A point-in-time copy of an atom as kept by an atom space.
#[derive(Clone, PartialEq, Debug)]
pub struct Atom {
    handle: Handle,
    atom_type: AtomType,
    name: String,
    outgoing: Vec<Handle>,
    incoming: Vec<Handle>,
    tv: TruthValue,
    av: AttentionValue,
}

impl Atom {
    pub fn new(
        handle: Handle,
        atom_type: AtomType,
        name: String,
        outgoing: Vec<Handle>,
        incoming: Vec<Handle>,
        tv: TruthValue,
        av: AttentionValue,
    ) -> Self {
        Self {
            handle,
            atom_type,
            name,
            outgoing,
            incoming,
            tv,
            av,
        }
    }
    pub fn handle(&self) -> Handle {
        self.handle
    }
    pub fn atom_type(&self) -> AtomType {
        self.atom_type
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn outgoing(&self) -> &[Handle] {
        &self.outgoing
    }
    pub fn incoming(&self) -> &[Handle] {
        &self.incoming
    }
    pub fn tv(&self) -> TruthValue {
        self.tv
    }
    pub fn av(&self) -> AttentionValue {
        self.av
    }
}
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.atom_type.is_node() {
            write!(f, "{} ({} \"{}\") {}", self.handle, self.atom_type, self.name, self.tv)
        } else {
            let outgoing: Vec<String> = self.outgoing.iter().map(|h| h.to_string()).collect();
            write!(f, "{} ({} {}) {}", self.handle, self.atom_type, outgoing.join(" "), self.tv)
        }
    }
}

// ------------- Lookups -------------
#[derive(Debug)]
pub struct Lookup<K, V, H = RandomState> {
    index: HashMap<K, HashSet<V, H>, H>,
}
impl<K: Eq + Hash, V: Eq + Hash, H: BuildHasher + Default> Lookup<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::<K, HashSet<V, H>, H>::default(),
        }
    }
    pub fn insert(&mut self, key: K, value: V) {
        let set = self.index.entry(key).or_default();
        set.insert(value);
    }
    pub fn lookup(&self, key: &K) -> Option<&HashSet<V, H>> {
        self.index.get(key)
    }
    pub fn remove(&mut self, key: &K, value: &V) {
        if let Some(set) = self.index.get_mut(key) {
            set.remove(value);
            if set.is_empty() {
                self.index.remove(key);
            }
        }
    }
    pub fn remove_key(&mut self, key: &K) {
        self.index.remove(key);
    }
}
impl<K: Eq + Hash, V: Eq + Hash, H: BuildHasher + Default> Default for Lookup<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}
