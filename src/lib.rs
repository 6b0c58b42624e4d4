//! atomspace-rest – a JSON/HTTP resource layer over an atom space.
//!
//! An *atom space* is a hypergraph knowledge store. Its elements are *atoms*:
//! * A [`construct::Handle`] is the opaque identity of an atom (a simple `u64`).
//! * An [`construct::AtomType`] is drawn from a fixed enumeration of node and link types.
//! * A node has a name; a link has an ordered *outgoing* set of handles. The
//!   links pointing at an atom form its *incoming* set.
//! * Every atom carries a [`construct::TruthValue`] (strength and count, from
//!   which a confidence is derived) and an [`construct::AttentionValue`]
//!   (short, long and very-long-term importance).
//!
//! ## Modules
//! * [`construct`] – Handles, atom types, value types and the lookup used for incoming sets.
//! * [`atomspace`] – The [`atomspace::AtomSpace`] collaborator trait and the in-memory
//!   [`atomspace::MemoryAtomSpace`].
//! * [`mapper`] – Marshalling of atoms into JSON and parsing of truth/attention values.
//! * [`server`] – The axum router exposing `atoms/{id}` (GET/PUT/DELETE), the atom
//!   collection (GET/POST) and the type listing.
//! * [`settings`] – Configuration read with the `config` crate.
//!
//! ## Resources
//! * `GET /api/v1/atoms/{id}` → `{"atoms": {...}}`, or 404 `Handle not found`.
//! * `PUT /api/v1/atoms/{id}` with `truthvalue` and/or `attentionvalue` → `{"atoms": {...}}`;
//!   400 if neither is given.
//! * `DELETE /api/v1/atoms/{id}[?recursive=true]` →
//!   `{"result": {"handle": id, "success": bool}}`.
//! * `GET /api/v1/atoms?type=&name=&...` and `POST /api/v1/atoms`.
//! * `GET /api/v1/types`.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use atomspace_rest::atomspace::{AtomSpace, MemoryAtomSpace};
//! use atomspace_rest::construct::AtomType;
//! use atomspace_rest::server::router;
//! let space = Arc::new(MemoryAtomSpace::new());
//! let cat = space.add_node(AtomType::ConceptNode, "cat", None).unwrap();
//! let animal = space.add_node(AtomType::ConceptNode, "animal", None).unwrap();
//! let link = space.add_link(AtomType::InheritanceLink, &[cat, animal], None).unwrap();
//! assert_eq!(space.get(cat).unwrap().incoming(), &[link]);
//! let _app = router(space);
//! ```

pub mod atomspace;
pub mod construct;
pub mod error;
pub mod mapper;
pub mod server;
pub mod settings;

pub use error::{AtomSpaceError, Result};
