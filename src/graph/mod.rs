//! Core graph data structures

mod store;
mod term;
mod triple;


pub use store::{Graph, GraphError, GraphResult};
pub use term::{BlankNode, Iri, Literal, Node, Object};
pub use triple::Triple;
