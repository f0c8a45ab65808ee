// Closed symbol sets: elements, polarities, stems, branches

pub mod branch;
pub mod element;
pub mod stem;

pub use branch::Branch;
pub use element::{Element, ElementRelation, Polarity};
pub use stem::Stem;
