//! Immutable records produced by the build pipeline.
//!
//! - [`molecule`] – The root [`Molecule`] record and its owned [`Coordinates`] matrix.
//! - [`contributor`] – The optional nested [`Contributor`] attribution and its [`Contact`].
//! - [`types`] – Value vocabulary shared by records and errors: periodic-table
//!   elements, raw value classification, numeric scalars and matrix shapes.
//!
//! None of these types expose setters. Once built, a record's invariants hold
//! for its whole lifetime.
//!
//! [`Molecule`]: molecule::Molecule
//! [`Coordinates`]: molecule::Coordinates
//! [`Contributor`]: contributor::Contributor
//! [`Contact`]: contributor::Contact

pub mod contributor;
pub mod molecule;
pub mod types;
