//! Core library for the tabport command line application.
//!
//! The library exposes two independent utilities behind a shared record
//! model: a stable table sort engine in [`sort`] and a schema-driven xlsx
//! round trip in [`io`]. The modules are structured to keep responsibilities
//! narrow and composable: data representations live in [`model`], the
//! dot-path accessor in [`path`], xlsx adapters under [`io`], and the
//! file-to-file orchestration used by the CLI in [`convert`].

pub mod convert;
pub mod error;
pub mod io;
pub mod model;
pub mod path;
pub mod sort;

pub use error::{Result, TabError};
