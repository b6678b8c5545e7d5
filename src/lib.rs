//! Seamline: garment production document management
//!
//! A Unix-style toolkit for managing garment manufacturing documents (styles,
//! tech packs, QC inspections) as plain text files with a role-based approval
//! workflow.

pub mod cli;
pub mod core;
pub mod entities;
pub mod qc;
pub mod schema;
