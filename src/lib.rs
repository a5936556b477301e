//! # Scanio Rules Library
//!
//! Core functionality for bundling static-analysis rule files from remote
//! repositories into a local directory tree. It backs the `scanio-rules`
//! command-line tool but can be driven directly by other applications.
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the `scanio_rules.yaml` schema: tools,
//!   rulesets, and the repositories each ruleset pulls files from, with
//!   document order preserved end to end.
//! - **Destination cleaning (`clean`)**: emptying the output tree before a
//!   run, interactively or forced.
//! - **Fetching (`git`)**: shallow clones into a scratch workspace via the
//!   system git command.
//! - **Collection (`collector`)**: the orchestrator that walks the
//!   manifest, copies requested files, and writes provenance backups.
//! - **Reporting (`report`)**: append-only logs of overwritten files,
//!   missing files, and clone errors, printed once at the end of a run.
//!
//! ## Execution Flow
//!
//! 1. Load the manifest ([`manifest::Manifest::load`]).
//! 2. Clean the destination ([`clean::clean_destination`]).
//! 3. Create a scratch `TempDir` and run [`collector::collect`], which
//!    clones each repository, copies files, and writes the per-ruleset and
//!    full manifest backups.
//! 4. Print the report; the scratch workspace is released on every exit
//!    path when the `TempDir` drops.
//!
//! A clone failure is local to its repository entry: it is recorded and
//! the run continues. Every other error is fatal.

pub mod clean;
pub mod collector;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod report;
