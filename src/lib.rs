// Copyright 2025 the mapscope authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![allow(dead_code)]

//! # mapscope
//!
//! A cross-platform engine for resolving and querying name mappings of versioned,
//! obfuscated game binaries. `mapscope` translates stable, human-assigned symbolic
//! names into the build-specific internal names a recompiled binary actually uses,
//! and back: the plumbing every reflective bridge into a renamed binary needs.
//!
//! Because the binary's internal naming changes between releases, no fixed mapping
//! table can be hard-coded. Instead, the resolver negotiates the correct mapping
//! build for the exact running version at startup, fetches and decodes the published
//! artifact once, and thereafter answers translation queries from an immutable
//! in-memory symbol table.
//!
//! ## Features
//!
//! - **🔎 Version negotiation** - Selects the highest mapping build published for an exact binary version
//! - **📦 Streaming decode** - Single-pass Tiny v2 decoding, no whole-artifact buffering
//! - **⚡ Cheap queries** - O(1) class lookup, indexed member lookup, overload-aware
//! - **🛡️ Strict validation** - Malformed artifacts are rejected with typed errors, never truncated
//! - **🧵 Concurrent reads** - The resolved table is immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapscope::MappingResolver;
//!
//! // One eager resolution per process: locate, fetch, decode, index.
//! let resolver = MappingResolver::resolve("1.20.4")?;
//!
//! // Translate between any two namespaces the table declares.
//! let runtime = resolver.translate_class(
//!     "net/minecraft/client/MinecraftClient", "named", "intermediary")?;
//! println!("runtime name: {runtime}");
//! # Ok::<(), mapscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `mapscope` is organized into a small set of modules, leaves first:
//!
//! - [`remote`] - Artifact locator and fetcher: Maven version index, download,
//!   checksum verification, decompression into scoped staging files
//! - [`mapping`] - The data model: namespaces, class/member entries, the Tiny v2
//!   decoder, and JVM descriptor parsing
//! - [`resolver`] - The public facade: eager construction and translation queries
//! - [`invoke`] - The capability trait through which a host-specific layer performs
//!   the actual reflective dispatch with already-translated names
//! - [`prelude`] - Convenient re-exports of commonly used types
//!
//! Data flows strictly downward: version string → build id → artifact bytes →
//! parsed table → indexed table → translation queries. Resolution happens once,
//! synchronously, before any query is served. Version discovery itself (reading the
//! version string out of the running binary) is the embedder's job and an input here.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use mapscope::prelude::*;
///
/// let resolver = MappingResolver::resolve("1.20.4")?;
/// let name = resolver.runtime_class("net/minecraft/text/Text")?;
/// # Ok::<(), mapscope::Error>(())
/// ```
pub mod prelude;

/// Capability boundary for host-specific reflective dispatch.
///
/// Translation (this crate) is kept strictly separate from invocation: the embedding
/// layer implements [`invoke::Invoker`] against its runtime and feeds it names that
/// have already been translated by the [`MappingResolver`].
pub mod invoke;

/// The in-memory mapping data model.
///
/// # Key Components
///
/// - [`mapping::MappingTable`] - The immutable multi-namespace symbol table
/// - [`mapping::ClassEntry`] / [`mapping::MemberEntry`] - Per-entry names across all namespaces
/// - [`mapping::Namespaces`] - Namespace labels and their table-assigned ordinals
/// - [`mapping::tiny`] - Streaming decoder for the Tiny v2 artifact format
/// - [`mapping::descriptor`] - JVM field/method descriptor parsing and validation
pub mod mapping;

/// Remote mapping-artifact discovery and retrieval.
///
/// # Key Components
///
/// - [`remote::MappingRepo`] - Handle to the repository publishing mapping artifacts
/// - [`remote::BuildId`] - One published build: binary version plus build number
/// - [`remote::MappingArtifact`] - A fetched, decompressed artifact in scoped staging
pub mod remote;

/// The resolver facade: eager construction and translation queries.
///
/// See [`MappingResolver`] for the main entry point.
pub mod resolver;

/// `mapscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all operations in this crate.
///
/// See [`error::Error`]: construction-time variants are terminal for the resolver,
/// query-time variants only for the individual translation call.
pub use error::Error;

/// Main entry point for resolving and querying mappings.
///
/// # Example
///
/// ```rust,no_run
/// use mapscope::MappingResolver;
/// let resolver = MappingResolver::resolve("1.20.4")?;
/// println!("{} classes mapped", resolver.table().classes().len());
/// # Ok::<(), mapscope::Error>(())
/// ```
pub use resolver::{MappingResolver, ResolverOptions};

/// The immutable multi-namespace symbol table and its namespace index.
pub use mapping::{MappingTable, Namespaces};

/// Remote repository handle and build identifier.
pub use remote::{BuildId, MappingRepo};
