//! # mapscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the mapscope library. Import this module to get quick access to the
//! essential types for mapping resolution and translation queries.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all mapscope operations
pub use crate::Error;

/// The result type used throughout mapscope
pub use crate::Result;

// ================================================================================================
// Resolution and Queries
// ================================================================================================

/// The resolver facade: eager construction and translation queries
pub use crate::resolver::{MappingResolver, ResolverOptions};

// ================================================================================================
// Remote Artifact Discovery
// ================================================================================================

/// Handle to the remote repository publishing mapping artifacts
pub use crate::remote::MappingRepo;

/// Identifier of one published mapping build
pub use crate::remote::BuildId;

/// A fetched, decompressed mapping artifact in scoped staging
pub use crate::remote::MappingArtifact;

// ================================================================================================
// Mapping Data Model
// ================================================================================================

/// The immutable multi-namespace symbol table
pub use crate::mapping::MappingTable;

/// Namespace labels and their table-assigned ordinals
pub use crate::mapping::Namespaces;

/// One class across all namespaces
pub use crate::mapping::ClassEntry;

/// One method or field across all namespaces
pub use crate::mapping::MemberEntry;

/// Streaming decoder for the Tiny v2 artifact format
pub use crate::mapping::tiny::decode;

// ================================================================================================
// Host Dispatch Boundary
// ================================================================================================

/// Capability trait for host-specific reflective dispatch
pub use crate::invoke::Invoker;
