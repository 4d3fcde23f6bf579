// execap - Executive Compensation League - Core Library
// Exposes all modules for use in CLI, API server, and tests
//
// Data flows one way:
// BlobStore → FolderDiscovery → LoadOrchestrator → RecordImporters
//           → EntityResolver / LeagueRepository → queries

pub mod blob_store;     // Storage capability (fs + in-memory)
pub mod coercion;       // Tolerant cell parsing
pub mod columns;        // Header alias catalog
pub mod config;         // Settings + tracing setup
pub mod discovery;      // companies/<company>/<year>/ layout
pub mod entities;       // Companies, people, typed records
pub mod error;
pub mod importers;      // One importer per file category
pub mod loader;         // Load pass + repository handle
pub mod repository;     // League repository + queries
pub mod resolver;       // Slugs + merge-on-conflict
pub mod rows;           // CSV → rows

// Re-export commonly used types
pub use blob_store::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use config::Settings;
pub use discovery::FolderDiscovery;
pub use entities::{
    BeneficialOwnershipRecord, Company, CompanyAttributes, DirectorCompPolicy,
    DirectorCompensation, DirectorProfile, EntityKind, ExecutiveCompensation,
    ExecutiveEquityGrant, Person, PersonAttributes, SlugCollision, SourceManifestEntry,
};
pub use error::{BlobError, LoadError};
pub use importers::{FileCategory, ImportStats, RecordImporter};
pub use loader::{
    FileReport, LoadOrchestrator, LoadOutcome, LoadReport, LoadRequest, LoadState, LoadStatus,
    RepositoryHandle,
};
pub use repository::{CapSnapshot, LeagueRepository, LeagueStatistics, TopEarner};
pub use resolver::{slugify, EntityResolver};
pub use rows::{parse_csv, Row};

/// Crate version, reported by the CLI and the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
