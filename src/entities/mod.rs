// Entity Models
//
// Companies and people have stable slug identities; everything else is a
// plain record pointing at them by id. The repository owns all of it.

pub mod company;
pub mod person;
pub mod records;

pub use company::{Company, CompanyAttributes};
pub use person::{Person, PersonAttributes};
pub use records::{
    BeneficialOwnershipRecord, CompensationKey, DirectorCompPolicy, DirectorCompensation,
    DirectorProfile, EntityKind, ExecutiveCompensation, ExecutiveEquityGrant, SlugCollision,
    SourceManifestEntry,
};
