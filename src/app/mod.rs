// Application layer: pipeline use cases and the ports they depend on

pub mod ports;
pub mod specialties_use_case;
pub mod unify_use_case;

pub use specialties_use_case::{SpecialtiesOutput, SpecialtiesSummary, SpecialtiesUseCase};
pub use unify_use_case::{UnifySummary, UnifyUseCase};
