pub mod patient;
pub mod store;
pub mod supabase_store;

pub use patient::PatientService;
pub use store::{store_from_config, InMemoryPatientStore, PatientStore, RecordChange, UpdateOutcome};
pub use supabase_store::SupabasePatientStore;
