pub mod record;

pub use record::InferenceRecord;
