pub mod normalize;
pub mod record;

pub use record::{load_record, InputError, Record};
