pub mod fix;
pub mod phase;
pub mod run_record;
