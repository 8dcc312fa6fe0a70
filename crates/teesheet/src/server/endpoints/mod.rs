pub mod status;
pub mod tee_times;
