pub mod maintenance;
pub mod pool;
