pub mod blf_optimizer;
pub mod layout;
pub mod problem;
pub mod search;
