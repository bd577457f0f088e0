pub mod cycle;
pub mod last_time;
pub mod mqtt;
pub mod retry;
pub mod waqi;
