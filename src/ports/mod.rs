//! Port traits the domain talks to; concrete implementations live in
//! [`crate::adapters`].

pub mod config_port;
pub mod data_port;
pub mod report_port;
