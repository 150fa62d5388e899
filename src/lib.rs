//! Campus E-Bus Tracker Library
//!
//! A simulated electric-bus fleet on a closed campus loop, with arrival
//! estimates and a terminal dashboard.

pub mod config;
pub mod dashboard;
pub mod simulation;
pub mod timer;
