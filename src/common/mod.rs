// Shared helpers used across engine subsystems

pub mod math;
