//! Core data types for FairPrice

pub mod pricing;
