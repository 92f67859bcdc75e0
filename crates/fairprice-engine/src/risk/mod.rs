//! Risk module
//!
//! Classifies a recommended price against the competitor range and attaches
//! the fixed explanation and factor list the display layer renders.

pub mod classifier;

pub use classifier::{
    classify, RiskAssessment, RiskBranch, ABOVE_MARKET_FACTOR, BELOW_MARKET_FACTOR,
    CONFIDENCE_NOTE,
};
