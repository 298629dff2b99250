//! Main module for the PEG model and fixture codec

pub mod action;
pub mod engine;
pub mod expr;
pub mod fixture;
pub mod grammar;
pub mod result;
pub mod testing;
