//! Game implementations of `RulesEngine`.

pub mod mangala;
