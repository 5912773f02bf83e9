//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`bridge-traits`, `bridge-sim`, `core-channel`). Host
//! applications can depend on `stepbridge-workspace` and enable the documented
//! features without needing to wire each crate individually.
