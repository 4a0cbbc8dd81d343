//! Auth types shared across Foodgram services.
//!
//! Authentication happens at the gateway; services only read the identity it injects.

pub mod identity;
