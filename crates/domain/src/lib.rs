//! # hbnb-domain
//!
//! Pure domain model for the hbnb review API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Places** and **Users** (the records a review points at)
//! - Define **Reviews** and their creation / partial-update rules
//! - Define the [`Object`](object::Object) envelope storage backends exchange
//! - Define request [`Payload`](payload::Payload)s, parsed eagerly but
//!   validated in a fixed order by the application layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod attributes;
pub mod object;
pub mod payload;
pub mod place;
pub mod review;
pub mod user;
