#![deny(unsafe_code)]
//! Small stateful pieces of the hero section that sit next to the particle
//! field: the rotating role headline and the contact-form check.

pub mod contact;
pub mod typewriter;

pub use contact::{ContactForm, FieldErrors};
pub use typewriter::{Typewriter, TypewriterTiming, DEFAULT_ROLES};
