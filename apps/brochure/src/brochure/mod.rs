// Brochure API: package data in, normalized document or composed pages out.
// Layout semantics live in crate::layout; this module only adapts HTTP to it.

pub mod handlers;
