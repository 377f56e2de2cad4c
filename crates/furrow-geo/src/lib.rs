//! Furrow Geo - Geodesic measurement, tessellation, and polygon predicates
//!
//! This crate holds the pure geometry behind boundary capture and coverage
//! tracking: ring validation, spherical area, grid tessellation, and spatial
//! lookup. Everything works on WGS84 latitude/longitude degrees.

pub mod convert;
pub mod spatial;
pub mod validation;
pub mod area;
pub mod tessellate;
pub mod index;
