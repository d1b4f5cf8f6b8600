//! Public Transport Victoria timetable provider.
//!
//! Adapts the PTV Timetable API (v2) to a provider-neutral model of
//! locations, lines and departures, and serves it over a small JSON API.

pub mod domain;
pub mod ptv;
pub mod web;
