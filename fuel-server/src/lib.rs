//! Refuelling planner server.
//!
//! A web application that answers: "driving from here to there with a
//! 500-mile tank, where should I buy fuel, and how much, to spend the
//! least?"

pub mod cache;
pub mod domain;
pub mod planner;
pub mod routing;
pub mod stations;
pub mod web;
