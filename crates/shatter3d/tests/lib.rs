#[macro_use]
extern crate approx;

mod fracture;
mod geometry;
