//! Simulation engine composition for frame pacing and group steps.
//! This file wires focused engine submodules together.

use super::*;

mod clock;
mod step;
