//! Unit test harness for boxjoint-motion.
//!
//! This module organizes tests of the public configuration surface.

mod config_parsing;
mod config_validation;
