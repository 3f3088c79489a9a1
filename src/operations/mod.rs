//! Contains the rounding helpers and the table of constants.

mod constants;
mod round;
