pub mod drug;
pub mod patient;
pub mod solution;
pub use drug::*;
pub use patient::*;
pub use solution::{Concentration, Solution};
