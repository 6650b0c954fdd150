//! Input and output containers shared by every service.
//!
//! All of these are plain values: services read them and build new ones,
//! they never mutate their inputs.

mod assignments;
mod categories;
mod coalitions;
mod evaluations;
mod preorder;
mod problem;
mod relation;
mod scales;
mod thresholds;

pub use assignments::{Assignments, MultiAssignments};
pub use categories::{CatsAndProfs, CatsAndProfsBuilder};
pub use coalitions::{Coalitions, Weights};
pub use evaluations::{Evaluations, EvaluationsBuilder};
pub use preorder::Preorder;
pub use problem::{ProblemData, SortingProblem};
pub use relation::RelationMatrix;
pub use scales::{Scale, Scales};
pub use thresholds::Thresholds;
