pub mod deadline;
pub mod poll;
