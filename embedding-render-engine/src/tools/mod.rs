pub mod picking;
pub mod point_selection;
