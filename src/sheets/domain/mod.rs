pub mod a1_notation;
pub mod cell_position;
pub mod cell_range;
pub mod column;
pub mod header_row;
pub mod row;
