mod fuzzy;

pub use fuzzy::rank;
