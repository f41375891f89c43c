pub mod feedback;
pub mod game_state;
pub mod rotation;
pub mod statistics;
pub mod word_validation;

// Re-export main components
pub use feedback::*;
pub use game_state::*;
pub use rotation::*;
pub use statistics::*;
pub use word_validation::*;
