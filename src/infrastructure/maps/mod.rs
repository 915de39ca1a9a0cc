mod google_directions;
mod mock_directions;

pub use google_directions::GoogleDirectionsClient;
pub use mock_directions::MockDirectionsProvider;
