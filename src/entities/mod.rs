pub mod localized_movie;
pub mod localized_scene;
pub mod movie;
pub mod scene;
