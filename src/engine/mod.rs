// Engine modules

pub mod physics;
