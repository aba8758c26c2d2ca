pub mod batch;
pub mod engine;
pub mod flatten;
pub mod normalize;
pub mod session;
pub mod token;
