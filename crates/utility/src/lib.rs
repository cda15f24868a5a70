pub mod geo;
pub mod id;
pub mod normalize;
pub mod stable_id;
