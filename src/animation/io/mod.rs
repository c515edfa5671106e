pub mod network;
pub mod resource;
